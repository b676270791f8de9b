//! HTTP client for the Compute Engine v1 API.
//!
//! [`Compute`] is the narrow seam the provisioning flow depends on: one
//! bulk-creation call and one blocking operation wait. [`ComputeClient`]
//! implements it against the real API; tests implement it with scripted
//! in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;
use crate::gcp::auth;
use crate::gcp::gce::types::{BulkInsertRequest, Operation};

const GCE_API_BASE: &str = "https://compute.googleapis.com/compute/v1";

/// The Compute Engine calls the provisioning flow is built on.
#[async_trait]
pub trait Compute {
    /// Submits one bulk-creation request. May fail synchronously with the
    /// provider's structured rejection message.
    async fn bulk_insert(
        &self,
        project: &str,
        zone: &str,
        body: &BulkInsertRequest,
    ) -> Result<Operation, Error>;

    /// Queries a zone operation by name, blocking provider-side until the
    /// operation progresses or the wait deadline passes. Returns the
    /// operation's current (possibly terminal) state.
    async fn wait_operation(
        &self,
        project: &str,
        zone: &str,
        operation: &str,
    ) -> Result<Operation, Error>;
}

/// An authenticated Compute Engine API client.
pub struct ComputeClient {
    http: reqwest::Client,
    token: String,
}

impl ComputeClient {
    /// Builds an authenticated client. Failing to obtain a token is the
    /// credentials error, reported with remediation guidance.
    pub async fn connect() -> Result<Self, Error> {
        let token = auth::get_access_token().await.map_err(Error::Credentials)?;
        Ok(ComputeClient {
            http: reqwest::Client::new(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", GCE_API_BASE, path)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Existence probe used by the pre-flight validator. 404 means the
    /// resource is not there; the API reports 403 for resources outside
    /// the caller's view, which amounts to the same thing here.
    pub async fn resource_exists(&self, path: &str) -> Result<bool, Error> {
        let response = self
            .http
            .get(self.url(path))
            .header("Authorization", self.bearer())
            .send()
            .await?;

        let status = response.status();
        match response.error_for_status() {
            Ok(_) => Ok(true),
            Err(_)
                if status == reqwest::StatusCode::NOT_FOUND
                    || status == reqwest::StatusCode::FORBIDDEN =>
            {
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl Compute for ComputeClient {
    async fn bulk_insert(
        &self,
        project: &str,
        zone: &str,
        body: &BulkInsertRequest,
    ) -> Result<Operation, Error> {
        let url = self.url(&format!(
            "projects/{}/zones/{}/instances/bulkInsert",
            project, zone
        ));
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.bearer())
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Error::RequestRejected {
                message: rejection_message(&body_text),
            });
        }

        Ok(response.json().await?)
    }

    async fn wait_operation(
        &self,
        project: &str,
        zone: &str,
        operation: &str,
    ) -> Result<Operation, Error> {
        let url = self.url(&format!(
            "projects/{}/zones/{}/operations/{}/wait",
            project, zone, operation
        ));
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.bearer())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

/// Pulls the human-readable `error.message` out of a structured Compute
/// API error body, falling back to the raw body text.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|parsed| parsed.get("error"))
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}
