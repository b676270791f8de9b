//! # GCP Authentication
//!
//! Server-to-server OAuth 2.0 for a service account: read the key file
//! named by `GOOGLE_APPLICATION_CREDENTIALS`, assert the account's
//! identity in a signed JWT, and exchange it at the Google token endpoint
//! for a short-lived access token. The token is fetched once per process.

use anyhow::{Context, Result};
use cached::proc_macro::once;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

/// The Google OAuth2 token endpoint.
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// The parts of a service-account key file (as written by
/// `gcloud iam service-accounts keys create`) that the token exchange needs.
#[derive(Debug, Deserialize)]
struct ServiceAccount {
    private_key: String,
    client_email: String,
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
}

/// Claims of the JWT asserted to the token endpoint.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The issuer of the token (the service account's email address).
    iss: String,
    /// The scope of the requested permissions.
    scope: String,
    /// The audience for the token (the token endpoint URL).
    aud: String,
    /// The expiration time of the token (Unix timestamp).
    exp: u64,
    /// The time the token was issued (Unix timestamp).
    iat: u64,
}

/// Fetches a GCP access token for the configured service account.
///
/// `GOOGLE_APPLICATION_CREDENTIALS` must point at a service-account key
/// file. Errors here mean no authenticated client can be constructed; the
/// caller maps them onto its credentials error.
#[once(result = true)]
pub async fn get_access_token() -> Result<String> {
    let key_path = std::env::var("GOOGLE_APPLICATION_CREDENTIALS")
        .context("GOOGLE_APPLICATION_CREDENTIALS not set")?;
    let key_json = std::fs::read_to_string(&key_path)
        .with_context(|| format!("Failed to read service account key {}", key_path))?;
    let service_account: ServiceAccount =
        serde_json::from_str(&key_json).context("Invalid service account key file")?;

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let exp = now + 3600; // Token is valid for 1 hour.

    let claims = Claims {
        iss: service_account.client_email.clone(),
        scope: "https://www.googleapis.com/auth/cloud-platform".to_string(),
        aud: TOKEN_URL.to_string(),
        exp,
        iat: now,
    };

    let header = Header::new(Algorithm::RS256);
    let encoding_key = EncodingKey::from_rsa_pem(service_account.private_key.as_bytes())
        .context("Service account private key is not a valid RSA PEM")?;
    let jwt = encode(&header, &claims, &encoding_key)?;

    let params = [
        ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
        ("assertion", jwt.as_str()),
    ];

    let client = reqwest::Client::new();
    let response = client.post(TOKEN_URL).form(&params).send().await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(anyhow::anyhow!(
            "Failed to get access token: {}",
            error_text
        ));
    }

    let token_response: AccessToken = response.json().await?;
    Ok(token_response.access_token)
}
