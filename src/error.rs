use serde_json::Value;

/// Everything that can abort a provisioning run. All variants are fatal:
/// nothing is retried locally and nothing is downgraded to a warning.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Both group counts were zero. Raised before any provider call.
    #[error("must request at least one server or client instance")]
    NoInstancesRequested,

    /// A user-supplied resource identifier failed its pre-flight existence
    /// probe.
    #[error("{kind} {name:?} does not exist or is not visible to this account")]
    MissingResource { kind: &'static str, name: String },

    /// The provider rejected a bulkInsert request synchronously (quota,
    /// permission, malformed body). Carries the provider's own message.
    #[error("bulk instance creation rejected: {message}")]
    RequestRejected { message: String },

    /// The asynchronous operation reached DONE carrying an error payload.
    /// The payload is the provider's JSON, untouched, so operators can see
    /// exactly what the API reported.
    #[error("{operation} operation failed: {error}")]
    OperationFailed { operation: String, error: Value },

    /// No authenticated Compute client could be constructed.
    #[error(
        "could not obtain Google Cloud credentials: {0:#}\n\
         Set the GOOGLE_APPLICATION_CREDENTIALS environment variable to a \
         service account key file and re-run."
    )]
    Credentials(anyhow::Error),

    /// Transport-level failure talking to the Compute Engine API.
    #[error("Compute Engine API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operation_failure_surfaces_provider_payload() {
        let payload = json!({
            "errors": [{ "code": "QUOTA_EXCEEDED", "message": "Quota 'N2_CPUS' exceeded" }]
        });
        let err = Error::OperationFailed {
            operation: "bulkInsert".to_string(),
            error: payload.clone(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("QUOTA_EXCEEDED"));
        assert!(rendered.contains("Quota 'N2_CPUS' exceeded"));
    }

    #[test]
    fn rejection_keeps_provider_message() {
        let err = Error::RequestRejected {
            message: "quota exceeded".to_string(),
        };
        assert!(err.to_string().contains("quota exceeded"));
    }
}
