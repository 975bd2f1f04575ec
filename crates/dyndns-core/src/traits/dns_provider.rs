// # DNS Provider Trait
//
// Defines the interface for notifying a dynamic-DNS endpoint.
//
// ## Implementations
//
// - IONOS: `dyndns-provider-ionos` crate
//
// ## Usage
//
// ```rust,ignore
// use dyndns_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> dyndns_core::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     provider
//         .update_domains(&["example.com".to_string()])
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Result of a successful dynamic-DNS notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    /// HTTP status returned by the provider (always 2xx)
    pub status: u16,
}

/// Outcome of one update attempt, as seen by the scheduler
///
/// Built from the provider's `Result` and consumed immediately for
/// counting and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The provider accepted the update
    Success,
    /// The attempt failed; `detail` describes why
    Failure {
        /// Error message, including the HTTP status when there was one
        detail: String,
    },
}

impl UpdateOutcome {
    /// Whether the attempt succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Error detail for a failed attempt
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { detail } => Some(detail),
        }
    }
}

impl From<Result<UpdateResult, crate::Error>> for UpdateOutcome {
    fn from(result: Result<UpdateResult, crate::Error>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => Self::Failure {
                detail: e.to_string(),
            },
        }
    }
}

/// Trait for dynamic-DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Single-shot
///
/// Each call performs exactly one request-response cycle:
/// - No retry logic or backoff (the next scheduler tick is the retry)
/// - No background tasks
/// - No state kept between calls
///
/// Return an error on failure; the scheduler logs it and carries on.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Tell the provider that `domains` should point at the caller
    ///
    /// # Parameters
    ///
    /// - `domains`: Non-empty list of domain names, sent in this order
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: The provider answered with a 2xx status
    /// - `Err(Error)`: Transport failure, non-2xx status, or serialization failure
    async fn update_domains(&self, domains: &[String]) -> Result<UpdateResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_ok_has_no_detail() {
        let outcome = UpdateOutcome::from(Ok::<_, crate::Error>(UpdateResult { status: 200 }));
        assert!(outcome.is_success());
        assert_eq!(outcome.detail(), None);
    }

    #[test]
    fn outcome_from_err_keeps_status_in_detail() {
        let outcome = UpdateOutcome::from(Err::<UpdateResult, _>(crate::Error::http(
            401,
            "authentication failed",
        )));
        assert!(!outcome.is_success());
        assert!(outcome.detail().unwrap().contains("401"));
    }
}
