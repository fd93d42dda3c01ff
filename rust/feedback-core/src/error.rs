//! Store error taxonomy

use thiserror::Error;

pub const NOT_CONFIGURED_ALERT: &str =
    "Feedback widget not configured. Please set up Supabase credentials.";
pub const SUBMIT_FAILED_ALERT: &str = "Failed to submit comment. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No reachable endpoint or credentials (degraded mode)
    #[error("feedback store is not configured")]
    NotConfigured,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Alert text shown when a write fails
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::NotConfigured => NOT_CONFIGURED_ALERT,
            _ => SUBMIT_FAILED_ALERT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(StoreError::NotConfigured.user_message(), NOT_CONFIGURED_ALERT);
        let rejected = StoreError::Rejected { status: 401, message: "bad key".to_string() };
        assert_eq!(rejected.user_message(), SUBMIT_FAILED_ALERT);
        assert_eq!(rejected.to_string(), "store rejected request (401): bad key");
    }
}
