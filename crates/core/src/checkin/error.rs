//! Check-in error types.
//!
//! Only faults live here. A user who may not check in is a normal outcome and
//! is reported through [`IneligibleReason`](super::eligibility::IneligibleReason).

use checkin_shared::AppError;
use checkin_shared::types::UserId;
use thiserror::Error;

/// Errors that can occur during check-in operations.
#[derive(Debug, Error)]
pub enum CheckinError {
    /// User record does not exist.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Crediting the reward failed; nothing was granted.
    #[error("Failed to increase quota for user {user_id}: {message}")]
    QuotaIncrease {
        /// The user being credited.
        user_id: UserId,
        /// Underlying store error.
        message: String,
    },

    /// User or audit store query failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CheckinError {
    /// Create a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl From<CheckinError> for AppError {
    fn from(err: CheckinError) -> Self {
        match err {
            CheckinError::UserNotFound(_) => Self::NotFound(err.to_string()),
            CheckinError::QuotaIncrease { .. } | CheckinError::Storage(_) => {
                Self::Database(err.to_string())
            }
        }
    }
}
