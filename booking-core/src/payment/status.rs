//! Session status and failure reasons.

use std::fmt;

/// Where a payment session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    /// Created, nothing submitted yet.
    #[default]
    Idle,
    /// Purchase submitted, waiting for the backend to accept it.
    Submitting,
    /// Order exists, waiting for payment to go through.
    Pending,
    /// Paid.
    Succeeded,
    /// Rejected at submission, failed remotely, or too many failed checks.
    Failed,
    /// Abandoned by the user.
    Cancelled,
    /// The payment window ran out.
    TimedOut,
}

impl SessionStatus {
    /// Whether the session is over. Terminal statuses are never left.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Succeeded
                | SessionStatus::Failed
                | SessionStatus::Cancelled
                | SessionStatus::TimedOut
        )
    }

    /// Short lowercase name, as used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Submitting => "submitting",
            SessionStatus::Pending => "pending",
            SessionStatus::Succeeded => "succeeded",
            SessionStatus::Failed => "failed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a session ended without succeeding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// The purchase could not be submitted.
    #[error("submission failed: {0}")]
    Submission(String),

    /// The backend reported the order as failed.
    #[error("order rejected by the backend")]
    Rejected,

    /// Status checks kept failing.
    #[error("gave up after {attempts} consecutive failed status checks")]
    ExhaustedRetries { attempts: u32 },

    /// The payment window closed.
    #[error("payment window expired")]
    TimedOut,

    /// The user walked away.
    #[error("cancelled by user")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(!SessionStatus::Idle.is_terminal());
        assert!(!SessionStatus::Submitting.is_terminal());
        assert!(!SessionStatus::Pending.is_terminal());
        assert!(SessionStatus::Succeeded.is_terminal());
        assert!(SessionStatus::Failed.is_terminal());
        assert!(SessionStatus::Cancelled.is_terminal());
        assert!(SessionStatus::TimedOut.is_terminal());
    }

    #[test]
    fn status_display() {
        assert_eq!(SessionStatus::default().to_string(), "idle");
        assert_eq!(SessionStatus::TimedOut.to_string(), "timed_out");
    }

    #[test]
    fn reason_display() {
        assert_eq!(
            FailureReason::ExhaustedRetries { attempts: 3 }.to_string(),
            "gave up after 3 consecutive failed status checks"
        );
        assert_eq!(
            FailureReason::Submission("API error 500: boom".into()).to_string(),
            "submission failed: API error 500: boom"
        );
    }
}
