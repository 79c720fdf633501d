//! The payment session state machine.
//!
//! [`SessionSnapshot`] is plain data with transition methods. It does no
//! I/O and knows nothing about time except the durations it is handed, which
//! keeps the rules in one place and testable without a runtime. The session
//! driver applies each transition inside a single `send_if_modified` call.

use std::time::Duration;

use tracing::debug;

use crate::api::ApiError;
use crate::domain::{OrderId, PollReport, RemoteStatus, Submission};

use super::status::{FailureReason, SessionStatus};

/// Everything an observer can know about a payment session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    status: SessionStatus,
    order_id: Option<OrderId>,
    remaining_ms: u64,
    generation: u64,
    polls_issued: u32,
    consecutive_errors: u32,
    reason: Option<FailureReason>,
}

/// What applying a status check result did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollApplied {
    /// Stale generation or the session is no longer pending.
    Discarded,
    /// The order is still being processed.
    StillPending,
    /// The check failed but the error budget isn't spent.
    Retrying { consecutive: u32 },
    /// The session reached a terminal status.
    Resolved(SessionStatus),
}

impl SessionSnapshot {
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The order id, once the submission has been accepted.
    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// Seconds left in the payment window, rounded up.
    pub fn remaining_secs(&self) -> u32 {
        let secs = self.remaining_ms.div_ceil(1000);
        u32::try_from(secs).unwrap_or(u32::MAX)
    }

    /// Time left in the payment window.
    pub fn remaining(&self) -> Duration {
        Duration::from_millis(self.remaining_ms)
    }

    /// Bumped whenever in-flight status checks must be ignored.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Status checks sent so far.
    pub fn polls_issued(&self) -> u32 {
        self.polls_issued
    }

    /// Failed status checks since the last successful one.
    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    /// Why the session ended, if it ended badly.
    pub fn reason(&self) -> Option<&FailureReason> {
        self.reason.as_ref()
    }

    /// Idle → Submitting.
    pub(crate) fn begin_submit(&mut self) -> bool {
        if self.status != SessionStatus::Idle {
            return false;
        }
        self.status = SessionStatus::Submitting;
        true
    }

    /// Submitting → Failed. Submissions are never retried.
    pub(crate) fn submission_rejected(&mut self, err: &ApiError) -> bool {
        if self.status != SessionStatus::Submitting {
            return false;
        }
        self.finish(
            SessionStatus::Failed,
            Some(FailureReason::Submission(err.to_string())),
        );
        true
    }

    /// Submitting → Pending, or straight to TimedOut if the window is
    /// already closed.
    ///
    /// Returns `false` if the session was cancelled while submitting; the
    /// order is then not recorded.
    pub(crate) fn submission_accepted(&mut self, submission: &Submission) -> bool {
        if self.status != SessionStatus::Submitting {
            return false;
        }
        self.order_id = Some(submission.order_id.clone());
        self.remaining_ms = u64::from(submission.remaining_secs) * 1000;
        self.status = SessionStatus::Pending;
        if self.remaining_ms == 0 {
            self.expire();
        }
        true
    }

    /// Bring the payment window in line with the time `left` until the
    /// deadline. Only ever counts down; a longer window has to come from
    /// the server.
    pub(crate) fn sync_remaining(&mut self, left: Duration) -> bool {
        if self.status != SessionStatus::Pending {
            return false;
        }
        let left_ms = u64::try_from(left.as_millis()).unwrap_or(u64::MAX);
        if left_ms >= self.remaining_ms {
            return false;
        }
        self.remaining_ms = left_ms;
        if self.remaining_ms == 0 {
            self.expire();
        }
        true
    }

    /// Record a status check about to be sent. Returns the generation tag
    /// the response must carry to be applied.
    pub(crate) fn begin_poll(&mut self) -> Option<u64> {
        if self.status != SessionStatus::Pending {
            return None;
        }
        self.polls_issued += 1;
        Some(self.generation)
    }

    /// Apply the result of a status check tagged with `tag`.
    pub(crate) fn apply_poll(
        &mut self,
        tag: u64,
        result: &Result<PollReport, ApiError>,
        max_consecutive_errors: u32,
    ) -> PollApplied {
        if tag != self.generation || self.status != SessionStatus::Pending {
            debug!(
                tag,
                generation = self.generation,
                status = %self.status,
                "discarding stale status check"
            );
            return PollApplied::Discarded;
        }

        match result {
            Ok(report) => {
                self.consecutive_errors = 0;

                if let Some(secs) = report.remaining_secs {
                    self.remaining_ms = u64::from(secs) * 1000;
                }
                // An exhausted window wins over whatever the report says.
                if self.remaining_ms == 0 {
                    self.expire();
                    return PollApplied::Resolved(SessionStatus::TimedOut);
                }

                match report.status {
                    RemoteStatus::Pending => PollApplied::StillPending,
                    RemoteStatus::Succeeded => {
                        self.finish(SessionStatus::Succeeded, None);
                        PollApplied::Resolved(SessionStatus::Succeeded)
                    }
                    RemoteStatus::Failed => {
                        self.finish(SessionStatus::Failed, Some(FailureReason::Rejected));
                        PollApplied::Resolved(SessionStatus::Failed)
                    }
                }
            }
            Err(_) => {
                self.consecutive_errors += 1;
                let consecutive = self.consecutive_errors;

                if consecutive >= max_consecutive_errors.max(1) {
                    self.finish(
                        SessionStatus::Failed,
                        Some(FailureReason::ExhaustedRetries {
                            attempts: consecutive,
                        }),
                    );
                    PollApplied::Resolved(SessionStatus::Failed)
                } else {
                    PollApplied::Retrying { consecutive }
                }
            }
        }
    }

    /// Any non-terminal status → Cancelled.
    pub(crate) fn cancel(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.finish(SessionStatus::Cancelled, Some(FailureReason::Cancelled));
        true
    }

    /// Pending → TimedOut.
    pub(crate) fn expire(&mut self) -> bool {
        if self.status != SessionStatus::Pending {
            return false;
        }
        self.remaining_ms = 0;
        self.finish(SessionStatus::TimedOut, Some(FailureReason::TimedOut));
        true
    }

    fn finish(&mut self, status: SessionStatus, reason: Option<FailureReason>) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.reason = reason;
        self.generation += 1;
    }
}
