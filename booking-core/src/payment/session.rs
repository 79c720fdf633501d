//! The payment session driver.
//!
//! A [`PaymentSession`] submits one purchase, then checks its status on a
//! fixed interval until the order succeeds, fails, runs out of time or the
//! user cancels. Observers follow along through a [`SessionHandle`].
//!
//! All state lives in a `watch` channel. The driver and the handle both
//! mutate it through `send_if_modified`, one transition per call, so a
//! terminal status can never be overwritten. Status checks carry the
//! generation they were issued under and are discarded if it has moved on.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::api::ApiError;
use crate::domain::{OrderId, OrderPayload};

use super::backend::PaymentBackend;
use super::config::SessionConfig;
use super::scheduler::PollScheduler;
use super::state::{PollApplied, SessionSnapshot};
use super::status::SessionStatus;

/// Observer and control side of a payment session.
///
/// Cheap to clone. Handles stay usable after the session has finished.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    state: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionHandle {
    /// The current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receive every published state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Abandon the purchase.
    ///
    /// Takes effect immediately: the session is Cancelled when this returns
    /// `true`. Returns `false` if the session had already finished.
    pub fn cancel(&self) -> bool {
        let cancelled = self.state.send_if_modified(SessionSnapshot::cancel);
        if cancelled {
            let order_id = self.state.borrow().order_id().map(|id| id.to_string());
            info!(order_id = ?order_id, "payment session cancelled");
        }
        cancelled
    }
}

/// One purchase attempt, from submission to outcome.
pub struct PaymentSession<B> {
    backend: B,
    config: SessionConfig,
    state: Arc<watch::Sender<SessionSnapshot>>,
}

impl<B: PaymentBackend> PaymentSession<B> {
    /// Create an idle session.
    pub fn new(backend: B, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            backend,
            config,
            state: Arc::new(state),
        }
    }

    /// A handle for observing or cancelling this session.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Run the session to completion and return its final state.
    ///
    /// Submits `payload` exactly once. Dropping the returned future stops
    /// polling at the next await point, without notifying the backend.
    pub async fn start(self, payload: OrderPayload) -> SessionSnapshot {
        if !self.state.send_if_modified(SessionSnapshot::begin_submit) {
            debug!(status = %self.state.borrow().status(), "session not idle, not submitting");
            return self.state.borrow().clone();
        }

        info!(
            train_id = payload.train_id,
            seat_type = %payload.seat_type,
            price_cents = payload.price_cents,
            "submitting purchase"
        );

        let submission = match self.backend.submit(&payload).await {
            Ok(submission) => submission,
            Err(e) => {
                warn!(error = %e, "purchase submission failed");
                self.state.send_if_modified(|s| s.submission_rejected(&e));
                return self.state.borrow().clone();
            }
        };

        let order_id = submission.order_id.clone();
        if !self
            .state
            .send_if_modified(|s| s.submission_accepted(&submission))
        {
            info!(order_id = %order_id, "session ended during submission, abandoning order");
            self.report("mark_failed", &order_id, self.backend.mark_failed(&order_id))
                .await;
            return self.state.borrow().clone();
        }

        info!(
            order_id = %order_id,
            remaining_secs = submission.remaining_secs,
            "order awaiting payment"
        );

        if self.state.borrow().status() == SessionStatus::Pending {
            self.poll_until_done(&order_id).await;
        }

        let outcome = self.state.borrow().clone();
        info!(
            order_id = %order_id,
            status = %outcome.status(),
            reason = ?outcome.reason(),
            polls = outcome.polls_issued(),
            "payment session finished"
        );
        self.notify_outcome(&order_id, outcome.status()).await;

        outcome
    }

    /// Drive status checks until the session leaves Pending.
    ///
    /// The scheduler lives on this stack frame, so returning stops it.
    async fn poll_until_done(&self, order_id: &OrderId) {
        let mut scheduler = PollScheduler::start(self.config.poll_interval);
        let mut updates = self.state.subscribe();
        let max_errors = self.config.max_consecutive_errors;
        let mut deadline = Instant::now() + self.state.borrow().remaining();

        loop {
            tokio::select! {
                biased;
                _ = wait_terminal(&mut updates) => break,
                _ = tokio::time::sleep_until(deadline) => {
                    if self.state.send_if_modified(SessionSnapshot::expire) {
                        info!(order_id = %order_id, "payment window closed");
                    }
                    break;
                }
                _ = scheduler.tick() => {}
            }

            let left = deadline.saturating_duration_since(Instant::now());
            self.state.send_if_modified(|s| s.sync_remaining(left));

            let mut issued = None;
            self.state.send_if_modified(|s| {
                issued = s.begin_poll();
                issued.is_some()
            });
            let Some(tag) = issued else {
                // The countdown ran out or the user cancelled.
                break;
            };

            trace!(order_id = %order_id, tag, "checking order status");

            let result = tokio::select! {
                biased;
                _ = wait_terminal(&mut updates) => break,
                _ = tokio::time::sleep_until(deadline) => {
                    if self.state.send_if_modified(SessionSnapshot::expire) {
                        info!(order_id = %order_id, "payment window closed during status check");
                    }
                    break;
                }
                result = tokio::time::timeout(self.config.request_timeout, self.backend.poll(order_id)) => {
                    result.unwrap_or_else(|_| Err(ApiError::Timeout))
                }
            };

            let mut applied = PollApplied::Discarded;
            self.state.send_if_modified(|s| {
                applied = s.apply_poll(tag, &result, max_errors);
                applied != PollApplied::Discarded
            });

            // The server's figure replaces the local deadline.
            if applied == PollApplied::StillPending
                && matches!(&result, Ok(report) if report.remaining_secs.is_some())
            {
                deadline = Instant::now() + self.state.borrow().remaining();
            }

            match (applied, &result) {
                (PollApplied::Retrying { consecutive }, Err(e)) => {
                    warn!(
                        order_id = %order_id,
                        attempt = consecutive,
                        max = max_errors,
                        error = %e,
                        "status check failed"
                    );
                }
                (PollApplied::Resolved(status), _) => {
                    debug!(order_id = %order_id, status = %status, "order resolved");
                    break;
                }
                (PollApplied::Discarded, _) => break,
                _ => {
                    trace!(
                        order_id = %order_id,
                        remaining_secs = self.state.borrow().remaining_secs(),
                        "order still pending"
                    );
                }
            }
        }
    }

    async fn notify_outcome(&self, order_id: &OrderId, status: SessionStatus) {
        match status {
            SessionStatus::Succeeded => {
                self.report("mark_complete", order_id, self.backend.mark_complete(order_id))
                    .await
            }
            SessionStatus::Failed | SessionStatus::Cancelled | SessionStatus::TimedOut => {
                self.report("mark_failed", order_id, self.backend.mark_failed(order_id))
                    .await
            }
            SessionStatus::Idle | SessionStatus::Submitting | SessionStatus::Pending => {}
        }
    }

    /// Send a best-effort outcome notification.
    async fn report(
        &self,
        what: &'static str,
        order_id: &OrderId,
        call: impl Future<Output = Result<(), ApiError>>,
    ) {
        let result = tokio::time::timeout(self.config.request_timeout, call)
            .await
            .unwrap_or_else(|_| Err(ApiError::Timeout));

        match result {
            Ok(()) => debug!(order_id = %order_id, what, "outcome reported"),
            Err(e) => warn!(order_id = %order_id, what, error = %e, "failed to report outcome"),
        }
    }
}

/// Resolve once the session is terminal.
async fn wait_terminal(updates: &mut watch::Receiver<SessionSnapshot>) {
    let _ = updates.wait_for(SessionSnapshot::is_terminal).await;
}
