//! Purchase, status and outcome collaborators.

use std::future::Future;

use crate::api::ApiError;
use crate::domain::{OrderId, OrderPayload, PollReport, Submission};

/// Trait for the backend side of a purchase.
///
/// This abstraction allows the payment session to be tested with scripted
/// responses.
pub trait PaymentBackend {
    /// Submit a purchase. Called once per session.
    fn submit(
        &self,
        order: &OrderPayload,
    ) -> impl Future<Output = Result<Submission, ApiError>> + Send;

    /// Check the status of a submitted order.
    fn poll(&self, order_id: &OrderId) -> impl Future<Output = Result<PollReport, ApiError>> + Send;

    /// Tell the backend the order completed.
    fn mark_complete(&self, order_id: &OrderId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Tell the backend the order failed or was abandoned.
    fn mark_failed(&self, order_id: &OrderId) -> impl Future<Output = Result<(), ApiError>> + Send;
}
