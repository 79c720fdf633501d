//! Purchase orders and the backend's view of their progress.

use std::fmt;

/// Error returned when parsing an invalid order id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order id: {reason}")]
pub struct InvalidOrderId {
    reason: &'static str,
}

/// Longest order id the backend hands out.
const MAX_ORDER_ID_LEN: usize = 64;

/// An order identifier assigned by the backend at submission.
///
/// Order ids are opaque. They end up in URL paths, so they must be
/// non-empty and free of whitespace and `/`.
///
/// # Examples
///
/// ```
/// use booking_core::domain::OrderId;
///
/// let id = OrderId::parse("TT202401010000000001").unwrap();
/// assert_eq!(id.as_str(), "TT202401010000000001");
///
/// assert!(OrderId::parse("").is_err());
/// assert!(OrderId::parse("T 1").is_err());
/// assert!(OrderId::parse("T/1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Parse an order id.
    pub fn parse(s: &str) -> Result<Self, InvalidOrderId> {
        if s.is_empty() {
            return Err(InvalidOrderId {
                reason: "order id cannot be empty",
            });
        }

        if s.len() > MAX_ORDER_ID_LEN {
            return Err(InvalidOrderId {
                reason: "order id is too long",
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(InvalidOrderId {
                reason: "order id cannot contain whitespace or '/'",
            });
        }

        Ok(OrderId(s.to_string()))
    }

    /// Returns the order id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderId({})", self.0)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the checkout flow asks the backend to buy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPayload {
    /// Backend train id.
    pub train_id: u64,

    /// Seat type code.
    pub seat_type: String,

    /// Quoted price in minor currency units.
    pub price_cents: u64,
}

impl OrderPayload {
    /// Create a new payload.
    pub fn new(train_id: u64, seat_type: impl Into<String>, price_cents: u64) -> Self {
        Self {
            train_id,
            seat_type: seat_type.into(),
            price_cents,
        }
    }
}

/// Successful submission: the order exists and is waiting for payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The new order's id.
    pub order_id: OrderId,

    /// Seconds left to complete payment.
    pub remaining_secs: u32,
}

/// Status of an order's background job as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteStatus {
    /// Still being processed.
    Pending,
    /// Paid and issued.
    Succeeded,
    /// Rejected, cancelled or expired on the server side.
    Failed,
}

impl RemoteStatus {
    /// Map a backend status string onto a remote status.
    ///
    /// Matching is case-insensitive. Returns `None` for strings the client
    /// doesn't know about.
    pub fn from_backend(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" | "IDLE" | "PROCESSING" => Some(RemoteStatus::Pending),
            "OK" | "DONE" | "COMPLETED" | "SUCCEEDED" | "SUCCESS" => Some(RemoteStatus::Succeeded),
            "FAILED" | "REJECTED" | "CANCELLED" | "TIMEOUT" => Some(RemoteStatus::Failed),
            _ => None,
        }
    }
}

/// One answer from the status collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Where the order stands.
    pub status: RemoteStatus,

    /// Seconds left to complete payment, when the backend says so.
    pub remaining_secs: Option<u32>,
}

impl PollReport {
    /// A report with no remaining-time information.
    pub fn new(status: RemoteStatus) -> Self {
        Self {
            status,
            remaining_secs: None,
        }
    }

    /// Attach a server-reported remaining time.
    pub fn with_remaining(mut self, secs: u32) -> Self {
        self.remaining_secs = Some(secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_order_ids() {
        assert!(OrderId::parse("T-1").is_ok());
        assert!(OrderId::parse("TT202401010000000001").is_ok());
        assert!(OrderId::parse("task-1").is_ok());
    }

    #[test]
    fn reject_bad_order_ids() {
        assert!(OrderId::parse("").is_err());
        assert!(OrderId::parse(" ").is_err());
        assert!(OrderId::parse("T\t1").is_err());
        assert!(OrderId::parse("../etc").is_err());
        assert!(OrderId::parse(&"X".repeat(MAX_ORDER_ID_LEN + 1)).is_err());
        assert!(OrderId::parse(&"X".repeat(MAX_ORDER_ID_LEN)).is_ok());
    }

    #[test]
    fn order_id_display_and_debug() {
        let id = OrderId::parse("T-1").unwrap();
        assert_eq!(id.to_string(), "T-1");
        assert_eq!(format!("{:?}", id), "OrderId(T-1)");
    }

    #[test]
    fn backend_status_mapping() {
        assert_eq!(RemoteStatus::from_backend("PENDING"), Some(RemoteStatus::Pending));
        assert_eq!(RemoteStatus::from_backend("pending"), Some(RemoteStatus::Pending));
        assert_eq!(RemoteStatus::from_backend("OK"), Some(RemoteStatus::Succeeded));
        assert_eq!(RemoteStatus::from_backend("COMPLETED"), Some(RemoteStatus::Succeeded));
        assert_eq!(RemoteStatus::from_backend("succeeded"), Some(RemoteStatus::Succeeded));
        assert_eq!(RemoteStatus::from_backend("FAILED"), Some(RemoteStatus::Failed));
        assert_eq!(RemoteStatus::from_backend("rejected"), Some(RemoteStatus::Failed));
        assert_eq!(RemoteStatus::from_backend("REFUNDED"), None);
        assert_eq!(RemoteStatus::from_backend(""), None);
    }

    #[test]
    fn poll_report_builder() {
        let report = PollReport::new(RemoteStatus::Pending).with_remaining(300);
        assert_eq!(report.remaining_secs, Some(300));
        assert_eq!(PollReport::new(RemoteStatus::Failed).remaining_secs, None);
    }
}
