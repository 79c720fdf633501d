//! Checkout: one purchase from submission to outcome.
//!
//! A [`PaymentSession`] submits an order, then checks its status on a fixed
//! interval while counting the payment window down. It ends Succeeded,
//! Failed, Cancelled or TimedOut, and tells the backend which.

mod backend;
mod config;
mod scheduler;
mod session;
mod state;
mod status;

pub use backend::PaymentBackend;
pub use config::SessionConfig;
pub use session::{PaymentSession, SessionHandle};
pub use state::SessionSnapshot;
pub use status::{FailureReason, SessionStatus};
