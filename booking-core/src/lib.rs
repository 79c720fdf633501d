//! Booking front-end core.
//!
//! Client-side filtering of train search results and the checkout flow
//! that buys a seat on one of them: submit, poll until the payment goes
//! through, and give up cleanly on errors, timeouts or cancellation.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod filter;
pub mod payment;
