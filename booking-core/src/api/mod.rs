//! Booking backend client.
//!
//! This module provides the HTTP binding of the collaborators the filter
//! page and the checkout flow depend on:
//! - train search, ordered by departure time or by duration
//! - purchase submission and order status checks
//! - the complete/fail notifications sent when a purchase ends
//!
//! Wire types are converted to domain types at this boundary.

mod client;
mod convert;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{ApiClient, ApiConfig};
pub use convert::{ConversionError, DEFAULT_PAYMENT_WINDOW_SECS};
pub use error::ApiError;
pub use mock::FileSearchProvider;
pub use provider::SearchProvider;
pub use types::{
    SearchResponseDto, SeatDto, StatusResponseDto, SubmitResponseDto, TrainDto, TrainSeatsDto,
};
