//! Domain types for the booking client.
//!
//! This module contains the validated value types shared by the filter
//! panel and the checkout flow. Types that wrap backend codes enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod category;
mod criteria;
mod offer;
mod order;
mod time_window;

pub use category::{InvalidCategory, TrainCategory};
pub use criteria::{SearchCriteria, SearchOrder};
pub use offer::{ResultSet, SeatOffer, TrainOffer};
pub use order::{InvalidOrderId, OrderId, OrderPayload, PollReport, RemoteStatus, Submission};
pub use time_window::TimeWindow;
