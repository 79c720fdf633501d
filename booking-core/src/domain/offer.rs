//! Search results: bookable trains and their seat offers.

use std::sync::Arc;

use chrono::NaiveTime;

use super::{TimeWindow, TrainCategory};

/// One class of seat on a train, with its price and remaining stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatOffer {
    /// Backend seat type code (e.g. `SECOND_CLASS_SEAT`).
    pub seat_type: String,

    /// Price in minor currency units.
    pub price_cents: u64,

    /// Seats left. Zero means this class is sold out.
    pub remaining: u32,
}

impl SeatOffer {
    /// Create a new seat offer.
    pub fn new(seat_type: impl Into<String>, price_cents: u64, remaining: u32) -> Self {
        Self {
            seat_type: seat_type.into(),
            price_cents,
            remaining,
        }
    }
}

/// A train returned by a search, with everything the filter panel needs.
///
/// Fields the backend didn't send stay `None`. The facet index never invents
/// a value for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainOffer {
    /// Backend train id, needed to submit a purchase.
    pub train_id: Option<u64>,

    /// Public train number (e.g. `G1`).
    pub train_no: String,

    /// Transport category.
    pub category: Option<TrainCategory>,

    /// Departure station name.
    pub origin: Option<String>,

    /// Arrival station name.
    pub destination: Option<String>,

    /// Departure time of day.
    pub departure: Option<NaiveTime>,

    /// Seat classes on sale, in backend order.
    pub seats: Vec<SeatOffer>,
}

impl TrainOffer {
    /// Create an offer with only a train number set.
    pub fn new(train_no: impl Into<String>) -> Self {
        Self {
            train_id: None,
            train_no: train_no.into(),
            category: None,
            origin: None,
            destination: None,
            departure: None,
            seats: Vec::new(),
        }
    }

    /// Total seats left across all classes.
    pub fn available_quantity(&self) -> u32 {
        self.seats
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.remaining))
    }

    /// Whether at least one seat of any class is left.
    pub fn is_available(&self) -> bool {
        self.available_quantity() > 0
    }

    /// The departure time window, if the departure time is known.
    pub fn time_window(&self) -> Option<TimeWindow> {
        self.departure.map(TimeWindow::containing)
    }

    /// Find the seat offer for a seat type.
    pub fn seat(&self, seat_type: &str) -> Option<&SeatOffer> {
        self.seats.iter().find(|s| s.seat_type == seat_type)
    }
}

/// An immutable snapshot of search results.
///
/// Cloning is cheap: offers are shared, never copied.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    offers: Arc<Vec<Arc<TrainOffer>>>,
}

impl ResultSet {
    /// Create a result set from offers, keeping their order.
    pub fn new(offers: Vec<TrainOffer>) -> Self {
        Self {
            offers: Arc::new(offers.into_iter().map(Arc::new).collect()),
        }
    }

    /// An empty result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The offers in backend order.
    pub fn offers(&self) -> &[Arc<TrainOffer>] {
        &self.offers
    }

    /// Iterate over the offers in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TrainOffer>> {
        self.offers.iter()
    }

    /// Number of offers.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Whether the search returned nothing.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl FromIterator<TrainOffer> for ResultSet {
    fn from_iter<I: IntoIterator<Item = TrainOffer>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
