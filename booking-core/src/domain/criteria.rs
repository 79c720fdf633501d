//! Search criteria.

use chrono::NaiveDate;

/// How the backend should order search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchOrder {
    /// Earliest departure first.
    #[default]
    DepartureTime,
    /// Shortest journey first.
    Duration,
}

/// A train search: where from, where to, and on which day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchCriteria {
    /// Departure city or station.
    pub from: String,

    /// Arrival city or station.
    pub to: String,

    /// Travel date.
    pub date: NaiveDate,

    /// Result ordering.
    pub order: SearchOrder,
}

impl SearchCriteria {
    /// Create criteria ordered by departure time.
    pub fn new(from: impl Into<String>, to: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            date,
            order: SearchOrder::default(),
        }
    }

    /// Set the result ordering.
    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }
}
