//! Narrowing filter over a result set.

use std::sync::Arc;

use crate::domain::{ResultSet, TrainOffer};

use super::state::FilterState;

/// Whether one offer passes the filter.
///
/// An offer must match every facet that has a selection (AND across facets,
/// OR within one), and must have seats left when only available offers are
/// shown.
pub fn is_visible(offer: &TrainOffer, state: &FilterState) -> bool {
    if state.only_available() && !offer.is_available() {
        return false;
    }

    state
        .active()
        .all(|(key, selected)| key.matches(offer, selected))
}

/// The offers that pass the filter, in result-set order.
///
/// Filtering never reorders. With nothing selected the whole result set is
/// returned.
pub fn visible(results: &ResultSet, state: &FilterState) -> Vec<Arc<TrainOffer>> {
    results
        .iter()
        .filter(|offer| is_visible(offer, state))
        .cloned()
        .collect()
}
