//! Facet derivation.
//!
//! A facet is one independent filtering dimension. Its selectable values are
//! derived from the current result set and recomputed whenever it changes.

use std::collections::{BTreeSet, HashSet};

use crate::domain::{ResultSet, TrainOffer};

/// The filtering dimensions of the result panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacetKey {
    /// Train category (high-speed, conventional, ...).
    Category,
    /// Departure time window.
    TimeWindow,
    /// Seat class on sale.
    SeatClass,
    /// Departure station.
    OriginStation,
    /// Arrival station.
    DestinationStation,
}

impl FacetKey {
    /// All facet keys in display order.
    pub const ALL: [FacetKey; 5] = [
        FacetKey::Category,
        FacetKey::TimeWindow,
        FacetKey::SeatClass,
        FacetKey::OriginStation,
        FacetKey::DestinationStation,
    ];

    /// The key's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetKey::Category => "category",
            FacetKey::TimeWindow => "timeWindow",
            FacetKey::SeatClass => "seatClass",
            FacetKey::OriginStation => "originStation",
            FacetKey::DestinationStation => "destinationStation",
        }
    }

    /// Look up a key by wire name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Project an offer onto this facet.
    ///
    /// Returns nothing when the offer lacks the underlying field.
    fn values(self, offer: &TrainOffer) -> Vec<FacetValue> {
        match self {
            FacetKey::Category => offer
                .category
                .iter()
                .map(|c| FacetValue::new(c.code(), c.label()))
                .collect(),
            FacetKey::TimeWindow => offer
                .time_window()
                .map(|w| FacetValue::same(w.label()))
                .into_iter()
                .collect(),
            FacetKey::SeatClass => offer
                .seats
                .iter()
                .map(|s| FacetValue::same(&s.seat_type))
                .collect(),
            FacetKey::OriginStation => offer.origin.iter().map(FacetValue::same).collect(),
            FacetKey::DestinationStation => {
                offer.destination.iter().map(FacetValue::same).collect()
            }
        }
    }

    /// Whether any of the offer's values for this facet is selected.
    pub(crate) fn matches(self, offer: &TrainOffer, selected: &BTreeSet<String>) -> bool {
        match self {
            FacetKey::Category => offer
                .category
                .as_ref()
                .is_some_and(|c| selected.contains(c.code())),
            FacetKey::TimeWindow => offer
                .time_window()
                .is_some_and(|w| selected.contains(w.label())),
            FacetKey::SeatClass => offer.seats.iter().any(|s| selected.contains(&s.seat_type)),
            FacetKey::OriginStation => offer
                .origin
                .as_deref()
                .is_some_and(|o| selected.contains(o)),
            FacetKey::DestinationStation => offer
                .destination
                .as_deref()
                .is_some_and(|d| selected.contains(d)),
        }
    }
}

/// One selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacetValue {
    /// Token stored in the filter state (e.g. `HIGH_SPEED`).
    pub id: String,

    /// Text shown next to the checkbox.
    pub label: String,
}

impl FacetValue {
    /// Create a value with distinct id and label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Create a value whose label is its id.
    fn same(text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        Self::new(text, text)
    }
}

/// The selectable values of one facet, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    /// Which dimension this is.
    pub key: FacetKey,

    /// Distinct values in the order they first appear in the result set.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Whether a value id is selectable.
    pub fn contains(&self, id: &str) -> bool {
        self.values.iter().any(|v| v.id == id)
    }

    /// Value ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.id.as_str())
    }

    /// Whether the facet offers nothing to select.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All facets of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetIndex {
    /// One facet per key, in `FacetKey::ALL` order.
    facets: Vec<Facet>,
}

impl FacetIndex {
    /// The facets of an empty result set.
    pub fn empty() -> Self {
        Self {
            facets: FacetKey::ALL
                .into_iter()
                .map(|key| Facet {
                    key,
                    values: Vec::new(),
                })
                .collect(),
        }
    }

    /// The facet for a key.
    pub fn facet(&self, key: FacetKey) -> &Facet {
        // Index built from FacetKey::ALL, so positions line up
        &self.facets[key as usize]
    }

    /// Whether `id` is a selectable value of `key`.
    pub fn contains(&self, key: FacetKey, id: &str) -> bool {
        self.facet(key).contains(id)
    }

    /// Iterate over facets in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Facet> {
        self.facets.iter()
    }

    /// Whether no facet has any value.
    pub fn is_empty(&self) -> bool {
        self.facets.iter().all(Facet::is_empty)
    }
}

impl Default for FacetIndex {
    fn default() -> Self {
        Self::empty()
    }
}

/// Derive the facets of a result set.
///
/// Each facet lists its distinct values in the order they first appear in a
/// front-to-back scan of the results. Running this twice on the same results
/// yields identical indexes.
pub fn compute_facets(results: &ResultSet) -> FacetIndex {
    let facets = FacetKey::ALL
        .into_iter()
        .map(|key| {
            let mut seen = HashSet::new();
            let mut values = Vec::new();
            for offer in results.iter() {
                for value in key.values(offer) {
                    if seen.insert(value.id.clone()) {
                        values.push(value);
                    }
                }
            }
            Facet { key, values }
        })
        .collect();

    FacetIndex { facets }
}
