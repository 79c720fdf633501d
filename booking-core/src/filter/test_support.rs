//! Proptest strategies shared by the filter test suites.

use chrono::NaiveTime;
use proptest::prelude::*;

use crate::domain::{ResultSet, SeatOffer, TimeWindow, TrainCategory, TrainOffer};

use super::FacetKey;

const CATEGORIES: &[&str] = &["HIGH_SPEED", "GREEN_TRAIN", "SLEEPER"];
const STATIONS: &[&str] = &["Shanghai", "Hangzhou", "Nanjing", "Suzhou"];
const SEATS: &[&str] = &["SECOND_CLASS_SEAT", "FIRST_CLASS_SEAT", "BUSINESS_CLASS_SEAT"];

fn arb_seat() -> impl Strategy<Value = SeatOffer> {
    (prop::sample::select(SEATS), 0u32..4)
        .prop_map(|(seat, remaining)| SeatOffer::new(seat, 10000, remaining))
}

fn arb_offer() -> impl Strategy<Value = TrainOffer> {
    (
        prop::option::of(prop::sample::select(CATEGORIES)),
        prop::option::of(prop::sample::select(STATIONS)),
        prop::option::of(prop::sample::select(STATIONS)),
        prop::option::of((0u32..24, 0u32..60)),
        prop::collection::vec(arb_seat(), 0..3),
    )
        .prop_map(|(category, origin, destination, departs, seats)| {
            let mut offer = TrainOffer::new("");
            offer.category = category.map(|c| TrainCategory::parse(c).unwrap());
            offer.origin = origin.map(str::to_string);
            offer.destination = destination.map(str::to_string);
            offer.departure = departs.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0));
            offer.seats = seats;
            offer
        })
}

/// Result sets of up to a dozen offers with distinct train numbers.
pub(crate) fn arb_results() -> impl Strategy<Value = ResultSet> {
    prop::collection::vec(arb_offer(), 0..12).prop_map(|offers| {
        offers
            .into_iter()
            .enumerate()
            .map(|(i, mut offer)| {
                offer.train_no = format!("T{i}");
                offer
            })
            .collect()
    })
}

fn arb_toggle() -> impl Strategy<Value = (FacetKey, String)> {
    let ids: Vec<String> = CATEGORIES
        .iter()
        .chain(STATIONS)
        .chain(SEATS)
        .map(|s| s.to_string())
        .chain(TimeWindow::ALL.iter().map(|w| w.label().to_string()))
        .chain(["NOT_A_VALUE".to_string()])
        .collect();

    (
        prop::sample::select(FacetKey::ALL.to_vec()),
        prop::sample::select(ids),
    )
}

/// Sequences of toggles, some of which name values no facet offers.
pub(crate) fn arb_toggles() -> impl Strategy<Value = Vec<(FacetKey, String)>> {
    prop::collection::vec(arb_toggle(), 0..8)
}
