//! Conversion from wire types to domain types.
//!
//! Search results are converted leniently: a field that fails validation is
//! treated as absent, a seat with an unusable price is dropped, and an offer
//! that can't be identified at all is skipped. Order responses are converted strictly, since the checkout flow
//! can't continue without a valid order id.

use chrono::NaiveTime;
use tracing::{debug, warn};

use crate::domain::{
    OrderId, PollReport, RemoteStatus, ResultSet, SeatOffer, Submission, TrainCategory, TrainOffer,
};

use super::error::ApiError;
use super::types::{
    SearchResponseDto, SeatDto, StatusResponseDto, SubmitResponseDto, TrainSeatsDto,
};

/// Payment window assumed when the backend doesn't report one.
pub const DEFAULT_PAYMENT_WINDOW_SECS: u32 = 300;

/// Error converting one search result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// The train has no train number
    #[error("train has no train number")]
    MissingTrainNo,

    /// A seat price is negative or not a number
    #[error("invalid price {price} for seat type {seat_type}")]
    InvalidPrice { seat_type: String, price: f64 },
}

/// Convert a search response, skipping offers that can't be converted.
pub fn convert_results(response: SearchResponseDto) -> ResultSet {
    response
        .data
        .into_iter()
        .filter_map(|dto| match convert_offer(dto) {
            Ok(offer) => Some(offer),
            Err(e) => {
                warn!(error = %e, "skipping search result");
                None
            }
        })
        .collect()
}

/// Convert one train and its seats.
pub fn convert_offer(dto: TrainSeatsDto) -> Result<TrainOffer, ConversionError> {
    let train = dto.train;
    let train_no = train
        .train_no
        .filter(|n| !n.trim().is_empty())
        .ok_or(ConversionError::MissingTrainNo)?;

    let category = train
        .train_type
        .as_deref()
        .and_then(|code| match TrainCategory::parse(code) {
            Ok(c) => Some(c),
            Err(e) => {
                debug!(train = %train_no, code, error = %e, "ignoring train type");
                None
            }
        });

    let departure = dto.departure_time.as_deref().and_then(|s| {
        let parsed = parse_departure(s);
        if parsed.is_none() {
            debug!(train = %train_no, time = s, "ignoring departure time");
        }
        parsed
    });

    let seats = dto
        .train_seats
        .into_iter()
        .filter_map(|seat| match convert_seat(seat) {
            Ok(seat) => Some(seat),
            Err(e) => {
                warn!(train = %train_no, error = %e, "skipping seat");
                None
            }
        })
        .collect();

    Ok(TrainOffer {
        train_id: train.id,
        train_no,
        category,
        origin: non_empty(train.from_station),
        destination: non_empty(train.to_station),
        departure,
        seats,
    })
}

fn convert_seat(dto: SeatDto) -> Result<SeatOffer, ConversionError> {
    let price_cents = price_to_cents(dto.price).ok_or_else(|| ConversionError::InvalidPrice {
        seat_type: dto.seat_type.clone(),
        price: dto.price,
    })?;
    Ok(SeatOffer::new(dto.seat_type, price_cents, dto.remain))
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Parse a departure time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_departure(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Convert a decimal price to minor units.
///
/// Returns `None` for negative, non-finite or absurdly large prices.
pub fn price_to_cents(price: f64) -> Option<u64> {
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    let cents = (price * 100.0).round();
    if cents > u64::MAX as f64 {
        return None;
    }
    Some(cents as u64)
}

/// Convert minor units back to the decimal price the backend expects.
pub fn cents_to_price(cents: u64) -> f64 {
    cents as f64 / 100.0
}

/// Convert a submission response.
pub fn convert_submission(dto: SubmitResponseDto) -> Result<Submission, ApiError> {
    let raw = dto
        .order_id
        .ok_or_else(|| ApiError::InvalidResponse("submission returned no order id".into()))?;
    let order_id = OrderId::parse(&raw).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    Ok(Submission {
        order_id,
        remaining_secs: dto
            .remaining_time_seconds
            .unwrap_or(DEFAULT_PAYMENT_WINDOW_SECS),
    })
}

/// Convert a status response.
pub fn convert_status(dto: StatusResponseDto) -> Result<PollReport, ApiError> {
    let status = RemoteStatus::from_backend(&dto.current_status)
        .ok_or(ApiError::UnknownStatus(dto.current_status))?;

    Ok(PollReport {
        status,
        remaining_secs: dto.remaining_time_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TrainDto;

    fn train(no: Option<&str>, kind: Option<&str>) -> TrainDto {
        TrainDto {
            id: Some(7),
            train_no: no.map(str::to_string),
            train_type: kind.map(str::to_string),
            from_station: Some("Shanghai".into()),
            to_station: Some("".into()),
        }
    }

    fn seat(kind: &str, price: f64, remain: u32) -> SeatDto {
        SeatDto {
            seat_type: kind.into(),
            price,
            remain,
        }
    }

    #[test]
    fn convert_full_offer() {
        let dto = TrainSeatsDto {
            train: train(Some("G1"), Some("HIGH_SPEED")),
            train_seats: vec![seat("SECOND_CLASS_SEAT", 100.0, 20)],
            departure_time: Some("08:00".into()),
        };

        let offer = convert_offer(dto).unwrap();
        assert_eq!(offer.train_id, Some(7));
        assert_eq!(offer.train_no, "G1");
        assert_eq!(offer.category, Some(TrainCategory::HighSpeed));
        assert_eq!(offer.origin.as_deref(), Some("Shanghai"));
        assert_eq!(offer.destination, None);
        assert_eq!(offer.departure, NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(offer.seats[0].price_cents, 10000);
        assert_eq!(offer.available_quantity(), 20);
    }

    #[test]
    fn bad_optional_fields_become_absent() {
        let dto = TrainSeatsDto {
            train: train(Some("K2"), Some("green train")),
            train_seats: vec![],
            departure_time: Some("8 o'clock".into()),
        };

        let offer = convert_offer(dto).unwrap();
        assert_eq!(offer.category, None);
        assert_eq!(offer.departure, None);
    }

    #[test]
    fn missing_train_no_is_an_error() {
        let dto = TrainSeatsDto {
            train: train(None, None),
            train_seats: vec![],
            departure_time: None,
        };
        assert_eq!(convert_offer(dto).unwrap_err(), ConversionError::MissingTrainNo);
    }

    #[test]
    fn convert_results_skips_unidentified_offers() {
        let response = SearchResponseDto {
            data: vec![
                TrainSeatsDto {
                    train: train(Some("G1"), None),
                    train_seats: vec![],
                    departure_time: None,
                },
                TrainSeatsDto {
                    train: train(None, Some("HIGH_SPEED")),
                    train_seats: vec![seat("SECOND_CLASS_SEAT", 100.0, 1)],
                    departure_time: None,
                },
                TrainSeatsDto {
                    train: train(Some("G3"), None),
                    train_seats: vec![],
                    departure_time: None,
                },
            ],
        };

        let results = convert_results(response);
        let numbers: Vec<&str> = results.iter().map(|o| o.train_no.as_str()).collect();
        assert_eq!(numbers, vec!["G1", "G3"]);
    }

    #[test]
    fn bad_seat_price_drops_only_that_seat() {
        let dto = TrainSeatsDto {
            train: train(Some("G2"), None),
            train_seats: vec![
                seat("BUSINESS_SEAT", -1.0, 3),
                seat("SECOND_CLASS_SEAT", 100.0, 5),
                seat("FIRST_CLASS_SEAT", f64::NAN, 2),
            ],
            departure_time: None,
        };

        let offer = convert_offer(dto).unwrap();
        assert_eq!(offer.train_no, "G2");
        assert_eq!(offer.seats.len(), 1);
        assert_eq!(offer.seats[0].seat_type, "SECOND_CLASS_SEAT");
        assert_eq!(offer.available_quantity(), 5);
    }

    #[test]
    fn departure_formats() {
        assert_eq!(parse_departure("08:00"), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(parse_departure("20:15:30"), NaiveTime::from_hms_opt(20, 15, 30));
        assert_eq!(parse_departure("25:00"), None);
        assert_eq!(parse_departure(""), None);
    }

    #[test]
    fn price_conversion() {
        assert_eq!(price_to_cents(100.0), Some(10000));
        assert_eq!(price_to_cents(120.5), Some(12050));
        assert_eq!(price_to_cents(0.0), Some(0));
        assert_eq!(price_to_cents(-0.01), None);
        assert_eq!(price_to_cents(f64::NAN), None);
        assert_eq!(price_to_cents(f64::INFINITY), None);
        assert_eq!(cents_to_price(12050), 120.5);
    }

    #[test]
    fn submission_conversion() {
        let sub = convert_submission(SubmitResponseDto {
            order_id: Some("T-1".into()),
            remaining_time_seconds: Some(300),
        })
        .unwrap();
        assert_eq!(sub.order_id.as_str(), "T-1");
        assert_eq!(sub.remaining_secs, 300);

        let sub = convert_submission(SubmitResponseDto {
            order_id: Some("T-2".into()),
            remaining_time_seconds: None,
        })
        .unwrap();
        assert_eq!(sub.remaining_secs, DEFAULT_PAYMENT_WINDOW_SECS);

        let err = convert_submission(SubmitResponseDto {
            order_id: None,
            remaining_time_seconds: Some(300),
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));

        let err = convert_submission(SubmitResponseDto {
            order_id: Some("T 3".into()),
            remaining_time_seconds: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn status_conversion() {
        let report = convert_status(StatusResponseDto {
            current_status: "PENDING".into(),
            remaining_time_seconds: Some(120),
        })
        .unwrap();
        assert_eq!(report, PollReport::new(RemoteStatus::Pending).with_remaining(120));

        let err = convert_status(StatusResponseDto {
            current_status: "REFUNDED".into(),
            remaining_time_seconds: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::UnknownStatus(s) if s == "REFUNDED"));
    }
}
