//! Wire types for the booking backend.
//!
//! These mirror the JSON the backend sends and accepts. They are converted
//! to domain types in `convert`, which is where validation happens.

use serde::{Deserialize, Serialize};

/// Body of a train search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequestDto {
    pub from: String,
    pub to: String,
    /// Travel date as `YYYY-MM-DD`.
    pub date: String,
}

/// Envelope around search results.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponseDto {
    #[serde(default)]
    pub data: Vec<TrainSeatsDto>,
}

/// One train with its seat classes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSeatsDto {
    pub train: TrainDto,

    /// The backend has shipped both spellings.
    #[serde(default, rename = "trainseats", alias = "trainSeats")]
    pub train_seats: Vec<SeatDto>,

    /// `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub departure_time: Option<String>,
}

/// Train details.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainDto {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default, alias = "trainNumber")]
    pub train_no: Option<String>,

    #[serde(default)]
    pub train_type: Option<String>,

    #[serde(default)]
    pub from_station: Option<String>,

    #[serde(default)]
    pub to_station: Option<String>,
}

/// One seat class on a train.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatDto {
    pub seat_type: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub remain: u32,
}

/// Body of a purchase submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequestDto {
    pub train_id: u64,
    pub seat_type: String,
    pub price: f64,
}

/// Response to a purchase submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseDto {
    #[serde(default, alias = "orderNumber", alias = "paymentId")]
    pub order_id: Option<String>,

    #[serde(default)]
    pub remaining_time_seconds: Option<u32>,
}

/// Response to an order status check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponseDto {
    #[serde(alias = "status")]
    pub current_status: String,

    #[serde(default)]
    pub remaining_time_seconds: Option<u32>,
}

/// Body of the complete/fail notifications.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNumberDto {
    pub order_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_response() {
        let json = r#"{
            "data": [
                {
                    "train": { "id": 1, "trainNo": "G1", "trainType": "HIGH_SPEED",
                               "fromStation": "Shanghai", "toStation": "Hangzhou" },
                    "trainseats": [{ "seatType": "SECOND_CLASS_SEAT", "price": 100, "remain": 20 }],
                    "departureTime": "08:00"
                },
                {
                    "train": { "trainNumber": "K2", "trainType": "GREEN_TRAIN" },
                    "trainSeats": [{ "seatType": "SECOND_CLASS_SEAT", "price": 120.5, "remain": 0 }]
                }
            ]
        }"#;

        let response: SearchResponseDto = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 2);

        let g1 = &response.data[0];
        assert_eq!(g1.train.id, Some(1));
        assert_eq!(g1.train.train_no.as_deref(), Some("G1"));
        assert_eq!(g1.train_seats[0].remain, 20);
        assert_eq!(g1.departure_time.as_deref(), Some("08:00"));

        let k2 = &response.data[1];
        assert_eq!(k2.train.train_no.as_deref(), Some("K2"));
        assert_eq!(k2.train.from_station, None);
        assert_eq!(k2.train_seats[0].price, 120.5);
        assert_eq!(k2.departure_time, None);
    }

    #[test]
    fn empty_envelope() {
        let response: SearchResponseDto = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn parse_submit_response_aliases() {
        let r: SubmitResponseDto =
            serde_json::from_str(r#"{"orderId":"T-1","remainingTimeSeconds":300}"#).unwrap();
        assert_eq!(r.order_id.as_deref(), Some("T-1"));
        assert_eq!(r.remaining_time_seconds, Some(300));

        let r: SubmitResponseDto = serde_json::from_str(r#"{"paymentId":"P-1"}"#).unwrap();
        assert_eq!(r.order_id.as_deref(), Some("P-1"));
        assert_eq!(r.remaining_time_seconds, None);
    }

    #[test]
    fn parse_status_response() {
        let r: StatusResponseDto =
            serde_json::from_str(r#"{"currentStatus":"PENDING","remainingTimeSeconds":300}"#)
                .unwrap();
        assert_eq!(r.current_status, "PENDING");
        assert_eq!(r.remaining_time_seconds, Some(300));

        let r: StatusResponseDto = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert_eq!(r.current_status, "OK");
        assert_eq!(r.remaining_time_seconds, None);
    }

    #[test]
    fn serialize_requests() {
        let body = SubmitRequestDto {
            train_id: 9,
            seat_type: "SECOND_CLASS_SEAT".into(),
            price: 123.0,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["trainId"], 9);
        assert_eq!(json["seatType"], "SECOND_CLASS_SEAT");

        let body = OrderNumberDto {
            order_number: "NO123".into(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"orderNumber":"NO123"}"#
        );
    }
}
