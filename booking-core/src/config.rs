//! Application configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::api::ApiConfig;
use crate::cache::CacheConfig;
use crate::domain::{SearchCriteria, SearchOrder};
use crate::payment::SessionConfig;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set to something unusable
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A variable only makes sense together with another one
    #[error("{set} is set but {missing} is not")]
    Incomplete {
        set: &'static str,
        missing: &'static str,
    },
}

/// What to buy when running a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutTarget {
    /// Train number, as shown in the results.
    pub train_no: String,

    /// Seat type code. The first seat type with availability if unset.
    pub seat_type: Option<String>,
}

/// Everything the binary needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,

    /// Serve results from this file instead of the backend.
    pub results_file: Option<PathBuf>,

    pub session: SessionConfig,

    pub cache: CacheConfig,

    /// The search to run, if one was given.
    pub search: Option<SearchCriteria>,

    /// Offer to check out after searching.
    pub checkout: Option<CheckoutTarget>,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// The travel date defaults to today.
    pub fn from_env() -> Result<Self, ConfigError> {
        let today = chrono::Local::now().date_naive();
        Self::from_lookup(|var| std::env::var(var).ok(), today)
    }

    /// Read configuration through `lookup`.
    ///
    /// Unset and empty variables are treated alike.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut api = match get("BOOKING_API_URL") {
            Some(url) => ApiConfig::new(url),
            None => ApiConfig::default(),
        };
        if let Some(value) = get("BOOKING_API_TIMEOUT_SECS") {
            let secs = parse_positive("BOOKING_API_TIMEOUT_SECS", &value)?;
            api = api.with_timeout(u64::from(secs));
        }

        let mut session = SessionConfig::default();
        if let Some(value) = get("BOOKING_POLL_INTERVAL_SECS") {
            let secs = parse_positive("BOOKING_POLL_INTERVAL_SECS", &value)?;
            session = session.with_poll_interval(Duration::from_secs(u64::from(secs)));
        }
        if let Some(value) = get("BOOKING_MAX_POLL_ERRORS") {
            let max = parse_positive("BOOKING_MAX_POLL_ERRORS", &value)?;
            session = session.with_max_consecutive_errors(max);
        }
        if let Some(value) = get("BOOKING_POLL_TIMEOUT_SECS") {
            let secs = parse_positive("BOOKING_POLL_TIMEOUT_SECS", &value)?;
            session = session.with_request_timeout(Duration::from_secs(u64::from(secs)));
        }

        let search = match (get("BOOKING_FROM"), get("BOOKING_TO")) {
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Incomplete {
                    set: "BOOKING_FROM",
                    missing: "BOOKING_TO",
                });
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete {
                    set: "BOOKING_TO",
                    missing: "BOOKING_FROM",
                });
            }
            (Some(from), Some(to)) => {
                let date = match get("BOOKING_DATE") {
                    Some(value) => parse_date(&value)?,
                    None => today,
                };
                let order = match get("BOOKING_ORDER") {
                    Some(value) => parse_order(&value)?,
                    None => SearchOrder::default(),
                };
                Some(SearchCriteria::new(from, to, date).with_order(order))
            }
        };

        let checkout = get("BOOKING_CHECKOUT_TRAIN").map(|train_no| CheckoutTarget {
            train_no,
            seat_type: get("BOOKING_CHECKOUT_SEAT"),
        });
        if checkout.is_some() && search.is_none() {
            return Err(ConfigError::Incomplete {
                set: "BOOKING_CHECKOUT_TRAIN",
                missing: "BOOKING_FROM",
            });
        }

        Ok(Self {
            api,
            results_file: get("BOOKING_RESULTS_FILE").map(PathBuf::from),
            session,
            cache: CacheConfig::default(),
            search,
            checkout,
        })
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "must be at least 1",
        }),
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "not a whole number",
        }),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ConfigError::Invalid {
        var: "BOOKING_DATE",
        value: value.to_string(),
        reason: "expected YYYY-MM-DD",
    })
}

fn parse_order(value: &str) -> Result<SearchOrder, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "departure" | "departure-time" => Ok(SearchOrder::DepartureTime),
        "duration" => Ok(SearchOrder::Duration),
        _ => Err(ConfigError::Invalid {
            var: "BOOKING_ORDER",
            value: value.to_string(),
            reason: "expected 'departure' or 'duration'",
        }),
    }
}
