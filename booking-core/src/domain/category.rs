//! Train category codes and their display labels.

use std::fmt;

/// Error returned when parsing an invalid category code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid category code: {reason}")]
pub struct InvalidCategory {
    reason: &'static str,
}

/// Known category codes and the labels shown next to their checkboxes.
///
/// Labels contain characters that can never appear in a code, so an unknown
/// code labelled with itself can't collide with one of these.
const KNOWN: &[(&str, &str)] = &[
    ("HIGH_SPEED", "High-speed / EMU"),
    ("GREEN_TRAIN", "Conventional / Intercity"),
];

/// The transport category of a train, as reported by the search backend.
///
/// Codes are uppercase ASCII letters, digits and underscores
/// (e.g. `HIGH_SPEED`). Codes the client doesn't know about are kept
/// verbatim rather than rejected, so a new backend category still shows up
/// as a filter option.
///
/// # Examples
///
/// ```
/// use booking_core::domain::TrainCategory;
///
/// let hs = TrainCategory::parse("HIGH_SPEED").unwrap();
/// assert_eq!(hs, TrainCategory::HighSpeed);
/// assert_eq!(hs.label(), "High-speed / EMU");
///
/// let sleeper = TrainCategory::parse("SLEEPER").unwrap();
/// assert_eq!(sleeper.code(), "SLEEPER");
/// assert_eq!(sleeper.label(), "SLEEPER");
///
/// assert!(TrainCategory::parse("high_speed").is_err());
/// assert!(TrainCategory::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum TrainCategory {
    /// High-speed and EMU services.
    HighSpeed,
    /// Conventional locomotive-hauled and intercity services.
    GreenTrain,
    /// Any other backend code.
    Other(String),
}

impl TrainCategory {
    /// Parse a category from its backend code.
    pub fn parse(s: &str) -> Result<Self, InvalidCategory> {
        if s.is_empty() {
            return Err(InvalidCategory {
                reason: "code cannot be empty",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
        {
            return Err(InvalidCategory {
                reason: "must be uppercase ASCII letters, digits or underscores",
            });
        }

        Ok(match s {
            "HIGH_SPEED" => TrainCategory::HighSpeed,
            "GREEN_TRAIN" => TrainCategory::GreenTrain,
            other => TrainCategory::Other(other.to_string()),
        })
    }

    /// Returns the backend code.
    pub fn code(&self) -> &str {
        match self {
            TrainCategory::HighSpeed => "HIGH_SPEED",
            TrainCategory::GreenTrain => "GREEN_TRAIN",
            TrainCategory::Other(code) => code,
        }
    }

    /// Returns the human-readable label for filter panels.
    pub fn label(&self) -> &str {
        let code = self.code();
        KNOWN
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, label)| *label)
            .unwrap_or(code)
    }
}

impl fmt::Debug for TrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainCategory({})", self.code())
    }
}

impl fmt::Display for TrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
