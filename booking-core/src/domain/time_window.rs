//! Departure time windows.
//!
//! The day is split into four fixed windows. Boundaries are inclusive at the
//! start and exclusive at the end, so every time of day falls into exactly
//! one window.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// A six-hour slice of the day used to bucket departure times.
///
/// # Examples
///
/// ```
/// use booking_core::domain::TimeWindow;
/// use chrono::NaiveTime;
///
/// let t = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
/// assert_eq!(TimeWindow::containing(t), TimeWindow::Morning);
/// assert_eq!(TimeWindow::Morning.label(), "06:00 - 12:00");
///
/// let t = NaiveTime::from_hms_opt(5, 59, 59).unwrap();
/// assert_eq!(TimeWindow::containing(t), TimeWindow::Night);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeWindow {
    /// 00:00 to 06:00
    Night,
    /// 06:00 to 12:00
    Morning,
    /// 12:00 to 18:00
    Afternoon,
    /// 18:00 to 24:00
    Evening,
}

impl TimeWindow {
    /// All windows in chronological order.
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Night,
        TimeWindow::Morning,
        TimeWindow::Afternoon,
        TimeWindow::Evening,
    ];

    /// Returns the window a time of day falls into.
    pub fn containing(time: NaiveTime) -> Self {
        match time.hour() {
            0..6 => TimeWindow::Night,
            6..12 => TimeWindow::Morning,
            12..18 => TimeWindow::Afternoon,
            _ => TimeWindow::Evening,
        }
    }

    /// Returns the display label, which doubles as the selection id.
    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Night => "00:00 - 06:00",
            TimeWindow::Morning => "06:00 - 12:00",
            TimeWindow::Afternoon => "12:00 - 18:00",
            TimeWindow::Evening => "18:00 - 24:00",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
