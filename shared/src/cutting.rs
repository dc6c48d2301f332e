//! Cutting-date evaluation
//!
//! Turns a projected cutting date into a day offset and the status line shown
//! to the grower, and decides whether that date is visible in the forecast.

use chrono::NaiveDate;
use serde::Serialize;

/// Where today sits relative to a field's projected cutting date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CuttingStatus {
    /// No cutting date has been projected yet
    NoDate,
    Today,
    Future { days: i64 },
    Past { days: i64 },
}

impl CuttingStatus {
    /// Classify `cutting_date` against `today`.
    ///
    /// Both arguments are calendar dates, so the offset is already a whole
    /// number of days.
    pub fn evaluate(cutting_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(cutting_date) = cutting_date else {
            return CuttingStatus::NoDate;
        };

        match days_between(today, cutting_date) {
            0 => CuttingStatus::Today,
            days if days > 0 => CuttingStatus::Future { days },
            days => CuttingStatus::Past { days: -days },
        }
    }

    /// Signed offset from today, `None` when no date is projected
    pub fn days_to_cutting(&self) -> Option<i64> {
        match self {
            CuttingStatus::NoDate => None,
            CuttingStatus::Today => Some(0),
            CuttingStatus::Future { days } => Some(*days),
            CuttingStatus::Past { days } => Some(-days),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for CuttingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CuttingStatus::NoDate => write!(f, "Relax, take it easy"),
            CuttingStatus::Today => write!(f, "Today is your ideal cutting day"),
            CuttingStatus::Future { days } => {
                write!(f, "Your Optimal Cutting Period is in {} days", days)
            }
            CuttingStatus::Past { .. } => write!(f, "The cutting period has passed"),
        }
    }
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// True iff `dates` is non-empty and `dates[0] <= target <= dates[last]`.
///
/// `dates` must be in chronological order; only the endpoints are consulted.
pub fn is_within_forecast_window(target: NaiveDate, dates: &[NaiveDate]) -> bool {
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => *first <= target && target <= *last,
        _ => false,
    }
}
