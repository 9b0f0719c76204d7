//! Planning period math.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PlannerError;

/// Granularity of a planning period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// ISO weeks, Monday through Sunday.
    Weekly,
    /// Calendar months.
    Monthly,
}

/// An inclusive date window covering exactly one planning period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodWindow {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// Returns true if the given date falls within this window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl PeriodType {
    /// The period label for the period containing `date`.
    ///
    /// Monthly labels are `YYYY-MM`; weekly labels are `YYYY-Www` using the
    /// ISO week year, which can differ from the calendar year near January 1.
    #[must_use]
    pub fn label(self, date: NaiveDate) -> String {
        match self {
            Self::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Weekly => {
                let iso = date.iso_week();
                format!("{:04}-W{:02}", iso.year(), iso.week())
            }
        }
    }

    /// The inclusive window of the period containing `date`.
    #[must_use]
    pub fn window_containing(self, date: NaiveDate) -> PeriodWindow {
        match self {
            Self::Monthly => {
                let start = date.with_day(1).unwrap_or(date);
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(start);
                PeriodWindow { start, end }
            }
            Self::Weekly => {
                let back = i64::from(date.weekday().num_days_from_monday());
                let start = date - Duration::days(back);
                let end = start + Duration::days(6);
                PeriodWindow { start, end }
            }
        }
    }

    /// The window of the period immediately before the one containing `date`.
    #[must_use]
    pub fn previous_window(self, date: NaiveDate) -> PeriodWindow {
        let current = self.window_containing(date);
        let last_day_before = current.start.pred_opt().unwrap_or(current.start);
        self.window_containing(last_day_before)
    }

    /// Validates a period label against this period type's format.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidPeriodLabel`] if the label does not
    /// parse as `YYYY-MM` (monthly) or `YYYY-Www` (weekly) with an in-range
    /// month or week number.
    pub fn validate_label(self, label: &str) -> Result<(), PlannerError> {
        let invalid = || PlannerError::InvalidPeriodLabel {
            label: label.to_string(),
            period_type: self,
        };

        let (year_part, tail) = label.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || year_part.parse::<i32>().is_err() {
            return Err(invalid());
        }
        match self {
            Self::Monthly => {
                if tail.len() != 2 {
                    return Err(invalid());
                }
                let month: u32 = tail.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
            }
            Self::Weekly => {
                let digits = tail.strip_prefix('W').ok_or_else(invalid)?;
                if digits.len() != 2 {
                    return Err(invalid());
                }
                let week: u32 = digits.parse().map_err(|_| invalid())?;
                if !(1..=53).contains(&week) {
                    return Err(invalid());
                }
            }
        }
        Ok(())
    }
}
