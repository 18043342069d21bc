//! Holiday and holiday calendar models.
//!
//! This module contains the [`Holiday`] record as supplied by the holiday
//! store and the [`HolidayCalendar`] it resolves into.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named holiday.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
///     name: "Christmas Day".to_string(),
///     is_active: true,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
    /// Inactive holidays are ignored.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// The set of dates treated as holidays.
///
/// A date is a holiday iff an active [`Holiday`] exists for it.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Holiday, HolidayCalendar};
/// use chrono::NaiveDate;
///
/// let christmas = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
/// let calendar = HolidayCalendar::from_holidays(&[
///     Holiday { date: christmas, name: "Christmas Day".to_string(), is_active: true },
/// ]);
/// assert!(calendar.contains(christmas));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a calendar from holiday records, skipping inactive ones.
    pub fn from_holidays(holidays: &[Holiday]) -> Self {
        Self {
            dates: holidays
                .iter()
                .filter(|h| h.is_active)
                .map(|h| h.date)
                .collect(),
        }
    }

    /// Returns true if `date` is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns the holidays falling within `start..=end`.
    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> Self {
        if start > end {
            return Self::new();
        }
        Self {
            dates: self.dates.range(start..=end).copied().collect(),
        }
    }

    /// Returns the number of holiday dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if there are no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn holiday(date_str: &str, is_active: bool) -> Holiday {
        Holiday {
            date: make_date(date_str),
            name: format!("Holiday {}", date_str),
            is_active,
        }
    }

    #[test]
    fn test_inactive_holidays_are_ignored() {
        let calendar = HolidayCalendar::from_holidays(&[
            holiday("2026-09-07", true),
            holiday("2026-09-08", false),
        ]);

        assert!(calendar.contains(make_date("2026-09-07")));
        assert!(!calendar.contains(make_date("2026-09-08")));
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn test_duplicate_holiday_dates_collapse() {
        let calendar = HolidayCalendar::from_holidays(&[
            holiday("2026-09-07", true),
            holiday("2026-09-07", true),
        ]);
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn test_within_restricts_to_range() {
        let calendar: HolidayCalendar = ["2026-08-31", "2026-09-07", "2026-10-01"]
            .iter()
            .map(|d| make_date(d))
            .collect();

        let september = calendar.within(make_date("2026-09-01"), make_date("2026-09-30"));
        assert_eq!(september.len(), 1);
        assert!(september.contains(make_date("2026-09-07")));
        assert!(!september.contains(make_date("2026-10-01")));
    }

    #[test]
    fn test_within_reversed_range_is_empty() {
        let calendar: HolidayCalendar = std::iter::once(make_date("2026-09-07")).collect();
        assert!(calendar
            .within(make_date("2026-09-30"), make_date("2026-09-01"))
            .is_empty());
    }

    #[test]
    fn test_holiday_defaults_to_active() {
        let json = r#"{ "date": "2026-12-25", "name": "Christmas Day" }"#;
        let holiday: Holiday = serde_json::from_str(json).unwrap();
        assert!(holiday.is_active);
    }
}
