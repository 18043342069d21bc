//! Working-day resolution.
//!
//! This module turns a date range, a holiday calendar, and a weekly schedule
//! into the ordered list of working days. Both endpoints are inclusive; a
//! reversed range (`start > end`) resolves to no days rather than an error.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::HolidayCalendar;

/// Converts a weekday index into a [`Weekday`].
///
/// Indices follow the `0 = Sunday, 1 = Monday, ... 6 = Saturday` convention
/// used by the record store and the client.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for indices above 6.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::weekday_from_index;
/// use chrono::Weekday;
///
/// assert_eq!(weekday_from_index(0).unwrap(), Weekday::Sun);
/// assert_eq!(weekday_from_index(1).unwrap(), Weekday::Mon);
/// assert!(weekday_from_index(7).is_err());
/// ```
pub fn weekday_from_index(index: u32) -> EngineResult<Weekday> {
    WEEKDAYS_FROM_SUNDAY
        .get(index as usize)
        .copied()
        .ok_or_else(|| {
            EngineError::invalid_input(
                "weekly_off_day",
                format!("weekday index {} is not within 0 (Sunday) to 6 (Saturday)", index),
            )
        })
}

const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Returns the first and last date of a calendar month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `month` is not within 1 to 12 or
/// the year is outside chrono's supported range.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::month_bounds;
/// use chrono::NaiveDate;
///
/// let (first, last) = month_bounds(2028, 2).unwrap();
/// assert_eq!(first, NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
/// assert_eq!(last, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
/// ```
pub fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let invalid = || {
        EngineError::invalid_input(
            "month",
            format!("{}-{:02} is not a valid calendar month", year, month),
        )
    };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_first.pred_opt().ok_or_else(invalid)?;

    Ok((first, last))
}

/// Resolves the working days of a range under a single weekly off-day.
///
/// A day is a working day iff its weekday is not `weekly_off_day` and it is
/// not in `holidays`. Days are returned in ascending order.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::resolve_working_days;
/// use attendance_engine::models::HolidayCalendar;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2026-09-01 is a Tuesday; Monday 2026-09-07 is skipped.
/// let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
/// let days = resolve_working_days(start, end, Weekday::Mon, &HolidayCalendar::new());
/// assert_eq!(days.len(), 6);
/// ```
pub fn resolve_working_days(
    start: NaiveDate,
    end: NaiveDate,
    weekly_off_day: Weekday,
    holidays: &HolidayCalendar,
) -> Vec<NaiveDate> {
    resolve_days(start, end, holidays, |weekday| weekday != weekly_off_day)
}

/// Resolves the working days of a range under an explicit set of work weekdays.
///
/// This is the variant payroll uses, driven by
/// [`crate::models::WorkingHoursConfig::work_days`]. An empty `work_days`
/// yields no working days.
pub fn resolve_scheduled_days(
    start: NaiveDate,
    end: NaiveDate,
    work_days: &[Weekday],
    holidays: &HolidayCalendar,
) -> Vec<NaiveDate> {
    resolve_days(start, end, holidays, |weekday| work_days.contains(&weekday))
}

fn resolve_days<F>(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HolidayCalendar,
    is_work_weekday: F,
) -> Vec<NaiveDate>
where
    F: Fn(Weekday) -> bool,
{
    if start > end {
        return Vec::new();
    }

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| is_work_weekday(date.weekday()) && !holidays.contains(*date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_weekday_indices_start_on_sunday() {
        let expected = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        for (index, weekday) in expected.iter().enumerate() {
            assert_eq!(weekday_from_index(index as u32).unwrap(), *weekday);
        }
    }

    #[test]
    fn test_weekday_index_out_of_range() {
        assert!(matches!(
            weekday_from_index(7),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_month_bounds_december_rolls_year() {
        let (first, last) = month_bounds(2026, 12).unwrap();
        assert_eq!(first, make_date("2026-12-01"));
        assert_eq!(last, make_date("2026-12-31"));
    }

    #[test]
    fn test_month_bounds_rejects_month_13() {
        assert!(matches!(
            month_bounds(2026, 13),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(month_bounds(2026, 0).is_err());
    }

    #[test]
    fn test_september_2026_without_mondays_has_26_days() {
        let days = resolve_working_days(
            make_date("2026-09-01"),
            make_date("2026-09-30"),
            Weekday::Mon,
            &HolidayCalendar::new(),
        );
        assert_eq!(days.len(), 26);
        assert!(days.iter().all(|d| d.weekday() != Weekday::Mon));
    }

    #[test]
    fn test_holidays_are_excluded() {
        let holidays: HolidayCalendar = [make_date("2026-09-02"), make_date("2026-09-07")]
            .into_iter()
            .collect();

        let days = resolve_working_days(
            make_date("2026-09-01"),
            make_date("2026-09-08"),
            Weekday::Sun,
            &holidays,
        );

        // 8 days, minus Sunday 09-06, minus the two holidays
        assert_eq!(days.len(), 5);
        assert!(!days.contains(&make_date("2026-09-02")));
        assert!(!days.contains(&make_date("2026-09-07")));
    }

    #[test]
    fn test_endpoints_are_inclusive_and_ordered() {
        let days = resolve_working_days(
            make_date("2026-09-01"),
            make_date("2026-09-03"),
            Weekday::Sun,
            &HolidayCalendar::new(),
        );
        assert_eq!(
            days,
            vec![
                make_date("2026-09-01"),
                make_date("2026-09-02"),
                make_date("2026-09-03")
            ]
        );
    }

    #[test]
    fn test_single_day_range() {
        let tuesday = make_date("2026-09-01");
        let days = resolve_working_days(tuesday, tuesday, Weekday::Mon, &HolidayCalendar::new());
        assert_eq!(days, vec![tuesday]);

        let days = resolve_working_days(tuesday, tuesday, Weekday::Tue, &HolidayCalendar::new());
        assert!(days.is_empty());
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let days = resolve_working_days(
            make_date("2026-09-30"),
            make_date("2026-09-01"),
            Weekday::Mon,
            &HolidayCalendar::new(),
        );
        assert!(days.is_empty());
    }

    #[test]
    fn test_scheduled_days_follow_work_days() {
        let days = resolve_scheduled_days(
            make_date("2026-09-01"),
            make_date("2026-09-30"),
            &[Weekday::Mon, Weekday::Wed],
            &HolidayCalendar::new(),
        );
        // September 2026: Mondays 7,14,21,28; Wednesdays 2,9,16,23,30
        assert_eq!(days.len(), 9);
    }

    #[test]
    fn test_empty_schedule_has_no_days() {
        let days = resolve_scheduled_days(
            make_date("2026-09-01"),
            make_date("2026-09-30"),
            &[],
            &HolidayCalendar::new(),
        );
        assert!(days.is_empty());
    }
}
