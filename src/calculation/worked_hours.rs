//! Worked-hours derivation for the check-out action.
//!
//! When a user checks out, the record store fills in `hours_worked` and
//! `overtime_hours` from the two timestamps and the active schedule.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::WorkingHoursConfig;

/// Hours derived from a check-in/check-out pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedHours {
    /// Elapsed time minus the scheduled break, in decimal hours.
    pub hours_worked: Decimal,
    /// Hours beyond the standard daily shift.
    pub overtime_hours: Decimal,
}

/// Derives worked and overtime hours from a check-in/check-out pair.
///
/// The scheduled break is subtracted from the elapsed time; a stay shorter
/// than the break yields zero hours. Overtime is whatever exceeds
/// [`WorkingHoursConfig::standard_daily_hours`].
///
/// # Errors
///
/// - [`EngineError::MalformedRecord`] if `check_out` precedes `check_in`
/// - [`EngineError::InvalidInput`] if the schedule has no working time
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::derive_worked_hours;
/// use attendance_engine::models::WorkingHoursConfig;
/// use chrono::{NaiveDateTime, NaiveTime, Weekday};
/// use rust_decimal::Decimal;
///
/// let config = WorkingHoursConfig {
///     user_id: None,
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     break_duration_minutes: 30,
///     work_days: vec![Weekday::Mon],
///     is_active: true,
/// };
/// let check_in = NaiveDateTime::parse_from_str("2026-09-07 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let check_out = NaiveDateTime::parse_from_str("2026-09-07 19:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let worked = derive_worked_hours(check_in, check_out, &config).unwrap();
/// assert_eq!(worked.hours_worked, Decimal::new(95, 1)); // 10h - 0.5h break
/// assert_eq!(worked.overtime_hours, Decimal::new(20, 1)); // beyond 7.5h
/// ```
pub fn derive_worked_hours(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    config: &WorkingHoursConfig,
) -> EngineResult<WorkedHours> {
    if check_out < check_in {
        return Err(EngineError::MalformedRecord {
            date: check_in.date(),
            message: format!("check-out {} precedes check-in {}", check_out, check_in),
        });
    }

    let standard_hours = config.standard_daily_hours()?;

    let elapsed_minutes = (check_out - check_in).num_minutes();
    let worked_minutes =
        (elapsed_minutes - i64::from(config.break_duration_minutes)).max(0);
    let hours_worked = Decimal::new(worked_minutes, 0) / Decimal::new(60, 0);

    let overtime_hours = if hours_worked > standard_hours {
        hours_worked - standard_hours
    } else {
        Decimal::ZERO
    };

    Ok(WorkedHours {
        hours_worked,
        overtime_hours,
    })
}
