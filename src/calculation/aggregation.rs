//! Attendance aggregation.
//!
//! This module folds a user's attendance records over the working days of a
//! date range into [`AttendanceStats`].
//!
//! A working day without a `present` record is counted as absent, whether it
//! was explicitly marked absent or simply has no record yet. Callers should
//! only aggregate past, complete ranges; the `unrecorded_days` figure tells
//! the two cases apart.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceStats, HolidayCalendar, WorkingHoursConfig};

use super::calendar::resolve_working_days;
use super::rates::{day_percentage, round_output, safe_ratio};

/// Records indexed by date, after duplicate resolution.
#[derive(Debug)]
pub(crate) struct RecordIndex<'a> {
    pub by_date: BTreeMap<NaiveDate, &'a AttendanceRecord>,
    /// Dates that had more than one record; the last one supplied was kept.
    pub superseded: Vec<NaiveDate>,
}

/// Validates every record and indexes them by date.
///
/// If a date has several records, the last one in input order wins.
pub(crate) fn index_records(records: &[AttendanceRecord]) -> EngineResult<RecordIndex<'_>> {
    let mut by_date = BTreeMap::new();
    let mut superseded = Vec::new();

    for record in records {
        record.validate()?;
        if by_date.insert(record.date, record).is_some() {
            warn!(
                user_id = %record.user_id,
                date = %record.date,
                "Duplicate attendance record, keeping the last one supplied"
            );
            superseded.push(record.date);
        }
    }

    Ok(RecordIndex {
        by_date,
        superseded,
    })
}

/// Aggregates attendance over the working days of `start..=end`.
///
/// For each working day (see [`resolve_working_days`]):
/// - a `present` record counts the day as present, adds its hours and
///   overtime, and adds the scheduled break; its check-in is compared with the
///   shift start (late) and its check-out with the shift end (early departure)
/// - anything else counts the day as absent
///
/// Records on non-working days are ignored.
///
/// # Arguments
///
/// * `records` - One user's attendance records
/// * `start` / `end` - The inclusive range; a reversed range yields empty stats
/// * `working_hours` - The authoritative schedule
/// * `holidays` - Active holiday dates
/// * `weekly_off_day` - The weekday never worked
///
/// # Errors
///
/// - [`crate::error::EngineError::InvalidInput`] if the schedule's break
///   leaves no working time
/// - [`crate::error::EngineError::MalformedRecord`] if any record checks out
///   before it checks in
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::aggregate_attendance;
/// use attendance_engine::models::{HolidayCalendar, WorkingHoursConfig};
/// use chrono::{NaiveDate, NaiveTime, Weekday};
/// use rust_decimal::Decimal;
///
/// let config = WorkingHoursConfig {
///     user_id: None,
///     start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     break_duration_minutes: 60,
///     work_days: vec![],
///     is_active: true,
/// };
/// let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
///
/// let stats = aggregate_attendance(&[], start, end, &config, &HolidayCalendar::new(), Weekday::Mon).unwrap();
/// assert_eq!(stats.working_days, 6);
/// assert_eq!(stats.absent_days, 6);
/// assert_eq!(stats.attendance_rate_pct, Decimal::ZERO);
/// ```
pub fn aggregate_attendance(
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
    working_hours: &WorkingHoursConfig,
    holidays: &HolidayCalendar,
    weekly_off_day: Weekday,
) -> EngineResult<AttendanceStats> {
    working_hours.standard_daily_hours()?;
    let working_days = resolve_working_days(start, end, weekly_off_day, holidays);
    let index = index_records(records)?;

    let mut tally = DayTally::default();
    for date in &working_days {
        match index.by_date.get(date) {
            Some(record) if record.is_present() => tally.add_present(record, working_hours),
            Some(_) => tally.absent_days += 1,
            None => {
                tally.absent_days += 1;
                tally.unrecorded_days += 1;
            }
        }
    }

    let stats = tally.into_stats(working_days.len() as u32);

    debug!(
        start = %start,
        end = %end,
        working_days = stats.working_days,
        present_days = stats.present_days,
        absent_days = stats.absent_days,
        "Attendance aggregated"
    );

    Ok(stats)
}

/// Running totals over the working days.
#[derive(Debug, Default)]
struct DayTally {
    present_days: u32,
    absent_days: u32,
    unrecorded_days: u32,
    late_days: u32,
    early_departures: u32,
    total_hours: Decimal,
    total_overtime_hours: Decimal,
    total_break_minutes: u64,
}

impl DayTally {
    fn add_present(&mut self, record: &AttendanceRecord, working_hours: &WorkingHoursConfig) {
        self.present_days += 1;
        self.total_hours += record.hours_worked;
        self.total_overtime_hours += record.overtime_hours;

        if let Some(check_in) = record.check_in {
            if working_hours.is_late(record.date, check_in) {
                self.late_days += 1;
            }
        }
        if let Some(check_out) = record.check_out {
            if working_hours.is_early_departure(record.date, check_out) {
                self.early_departures += 1;
            }
        }

        self.total_break_minutes += u64::from(working_hours.break_duration_minutes);
    }

    fn into_stats(self, working_days: u32) -> AttendanceStats {
        let present = Decimal::from(self.present_days);
        // A day can be both late and an early departure
        let on_time_days = self
            .present_days
            .saturating_sub(self.late_days + self.early_departures);

        AttendanceStats {
            working_days,
            present_days: self.present_days,
            absent_days: self.absent_days,
            unrecorded_days: self.unrecorded_days,
            late_days: self.late_days,
            early_departures: self.early_departures,
            total_hours: round_output(self.total_hours),
            total_overtime_hours: round_output(self.total_overtime_hours),
            avg_hours_per_day: round_output(safe_ratio(self.total_hours, present)),
            total_break_hours: round_output(
                Decimal::from(self.total_break_minutes) / Decimal::from(60),
            ),
            attendance_rate_pct: round_output(day_percentage(self.present_days, working_days)),
            punctuality_rate_pct: round_output(day_percentage(
                self.present_days - self.late_days,
                self.present_days,
            )),
            on_time_rate_pct: round_output(day_percentage(on_time_days, self.present_days)),
            overtime_rate_pct: round_output(
                safe_ratio(self.total_overtime_hours, self.total_hours) * Decimal::ONE_HUNDRED,
            ),
        }
    }
}
