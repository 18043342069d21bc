//! Working-hours configuration model.
//!
//! A [`WorkingHoursConfig`] describes the expected daily shift: its local start
//! and end time, the unpaid break, and the weekdays it is worked on. When
//! `end_time <= start_time` the shift wraps midnight and ends the next day.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// The working-hours schedule applied to attendance and payroll.
///
/// Exactly one configuration is authoritative per calculation: a per-user
/// override if one is active, otherwise the global default (`user_id: None`).
/// See [`crate::config::ConfigLoader::working_hours_for`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::WorkingHoursConfig;
/// use chrono::{NaiveTime, Weekday};
/// use rust_decimal::Decimal;
///
/// let config = WorkingHoursConfig {
///     user_id: None,
///     start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     break_duration_minutes: 60,
///     work_days: vec![Weekday::Tue, Weekday::Wed, Weekday::Thu],
///     is_active: true,
/// };
/// assert_eq!(config.standard_daily_hours().unwrap(), Decimal::new(65, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursConfig {
    /// The user this schedule overrides, or `None` for the global default.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Local shift start time.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Local shift end time; at or before `start_time` for overnight shifts.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Unpaid break length in minutes.
    #[serde(default)]
    pub break_duration_minutes: u32,
    /// Weekdays the shift is worked on.
    #[serde(default = "default_work_days")]
    pub work_days: Vec<Weekday>,
    /// Inactive configurations are never authoritative.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_work_days() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}

fn default_active() -> bool {
    true
}

impl WorkingHoursConfig {
    /// Returns true if the shift wraps midnight.
    pub fn is_overnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Returns the shift length in minutes, before the break is subtracted.
    fn shift_minutes(&self) -> i64 {
        let minutes = (self.end_time - self.start_time).num_minutes();
        if self.is_overnight() {
            minutes + MINUTES_PER_DAY
        } else {
            minutes
        }
    }

    /// Calculates the paid hours in one standard shift.
    ///
    /// The shift length is `end_time - start_time`, plus 24 hours when the
    /// shift wraps midnight, minus the break.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if the break consumes the whole
    /// shift, since no rate can be derived from a non-positive day.
    pub fn standard_daily_hours(&self) -> EngineResult<Decimal> {
        let worked_minutes = self.shift_minutes() - i64::from(self.break_duration_minutes);
        if worked_minutes <= 0 {
            return Err(EngineError::invalid_input(
                "break_duration_minutes",
                format!(
                    "break of {} minutes leaves no working time in a {} minute shift",
                    self.break_duration_minutes,
                    self.shift_minutes()
                ),
            ));
        }
        Ok(Decimal::new(worked_minutes, 0) / Decimal::new(60, 0))
    }

    /// Returns the expected start and end timestamps of the shift on `date`.
    ///
    /// For overnight shifts the end falls on the following day.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::WorkingHoursConfig;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let night = WorkingHoursConfig {
    ///     user_id: None,
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     break_duration_minutes: 30,
    ///     work_days: vec![],
    ///     is_active: true,
    /// };
    /// let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    /// let (_, end) = night.shift_window(date);
    /// assert_eq!(end.date(), NaiveDate::from_ymd_opt(2026, 9, 2).unwrap());
    /// ```
    pub fn shift_window(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = date.and_time(self.start_time);
        let mut end = date.and_time(self.end_time);
        if self.is_overnight() {
            end += Duration::days(1);
        }
        (start, end)
    }

    /// Returns true if `check_in` is later than the shift start on `date`.
    pub fn is_late(&self, date: NaiveDate, check_in: NaiveDateTime) -> bool {
        check_in > self.shift_window(date).0
    }

    /// Returns true if `check_out` is earlier than the shift end on `date`.
    pub fn is_early_departure(&self, date: NaiveDate, check_out: NaiveDateTime) -> bool {
        check_out < self.shift_window(date).1
    }

    /// Returns true if the shift is worked on `weekday`.
    pub fn works_on(&self, weekday: Weekday) -> bool {
        self.work_days.contains(&weekday)
    }
}

/// Serde adapter for `HH:MM` local times (seconds are accepted on input).
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }
}
