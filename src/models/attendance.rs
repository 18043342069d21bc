//! Attendance record model and related types.
//!
//! This module defines the [`AttendanceRecord`] struct and [`AttendanceStatus`]
//! enum representing one user's attendance on one calendar day.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The recorded outcome of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The user attended.
    Present,
    /// The user was explicitly marked absent.
    Absent,
    /// The user was marked late by the recording system.
    Late,
    /// The user was on approved leave.
    OnLeave,
}

/// One user's attendance for one calendar date.
///
/// The record store guarantees at most one record per `(user_id, date)`.
/// `hours_worked` and `overtime_hours` are filled in by the check-out action
/// (see [`crate::calculation::derive_worked_hours`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The user the record belongs to.
    pub user_id: String,
    /// The calendar date the record tracks.
    pub date: NaiveDate,
    /// Local timestamp of the check-in, if any.
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    /// Local timestamp of the check-out, if any.
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    /// The recorded status.
    pub status: AttendanceStatus,
    /// Hours worked, in decimal hours.
    #[serde(default)]
    pub hours_worked: Decimal,
    /// Overtime hours, tracked separately from `hours_worked`.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Free-form location captured at check-in.
    #[serde(default)]
    pub location: Option<String>,
}

impl AttendanceRecord {
    /// Returns true if the record counts towards presence.
    ///
    /// Only [`AttendanceStatus::Present`] counts; `late` and `on_leave`
    /// records are classified with absences.
    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }

    /// Checks the record's internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedRecord`] if `check_out` precedes `check_in`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::{NaiveDate, NaiveDateTime};
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     user_id: "u_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
    ///     check_in: NaiveDateTime::parse_from_str("2026-09-01 17:00:00", "%Y-%m-%d %H:%M:%S").ok(),
    ///     check_out: NaiveDateTime::parse_from_str("2026-09-01 09:00:00", "%Y-%m-%d %H:%M:%S").ok(),
    ///     status: AttendanceStatus::Present,
    ///     hours_worked: Decimal::ZERO,
    ///     overtime_hours: Decimal::ZERO,
    ///     location: None,
    /// };
    /// assert!(record.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out < check_in {
                return Err(EngineError::MalformedRecord {
                    date: self.date,
                    message: format!(
                        "check-out {} precedes check-in {}",
                        check_out, check_in
                    ),
                });
            }
        }
        Ok(())
    }
}
