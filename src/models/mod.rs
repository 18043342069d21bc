//! Core data models for the attendance and payroll engine.
//!
//! This module contains the input records consumed from the record store and
//! configuration, and the derived results the engine produces.

mod attendance;
mod attendance_stats;
mod audit;
mod holiday;
mod payroll_result;
mod working_hours;
mod zone;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use attendance_stats::AttendanceStats;
pub use audit::{AuditStep, AuditTrace, AuditWarning, WarningSeverity};
pub use holiday::{Holiday, HolidayCalendar};
pub use payroll_result::{
    PayrollAttendance, PayrollDeductions, PayrollEarnings, PayrollHours, PayrollPeriod,
    PayrollResult,
};
pub use working_hours::WorkingHoursConfig;
pub use zone::{CheckinZone, GeoPoint, ZoneResolution};
