//! Attendance statistics model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statistics aggregated over the working days of a date range.
///
/// Produced by [`crate::calculation::aggregate_attendance`]. Every working day
/// is classified as exactly one of present or absent, so
/// `present_days + absent_days == working_days`.
///
/// All rates are percentages in `[0, 100]` rounded to 2 decimal places; a rate
/// whose denominator is zero is reported as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStats {
    /// Working days in the range.
    pub working_days: u32,
    /// Working days with a `present` record.
    pub present_days: u32,
    /// Working days without a `present` record, including unrecorded days.
    pub absent_days: u32,
    /// Working days with no record of any status. Counted in `absent_days`.
    pub unrecorded_days: u32,
    /// Present days whose check-in was after the shift start.
    pub late_days: u32,
    /// Present days whose check-out was before the shift end.
    pub early_departures: u32,
    /// Sum of `hours_worked` over present days.
    pub total_hours: Decimal,
    /// Sum of `overtime_hours` over present days.
    pub total_overtime_hours: Decimal,
    /// `total_hours / present_days`.
    pub avg_hours_per_day: Decimal,
    /// Scheduled break time over present days, in hours.
    pub total_break_hours: Decimal,
    /// `present_days / working_days`, as a percentage.
    pub attendance_rate_pct: Decimal,
    /// Share of present days that were not late.
    pub punctuality_rate_pct: Decimal,
    /// Share of present days that were neither late nor left early.
    pub on_time_rate_pct: Decimal,
    /// `total_overtime_hours / total_hours`, as a percentage.
    ///
    /// Not capped at 100: overtime is recorded separately from `hours_worked`.
    pub overtime_rate_pct: Decimal,
}
