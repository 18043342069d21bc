//! Calculation logic for the attendance and payroll engine.
//!
//! This module contains the calendar resolver, attendance aggregation,
//! worked-hours derivation, monthly payroll with its deductions, and the
//! geofence resolver used by check-in and check-out.

mod aggregation;
mod calendar;
mod deductions;
mod geofence;
mod payroll;
mod rates;
mod worked_hours;

pub use aggregation::aggregate_attendance;
pub use calendar::{month_bounds, resolve_scheduled_days, resolve_working_days, weekday_from_index};
pub use deductions::{DeductionsResult, calculate_deductions};
pub use geofence::{
    EARTH_RADIUS_METERS, ZoneMatchPolicy, haversine_distance, resolve_zone, resolve_zone_with,
};
pub use payroll::{calculate_payroll, calculate_payroll_with_policy};
pub use rates::{OUTPUT_DECIMAL_PLACES, day_percentage, percentage, round_output, safe_ratio};
pub use worked_hours::{WorkedHours, derive_worked_hours};
