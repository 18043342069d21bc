//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its sections. All
//! monetary and hour values are rounded to 2 decimal places when the result
//! is assembled; intermediate calculation steps are unrounded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditTrace;

/// The calendar month a payroll result covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Month number, 1 to 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Attendance figures used by the payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollAttendance {
    /// Working days in the month under the active schedule.
    pub expected_working_days: u32,
    /// Expected working days with a `present` record.
    pub present_days: u32,
    /// `expected_working_days - present_days`.
    pub absent_days: u32,
    /// Present days that did not qualify for the punctuality bonus.
    pub late_days: u32,
    /// `present_days / expected_working_days`, as a percentage.
    pub attendance_rate_pct: Decimal,
}

/// Hour totals for the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollHours {
    /// `expected_working_days * standard_daily_hours`.
    pub expected_hours: Decimal,
    /// Sum of `hours_worked` over present records.
    pub total_hours: Decimal,
    /// Hours paid at the regular rate, capped per day at the standard shift.
    pub regular_hours: Decimal,
    /// Sum of `overtime_hours` over present records.
    pub overtime_hours: Decimal,
    /// Punctuality bonus hours.
    pub bonus_hours: Decimal,
}

/// Pay components, bonuses, and penalties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEarnings {
    /// The monthly base salary.
    pub base_salary: Decimal,
    /// `base_salary / expected_hours`.
    pub hourly_rate: Decimal,
    /// Regular hours at the hourly rate.
    pub regular_pay: Decimal,
    /// Overtime hours at the hourly rate times the overtime multiplier.
    pub overtime_pay: Decimal,
    /// Bonus hours at the hourly rate times the bonus multiplier.
    pub bonus_pay: Decimal,
    /// Paid when the attendance rate reaches the threshold.
    pub attendance_bonus: Decimal,
    /// Deducted per late day.
    pub late_penalty: Decimal,
    /// Deducted per absent day.
    pub absent_penalty: Decimal,
    /// Earnings less penalties. Not floored at zero.
    pub gross_salary: Decimal,
}

/// Statutory and company deductions, all derived from gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDeductions {
    /// Progressive income tax.
    pub income_tax: Decimal,
    /// Social security contribution.
    pub social_security: Decimal,
    /// Medicare contribution.
    pub medicare: Decimal,
    /// Fixed health insurance premium.
    pub health_insurance: Decimal,
    /// Provident fund contribution.
    pub provident_fund: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
}

/// The complete, itemized payroll for one user and one month.
///
/// Produced by [`crate::calculation::calculate_payroll`]. Results are created
/// fresh on each call and carry no identity of their own; storing them is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The month calculated.
    pub period: PayrollPeriod,
    /// Attendance figures.
    pub attendance: PayrollAttendance,
    /// Hour totals.
    pub hours: PayrollHours,
    /// Pay components and gross salary.
    pub earnings: PayrollEarnings,
    /// Deductions from gross salary.
    pub deductions: PayrollDeductions,
    /// `gross_salary - total_deductions`.
    pub net_salary: Decimal,
    /// Record of every calculation decision.
    pub audit_trace: AuditTrace,
}
