//! Configuration types for attendance and payroll.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CheckinZone, Holiday, WorkingHoursConfig};

/// Progressive income tax brackets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeTaxPolicy {
    /// Gross salary above which `upper_rate` applies.
    pub threshold: Decimal,
    /// Rate applied at or below the threshold.
    pub base_rate: Decimal,
    /// Rate applied above the threshold.
    pub upper_rate: Decimal,
}

impl Default for IncomeTaxPolicy {
    fn default() -> Self {
        Self {
            threshold: Decimal::new(50_000, 0),
            base_rate: Decimal::new(10, 2),
            upper_rate: Decimal::new(15, 2),
        }
    }
}

impl IncomeTaxPolicy {
    /// Returns the rate applied to `gross_salary`.
    pub fn rate_for(&self, gross_salary: Decimal) -> Decimal {
        if gross_salary > self.threshold {
            self.upper_rate
        } else {
            self.base_rate
        }
    }
}

/// The tunable constants of the payroll calculation.
///
/// [`PayrollPolicy::default`] holds the standard values; any subset can be
/// overridden in `payroll.yaml`.
///
/// # Example
///
/// ```
/// use attendance_engine::config::PayrollPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = PayrollPolicy::default();
/// assert_eq!(policy.punctuality_bonus_hours, Decimal::new(5, 1));
/// assert_eq!(policy.health_insurance, Decimal::new(150, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollPolicy {
    /// Bonus hours credited for a full, punctual day.
    pub punctuality_bonus_hours: Decimal,
    /// Multiplier on the hourly rate for bonus hours.
    pub bonus_multiplier: Decimal,
    /// Attendance rate (percent) at which the attendance bonus is paid.
    pub attendance_bonus_threshold_pct: Decimal,
    /// Share of base salary paid as the attendance bonus.
    pub attendance_bonus_rate: Decimal,
    /// Hours of pay deducted per late day.
    pub late_penalty_hours: Decimal,
    /// Income tax brackets.
    pub income_tax: IncomeTaxPolicy,
    /// Social security rate on gross salary.
    pub social_security_rate: Decimal,
    /// Medicare rate on gross salary.
    pub medicare_rate: Decimal,
    /// Fixed monthly health insurance premium.
    pub health_insurance: Decimal,
    /// Provident fund rate on gross salary.
    pub provident_fund_rate: Decimal,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            punctuality_bonus_hours: Decimal::new(5, 1),
            bonus_multiplier: Decimal::new(12, 1),
            attendance_bonus_threshold_pct: Decimal::new(95, 0),
            attendance_bonus_rate: Decimal::new(5, 2),
            late_penalty_hours: Decimal::new(5, 1),
            income_tax: IncomeTaxPolicy::default(),
            social_security_rate: Decimal::new(62, 3),
            medicare_rate: Decimal::new(145, 4),
            health_insurance: Decimal::new(150, 0),
            provident_fund_rate: Decimal::new(12, 2),
        }
    }
}

/// `payroll.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Overtime multiplier used when the caller does not supply one.
    pub default_overtime_multiplier: Decimal,
    /// The weekday never worked, used by attendance aggregation.
    pub weekly_off_day: Weekday,
    /// Payroll constants.
    #[serde(default)]
    pub policy: PayrollPolicy,
}

/// `working_hours.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkingHoursFile {
    /// The global default schedule and any per-user overrides.
    pub schedules: Vec<WorkingHoursConfig>,
}

/// `holidays.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// All known holidays, active or not.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// `zones.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ZonesFile {
    /// All configured check-in zones, active or not.
    #[serde(default)]
    pub zones: Vec<CheckinZone>,
}
