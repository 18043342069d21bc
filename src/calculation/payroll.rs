//! Monthly payroll calculation.
//!
//! This module turns one user's attendance records for a calendar month into
//! an itemized [`PayrollResult`]:
//! 1. Derives the standard daily hours and the month's expected working days
//! 2. Derives the hourly rate from the base salary
//! 3. Walks the present records to split regular, overtime, and bonus hours
//! 4. Prices hours, bonuses, and penalties into gross salary
//! 5. Applies deductions to reach net salary
//!
//! Values stay unrounded until the result is assembled.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AuditStep, AuditTrace, AuditWarning, HolidayCalendar, PayrollAttendance,
    PayrollDeductions, PayrollEarnings, PayrollHours, PayrollPeriod, PayrollResult,
    WarningSeverity, WorkingHoursConfig,
};

use super::aggregation::{RecordIndex, index_records};
use super::calendar::{month_bounds, resolve_scheduled_days};
use super::deductions::calculate_deductions;
use super::rates::{day_percentage, in_range, round_output};

/// Calculates payroll for one month with the default [`PayrollPolicy`].
///
/// See [`calculate_payroll_with_policy`].
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_payroll;
/// use attendance_engine::error::EngineError;
/// use attendance_engine::models::{HolidayCalendar, WorkingHoursConfig};
/// use chrono::{NaiveTime, Weekday};
/// use rust_decimal::Decimal;
///
/// let config = WorkingHoursConfig {
///     user_id: None,
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     break_duration_minutes: 60,
///     work_days: vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
///     is_active: true,
/// };
///
/// let result = calculate_payroll(&[], Decimal::ZERO, Decimal::new(15, 1), 9, 2026, &config, &HolidayCalendar::new());
/// assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
/// ```
pub fn calculate_payroll(
    records: &[AttendanceRecord],
    base_salary: Decimal,
    overtime_multiplier: Decimal,
    month: u32,
    year: i32,
    working_hours: &WorkingHoursConfig,
    holidays: &HolidayCalendar,
) -> EngineResult<PayrollResult> {
    calculate_payroll_with_policy(
        records,
        base_salary,
        overtime_multiplier,
        month,
        year,
        working_hours,
        holidays,
        &PayrollPolicy::default(),
    )
}

/// Calculates payroll for one calendar month.
///
/// # Arguments
///
/// * `records` - One user's attendance records; records outside the month are ignored
/// * `base_salary` - Monthly base salary, must be positive
/// * `overtime_multiplier` - Multiplier on the hourly rate for overtime hours
/// * `month` / `year` - The calendar month to calculate
/// * `working_hours` - The authoritative schedule
/// * `holidays` - Active holiday dates; only those in the month are used
/// * `policy` - Bonus, penalty, and deduction constants
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] for a non-positive base salary, a negative
///   overtime multiplier, an invalid month, or a schedule with no working time;
///   also when an amount overflows the decimal range
/// - [`EngineError::DivisionUndefined`] if the month has no expected working days
/// - [`EngineError::MalformedRecord`] if a record checks out before it checks in
#[allow(clippy::too_many_arguments)]
pub fn calculate_payroll_with_policy(
    records: &[AttendanceRecord],
    base_salary: Decimal,
    overtime_multiplier: Decimal,
    month: u32,
    year: i32,
    working_hours: &WorkingHoursConfig,
    holidays: &HolidayCalendar,
    policy: &PayrollPolicy,
) -> EngineResult<PayrollResult> {
    if base_salary <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "base_salary",
            format!("must be greater than zero, got {}", base_salary),
        ));
    }
    if overtime_multiplier < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "overtime_multiplier",
            format!("must not be negative, got {}", overtime_multiplier),
        ));
    }
    let (first_day, last_day) = month_bounds(year, month)?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    // Step 1: Standard daily hours
    let standard_daily_hours = working_hours.standard_daily_hours()?;
    steps.push(AuditStep {
        step_number,
        rule_id: "standard_daily_hours".to_string(),
        rule_name: "Standard Daily Hours".to_string(),
        input: serde_json::json!({
            "start_time": working_hours.start_time.format("%H:%M").to_string(),
            "end_time": working_hours.end_time.format("%H:%M").to_string(),
            "break_duration_minutes": working_hours.break_duration_minutes,
            "overnight": working_hours.is_overnight()
        }),
        output: serde_json::json!({
            "standard_daily_hours": standard_daily_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} to {}{} less {} minute break = {}h",
            working_hours.start_time.format("%H:%M"),
            working_hours.end_time.format("%H:%M"),
            if working_hours.is_overnight() {
                " (next day)"
            } else {
                ""
            },
            working_hours.break_duration_minutes,
            standard_daily_hours.round_dp(2).normalize()
        ),
    });
    step_number += 1;

    // Step 2: Expected working days
    let month_holidays = holidays.within(first_day, last_day);
    let working_days: BTreeSet<NaiveDate> = resolve_scheduled_days(
        first_day,
        last_day,
        &working_hours.work_days,
        &month_holidays,
    )
    .into_iter()
    .collect();
    let expected_working_days = working_days.len() as u32;
    steps.push(AuditStep {
        step_number,
        rule_id: "expected_working_days".to_string(),
        rule_name: "Expected Working Days".to_string(),
        input: serde_json::json!({
            "month": month,
            "year": year,
            "work_days": working_hours.work_days.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            "holidays_in_month": month_holidays.len()
        }),
        output: serde_json::json!({
            "expected_working_days": expected_working_days
        }),
        reasoning: format!(
            "{} scheduled days between {} and {} after {} holiday(s)",
            expected_working_days,
            first_day,
            last_day,
            month_holidays.len()
        ),
    });
    step_number += 1;

    // Step 3: Hourly rate
    if expected_working_days == 0 {
        return Err(EngineError::DivisionUndefined {
            message: format!(
                "no expected working days in {}-{:02}; check the schedule's work days and holidays",
                year, month
            ),
        });
    }
    let expected_hours = Decimal::from(expected_working_days) * standard_daily_hours;
    let hourly_rate = in_range(
        base_salary.checked_div(expected_hours),
        "base_salary",
        "hourly rate",
    )?;
    steps.push(AuditStep {
        step_number,
        rule_id: "hourly_rate".to_string(),
        rule_name: "Hourly Rate".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "expected_hours": expected_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": hourly_rate.round_dp(6).normalize().to_string()
        }),
        reasoning: format!(
            "${} / {}h = ${}/h",
            base_salary.normalize(),
            expected_hours.round_dp(2).normalize(),
            hourly_rate.round_dp(4)
        ),
    });
    step_number += 1;

    // Step 4: Walk present records
    let index = index_records(records)?;
    collect_index_warnings(&index, first_day, last_day, &mut warnings);
    let walk = walk_present_records(
        &index,
        first_day,
        last_day,
        &working_days,
        working_hours,
        standard_daily_hours,
        policy,
        &mut warnings,
    )?;
    let absent_days = expected_working_days - walk.present_days;
    steps.push(AuditStep {
        step_number,
        rule_id: "hours_walk".to_string(),
        rule_name: "Present Record Hours".to_string(),
        input: serde_json::json!({
            "records_in_month": walk.records_in_month,
            "standard_daily_hours": standard_daily_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "present_days": walk.present_days,
            "absent_days": absent_days,
            "late_days": walk.late_days,
            "total_hours": walk.total_hours.normalize().to_string(),
            "regular_hours": walk.regular_hours.normalize().to_string(),
            "overtime_hours": walk.overtime_hours.normalize().to_string(),
            "bonus_hours": walk.bonus_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} present day(s) of {} expected; {} late; regular hours capped at {}h per day",
            walk.present_days,
            expected_working_days,
            walk.late_days,
            standard_daily_hours.round_dp(2).normalize()
        ),
    });
    step_number += 1;

    // Step 5: Pay components
    let attendance_rate_pct = day_percentage(walk.present_days, expected_working_days);
    let priced = |quantity: Decimal, multiplier: Decimal, field: &str, name: &str| {
        in_range(
            quantity
                .checked_mul(hourly_rate)
                .and_then(|pay| pay.checked_mul(multiplier)),
            field,
            name,
        )
    };
    let regular_pay = priced(walk.regular_hours, Decimal::ONE, "base_salary", "regular pay")?;
    let overtime_pay = priced(
        walk.overtime_hours,
        overtime_multiplier,
        "overtime_multiplier",
        "overtime pay",
    )?;
    let bonus_pay = priced(
        walk.bonus_hours,
        policy.bonus_multiplier,
        "bonus_multiplier",
        "bonus pay",
    )?;
    let attendance_bonus = if attendance_rate_pct >= policy.attendance_bonus_threshold_pct {
        in_range(
            base_salary.checked_mul(policy.attendance_bonus_rate),
            "base_salary",
            "attendance bonus",
        )?
    } else {
        Decimal::ZERO
    };
    let late_penalty = priced(
        Decimal::from(walk.late_days),
        policy.late_penalty_hours,
        "late_penalty_hours",
        "late penalty",
    )?;
    let absent_penalty = priced(
        Decimal::from(absent_days),
        standard_daily_hours,
        "base_salary",
        "absent penalty",
    )?;
    steps.push(AuditStep {
        step_number,
        rule_id: "pay_components".to_string(),
        rule_name: "Pay Components".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.round_dp(6).normalize().to_string(),
            "overtime_multiplier": overtime_multiplier.normalize().to_string(),
            "bonus_multiplier": policy.bonus_multiplier.normalize().to_string(),
            "attendance_rate_pct": attendance_rate_pct.round_dp(2).normalize().to_string(),
            "attendance_bonus_threshold_pct": policy.attendance_bonus_threshold_pct.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_pay": regular_pay.round_dp(6).normalize().to_string(),
            "overtime_pay": overtime_pay.round_dp(6).normalize().to_string(),
            "bonus_pay": bonus_pay.round_dp(6).normalize().to_string(),
            "attendance_bonus": attendance_bonus.round_dp(6).normalize().to_string(),
            "late_penalty": late_penalty.round_dp(6).normalize().to_string(),
            "absent_penalty": absent_penalty.round_dp(6).normalize().to_string()
        }),
        reasoning: if attendance_bonus > Decimal::ZERO {
            format!(
                "Attendance {}% meets the {}% threshold: attendance bonus ${}",
                attendance_rate_pct.round_dp(2),
                policy.attendance_bonus_threshold_pct.normalize(),
                attendance_bonus.round_dp(2)
            )
        } else {
            format!(
                "Attendance {}% is below the {}% threshold: no attendance bonus",
                attendance_rate_pct.round_dp(2),
                policy.attendance_bonus_threshold_pct.normalize()
            )
        },
    });
    step_number += 1;

    // Step 6: Gross salary
    let earnings = in_range(
        [overtime_pay, bonus_pay, attendance_bonus]
            .into_iter()
            .try_fold(regular_pay, Decimal::checked_add),
        "base_salary",
        "earnings",
    )?;
    let penalties = in_range(
        late_penalty.checked_add(absent_penalty),
        "base_salary",
        "penalties",
    )?;
    let gross_salary = in_range(
        earnings.checked_sub(penalties),
        "base_salary",
        "gross salary",
    )?;
    if gross_salary < Decimal::ZERO {
        warn!(
            month = month,
            year = year,
            gross_salary = %gross_salary.round_dp(2),
            "Penalties exceed earnings, gross salary is negative"
        );
        warnings.push(AuditWarning {
            code: "NEGATIVE_GROSS".to_string(),
            message: format!(
                "Penalties exceed earnings; gross salary is ${}",
                gross_salary.round_dp(2)
            ),
            severity: WarningSeverity::High,
        });
    }
    steps.push(AuditStep {
        step_number,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        input: serde_json::json!({
            "earnings": earnings.round_dp(6).normalize().to_string(),
            "penalties": penalties.round_dp(6).normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_salary": gross_salary.round_dp(6).normalize().to_string()
        }),
        reasoning: format!(
            "Regular ${} + overtime ${} + bonus ${} + attendance bonus ${} - late ${} - absent ${} = ${}",
            regular_pay.round_dp(2),
            overtime_pay.round_dp(2),
            bonus_pay.round_dp(2),
            attendance_bonus.round_dp(2),
            late_penalty.round_dp(2),
            absent_penalty.round_dp(2),
            gross_salary.round_dp(2)
        ),
    });
    step_number += 1;

    // Step 7: Deductions
    let deductions_result = calculate_deductions(gross_salary, policy, step_number)?;
    let deductions = deductions_result.deductions;
    steps.push(deductions_result.audit_step);
    step_number += 1;

    // Step 8: Net salary
    let net_salary = in_range(
        gross_salary.checked_sub(deductions.total_deductions),
        "base_salary",
        "net salary",
    )?;
    steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.round_dp(6).normalize().to_string(),
            "total_deductions": deductions.total_deductions.round_dp(6).normalize().to_string()
        }),
        output: serde_json::json!({
            "net_salary": net_salary.round_dp(6).normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} = ${}",
            gross_salary.round_dp(2),
            deductions.total_deductions.round_dp(2),
            net_salary.round_dp(2)
        ),
    });

    debug!(
        month = month,
        year = year,
        expected_working_days = expected_working_days,
        present_days = walk.present_days,
        gross_salary = %gross_salary.round_dp(2),
        net_salary = %net_salary.round_dp(2),
        "Payroll calculated"
    );

    Ok(PayrollResult {
        period: PayrollPeriod { month, year },
        attendance: PayrollAttendance {
            expected_working_days,
            present_days: walk.present_days,
            absent_days,
            late_days: walk.late_days,
            attendance_rate_pct: round_output(attendance_rate_pct),
        },
        hours: PayrollHours {
            expected_hours: round_output(expected_hours),
            total_hours: round_output(walk.total_hours),
            regular_hours: round_output(walk.regular_hours),
            overtime_hours: round_output(walk.overtime_hours),
            bonus_hours: round_output(walk.bonus_hours),
        },
        earnings: PayrollEarnings {
            base_salary: round_output(base_salary),
            hourly_rate: round_output(hourly_rate),
            regular_pay: round_output(regular_pay),
            overtime_pay: round_output(overtime_pay),
            bonus_pay: round_output(bonus_pay),
            attendance_bonus: round_output(attendance_bonus),
            late_penalty: round_output(late_penalty),
            absent_penalty: round_output(absent_penalty),
            gross_salary: round_output(gross_salary),
        },
        deductions: PayrollDeductions {
            income_tax: round_output(deductions.income_tax),
            social_security: round_output(deductions.social_security),
            medicare: round_output(deductions.medicare),
            health_insurance: round_output(deductions.health_insurance),
            provident_fund: round_output(deductions.provident_fund),
            total_deductions: round_output(deductions.total_deductions),
        },
        net_salary: round_output(net_salary),
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Unrounded totals from walking the month's present records.
#[derive(Debug, Default)]
struct HoursWalk {
    records_in_month: usize,
    present_days: u32,
    late_days: u32,
    total_hours: Decimal,
    regular_hours: Decimal,
    overtime_hours: Decimal,
    bonus_hours: Decimal,
}

/// Splits the hours of each present record in the month.
///
/// A day earns the punctuality bonus when it reaches the standard hours and
/// its check-in is not later than the shift start; any other present day is
/// counted as late. Present records on non-working days are paid but do not
/// count towards `present_days`.
#[allow(clippy::too_many_arguments)]
fn walk_present_records(
    index: &RecordIndex<'_>,
    first_day: NaiveDate,
    last_day: NaiveDate,
    working_days: &BTreeSet<NaiveDate>,
    working_hours: &WorkingHoursConfig,
    standard_daily_hours: Decimal,
    policy: &PayrollPolicy,
    warnings: &mut Vec<AuditWarning>,
) -> EngineResult<HoursWalk> {
    let mut walk = HoursWalk::default();
    let add = |total: Decimal, hours: Decimal, quantity: &str| {
        in_range(total.checked_add(hours), "hours_worked", quantity)
    };

    for (date, record) in index.by_date.range(first_day..=last_day) {
        walk.records_in_month += 1;
        if !record.is_present() {
            continue;
        }

        let daily_hours = record.hours_worked;
        walk.total_hours = add(walk.total_hours, daily_hours, "total hours")?;
        walk.regular_hours = add(
            walk.regular_hours,
            daily_hours.min(standard_daily_hours),
            "regular hours",
        )?;
        walk.overtime_hours = add(walk.overtime_hours, record.overtime_hours, "overtime hours")?;

        let punctual = record
            .check_in
            .is_none_or(|check_in| !working_hours.is_late(*date, check_in));
        if daily_hours >= standard_daily_hours && punctual {
            walk.bonus_hours = add(
                walk.bonus_hours,
                policy.punctuality_bonus_hours,
                "bonus hours",
            )?;
        } else {
            walk.late_days += 1;
        }

        if working_days.contains(date) {
            walk.present_days += 1;
        } else {
            warnings.push(AuditWarning {
                code: "PRESENT_ON_NON_WORKING_DAY".to_string(),
                message: format!(
                    "Present record on {} is paid but not counted as an attendance day",
                    date
                ),
                severity: WarningSeverity::Low,
            });
        }
    }

    Ok(walk)
}

fn collect_index_warnings(
    index: &RecordIndex<'_>,
    first_day: NaiveDate,
    last_day: NaiveDate,
    warnings: &mut Vec<AuditWarning>,
) {
    for date in &index.superseded {
        warnings.push(AuditWarning {
            code: "DUPLICATE_RECORD".to_string(),
            message: format!(
                "Several records for {}; the last one supplied was used",
                date
            ),
            severity: WarningSeverity::Medium,
        });
    }

    let outside = index
        .by_date
        .keys()
        .filter(|date| **date < first_day || **date > last_day)
        .count();
    if outside > 0 {
        warn!(
            outside_records = outside,
            "Ignoring records outside the payroll month"
        );
        warnings.push(AuditWarning {
            code: "OUTSIDE_PERIOD".to_string(),
            message: format!(
                "{} record(s) fall outside {} to {} and were ignored",
                outside, first_day, last_day
            ),
            severity: WarningSeverity::Low,
        });
    }
}
