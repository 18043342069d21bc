//! Statutory and company deductions.
//!
//! Every deduction is derived from gross salary. A negative gross yields
//! negative percentage-based deductions; the fixed health insurance premium
//! is always charged.

use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::error::EngineResult;
use crate::models::{AuditStep, PayrollDeductions};

use super::rates::in_range;

/// The result of a deduction calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// The unrounded deductions.
    pub deductions: PayrollDeductions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates deductions from gross salary.
///
/// - income tax at the bracket rate for `gross_salary`
/// - social security, medicare, and provident fund at their flat rates
/// - the fixed health insurance premium
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidInput`] if a deduction
/// overflows the decimal range.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_deductions;
/// use attendance_engine::config::PayrollPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_deductions(Decimal::new(1000, 0), &PayrollPolicy::default(), 1).unwrap();
/// assert_eq!(result.deductions.income_tax, Decimal::new(100, 0));
/// assert_eq!(result.deductions.health_insurance, Decimal::new(150, 0));
/// ```
pub fn calculate_deductions(
    gross_salary: Decimal,
    policy: &PayrollPolicy,
    step_number: u32,
) -> EngineResult<DeductionsResult> {
    let income_tax_rate = policy.income_tax.rate_for(gross_salary);
    let at_rate = |rate: Decimal, quantity: &str| {
        in_range(gross_salary.checked_mul(rate), "gross_salary", quantity)
    };

    let income_tax = at_rate(income_tax_rate, "income tax")?;
    let social_security = at_rate(policy.social_security_rate, "social security")?;
    let medicare = at_rate(policy.medicare_rate, "medicare")?;
    let health_insurance = policy.health_insurance;
    let provident_fund = at_rate(policy.provident_fund_rate, "provident fund")?;
    let total_deductions = in_range(
        [social_security, medicare, health_insurance, provident_fund]
            .into_iter()
            .try_fold(income_tax, Decimal::checked_add),
        "gross_salary",
        "total deductions",
    )?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Statutory Deductions".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "income_tax_threshold": policy.income_tax.threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "income_tax_rate": income_tax_rate.normalize().to_string(),
            "income_tax": income_tax.normalize().to_string(),
            "social_security": social_security.normalize().to_string(),
            "medicare": medicare.normalize().to_string(),
            "health_insurance": health_insurance.normalize().to_string(),
            "provident_fund": provident_fund.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        reasoning: format!(
            "Gross ${} {} ${} threshold: income tax at {}%, total deductions ${}",
            gross_salary.round_dp(2),
            if gross_salary > policy.income_tax.threshold {
                "exceeds"
            } else {
                "is within"
            },
            policy.income_tax.threshold.normalize(),
            (income_tax_rate * Decimal::ONE_HUNDRED).normalize(),
            total_deductions.round_dp(2)
        ),
    };

    Ok(DeductionsResult {
        deductions: PayrollDeductions {
            income_tax,
            social_security,
            medicare,
            health_insurance,
            provident_fund,
            total_deductions,
        },
        audit_step,
    })
}
