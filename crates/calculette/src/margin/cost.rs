use rust_decimal::Decimal;

use super::domain::{ensure_positive, GlobalCostParameters, ResourceCostProfile, ResourceKind};
use super::bounded;
use super::error::MarginError;

/// Fully-loaded hourly cost of a resource.
///
/// Salaried: `(salary * (1 + charges / 100) + indirect costs) / billable hours`.
/// Freelance: the paid hourly rate, with no loading; `globals` are ignored.
pub fn compute_hourly_cost(
    profile: &ResourceCostProfile,
    globals: &GlobalCostParameters,
) -> Result<Decimal, MarginError> {
    match profile.kind {
        ResourceKind::Salaried => {
            if profile.hourly_rate.is_some() {
                return Err(MarginError::invalid(
                    "hourlyRate",
                    "must be empty for a salaried resource",
                ));
            }
            let salary = profile
                .annual_gross_salary
                .ok_or(MarginError::invalid("annualGrossSalary", "is required"))?;
            ensure_positive("annualGrossSalary", salary)?;
            globals.validate()?;

            let burden =
                Decimal::ONE + globals.employer_charges_rate_percent / Decimal::ONE_HUNDRED;
            let loaded_salary = bounded("annualGrossSalary", salary.checked_mul(burden))?;
            let annual_cost = bounded(
                "indirectAnnualCosts",
                loaded_salary.checked_add(globals.indirect_annual_costs),
            )?;
            bounded(
                "billableHoursPerYear",
                annual_cost.checked_div(Decimal::from(globals.billable_hours_per_year)),
            )
        }
        ResourceKind::Freelance => {
            if profile.annual_gross_salary.is_some() {
                return Err(MarginError::invalid(
                    "annualGrossSalary",
                    "must be empty for a freelance resource",
                ));
            }
            let rate = profile
                .hourly_rate
                .ok_or(MarginError::invalid("hourlyRate", "is required"))?;
            ensure_positive("hourlyRate", rate)?;
            Ok(rate)
        }
    }
}
