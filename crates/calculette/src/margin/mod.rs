//! Margin and profitability engine.
//!
//! Four pure stages run in one direction: the resource cost is loaded into an hourly cost,
//! the client's commercial terms resolve a target bill rate, a proposed rate is evaluated
//! against that target, and both margins are classified by the same shared classifier.
//! Nothing here holds state or performs I/O; callers pass snapshots of the client
//! configuration and of the active cost parameters.

mod cost;
pub mod domain;
mod error;
mod proposal;
mod status;
mod target;

pub use cost::compute_hourly_cost;
pub use domain::{
    ClientCommercialConfig, CommercialField, CommercialTerms, GlobalCostParameters,
    MarginSimulationRequest, MarginSimulationResult, MarginStatus, ProjectTotals,
    ProposedResults, ResourceCostProfile, ResourceKind, TargetResults,
};
pub use error::MarginError;
pub use proposal::evaluate_proposal;
pub use status::classify;
pub use target::resolve_target;

use rust_decimal::{Decimal, RoundingStrategy};

/// Display precision for amounts and percentages.
pub const RESULT_DECIMAL_PLACES: u32 = 2;

/// Run the whole pipeline for one request.
///
/// Statuses are classified on unrounded values; the returned amounts and percentages are
/// rounded to [`RESULT_DECIMAL_PLACES`].
pub fn simulate(
    request: &MarginSimulationRequest,
    client_config: &ClientCommercialConfig,
    globals: &GlobalCostParameters,
) -> Result<MarginSimulationResult, MarginError> {
    let terms = client_config.terms()?;

    if request.planned_hours < Decimal::ZERO {
        return Err(MarginError::InvalidInput {
            field: "plannedHours",
            reason: "must not be negative",
        });
    }

    let hourly_cost = compute_hourly_cost(&request.resource_profile, globals)?;
    let target = round_target(target::resolve_with_terms(hourly_cost, &terms)?);
    let proposed = round_proposed(proposal::evaluate_with_terms(
        hourly_cost,
        request.proposed_bill_rate,
        &terms,
    )?);

    // Taken on the rounded percentages so the delta matches the figures shown beside it.
    let margin_delta_points = bounded(
        "proposedBillRate",
        proposed
            .margin_percent
            .checked_sub(target.theoretical_margin_percent),
    )?;

    let total_cost = bounded("plannedHours", hourly_cost.checked_mul(request.planned_hours))?;
    let total_revenue = bounded(
        "plannedHours",
        request.proposed_bill_rate.checked_mul(request.planned_hours),
    )?;
    let total_margin = bounded("plannedHours", total_revenue.checked_sub(total_cost))?;
    let totals = ProjectTotals {
        planned_hours: request.planned_hours,
        total_cost: round(total_cost),
        total_revenue: round(total_revenue),
        total_margin: round(total_margin),
    };

    Ok(MarginSimulationResult {
        target,
        proposed,
        margin_delta_points,
        totals,
    })
}

/// `margin / rate * 100`, or zero when the rate is zero. `field` names the rate when the
/// ratio leaves the representable range.
pub(crate) fn margin_percent(
    field: &'static str,
    margin_per_hour: Decimal,
    bill_rate: Decimal,
) -> Result<Decimal, MarginError> {
    if bill_rate.is_zero() {
        return Ok(Decimal::ZERO);
    }
    bounded(
        field,
        margin_per_hour
            .checked_div(bill_rate)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
    )
}

/// An overflowed checked operation becomes an invalid-input error on `field`.
pub(crate) fn bounded(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<Decimal, MarginError> {
    value.ok_or(MarginError::InvalidInput {
        field,
        reason: "is too large",
    })
}

pub(crate) fn ensure_hourly_cost(hourly_cost: Decimal) -> Result<(), MarginError> {
    if hourly_cost < Decimal::ZERO {
        return Err(MarginError::InvalidInput {
            field: "hourlyCost",
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RESULT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn round_target(target: TargetResults) -> TargetResults {
    TargetResults {
        cost_per_hour: round(target.cost_per_hour),
        effective_target_bill_rate: round(target.effective_target_bill_rate),
        gross_target_bill_rate: target.gross_target_bill_rate.map(round),
        theoretical_margin_percent: round(target.theoretical_margin_percent),
        theoretical_margin_per_hour: round(target.theoretical_margin_per_hour),
        status: target.status,
    }
}

fn round_proposed(proposed: ProposedResults) -> ProposedResults {
    ProposedResults {
        proposed_bill_rate: round(proposed.proposed_bill_rate),
        margin_percent: round(proposed.margin_percent),
        margin_per_hour: round(proposed.margin_per_hour),
        discount_percent_applied: round(proposed.discount_percent_applied),
        status: proposed.status,
    }
}
