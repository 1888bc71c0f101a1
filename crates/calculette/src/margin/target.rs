use rust_decimal::Decimal;

use super::domain::{ClientCommercialConfig, CommercialTerms, TargetResults};
use super::error::MarginError;
use super::status::classify;
use super::{bounded, ensure_hourly_cost, margin_percent};

/// Resolve the client's target bill rate and the margin it yields over `hourly_cost`.
///
/// The configured `targetHourlyRate` is net of discount and is the rate actually billed.
/// The pre-discount rate is reported for information only.
pub fn resolve_target(
    hourly_cost: Decimal,
    config: &ClientCommercialConfig,
) -> Result<TargetResults, MarginError> {
    let terms = config.terms()?;
    resolve_with_terms(hourly_cost, &terms)
}

pub(crate) fn resolve_with_terms(
    hourly_cost: Decimal,
    terms: &CommercialTerms,
) -> Result<TargetResults, MarginError> {
    ensure_hourly_cost(hourly_cost)?;

    let effective_target_bill_rate = terms.target_hourly_rate;
    let theoretical_margin_per_hour = effective_target_bill_rate - hourly_cost;
    let theoretical_margin_percent = margin_percent(
        "targetHourlyRate",
        theoretical_margin_per_hour,
        effective_target_bill_rate,
    )?;

    Ok(TargetResults {
        cost_per_hour: hourly_cost,
        effective_target_bill_rate,
        gross_target_bill_rate: gross_rate(effective_target_bill_rate, terms.discount_percent)?,
        theoretical_margin_percent,
        theoretical_margin_per_hour,
        status: classify(
            theoretical_margin_percent,
            terms.minimum_margin_percent,
            terms.target_margin_percent,
        ),
    })
}

/// `net / (1 - discount / 100)`; undefined for a full discount. A discount close enough
/// to 100 can push the gross rate out of range, which is reported against the net rate.
pub(crate) fn gross_rate(
    net_rate: Decimal,
    discount_percent: Decimal,
) -> Result<Option<Decimal>, MarginError> {
    if discount_percent.is_zero() {
        return Ok(Some(net_rate));
    }
    let remaining = Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED;
    if remaining <= Decimal::ZERO {
        return Ok(None);
    }
    bounded("targetHourlyRate", net_rate.checked_div(remaining)).map(Some)
}
