use rust_decimal::Decimal;

use super::domain::{ensure_positive, ClientCommercialConfig, CommercialTerms, ProposedResults};
use super::error::MarginError;
use super::status::classify;
use super::{ensure_hourly_cost, margin_percent};

/// Evaluate a client-proposed bill rate. The proposed rate is the net rate billed;
/// the discount is carried through for display only.
pub fn evaluate_proposal(
    hourly_cost: Decimal,
    proposed_bill_rate: Decimal,
    config: &ClientCommercialConfig,
) -> Result<ProposedResults, MarginError> {
    let terms = config.terms()?;
    evaluate_with_terms(hourly_cost, proposed_bill_rate, &terms)
}

pub(crate) fn evaluate_with_terms(
    hourly_cost: Decimal,
    proposed_bill_rate: Decimal,
    terms: &CommercialTerms,
) -> Result<ProposedResults, MarginError> {
    ensure_hourly_cost(hourly_cost)?;
    ensure_positive("proposedBillRate", proposed_bill_rate)?;

    let margin_per_hour = proposed_bill_rate - hourly_cost;
    let margin_percent = margin_percent("proposedBillRate", margin_per_hour, proposed_bill_rate)?;

    Ok(ProposedResults {
        proposed_bill_rate,
        margin_percent,
        margin_per_hour,
        discount_percent_applied: terms.discount_percent,
        status: classify(
            margin_percent,
            terms.minimum_margin_percent,
            terms.target_margin_percent,
        ),
    })
}
