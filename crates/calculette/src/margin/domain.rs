use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::MarginError;

/// How a resource is paid, which decides how its hourly cost is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Salaried,
    Freelance,
}

/// Compensation of a resource. Exactly one monetary field is populated, matching `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCostProfile {
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_gross_salary: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
}

impl ResourceCostProfile {
    pub fn salaried(annual_gross_salary: Decimal) -> Self {
        Self {
            kind: ResourceKind::Salaried,
            annual_gross_salary: Some(annual_gross_salary),
            hourly_rate: None,
        }
    }

    pub fn freelance(hourly_rate: Decimal) -> Self {
        Self {
            kind: ResourceKind::Freelance,
            annual_gross_salary: None,
            hourly_rate: Some(hourly_rate),
        }
    }
}

/// Cost parameters applied to salaried resources. One version is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCostParameters {
    pub employer_charges_rate_percent: Decimal,
    pub indirect_annual_costs: Decimal,
    pub billable_hours_per_year: u32,
}

impl GlobalCostParameters {
    pub fn validate(&self) -> Result<(), MarginError> {
        ensure_percent("employerChargesRatePercent", self.employer_charges_rate_percent)?;

        if self.indirect_annual_costs < Decimal::ZERO {
            return Err(MarginError::invalid(
                "indirectAnnualCosts",
                "must not be negative",
            ));
        }

        if self.billable_hours_per_year == 0 {
            return Err(MarginError::invalid(
                "billableHoursPerYear",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

/// Commercial fields a client must carry before margins can be simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommercialField {
    #[serde(rename = "targetMarginPercent")]
    TargetMarginPercent,
    #[serde(rename = "minimumMarginPercent")]
    MinimumMarginPercent,
    #[serde(rename = "discountPercent")]
    DiscountPercent,
    #[serde(rename = "forcedVacationDaysPerYear")]
    ForcedVacationDaysPerYear,
    #[serde(rename = "targetHourlyRate")]
    TargetHourlyRate,
}

impl CommercialField {
    pub fn name(&self) -> &'static str {
        match self {
            CommercialField::TargetMarginPercent => "targetMarginPercent",
            CommercialField::MinimumMarginPercent => "minimumMarginPercent",
            CommercialField::DiscountPercent => "discountPercent",
            CommercialField::ForcedVacationDaysPerYear => "forcedVacationDaysPerYear",
            CommercialField::TargetHourlyRate => "targetHourlyRate",
        }
    }
}

impl fmt::Display for CommercialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-client margin policy as stored. Any field may be absent until configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCommercialConfig {
    #[serde(default)]
    pub target_margin_percent: Option<Decimal>,
    #[serde(default)]
    pub minimum_margin_percent: Option<Decimal>,
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
    #[serde(default)]
    pub forced_vacation_days_per_year: Option<u32>,
    #[serde(default)]
    pub target_hourly_rate: Option<Decimal>,
}

impl ClientCommercialConfig {
    /// Missing fields in canonical order.
    pub fn missing_fields(&self) -> Vec<CommercialField> {
        let mut missing = Vec::new();
        if self.target_margin_percent.is_none() {
            missing.push(CommercialField::TargetMarginPercent);
        }
        if self.minimum_margin_percent.is_none() {
            missing.push(CommercialField::MinimumMarginPercent);
        }
        if self.discount_percent.is_none() {
            missing.push(CommercialField::DiscountPercent);
        }
        if self.forced_vacation_days_per_year.is_none() {
            missing.push(CommercialField::ForcedVacationDaysPerYear);
        }
        if self.target_hourly_rate.is_none() {
            missing.push(CommercialField::TargetHourlyRate);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Range checks on whatever is present. Partial configurations pass.
    pub fn validate(&self) -> Result<(), MarginError> {
        if let Some(value) = self.target_margin_percent {
            ensure_percent(CommercialField::TargetMarginPercent.name(), value)?;
        }
        if let Some(value) = self.minimum_margin_percent {
            ensure_percent(CommercialField::MinimumMarginPercent.name(), value)?;
        }
        if let Some(value) = self.discount_percent {
            ensure_percent(CommercialField::DiscountPercent.name(), value)?;
        }
        if let Some(rate) = self.target_hourly_rate {
            ensure_positive(CommercialField::TargetHourlyRate.name(), rate)?;
        }
        if let (Some(minimum), Some(target)) =
            (self.minimum_margin_percent, self.target_margin_percent)
        {
            if minimum > target {
                return Err(MarginError::invalid(
                    CommercialField::MinimumMarginPercent.name(),
                    "must not exceed targetMarginPercent",
                ));
            }
        }
        Ok(())
    }

    /// Completeness is checked before ranges so callers always learn every missing field.
    pub fn terms(&self) -> Result<CommercialTerms, MarginError> {
        let terms = match (
            self.target_margin_percent,
            self.minimum_margin_percent,
            self.discount_percent,
            self.forced_vacation_days_per_year,
            self.target_hourly_rate,
        ) {
            (Some(target), Some(minimum), Some(discount), Some(vacation), Some(rate)) => {
                CommercialTerms {
                    target_margin_percent: target,
                    minimum_margin_percent: minimum,
                    discount_percent: discount,
                    forced_vacation_days_per_year: vacation,
                    target_hourly_rate: rate,
                }
            }
            _ => {
                return Err(MarginError::IncompleteClientConfig {
                    missing: self.missing_fields(),
                })
            }
        };

        self.validate()?;
        Ok(terms)
    }

    /// Overlay the fields present in `other`, keeping current values where `other` is empty.
    pub fn merged_with(&self, other: &ClientCommercialConfig) -> ClientCommercialConfig {
        ClientCommercialConfig {
            target_margin_percent: other.target_margin_percent.or(self.target_margin_percent),
            minimum_margin_percent: other
                .minimum_margin_percent
                .or(self.minimum_margin_percent),
            discount_percent: other.discount_percent.or(self.discount_percent),
            forced_vacation_days_per_year: other
                .forced_vacation_days_per_year
                .or(self.forced_vacation_days_per_year),
            target_hourly_rate: other.target_hourly_rate.or(self.target_hourly_rate),
        }
    }
}

/// A complete, validated commercial configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommercialTerms {
    pub target_margin_percent: Decimal,
    pub minimum_margin_percent: Decimal,
    pub discount_percent: Decimal,
    pub forced_vacation_days_per_year: u32,
    pub target_hourly_rate: Decimal,
}

/// Three-way margin classification, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarginStatus {
    Ko,
    Warning,
    Ok,
}

impl MarginStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MarginStatus::Ko => "KO",
            MarginStatus::Warning => "WARNING",
            MarginStatus::Ok => "OK",
        }
    }
}

impl fmt::Display for MarginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSimulationRequest {
    pub resource_profile: ResourceCostProfile,
    pub planned_hours: Decimal,
    pub client_id: String,
    pub proposed_bill_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetResults {
    pub cost_per_hour: Decimal,
    /// Net rate actually billed to the client.
    pub effective_target_bill_rate: Decimal,
    /// Informational pre-discount rate. Absent when the discount is 100%.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_target_bill_rate: Option<Decimal>,
    pub theoretical_margin_percent: Decimal,
    pub theoretical_margin_per_hour: Decimal,
    pub status: MarginStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedResults {
    pub proposed_bill_rate: Decimal,
    pub margin_percent: Decimal,
    pub margin_per_hour: Decimal,
    pub discount_percent_applied: Decimal,
    pub status: MarginStatus,
}

/// Amounts over the planned hours of the assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTotals {
    pub planned_hours: Decimal,
    pub total_cost: Decimal,
    pub total_revenue: Decimal,
    pub total_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSimulationResult {
    pub target: TargetResults,
    pub proposed: ProposedResults,
    /// Proposed margin percent minus theoretical margin percent.
    pub margin_delta_points: Decimal,
    pub totals: ProjectTotals,
}

pub(crate) fn ensure_percent(field: &'static str, value: Decimal) -> Result<(), MarginError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(MarginError::invalid(field, "must be between 0 and 100"));
    }
    Ok(())
}

pub(crate) fn ensure_positive(field: &'static str, value: Decimal) -> Result<(), MarginError> {
    if value <= Decimal::ZERO {
        return Err(MarginError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}
