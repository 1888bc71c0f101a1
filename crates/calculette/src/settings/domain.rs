use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::margin::GlobalCostParameters;

/// Identifier wrapper for cost parameter sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParameterSetId(pub String);

/// One named version of the global cost parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostParameterSet {
    pub id: ParameterSetId,
    pub name: String,
    pub parameters: GlobalCostParameters,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCostParameterSet {
    pub name: String,
    pub parameters: GlobalCostParameters,
}
