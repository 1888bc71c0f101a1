use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::margin::{MarginSimulationRequest, MarginSimulationResult};
use crate::repository::RepositoryError;

/// Identifier wrapper for saved scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScenarioId(pub String);

/// Named snapshot of one request and the result it produced when saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRecord {
    pub id: ScenarioId,
    pub name: String,
    pub request: MarginSimulationRequest,
    pub result: MarginSimulationResult,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScenario {
    pub name: String,
    pub request: MarginSimulationRequest,
}

pub trait ScenarioRepository: Send + Sync {
    fn insert(&self, record: ScenarioRecord) -> Result<ScenarioRecord, RepositoryError>;
    fn fetch(&self, id: &ScenarioId) -> Result<Option<ScenarioRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<ScenarioRecord>, RepositoryError>;
}
