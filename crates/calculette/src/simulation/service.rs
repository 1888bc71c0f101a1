use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::scenario::{NewScenario, ScenarioId, ScenarioRecord, ScenarioRepository};
use crate::clients::{ClientId, ClientRepository};
use crate::margin::{self, MarginError, MarginSimulationRequest, MarginSimulationResult};
use crate::repository::RepositoryError;
use crate::settings::CostParameterRepository;

/// Service composing the client store, the active cost parameters, and the margin engine.
pub struct MarginSimulationService<C, P, S> {
    clients: Arc<C>,
    parameters: Arc<P>,
    scenarios: Arc<S>,
}

static SCENARIO_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_scenario_id() -> ScenarioId {
    let id = SCENARIO_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ScenarioId(format!("scn-{id:06}"))
}

impl<C, P, S> MarginSimulationService<C, P, S>
where
    C: ClientRepository + 'static,
    P: CostParameterRepository + 'static,
    S: ScenarioRepository + 'static,
{
    pub fn new(clients: Arc<C>, parameters: Arc<P>, scenarios: Arc<S>) -> Self {
        Self {
            clients,
            parameters,
            scenarios,
        }
    }

    /// Simulate against the stored client configuration and the active parameter set.
    /// An incomplete client configuration is reported before anything else is resolved.
    pub fn simulate(
        &self,
        request: &MarginSimulationRequest,
    ) -> Result<MarginSimulationResult, SimulationServiceError> {
        let client = self
            .clients
            .fetch(&ClientId(request.client_id.clone()))?
            .ok_or_else(|| SimulationServiceError::ClientNotFound(request.client_id.clone()))?;

        let missing = client.commercial.missing_fields();
        if !missing.is_empty() {
            return Err(MarginError::IncompleteClientConfig { missing }.into());
        }

        let globals = self
            .parameters
            .active()?
            .ok_or(SimulationServiceError::NoActiveParameters)?
            .parameters;

        let result = margin::simulate(request, &client.commercial, &globals)?;
        info!(
            client_id = %request.client_id,
            target_status = %result.target.status,
            proposed_status = %result.proposed.status,
            "margin simulation completed"
        );
        Ok(result)
    }

    pub fn save_scenario(
        &self,
        scenario: NewScenario,
    ) -> Result<ScenarioRecord, SimulationServiceError> {
        let name = scenario.name.trim();
        if name.is_empty() {
            return Err(SimulationServiceError::EmptyScenarioName);
        }

        let result = self.simulate(&scenario.request)?;
        let record = ScenarioRecord {
            id: next_scenario_id(),
            name: name.to_string(),
            request: scenario.request,
            result,
            created_at: Utc::now(),
        };

        let stored = self.scenarios.insert(record)?;
        info!(scenario_id = %stored.id.0, name = %stored.name, "scenario saved");
        Ok(stored)
    }

    pub fn scenario(&self, id: &ScenarioId) -> Result<ScenarioRecord, SimulationServiceError> {
        self.scenarios
            .fetch(id)?
            .ok_or_else(|| SimulationServiceError::ScenarioNotFound(id.0.clone()))
    }

    pub fn scenarios(&self) -> Result<Vec<ScenarioRecord>, SimulationServiceError> {
        let mut records = self.scenarios.list()?;
        records.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(records)
    }
}

/// Error raised by the simulation service.
#[derive(Debug, thiserror::Error)]
pub enum SimulationServiceError {
    #[error("client {0} not found")]
    ClientNotFound(String),
    #[error("no active cost parameter set is configured")]
    NoActiveParameters,
    #[error("scenario {0} not found")]
    ScenarioNotFound(String),
    #[error("scenario name must not be empty")]
    EmptyScenarioName,
    #[error(transparent)]
    Margin(#[from] MarginError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
