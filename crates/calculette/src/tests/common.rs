use std::sync::Arc;

use axum::response::Response;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::clients::{ClientConfigService, ClientId, ClientRecord, ClientRepository};
use crate::margin::{
    ClientCommercialConfig, GlobalCostParameters, MarginSimulationRequest, ResourceCostProfile,
};
use crate::memory::{
    InMemoryClientRepository, InMemoryCostParameterRepository, InMemoryScenarioRepository,
};
use crate::repository::RepositoryError;
use crate::settings::{
    CostParameterRepository, CostParameterSet, CostSettingsService, NewCostParameterSet,
    ParameterSetId, RemovalRefusal,
};
use crate::simulation::{
    MarginSimulationService, ScenarioId, ScenarioRecord, ScenarioRepository,
};

pub(super) type MemorySimulationService = MarginSimulationService<
    InMemoryClientRepository,
    InMemoryCostParameterRepository,
    InMemoryScenarioRepository,
>;

pub(super) fn globals() -> GlobalCostParameters {
    GlobalCostParameters {
        employer_charges_rate_percent: dec!(65),
        indirect_annual_costs: dec!(5000),
        billable_hours_per_year: 1600,
    }
}

pub(super) fn complete_commercial() -> ClientCommercialConfig {
    ClientCommercialConfig {
        target_margin_percent: Some(dec!(25)),
        minimum_margin_percent: Some(dec!(15)),
        discount_percent: Some(dec!(10)),
        forced_vacation_days_per_year: Some(5),
        target_hourly_rate: Some(dec!(120)),
    }
}

pub(super) fn partial_commercial() -> ClientCommercialConfig {
    ClientCommercialConfig {
        target_margin_percent: Some(dec!(25)),
        minimum_margin_percent: Some(dec!(15)),
        ..ClientCommercialConfig::default()
    }
}

pub(super) fn new_parameter_set(name: &str) -> NewCostParameterSet {
    NewCostParameterSet {
        name: name.to_string(),
        parameters: globals(),
    }
}

pub(super) fn freelance_request(client_id: &str) -> MarginSimulationRequest {
    MarginSimulationRequest {
        resource_profile: ResourceCostProfile::freelance(dec!(80.47)),
        planned_hours: dec!(100),
        client_id: client_id.to_string(),
        proposed_bill_rate: dec!(115),
    }
}

pub(super) fn settings_service() -> (
    CostSettingsService<InMemoryCostParameterRepository>,
    Arc<InMemoryCostParameterRepository>,
) {
    let repository = Arc::new(InMemoryCostParameterRepository::default());
    (CostSettingsService::new(repository.clone()), repository)
}

pub(super) fn client_service() -> (
    ClientConfigService<InMemoryClientRepository>,
    Arc<InMemoryClientRepository>,
) {
    let repository = Arc::new(InMemoryClientRepository::default());
    (ClientConfigService::new(repository.clone()), repository)
}

/// Simulation service over stores seeded with `acme` (complete), `globex` (partial),
/// and one active parameter set.
pub(super) fn seeded_simulation_service() -> MemorySimulationService {
    let clients = Arc::new(InMemoryClientRepository::default());
    let parameters = Arc::new(InMemoryCostParameterRepository::default());

    let client_service = ClientConfigService::new(clients.clone());
    client_service
        .update(
            ClientId("acme".to_string()),
            Some("Acme Corp".to_string()),
            complete_commercial(),
        )
        .expect("seed acme");
    client_service
        .update(
            ClientId("globex".to_string()),
            None,
            partial_commercial(),
        )
        .expect("seed globex");

    CostSettingsService::new(parameters.clone())
        .create(new_parameter_set("2026 baseline"))
        .expect("seed parameter set");

    MarginSimulationService::new(
        clients,
        parameters,
        Arc::new(InMemoryScenarioRepository::default()),
    )
}

/// Same clients as [`seeded_simulation_service`] but no parameter set at all.
pub(super) fn unconfigured_simulation_service() -> MemorySimulationService {
    let clients = Arc::new(InMemoryClientRepository::default());
    ClientConfigService::new(clients.clone())
        .update(ClientId("acme".to_string()), None, complete_commercial())
        .expect("seed acme");

    MarginSimulationService::new(
        clients,
        Arc::new(InMemoryCostParameterRepository::default()),
        Arc::new(InMemoryScenarioRepository::default()),
    )
}

pub(super) struct UnavailableRepository;

impl CostParameterRepository for UnavailableRepository {
    fn insert_active(
        &self,
        _record: CostParameterSet,
    ) -> Result<CostParameterSet, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn activate(&self, _id: &ParameterSetId) -> Result<CostParameterSet, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ParameterSetId) -> Result<Option<CostParameterSet>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<CostParameterSet>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active(&self) -> Result<Option<CostParameterSet>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_inactive(&self, _id: &ParameterSetId) -> Result<CostParameterSet, RemovalRefusal> {
        Err(RepositoryError::Unavailable("database offline".to_string()).into())
    }
}

impl ClientRepository for UnavailableRepository {
    fn upsert(&self, _record: ClientRecord) -> Result<ClientRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ClientRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl ScenarioRepository for UnavailableRepository {
    fn insert(&self, _record: ScenarioRecord) -> Result<ScenarioRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ScenarioId) -> Result<Option<ScenarioRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ScenarioRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
