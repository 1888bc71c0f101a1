use calculette::clients::{ClientConfigService, CommercialImporter};
use calculette::config::SeedConfig;
use calculette::error::AppError;
use calculette::memory::{
    InMemoryClientRepository, InMemoryCostParameterRepository, InMemoryScenarioRepository,
};
use calculette::settings::{CostSettingsService, NewCostParameterSet};
use calculette::simulation::MarginSimulationService;
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SettingsService = CostSettingsService<InMemoryCostParameterRepository>;
pub(crate) type ClientService = ClientConfigService<InMemoryClientRepository>;
pub(crate) type SimulationService = MarginSimulationService<
    InMemoryClientRepository,
    InMemoryCostParameterRepository,
    InMemoryScenarioRepository,
>;

/// Services sharing one set of in-memory stores.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) settings: Arc<SettingsService>,
    pub(crate) clients: Arc<ClientService>,
    pub(crate) simulation: Arc<SimulationService>,
}

impl Services {
    pub(crate) fn in_memory() -> Self {
        let parameters = Arc::new(InMemoryCostParameterRepository::default());
        let clients = Arc::new(InMemoryClientRepository::default());
        let scenarios = Arc::new(InMemoryScenarioRepository::default());

        Self {
            settings: Arc::new(CostSettingsService::new(parameters.clone())),
            clients: Arc::new(ClientConfigService::new(clients.clone())),
            simulation: Arc::new(MarginSimulationService::new(clients, parameters, scenarios)),
        }
    }
}

pub(crate) const DEFAULT_PARAMETER_SET_NAME: &str = "Default parameters";

/// Stores populated from configuration: the seed parameter set becomes active and the
/// optional commercial CSV is imported.
pub(crate) fn seeded_services(seed: &SeedConfig) -> Result<Services, AppError> {
    let services = Services::in_memory();

    let set = services.settings.create(NewCostParameterSet {
        name: DEFAULT_PARAMETER_SET_NAME.to_string(),
        parameters: seed.cost_parameters.clone(),
    })?;
    info!(set_id = %set.id.0, "seed cost parameters active");

    if let Some(path) = &seed.clients_csv {
        let batch = CommercialImporter::from_path(path)?;
        let summary = services.clients.apply_batch(batch)?;
        if !summary.rejected.is_empty() {
            warn!(
                path = %path.display(),
                rejected = summary.rejected.len(),
                "seed commercial parameters contained invalid rows"
            );
        }
        info!(
            path = %path.display(),
            created = summary.created,
            "seed commercial parameters imported"
        );
    }

    Ok(services)
}

/// Clap value parser for amounts and percentages; accepts a decimal comma.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|err| format!("'{raw}' is not a number ({err})"))
}
