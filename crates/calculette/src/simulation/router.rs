use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::scenario::{NewScenario, ScenarioId, ScenarioRepository};
use super::service::{MarginSimulationService, SimulationServiceError};
use crate::clients::ClientRepository;
use crate::margin::{MarginError, MarginSimulationRequest};
use crate::settings::CostParameterRepository;

type SharedService<C, P, S> = Arc<MarginSimulationService<C, P, S>>;

/// Router exposing margin simulations and saved scenarios.
pub fn simulation_router<C, P, S>(service: SharedService<C, P, S>) -> Router
where
    C: ClientRepository + 'static,
    P: CostParameterRepository + 'static,
    S: ScenarioRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/margin/simulations",
            post(simulate_handler::<C, P, S>),
        )
        .route(
            "/api/v1/margin/scenarios",
            get(list_scenarios_handler::<C, P, S>).post(save_scenario_handler::<C, P, S>),
        )
        .route(
            "/api/v1/margin/scenarios/:scenario_id",
            get(scenario_handler::<C, P, S>),
        )
        .with_state(service)
}

pub(crate) async fn simulate_handler<C, P, S>(
    State(service): State<SharedService<C, P, S>>,
    axum::Json(request): axum::Json<MarginSimulationRequest>,
) -> Response
where
    C: ClientRepository + 'static,
    P: CostParameterRepository + 'static,
    S: ScenarioRepository + 'static,
{
    match service.simulate(&request) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => simulation_error_response(error),
    }
}

pub(crate) async fn save_scenario_handler<C, P, S>(
    State(service): State<SharedService<C, P, S>>,
    axum::Json(scenario): axum::Json<NewScenario>,
) -> Response
where
    C: ClientRepository + 'static,
    P: CostParameterRepository + 'static,
    S: ScenarioRepository + 'static,
{
    match service.save_scenario(scenario) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => simulation_error_response(error),
    }
}

pub(crate) async fn list_scenarios_handler<C, P, S>(
    State(service): State<SharedService<C, P, S>>,
) -> Response
where
    C: ClientRepository + 'static,
    P: CostParameterRepository + 'static,
    S: ScenarioRepository + 'static,
{
    match service.scenarios() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => simulation_error_response(error),
    }
}

pub(crate) async fn scenario_handler<C, P, S>(
    State(service): State<SharedService<C, P, S>>,
    Path(scenario_id): Path<String>,
) -> Response
where
    C: ClientRepository + 'static,
    P: CostParameterRepository + 'static,
    S: ScenarioRepository + 'static,
{
    match service.scenario(&ScenarioId(scenario_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => simulation_error_response(error),
    }
}

fn simulation_error_response(error: SimulationServiceError) -> Response {
    let (status, payload) = match &error {
        SimulationServiceError::Margin(margin @ MarginError::IncompleteClientConfig { .. }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": error.to_string(),
                "missingFields": margin.missing_field_names(),
            }),
        ),
        SimulationServiceError::Margin(MarginError::InvalidInput { field, .. }) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": error.to_string(), "field": field }),
        ),
        SimulationServiceError::EmptyScenarioName => {
            (StatusCode::BAD_REQUEST, json!({ "error": error.to_string() }))
        }
        SimulationServiceError::ClientNotFound(_) | SimulationServiceError::ScenarioNotFound(_) => {
            (StatusCode::NOT_FOUND, json!({ "error": error.to_string() }))
        }
        SimulationServiceError::NoActiveParameters => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": error.to_string() }),
        ),
        SimulationServiceError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string() }),
        ),
    };
    (status, axum::Json(payload)).into_response()
}
