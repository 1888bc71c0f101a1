use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{NewCostParameterSet, ParameterSetId};
use super::repository::CostParameterRepository;
use super::service::{CostSettingsService, SettingsServiceError};

/// Router exposing the parameter set lifecycle.
pub fn settings_router<R>(service: Arc<CostSettingsService<R>>) -> Router
where
    R: CostParameterRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/settings/cost-parameters",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/v1/settings/active-cost-parameters",
            get(active_handler::<R>),
        )
        .route(
            "/api/v1/settings/cost-parameters/:set_id",
            axum::routing::delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/settings/cost-parameters/:set_id/activate",
            post(activate_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<CostSettingsService<R>>>) -> Response
where
    R: CostParameterRepository + 'static,
{
    match service.list() {
        Ok(sets) => (StatusCode::OK, axum::Json(sets)).into_response(),
        Err(error) => settings_error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<CostSettingsService<R>>>,
    axum::Json(request): axum::Json<NewCostParameterSet>,
) -> Response
where
    R: CostParameterRepository + 'static,
{
    match service.create(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => settings_error_response(error),
    }
}

pub(crate) async fn active_handler<R>(
    State(service): State<Arc<CostSettingsService<R>>>,
) -> Response
where
    R: CostParameterRepository + 'static,
{
    match service.active() {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => settings_error_response(error),
    }
}

pub(crate) async fn activate_handler<R>(
    State(service): State<Arc<CostSettingsService<R>>>,
    Path(set_id): Path<String>,
) -> Response
where
    R: CostParameterRepository + 'static,
{
    match service.activate(&ParameterSetId(set_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => settings_error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<CostSettingsService<R>>>,
    Path(set_id): Path<String>,
) -> Response
where
    R: CostParameterRepository + 'static,
{
    match service.delete(&ParameterSetId(set_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => settings_error_response(error),
    }
}

fn settings_error_response(error: SettingsServiceError) -> Response {
    let status = match &error {
        SettingsServiceError::EmptyName | SettingsServiceError::Invalid(_) => {
            StatusCode::BAD_REQUEST
        }
        SettingsServiceError::SetNotFound(_) => StatusCode::NOT_FOUND,
        SettingsServiceError::ActiveSetLocked | SettingsServiceError::LastSetLocked => {
            StatusCode::CONFLICT
        }
        SettingsServiceError::NoActiveSet => StatusCode::SERVICE_UNAVAILABLE,
        SettingsServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
