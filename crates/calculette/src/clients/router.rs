use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ClientCommercialUpdate, ClientId};
use super::repository::ClientRepository;
use super::service::{ClientConfigService, ClientServiceError};

/// Router exposing client commercial configuration and CSV batch import.
pub fn client_router<R>(service: Arc<ClientConfigService<R>>) -> Router
where
    R: ClientRepository + 'static,
{
    Router::new()
        .route("/api/v1/clients", get(list_handler::<R>))
        .route(
            "/api/v1/clients/:client_id/commercial",
            get(commercial_handler::<R>).put(update_handler::<R>),
        )
        .route(
            "/api/v1/commercial-parameters/import",
            post(import_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<ClientConfigService<R>>>) -> Response
where
    R: ClientRepository + 'static,
{
    match service.list() {
        Ok(clients) => (StatusCode::OK, axum::Json(clients)).into_response(),
        Err(error) => client_error_response(error),
    }
}

pub(crate) async fn commercial_handler<R>(
    State(service): State<Arc<ClientConfigService<R>>>,
    Path(client_id): Path<String>,
) -> Response
where
    R: ClientRepository + 'static,
{
    match service.commercial_config(&ClientId(client_id)) {
        Ok(lookup) => (StatusCode::OK, axum::Json(lookup)).into_response(),
        Err(error) => client_error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ClientConfigService<R>>>,
    Path(client_id): Path<String>,
    axum::Json(update): axum::Json<ClientCommercialUpdate>,
) -> Response
where
    R: ClientRepository + 'static,
{
    match service.update(ClientId(client_id), update.name, update.commercial) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => client_error_response(error),
    }
}

pub(crate) async fn import_handler<R>(
    State(service): State<Arc<ClientConfigService<R>>>,
    body: String,
) -> Response
where
    R: ClientRepository + 'static,
{
    match service.import(body.as_bytes()) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => client_error_response(error),
    }
}

fn client_error_response(error: ClientServiceError) -> Response {
    let status = match &error {
        ClientServiceError::ClientNotFound(_) => StatusCode::NOT_FOUND,
        ClientServiceError::Invalid(_) | ClientServiceError::Import(_) => StatusCode::BAD_REQUEST,
        ClientServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
