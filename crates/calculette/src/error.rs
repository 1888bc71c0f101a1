use crate::clients::{ClientServiceError, CommercialImportError};
use crate::config::ConfigError;
use crate::margin::MarginError;
use crate::settings::SettingsServiceError;
use crate::simulation::SimulationServiceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Failures raised while booting or driving the application outside a request handler.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(CommercialImportError),
    Settings(SettingsServiceError),
    Clients(ClientServiceError),
    Simulation(SimulationServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "commercial import error: {}", err),
            AppError::Settings(err) => write!(f, "cost settings error: {}", err),
            AppError::Clients(err) => write!(f, "client store error: {}", err),
            AppError::Simulation(err) => write!(f, "simulation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Settings(err) => Some(err),
            AppError::Clients(err) => Some(err),
            AppError::Simulation(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Settings(SettingsServiceError::Invalid(_))
            | AppError::Clients(ClientServiceError::Invalid(_))
            | AppError::Simulation(SimulationServiceError::Margin(MarginError::InvalidInput {
                ..
            })) => StatusCode::BAD_REQUEST,
            AppError::Simulation(SimulationServiceError::Margin(
                MarginError::IncompleteClientConfig { .. },
            )) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Clients(ClientServiceError::ClientNotFound(_))
            | AppError::Simulation(SimulationServiceError::ClientNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Settings(_)
            | AppError::Clients(_)
            | AppError::Simulation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CommercialImportError> for AppError {
    fn from(value: CommercialImportError) -> Self {
        Self::Import(value)
    }
}

impl From<SettingsServiceError> for AppError {
    fn from(value: SettingsServiceError) -> Self {
        Self::Settings(value)
    }
}

impl From<ClientServiceError> for AppError {
    fn from(value: ClientServiceError) -> Self {
        match value {
            ClientServiceError::Import(err) => Self::Import(err),
            other => Self::Clients(other),
        }
    }
}

impl From<SimulationServiceError> for AppError {
    fn from(value: SimulationServiceError) -> Self {
        Self::Simulation(value)
    }
}
