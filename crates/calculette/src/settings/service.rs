use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{CostParameterSet, NewCostParameterSet, ParameterSetId};
use super::repository::{CostParameterRepository, RemovalRefusal};
use crate::margin::{GlobalCostParameters, MarginError};
use crate::repository::RepositoryError;

/// Service enforcing the lifecycle rules of global cost parameter sets.
pub struct CostSettingsService<R> {
    repository: Arc<R>,
}

static PARAMETER_SET_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_parameter_set_id() -> ParameterSetId {
    let id = PARAMETER_SET_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ParameterSetId(format!("params-{id:04}"))
}

impl<R> CostSettingsService<R>
where
    R: CostParameterRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new set, making it the only active one.
    pub fn create(
        &self,
        request: NewCostParameterSet,
    ) -> Result<CostParameterSet, SettingsServiceError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(SettingsServiceError::EmptyName);
        }
        request.parameters.validate()?;

        let record = CostParameterSet {
            id: next_parameter_set_id(),
            name: name.to_string(),
            parameters: request.parameters,
            is_active: true,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert_active(record)?;
        info!(
            set_id = %stored.id.0,
            name = %stored.name,
            "cost parameter set created and activated"
        );
        Ok(stored)
    }

    pub fn activate(
        &self,
        id: &ParameterSetId,
    ) -> Result<CostParameterSet, SettingsServiceError> {
        match self.repository.activate(id) {
            Ok(record) => {
                info!(set_id = %record.id.0, "cost parameter set activated");
                Ok(record)
            }
            Err(RepositoryError::NotFound) => Err(SettingsServiceError::SetNotFound(id.0.clone())),
            Err(other) => Err(other.into()),
        }
    }

    /// Delete an inactive set. The last remaining set and the active set are kept.
    pub fn delete(&self, id: &ParameterSetId) -> Result<CostParameterSet, SettingsServiceError> {
        match self.repository.remove_inactive(id) {
            Ok(removed) => {
                info!(set_id = %removed.id.0, "cost parameter set deleted");
                Ok(removed)
            }
            Err(RemovalRefusal::NotFound) => Err(SettingsServiceError::SetNotFound(id.0.clone())),
            Err(RemovalRefusal::LastSet) => Err(SettingsServiceError::LastSetLocked),
            Err(RemovalRefusal::ActiveSet) => Err(SettingsServiceError::ActiveSetLocked),
            Err(RemovalRefusal::Repository(error)) => Err(error.into()),
        }
    }

    pub fn active(&self) -> Result<CostParameterSet, SettingsServiceError> {
        self.repository
            .active()?
            .ok_or(SettingsServiceError::NoActiveSet)
    }

    /// Parameters of the active set, as consumed by the margin engine.
    pub fn active_parameters(&self) -> Result<GlobalCostParameters, SettingsServiceError> {
        self.active().map(|record| record.parameters)
    }

    pub fn list(&self) -> Result<Vec<CostParameterSet>, SettingsServiceError> {
        let mut sets = self.repository.list()?;
        sets.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(sets)
    }
}

/// Error raised by the settings service.
#[derive(Debug, thiserror::Error)]
pub enum SettingsServiceError {
    #[error("parameter set name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Invalid(#[from] MarginError),
    #[error("cost parameter set {0} not found")]
    SetNotFound(String),
    #[error("the active cost parameter set cannot be deleted")]
    ActiveSetLocked,
    #[error("the last cost parameter set cannot be deleted")]
    LastSetLocked,
    #[error("no active cost parameter set is configured")]
    NoActiveSet,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
