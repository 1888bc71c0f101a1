use super::domain::{CostParameterSet, ParameterSetId};
use crate::repository::RepositoryError;

/// Storage abstraction for parameter sets.
///
/// `insert_active` and `activate` must flip the active flag atomically: once either
/// returns, every reader observes exactly one active set. `remove_inactive` decides and
/// removes under the same guard, so no activation can slip between its checks.
pub trait CostParameterRepository: Send + Sync {
    fn insert_active(&self, record: CostParameterSet) -> Result<CostParameterSet, RepositoryError>;
    fn activate(&self, id: &ParameterSetId) -> Result<CostParameterSet, RepositoryError>;
    fn fetch(&self, id: &ParameterSetId) -> Result<Option<CostParameterSet>, RepositoryError>;
    fn list(&self) -> Result<Vec<CostParameterSet>, RepositoryError>;
    fn active(&self) -> Result<Option<CostParameterSet>, RepositoryError>;
    fn remove_inactive(&self, id: &ParameterSetId) -> Result<CostParameterSet, RemovalRefusal>;
}

/// Reasons `remove_inactive` leaves a set in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemovalRefusal {
    #[error("cost parameter set not found")]
    NotFound,
    #[error("only one cost parameter set remains")]
    LastSet,
    #[error("cost parameter set is active")]
    ActiveSet,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
