use super::domain::{ClientId, ClientRecord};
use crate::repository::RepositoryError;

/// Storage abstraction for client records, so the service can run against any backend.
pub trait ClientRepository: Send + Sync {
    fn upsert(&self, record: ClientRecord) -> Result<ClientRecord, RepositoryError>;
    fn fetch(&self, id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<ClientRecord>, RepositoryError>;
}
