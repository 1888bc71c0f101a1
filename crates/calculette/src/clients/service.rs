use std::io::Read;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{ClientId, ClientRecord, CommercialConfigLookup};
use super::import::{
    CommercialBatch, CommercialImportError, CommercialImporter, ImportSummary, RowRejection,
};
use super::repository::ClientRepository;
use crate::margin::{ClientCommercialConfig, MarginError};
use crate::repository::RepositoryError;

/// Service owning client commercial configurations.
pub struct ClientConfigService<R> {
    repository: Arc<R>,
}

impl<R> ClientConfigService<R>
where
    R: ClientRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn get(&self, id: &ClientId) -> Result<ClientRecord, ClientServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| ClientServiceError::ClientNotFound(id.0.clone()))
    }

    pub fn list(&self) -> Result<Vec<ClientRecord>, ClientServiceError> {
        let mut clients = self.repository.list()?;
        clients.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(clients)
    }

    /// The configuration a simulation would use, or the list of fields still missing.
    pub fn commercial_config(
        &self,
        id: &ClientId,
    ) -> Result<CommercialConfigLookup, ClientServiceError> {
        self.get(id).map(|record| record.lookup())
    }

    /// Replace a client's configuration. Partial configurations are stored; values
    /// outside their ranges are refused.
    pub fn update(
        &self,
        id: ClientId,
        name: Option<String>,
        commercial: ClientCommercialConfig,
    ) -> Result<ClientRecord, ClientServiceError> {
        commercial.validate()?;

        let existing = self.repository.fetch(&id)?;
        let name = resolve_name(&id, name, existing.as_ref());
        let record = ClientRecord {
            id,
            name,
            commercial,
            updated_at: Utc::now(),
        };

        let stored = self.repository.upsert(record)?;
        info!(
            client_id = %stored.id.0,
            complete = stored.commercial.is_complete(),
            "client commercial configuration updated"
        );
        Ok(stored)
    }

    pub fn import<T: Read>(&self, reader: T) -> Result<ImportSummary, ClientServiceError> {
        let batch = CommercialImporter::from_reader(reader)?;
        self.apply_batch(batch)
    }

    /// Merge each parsed row over the stored configuration. Rows whose merged result is
    /// invalid are rejected and the stored record is left as it was.
    pub fn apply_batch(&self, batch: CommercialBatch) -> Result<ImportSummary, ClientServiceError> {
        let mut summary = ImportSummary {
            rejected: batch.rejected,
            ..ImportSummary::default()
        };

        for row in batch.rows {
            let id = ClientId(row.client_id.clone());
            let existing = self.repository.fetch(&id)?;
            let merged = match &existing {
                Some(record) => record.commercial.merged_with(&row.commercial),
                None => row.commercial.clone(),
            };

            if let Err(error) = merged.validate() {
                summary.rejected.push(RowRejection {
                    line: row.line,
                    client_id: Some(row.client_id),
                    reason: error.to_string(),
                });
                continue;
            }

            let name = resolve_name(&id, row.client_name, existing.as_ref());
            self.repository.upsert(ClientRecord {
                id,
                name,
                commercial: merged,
                updated_at: Utc::now(),
            })?;

            if existing.is_some() {
                summary.updated += 1;
            } else {
                summary.created += 1;
            }
        }

        summary.rejected.sort_by_key(|rejection| rejection.line);
        if !summary.rejected.is_empty() {
            warn!(
                rejected = summary.rejected.len(),
                "commercial parameters import skipped invalid rows"
            );
        }
        info!(
            created = summary.created,
            updated = summary.updated,
            "commercial parameters imported"
        );
        Ok(summary)
    }
}

fn resolve_name(id: &ClientId, name: Option<String>, existing: Option<&ClientRecord>) -> String {
    name.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| existing.map(|record| record.name.clone()))
        .unwrap_or_else(|| id.0.clone())
}

/// Error raised by the client configuration service.
#[derive(Debug, thiserror::Error)]
pub enum ClientServiceError {
    #[error("client {0} not found")]
    ClientNotFound(String),
    #[error(transparent)]
    Invalid(#[from] MarginError),
    #[error(transparent)]
    Import(#[from] CommercialImportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
