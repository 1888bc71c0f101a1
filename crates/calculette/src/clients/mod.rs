//! Client commercial configuration: storage, completeness lookup, and CSV batch import.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{ClientCommercialUpdate, ClientId, ClientRecord, CommercialConfigLookup};
pub use import::{CommercialImportError, CommercialImporter, ImportSummary, RowRejection};
pub use repository::ClientRepository;
pub use router::client_router;
pub use service::{ClientConfigService, ClientServiceError};
