//! Versioned global cost parameters.
//!
//! Several named parameter sets may exist but exactly one is active. Creating a set
//! activates it, and the active or last remaining set can never be deleted.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{CostParameterSet, NewCostParameterSet, ParameterSetId};
pub use repository::{CostParameterRepository, RemovalRefusal};
pub use router::settings_router;
pub use service::{CostSettingsService, SettingsServiceError};
