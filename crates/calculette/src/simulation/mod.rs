//! Simulation orchestration: resolves the client's commercial configuration and the
//! active cost parameters, runs the margin engine, and keeps named scenario snapshots.

pub mod router;
pub mod scenario;
pub mod service;

pub use router::simulation_router;
pub use scenario::{NewScenario, ScenarioId, ScenarioRecord, ScenarioRepository};
pub use service::{MarginSimulationService, SimulationServiceError};
