//! Margin simulation for client billing.
//!
//! [`margin`] holds the pure calculation engine. [`settings`], [`clients`], and
//! [`simulation`] wrap it with the stores and HTTP routers the surrounding application
//! talks to.

pub mod clients;
pub mod config;
pub mod error;
pub mod margin;
pub mod memory;
pub mod repository;
pub mod settings;
pub mod simulation;
pub mod telemetry;

#[cfg(test)]
mod tests;
