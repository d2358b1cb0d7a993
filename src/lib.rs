//! Evalset: dataset curation core for large-model evaluation.
//!
//! Core library providing the storage layer (datasets, questions, data
//! collections, model configurations), the paginated-query contract, and
//! the UI-agnostic list-screen controller.

pub mod config;
pub mod database;
pub mod logging;
pub mod pagination;
pub mod screens;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
