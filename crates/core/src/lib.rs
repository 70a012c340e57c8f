//! Inference pipeline for flight fare prediction
//!
//! Reproduces, at serving time, the exact feature encoding frozen at
//! training time, then applies a pretrained gradient-boosted ensemble.
//! Everything frozen lives in two read-only artifacts loaded once at
//! startup; requests share them without locking.
//!
//! Modules:
//! - `catalog`: Frozen per-field category vocabularies
//! - `temporal`: Calendar/time-of-day feature decomposition
//! - `encoder`: One-hot encoding against the frozen vocabulary
//! - `conditioner`: Winsorization and standardization
//! - `assembler`: Column-order concatenation and selection mask
//! - `gbdt`: Pretrained tree-ensemble scoring
//! - `transform`: The transform-parameter artifact
//! - `artifacts`: Artifact loading and the atomic-swap store
//! - `service`: Request orchestration
//! - `sample`: Sample artifact pair for demos and tests

pub mod artifacts;
pub mod assembler;
pub mod catalog;
pub mod conditioner;
pub mod encoder;
pub mod errors;
pub mod gbdt;
pub mod sample;
pub mod service;
pub mod temporal;
pub mod transform;
pub mod types;

#[cfg(test)]
mod pipeline_tests;

pub use artifacts::{ArtifactSet, ArtifactStore};
pub use catalog::CategoryCatalog;
pub use errors::{ArtifactError, PredictError};
pub use gbdt::GbdtModel;
pub use service::PredictionService;
pub use transform::TransformParameters;
pub use types::{DropdownOptions, FlightQuery, PredictionResult};

/// Crate version string for health and tooling output
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
