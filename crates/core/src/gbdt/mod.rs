//! Pretrained gradient-boosted tree ensemble
//!
//! Serving-side wrapper only: the ensemble is trained offline and loaded
//! here as a frozen artifact. `predict` is a pure function of the loaded
//! parameters and the input vector.

pub mod model;
pub mod tree;

pub use model::{GbdtModel, MODEL_VERSION};
pub use tree::{Node, Tree};
