//! Serialized ensemble artifact: load, validate, predict

use super::tree::Tree;
use crate::errors::{ArtifactError, ArtifactResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Supported model artifact format version
pub const MODEL_VERSION: i32 = 1;

/// Pretrained gradient-boosted ensemble.
///
/// Stateless at serving time: `predict` reads frozen parameters only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GbdtModel {
    /// Model format version (always 1 for now)
    pub version: i32,

    /// Expected input vector width
    pub num_features: usize,

    /// Ensemble-wide additive base score
    pub base_score: f64,

    /// Decision trees in the ensemble
    pub trees: Vec<Tree>,
}

impl GbdtModel {
    /// Create a new model
    pub fn new(num_features: usize, base_score: f64, trees: Vec<Tree>) -> Self {
        Self {
            version: MODEL_VERSION,
            num_features,
            base_score,
            trees,
        }
    }

    /// Validate model structure
    pub fn validate(&self) -> ArtifactResult<()> {
        if self.version != MODEL_VERSION {
            return Err(ArtifactError::UnsupportedVersion(self.version));
        }
        if self.num_features == 0 {
            return Err(ArtifactError::ValidationFailed(
                "model declares zero input features".to_string(),
            ));
        }
        if !self.base_score.is_finite() {
            return Err(ArtifactError::ValidationFailed(format!(
                "base score {} is not finite",
                self.base_score
            )));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.num_features).map_err(|e| {
                ArtifactError::ValidationFailed(format!("tree {i} validation failed: {e}"))
            })?;
        }
        Ok(())
    }

    /// Score one feature vector.
    ///
    /// Pure function of the frozen parameters and the input. Callers
    /// guarantee `features.len() == self.num_features`; the prediction
    /// service checks this before calling.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut sum = self.base_score;
        for tree in &self.trees {
            sum += tree.weight * tree.evaluate(features);
        }
        sum
    }

    /// Expected input vector width.
    pub fn expected_width(&self) -> usize {
        self.num_features
    }

    /// Number of trees in the ensemble.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Parse and validate a model artifact from raw JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> ArtifactResult<Self> {
        let model: GbdtModel = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a model artifact from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> ArtifactResult<Self> {
        let bytes = fs::read(path)?;
        Self::from_json_bytes(&bytes)
    }

    /// Save the model as JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ArtifactResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbdt::tree::Node;

    fn test_model() -> GbdtModel {
        let tree1 = Tree::new(
            vec![
                Node::internal(0, 0, 50.0, 1, 2),
                Node::leaf(1, 100.0),
                Node::leaf(2, 200.0),
            ],
            1.0,
        );
        let tree2 = Tree::new(
            vec![
                Node::internal(0, 1, 30.0, 1, 2),
                Node::leaf(1, -50.0),
                Node::leaf(2, 50.0),
            ],
            0.5,
        );
        GbdtModel::new(2, 10.0, vec![tree1, tree2])
    }

    #[test]
    fn model_creation_and_validation() {
        let model = test_model();
        assert_eq!(model.version, MODEL_VERSION);
        assert_eq!(model.num_trees(), 2);
        assert_eq!(model.expected_width(), 2);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn prediction_sums_weighted_leaves() {
        let model = test_model();
        // tree1: 30 < 50 -> 100; tree2: 20 < 30 -> -50 * 0.5
        assert_eq!(model.predict(&[30.0, 20.0]), 10.0 + 100.0 - 25.0);
        // tree1: 60 -> 200; tree2: 40 -> 50 * 0.5
        assert_eq!(model.predict(&[60.0, 40.0]), 10.0 + 200.0 + 25.0);
    }

    #[test]
    fn prediction_is_deterministic() {
        let model = test_model();
        let features = vec![30.0, 20.0];
        assert_eq!(model.predict(&features), model.predict(&features));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut model = test_model();
        model.version = 2;
        assert!(matches!(
            model.validate(),
            Err(ArtifactError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn rejects_zero_width() {
        let model = GbdtModel::new(0, 0.0, vec![]);
        assert!(model.validate().is_err());
    }

    #[test]
    fn rejects_split_outside_width() {
        let mut model = test_model();
        model.num_features = 1; // tree2 splits on feature 1
        assert!(model.validate().is_err());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let model = test_model();
        model.save_json(&path).unwrap();
        let loaded = GbdtModel::load_json(&path).unwrap();
        assert_eq!(model, loaded);
    }

    #[test]
    fn load_rejects_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"{ not json").unwrap();
        assert!(matches!(
            GbdtModel::load_json(&path),
            Err(ArtifactError::Json(_))
        ));
    }
}
