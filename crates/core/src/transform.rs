//! Transform-parameter artifact
//!
//! Holds everything the training pipeline froze about feature encoding:
//! per-field vocabularies, per-feature clamp/scale constants, the column
//! order, and the optional selection mask. Loaded once at startup and
//! read-only thereafter; serving must reproduce the training-time
//! encoding exactly, so none of this is ever re-derived at runtime.

use crate::errors::{ArtifactError, ArtifactResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Supported transform artifact format version
pub const TRANSFORM_VERSION: i32 = 1;

/// Weekday convention the pipeline implements (Monday = 0)
pub const WEEKDAY_ZERO: &str = "monday";

/// Frozen vocabulary and encoding choice for one categorical field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoricalField {
    /// Field name, also the block name in `column_order`
    pub field: String,
    /// Allowed values in training-time order
    pub vocabulary: Vec<String>,
    /// Whether the first vocabulary entry was dropped as the reference
    /// category at training time
    pub drop_first: bool,
}

impl CategoricalField {
    /// Width of this field's one-hot block.
    pub fn encoded_width(&self) -> usize {
        if self.drop_first {
            self.vocabulary.len().saturating_sub(1)
        } else {
            self.vocabulary.len()
        }
    }
}

/// Frozen clamp bounds and scaling constants for one numeric feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericParams {
    /// Feature name, also the block name in `column_order`
    pub name: String,
    /// Winsorization lower bound
    pub low: f64,
    /// Winsorization upper bound
    pub high: f64,
    /// Training-time mean
    pub mean: f64,
    /// Training-time standard deviation
    pub std: f64,
}

/// The complete frozen transform artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformParameters {
    /// Artifact format version (always 1 for now)
    pub version: i32,

    /// Weekday convention marker; must be `"monday"`
    pub weekday_zero: String,

    /// Categorical fields in frozen order
    pub categorical: Vec<CategoricalField>,

    /// Numeric features in frozen order
    pub numeric: Vec<NumericParams>,

    /// Block names (numeric feature names and categorical field names)
    /// in the exact column order the model was trained on
    pub column_order: Vec<String>,

    /// Positions to keep after concatenation, strictly increasing,
    /// if feature selection was applied at training time
    pub selection_mask: Option<Vec<usize>>,
}

impl TransformParameters {
    /// Validate internal consistency of the artifact.
    pub fn validate(&self) -> ArtifactResult<()> {
        if self.version != TRANSFORM_VERSION {
            return Err(ArtifactError::UnsupportedVersion(self.version));
        }

        if self.weekday_zero != WEEKDAY_ZERO {
            return Err(ArtifactError::ValidationFailed(format!(
                "weekday_zero {:?} does not match the {WEEKDAY_ZERO:?} convention this pipeline implements",
                self.weekday_zero
            )));
        }

        let mut block_names = HashSet::new();
        for field in &self.categorical {
            if field.vocabulary.is_empty() {
                return Err(ArtifactError::ValidationFailed(format!(
                    "field {:?} has an empty vocabulary",
                    field.field
                )));
            }
            let unique: HashSet<&String> = field.vocabulary.iter().collect();
            if unique.len() != field.vocabulary.len() {
                return Err(ArtifactError::ValidationFailed(format!(
                    "field {:?} has duplicate vocabulary entries",
                    field.field
                )));
            }
            if !block_names.insert(field.field.as_str()) {
                return Err(ArtifactError::ValidationFailed(format!(
                    "duplicate block name {:?}",
                    field.field
                )));
            }
        }

        for numeric in &self.numeric {
            if !numeric.low.is_finite() || !numeric.high.is_finite() {
                return Err(ArtifactError::ValidationFailed(format!(
                    "numeric feature {:?} has non-finite clamp bounds",
                    numeric.name
                )));
            }
            if numeric.low > numeric.high {
                return Err(ArtifactError::ValidationFailed(format!(
                    "numeric feature {:?} has low {} > high {}",
                    numeric.name, numeric.low, numeric.high
                )));
            }
            if !numeric.std.is_finite() || numeric.std < 0.0 {
                return Err(ArtifactError::ValidationFailed(format!(
                    "numeric feature {:?} has invalid std {}",
                    numeric.name, numeric.std
                )));
            }
            if !numeric.mean.is_finite() {
                return Err(ArtifactError::ValidationFailed(format!(
                    "numeric feature {:?} has non-finite mean",
                    numeric.name
                )));
            }
            if !block_names.insert(numeric.name.as_str()) {
                return Err(ArtifactError::ValidationFailed(format!(
                    "duplicate block name {:?}",
                    numeric.name
                )));
            }
        }

        // column_order must be a permutation of the defined blocks.
        if self.column_order.len() != block_names.len() {
            return Err(ArtifactError::ValidationFailed(format!(
                "column_order lists {} blocks but {} are defined",
                self.column_order.len(),
                block_names.len()
            )));
        }
        let mut seen = HashSet::new();
        for name in &self.column_order {
            if !block_names.contains(name.as_str()) {
                return Err(ArtifactError::ValidationFailed(format!(
                    "column_order references undefined block {name:?}"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ArtifactError::ValidationFailed(format!(
                    "column_order repeats block {name:?}"
                )));
            }
        }

        if let Some(mask) = &self.selection_mask {
            let width = self.pre_mask_width();
            let mut previous: Option<usize> = None;
            for &position in mask {
                if position >= width {
                    return Err(ArtifactError::ValidationFailed(format!(
                        "selection mask position {position} is out of range for width {width}"
                    )));
                }
                if let Some(prev) = previous {
                    if position <= prev {
                        return Err(ArtifactError::ValidationFailed(
                            "selection mask positions must be strictly increasing".to_string(),
                        ));
                    }
                }
                previous = Some(position);
            }
        }

        Ok(())
    }

    /// Frozen parameters for a categorical field.
    pub fn categorical_field(&self, field: &str) -> Option<&CategoricalField> {
        self.categorical.iter().find(|f| f.field == field)
    }

    /// Frozen parameters for a numeric feature.
    pub fn numeric_params(&self, name: &str) -> Option<&NumericParams> {
        self.numeric.iter().find(|n| n.name == name)
    }

    /// Width of one block in `column_order`.
    pub fn block_width(&self, name: &str) -> Option<usize> {
        if let Some(field) = self.categorical_field(name) {
            return Some(field.encoded_width());
        }
        self.numeric_params(name).map(|_| 1)
    }

    /// Concatenated width before the selection mask.
    pub fn pre_mask_width(&self) -> usize {
        self.column_order
            .iter()
            .filter_map(|name| self.block_width(name))
            .sum()
    }

    /// Final feature vector width, after the selection mask if present.
    /// Must equal the model's expected input width.
    pub fn output_width(&self) -> usize {
        match &self.selection_mask {
            Some(mask) => mask.len(),
            None => self.pre_mask_width(),
        }
    }

    /// Load and validate a transform artifact from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> ArtifactResult<Self> {
        let json = fs::read_to_string(path)?;
        let params: TransformParameters = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Save the artifact as JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ArtifactResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
