//! Artifact loading and process-wide sharing
//!
//! The transform parameters, catalog, and model form one artifact set,
//! loaded exactly once at startup and shared read-only across requests.
//! Any load failure is fatal: serving with a partial set silently
//! produces wrong predictions. Hot reload, when used, swaps the whole
//! immutable set atomically so no request ever observes a mixed state.

use crate::catalog::CategoryCatalog;
use crate::errors::{ArtifactError, ArtifactResult};
use crate::gbdt::GbdtModel;
use crate::temporal::TemporalFeatures;
use crate::transform::TransformParameters;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Numeric features the pipeline feeds in directly, in addition to the
/// temporal decomposition.
pub const RAW_NUMERIC_FEATURES: [&str; 2] = ["duration", "total_stops"];

/// The complete frozen artifact set: transform parameters, the catalog
/// derived from them, and the model. Immutable for its whole lifetime.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub transform: TransformParameters,
    pub catalog: CategoryCatalog,
    pub model: GbdtModel,
    /// blake3 hex digest of the transform artifact bytes
    pub transform_hash: String,
    /// blake3 hex digest of the model artifact bytes
    pub model_hash: String,
}

impl ArtifactSet {
    /// Load and cross-validate both artifacts.
    ///
    /// Fails on missing/corrupt files, unsupported versions, structural
    /// problems, numeric features the pipeline cannot produce, and a
    /// transform/model width mismatch. None of these degrade gracefully.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        transform_path: P,
        model_path: Q,
    ) -> ArtifactResult<Arc<Self>> {
        let transform_bytes = fs::read(transform_path.as_ref())?;
        let transform_hash = blake3::hash(&transform_bytes).to_hex().to_string();
        let transform: TransformParameters = serde_json::from_slice(&transform_bytes)?;
        transform.validate()?;

        let model_bytes = fs::read(model_path.as_ref())?;
        let model_hash = blake3::hash(&model_bytes).to_hex().to_string();
        let model = GbdtModel::from_json_bytes(&model_bytes)?;

        // Every numeric feature in the artifact must be one the pipeline
        // produces, or it could never be filled at request time.
        let producible: HashSet<&str> = TemporalFeatures::NAMES
            .iter()
            .chain(RAW_NUMERIC_FEATURES.iter())
            .copied()
            .collect();
        for numeric in &transform.numeric {
            if !producible.contains(numeric.name.as_str()) {
                return Err(ArtifactError::ValidationFailed(format!(
                    "transform artifact names numeric feature {:?} the pipeline does not produce",
                    numeric.name
                )));
            }
        }

        // Same check for categorical fields: the query supplies a fixed
        // set, so any other field could never be validated or encoded.
        for field in &transform.categorical {
            if !crate::types::CATEGORICAL_FIELDS.contains(&field.field.as_str()) {
                return Err(ArtifactError::ValidationFailed(format!(
                    "transform artifact names categorical field {:?} the query does not carry",
                    field.field
                )));
            }
        }

        let transform_width = transform.output_width();
        let model_width = model.expected_width();
        if transform_width != model_width {
            return Err(ArtifactError::WidthMismatch {
                transform: transform_width,
                model: model_width,
            });
        }

        let catalog = CategoryCatalog::new(
            transform
                .categorical
                .iter()
                .map(|f| (f.field.clone(), f.vocabulary.clone()))
                .collect(),
        );

        info!(
            transform_hash = %transform_hash,
            model_hash = %model_hash,
            width = transform_width,
            trees = model.num_trees(),
            "artifact set loaded"
        );

        Ok(Arc::new(Self {
            transform,
            catalog,
            model,
            transform_hash,
            model_hash,
        }))
    }
}

/// Shared handle to the current artifact set.
///
/// Readers clone the `Arc` once per request and never block each other;
/// the write lock is held only for the pointer swap during a reload.
#[derive(Debug)]
pub struct ArtifactStore {
    current: RwLock<Arc<ArtifactSet>>,
}

impl ArtifactStore {
    pub fn new(artifacts: Arc<ArtifactSet>) -> Self {
        Self {
            current: RwLock::new(artifacts),
        }
    }

    /// The current artifact set. The returned handle stays valid across
    /// a concurrent swap; in-flight requests keep the set they started
    /// with.
    pub fn current(&self) -> Arc<ArtifactSet> {
        self.current.read().clone()
    }

    /// Atomically replace the whole artifact set.
    pub fn swap(&self, artifacts: Arc<ArtifactSet>) {
        let mut guard = self.current.write();
        info!(
            old_model = %guard.model_hash,
            new_model = %artifacts.model_hash,
            "artifact set swapped"
        );
        *guard = artifacts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn loads_consistent_artifact_pair() {
        let dir = tempfile::tempdir().unwrap();
        let (transform_path, model_path) = sample::write_sample_artifacts(dir.path()).unwrap();

        let artifacts = ArtifactSet::load(&transform_path, &model_path).unwrap();
        assert_eq!(
            artifacts.transform.output_width(),
            artifacts.model.expected_width()
        );
        assert_eq!(artifacts.transform_hash.len(), 64);
        assert_eq!(artifacts.model_hash.len(), 64);
        assert!(artifacts.catalog.validate("airline", "Air India"));
    }

    #[test]
    fn rejects_missing_transform() {
        let dir = tempfile::tempdir().unwrap();
        let (_, model_path) = sample::write_sample_artifacts(dir.path()).unwrap();

        let err = ArtifactSet::load(dir.path().join("absent.json"), &model_path).unwrap_err();
        assert!(matches!(err, ArtifactError::Io(_)));
    }

    #[test]
    fn rejects_width_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let (transform_path, _) = sample::write_sample_artifacts(dir.path()).unwrap();

        let mut model = sample::sample_model();
        model.num_features += 1;
        let model_path = dir.path().join("wide_model.json");
        model.save_json(&model_path).unwrap();

        let err = ArtifactSet::load(&transform_path, &model_path).unwrap_err();
        assert!(matches!(err, ArtifactError::WidthMismatch { .. }));
    }

    #[test]
    fn rejects_unproducible_numeric_feature() {
        let dir = tempfile::tempdir().unwrap();
        let (_, model_path) = sample::write_sample_artifacts(dir.path()).unwrap();

        let mut transform = sample::sample_transform();
        transform.numeric[0].name = "cabin_pressure".to_string();
        transform.column_order = transform
            .column_order
            .iter()
            .map(|name| {
                if name == "journey_day" {
                    "cabin_pressure".to_string()
                } else {
                    name.clone()
                }
            })
            .collect();
        let transform_path = dir.path().join("bad_transform.json");
        transform.save_json(&transform_path).unwrap();

        let err = ArtifactSet::load(&transform_path, &model_path).unwrap_err();
        assert!(matches!(err, ArtifactError::ValidationFailed(_)));
    }

    #[test]
    fn store_swaps_whole_set() {
        let dir = tempfile::tempdir().unwrap();
        let (transform_path, model_path) = sample::write_sample_artifacts(dir.path()).unwrap();

        let first = ArtifactSet::load(&transform_path, &model_path).unwrap();
        let store = ArtifactStore::new(first.clone());
        let held = store.current();

        let second = ArtifactSet::load(&transform_path, &model_path).unwrap();
        store.swap(second.clone());

        // The held handle still sees the old set; new readers the new one.
        assert!(Arc::ptr_eq(&held, &first));
        assert!(Arc::ptr_eq(&store.current(), &second));
    }

    #[test]
    fn concurrent_readers_see_whole_sets_across_swap() {
        let dir = tempfile::tempdir().unwrap();
        let (transform_path, model_path) = sample::write_sample_artifacts(dir.path()).unwrap();

        let first = ArtifactSet::load(&transform_path, &model_path).unwrap();
        let second = ArtifactSet::load(&transform_path, &model_path).unwrap();
        let store = Arc::new(ArtifactStore::new(first.clone()));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let first = first.clone();
                let second = second.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        // Every handle is one of the two complete sets,
                        // never a mix of the two.
                        let set = store.current();
                        assert!(Arc::ptr_eq(&set, &first) || Arc::ptr_eq(&set, &second));
                    }
                })
            })
            .collect();

        store.swap(second.clone());

        for reader in readers {
            reader.join().unwrap();
        }
        assert!(Arc::ptr_eq(&store.current(), &second));
    }
}
