//! Request orchestration
//!
//! Runs one query through validation, decomposition, conditioning,
//! encoding, assembly, and scoring. Failures are deterministic functions
//! of the input and artifacts, so nothing here retries.

use crate::artifacts::{ArtifactSet, RAW_NUMERIC_FEATURES};
use crate::assembler::FeatureAssembler;
use crate::conditioner::condition;
use crate::encoder::CategoricalEncoder;
use crate::errors::PredictError;
use crate::temporal::decompose;
use crate::types::{DropdownOptions, FlightQuery, PredictionResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Pipeline stage of one request, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    FeatureBuilt,
    Scored,
    Completed,
    Rejected,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::FeatureBuilt => "feature_built",
            Stage::Scored => "scored",
            Stage::Completed => "completed",
            Stage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// One-call prediction service over a frozen artifact set.
///
/// Holds its own handle to the set, so a concurrent artifact swap never
/// changes the artifacts mid-request.
pub struct PredictionService {
    artifacts: Arc<ArtifactSet>,
}

impl PredictionService {
    pub fn new(artifacts: Arc<ArtifactSet>) -> Self {
        Self { artifacts }
    }

    /// Predict the fare for one query.
    pub fn predict(&self, query: &FlightQuery) -> Result<PredictionResult, PredictError> {
        let result = self.predict_inner(query);
        match &result {
            Err(err @ PredictError::InternalInconsistency(_)) => {
                error!(stage = %Stage::Rejected, error = %err, "artifact invariant violated");
            }
            Err(err) => {
                debug!(stage = %Stage::Rejected, error = %err, "prediction rejected");
            }
            Ok(_) => {}
        }
        result
    }

    fn predict_inner(&self, query: &FlightQuery) -> Result<PredictionResult, PredictError> {
        let artifacts = &self.artifacts;
        debug!(stage = %Stage::Received, airline = %query.airline, "prediction request");

        let parsed = query.parse()?;
        for (field, value) in query.categorical_values() {
            if !artifacts.catalog.validate(field, value) {
                return Err(PredictError::unknown_category(field, value));
            }
        }
        debug!(stage = %Stage::Validated, "query validated");

        // Raw numeric features: temporal decomposition plus the two
        // directly supplied numerics.
        let temporal = decompose(&parsed);
        let mut raw: HashMap<&str, f64> = temporal.named().into_iter().collect();
        raw.insert(RAW_NUMERIC_FEATURES[0], parsed.duration_minutes as f64);
        raw.insert(RAW_NUMERIC_FEATURES[1], parsed.total_stops as f64);

        let mut numeric: HashMap<&str, f64> = HashMap::with_capacity(artifacts.transform.numeric.len());
        for params in &artifacts.transform.numeric {
            let &value = raw.get(params.name.as_str()).ok_or_else(|| {
                PredictError::InternalInconsistency(format!(
                    "no raw value for numeric feature {:?}",
                    params.name
                ))
            })?;
            numeric.insert(params.name.as_str(), condition(value, params));
        }

        let encoder = CategoricalEncoder::new(&artifacts.catalog, &artifacts.transform);
        let mut categorical: HashMap<&str, Vec<f64>> =
            HashMap::with_capacity(artifacts.transform.categorical.len());
        for (field, value) in query.categorical_values() {
            categorical.insert(field, encoder.encode(field, value)?);
        }

        let vector = FeatureAssembler::new(&artifacts.transform).assemble(&numeric, &categorical)?;
        debug!(stage = %Stage::FeatureBuilt, width = vector.len(), "feature vector assembled");

        if vector.len() != artifacts.model.expected_width() {
            return Err(PredictError::InternalInconsistency(format!(
                "assembled width {} does not match model width {}",
                vector.len(),
                artifacts.model.expected_width()
            )));
        }

        let predicted_price = artifacts.model.predict(&vector);
        debug!(stage = %Stage::Scored, predicted_price, "model scored");

        let result = PredictionResult {
            predicted_price,
            message: "Prediction successful".to_string(),
        };
        debug!(stage = %Stage::Completed, "prediction completed");
        Ok(result)
    }

    /// Vocabulary projection for client choice lists, sorted for display.
    pub fn dropdown_options(&self) -> DropdownOptions {
        let catalog = &self.artifacts.catalog;
        DropdownOptions {
            airlines: catalog.sorted_options("airline"),
            sources: catalog.sorted_options("source"),
            destinations: catalog.sorted_options("destination"),
            additional_info: catalog.sorted_options("additional_info"),
        }
    }
}
