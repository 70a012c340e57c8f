//! Sample artifact pair for local runs, demos, and tests
//!
//! A small but fully consistent artifact set: realistic vocabularies,
//! plausible clamp/scale constants, and a tiny ensemble over the
//! standardized columns. Not a trained model; shaped like one.

use crate::errors::ArtifactResult;
use crate::gbdt::{GbdtModel, Node, Tree};
use crate::transform::{
    CategoricalField, NumericParams, TransformParameters, TRANSFORM_VERSION, WEEKDAY_ZERO,
};
use crate::types::FlightQuery;
use std::path::{Path, PathBuf};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn numeric(name: &str, low: f64, high: f64, mean: f64, std: f64) -> NumericParams {
    NumericParams {
        name: name.to_string(),
        low,
        high,
        mean,
        std,
    }
}

/// Sample transform artifact. Pre-mask width: 11 numeric columns plus
/// one-hot blocks of 7 + 5 + 6 + 4, no selection mask.
pub fn sample_transform() -> TransformParameters {
    TransformParameters {
        version: TRANSFORM_VERSION,
        weekday_zero: WEEKDAY_ZERO.to_string(),
        categorical: vec![
            CategoricalField {
                field: "airline".to_string(),
                vocabulary: strings(&[
                    "Air India",
                    "GoAir",
                    "IndiGo",
                    "Jet Airways",
                    "Multiple carriers",
                    "SpiceJet",
                    "Vistara",
                ]),
                drop_first: false,
            },
            CategoricalField {
                field: "source".to_string(),
                vocabulary: strings(&["Banglore", "Chennai", "Delhi", "Kolkata", "Mumbai"]),
                drop_first: false,
            },
            CategoricalField {
                field: "destination".to_string(),
                vocabulary: strings(&[
                    "Banglore",
                    "Cochin",
                    "Delhi",
                    "Hyderabad",
                    "Kolkata",
                    "New Delhi",
                ]),
                drop_first: false,
            },
            CategoricalField {
                field: "additional_info".to_string(),
                vocabulary: strings(&[
                    "Business class",
                    "In-flight meal not included",
                    "No check-in baggage included",
                    "No info",
                ]),
                drop_first: false,
            },
        ],
        numeric: vec![
            numeric("journey_day", 1.0, 31.0, 15.4, 8.6),
            numeric("journey_month", 1.0, 12.0, 4.7, 1.2),
            numeric("journey_weekday", 0.0, 6.0, 2.9, 2.0),
            numeric("dep_hour", 0.0, 23.0, 12.5, 5.7),
            numeric("dep_minute", 0.0, 59.0, 24.4, 18.8),
            numeric("arrival_hour", 0.0, 23.0, 13.3, 6.8),
            numeric("arrival_minute", 0.0, 59.0, 24.7, 16.9),
            numeric("duration_hours", 0.0, 47.0, 10.2, 8.4),
            numeric("duration_minutes", 0.0, 59.0, 28.3, 16.5),
            numeric("duration", 75.0, 2860.0, 643.0, 507.0),
            numeric("total_stops", 0.0, 4.0, 0.8, 0.66),
        ],
        column_order: strings(&[
            "journey_day",
            "journey_month",
            "journey_weekday",
            "dep_hour",
            "dep_minute",
            "arrival_hour",
            "arrival_minute",
            "duration_hours",
            "duration_minutes",
            "duration",
            "total_stops",
            "airline",
            "source",
            "destination",
            "additional_info",
        ]),
        selection_mask: None,
    }
}

/// Sample ensemble over the 33 columns of [`sample_transform`].
///
/// Splits reference standardized numeric columns (z-scores) and one-hot
/// indicators; leaves are INR-scale contributions around a 9000 base.
pub fn sample_model() -> GbdtModel {
    // Column layout: 0..=10 numeric, 11..=17 airline, 18..=22 source,
    // 23..=28 destination, 29..=32 additional_info.
    let duration_split = Tree::new(
        vec![
            Node::internal(0, 9, 0.0, 1, 2),
            Node::leaf(1, -1450.0),
            Node::leaf(2, 2300.0),
        ],
        1.0,
    );
    let stops_split = Tree::new(
        vec![
            Node::internal(0, 10, -0.5, 1, 2),
            Node::leaf(1, -900.0),
            Node::internal(2, 9, 1.0, 3, 4),
            Node::leaf(3, 650.0),
            Node::leaf(4, 1400.0),
        ],
        1.0,
    );
    // Business class indicator dominates when set.
    let info_split = Tree::new(
        vec![
            Node::internal(0, 29, 0.5, 1, 2),
            Node::internal(1, 3, 0.8, 3, 4),
            Node::leaf(2, 5200.0),
            Node::leaf(3, -150.0),
            Node::leaf(4, 420.0),
        ],
        1.0,
    );
    GbdtModel::new(33, 9087.0, vec![duration_split, stops_split, info_split])
}

/// Write the sample pair into `dir` as `transform.json` and `model.json`.
pub fn write_sample_artifacts(dir: &Path) -> ArtifactResult<(PathBuf, PathBuf)> {
    let transform_path = dir.join("transform.json");
    let model_path = dir.join("model.json");
    sample_transform().save_json(&transform_path)?;
    sample_model().save_json(&model_path)?;
    Ok((transform_path, model_path))
}

/// A valid query against the sample vocabularies.
pub fn sample_query() -> FlightQuery {
    FlightQuery {
        airline: "Air India".to_string(),
        date_of_journey: "2024-01-15".to_string(),
        source: "Banglore".to_string(),
        destination: "New Delhi".to_string(),
        dep_time: "10:30".to_string(),
        arrival_time: "12:45".to_string(),
        duration: 135,
        total_stops: 0,
        additional_info: "No info".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_pair_is_consistent() {
        let transform = sample_transform();
        let model = sample_model();
        assert!(transform.validate().is_ok());
        assert!(model.validate().is_ok());
        assert_eq!(transform.output_width(), model.expected_width());
    }
}
