//! End-to-end pipeline scenarios over the sample artifact pair

use crate::artifacts::ArtifactSet;
use crate::errors::PredictError;
use crate::sample;
use crate::service::PredictionService;
use crate::types::FlightQuery;
use std::sync::Arc;

fn loaded_set() -> Arc<ArtifactSet> {
    let dir = tempfile::tempdir().unwrap();
    let (transform_path, model_path) = sample::write_sample_artifacts(dir.path()).unwrap();
    ArtifactSet::load(&transform_path, &model_path).unwrap()
}

#[test]
fn vector_width_matches_model_for_all_valid_inputs() {
    let artifacts = loaded_set();
    let service = PredictionService::new(artifacts.clone());

    let variants: Vec<FlightQuery> = vec![
        sample::sample_query(),
        FlightQuery {
            airline: "Jet Airways".to_string(),
            date_of_journey: "2024-12-31".to_string(),
            source: "Delhi".to_string(),
            destination: "Cochin".to_string(),
            dep_time: "23:55".to_string(),
            arrival_time: "04:25".to_string(),
            duration: 270,
            total_stops: 2,
            additional_info: "In-flight meal not included".to_string(),
        },
        FlightQuery {
            airline: "Vistara".to_string(),
            date_of_journey: "2025-06-01".to_string(),
            source: "Mumbai".to_string(),
            destination: "Hyderabad".to_string(),
            dep_time: "00:05".to_string(),
            arrival_time: "23:59".to_string(),
            duration: 5000, // clamps, never rejects
            total_stops: 4,
            additional_info: "Business class".to_string(),
        },
    ];

    for query in &variants {
        let result = service.predict(query).unwrap();
        assert!(result.predicted_price.is_finite());
    }
    // Width is fixed by the artifacts, not the input.
    assert_eq!(
        artifacts.transform.output_width(),
        artifacts.model.expected_width()
    );
}

#[test]
fn identical_input_and_artifacts_give_identical_result() {
    let artifacts = loaded_set();
    let first_service = PredictionService::new(artifacts.clone());
    let second_service = PredictionService::new(artifacts);

    let query = sample::sample_query();
    assert_eq!(
        first_service.predict(&query).unwrap(),
        second_service.predict(&query).unwrap()
    );
}

#[test]
fn every_categorical_field_rejects_out_of_vocabulary_values() {
    let service = PredictionService::new(loaded_set());

    let mutations: [(&str, fn(&mut FlightQuery)); 4] = [
        ("airline", |q| q.airline = "Pan Am".to_string()),
        ("source", |q| q.source = "Gotham".to_string()),
        ("destination", |q| q.destination = "Gotham".to_string()),
        ("additional_info", |q| {
            q.additional_info = "Free upgrades".to_string()
        }),
    ];

    for (field, mutate) in mutations {
        let mut query = sample::sample_query();
        mutate(&mut query);
        match service.predict(&query) {
            Err(PredictError::UnknownCategory { field: got, .. }) => assert_eq!(got, field),
            other => panic!("expected UnknownCategory for {field}, got {other:?}"),
        }
    }
}

#[test]
fn business_class_costs_more_than_no_info() {
    let service = PredictionService::new(loaded_set());

    let economy = sample::sample_query();
    let mut business = sample::sample_query();
    business.additional_info = "Business class".to_string();

    let economy_price = service.predict(&economy).unwrap().predicted_price;
    let business_price = service.predict(&business).unwrap().predicted_price;
    assert!(business_price > economy_price);
}

#[test]
fn selection_mask_flows_through_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();

    // Keep every other column and shrink the model to match.
    let mut transform = sample::sample_transform();
    let kept: Vec<usize> = (0..transform.pre_mask_width()).step_by(2).collect();
    let width = kept.len();
    transform.selection_mask = Some(kept);

    let mut model = sample::sample_model();
    model.num_features = width;
    // Sample trees split on columns 9/10/29/3; post-mask widths shift,
    // so retarget the splits onto surviving low columns.
    for tree in &mut model.trees {
        for node in &mut tree.nodes {
            if node.feature_idx >= 0 {
                node.feature_idx %= width as i32;
            }
        }
    }

    let transform_path = dir.path().join("transform.json");
    let model_path = dir.path().join("model.json");
    transform.save_json(&transform_path).unwrap();
    model.save_json(&model_path).unwrap();

    let artifacts = ArtifactSet::load(&transform_path, &model_path).unwrap();
    let service = PredictionService::new(artifacts);
    let result = service.predict(&sample::sample_query()).unwrap();
    assert!(result.predicted_price.is_finite());
}
