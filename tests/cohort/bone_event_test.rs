//! Tests for the dual-criterion bone-event detection

use sre_features::cohort::bone_event::detect_bone_events;
use sre_features::config::PipelineConfig;

use crate::utils::{d, procedure};

// A concept id from the default coded bone-event set
const CODED_ID: i64 = 2_110_698;
// A concept id outside the set
const OTHER_ID: i64 = 999;

#[test]
fn coded_path_uses_earliest_procedure_date() {
    let config = PipelineConfig::default();
    let procedures = vec![
        procedure(1, CODED_ID, "bone surgery", "2021-06-01"),
        procedure(1, CODED_ID, "bone surgery", "2021-03-01"),
        procedure(2, OTHER_ID, "appendectomy", "2021-03-01"),
    ];

    let detection = detect_bone_events(&procedures, &config);
    assert_eq!(detection.event_dates.get(&1), Some(&d("2021-03-01")));
    assert!(!detection.event_dates.contains_key(&2));
    assert_eq!(detection.coded_patients.len(), 1);
    assert_eq!(detection.cross_reference_patients.len(), 0);
}

#[test]
fn cross_reference_requires_radiation_strictly_after_fracture() {
    let config = PipelineConfig::default();
    // Patient 1: radiation after the fracture - qualifies
    // Patient 2: radiation on the same day - does not qualify
    // Patient 3: radiation before the fracture - does not qualify
    // Patient 4: fracture but no radiation at all - does not qualify
    let procedures = vec![
        procedure(1, OTHER_ID, "Closed reduction of Vertebral Fracture", "2022-01-01"),
        procedure(1, OTHER_ID, "Radiotherapy session", "2022-06-01"),
        procedure(2, OTHER_ID, "pathologic fracture repair", "2022-01-01"),
        procedure(2, OTHER_ID, "radiation therapy", "2022-01-01"),
        procedure(3, OTHER_ID, "bone fracture immobilization", "2022-05-01"),
        procedure(3, OTHER_ID, "radiation therapy", "2022-01-01"),
        procedure(4, OTHER_ID, "vertebral fracture assessment", "2022-01-01"),
    ];

    let detection = detect_bone_events(&procedures, &config);
    assert_eq!(detection.event_dates.get(&1), Some(&d("2022-01-01")));
    assert!(!detection.event_dates.contains_key(&2));
    assert!(!detection.event_dates.contains_key(&3));
    assert!(!detection.event_dates.contains_key(&4));
    assert_eq!(detection.cross_reference_patients.len(), 1);
}

#[test]
fn cross_reference_event_date_is_earliest_fracture() {
    let config = PipelineConfig::default();
    // Radiation falls between the two fractures; qualification compares
    // against the earliest fracture and the event date is that fracture.
    let procedures = vec![
        procedure(1, OTHER_ID, "vertebral fracture assessment", "2021-02-01"),
        procedure(1, OTHER_ID, "vertebral fracture assessment", "2021-08-01"),
        procedure(1, OTHER_ID, "radiotherapy", "2021-05-01"),
    ];

    let detection = detect_bone_events(&procedures, &config);
    assert_eq!(detection.event_dates.get(&1), Some(&d("2021-02-01")));
}

#[test]
fn both_paths_pool_to_minimum_date() {
    let config = PipelineConfig::default();
    // Coded event earlier than the fracture: the pooled minimum wins
    let procedures = vec![
        procedure(1, CODED_ID, "bone surgery", "2020-06-01"),
        procedure(1, OTHER_ID, "bone fracture repair", "2021-01-01"),
        procedure(1, OTHER_ID, "radiotherapy", "2021-06-01"),
    ];

    let detection = detect_bone_events(&procedures, &config);
    assert_eq!(detection.event_dates.get(&1), Some(&d("2020-06-01")));
    assert_eq!(detection.coded_patients.len(), 1);
    assert_eq!(detection.cross_reference_patients.len(), 1);
}

#[test]
fn duplicate_rows_are_deduplicated() {
    let config = PipelineConfig::default();
    let row = procedure(1, CODED_ID, "bone surgery", "2021-03-01");
    let procedures = vec![row.clone(), row];

    let detection = detect_bone_events(&procedures, &config);
    assert_eq!(detection.event_dates.get(&1), Some(&d("2021-03-01")));
    assert_eq!(detection.coded_patients.len(), 1);
}

#[test]
fn undated_qualifying_rows_yield_no_event_date() {
    let config = PipelineConfig::default();
    let mut row = procedure(1, CODED_ID, "bone surgery", "2021-03-01");
    row.procedure_date = None;

    let detection = detect_bone_events(&[row], &config);
    assert!(detection.event_dates.is_empty());
}

#[test]
fn empty_procedure_table_yields_no_events() {
    let config = PipelineConfig::default();
    let detection = detect_bone_events(&[], &config);
    assert!(detection.event_dates.is_empty());
    assert_eq!(detection.coded_patients.len(), 0);
    assert_eq!(detection.cross_reference_patients.len(), 0);
}
