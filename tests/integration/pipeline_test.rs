//! End-to-end pipeline tests over in-memory source tables

use sre_features::config::PipelineConfig;
use sre_features::pipeline::{SourceTables, run_pipeline};
use sre_features::PipelineError;

use crate::utils::{
    death_batch, drug_batch, measurement_batch, person_batch, procedure_batch, visit_batch,
};

/// Three-patient fixture:
/// - Patient 1 ("P"): visit ending 2024-01-01, vertebral fracture on
///   2022-01-01 followed by radiotherapy on 2022-06-01, labs and a BMA
///   exposure inside the 6m window
/// - Patient 2 ("Q"): fracture but no radiation, censored
/// - Patient 3: neither death nor visit record, dropped
fn fixture() -> SourceTables {
    SourceTables {
        person: vec![person_batch(&[
            (1, "FEMALE", 1955),
            (2, "MALE", 1948),
            (3, "FEMALE", 1970),
        ])],
        death: vec![death_batch(&[])],
        visit: vec![visit_batch(&[
            (1, Some("2024-01-01")),
            (2, Some("2024-01-01")),
        ])],
        procedure: vec![procedure_batch(&[
            (1, 0, "vertebral fracture assessment", "2022-01-01"),
            (1, 0, "radiotherapy planning", "2022-06-01"),
            (2, 0, "bone fracture immobilization", "2022-01-01"),
        ])],
        measurement: vec![measurement_batch(&[
            // Inside patient 1's 6m window [2021-04-06, 2021-09-03]
            (1, "Heart rate", "2021-05-01", 10.0),
            (1, "Heart rate", "2021-06-01", 15.0),
        ])],
        drug: vec![drug_batch(&[
            (1, "zoledronic acid", "2021-05-10"),
            // Outside every window for patient 2 (ref 2024-01-01)
            (2, "cisplatin", "2021-05-10"),
        ])],
    }
}

fn test_config() -> PipelineConfig {
    PipelineConfig {
        min_lab_support: 2,
        ..PipelineConfig::default()
    }
}

#[test]
fn end_to_end_scenario() {
    let config = test_config();
    let table = run_pipeline(&fixture(), &config).unwrap();

    // Patient 3 is dropped for having no follow-up at all
    assert_eq!(table.person_ids(), &[1, 2]);
    assert_eq!(table.event_status(), &[1, 0]);

    // Lab features anchored to patient 1's event date
    assert_eq!(table.column("heart_rate_last_6m").unwrap(), &[15.0, 0.0]);
    assert_eq!(table.column("heart_rate_delta_6m").unwrap(), &[5.0, 0.0]);

    // Drug indicator inside the 6m window for patient 1 only
    assert_eq!(table.column("bmas_6m").unwrap(), &[1.0, 0.0]);
    assert_eq!(table.column("chemo_6m").unwrap(), &[0.0, 0.0]);
    assert_eq!(table.column("chemo_12m").unwrap(), &[0.0, 0.0]);
}

#[test]
fn pipeline_is_idempotent() {
    let config = test_config();
    let tables = fixture();

    let first = run_pipeline(&tables, &config).unwrap().to_record_batch().unwrap();
    let second = run_pipeline(&tables, &config).unwrap().to_record_batch().unwrap();

    assert_eq!(first, second);
}

#[test]
fn output_batch_carries_identity_and_label_columns() {
    let config = test_config();
    let batch = run_pipeline(&fixture(), &config)
        .unwrap()
        .to_record_batch()
        .unwrap();

    for column in [
        "person_id",
        "gender_concept_name",
        "year_of_birth",
        "age",
        "last_of_death_or_visit",
        "first_bone_event_date",
        "t_ref",
        "event_status",
    ] {
        assert!(batch.schema().index_of(column).is_ok(), "{column}");
    }
    assert_eq!(batch.num_rows(), 2);
}

#[test]
fn missing_required_column_is_fatal() {
    let mut tables = fixture();
    // A person table lacking the demographics columns must fail loudly
    tables.person = vec![death_batch(&[(1, Some("2023-01-01"))])];

    let err = run_pipeline(&tables, &test_config()).unwrap_err();
    match err {
        PipelineError::MissingColumn { table, column } => {
            assert_eq!(table, "person");
            assert_eq!(column, "gender_concept_name");
        }
        other => panic!("expected MissingColumn, got {other}"),
    }
}

#[test]
fn empty_sources_yield_empty_table() {
    let config = test_config();
    let tables = SourceTables {
        person: vec![person_batch(&[])],
        death: vec![death_batch(&[])],
        visit: vec![visit_batch(&[])],
        procedure: vec![procedure_batch(&[])],
        measurement: vec![measurement_batch(&[])],
        drug: vec![drug_batch(&[])],
    };

    let table = run_pipeline(&tables, &config).unwrap();
    assert_eq!(table.num_rows(), 0);
    // No lab columns (nothing reaches support); the six drug indicator
    // columns still materialize, zero-length
    assert_eq!(
        table.column_names(),
        vec![
            "bmas_6m",
            "chemo_6m",
            "targeted_6m",
            "bmas_12m",
            "chemo_12m",
            "targeted_12m"
        ]
    );
}
