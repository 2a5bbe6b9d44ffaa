//! Tests for windowed drug-exposure indicators

use sre_features::FeatureTable;
use sre_features::config::PipelineConfig;
use sre_features::features::add_drug_features;

use crate::utils::{cohort_of, censored_patient, event_patient, exposure};

#[test]
fn all_six_columns_are_always_materialized() {
    let config = PipelineConfig::default();
    let cohort = cohort_of(vec![event_patient(1, "2024-01-01", "2022-01-01")]);
    let mut table = FeatureTable::from_cohort(&cohort);

    add_drug_features(&mut table, &cohort, &[], &config).unwrap();

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

#[test]
fn empty_cohort_still_materializes_all_columns() {
    let config = PipelineConfig::default();
    let cohort = cohort_of(vec![]);
    let mut table = FeatureTable::from_cohort(&cohort);

    let exposures = vec![exposure(1, "zoledronic acid", "2021-05-10")];
    add_drug_features(&mut table, &cohort, &exposures, &config).unwrap();

    assert_eq!(table.num_feature_columns(), 6);
    assert_eq!(table.column("bmas_6m").unwrap().len(), 0);
}

#[test]
fn exposure_inside_window_sets_indicator() {
    let config = PipelineConfig::default();
    // Event on 2022-01-01: 6m window [2021-04-06, 2021-09-03],
    // 12m window [2020-07-10, 2021-07-05]
    let cohort = cohort_of(vec![
        event_patient(1, "2024-01-01", "2022-01-01"),
        censored_patient(2, "2024-01-01"),
    ]);
    let mut table = FeatureTable::from_cohort(&cohort);

    let exposures = vec![
        // In patient 1's 6m window and 12m window
        exposure(1, "zoledronic acid", "2021-05-10"),
        // In patient 1's 12m window only
        exposure(1, "cisplatin", "2020-09-01"),
    ];
    add_drug_features(&mut table, &cohort, &exposures, &config).unwrap();

    assert_eq!(table.column("bmas_6m").unwrap(), &[1.0, 0.0]);
    assert_eq!(table.column("bmas_12m").unwrap(), &[1.0, 0.0]);
    assert_eq!(table.column("chemo_6m").unwrap(), &[0.0, 0.0]);
    assert_eq!(table.column("chemo_12m").unwrap(), &[1.0, 0.0]);
    assert_eq!(table.column("targeted_6m").unwrap(), &[0.0, 0.0]);
    assert_eq!(table.column("targeted_12m").unwrap(), &[0.0, 0.0]);
}

#[test]
fn matching_is_case_insensitive_substring() {
    let config = PipelineConfig::default();
    let cohort = cohort_of(vec![event_patient(1, "2024-01-01", "2022-01-01")]);
    let mut table = FeatureTable::from_cohort(&cohort);

    let exposures = vec![exposure(
        1,
        "100 ML Zoledronic Acid 0.04 MG/ML Injection",
        "2021-05-10",
    )];
    add_drug_features(&mut table, &cohort, &exposures, &config).unwrap();

    assert_eq!(table.column("bmas_6m").unwrap(), &[1.0]);
}

#[test]
fn exposure_in_blackout_gap_does_not_count() {
    let config = PipelineConfig::default();
    let cohort = cohort_of(vec![event_patient(1, "2024-01-01", "2022-01-01")]);
    let mut table = FeatureTable::from_cohort(&cohort);

    // One day after the 6m window end: inside the leakage-avoidance gap
    let exposures = vec![exposure(1, "zoledronic acid", "2021-09-04")];
    add_drug_features(&mut table, &cohort, &exposures, &config).unwrap();

    assert_eq!(table.column("bmas_6m").unwrap(), &[0.0]);
}

#[test]
fn window_boundaries_are_inclusive() {
    let config = PipelineConfig::default();
    let cohort = cohort_of(vec![event_patient(1, "2024-01-01", "2022-01-01")]);
    let mut table = FeatureTable::from_cohort(&cohort);

    let exposures = vec![
        exposure(1, "zoledronic acid", "2021-04-06"),
        exposure(1, "cisplatin", "2021-09-03"),
    ];
    add_drug_features(&mut table, &cohort, &exposures, &config).unwrap();

    assert_eq!(table.column("bmas_6m").unwrap(), &[1.0]);
    assert_eq!(table.column("chemo_6m").unwrap(), &[1.0]);
}

#[test]
fn one_row_can_count_toward_several_classes() {
    let mut config = PipelineConfig::default();
    // Make the chemo vocabulary overlap bmas for this test
    config.drug_classes[1].terms.push("zoledronic acid".to_string());
    let cohort = cohort_of(vec![event_patient(1, "2024-01-01", "2022-01-01")]);
    let mut table = FeatureTable::from_cohort(&cohort);

    let exposures = vec![exposure(1, "zoledronic acid", "2021-05-10")];
    add_drug_features(&mut table, &cohort, &exposures, &config).unwrap();

    assert_eq!(table.column("bmas_6m").unwrap(), &[1.0]);
    assert_eq!(table.column("chemo_6m").unwrap(), &[1.0]);
}

#[test]
fn non_vocabulary_drugs_are_ignored() {
    let config = PipelineConfig::default();
    let cohort = cohort_of(vec![event_patient(1, "2024-01-01", "2022-01-01")]);
    let mut table = FeatureTable::from_cohort(&cohort);

    let exposures = vec![exposure(1, "aspirin 81 MG Oral Tablet", "2021-05-10")];
    add_drug_features(&mut table, &cohort, &exposures, &config).unwrap();

    for name in table.column_names() {
        assert_eq!(table.column(name).unwrap(), &[0.0], "{name}");
    }
}
