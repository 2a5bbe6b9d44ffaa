//! Tests for cohort assembly and labelling

use sre_features::cohort::CohortBuilder;
use sre_features::config::PipelineConfig;
use sre_features::tables::{
    DeathAdapter, PersonAdapter, ProcedureAdapter, TableAdapter, VisitAdapter,
};

use crate::utils::{d, death_batch, person_batch, procedure_batch, visit_batch};

fn build(
    persons: &[(i64, &str, i32)],
    deaths: &[(i64, Option<&str>)],
    visits: &[(i64, Option<&str>)],
    procedures: &[(i64, i64, &str, &str)],
    config: &PipelineConfig,
) -> sre_features::cohort::Cohort {
    CohortBuilder::new(config)
        .with_persons(PersonAdapter::from_record_batch(&person_batch(persons)).unwrap())
        .with_deaths(DeathAdapter::from_record_batch(&death_batch(deaths)).unwrap())
        .with_visits(VisitAdapter::from_record_batch(&visit_batch(visits)).unwrap())
        .with_procedures(ProcedureAdapter::from_record_batch(&procedure_batch(procedures)).unwrap())
        .build()
        .unwrap()
}

#[test]
fn censoring_date_prefers_death_over_last_visit() {
    let config = PipelineConfig::default();
    let cohort = build(
        &[(1, "MALE", 1950), (2, "FEMALE", 1960), (3, "MALE", 1970)],
        &[(1, Some("2023-05-01"))],
        &[
            (1, Some("2024-01-01")),
            (2, Some("2022-03-01")),
            (2, Some("2023-03-01")),
        ],
        &[],
        &config,
    );

    // Patient 1 has both records; death wins even though the visit is later
    let p1 = &cohort.patients[0];
    assert_eq!(p1.last_of_death_or_visit, d("2023-05-01"));
    // Patient 2 has visits only; the latest visit end date is used
    let p2 = &cohort.patients[1];
    assert_eq!(p2.last_of_death_or_visit, d("2023-03-01"));
    // Patient 3 has neither and is dropped
    assert_eq!(cohort.len(), 2);
    assert_eq!(cohort.stats.dropped_no_followup, 1);
    assert_eq!(cohort.stats.input_persons, 3);
}

#[test]
fn every_patient_has_a_censoring_date() {
    let config = PipelineConfig::default();
    let cohort = build(
        &[(1, "MALE", 1950), (2, "FEMALE", 1960), (3, "MALE", 1970)],
        &[(2, Some("2021-01-01"))],
        &[(1, Some("2024-01-01")), (3, None)],
        &[],
        &config,
    );

    // Patient 3's only visit has a null end date, so it is dropped
    assert_eq!(cohort.len(), 2);
    for patient in &cohort.patients {
        assert!(patient.death_date.is_some() || patient.last_activity_date.is_some());
    }
}

#[test]
fn malformed_dates_parse_to_null_not_failure() {
    let config = PipelineConfig::default();
    let cohort = build(
        &[(1, "MALE", 1950)],
        &[],
        &[(1, Some("not-a-date"))],
        &[],
        &config,
    );

    // The only visit date is unparseable, so the patient has no follow-up
    assert!(cohort.is_empty());
    assert_eq!(cohort.stats.dropped_no_followup, 1);
}

#[test]
fn event_status_iff_event_date() {
    let config = PipelineConfig::default();
    // Patient 1 qualifies via cross-reference; patient 2 has a fracture but
    // no radiation and stays censored
    let cohort = build(
        &[(1, "MALE", 1950), (2, "FEMALE", 1960)],
        &[],
        &[(1, Some("2024-01-01")), (2, Some("2024-01-01"))],
        &[
            (1, 0, "vertebral fracture assessment", "2022-01-01"),
            (1, 0, "radiotherapy", "2022-06-01"),
            (2, 0, "bone fracture immobilization", "2022-01-01"),
        ],
        &config,
    );

    for patient in &cohort.patients {
        assert_eq!(
            patient.event_status() == 1,
            patient.first_bone_event_date.is_some()
        );
    }
    let p1 = &cohort.patients[0];
    assert_eq!(p1.first_bone_event_date, Some(d("2022-01-01")));
    assert_eq!(p1.ref_date(), d("2022-01-01"));
    let p2 = &cohort.patients[1];
    assert_eq!(p2.event_status(), 0);
    assert_eq!(p2.ref_date(), d("2024-01-01"));
    assert_eq!(cohort.stats.event_patients, 1);
}

#[test]
fn detection_counters_cover_admitted_patients_only() {
    let config = PipelineConfig::default();
    // Patient 2 qualifies via the coded path (2_110_698 is in the default
    // id set) but has no follow-up record and is dropped
    let cohort = build(
        &[(1, "MALE", 1950), (2, "FEMALE", 1960)],
        &[],
        &[(1, Some("2024-01-01"))],
        &[(2, 2_110_698, "bone surgery", "2022-01-01")],
        &config,
    );

    assert_eq!(cohort.len(), 1);
    assert_eq!(cohort.stats.dropped_no_followup, 1);
    assert_eq!(cohort.stats.event_patients, 0);
    assert_eq!(cohort.stats.coded_event_patients, 0);
    assert_eq!(cohort.stats.cross_reference_patients, 0);
}

#[test]
fn age_uses_configured_as_of_year() {
    let config = PipelineConfig {
        as_of_year: 2020,
        ..PipelineConfig::default()
    };
    let cohort = build(
        &[(1, "MALE", 1950)],
        &[],
        &[(1, Some("2024-01-01"))],
        &[],
        &config,
    );
    assert_eq!(cohort.patients[0].age, Some(70));
}

#[test]
fn zero_event_cohort_is_not_an_error() {
    let config = PipelineConfig::default();
    let cohort = build(
        &[(1, "MALE", 1950)],
        &[],
        &[(1, Some("2024-01-01"))],
        &[(1, 0, "appendectomy", "2022-01-01")],
        &config,
    );
    assert_eq!(cohort.len(), 1);
    assert_eq!(cohort.stats.event_patients, 0);
    assert_eq!(cohort.patients[0].event_status(), 0);
}
