//! Windowed drug-exposure indicators
//!
//! For each configured drug class and observation window, a binary column
//! marking whether the patient has at least one exposure whose concept name
//! matches the class vocabulary and whose start date falls inside the
//! window. A single exposure row may count toward several classes. Unlike
//! the lab columns, every class-window column is always materialized, an
//! empty cohort included.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use super::window;
use crate::cohort::Cohort;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::features::table::FeatureTable;
use crate::tables::DrugExposureRow;
use crate::utils::TermMatcher;

/// A prefiltered exposure, with its class memberships as a bit mask
struct DrugObs {
    person_id: i64,
    date: NaiveDate,
    class_mask: u64,
}

/// Aggregate drug-class indicators onto the feature table
pub fn add_drug_features(
    table: &mut FeatureTable,
    cohort: &Cohort,
    exposures: &[DrugExposureRow],
    config: &PipelineConfig,
) -> Result<()> {
    debug_assert!(config.drug_classes.len() <= 64);

    let matchers: Vec<TermMatcher> = config
        .drug_classes
        .iter()
        .map(|class| TermMatcher::new(&class.terms))
        .collect();

    // Coarse prefilter: cohort members, global window date range, and a
    // name match against the union of the class vocabularies. Each kept
    // row is tagged once with all the classes it belongs to. An empty
    // cohort has no date range and keeps nothing; the indicator columns
    // are still emitted below, zero-length.
    let mut observations: Vec<DrugObs> = Vec::new();
    if let Some((range_start, range_end)) = window::global_date_range(cohort, &config.windows) {
        for row in exposures {
            let Some(date) = row.start_date else {
                continue;
            };
            if date < range_start || date > range_end {
                continue;
            }
            if table.row_of(row.person_id).is_none() {
                continue;
            }
            let Some(name) = row.concept_name.as_deref() else {
                continue;
            };
            let name_lower = name.to_lowercase();
            let mut class_mask = 0u64;
            for (i, matcher) in matchers.iter().enumerate() {
                if matcher.matches_lower(&name_lower) {
                    class_mask |= 1 << i;
                }
            }
            if class_mask != 0 {
                observations.push(DrugObs {
                    person_id: row.person_id,
                    date,
                    class_mask,
                });
            }
        }
    }

    log::info!(
        "Filtered to {} drug exposures across {} classes",
        observations.len(),
        config.drug_classes.len()
    );

    // Per window: broadcast-join bounds, filter inclusively, OR the class
    // masks per patient, then emit one 0/1 column per class.
    for spec in &config.windows {
        let bounds_by_patient = window::patient_windows(cohort, spec);

        let mut exposed: FxHashMap<i64, u64> = FxHashMap::default();
        for obs in &observations {
            if bounds_by_patient
                .get(&obs.person_id)
                .is_some_and(|bounds| bounds.contains(obs.date))
            {
                *exposed.entry(obs.person_id).or_insert(0) |= obs.class_mask;
            }
        }

        for (i, class) in config.drug_classes.iter().enumerate() {
            let mut values = vec![0.0; table.num_rows()];
            for (person_id, mask) in &exposed {
                if mask & (1 << i) != 0 {
                    if let Some(row) = table.row_of(*person_id) {
                        values[row] = 1.0;
                    }
                }
            }
            table.push_column(format!("{}_{}", class.key, spec.name), values)?;
        }
    }

    Ok(())
}
