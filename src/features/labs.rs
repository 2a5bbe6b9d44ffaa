//! Windowed lab/vital feature aggregation
//!
//! For every configured lab concept and observation window, computes the
//! per-patient chronologically last in-window value and the last-minus-first
//! delta. A (concept, window) pair only materializes its two columns when
//! the in-window row count across the whole cohort reaches the configured
//! support threshold; below it the columns are omitted entirely rather than
//! zero-filled. Rows with a null numeric value count toward the support
//! threshold but contribute no values. Patients without an in-window
//! measurement get 0 in materialized columns, and a single in-window
//! measurement yields delta 0.

use chrono::NaiveDate;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use super::window;
use crate::cohort::Cohort;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::features::table::FeatureTable;
use crate::tables::MeasurementRow;
use crate::utils::sanitize_concept_name;

/// A prefiltered measurement, with the concept resolved to its vocabulary index
struct LabObs {
    person_id: i64,
    concept: usize,
    date: NaiveDate,
    value: Option<f64>,
}

/// Per (concept, window) reduction state
#[derive(Default)]
struct ConceptWindow {
    /// In-window rows across the whole cohort, null-valued rows included
    count: usize,
    /// (first, last) non-null in-window value per patient, in
    /// chronological order
    first_last: FxHashMap<i64, (f64, f64)>,
}

/// Aggregate lab features onto the feature table
pub fn add_lab_features(
    table: &mut FeatureTable,
    cohort: &Cohort,
    measurements: &[MeasurementRow],
    config: &PipelineConfig,
) -> Result<()> {
    let Some((range_start, range_end)) = window::global_date_range(cohort, &config.windows)
    else {
        log::warn!("empty cohort or no windows configured; skipping lab features");
        return Ok(());
    };

    let concept_index: FxHashMap<&str, usize> = config
        .lab_concepts
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    // Coarse prefilter: cohort members, global window date range, vocabulary
    // concepts. Rows without a date carry no information and are dropped;
    // rows without a numeric value are kept because they count toward the
    // support threshold.
    let mut observations: Vec<LabObs> = Vec::new();
    for row in measurements {
        let Some(date) = row.measurement_date else {
            continue;
        };
        if date < range_start || date > range_end {
            continue;
        }
        if table.row_of(row.person_id).is_none() {
            continue;
        }
        let Some(concept) = row
            .concept_name
            .as_deref()
            .and_then(|name| concept_index.get(name).copied())
        else {
            continue;
        };
        observations.push(LabObs {
            person_id: row.person_id,
            concept,
            date,
            value: row.value,
        });
    }

    log::info!(
        "Filtered to {} measurements for {} lab concepts",
        observations.len(),
        config.lab_concepts.len()
    );

    // One reduction per window: broadcast-join the patient's bounds, filter
    // inclusively, fix chronological order per (concept, patient) with a
    // stable sort (same-day rows keep source order), then fold first/last.
    let mut per_window: Vec<Vec<ConceptWindow>> = Vec::with_capacity(config.windows.len());
    for spec in &config.windows {
        let bounds_by_patient = window::patient_windows(cohort, spec);

        let mut in_window: Vec<&LabObs> = observations
            .iter()
            .filter(|obs| {
                bounds_by_patient
                    .get(&obs.person_id)
                    .is_some_and(|bounds| bounds.contains(obs.date))
            })
            .collect();
        in_window.sort_by_key(|obs| (obs.concept, obs.person_id, obs.date));

        log::info!("{} window: {} lab records", spec.name, in_window.len());

        let mut stats: Vec<ConceptWindow> = (0..config.lab_concepts.len())
            .map(|_| ConceptWindow::default())
            .collect();
        for ((concept, person_id), run) in &in_window
            .iter()
            .chunk_by(|obs| (obs.concept, obs.person_id))
        {
            // Every row counts toward support; first/last skip null values
            let mut count = 0;
            let mut first = None;
            let mut last = None;
            for obs in run {
                count += 1;
                if let Some(value) = obs.value {
                    first = first.or(Some(value));
                    last = Some(value);
                }
            }
            let cell = &mut stats[concept];
            cell.count += count;
            if let (Some(first), Some(last)) = (first, last) {
                cell.first_last.insert(person_id, (first, last));
            }
        }
        per_window.push(stats);
    }

    // Column emission: vocabulary order outer, window order inner, delta
    // before last. Under-supported pairs are omitted, not zero-filled.
    for (ci, concept) in config.lab_concepts.iter().enumerate() {
        let token = sanitize_concept_name(concept, config.sanitize_prefix_len);
        for (wi, spec) in config.windows.iter().enumerate() {
            let cell = &per_window[wi][ci];
            if cell.count < config.min_lab_support {
                if cell.count > 0 {
                    log::debug!(
                        "insufficient support for {concept} in {} window ({} < {})",
                        spec.name,
                        cell.count,
                        config.min_lab_support
                    );
                }
                continue;
            }

            let mut delta = vec![0.0; table.num_rows()];
            let mut last = vec![0.0; table.num_rows()];
            for (person_id, (first_value, last_value)) in &cell.first_last {
                if let Some(row) = table.row_of(*person_id) {
                    delta[row] = last_value - first_value;
                    last[row] = *last_value;
                }
            }
            table.push_column(format!("{token}_delta_{}", spec.name), delta)?;
            table.push_column(format!("{token}_last_{}", spec.name), last)?;
        }
    }

    Ok(())
}
