//! Dual-criterion bone-event detection
//!
//! A patient qualifies as having a bone event through either of two
//! independent paths over the procedure table:
//!
//! - *Coded path*: any procedure whose concept id is in the configured
//!   bone-event id set.
//! - *Cross-reference path*: at least one fracture-type procedure (by
//!   free-text pattern) followed strictly later by any radiation-type
//!   procedure. The fracture procedures are the contributing rows; the
//!   radiation row only gates qualification.
//!
//! Contributing rows from both paths are pooled, deduplicated, and the
//! per-patient minimum procedure date becomes `first_bone_event_date`.
//! Rows without a parseable date cannot contribute a date; a patient whose
//! qualifying rows are all undated ends up censored.

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::PipelineConfig;
use crate::tables::ProcedureRow;
use crate::utils::TermMatcher;

/// Outcome of bone-event detection over the procedure table
#[derive(Debug, Default)]
pub struct BoneEventDetection {
    /// Earliest qualifying procedure date per patient
    pub event_dates: FxHashMap<i64, NaiveDate>,
    /// Patients qualifying via the coded path
    pub coded_patients: FxHashSet<i64>,
    /// Patients qualifying via the cross-reference path
    pub cross_reference_patients: FxHashSet<i64>,
}

/// Run both detection paths over the procedure table
#[must_use]
pub fn detect_bone_events(
    procedures: &[ProcedureRow],
    config: &PipelineConfig,
) -> BoneEventDetection {
    let fracture_matcher = TermMatcher::new(&config.fracture_patterns);
    let radiation_matcher = TermMatcher::new(&config.radiation_patterns);
    let coded_ids = config.bone_event_id_set();

    // Earliest fracture and latest radiation per patient. "Any radiation
    // strictly after the earliest fracture" reduces to comparing these two.
    let mut earliest_fracture: FxHashMap<i64, NaiveDate> = FxHashMap::default();
    let mut latest_radiation: FxHashMap<i64, NaiveDate> = FxHashMap::default();
    let mut fracture_rows: Vec<&ProcedureRow> = Vec::new();

    for row in procedures {
        let Some(name) = row.concept_name.as_deref() else {
            continue;
        };
        let name_lower = name.to_lowercase();

        if fracture_matcher.matches_lower(&name_lower) {
            fracture_rows.push(row);
            if let Some(date) = row.procedure_date {
                earliest_fracture
                    .entry(row.person_id)
                    .and_modify(|d| *d = (*d).min(date))
                    .or_insert(date);
            }
        }

        if radiation_matcher.matches_lower(&name_lower) {
            if let Some(date) = row.procedure_date {
                latest_radiation
                    .entry(row.person_id)
                    .and_modify(|d| *d = (*d).max(date))
                    .or_insert(date);
            }
        }
    }

    let mut cross_reference_patients: FxHashSet<i64> = FxHashSet::default();
    for (person_id, fracture_date) in &earliest_fracture {
        if latest_radiation
            .get(person_id)
            .is_some_and(|radiation_date| radiation_date > fracture_date)
        {
            cross_reference_patients.insert(*person_id);
        }
    }

    // Pool contributing rows from both paths and deduplicate repeated
    // procedure records before taking the per-patient minimum.
    let mut pooled: FxHashSet<&ProcedureRow> = FxHashSet::default();
    for row in &fracture_rows {
        if cross_reference_patients.contains(&row.person_id) {
            pooled.insert(*row);
        }
    }

    let mut coded_patients: FxHashSet<i64> = FxHashSet::default();
    for row in procedures {
        if row
            .concept_id
            .is_some_and(|concept_id| coded_ids.contains(&concept_id))
        {
            coded_patients.insert(row.person_id);
            pooled.insert(row);
        }
    }

    let mut event_dates: FxHashMap<i64, NaiveDate> = FxHashMap::default();
    for row in pooled {
        if let Some(date) = row.procedure_date {
            event_dates
                .entry(row.person_id)
                .and_modify(|d| *d = (*d).min(date))
                .or_insert(date);
        }
    }

    BoneEventDetection {
        event_dates,
        coded_patients,
        cross_reference_patients,
    }
}
