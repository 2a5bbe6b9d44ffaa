//! Per-patient observation window derivation
//!
//! Pure date arithmetic around [`WindowSpec::bounds`]. The lab and the drug
//! aggregator both obtain their window boundaries through the helpers here,
//! so the two call sites compute bit-identical bounds for every patient.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

pub use crate::config::{WindowBounds, WindowSpec};

use crate::cohort::Cohort;

/// Window boundaries for every patient in the cohort, keyed by `person_id`
#[must_use]
pub fn patient_windows(cohort: &Cohort, spec: &WindowSpec) -> FxHashMap<i64, WindowBounds> {
    cohort
        .patients
        .iter()
        .map(|patient| (patient.person_id, spec.bounds(patient.ref_date())))
        .collect()
}

/// The global [min start, max end] range across all patients and windows.
///
/// Used as a coarse prefilter on event tables; it scopes the working set
/// without affecting results. `None` for an empty cohort or window list.
#[must_use]
pub fn global_date_range(
    cohort: &Cohort,
    windows: &[WindowSpec],
) -> Option<(NaiveDate, NaiveDate)> {
    let mut range: Option<(NaiveDate, NaiveDate)> = None;
    for patient in &cohort.patients {
        let ref_date = patient.ref_date();
        for spec in windows {
            let bounds = spec.bounds(ref_date);
            range = Some(match range {
                Some((min, max)) => (min.min(bounds.start), max.max(bounds.end)),
                None => (bounds.start, bounds.end),
            });
        }
    }
    range
}
