//! Cohort and outcome-label construction
//!
//! Builds one [`Patient`] per surviving `person_id` from the demographics,
//! death, visit and procedure tables: a censoring date
//! (`last_of_death_or_visit`), the dual-criterion bone-event date, and the
//! derived event status. Patients with neither a death record nor a visit
//! record have no usable follow-up and are dropped; the drop is counted in
//! [`CohortStats`] so the shrinkage is auditable.

pub mod bone_event;
pub mod builder;

pub use builder::CohortBuilder;

use std::fmt;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

/// One patient of the study cohort
#[derive(Debug, Clone)]
pub struct Patient {
    /// Patient identifier
    pub person_id: i64,
    /// Gender concept name
    pub gender: Option<String>,
    /// Year of birth
    pub year_of_birth: Option<i32>,
    /// Age at the configured as-of year
    pub age: Option<i32>,
    /// Date of death, if recorded
    pub death_date: Option<NaiveDate>,
    /// Latest visit end date, if any visit was recorded
    pub last_activity_date: Option<NaiveDate>,
    /// Censoring date: death date if present, else last activity date.
    /// Non-null by construction; patients with neither are not admitted.
    pub last_of_death_or_visit: NaiveDate,
    /// Earliest qualifying bone-event date; `None` means right-censored
    pub first_bone_event_date: Option<NaiveDate>,
}

impl Patient {
    /// Outcome label: 1 iff a bone event was detected
    #[must_use]
    pub fn event_status(&self) -> i32 {
        i32::from(self.first_bone_event_date.is_some())
    }

    /// Reference date anchoring the observation windows: the bone-event
    /// date for event patients, the censoring date otherwise
    #[must_use]
    pub fn ref_date(&self) -> NaiveDate {
        self.first_bone_event_date
            .unwrap_or(self.last_of_death_or_visit)
    }
}

/// Counters describing how the cohort was assembled
#[derive(Debug, Clone, Default)]
pub struct CohortStats {
    /// Rows in the person table before any filtering
    pub input_persons: usize,
    /// Persons dropped for having neither a death nor a visit record
    pub dropped_no_followup: usize,
    /// Admitted patients with a bone event (either detection path)
    pub event_patients: usize,
    /// Admitted patients qualifying via the coded-procedure path
    pub coded_event_patients: usize,
    /// Admitted patients qualifying via the fracture-then-radiation path
    pub cross_reference_patients: usize,
}

impl fmt::Display for CohortStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cohort Statistics:")?;
        writeln!(f, "  Input Persons: {}", self.input_persons)?;
        writeln!(f, "  Dropped (no follow-up): {}", self.dropped_no_followup)?;
        writeln!(f, "  Event Patients: {}", self.event_patients)?;
        writeln!(f, "  Coded-Path Patients: {}", self.coded_event_patients)?;
        writeln!(
            f,
            "  Cross-Reference Patients: {}",
            self.cross_reference_patients
        )?;
        Ok(())
    }
}

/// The assembled study cohort
#[derive(Debug, Clone)]
pub struct Cohort {
    /// Patients in person-table order
    pub patients: Vec<Patient>,
    /// Assembly counters
    pub stats: CohortStats,
}

impl Cohort {
    /// Number of patients in the cohort
    #[must_use]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// Whether the cohort is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Map from `person_id` to row position
    #[must_use]
    pub fn index(&self) -> FxHashMap<i64, usize> {
        self.patients
            .iter()
            .enumerate()
            .map(|(i, p)| (p.person_id, i))
            .collect()
    }
}
