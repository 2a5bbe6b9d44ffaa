//! Cohort builder
//!
//! Assembles the study cohort from typed source-table rows: reduces visits
//! to a last-activity date per patient, joins death dates, derives the
//! censoring date, drops patients without any follow-up, and attaches the
//! bone-event label produced by [`bone_event::detect_bone_events`].

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use super::bone_event;
use super::{Cohort, CohortStats, Patient};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::tables::{DeathRow, PersonRow, ProcedureRow, VisitRow};

/// Builder for constructing a cohort step by step
pub struct CohortBuilder<'a> {
    config: &'a PipelineConfig,
    persons: Vec<PersonRow>,
    deaths: Vec<DeathRow>,
    visits: Vec<VisitRow>,
    procedures: Vec<ProcedureRow>,
}

impl<'a> CohortBuilder<'a> {
    /// Create a new cohort builder for the given configuration
    #[must_use]
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            persons: Vec::new(),
            deaths: Vec::new(),
            visits: Vec::new(),
            procedures: Vec::new(),
        }
    }

    /// Set the person (demographics) rows
    #[must_use]
    pub fn with_persons(mut self, persons: Vec<PersonRow>) -> Self {
        self.persons = persons;
        self
    }

    /// Set the death rows
    #[must_use]
    pub fn with_deaths(mut self, deaths: Vec<DeathRow>) -> Self {
        self.deaths = deaths;
        self
    }

    /// Set the visit rows
    #[must_use]
    pub fn with_visits(mut self, visits: Vec<VisitRow>) -> Self {
        self.visits = visits;
        self
    }

    /// Set the procedure rows
    #[must_use]
    pub fn with_procedures(mut self, procedures: Vec<ProcedureRow>) -> Self {
        self.procedures = procedures;
        self
    }

    /// Build the cohort
    pub fn build(self) -> Result<Cohort> {
        log::info!(
            "Building cohort from {} persons, {} death rows, {} visits, {} procedures",
            self.persons.len(),
            self.deaths.len(),
            self.visits.len(),
            self.procedures.len()
        );

        // Last activity date: max visit end date per patient
        let mut last_activity: FxHashMap<i64, NaiveDate> = FxHashMap::default();
        for visit in &self.visits {
            if let Some(date) = visit.visit_end_date {
                last_activity
                    .entry(visit.person_id)
                    .and_modify(|d| *d = (*d).max(date))
                    .or_insert(date);
            }
        }

        // Death date per patient; undated death rows carry no information.
        // A patient with several dated rows keeps the first encountered.
        let mut death_dates: FxHashMap<i64, NaiveDate> = FxHashMap::default();
        for death in &self.deaths {
            if let Some(date) = death.death_date {
                death_dates.entry(death.person_id).or_insert(date);
            }
        }

        let detection = bone_event::detect_bone_events(&self.procedures, self.config);

        let mut stats = CohortStats {
            input_persons: self.persons.len(),
            ..CohortStats::default()
        };

        if detection.event_dates.is_empty() {
            log::warn!("no patients qualified for a bone event; all labels will be 0");
        }

        let mut patients = Vec::with_capacity(self.persons.len());
        for person in &self.persons {
            let death_date = death_dates.get(&person.person_id).copied();
            let last_activity_date = last_activity.get(&person.person_id).copied();

            let Some(last_of_death_or_visit) = death_date.or(last_activity_date) else {
                stats.dropped_no_followup += 1;
                continue;
            };

            let first_bone_event_date = detection.event_dates.get(&person.person_id).copied();
            if first_bone_event_date.is_some() {
                stats.event_patients += 1;
            }
            // Detection-path counters cover admitted patients only
            if detection.coded_patients.contains(&person.person_id) {
                stats.coded_event_patients += 1;
            }
            if detection.cross_reference_patients.contains(&person.person_id) {
                stats.cross_reference_patients += 1;
            }

            patients.push(Patient {
                person_id: person.person_id,
                gender: person.gender.clone(),
                year_of_birth: person.year_of_birth,
                age: person.year_of_birth.map(|y| self.config.as_of_year - y),
                death_date,
                last_activity_date,
                last_of_death_or_visit,
                first_bone_event_date,
            });
        }

        if stats.dropped_no_followup > 0 {
            log::warn!(
                "dropped {} of {} persons with neither a death nor a visit record",
                stats.dropped_no_followup,
                stats.input_persons
            );
        }
        if patients.is_empty() {
            log::warn!("cohort is empty after the death-or-visit filter");
        }

        log::info!(
            "Cohort built: {} patients, {} with events ({} coded, {} cross-reference)",
            patients.len(),
            stats.event_patients,
            stats.coded_event_patients,
            stats.cross_reference_patients
        );

        Ok(Cohort { patients, stats })
    }
}
