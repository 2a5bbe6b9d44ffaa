//! Configuration for the feature pipeline
//!
//! Every constant that shapes the output table lives here so that tests
//! and study variants can pin or swap it without code changes: the as-of
//! year used for age, the observation-window offsets, the minimum support
//! threshold for lab features, and all the term vocabularies. A config can
//! be loaded from a JSON file; missing fields fall back to the production
//! defaults in [`vocab`].

pub mod vocab;

use std::fmt;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// A named backward-looking observation window, anchored to a per-patient
/// reference date.
///
/// The window is `[ref_date - start_offset_days, ref_date - end_offset_days]`
/// with inclusive bounds. `end_offset_days` is the blackout gap between the
/// window and the reference event; it must stay positive so that no feature
/// can see into the outcome period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Window name, used as the column suffix (e.g. `6m`)
    pub name: String,
    /// Days between the window start and the reference date
    pub start_offset_days: i64,
    /// Days between the window end and the reference date (blackout gap)
    pub end_offset_days: i64,
}

impl WindowSpec {
    /// Create a window spec
    #[must_use]
    pub fn new(name: &str, start_offset_days: i64, end_offset_days: i64) -> Self {
        Self {
            name: name.to_string(),
            start_offset_days,
            end_offset_days,
        }
    }

    /// Compute the window boundaries for a reference date.
    ///
    /// This is the single implementation of the window arithmetic; both the
    /// lab and the drug aggregator derive their boundaries through it, so
    /// the two call sites are identical by construction.
    #[must_use]
    pub fn bounds(&self, ref_date: NaiveDate) -> WindowBounds {
        WindowBounds {
            start: ref_date - Duration::days(self.start_offset_days),
            end: ref_date - Duration::days(self.end_offset_days),
        }
    }
}

/// Concrete start/end boundaries of an observation window for one patient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    /// First day of the window (inclusive)
    pub start: NaiveDate,
    /// Last day of the window (inclusive)
    pub end: NaiveDate,
}

impl WindowBounds {
    /// Whether a date falls inside the window, bounds inclusive
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A drug class: a column key plus the free-text terms that identify it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugClass {
    /// Column key for the class indicator (e.g. `bmas`)
    pub key: String,
    /// Free-text terms matched case-insensitively as substrings
    pub terms: Vec<String>,
}

impl DrugClass {
    /// Create a drug class from a key and a slice of terms
    #[must_use]
    pub fn new(key: &str, terms: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            terms: terms.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// Full configuration for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Year against which `age = as_of_year - year_of_birth` is computed
    pub as_of_year: i32,
    /// Observation windows, in column-emission order
    pub windows: Vec<WindowSpec>,
    /// Minimum in-window row count (cohort-wide) before a lab concept
    /// materializes feature columns for that window
    pub min_lab_support: usize,
    /// Lab/vital concept names eligible for windowed features, in
    /// column-emission order
    pub lab_concepts: Vec<String>,
    /// Maximum length of the sanitized lab column-name prefix
    pub sanitize_prefix_len: usize,
    /// Drug classes, in column-emission order
    pub drug_classes: Vec<DrugClass>,
    /// Procedure concept ids that directly code a bone event
    pub bone_event_concept_ids: Vec<i64>,
    /// Free-text patterns for fracture-type procedures
    pub fracture_patterns: Vec<String>,
    /// Free-text patterns for radiation-therapy procedures
    pub radiation_patterns: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            as_of_year: 2025,
            windows: vec![WindowSpec::new("6m", 270, 120), WindowSpec::new("12m", 540, 180)],
            min_lab_support: 20,
            lab_concepts: vocab::HIGH_FREQ_LABS.iter().map(|s| (*s).to_string()).collect(),
            sanitize_prefix_len: 25,
            drug_classes: vec![
                DrugClass::new("bmas", vocab::BMAS),
                DrugClass::new("chemo", vocab::CHEMOTHERAPY),
                DrugClass::new("targeted", vocab::TARGETED_THERAPY),
            ],
            bone_event_concept_ids: vocab::BONE_EVENT_CONCEPT_IDS.to_vec(),
            fracture_patterns: vocab::FRACTURE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            radiation_patterns: vocab::RADIATION_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Fields absent from the file keep their defaults, so a config file
    /// only needs to list the values it overrides.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| PipelineError::Config(format!("{}: {e}", path.display())))
    }

    /// The coded bone-event ids as a set, for membership tests
    #[must_use]
    pub fn bone_event_id_set(&self) -> FxHashSet<i64> {
        self.bone_event_concept_ids.iter().copied().collect()
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        writeln!(f, "  As-of Year: {}", self.as_of_year)?;
        for w in &self.windows {
            writeln!(
                f,
                "  Window {}: [ref - {}d, ref - {}d]",
                w.name, w.start_offset_days, w.end_offset_days
            )?;
        }
        writeln!(f, "  Min Lab Support: {}", self.min_lab_support)?;
        writeln!(f, "  Lab Concepts: {}", self.lab_concepts.len())?;
        for class in &self.drug_classes {
            writeln!(f, "  Drug Class {}: {} terms", class.key, class.terms.len())?;
        }
        writeln!(
            f,
            "  Coded Bone-Event Ids: {}",
            self.bone_event_concept_ids.len()
        )?;
        Ok(())
    }
}
