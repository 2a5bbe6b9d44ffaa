//! A Rust library for building patient-level feature tables from raw
//! clinical event tables (OMOP-style parquet extracts), with cohort and
//! outcome-label construction for skeletal-related-event (SRE) risk models.
//!
//! The pipeline runs in three stages over fully in-memory tables:
//! cohort and label building ([`cohort`]), then two time-windowed feature
//! aggregations over the lab and drug event streams ([`features`]). Both
//! aggregations anchor their backward-looking observation windows to the
//! same per-patient reference date and keep a blackout gap before it, so
//! features never leak information from the outcome period.

pub mod cohort;
pub mod config;
pub mod error;
pub mod features;
pub mod loader;
pub mod pipeline;
pub mod tables;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{DrugClass, PipelineConfig, WindowSpec};
pub use error::{PipelineError, Result};

// Cohort construction
pub use cohort::{Cohort, CohortBuilder, CohortStats, Patient};

// Feature construction
pub use features::table::FeatureTable;
pub use pipeline::{SourceTables, run_pipeline};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;
