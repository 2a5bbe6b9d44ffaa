//! Time-windowed feature aggregation
//!
//! Both aggregators follow the same vectorized shape over their event
//! table: one coarse prefilter pass (cohort membership, global
//! window-boundary date range, vocabulary membership), a broadcast join of
//! per-patient window bounds, an inclusive in-window filter per horizon,
//! and a grouped per-patient reduction. Neither iterates the event table
//! per patient.

pub mod drugs;
pub mod labs;
pub mod table;
pub mod window;

pub use drugs::add_drug_features;
pub use labs::add_lab_features;
pub use table::FeatureTable;
