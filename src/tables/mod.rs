//! Source-table adapters
//!
//! This module contains adapters that map the six OMOP-style source tables
//! to typed row structs. Each adapter validates that its required columns
//! exist (missing columns are fatal, no silent substitution) and extracts
//! values leniently: null or malformed cells become `None` fields.

use arrow::record_batch::RecordBatch;

use crate::error::Result;

/// Defines the interface for source-table-to-row adapters
pub trait TableAdapter<T> {
    /// Convert a `RecordBatch` from a source table into typed rows
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<T>>;
}

pub mod death;
pub mod drug;
pub mod measurement;
pub mod person;
pub mod procedure;
pub mod visit;

// Re-export commonly used types
pub use death::{DeathAdapter, DeathRow};
pub use drug::{DrugExposureAdapter, DrugExposureRow};
pub use measurement::{MeasurementAdapter, MeasurementRow};
pub use person::{PersonAdapter, PersonRow};
pub use procedure::{ProcedureAdapter, ProcedureRow};
pub use visit::{VisitAdapter, VisitRow};

/// Flatten a table's record batches into one vector of typed rows
pub fn collect_rows<A, T>(batches: &[RecordBatch]) -> Result<Vec<T>>
where
    A: TableAdapter<T>,
{
    let mut rows = Vec::new();
    for batch in batches {
        rows.extend(A::from_record_batch(batch)?);
    }
    Ok(rows)
}
