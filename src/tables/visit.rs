//! Visit occurrence table adapter

use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use super::TableAdapter;
use crate::error::Result;
use crate::utils::{arrow_array_to_date, arrow_array_to_i64, get_column};

const TABLE: &str = "visit_occurrence";

/// One row of the visit occurrence table
#[derive(Debug, Clone)]
pub struct VisitRow {
    /// Patient identifier
    pub person_id: i64,
    /// End date of the visit, `None` when null or unparseable
    pub visit_end_date: Option<NaiveDate>,
}

/// Adapter for the visit occurrence table
pub struct VisitAdapter;

impl TableAdapter<VisitRow> for VisitAdapter {
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<VisitRow>> {
        let ids = get_column(batch, TABLE, "person_id")?;
        let dates = get_column(batch, TABLE, "visit_end_date")?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for i in 0..batch.num_rows() {
            let Some(person_id) = arrow_array_to_i64(&ids, i) else {
                continue;
            };
            rows.push(VisitRow {
                person_id,
                visit_end_date: arrow_array_to_date(&dates, i),
            });
        }
        Ok(rows)
    }
}
