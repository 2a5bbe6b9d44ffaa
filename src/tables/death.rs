//! Death table adapter

use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use super::TableAdapter;
use crate::error::Result;
use crate::utils::{arrow_array_to_date, arrow_array_to_i64, get_column};

const TABLE: &str = "death";

/// One row of the death table
#[derive(Debug, Clone)]
pub struct DeathRow {
    /// Patient identifier
    pub person_id: i64,
    /// Date of death, `None` when the cell is null or unparseable
    pub death_date: Option<NaiveDate>,
}

/// Adapter for the death table
pub struct DeathAdapter;

impl TableAdapter<DeathRow> for DeathAdapter {
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<DeathRow>> {
        let ids = get_column(batch, TABLE, "person_id")?;
        let dates = get_column(batch, TABLE, "death_date")?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for i in 0..batch.num_rows() {
            let Some(person_id) = arrow_array_to_i64(&ids, i) else {
                continue;
            };
            rows.push(DeathRow {
                person_id,
                death_date: arrow_array_to_date(&dates, i),
            });
        }
        Ok(rows)
    }
}
