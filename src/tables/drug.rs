//! Drug exposure table adapter

use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use super::TableAdapter;
use crate::error::Result;
use crate::utils::{arrow_array_to_date, arrow_array_to_i64, arrow_array_to_string, get_column};

const TABLE: &str = "drug_exposure";

/// One row of the drug exposure table
#[derive(Debug, Clone)]
pub struct DrugExposureRow {
    /// Patient identifier
    pub person_id: i64,
    /// Drug concept name
    pub concept_name: Option<String>,
    /// Exposure start date, `None` when null or unparseable
    pub start_date: Option<NaiveDate>,
}

/// Adapter for the drug exposure table
pub struct DrugExposureAdapter;

impl TableAdapter<DrugExposureRow> for DrugExposureAdapter {
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<DrugExposureRow>> {
        let ids = get_column(batch, TABLE, "person_id")?;
        let names = get_column(batch, TABLE, "concept_name")?;
        let dates = get_column(batch, TABLE, "drug_exposure_start_date")?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for i in 0..batch.num_rows() {
            let Some(person_id) = arrow_array_to_i64(&ids, i) else {
                continue;
            };
            rows.push(DrugExposureRow {
                person_id,
                concept_name: arrow_array_to_string(&names, i),
                start_date: arrow_array_to_date(&dates, i),
            });
        }
        Ok(rows)
    }
}
