//! Procedure occurrence table adapter

use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use super::TableAdapter;
use crate::error::Result;
use crate::utils::{arrow_array_to_date, arrow_array_to_i64, arrow_array_to_string, get_column};

const TABLE: &str = "procedure_occurrence";

/// One row of the procedure occurrence table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcedureRow {
    /// Patient identifier
    pub person_id: i64,
    /// Procedure concept id
    pub concept_id: Option<i64>,
    /// Free-text procedure concept name
    pub concept_name: Option<String>,
    /// Procedure date, `None` when null or unparseable
    pub procedure_date: Option<NaiveDate>,
}

/// Adapter for the procedure occurrence table
pub struct ProcedureAdapter;

impl TableAdapter<ProcedureRow> for ProcedureAdapter {
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<ProcedureRow>> {
        let ids = get_column(batch, TABLE, "person_id")?;
        let concept_ids = get_column(batch, TABLE, "procedure_concept_id")?;
        let names = get_column(batch, TABLE, "concept_name")?;
        let dates = get_column(batch, TABLE, "procedure_date")?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for i in 0..batch.num_rows() {
            let Some(person_id) = arrow_array_to_i64(&ids, i) else {
                continue;
            };
            rows.push(ProcedureRow {
                person_id,
                concept_id: arrow_array_to_i64(&concept_ids, i),
                concept_name: arrow_array_to_string(&names, i),
                procedure_date: arrow_array_to_date(&dates, i),
            });
        }
        Ok(rows)
    }
}
