//! Measurement table adapter

use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use super::TableAdapter;
use crate::error::Result;
use crate::utils::{
    arrow_array_to_date, arrow_array_to_f64, arrow_array_to_i64, arrow_array_to_string, get_column,
};

const TABLE: &str = "measurement";

/// One row of the measurement (lab/vital) table
#[derive(Debug, Clone)]
pub struct MeasurementRow {
    /// Patient identifier
    pub person_id: i64,
    /// Measurement concept name
    pub concept_name: Option<String>,
    /// Measurement date, `None` when null or unparseable
    pub measurement_date: Option<NaiveDate>,
    /// Numeric value of the measurement
    pub value: Option<f64>,
}

/// Adapter for the measurement table
pub struct MeasurementAdapter;

impl TableAdapter<MeasurementRow> for MeasurementAdapter {
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<MeasurementRow>> {
        let ids = get_column(batch, TABLE, "person_id")?;
        let names = get_column(batch, TABLE, "concept_name")?;
        let dates = get_column(batch, TABLE, "measurement_date")?;
        let values = get_column(batch, TABLE, "value_as_number")?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for i in 0..batch.num_rows() {
            let Some(person_id) = arrow_array_to_i64(&ids, i) else {
                continue;
            };
            rows.push(MeasurementRow {
                person_id,
                concept_name: arrow_array_to_string(&names, i),
                measurement_date: arrow_array_to_date(&dates, i),
                value: arrow_array_to_f64(&values, i),
            });
        }
        Ok(rows)
    }
}
