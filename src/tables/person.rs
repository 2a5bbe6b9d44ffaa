//! Person table adapter

use arrow::record_batch::RecordBatch;

use super::TableAdapter;
use crate::error::Result;
use crate::utils::{arrow_array_to_i32, arrow_array_to_i64, arrow_array_to_string, get_column};

const TABLE: &str = "person";

/// One row of the person (demographics) table
#[derive(Debug, Clone)]
pub struct PersonRow {
    /// Patient identifier
    pub person_id: i64,
    /// Gender concept name
    pub gender: Option<String>,
    /// Year of birth
    pub year_of_birth: Option<i32>,
}

/// Adapter for the person table
pub struct PersonAdapter;

impl TableAdapter<PersonRow> for PersonAdapter {
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<PersonRow>> {
        let ids = get_column(batch, TABLE, "person_id")?;
        let genders = get_column(batch, TABLE, "gender_concept_name")?;
        let birth_years = get_column(batch, TABLE, "year_of_birth")?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for i in 0..batch.num_rows() {
            let Some(person_id) = arrow_array_to_i64(&ids, i) else {
                continue;
            };
            rows.push(PersonRow {
                person_id,
                gender: arrow_array_to_string(&genders, i),
                year_of_birth: arrow_array_to_i32(&birth_years, i),
            });
        }
        Ok(rows)
    }
}
