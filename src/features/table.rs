//! The wide per-patient feature table
//!
//! One row per surviving patient: identity and label columns fixed, feature
//! columns appended by the aggregators in a deterministic order. The
//! feature-column set is data-dependent (the lab support gate omits
//! columns rather than zero-filling them), so the output schema varies
//! across runs on different data slices.

use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cohort::Cohort;
use crate::error::{PipelineError, Result};

/// A single named feature column, aligned with the table's row order
#[derive(Debug, Clone)]
pub struct FeatureColumn {
    /// Column name
    pub name: String,
    /// One value per patient row
    pub values: Vec<f64>,
}

/// Wide feature table, one row per patient
#[derive(Debug, Clone)]
pub struct FeatureTable {
    person_id: Vec<i64>,
    gender: Vec<Option<String>>,
    year_of_birth: Vec<Option<i32>>,
    age: Vec<Option<i32>>,
    death_date: Vec<Option<NaiveDate>>,
    last_activity_date: Vec<Option<NaiveDate>>,
    last_of_death_or_visit: Vec<NaiveDate>,
    first_bone_event_date: Vec<Option<NaiveDate>>,
    t_ref: Vec<NaiveDate>,
    event_status: Vec<i32>,
    index: FxHashMap<i64, usize>,
    columns: Vec<FeatureColumn>,
    column_names: FxHashSet<String>,
}

impl FeatureTable {
    /// Initialize the table from a cohort, rows in cohort order
    #[must_use]
    pub fn from_cohort(cohort: &Cohort) -> Self {
        let patients = &cohort.patients;
        Self {
            person_id: patients.iter().map(|p| p.person_id).collect(),
            gender: patients.iter().map(|p| p.gender.clone()).collect(),
            year_of_birth: patients.iter().map(|p| p.year_of_birth).collect(),
            age: patients.iter().map(|p| p.age).collect(),
            death_date: patients.iter().map(|p| p.death_date).collect(),
            last_activity_date: patients.iter().map(|p| p.last_activity_date).collect(),
            last_of_death_or_visit: patients
                .iter()
                .map(|p| p.last_of_death_or_visit)
                .collect(),
            first_bone_event_date: patients
                .iter()
                .map(|p| p.first_bone_event_date)
                .collect(),
            t_ref: patients.iter().map(|p| p.ref_date()).collect(),
            event_status: patients.iter().map(|p| p.event_status()).collect(),
            index: cohort.index(),
            columns: Vec::new(),
            column_names: FxHashSet::default(),
        }
    }

    /// Number of patient rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.person_id.len()
    }

    /// Number of appended feature columns (identity columns excluded)
    #[must_use]
    pub fn num_feature_columns(&self) -> usize {
        self.columns.len()
    }

    /// Row position of a patient, if present
    #[must_use]
    pub fn row_of(&self, person_id: i64) -> Option<usize> {
        self.index.get(&person_id).copied()
    }

    /// Patient ids in row order
    #[must_use]
    pub fn person_ids(&self) -> &[i64] {
        &self.person_id
    }

    /// Event labels in row order
    #[must_use]
    pub fn event_status(&self) -> &[i32] {
        &self.event_status
    }

    /// Look up a feature column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Whether a feature column exists
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.contains(name)
    }

    /// Names of the appended feature columns, in insertion order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Append a feature column.
    ///
    /// # Errors
    /// Rejects a name already present (truncated lab tokens can collide)
    /// and panics in debug builds if the length does not match the table.
    pub fn push_column(&mut self, name: String, values: Vec<f64>) -> Result<()> {
        debug_assert_eq!(values.len(), self.num_rows());
        if !self.column_names.insert(name.clone()) {
            return Err(PipelineError::DuplicateColumn(name));
        }
        self.columns.push(FeatureColumn { name, values });
        Ok(())
    }

    /// Materialize the table as an Arrow `RecordBatch`
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let mut fields = vec![
            Field::new("person_id", DataType::Int64, false),
            Field::new("gender_concept_name", DataType::Utf8, true),
            Field::new("year_of_birth", DataType::Int32, true),
            Field::new("age", DataType::Int32, true),
            Field::new("death_date", DataType::Date32, true),
            Field::new("last_activity_date", DataType::Date32, true),
            Field::new("last_of_death_or_visit", DataType::Date32, false),
            Field::new("first_bone_event_date", DataType::Date32, true),
            Field::new("t_ref", DataType::Date32, false),
            Field::new("event_status", DataType::Int32, false),
        ];
        let mut arrays: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(self.person_id.clone())),
            Arc::new(StringArray::from(self.gender.clone())),
            Arc::new(Int32Array::from(self.year_of_birth.clone())),
            Arc::new(Int32Array::from(self.age.clone())),
            Arc::new(date32_array(&self.death_date)),
            Arc::new(date32_array(&self.last_activity_date)),
            Arc::new(Date32Array::from(
                self.last_of_death_or_visit
                    .iter()
                    .map(|d| days_since_epoch(*d))
                    .collect::<Vec<i32>>(),
            )),
            Arc::new(date32_array(&self.first_bone_event_date)),
            Arc::new(Date32Array::from(
                self.t_ref
                    .iter()
                    .map(|d| days_since_epoch(*d))
                    .collect::<Vec<i32>>(),
            )),
            Arc::new(Int32Array::from(self.event_status.clone())),
        ];

        for column in &self.columns {
            fields.push(Field::new(&column.name, DataType::Float64, false));
            arrays.push(Arc::new(Float64Array::from(column.values.clone())));
        }

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    // NaiveDate::default() is the Unix epoch, 1970-01-01
    (date - NaiveDate::default()).num_days() as i32
}

fn date32_array(dates: &[Option<NaiveDate>]) -> Date32Array {
    Date32Array::from(
        dates
            .iter()
            .map(|d| d.map(days_since_epoch))
            .collect::<Vec<Option<i32>>>(),
    )
}
