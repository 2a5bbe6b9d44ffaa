//! Arrow utility functions for data type conversions and operations
//!
//! This module provides utility functions for extracting individual values
//! from Arrow arrays, handling nulls and lenient date parsing. Missing
//! columns are fatal (`MissingColumn`); malformed cell values are not —
//! they extract as `None` and flow through the pipeline as censoring.

use arrow::array::{
    Array, ArrayRef, Date32Array, Date64Array, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use crate::error::{PipelineError, Result};

/// Date formats tried, in order, when a date column is stored as strings
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"];

/// Get a column from a record batch by name
///
/// # Arguments
/// * `batch` - The record batch
/// * `table` - The source table name, for error context
/// * `column_name` - The name of the column to find
///
/// # Errors
/// Returns `MissingColumn` if the column does not exist
pub fn get_column(batch: &RecordBatch, table: &str, column_name: &str) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column_name)
        .map_err(|_| PipelineError::MissingColumn {
            table: table.to_string(),
            column: column_name.to_string(),
        })?;
    Ok(batch.column(idx).clone())
}

/// Extract a string value from an Arrow array at the specified index, handling nulls
///
/// # Returns
/// `Some(String)` if the value exists and is not null, otherwise `None`
#[must_use]
pub fn arrow_array_to_string(array: &ArrayRef, index: usize) -> Option<String> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Utf8 => {
            let string_array = array.as_any().downcast_ref::<StringArray>()?;
            Some(string_array.value(index).to_string())
        }
        _ => None,
    }
}

/// Extract a date value from an Arrow array at the specified index, handling nulls
///
/// String cells are parsed leniently against a small set of formats; a cell
/// that matches none of them extracts as `None` rather than failing the run.
///
/// # Returns
/// `Some(NaiveDate)` if the value exists, is not null and parses, otherwise `None`
#[must_use]
pub fn arrow_array_to_date(array: &ArrayRef, index: usize) -> Option<NaiveDate> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Date32 => {
            let date_array = array.as_any().downcast_ref::<Date32Array>()?;
            date_array.value_as_date(index)
        }
        DataType::Date64 => {
            let date_array = array.as_any().downcast_ref::<Date64Array>()?;
            date_array.value_as_date(index)
        }
        DataType::Utf8 => {
            let string_array = array.as_any().downcast_ref::<StringArray>()?;
            let date_str = string_array.value(index);

            for format in DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(date_str, format) {
                    return Some(date);
                }
            }

            None
        }
        _ => None,
    }
}

/// Extract an i32 value from an Arrow array at the specified index, handling nulls
///
/// # Returns
/// `Some(i32)` if the value exists and is not null, otherwise `None`
#[must_use]
pub fn arrow_array_to_i32(array: &ArrayRef, index: usize) -> Option<i32> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Int32 => {
            let int_array = array.as_any().downcast_ref::<Int32Array>()?;
            Some(int_array.value(index))
        }
        DataType::Int64 => {
            let int_array = array.as_any().downcast_ref::<Int64Array>()?;
            i32::try_from(int_array.value(index)).ok()
        }
        _ => None,
    }
}

/// Extract an i64 value from an Arrow array at the specified index, handling nulls
///
/// # Returns
/// `Some(i64)` if the value exists and is not null, otherwise `None`
#[must_use]
pub fn arrow_array_to_i64(array: &ArrayRef, index: usize) -> Option<i64> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Int32 => {
            let int_array = array.as_any().downcast_ref::<Int32Array>()?;
            Some(i64::from(int_array.value(index)))
        }
        DataType::Int64 => {
            let int_array = array.as_any().downcast_ref::<Int64Array>()?;
            Some(int_array.value(index))
        }
        _ => None,
    }
}

/// Extract a float64 value from an Arrow array at the specified index, handling nulls
///
/// # Returns
/// `Some(f64)` if the value exists and is not null, otherwise `None`
#[must_use]
pub fn arrow_array_to_f64(array: &ArrayRef, index: usize) -> Option<f64> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Int32 => {
            let int_array = array.as_any().downcast_ref::<Int32Array>()?;
            Some(f64::from(int_array.value(index)))
        }
        DataType::Int64 => {
            let int_array = array.as_any().downcast_ref::<Int64Array>()?;
            Some(int_array.value(index) as f64)
        }
        DataType::Float32 => {
            let float_array = array.as_any().downcast_ref::<Float32Array>()?;
            Some(f64::from(float_array.value(index)))
        }
        DataType::Float64 => {
            let float_array = array.as_any().downcast_ref::<Float64Array>()?;
            Some(float_array.value(index))
        }
        _ => None,
    }
}
