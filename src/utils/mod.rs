//! Utility functions shared across the pipeline

pub mod arrow_utils;
pub mod text;

pub use arrow_utils::{
    arrow_array_to_date, arrow_array_to_f64, arrow_array_to_i32, arrow_array_to_i64,
    arrow_array_to_string, get_column,
};
pub use text::{TermMatcher, sanitize_concept_name};
