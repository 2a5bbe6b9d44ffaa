//! Parquet source-table loading and feature-table persistence
//!
//! The bulk load is the only I/O of a pipeline run. Each source table may
//! be a single `<name>.parquet` file or a directory of part files, which
//! are read in parallel and concatenated. Legacy extract spellings
//! (`visit_occurence`, `procedure_occurence`) are accepted as fallbacks.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rayon::prelude::*;

use crate::error::{PipelineError, Result};
use crate::features::table::FeatureTable;
use crate::pipeline::SourceTables;

/// Read a parquet file into Arrow record batches
pub fn read_parquet_file(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// Read a source table from a file or a directory of part files
pub fn read_table(path: &Path) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    let batches = if path.is_dir() {
        let mut part_paths: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "parquet"))
            .collect();
        part_paths.sort();

        let parts: Vec<Vec<RecordBatch>> = part_paths
            .par_iter()
            .map(|p| read_parquet_file(p))
            .collect::<Result<_>>()?;
        parts.into_iter().flatten().collect()
    } else {
        read_parquet_file(path)?
    };

    log::info!(
        "Loaded {} batches from {} in {:?}",
        batches.len(),
        path.display(),
        start.elapsed()
    );
    Ok(batches)
}

/// Resolve a table path under `dir`, trying each accepted name as a
/// `.parquet` file and as a directory
fn table_path(dir: &Path, names: &[&str]) -> Result<PathBuf> {
    for name in names {
        let file = dir.join(format!("{name}.parquet"));
        if file.is_file() {
            return Ok(file);
        }
        let subdir = dir.join(name);
        if subdir.is_dir() {
            return Ok(subdir);
        }
    }
    Err(PipelineError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("source table `{}` not found under {}", names[0], dir.display()),
    )))
}

/// Load all six source tables from a directory of parquet extracts
pub fn load_source_tables(dir: &Path) -> Result<SourceTables> {
    log::info!("Loading source tables from {}", dir.display());
    Ok(SourceTables {
        person: read_table(&table_path(dir, &["person"])?)?,
        death: read_table(&table_path(dir, &["death"])?)?,
        visit: read_table(&table_path(dir, &["visit_occurrence", "visit_occurence"])?)?,
        procedure: read_table(&table_path(
            dir,
            &["procedure_occurrence", "procedure_occurence"],
        )?)?,
        measurement: read_table(&table_path(dir, &["measurement"])?)?,
        drug: read_table(&table_path(dir, &["drug_exposure"])?)?,
    })
}

/// Write the feature table to a parquet file
pub fn write_feature_table(table: &FeatureTable, path: &Path) -> Result<()> {
    let batch = table.to_record_batch()?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    log::info!(
        "Wrote {} rows x {} columns to {}",
        batch.num_rows(),
        batch.num_columns(),
        path.display()
    );
    Ok(())
}
