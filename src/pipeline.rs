//! End-to-end feature pipeline
//!
//! Pure function of the six source tables plus the configuration: cohort
//! and label construction, then the lab and drug window aggregations. The
//! run either produces a complete feature table or fails on a structural
//! problem (missing column); there are no partial results.

use arrow::record_batch::RecordBatch;

use crate::cohort::CohortBuilder;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::features::table::FeatureTable;
use crate::features::{add_drug_features, add_lab_features};
use crate::tables::{
    DeathAdapter, DrugExposureAdapter, MeasurementAdapter, PersonAdapter, ProcedureAdapter,
    VisitAdapter, collect_rows,
};

/// The six raw source tables, each as loaded record batches
#[derive(Debug, Default)]
pub struct SourceTables {
    /// person (demographics) table
    pub person: Vec<RecordBatch>,
    /// death table
    pub death: Vec<RecordBatch>,
    /// visit occurrence table
    pub visit: Vec<RecordBatch>,
    /// procedure occurrence table
    pub procedure: Vec<RecordBatch>,
    /// measurement table
    pub measurement: Vec<RecordBatch>,
    /// drug exposure table
    pub drug: Vec<RecordBatch>,
}

/// Run the full pipeline over in-memory source tables
pub fn run_pipeline(tables: &SourceTables, config: &PipelineConfig) -> Result<FeatureTable> {
    let persons = collect_rows::<PersonAdapter, _>(&tables.person)?;
    let deaths = collect_rows::<DeathAdapter, _>(&tables.death)?;
    let visits = collect_rows::<VisitAdapter, _>(&tables.visit)?;
    let procedures = collect_rows::<ProcedureAdapter, _>(&tables.procedure)?;
    let measurements = collect_rows::<MeasurementAdapter, _>(&tables.measurement)?;
    let exposures = collect_rows::<DrugExposureAdapter, _>(&tables.drug)?;

    let cohort = CohortBuilder::new(config)
        .with_persons(persons)
        .with_deaths(deaths)
        .with_visits(visits)
        .with_procedures(procedures)
        .build()?;
    log::info!("{}", cohort.stats);

    let mut table = FeatureTable::from_cohort(&cohort);
    add_lab_features(&mut table, &cohort, &measurements, config)?;
    add_drug_features(&mut table, &cohort, &exposures, config)?;

    log::info!(
        "Feature table: {} patients, {} feature columns",
        table.num_rows(),
        table.num_feature_columns()
    );

    Ok(table)
}
