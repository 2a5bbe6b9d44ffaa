use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use log::info;

use sre_features::config::PipelineConfig;
use sre_features::loader::{load_source_tables, write_feature_table};
use sre_features::pipeline::run_pipeline;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(
        args.next()
            .context("usage: sre-features <data-dir> [config.json] [output.parquet]")?,
    );
    let config = match args.next() {
        Some(path) => PipelineConfig::from_json_file(Path::new(&path))?,
        None => PipelineConfig::default(),
    };
    let output = PathBuf::from(args.next().unwrap_or_else(|| "features.parquet".to_string()));

    info!("{config}");

    let start = Instant::now();
    let tables = load_source_tables(&data_dir)?;
    info!("Loaded source tables in {:?}", start.elapsed());

    let features = run_pipeline(&tables, &config)?;
    info!(
        "Pipeline finished in {:?}: {} patients, {} feature columns",
        start.elapsed(),
        features.num_rows(),
        features.num_feature_columns()
    );

    write_feature_table(&features, &output)?;
    Ok(())
}
