//! CLI command implementations

use std::path::{Path, PathBuf};

use crate::config::ServerConfig;
use crate::dataset::DatasetCatalog;
use crate::query::QueryExecutor;
use crate::rest_api;

use super::args::Command;
use super::errors::CliResult;

/// Dispatches one parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            data_dir,
            bind,
        } => serve(&config, data_dir, bind),
        Command::Query {
            dataset,
            config,
            data_dir,
            filter,
            sort,
            limit,
            offset,
        } => query(&config, data_dir, &dataset, filter, sort, limit, offset),
        Command::Schema {
            dataset,
            config,
            data_dir,
        } => schema(&config, data_dir, &dataset),
    }
}

fn load_config(path: &Path, data_dir: Option<PathBuf>) -> CliResult<ServerConfig> {
    let mut config = ServerConfig::load_or_default(path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

fn serve(config_path: &Path, data_dir: Option<PathBuf>, bind: Option<String>) -> CliResult<()> {
    let mut config = load_config(config_path, data_dir)?;
    if let Some(addr) = bind {
        config.bind_addr = addr;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(rest_api::serve(config))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn query(
    config_path: &Path,
    data_dir: Option<PathBuf>,
    dataset: &str,
    filter: Option<String>,
    sort: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> CliResult<()> {
    let config = load_config(config_path, data_dir)?;
    let catalog = DatasetCatalog::new(config.data_dir.clone());
    let executor = QueryExecutor::new(config.engine_config());

    let table = catalog.open(dataset)?;
    let result = executor.execute(
        &table,
        filter.as_deref(),
        sort.as_deref(),
        limit,
        offset,
    )?;

    let page = rest_api::Page::from_result(&table, &result);
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

fn schema(config_path: &Path, data_dir: Option<PathBuf>, dataset: &str) -> CliResult<()> {
    let config = load_config(config_path, data_dir)?;
    let catalog = DatasetCatalog::new(config.data_dir.clone());
    let executor = QueryExecutor::new(config.engine_config());

    let table = catalog.open(dataset)?;
    let fields = executor.schema(&table);
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}
