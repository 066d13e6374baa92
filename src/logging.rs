use anyhow::{Context, Result};
use env_logger::{Env, Target, WriteStyle};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Env var holding the log filter, e.g. `debug` or `budgetform::store=debug`.
pub(crate) const LOG_ENV: &str = "BUDGETFORM_LOG";

/// Send logs to `budgetform.log` in the data directory; the terminal belongs to the UI.
pub(crate) fn init() -> Result<()> {
    let path = log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init()?;

    log::info!(
        "budgetform {} starting, logging to {}",
        env!("CARGO_PKG_VERSION"),
        path.display()
    );
    Ok(())
}

fn log_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetform", "BudgetForm")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("budgetform.log"))
}
