mod bootstrap;
mod commands;

use anyhow::Result;
use clap::Parser;

use inventory_core::settings::{Command, Settings};
use inventory_data::analysis::build_dashboard;
use inventory_data::store::InventoryStore;
use inventory_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::ensure_directories()?;
    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(bootstrap::default_log_file);
    bootstrap::setup_logging(&settings.log_level, Some(&log_file))?;

    tracing::info!("pg-inventory v{} starting", env!("CARGO_PKG_VERSION"));

    let data_file = settings.resolve_data_file();
    tracing::info!(path = %data_file.display(), "using inventory data file");

    let mut store = InventoryStore::load(&data_file)?;

    match &settings.command {
        Command::Dashboard => {
            let data = build_dashboard(store.records());
            let app = App::new(&settings.theme, ViewMode::Dashboard, data);
            app.run()?;
        }

        Command::Growth { view } => {
            let data = build_dashboard(store.records());
            let view_mode = if view == "yearly" {
                ViewMode::YearlyGrowth
            } else {
                ViewMode::MonthlyGrowth
            };
            let app = App::new(&settings.theme, view_mode, data);
            app.run()?;
        }

        Command::List { filter, all } => {
            commands::run_list(&store, filter, *all);
        }

        Command::Show { id } => {
            commands::run_show(&store, *id)?;
        }

        Command::Add { fields } => {
            commands::run_add(&mut store, fields)?;
        }

        Command::Update {
            id,
            fields,
            dismantled,
        } => {
            commands::run_update(&mut store, *id, fields, *dismantled)?;
        }

        Command::Delete { id } => {
            commands::run_delete(&mut store, *id)?;
        }

        Command::Import { path, delimiter } => {
            commands::run_import(&mut store, path, *delimiter)?;
        }

        Command::Export { path, filter, all } => {
            commands::run_export(&store, path, filter, *all)?;
        }
    }

    Ok(())
}
