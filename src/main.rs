//! Binary entry point: resolve the configuration, route logs to a file and
//! drive the Ratatui event loop until the user exits.
use std::path::PathBuf;

use clap::Parser;
use client_manager::logging::init_logging;
use client_manager::{run_app, App, Config};
use tracing::info;

/// Keep a list of clients and export it as a spreadsheet or an image.
#[derive(Parser)]
#[command(name = "client-manager", about = "Client list manager")]
struct Args {
    /// Spreadsheet written by the update action.
    /// Default: clientes_atualizados.xlsx in the working directory
    #[arg(long, value_name = "PATH")]
    spreadsheet: Option<PathBuf>,

    /// Path suggested when saving the table as an image.
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Log file. Default: ~/.client-manager/client-manager.log
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::resolve(args.spreadsheet, args.image, args.log_file, args.log_level)?;
    init_logging(&config.log_file, &config.log_level)?;
    info!(spreadsheet = %config.spreadsheet_path.display(), "starting client manager");

    let mut app = App::new(config);
    run_app(&mut app)
}
