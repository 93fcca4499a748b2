mod app;
mod config;
mod error;
mod paths;
mod render;
mod session_store;
mod settings;
mod shell;

use std::fs;
use std::fs::File;
use std::time::Duration;

use log::warn;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::BufReader;

use crate::app::App;
use crate::error::CliError;
use crate::paths::AppDirs;
use crate::settings::{MemoryBackend, SettingsProvider, SqliteBackend};

/// Simulated round trip of the orders backend.
const ORDERS_FETCH_LATENCY: Duration = Duration::from_millis(150);

fn init_logging(dirs: Option<&AppDirs>) {
    let Some(dirs) = dirs else {
        return;
    };
    dirs.rotate_logs();
    let path = dirs.log_file();
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

async fn open_settings(dirs: Option<&AppDirs>) -> Result<SettingsProvider, CliError> {
    let Some(path) = dirs.map(AppDirs::settings_db) else {
        warn!("No data directory available, settings will not be saved");
        return Ok(SettingsProvider::new(MemoryBackend::new()));
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(SettingsProvider::new(SqliteBackend::open(&path).await?))
}

async fn run(dirs: Option<AppDirs>) -> Result<(), CliError> {
    let settings = open_settings(dirs.as_ref()).await?;
    let mut app = App::new(settings, ORDERS_FETCH_LATENCY).await?;
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    shell::run(&mut app, input, &mut stdout).await
}

#[tokio::main]
async fn main() {
    let dirs = AppDirs::locate();
    init_logging(dirs.as_ref());
    log::info!("Starting folio");

    if let Err(e) = run(dirs).await {
        eprintln!("Error: {}", e);
    }
}
