//! Application error type.

use folio_lib::error::AuthError;
use folio_table::TableError;
use thiserror::Error;

use crate::settings::SettingsError;

/// Errors that end the shell.
///
/// Problems a user can correct (bad input, failed login) are reported inline
/// and never surface here.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("authentication: {0}")]
    Auth(#[from] AuthError),
    #[error("table setup: {0}")]
    Table(#[from] TableError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
