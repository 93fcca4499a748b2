//! Persisted table preferences.

use folio_table::ProcessingMode;
use folio_table::TableOptions;
use log::warn;

use crate::settings::SettingsError;
use crate::settings::SettingsProvider;

/// The application's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Orders,
    Holdings,
}

impl TableKind {
    /// Settings key of the table's options.
    pub fn key(&self) -> &'static str {
        match self {
            TableKind::Orders => "table.orders",
            TableKind::Holdings => "table.holdings",
        }
    }
}

/// Options of every table.
///
/// Orders are sorted and paged by the data source; holdings are a small
/// local set and are sorted and paged in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub orders: TableOptions,
    pub holdings: TableOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            orders: TableOptions::default(),
            holdings: TableOptions::default()
                .page_size(5)
                .page_size_options(vec![5, 10, 20])
                .sorting(ProcessingMode::ClientComputed)
                .pagination(ProcessingMode::ClientComputed),
        }
    }
}

impl AppConfig {
    /// Read stored options, falling back to defaults for anything missing or
    /// unreadable.
    pub async fn load(settings: &SettingsProvider) -> Self {
        let defaults = Self::default();
        Self {
            orders: load_table(settings, TableKind::Orders, defaults.orders).await,
            holdings: load_table(settings, TableKind::Holdings, defaults.holdings).await,
        }
    }

    pub fn table(&self, kind: TableKind) -> &TableOptions {
        match kind {
            TableKind::Orders => &self.orders,
            TableKind::Holdings => &self.holdings,
        }
    }

    fn table_mut(&mut self, kind: TableKind) -> &mut TableOptions {
        match kind {
            TableKind::Orders => &mut self.orders,
            TableKind::Holdings => &mut self.holdings,
        }
    }

    /// Remember a page size chosen by the user.
    pub async fn save_page_size(
        &mut self,
        settings: &SettingsProvider,
        kind: TableKind,
        page_size: usize,
    ) -> Result<(), SettingsError> {
        let options = self.table_mut(kind);
        options.page_size = page_size;
        settings.set(kind.key(), &*options).await
    }
}

async fn load_table(
    settings: &SettingsProvider,
    kind: TableKind,
    default: TableOptions,
) -> TableOptions {
    match settings.get::<TableOptions>(kind.key()).await {
        Ok(Some(options)) => options,
        Ok(None) => default,
        Err(e) => {
            warn!("Ignoring stored options for {:?}: {}", kind, e);
            default
        }
    }
}
