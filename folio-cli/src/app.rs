//! Screens, the login guard and table interaction.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use folio_lib::auth::AuthSession;
use folio_lib::auth::Credentials;
use folio_lib::model::Holding;
use folio_lib::model::Order;
use folio_lib::portfolio::PortfolioSummary;
use folio_lib::sample;
use folio_lib::source::DataSource;
use folio_lib::source::MemorySource;
use folio_lib::source::PageRequest;
use folio_lib::source::TableLoader;
use folio_table::Columns;
use folio_table::EventResult;
use folio_table::RenderInput;
use folio_table::TableEngine;
use folio_table::TableEvent;
use folio_table::TableOptions;
use log::debug;
use log::warn;

use crate::config::AppConfig;
use crate::config::TableKind;
use crate::error::CliError;
use crate::render;
use crate::session_store::SettingsSessionStore;
use crate::settings::SettingsProvider;
use crate::shell::Command;
use crate::shell::HELP;
use crate::shell::TableAction;

/// Number of generated historical orders behind the five recent ones.
const ORDER_HISTORY: usize = 40;

/// A screen of the dashboard application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Holdings,
    Orders,
}

impl Screen {
    /// Resolve a route such as `/orders`. Unknown routes land on the
    /// dashboard.
    pub fn from_route(route: &str) -> Self {
        match route.trim_start_matches('/').to_ascii_lowercase().as_str() {
            "" | "dashboard" => Screen::Dashboard,
            "holdings" | "assets" => Screen::Holdings,
            "orders" => Screen::Orders,
            other => {
                debug!("Unknown route '{}', redirecting to dashboard", other);
                Screen::Dashboard
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Holdings => "holdings",
            Screen::Orders => "orders",
        }
    }
}

/// Whether the shell keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// Table screens
// =============================================================================

/// Where a table's rows come from.
enum Feed<R> {
    /// All rows are held locally; the engine sorts and slices them.
    Local(Vec<R>),
    /// Rows arrive one page at a time from a data source.
    Remote(TableLoader<R>),
}

/// A table engine together with its rows.
struct TableScreen<R> {
    kind: TableKind,
    title: &'static str,
    engine: TableEngine<R>,
    feed: Feed<R>,
}

impl<R> TableScreen<R> {
    fn local(
        kind: TableKind,
        title: &'static str,
        columns: Columns<R>,
        options: TableOptions,
        rows: Vec<R>,
    ) -> Self {
        Self {
            kind,
            title,
            engine: TableEngine::new(columns, options),
            feed: Feed::Local(rows),
        }
    }

    fn remote(
        kind: TableKind,
        title: &'static str,
        columns: Columns<R>,
        options: TableOptions,
        source: Arc<dyn DataSource<R>>,
    ) -> Self {
        Self {
            kind,
            title,
            engine: TableEngine::new(columns, options),
            feed: Feed::Remote(TableLoader::new(source)),
        }
    }

    /// Column id matching `name` by id or header, ignoring case.
    fn find_column(&self, name: &str) -> Option<String> {
        self.engine
            .columns()
            .iter()
            .find(|c| c.id().eq_ignore_ascii_case(name) || c.header().eq_ignore_ascii_case(name))
            .map(|c| c.id().to_string())
    }

    /// Fetch the page the engine is on, if the current rows do not answer it.
    ///
    /// The loading state is written out before the fetch starts.
    async fn sync<W: Write>(&mut self, out: &mut W) -> Result<(), CliError> {
        let Feed::Remote(loader) = &mut self.feed else {
            return Ok(());
        };

        let request = PageRequest::from(&self.engine.snapshot());
        if !loader.is_stale(&request) {
            return Ok(());
        }

        loader.begin();
        {
            let view = self.engine.render(loader.rows(), &loader.render_input());
            write!(out, "{}", render::table(self.title, &self.engine, &view))?;
            out.flush()?;
        }
        loader.load(request).await;
        Ok(())
    }

    fn render(&mut self) -> String {
        let view = match &self.feed {
            Feed::Local(rows) => self.engine.render(rows, &RenderInput::new()),
            Feed::Remote(loader) => self.engine.render(loader.rows(), &loader.render_input()),
        };
        let mut text = render::table(self.title, &self.engine, &view);
        if let Feed::Remote(loader) = &self.feed {
            if let Some(e) = loader.last_error() {
                text.push_str(&format!("Could not load {}: {}\n", self.title.to_lowercase(), e));
            }
        }
        text
    }

    async fn show<W: Write>(&mut self, out: &mut W) -> Result<(), CliError> {
        self.sync(out).await?;
        write!(out, "{}", self.render())?;
        Ok(())
    }

    /// Apply a paging or sorting request, react to its events and redraw.
    async fn apply<W: Write>(
        &mut self,
        action: TableAction,
        config: &mut AppConfig,
        settings: &SettingsProvider,
        out: &mut W,
    ) -> Result<(), CliError> {
        let result = match action {
            TableAction::Sort(name) => match self.find_column(&name) {
                Some(id) => self.engine.toggle_sort(&id),
                None => {
                    writeln!(out, "No column named '{}'", name)?;
                    return Ok(());
                }
            },
            TableAction::Next => self.engine.next_page(),
            TableAction::Previous => self.engine.previous_page(),
            TableAction::First => self.engine.first_page(),
            TableAction::Last => self.engine.last_page(),
            TableAction::Page(0) => {
                writeln!(out, "Pages are numbered from 1")?;
                return Ok(());
            }
            TableAction::Page(number) => self.engine.set_page_index(number - 1),
            TableAction::Size(size) => self.engine.set_page_size(size),
        };

        if result == EventResult::Ignored {
            writeln!(out, "Nothing changed")?;
            return Ok(());
        }

        for event in self.engine.drain_events() {
            debug!("{:?} table event: {:?}", self.kind, event);
            if let TableEvent::PageSizeChanged { page_size } = event {
                if let Err(e) = config.save_page_size(settings, self.kind, page_size).await {
                    warn!("Failed to save page size for {:?}: {}", self.kind, e);
                }
            }
        }

        self.show(out).await
    }
}

// =============================================================================
// App
// =============================================================================

/// The dashboard application.
pub struct App {
    settings: SettingsProvider,
    config: AppConfig,
    auth: AuthSession,
    /// `None` while at the login prompt.
    screen: Option<Screen>,
    /// Where to go once logged in.
    after_login: Screen,
    summary: PortfolioSummary,
    holdings: TableScreen<Holding>,
    orders: TableScreen<Order>,
}

impl App {
    /// Build the application over a settings store. `fetch_latency` delays
    /// every order fetch.
    pub async fn new(settings: SettingsProvider, fetch_latency: Duration) -> Result<Self, CliError> {
        let config = AppConfig::load(&settings).await;

        let authenticator = Arc::new(sample::demo_authenticator()?);
        let store = Arc::new(SettingsSessionStore::new(settings.clone()));
        let auth = AuthSession::new(authenticator, store);

        let holding_rows = sample::holdings();
        let summary = PortfolioSummary::compute(&holding_rows, &sample::orders());

        let holdings = TableScreen::local(
            TableKind::Holdings,
            "Holdings",
            Holding::columns()?,
            config.holdings.clone(),
            holding_rows,
        );

        let mut source = MemorySource::new(sample::order_history(ORDER_HISTORY), Order::columns()?);
        if !fetch_latency.is_zero() {
            source = source.with_latency(fetch_latency);
        }
        let orders = TableScreen::remote(
            TableKind::Orders,
            "Orders",
            Order::columns()?,
            config.orders.clone(),
            Arc::new(source),
        );

        Ok(Self {
            settings,
            config,
            auth,
            screen: None,
            after_login: Screen::Dashboard,
            summary,
            holdings,
            orders,
        })
    }

    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    /// Restore a persisted login and greet the user.
    pub async fn start<W: Write>(&mut self, out: &mut W) -> Result<(), CliError> {
        let restored = self.auth.restore().await.map(|user| user.name.clone());
        match restored {
            Some(name) => {
                writeln!(out, "Welcome back, {}.", name)?;
                self.open(Screen::Dashboard, out).await
            }
            None => {
                writeln!(
                    out,
                    "Please log in: login <username> <password> (demo account: {} / {})",
                    sample::DEMO_USERNAME,
                    sample::DEMO_PASSWORD
                )?;
                Ok(())
            }
        }
    }

    /// Run one command.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, CliError> {
        match command {
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Login { username, password } => self.login(username, password, out).await?,
            Command::Logout => {
                self.auth.logout().await?;
                self.screen = None;
                self.after_login = Screen::Dashboard;
                writeln!(out, "Logged out.")?;
            }
            Command::WhoAmI => match self.auth.current_user() {
                Some(user) => writeln!(out, "{} <{}>", user.name, user.email)?,
                None => writeln!(out, "Not logged in.")?,
            },
            Command::Show(screen) => self.open(screen, out).await?,
            Command::Table(action) => self.table_action(action, out).await?,
        }
        Ok(Flow::Continue)
    }

    async fn login<W: Write>(
        &mut self,
        username: String,
        password: String,
        out: &mut W,
    ) -> Result<(), CliError> {
        let name = match self.auth.login(Credentials::new(username, password)).await {
            Ok(user) => user.name.clone(),
            Err(e) => {
                writeln!(out, "Login failed: {}", e)?;
                return Ok(());
            }
        };
        writeln!(out, "Welcome, {}.", name)?;
        self.open(self.after_login, out).await
    }

    /// Show a screen, or ask for a login first.
    async fn open<W: Write>(&mut self, screen: Screen, out: &mut W) -> Result<(), CliError> {
        if !self.auth.is_authenticated() {
            self.screen = None;
            self.after_login = screen;
            writeln!(out, "Please log in first: login <username> <password>")?;
            return Ok(());
        }

        self.screen = Some(screen);
        match screen {
            Screen::Dashboard => {
                writeln!(out, "Dashboard")?;
                write!(out, "{}", render::stats(&self.summary.stats()))?;
            }
            Screen::Holdings => self.holdings.show(out).await?,
            Screen::Orders => self.orders.show(out).await?,
        }
        Ok(())
    }

    async fn table_action<W: Write>(&mut self, action: TableAction, out: &mut W) -> Result<(), CliError> {
        if !self.auth.is_authenticated() {
            self.screen = None;
            writeln!(out, "Please log in first: login <username> <password>")?;
            return Ok(());
        }

        match self.screen {
            Some(Screen::Holdings) => {
                self.holdings
                    .apply(action, &mut self.config, &self.settings, out)
                    .await
            }
            Some(Screen::Orders) => {
                self.orders
                    .apply(action, &mut self.config, &self.settings, out)
                    .await
            }
            _ => {
                writeln!(out, "No table on this screen. Open 'holdings' or 'orders'.")?;
                Ok(())
            }
        }
    }
}
