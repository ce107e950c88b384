//! Command-line interface for shiksha.
//!
//! Provides commands for browsing and searching content, opening cards,
//! showing item details, listing filter options and managing the
//! session tokens.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapters::SunbirdClient;
use crate::config::{self, ResolvedConfig};
use crate::core::{
    Browser, Completion, ContentDetailsPage, ContentListPage, FileSessionStore, ListEvent, Route,
    Session, SessionContext, SessionStore,
};
use crate::domain::{FilterSelection, FilterValues, SortOrder, Tab};

pub mod render;

/// shiksha - educational content browser
#[derive(Parser, Debug)]
#[command(name = "shiksha")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List content for a tab, optionally searched and filtered
    Browse {
        /// Tab to show
        #[arg(short, long, value_enum, default_value = "courses")]
        tab: TabArg,

        /// Free-text search query
        #[arg(short, long)]
        query: Option<String>,

        /// Language filter
        #[arg(long)]
        language: Option<String>,

        /// Subject filter (repeatable)
        #[arg(long = "subject")]
        subjects: Vec<String>,

        /// Content format filter, e.g. Video or PDF (repeatable)
        #[arg(long = "content-type")]
        content_types: Vec<String>,

        /// Any other filter as key=value[,value...] (repeatable)
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Sort by name
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Show only this item (hierarchy lookup instead of search)
        #[arg(long)]
        identifier: Option<String>,
    },

    /// Open a content card: player for playable formats, details otherwise
    Open {
        /// Content identifier
        identifier: String,

        /// Mime type of the content
        #[arg(short, long)]
        mime_type: String,
    },

    /// Show details of a content item
    Details {
        /// Content identifier
        identifier: String,

        /// Print the start route instead of the details
        #[arg(long)]
        start: bool,
    },

    /// Show filter options
    Filters {
        /// Framework to read options from (defaults to the configured one)
        #[arg(long)]
        framework: Option<String>,
    },

    /// Store tokens issued by the login flow
    Login {
        /// Access token
        #[arg(long, env = "SHIKSHA_ACCESS_TOKEN")]
        access_token: String,

        /// Refresh token
        #[arg(long)]
        refresh_token: Option<String>,
    },

    /// Clear stored tokens and print the login URL
    Logout,

    /// Show resolved configuration (debug)
    Config,
}

/// Tab for CLI (maps to Tab)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    /// Courses
    Courses,

    /// Learning resources
    Content,
}

impl From<TabArg> for Tab {
    fn from(t: TabArg) -> Self {
        match t {
            TabArg::Courses => Tab::Courses,
            TabArg::Content => Tab::Content,
        }
    }
}

/// Sort order for CLI (maps to SortOrder)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Asc => SortOrder::Asc,
            SortArg::Desc => SortOrder::Desc,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?;

        match self.command {
            Commands::Browse {
                tab,
                query,
                language,
                subjects,
                content_types,
                filters,
                sort,
                identifier,
            } => {
                let selection = FilterSelection {
                    language,
                    subjects,
                    content_types,
                    sort: sort.map(Into::into).unwrap_or_default(),
                };
                let filters = build_filters(&selection, sort.is_some(), &filters)?;
                browse(cfg, tab.into(), query, filters, identifier).await
            }
            Commands::Open {
                identifier,
                mime_type,
            } => open_card(cfg, &identifier, &mime_type).await,
            Commands::Details { identifier, start } => show_details(cfg, &identifier, start).await,
            Commands::Filters { framework } => show_filters(cfg, framework).await,
            Commands::Login {
                access_token,
                refresh_token,
            } => login(cfg, access_token, refresh_token).await,
            Commands::Logout => logout(cfg).await,
            Commands::Config => show_config(cfg),
        }
    }
}

fn session_store(cfg: &ResolvedConfig) -> Arc<FileSessionStore> {
    Arc::new(FileSessionStore::new(cfg.session_path()))
}

/// Build a browser backed by the configured API, authenticated with the
/// stored session
async fn build_browser(cfg: &ResolvedConfig) -> Result<Browser> {
    let session = session_store(cfg).load().await?;
    let client = SunbirdClient::new(&cfg.api_base_url, cfg.request_timeout)
        .with_context(|| format!("Failed to create API client for {}", cfg.api_base_url))?
        .with_access_token(session.access_token);
    Ok(Browser::new(Arc::new(client)))
}

/// Merge the filter panel selection with free-form `key=value` filters.
/// Free-form pairs win on the same field.
fn build_filters(
    selection: &FilterSelection,
    sorted: bool,
    pairs: &[String],
) -> Result<FilterValues> {
    let mut filters = selection.to_filter_values();
    if !sorted {
        filters.sort = None;
    }
    filters.fields.extend(FilterValues::parse_pairs(pairs)?.fields);
    Ok(filters)
}

/// Search a tab and print the grid
async fn browse(
    cfg: &ResolvedConfig,
    tab: Tab,
    query: Option<String>,
    filters: FilterValues,
    identifier: Option<String>,
) -> Result<()> {
    let browser = build_browser(cfg).await?;

    let mut page = ContentListPage::new(identifier, cfg.stale_results)
        .with_tab(tab)
        .with_filters(filters);
    if let Some(query) = &query {
        page = page.with_query(query);
    }

    let completion = browser.dispatch(&mut page, ListEvent::Mount).await;

    print!("{}", render::render_header(page.tab(), page.search_text()));
    println!();
    print!("{}", render::render_grid(&page.view()));

    if completion == Some(Completion::Failed) {
        eprintln!("\n[Failed to fetch content; see log for details]");
    }

    Ok(())
}

/// Activate a card and print where it leads
async fn open_card(cfg: &ResolvedConfig, identifier: &str, mime_type: &str) -> Result<()> {
    let browser = build_browser(cfg).await?;
    let mut page = ContentListPage::new(None, cfg.stale_results);

    match browser.open_card(&mut page, identifier, mime_type).await {
        Some(route) => {
            println!("{}", route);
            if let Some(content) = page.selected_content() {
                eprintln!(
                    "[{} \"{}\", {} child item(s)]",
                    content.identifier,
                    content.name.trim(),
                    content.children.len()
                );
            }
            Ok(())
        }
        None => anyhow::bail!("Could not open content {}", identifier),
    }
}

/// Load the details page for an item
async fn show_details(cfg: &ResolvedConfig, identifier: &str, start: bool) -> Result<()> {
    let browser = build_browser(cfg).await?;
    let mut page = ContentDetailsPage::new(cfg.stale_results);

    let route = Route::ContentDetails(identifier.to_string());
    let completion = browser.show_details(&mut page, &route).await;

    if start {
        if let Some(route) = page.start() {
            println!("{}", route);
        }
        return Ok(());
    }

    print!("{}", render::render_details(&page.view()));
    if completion == Some(Completion::Failed) {
        eprintln!("\n[Failed to fetch content details; see log for details]");
    }

    Ok(())
}

/// Print filter options
async fn show_filters(cfg: &ResolvedConfig, framework: Option<String>) -> Result<()> {
    let browser = build_browser(cfg).await?;
    let framework_id = framework.or_else(|| cfg.framework_id.clone());

    let options = browser.filter_options(framework_id.as_deref()).await;
    print!("{}", render::render_filter_options(&options));

    Ok(())
}

/// Store session tokens
async fn login(
    cfg: &ResolvedConfig,
    access_token: String,
    refresh_token: Option<String>,
) -> Result<()> {
    let store = session_store(cfg);
    let session = Session::new(access_token, refresh_token);
    store.save(&session).await?;
    eprintln!("Session stored in {}", store.path().display());
    Ok(())
}

/// Clear session tokens and print the login route
async fn logout(cfg: &ResolvedConfig) -> Result<()> {
    let mut session = SessionContext::load(session_store(cfg), cfg.login_url.clone()).await?;
    let route = session.logout().await?;
    println!("{}", route);
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("Shiksha Configuration");
    println!("=====================");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Session: {}", cfg.session_path().display());
    println!();
    println!("API:");
    println!("  Base URL:     {}", cfg.api_base_url);
    println!(
        "  Timeout:      {}",
        cfg.request_timeout
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "  Framework:    {}",
        cfg.framework_id
            .as_deref()
            .unwrap_or("(built-in filter options)")
    );
    println!();
    println!("Login URL:     {}", cfg.login_url);
    println!("Stale results: {}", cfg.stale_results);
    println!();
    println!("Navigation:");
    print!("{}", render::render_drawer());

    Ok(())
}
