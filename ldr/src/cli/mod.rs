/*
 * ldr - search Lightdash dashboards, charts, and explores from the terminal
 *
 * SPDX-FileCopyrightText: 2025-2026 Steve Schoettler
 * SPDX-License-Identifier: Apache-2.0
 */
use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Result, anyhow};
use chrono::format::{Item, StrftimeItems};
use clap::{
    Args, Parser, Subcommand,
    builder::{PossibleValuesParser, TypedValueParser},
};
use lightdash::prelude::*;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::output::{Output, OutputFormat};

pub mod chart;
pub mod common;
pub mod favorite;
pub mod open;
pub mod project;
pub mod recent;
pub mod search;
pub mod set;

/// subdirectory of the os data dir holding local collections
const DATA_SUBDIR: &str = "lightdash";

/// date strftime-inspired format
/// Defined in <https://docs.rs/chrono/latest/chrono/format/strftime/index.html>
const DEFAULT_TABLE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Parser, Debug)]
#[command(name = "ldr")]
#[command(author, version, about = "ldr: search Lightdash dashboards, charts, and explores", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Lightdash instance url. Default: environment `LIGHTDASH_URL` or <https://app.lightdash.cloud>
    #[arg(short = 'u', long, env = "LIGHTDASH_URL")]
    pub url: Option<String>,

    /// Personal access token
    #[arg(long, env = "LIGHTDASH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory for favorites, recents, and dashboard sets. Default: <os data dir>/lightdash
    #[arg(long, value_name = "DIR", env = "LIGHTDASH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Profile name. Keeps collections of each profile separate.
    #[arg(long, env = "LIGHTDASH_PROFILE")]
    pub profile: Option<String>,

    /// Request timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS", env = "LIGHTDASH_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Write output to file (default: stdout)
    #[arg(short = 'o', long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// JSON output (default)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Table output format
    #[arg(short, long, global = true)]
    pub table: bool,

    /// Date format for table output, defined by [chrono-strftime format](https://docs.rs/chrono/latest/chrono/format/strftime/index.html). Defaults to "%Y-%m-%d %H:%M"
    #[arg(long, env = "LIGHTDASH_DATE_FORMAT", global = true)]
    pub date_format: Option<String>,

    /// Quiet mode - suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (repeat for more: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global=true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects, get or set the default project
    #[command(alias = "projects")]
    Project(ProjectArgs),

    /// Search dashboards, charts, and explores in a project
    Search(SearchArgs),

    /// Record an item as opened and print its url
    Open(OpenArgs),

    /// Show chart details
    Chart(ChartArgs),

    /// Toggle and list favorites
    #[command(alias = "favorites")]
    Favorite(FavoriteArgs),

    /// Recently opened items
    Recent(RecentArgs),

    /// Dashboard sets: named groups of items opened together
    #[command(alias = "sets")]
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects in the organization
    List,

    /// Show the default project, or set it
    Default {
        /// Project uuid to make default
        project: Option<String>,

        /// Remove the default project
        #[arg(long, conflicts_with = "project")]
        clear: bool,
    },
}

/// Project to use. Default: stored default project, or the first project
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArg {
    #[arg(short = 'p', long, value_name = "UUID")]
    pub project: Option<String>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to match in name, description, or space name (case-insensitive)
    pub text: Option<String>,

    #[command(flatten)]
    pub project: ProjectArg,

    /// Only items in this space (exact name)
    #[arg(short, long)]
    pub space: Option<String>,

    /// Sort order
    #[arg(long, default_value = "name-asc", value_parser = sort_mode_parser())]
    pub sort: SortMode,

    /// Only items of this kind
    #[arg(short, long, value_parser = result_kind_parser())]
    pub kind: Option<ResultKind>,
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Item uuid (explores: `explore:<name>`)
    pub uuid: String,

    #[command(flatten)]
    pub project: ProjectArg,
}

#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Chart uuid
    pub uuid: String,

    /// Emit chart json instead of markdown
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args, Debug)]
pub struct FavoriteArgs {
    #[command(subcommand)]
    pub command: FavoriteCommands,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommands {
    /// Add or remove a favorite
    Toggle { uuid: String },

    /// List favorites. With --project, resolves them to search results.
    List {
        #[command(flatten)]
        project: ProjectArg,
    },
}

#[derive(Args, Debug)]
pub struct RecentArgs {
    #[command(subcommand)]
    pub command: RecentCommands,
}

#[derive(Subcommand, Debug)]
pub enum RecentCommands {
    /// List recently opened items, most recent first
    List,

    /// Forget recently opened items
    Clear,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(subcommand)]
    pub command: SetCommands,
}

#[derive(Subcommand, Debug)]
pub enum SetCommands {
    /// List dashboard sets
    List,

    /// Show a set and its items
    Show {
        /// Set id or name
        set: String,
    },

    /// Create a set
    Create {
        name: String,

        /// Add this item to the new set
        #[arg(long, value_name = "UUID")]
        add: Option<String>,

        #[command(flatten)]
        project: ProjectArg,
    },

    /// Rename a set
    Rename {
        /// Set id or name
        set: String,
        name: String,
    },

    /// Delete a set
    Delete {
        /// Set id or name
        set: String,
    },

    /// Add an item to a set
    Add {
        /// Set id or name
        set: String,
        /// Item uuid
        uuid: String,

        #[command(flatten)]
        project: ProjectArg,
    },

    /// Remove an item from a set
    Remove {
        /// Set id or name
        set: String,
        /// Item uuid
        uuid: String,
    },

    /// Print urls of a set's items, one per line, and record them as opened
    Urls {
        /// Set id or name
        set: String,
    },
}

fn sort_mode_parser() -> impl TypedValueParser<Value = SortMode> {
    PossibleValuesParser::new(SortMode::iter().map(<&'static str>::from))
        .try_map(|value| value.parse::<SortMode>())
}

fn result_kind_parser() -> impl TypedValueParser<Value = ResultKind> {
    PossibleValuesParser::new(ResultKind::iter().map(<&'static str>::from))
        .try_map(|value| value.parse::<ResultKind>())
}

pub struct AppContext {
    pub client: LightdashClient,
    pub collections: Collections,
    pub output: Output,
    pub date_format: String,
}

pub async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(resolve_output_format(&cli), cli.output.clone());
    let date_format = resolve_table_date_format(&cli)?;

    let client = build_client(&cli)?;
    let collections = build_collections(&cli)?;

    let ctx = AppContext {
        client,
        collections,
        output,
        date_format,
    };

    match cli.command {
        Commands::Project(args) => project::handle(&ctx, args).await,
        Commands::Search(args) => search::handle(&ctx, args).await,
        Commands::Open(args) => open::handle(&ctx, args).await,
        Commands::Chart(args) => chart::handle(&ctx, args).await,
        Commands::Favorite(args) => favorite::handle(&ctx, args).await,
        Commands::Recent(args) => recent::handle(&ctx, args),
        Commands::Set(args) => set::handle(&ctx, args).await,
    }
}

fn resolve_output_format(cli: &Cli) -> OutputFormat {
    if cli.quiet {
        OutputFormat::Quiet
    } else if cli.pretty {
        if cli.table {
            warn!("--pretty conflicts with --table. Using json pretty format");
        }
        OutputFormat::Pretty
    } else if cli.json {
        if cli.table {
            warn!("--json conflicts with --table. Using json format");
        }
        OutputFormat::Json
    } else if cli.table {
        OutputFormat::Table
    } else {
        OutputFormat::Json
    }
}

/// Table date format. Patterns chrono can't render are rejected up front.
fn resolve_table_date_format(cli: &Cli) -> Result<String> {
    let format = cli
        .date_format
        .clone()
        .unwrap_or_else(|| DEFAULT_TABLE_DATE_FORMAT.to_string());
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        return Err(LightdashError::Validation {
            message: format!("invalid --date-format: {format}"),
        }
        .into());
    }
    Ok(format)
}

fn build_client(cli: &Cli) -> Result<LightdashClient> {
    let mut config = ClientConfig::default();
    if let Some(url) = &cli.url {
        config = config.base_url(url);
    }
    if let Some(key) = cli.api_key.as_deref().filter(|key| !key.is_empty()) {
        config = config.api_key(key);
    }
    if let Some(secs) = cli.timeout {
        config = config.timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }
    Ok(LightdashClient::with_config(config)?)
}

fn build_collections(cli: &Cli) -> Result<Collections> {
    let dir = cli
        .data_dir
        .clone()
        .or_else(|| dirs::data_dir().map(|dir| dir.join(DATA_SUBDIR)))
        .ok_or_else(|| anyhow!("no data directory found. Use --data-dir or LIGHTDASH_DATA_DIR"))?;
    let store = Arc::new(FileStore::new(dir)?);
    let keys = match cli.profile.as_deref() {
        Some(profile) => StorageKeys::with_namespace(profile),
        None => StorageKeys::default(),
    };
    Ok(Collections::new(store, keys))
}

/// Fails early with an auth error when no api key is configured.
pub fn ensure_authenticated(client: &LightdashClient) -> Result<()> {
    if !client.has_api_key() {
        return Err(LightdashError::Auth {
            message: "no api key. Use --api-key or set LIGHTDASH_API_KEY".to_string(),
        }
        .into());
    }
    Ok(())
}
