//! CLI argument definitions.

use std::path::PathBuf;

use clap::builder::{PossibleValue, PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use directory_model::{FilterField, SortKey, Theme, ViewMode};

#[derive(Parser)]
#[command(
    name = "company-directory",
    version,
    about = "Browse, filter, and export a company directory",
    long_about = "Browse a company directory from the terminal.\n\n\
                  Records come from a JSON document (URL or file) and are cached \
                  so the last good copy is used when the source is unreachable.\n\
                  Favorites, view mode, and theme are remembered between runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Companies document to load (URL or file path). Overrides settings.
    #[arg(long, value_name = "URL_OR_PATH", global = true)]
    pub source: Option<String>,

    /// Settings file to use instead of the platform default.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Use the cached snapshot only; do not fetch.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List companies matching the query, one page at a time.
    List(ListArgs),

    /// Show the distinct locations and industries.
    Facets(FacetsArgs),

    /// Show dataset and result counts.
    Stats(QueryArgs),

    /// Manage favorite companies.
    #[command(subcommand)]
    Favorite(FavoriteCommand),

    /// Show or set the listing layout.
    View {
        #[arg(value_parser = parse_view_mode)]
        mode: Option<ViewMode>,
    },

    /// Show, set, or toggle the color theme.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Export the matching companies as CSV.
    Export(ExportArgs),
}

/// Search, filter, and sort options shared by listing commands.
#[derive(Args, Clone, Default)]
pub struct QueryArgs {
    /// Case-insensitive substring of the company name.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only companies in this location (exact match).
    #[arg(long)]
    pub location: Option<String>,

    /// Only companies in this industry (exact match).
    #[arg(long)]
    pub industry: Option<String>,

    /// Sort order. Defaults to the configured `default_sort`.
    #[arg(long, value_parser = sort_key_parser())]
    pub sort: Option<SortKey>,

    /// Only favorite companies.
    #[arg(long = "favorites-only")]
    pub favorites_only: bool,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Page to show (clamped to the available pages). Defaults to the last
    /// page viewed in this session.
    #[arg(long, short = 'p', value_parser = parse_page)]
    pub page: Option<usize>,

    /// Layout for this listing only.
    #[arg(long, value_parser = parse_view_mode)]
    pub view: Option<ViewMode>,
}

#[derive(Args)]
pub struct FacetsArgs {
    /// Only this field (location or industry).
    #[arg(value_parser = parse_filter_field)]
    pub field: Option<FilterField>,
}

#[derive(Subcommand)]
pub enum FavoriteCommand {
    /// Add or remove a company from favorites.
    Toggle {
        /// Company id.
        id: String,
    },
    /// List favorite companies.
    List,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Output file (default: companies.csv). Use `-` for stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

impl ThemeAction {
    pub fn apply(self, current: Theme) -> Theme {
        match self {
            Self::Toggle => current.toggled(),
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn sort_key_parser() -> impl TypedValueParser<Value = SortKey> {
    PossibleValuesParser::new(
        SortKey::all()
            .iter()
            .map(|key| PossibleValue::new(key.as_str()).help(key.display_name())),
    )
    .try_map(|value| value.parse::<SortKey>())
}

fn parse_view_mode(value: &str) -> Result<ViewMode, String> {
    value.parse().map_err(|error| format!("{error}"))
}

fn parse_filter_field(value: &str) -> Result<FilterField, String> {
    value.parse().map_err(|error| format!("{error}"))
}

fn parse_page(value: &str) -> Result<usize, String> {
    directory_query::parse_page(value).map_err(|error| error.to_string())
}
