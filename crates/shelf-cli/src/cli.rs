//! CLI argument definitions for the shelf browser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use shelf_core::{FilterSet, SortKey};

#[derive(Parser)]
#[command(
    name = "shelf",
    version,
    about = "Browse catalog shelves from the terminal",
    long_about = "Browse catalog shelves from the terminal.\n\n\
                  Books are fetched in small batches while the shelf loads; \
                  search, filters, sorting and paging are applied locally."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
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

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API base URL (overrides the settings file).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// User whose shelves are listed (overrides the settings file).
    #[arg(long = "user-id", value_name = "ID", global = true)]
    pub user_id: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the configured user's shelves.
    Shelves(ShelvesArgs),

    /// Load a shelf and show one page of its books.
    Browse(BrowseArgs),

    /// Show the details of a single book.
    Book(BookArgs),

    /// Show the effective configuration.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct ShelvesArgs {
    /// Number of shelves to skip.
    #[arg(long = "offset", value_name = "N")]
    pub offset: Option<u32>,

    /// Maximum number of shelves to list.
    #[arg(long = "limit", value_name = "N", default_value_t = 100)]
    pub limit: u32,
}

#[derive(Parser)]
pub struct BrowseArgs {
    /// Shelf identifier.
    #[arg(value_name = "SHELF_ID")]
    pub shelf_id: String,

    /// Free-text search over title, authors, description, publisher and ISBN.
    #[arg(long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Only show free books.
    #[arg(long = "free-only")]
    pub free_only: bool,

    /// Only show adult (yes) or non-adult (no) books.
    #[arg(long = "adult", value_enum)]
    pub adult: Option<AdultArg>,

    /// Only show books in this language (exact code, e.g. "en").
    #[arg(long = "language", value_name = "CODE")]
    pub language: Option<String>,

    /// Sort order.
    #[arg(long = "sort", value_enum, default_value = "title")]
    pub sort: SortArg,

    /// Page to show (clamped to the available pages).
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Books per page (defaults to the settings file).
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Maximum number of identifiers to resolve from the shelf.
    #[arg(long = "limit", value_name = "N", default_value_t = 50)]
    pub limit: u32,

    /// Books fetched concurrently per batch (defaults to the settings file).
    #[arg(long = "batch-size", value_name = "N")]
    pub batch_size: Option<usize>,

    /// Pause between batches in milliseconds (defaults to the settings file).
    #[arg(long = "delay-ms", value_name = "MS")]
    pub delay_ms: Option<u64>,
}

impl BrowseArgs {
    /// Structured filters selected by the flags.
    pub fn filters(&self) -> FilterSet {
        FilterSet {
            sort_by: self.sort.into(),
            free_only: self.free_only,
            adult: self.adult.map(|adult| matches!(adult, AdultArg::Yes)),
            language: self.language.clone().filter(|l| !l.is_empty()),
        }
    }
}

#[derive(Parser)]
pub struct BookArgs {
    /// Book (form) identifier.
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Write the effective configuration to the settings file.
    #[arg(long = "save")]
    pub save: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AdultArg {
    Yes,
    No,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Title,
    Author,
    Pages,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Title => Self::Title,
            SortArg::Author => Self::Author,
            SortArg::Pages => Self::Pages,
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

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn browse(args: &[&str]) -> BrowseArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Browse(args) => args,
            _ => panic!("expected browse"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_browse_defaults() {
        let args = browse(&["shelf", "browse", "s1"]);
        assert_eq!(args.shelf_id, "s1");
        assert_eq!(args.page, 1);
        assert_eq!(args.limit, 50);
        assert!(args.page_size.is_none());
        assert_eq!(args.filters(), FilterSet::default());
    }

    #[test]
    fn test_browse_filters() {
        let args = browse(&[
            "shelf",
            "browse",
            "s1",
            "--free-only",
            "--adult",
            "no",
            "--language",
            "fr",
            "--sort",
            "pages",
        ]);
        let filters = args.filters();
        assert!(filters.free_only);
        assert_eq!(filters.adult, Some(false));
        assert_eq!(filters.language.as_deref(), Some("fr"));
        assert_eq!(filters.sort_by, SortKey::Pages);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shelf",
            "shelves",
            "--base-url",
            "http://localhost:9000",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }
}
