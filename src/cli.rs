use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build OData $filter expressions from typed filter rows
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Field catalog file (.toml, .json or .json5)
    #[arg(long, global = true, env = "ODATA_FILTER_FIELDS")]
    pub fields: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Print diagnostics to stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings and diagnostics
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a filter from rows given as Field:op[:value]
    Build {
        /// A filter row, e.g. "Age:ge:16" (repeatable)
        #[arg(short, long = "row", value_name = "FIELD:OP[:VALUE]")]
        rows: Vec<String>,
    },
    /// List the fields in the catalog with their operators
    Fields,
    /// List the operators allowed for a field type
    Operators {
        /// Field type: string, int or bool
        field_type: String,
    },
    /// Edit filter rows interactively on stdin
    Interactive,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
