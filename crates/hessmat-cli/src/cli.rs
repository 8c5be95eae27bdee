use clap::{Args, Parser, Subcommand};
use hessmat::core::matrix::Triangle;
use hessmat::core::matrix::export::ExportFormat;
use hessmat::engine::config::Backend;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "HESSMAT CLI - Assemble dense or sparse triangular matrices from (row, column, value) triplets and export them for inspection.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for matrix-vector products.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a matrix from a triplet file and write it in a diagnostic format.
    Export(ExportArgs),
    /// Assemble a matrix from a triplet file and print a structural summary.
    Inspect(InspectArgs),
}

/// Options shared by every command that assembles a matrix.
#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    /// Path to a CSV file with `row,column,value` records.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the storage backend ('dense' or 'sparse').
    #[arg(short, long, value_name = "NAME")]
    pub backend: Option<Backend>,

    /// Override the stored triangle ('full', 'symmetric-lower' or 'symmetric-upper').
    #[arg(short, long, value_name = "NAME")]
    pub triangle: Option<Triangle>,

    /// Override the matrix dimension.
    #[arg(short = 'n', long, value_name = "INT")]
    pub dimension: Option<usize>,

    /// Seal the sparse structure once every triplet is assembled.
    #[arg(long)]
    pub seal: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S matrix.dimension=12
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Path for the exported matrix file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the export format ('numeric', 'occupancy' or 'text').
    #[arg(short, long, value_name = "NAME")]
    pub format: Option<ExportFormat>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Also print the stored columns of every row (sparse backend only).
    #[arg(long)]
    pub layout: bool,
}
