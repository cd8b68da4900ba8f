pub mod check;
pub mod logging;
pub mod terms;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jsniscope",
    version,
    about = "Validates Java references inside GWT JSNI blocks",
    long_about = "Jsniscope finds the /*-{ ... }-*/ bodies of native Java methods, parses the \
                  @Class::member(sig) references they contain, and checks each one against a \
                  precomputed Java type index."
)]
pub struct Cli {
    /// Also print logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the JSNI references of Java source files
    Check {
        /// Java source files to check
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
        /// Type index JSON describing the project's Java types
        #[arg(long, value_name = "JSON")]
        index: PathBuf,
        /// Severity overrides, e.g. {"JSNI_PARSE_ERROR": "IGNORE"}
        #[arg(long, value_name = "JSON")]
        severities: Option<PathBuf>,
        /// Print markers as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show how a search query splits into terms
    Terms {
        #[arg(value_name = "QUERY")]
        query: String,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Check { .. } => "check",
        Commands::Terms { .. } => "terms",
    };
    let _guard = logging::init_logging(component, cli.verbose);

    match cli.command {
        Commands::Check {
            files,
            index,
            severities,
            json,
        } => check::run(&files, &index, severities.as_deref(), json),
        Commands::Terms { query } => terms::run(&query),
    }
}
