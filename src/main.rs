//! Microtag CLI application entry point
//!
//! Command-line front end for the micrograph dataset tag store.
//!
//! # Usage
//!
//! ```bash
//! # List datasets and images
//! microtag ls
//! microtag images -d CHEM1
//!
//! # Tag one image
//! microtag tags add CHEM1 cell1.png stained,fixed
//!
//! # Tag every PNG in every CHEM* dataset (preview first)
//! microtag tag 'CHEM*' -i '*.png' -t stained --dry-run
//!
//! # Import a folder, dropping the "_raw" suffix from file names
//! microtag import CHEM3 ./scans --remove-suffix _raw
//!
//! # Search by file name, dataset or tag
//! microtag search nucleus
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/microtag/config.toml` on Linux) and `MICROTAG_*` environment
//! variables. `--root` overrides the configured datasets root.

use std::io;
use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use microtag::{
    Library, MicrotagError,
    bulk::BulkTagRequest,
    cli::{Cli, Commands},
    commands::{self, tag::TagOptions},
    config::MicrotagConfig,
    output::OutputMode,
};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "microtag=debug" } else { "microtag=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = MicrotagConfig::load()?;
    let mode = OutputMode::new(cli.quiet || config.quiet, cli.json);
    let library = Library::open(config.resolve_root(cli.root.as_deref()));

    match &cli.command {
        Commands::Datasets => commands::datasets(&library, mode),
        Commands::Images { dataset } => commands::images(&library, dataset.as_deref(), mode),
        Commands::Tags(command) => commands::tags(&library, command, mode),
        Commands::Tag { datasets, images, dry_run, yes, .. } => {
            let request = BulkTagRequest {
                dataset_patterns: datasets.clone(),
                image_patterns: images.clone(),
                tags: cli.command.parsed_tags(),
            };
            let options = TagOptions {
                dry_run: *dry_run,
                confirm: config.confirm_bulk && !*yes,
            };
            commands::tag(&library, &request, options, mode)
        }
        Commands::Search { term, dataset } => commands::search(&library, term.clone(), dataset.clone(), mode),
        Commands::Import { dataset, files, remove_suffix, pattern, dry_run } => {
            commands::import(&library, dataset, files, remove_suffix, pattern, *dry_run, mode)
        }
        Commands::Migrate { legacy_file } => commands::migrate(&library, legacy_file, mode),
        Commands::Config(command) => commands::config(&config, command, mode),
        Commands::Completions { shell } => {
            commands::completions(*shell, &mut io::stdout());
            Ok(())
        }
    }
}

/// Main entry point for the microtag application
///
/// Parses command-line arguments, loads configuration and dispatches to the
/// appropriate command handler. Errors are printed to stderr and turn into a
/// non-zero exit code.
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            if e.is_not_found() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
