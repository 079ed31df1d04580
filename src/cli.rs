//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for microtag using the `clap` crate.
//!
//! # Commands
//!
//! - **datasets**: List dataset directories under the root
//! - **images**: List images with their tags
//! - **tags**: Get, set or add the tags of one image
//! - **tag**: Add tags to every image matching dataset and image patterns
//! - **search**: Find images by file name, dataset name or tag
//! - **import**: Copy files into a dataset, optionally stripping a suffix
//! - **migrate**: Split a legacy single-file tag document into per-dataset documents
//! - **config**: Show or change settings
//! - **completions**: Print a shell completion script
//!
//! Global `--root` overrides the configured datasets root, `--quiet` prints
//! bare results for scripting and `--json` prints machine-readable results.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::store::parse_tag_args;

#[derive(Parser, Debug)]
#[command(name = "microtag")]
#[command(about = "Tag store for micrograph datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Datasets root directory (overrides config)
    #[arg(long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List datasets
    #[command(visible_alias = "ls")]
    Datasets,

    /// List images and their tags
    Images {
        /// Only list this dataset
        #[arg(short = 'd', long = "dataset", value_name = "DATASET")]
        dataset: Option<String>,
    },

    /// Read or edit the tags of one image
    #[command(subcommand)]
    Tags(TagsCommand),

    /// Add tags to all images matching the given patterns
    #[command(visible_alias = "t")]
    Tag {
        /// Dataset name patterns (`*` and `?` wildcards)
        #[arg(value_name = "DATASET_PATTERN", required = true)]
        datasets: Vec<String>,

        /// Tags to add (comma-separated or repeated)
        #[arg(short = 't', long = "tags", value_name = "TAGS", num_args = 1.., required = true)]
        tags: Vec<String>,

        /// Image name patterns (default: all images)
        #[arg(short = 'i', long = "image", value_name = "PATTERN")]
        images: Vec<String>,

        /// Show what would be tagged without writing
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Search images by file name, dataset name or tag
    #[command(visible_alias = "s")]
    Search {
        /// Case-insensitive substring to look for
        #[arg(value_name = "TERM")]
        term: Option<String>,

        /// Restrict the search to one dataset
        #[arg(short = 'd', long = "dataset", value_name = "DATASET")]
        dataset: Option<String>,
    },

    /// Copy files into a dataset, creating it if needed
    Import {
        /// Destination dataset
        #[arg(value_name = "DATASET")]
        dataset: String,

        /// Files or directories to import
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Remove this text from each file name
        #[arg(long = "remove-suffix", value_name = "SUFFIX", default_value = "")]
        remove_suffix: String,

        /// Only import files matching this pattern (case-insensitive)
        #[arg(short = 'p', long = "pattern", value_name = "PATTERN", default_value = "")]
        pattern: String,

        /// Show the resulting names without copying
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Merge a legacy single-file tag document into per-dataset documents
    Migrate {
        /// Document keyed by "dataset/filename"
        #[arg(value_name = "LEGACY_FILE")]
        legacy_file: PathBuf,
    },

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TagsCommand {
    /// Print the tags of an image
    Get { dataset: String, file: String },

    /// Replace the tags of an image
    Set {
        dataset: String,
        file: String,
        /// New tags (comma-separated or repeated); none clears the image
        #[arg(value_name = "TAGS")]
        tags: Vec<String>,
    },

    /// Add tags to an image
    Add {
        dataset: String,
        file: String,
        #[arg(value_name = "TAGS", required = true)]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Set a configuration value
    Set {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The clap command, for completion generation
    #[must_use]
    pub fn command_definition() -> clap::Command {
        Self::command()
    }
}

impl Commands {
    /// Tags given to `tag`, `tags set` or `tags add`, split on commas
    #[must_use]
    pub fn parsed_tags(&self) -> Vec<String> {
        match self {
            Self::Tag { tags, .. }
            | Self::Tags(TagsCommand::Set { tags, .. } | TagsCommand::Add { tags, .. }) => {
                parse_tag_args(tags)
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("microtag").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command_definition().debug_assert();
    }

    #[test]
    fn test_bulk_tag_args() {
        let cli = parse(&["tag", "CHEM*", "BIO1", "-t", "stained, fixed", "-i", "cell?.png", "--dry-run"]);
        match &cli.command {
            Commands::Tag { datasets, images, dry_run, yes, .. } => {
                assert_eq!(datasets, &vec!["CHEM*".to_string(), "BIO1".to_string()]);
                assert_eq!(images, &vec!["cell?.png".to_string()]);
                assert!(*dry_run);
                assert!(!*yes);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.command.parsed_tags(), vec!["stained", "fixed"]);
    }

    #[test]
    fn test_bulk_tag_requires_tags() {
        let result = Cli::try_parse_from(["microtag", "tag", "CHEM*"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["datasets", "--root", "/data", "-q", "--json"]);
        assert_eq!(cli.root, Some(PathBuf::from("/data")));
        assert!(cli.quiet);
        assert!(cli.json);
        assert_eq!(cli.command, Commands::Datasets);
    }

    #[test]
    fn test_ls_alias() {
        assert_eq!(parse(&["ls"]).command, Commands::Datasets);
    }

    #[test]
    fn test_tags_set_allows_empty_list() {
        let cli = parse(&["tags", "set", "cells", "a.jpg"]);
        assert!(cli.command.parsed_tags().is_empty());
        let cli = parse(&["tags", "add", "cells", "a.jpg", "x,y", "z"]);
        assert_eq!(cli.command.parsed_tags(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_import_defaults() {
        let cli = parse(&["import", "fresh", "a.png", "dir"]);
        match cli.command {
            Commands::Import { remove_suffix, pattern, files, dry_run, .. } => {
                assert_eq!(remove_suffix, "");
                assert_eq!(pattern, "");
                assert_eq!(files.len(), 2);
                assert!(!dry_run);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
