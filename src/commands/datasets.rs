//! Datasets command - list dataset directories

use crate::{Library, MicrotagError, output::{self, OutputMode}};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Execute the datasets command
///
/// # Errors
/// Returns an error if the datasets root cannot be read
pub fn execute(library: &Library, mode: OutputMode) -> Result<()> {
    let datasets = library.list_datasets()?;

    if mode.is_json() {
        output::print_json(&datasets)?;
        return Ok(());
    }

    if datasets.is_empty() {
        if mode.is_verbose() {
            println!("No datasets found in {}.", library.root().display());
        }
    } else {
        if mode.is_verbose() {
            println!("Datasets in {}:", library.root().display());
        }
        for name in datasets {
            if mode.is_verbose() {
                println!("  {name}");
            } else {
                println!("{name}");
            }
        }
    }
    Ok(())
}
