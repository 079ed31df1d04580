//! Search command - find images by file name, dataset name or tag

use crate::{
    Library, MicrotagError,
    output::{self, OutputMode},
    search::SearchQuery,
};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Execute the search command
///
/// # Errors
/// Returns an error if neither a term nor a dataset is given, or a tag
/// document cannot be read
pub fn execute(
    library: &Library,
    term: Option<String>,
    dataset: Option<String>,
    mode: OutputMode,
) -> Result<()> {
    let query = SearchQuery { term, dataset };
    let results = library.search(&query)?;

    if mode.is_json() {
        output::print_json(&results)?;
        return Ok(());
    }

    if results.is_empty() {
        if mode.is_verbose() {
            println!("No images found matching the search criteria.");
        }
        return Ok(());
    }

    if mode.is_verbose() {
        println!("Found {} image(s):", results.len());
    }
    let quiet = !mode.is_verbose();
    for record in &results {
        println!("{}", output::image_with_tags(record, quiet));
    }
    Ok(())
}
