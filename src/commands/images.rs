//! Images command - list images with their tags

use crate::{Library, MicrotagError, output::{self, OutputMode}};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Execute the images command
///
/// # Errors
/// Returns an error if the dataset does not exist or a tag document is unreadable
pub fn execute(library: &Library, dataset: Option<&str>, mode: OutputMode) -> Result<()> {
    let records = library.list_images(dataset)?;

    if mode.is_json() {
        output::print_json(&records)?;
        return Ok(());
    }

    if records.is_empty() {
        if mode.is_verbose() {
            println!("No images found.");
        }
        return Ok(());
    }

    if mode.is_verbose() {
        match dataset {
            Some(name) => println!("Images in {name}:"),
            None => println!("Images:"),
        }
    }
    let quiet = !mode.is_verbose();
    for record in &records {
        println!("{}", output::image_with_tags(record, quiet));
    }
    Ok(())
}
