//! Tags command - read or edit the tags of a single image

use serde_json::json;

use crate::{
    Library, MicrotagError,
    cli::TagsCommand,
    output::{self, OutputMode},
    store::parse_tag_args,
};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Execute a tags subcommand
///
/// # Errors
/// Returns an error if the dataset or image does not exist, no tags were given
/// to `add`, or the tag document cannot be read or written
pub fn execute(library: &Library, command: &TagsCommand, mode: OutputMode) -> Result<()> {
    match command {
        TagsCommand::Get { dataset, file } => get(library, dataset, file, mode),
        TagsCommand::Set { dataset, file, tags } => set(library, dataset, file, parse_tag_args(tags), mode),
        TagsCommand::Add { dataset, file, tags } => add(library, dataset, file, &parse_tag_args(tags), mode),
    }
}

fn get(library: &Library, dataset: &str, file: &str, mode: OutputMode) -> Result<()> {
    let tags = library.get_tags(dataset, file)?;
    match mode {
        OutputMode::Json => output::print_json(&tags)?,
        OutputMode::Quiet => {
            for tag in &tags {
                println!("{tag}");
            }
        }
        OutputMode::Normal => println!("{dataset}/{file}: {}", output::tag_list(&tags)),
    }
    Ok(())
}

fn set(library: &Library, dataset: &str, file: &str, tags: Vec<String>, mode: OutputMode) -> Result<()> {
    let stored = library.set_tags(dataset, file, tags)?;
    match mode {
        OutputMode::Json => output::print_json(&json!({ "success": true, "tags": stored }))?,
        OutputMode::Quiet => {}
        OutputMode::Normal => println!("Set tags of {dataset}/{file} to {}", output::tag_list(&stored)),
    }
    Ok(())
}

fn add(library: &Library, dataset: &str, file: &str, tags: &[String], mode: OutputMode) -> Result<()> {
    if tags.is_empty() {
        return Err(MicrotagError::InvalidInput("No tags provided".into()));
    }
    let added = library.add_tags(dataset, file, tags)?;
    match mode {
        OutputMode::Json => output::print_json(&json!({ "success": true, "tagsAdded": added }))?,
        OutputMode::Quiet => {}
        OutputMode::Normal => println!(
            "Tagged {dataset}/{file} with: {} ({added} new)",
            tags.join(", ")
        ),
    }
    Ok(())
}
