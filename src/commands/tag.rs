//! Tag command - add tags to every image matching dataset and image patterns

use colored::Colorize;
use dialoguer::Confirm;

use crate::{
    Library, MicrotagError,
    bulk::{BulkPlan, BulkTagReport, BulkTagRequest},
    output::{self, OutputMode},
};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Datasets and images listed before truncating a preview
const PREVIEW_LIMIT: usize = 10;

/// Options for the tag command beyond the request itself
#[derive(Debug, Clone, Copy, Default)]
pub struct TagOptions {
    /// Resolve and print the plan, write nothing
    pub dry_run: bool,
    /// Prompt before writing
    pub confirm: bool,
}

/// Execute the tag command
///
/// # Errors
/// Returns an error if the request has no tags, no dataset or image matches,
/// or the confirmation prompt fails
pub fn execute(
    library: &Library,
    request: &BulkTagRequest,
    options: TagOptions,
    mode: OutputMode,
) -> Result<()> {
    let plan = library.plan_bulk_tag(request)?;

    if options.dry_run {
        if mode.is_json() {
            output::print_json(&plan)?;
        } else {
            print_dry_run_preview(&plan);
        }
        return Ok(());
    }

    if options.confirm && mode.is_verbose() && !confirm_bulk_operation(&plan)? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = library.apply_bulk_tag(plan);
    match mode {
        OutputMode::Json => output::print_json(&report)?,
        OutputMode::Quiet => {
            for failure in &report.failures {
                eprintln!("{}: {}", failure.dataset, failure.error);
            }
        }
        OutputMode::Normal => print_summary(&report),
    }
    Ok(())
}

/// Print dry-run preview of a bulk plan
pub fn print_dry_run_preview(plan: &BulkPlan) {
    println!("{}", "=== Dry Run Mode ===".yellow().bold());
    println!(
        "Would add tags [{}] to {} image(s) in {} dataset(s)",
        plan.tags.join(", ").cyan(),
        plan.image_count(),
        plan.targets.len()
    );
    for target in plan.targets.iter().take(PREVIEW_LIMIT) {
        println!("\n{} ({} image(s))", target.dataset.bold(), target.images.len());
        output::print_truncated(&target.images, PREVIEW_LIMIT);
    }
    if plan.targets.len() > PREVIEW_LIMIT {
        println!("\n... and {} more dataset(s)", plan.targets.len() - PREVIEW_LIMIT);
    }
    if !plan.failures.is_empty() {
        println!("\n{}", "Datasets that cannot be read:".red().bold());
        for failure in &plan.failures {
            println!("{}", output::failure_line(&failure.dataset, &failure.error));
        }
    }
    println!("\n{}", "Run without --dry-run to apply changes.".yellow());
}

/// Show confirmation prompt for a bulk plan
///
/// # Errors
/// Returns `MicrotagError::InvalidInput` if the prompt cannot be shown
pub fn confirm_bulk_operation(plan: &BulkPlan) -> Result<bool> {
    let prompt = format!(
        "TAG {} image(s) in {} dataset(s) with [{}]?",
        plan.image_count(),
        plan.targets.len(),
        plan.tags.join(", ")
    );
    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| MicrotagError::InvalidInput(format!("Failed to get confirmation: {e}")))
}

/// Print per-dataset results and totals
pub fn print_summary(report: &BulkTagReport) {
    println!("\n{}", "=== Bulk Tag Summary ===".bold());
    for summary in &report.per_dataset {
        let line = format!(
            "{}: {} matched, {} updated, {} tag(s) added",
            summary.dataset, summary.images_matched, summary.images_updated, summary.tags_added
        );
        if summary.images_updated > 0 {
            println!("  {} {line}", "✓".green());
        } else {
            println!("  {} {line}", "⊘".yellow());
        }
    }
    println!(
        "  {} {} image(s), {} tag(s)",
        "Total:".bold(),
        report.total_images,
        report.total_tags_added
    );
    if report.is_partial() {
        println!("\n{}", "Failed datasets:".red().bold());
        for failure in &report.failures {
            println!("{}", output::failure_line(&failure.dataset, &failure.error));
        }
    }
}
