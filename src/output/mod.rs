//! User-facing output for dossier.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Page plan and merge summaries
//! - Quiet and verbose modes

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::config::MergeConfig;
use crate::merge::{MergeOutcome, MergePlan, PageMapping};

/// Create an output formatter from configuration.
pub fn create_formatter(config: &MergeConfig) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display the page mapping, one line per section.
pub fn display_page_mapping(formatter: &OutputFormatter, mapping: &PageMapping) {
    for assignment in mapping.iter() {
        formatter.info(&format!(
            "  {:<28} page {:>4}  ({} page{})",
            assignment.key,
            assignment.start_page,
            assignment.page_count,
            if assignment.page_count == 1 { "" } else { "s" }
        ));
    }
}

/// Display a dry-run page plan.
pub fn display_plan(formatter: &OutputFormatter, plan: &MergePlan) {
    formatter.info("Page plan:");
    display_page_mapping(formatter, &plan.page_mapping);

    if !plan.contents_entries.is_empty() {
        formatter.info("Contents page:");
        for entry in &plan.contents_entries {
            formatter.info(&format!("  {}", crate::merge::format_entry_line(entry)));
        }
    }

    for skipped in &plan.skipped {
        formatter.warning(&format!("Would skip '{}': {}", skipped.key, skipped.reason));
    }
}

/// Display the summary of a completed merge.
pub fn display_outcome(formatter: &OutputFormatter, outcome: &MergeOutcome) {
    formatter.success(&format!(
        "Merged {} section(s) into {} ({} pages, {})",
        outcome.statistics.sections_merged,
        outcome.output_path.display(),
        outcome.statistics.total_pages,
        outcome.statistics.format_input_size()
    ));

    formatter.debug(&format!(
        "Load time {:.2}s, total time {:.2}s",
        outcome.statistics.load_time.as_secs_f64(),
        outcome.statistics.merge_time.as_secs_f64()
    ));

    if formatter.is_verbose() {
        display_page_mapping(formatter, &outcome.page_mapping);
    }

    for skipped in &outcome.skipped {
        formatter.warning(&format!("Skipped '{}': {}", skipped.key, skipped.reason));
    }
}
