//! dossier - Merge catalog sections into a single dossier PDF.

use clap::Parser;
use std::process;

use dossier::catalog::SectionCatalog;
use dossier::cli::Cli;
use dossier::config::{MergeConfig, OverwriteMode};
use dossier::error::DossierError;
use dossier::merge::SectionMerger;
use dossier::output::{OutputFormatter, create_formatter, display_outcome, display_plan};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), DossierError> {
    let config = cli.to_config()?;

    let catalog = match cli.catalog {
        Some(ref path) => SectionCatalog::from_json_file(path)?,
        None => SectionCatalog::new(),
    };

    let formatter = create_formatter(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", dossier::NAME, dossier::VERSION));
        formatter.blank_line();
    }

    let merger = SectionMerger::new(catalog);

    if config.dry_run {
        let plan = merger.plan(&config).await?;

        if cli.json {
            print_json(&plan)?;
        } else {
            display_plan(&formatter, &plan);
            formatter.blank_line();
            formatter.success("Dry run completed successfully");
            formatter.info(&format!("  Output would be: {}", config.output.display()));
            formatter.info("  Run without --dry-run to create the dossier");
        }
        return Ok(());
    }

    handle_output_overwrite(&config, &formatter)?;

    formatter.info("Merging sections...");
    let outcome = merger.merge(&config).await?;

    if cli.json {
        print_json(&outcome)?;
    } else {
        display_outcome(&formatter, &outcome);

        if formatter.is_verbose() {
            formatter.blank_line();
            formatter.section("Statistics");
            formatter.detail(
                "Sections",
                &outcome.statistics.sections_merged.to_string(),
            );
            formatter.detail(
                "Skipped",
                &outcome.statistics.sections_skipped.to_string(),
            );
            formatter.detail("Total pages", &outcome.statistics.total_pages.to_string());
            formatter.detail("Input size", &outcome.statistics.format_input_size());
            formatter.detail(
                "Load time",
                &format!("{:.2}s", outcome.statistics.load_time.as_secs_f64()),
            );
            formatter.detail(
                "Merge time",
                &format!("{:.2}s", outcome.statistics.merge_time.as_secs_f64()),
            );
        }
    }

    Ok(())
}

/// Print a serializable report on stdout.
fn print_json<T: serde::Serialize>(value: &T) -> Result<(), DossierError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| DossierError::other(format!("Failed to serialize report: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Handle output file overwrite scenarios.
fn handle_output_overwrite(
    config: &MergeConfig,
    formatter: &OutputFormatter,
) -> Result<(), DossierError> {
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(DossierError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            // Quiet mode cannot prompt; treat as no-clobber
            if formatter.is_quiet() {
                return Err(DossierError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| DossierError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(DossierError::Cancelled)
            }
        }
    }
}
