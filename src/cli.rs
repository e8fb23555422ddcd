//! CLI argument parsing for dossier.
//!
//! This module defines the command-line interface structure using `clap`
//! and the conversion into a validated [`MergeConfig`].

use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{CompressionLevel, MergeConfig, OverwriteMode};
use crate::error::{DossierError, Result};

/// Merge catalog sections into a single dossier PDF.
///
/// dossier assembles a quotation dossier from named sections: fixed
/// documents from a section catalog, a per-invocation budget document,
/// ad-hoc external files, and a generated table-of-contents page.
#[derive(Parser, Debug)]
#[command(name = "dossier")]
#[command(version)]
#[command(about = "Merge catalog sections into a single dossier PDF", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Section keys to merge, in final document order
    ///
    /// Keys are resolved against the section catalog. Two keys are
    /// reserved: the contents key (default "contenido_separadores")
    /// stands for the generated table-of-contents page and the budget
    /// key (default "presupuesto_programacion") for the file given
    /// with --budget.
    #[arg(required = true, value_name = "KEY")]
    pub keys: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Section catalog file (JSON)
    ///
    /// Maps section keys to their backing PDF files and display labels.
    /// Without a catalog only the reserved keys and --external entries
    /// resolve.
    #[arg(long, value_name = "FILE", env = "DOSSIER_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Budget document for the reserved budget key
    #[arg(short, long, value_name = "FILE")]
    pub budget: Option<PathBuf>,

    /// Supply or override a section file as KEY=PATH (repeatable)
    ///
    /// Entries overlay the catalog, so a single run can substitute one
    /// of the fixed sections.
    #[arg(short, long = "external", value_name = "KEY=PATH")]
    pub external: Vec<String>,

    /// Title rendered on the generated contents page
    #[arg(long, value_name = "TEXT", default_value = "Contenido")]
    pub title: String,

    /// Dry run - compute and display the page plan without creating output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the merge report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Verbose output - show per-section detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for output PDF
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Number of parallel jobs for loading sections
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl Cli {
    /// Convert CLI arguments into a validated [`MergeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if an --external entry is malformed, the
    /// compression level is invalid, or configuration validation fails.
    pub fn to_config(&self) -> Result<MergeConfig> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let mut external_files = HashMap::new();
        for entry in &self.external {
            let (key, path) = parse_key_val(entry)?;
            if external_files.insert(key.clone(), path).is_some() {
                return Err(DossierError::invalid_config(format!(
                    "Duplicate --external entry for key: {key}"
                )));
            }
        }

        let config = MergeConfig {
            output: self.output.clone(),
            ordered_keys: self.keys.clone(),
            budget_path: self.budget.clone(),
            external_files,
            contents_title: self.title.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            compression,
            jobs: self.jobs,
        };

        config.validate().map_err(|e| {
            DossierError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}

/// Parse a KEY=PATH pair from an --external argument.
fn parse_key_val(entry: &str) -> Result<(String, PathBuf)> {
    let Some((key, path)) = entry.split_once('=') else {
        return Err(DossierError::invalid_config(format!(
            "Invalid --external entry '{entry}': expected KEY=PATH"
        )));
    };

    if key.is_empty() || path.is_empty() {
        return Err(DossierError::invalid_config(format!(
            "Invalid --external entry '{entry}': key and path must be non-empty"
        )));
    }

    Ok((key.to_string(), PathBuf::from(path)))
}
