//! Merge request configuration.
//!
//! A [`MergeConfig`] describes one merge invocation: where the dossier
//! goes, which sections it contains and in what order, and the
//! per-invocation inputs (budget document, external files). The section
//! catalog itself is not part of this structure; it is injected into the
//! merger at construction time so tests can substitute fixtures.

use anyhow::{Result, bail};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::DossierError;

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact quality and structure.
    None,
    /// Balanced compression - good trade-off between size and processing time.
    #[default]
    Standard,
    /// Maximum compression - smallest file size, longer processing time.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = DossierError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(DossierError::InvalidConfig {
                message: format!(
                    "Invalid compression level: {s}. Must be one of: none, standard, maximum"
                ),
            }),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for one dossier merge.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Output PDF file path.
    pub output: PathBuf,

    /// Ordered section keys; defines both processing and final document
    /// order.
    pub ordered_keys: Vec<String>,

    /// Path to the generated budget document, resolved by the reserved
    /// budget key.
    pub budget_path: Option<PathBuf>,

    /// Per-invocation key → path overlay for externally supplied files.
    pub external_files: HashMap<String, PathBuf>,

    /// Title rendered at the top of the generated contents page.
    pub contents_title: String,

    /// Dry run mode - compute the page plan without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Number of parallel jobs for loading sections (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::new(),
            ordered_keys: Vec::new(),
            budget_path: None,
            external_files: HashMap::new(),
            contents_title: "Contenido".to_string(),
            dry_run: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::Prompt,
            compression: CompressionLevel::Standard,
            jobs: None,
        }
    }
}

impl MergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No section keys are specified
    /// - A key occurs more than once in the ordered list
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output path collides with a source file
    pub fn validate(&self) -> Result<()> {
        if self.ordered_keys.is_empty() {
            bail!("No section keys specified");
        }

        let mut seen = std::collections::HashSet::new();
        for key in &self.ordered_keys {
            if !seen.insert(key.as_str()) {
                bail!("Duplicate section key in ordered list: {key}");
            }
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if let Some(ref budget) = self.budget_path
            && budget == &self.output
        {
            bail!(
                "Output file cannot be the same as the budget document: {}",
                self.output.display()
            );
        }

        for path in self.external_files.values() {
            if path == &self.output {
                bail!(
                    "Output file cannot be the same as an external file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Get the effective number of parallel loading jobs.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
