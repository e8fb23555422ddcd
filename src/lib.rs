//! dossier - Merge catalog sections into a single dossier PDF.
//!
//! This library assembles quotation dossiers from named PDF sections:
//! fixed documents from a section catalog, a per-invocation budget
//! document, ad-hoc external files, and a generated table-of-contents
//! page with letter labels and computed start pages. It supports:
//!
//! - Catalog-driven section resolution with per-run overrides
//! - Page accounting with 1-based start pages
//! - Table-of-contents page generation
//! - Skip-and-continue handling of missing or corrupt sections
//! - Parallel section loading
//! - Atomic output writes
//!
//! # Examples
//!
//! ## Basic merge
//!
//! ```no_run
//! use dossier::catalog::SectionCatalog;
//! use dossier::config::MergeConfig;
//! use dossier::merge::SectionMerger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = SectionCatalog::new()
//!     .with_section("portadas", "/srv/dossier/portadas.pdf")
//!     .with_label("portadas", "Portadas");
//!
//! let config = MergeConfig {
//!     output: PathBuf::from("dossier.pdf"),
//!     ordered_keys: vec![
//!         "portadas".to_string(),
//!         "contenido_separadores".to_string(),
//!         "presupuesto_programacion".to_string(),
//!     ],
//!     budget_path: Some(PathBuf::from("presupuesto.pdf")),
//!     ..Default::default()
//! };
//!
//! let merger = SectionMerger::new(catalog);
//! let outcome = merger.merge(&config).await?;
//! println!("Created {} page dossier", outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using individual components
//!
//! ```no_run
//! use dossier::io::{PdfReader, PdfWriter};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(&PathBuf::from("input.pdf")).await?;
//! println!("PDF has {} pages", loaded.page_count);
//!
//! let writer = PdfWriter::new();
//! writer.save(&loaded.document, &PathBuf::from("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod utils;

// Re-export commonly used types
pub use catalog::SectionCatalog;
pub use config::MergeConfig;
pub use error::{DossierError, Result};
pub use merge::{MergeOutcome, SectionMerger};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
