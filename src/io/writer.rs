//! PDF writing and saving operations.
//!
//! Writes are atomic by default: the document is written to a temporary
//! sibling file and renamed into place, so a failed write never leaves a
//! truncated dossier at the output path.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{DossierError, Result};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress the PDF before writing.
    pub compress: bool,

    /// Renumber objects for a consistent structure.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            optimize: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        crate::utils::format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without compression (faster but larger files).
    pub fn without_compression() -> Self {
        Self {
            options: WriteOptions {
                compress: false,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        let _stats = self.save_with_stats(doc, path).await?;
        Ok(())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the output file cannot be created or the
    /// write fails; with atomic writes the rename failure is reported
    /// against the final path.
    pub async fn save_with_stats(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        // lopdf serialization mutates the document; work on a clone in a
        // blocking task
        let mut doc_clone = doc.clone();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            if options.compress {
                doc_clone.compress();
            }

            if options.optimize {
                doc_clone.renumber_objects();
            }

            let write_path = if options.atomic {
                path_buf.with_extension("tmp")
            } else {
                path_buf.clone()
            };

            let file = std::fs::File::create(&write_path).map_err(|e| {
                DossierError::FailedToCreateOutput {
                    path: write_path.clone(),
                    source: e,
                }
            })?;

            let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

            doc_clone
                .save_to(&mut writer)
                .map_err(|e| DossierError::FailedToWrite {
                    path: write_path.clone(),
                    source: std::io::Error::other(e),
                })?;

            writer.flush().map_err(|e| DossierError::FailedToWrite {
                path: write_path.clone(),
                source: e,
            })?;

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|e| {
                    DossierError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;
            }

            let write_time = start.elapsed();
            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, DossierError>(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| DossierError::other(format!("Write task failed: {e}")))??;

        Ok(stats)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
