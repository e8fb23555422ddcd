//! PDF reading and loading operations.
//!
//! Loads section documents off the async runtime via `spawn_blocking`,
//! with sequential or bounded-parallel batch loading. A [`LoadedPdf`]
//! carries the page count used by the merger's page accounting pass.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{DossierError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// PDF reader for section documents.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or cannot be read
    /// - File is not a valid PDF
    /// - PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        if !path_buf.exists() {
            return Err(DossierError::file_not_found(path_buf));
        }

        if !path_buf.is_file() {
            return Err(DossierError::failed_to_load_pdf(path_buf, "Not a file"));
        }

        // lopdf parsing is CPU-bound; keep it off the async runtime
        let load_path = path_buf.clone();
        let doc = task::spawn_blocking(move || Document::load(&load_path))
            .await
            .map_err(|e| DossierError::other(format!("Load task failed: {e}")))?
            .map_err(|e| DossierError::failed_to_load_pdf(path_buf.clone(), e.to_string()))?;

        if doc.get_pages().is_empty() {
            return Err(DossierError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        let load_time = start.elapsed();
        Ok(LoadedPdf::new(doc, path_buf, load_time))
    }

    /// Load multiple PDF documents sequentially.
    ///
    /// Returns one result per input path, in input order.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            results.push(self.load(path).await);
        }

        results
    }

    /// Load multiple PDF documents in parallel.
    ///
    /// Uses at most `workers` concurrent loads. Results come back in
    /// input order regardless of completion order.
    pub async fn load_parallel(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        use futures::stream::{self, StreamExt};

        let workers = workers.max(1);

        let tasks = paths.iter().enumerate().map(|(idx, path)| {
            let path = path.clone();
            let reader = self.clone();
            async move { (idx, reader.load(&path).await) }
        });

        let mut indexed: Vec<(usize, LoadResult)> = stream::iter(tasks)
            .buffer_unordered(workers)
            .collect::<Vec<_>>()
            .await;

        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, result)| result).collect()
    }

    /// Load all PDFs with automatic parallelization.
    ///
    /// Sequential loading is used for small batches to reduce overhead.
    pub async fn load_all(&self, paths: &[PathBuf], max_workers: usize) -> Vec<LoadResult> {
        if paths.len() <= 3 {
            self.load_sequential(paths).await
        } else {
            self.load_parallel(paths, max_workers).await
        }
    }
}
