//! Core dossier merge implementation.
//!
//! The merge runs in three passes. Page accounting resolves every key in
//! the ordered list, loads the content-bearing sections, and assigns
//! 1-based start pages. Contents generation renders the table-of-contents
//! page from that mapping into a scratch directory. Concatenation builds
//! the final document in ordered-list order and writes it atomically.
//!
//! Section-level failures (unresolvable keys, missing or corrupt files,
//! a failed contents render) are absorbed: the section is skipped with a
//! warning and reported in the [`MergeOutcome`]. Only an empty result or
//! a failed final write aborts the merge.

use lopdf::{Document, Object, ObjectId};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::catalog::{SectionCatalog, SectionSource};
use crate::config::{CompressionLevel, MergeConfig};
use crate::error::{DossierError, Result};
use crate::io::{LoadedPdf, PdfReader, PdfWriter, WriteOptions};
use crate::merge::contents::{self, ContentsEntry};
use crate::merge::pages::{ASSUMED_CONTENTS_PAGES, PageMapping, assign_start_pages};

/// A section that was dropped from the merge, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedSection {
    /// Section key from the ordered list.
    pub key: String,

    /// Why the section was skipped.
    pub reason: String,
}

/// Statistics about a completed merge.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Number of sections that made it into the dossier.
    pub sections_merged: usize,

    /// Number of sections skipped.
    pub sections_skipped: usize,

    /// Total pages in the final document.
    pub total_pages: usize,

    /// Wall-clock time for the whole merge.
    pub merge_time: Duration,

    /// Time spent loading section documents.
    pub load_time: Duration,

    /// Combined size of the section source files.
    pub input_size: u64,

    /// Whether a contents page was generated and included.
    pub contents_generated: bool,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        crate::utils::format_file_size(self.input_size)
    }
}

/// Result of a completed merge.
#[derive(Debug, Serialize)]
pub struct MergeOutcome {
    /// Where the dossier was written.
    pub output_path: PathBuf,

    /// Start page per merged section, in final document order.
    pub page_mapping: PageMapping,

    /// Sections that were dropped, with reasons.
    pub skipped: Vec<SkippedSection>,

    /// Merge statistics.
    pub statistics: MergeStatistics,
}

/// The page plan for a merge, computed without writing anything.
#[derive(Debug, Serialize)]
pub struct MergePlan {
    /// Start page per section that would be merged.
    pub page_mapping: PageMapping,

    /// Lines the generated contents page would carry.
    pub contents_entries: Vec<ContentsEntry>,

    /// Sections that would be dropped, with reasons.
    pub skipped: Vec<SkippedSection>,
}

/// One resolved section, possibly with its loaded document.
struct PreparedSection {
    key: String,
    source: SectionSource,
    document: Option<LoadedPdf>,
    page_count: u32,
}

/// Resolution and loading state shared by `plan` and `merge`.
struct Prepared {
    sections: Vec<PreparedSection>,
    skipped: Vec<SkippedSection>,
    load_time: Duration,
}

/// Merges catalog sections into a single dossier document.
pub struct SectionMerger {
    catalog: SectionCatalog,
    reader: PdfReader,
}

impl SectionMerger {
    /// Create a merger over a section catalog.
    pub fn new(catalog: SectionCatalog) -> Self {
        Self {
            catalog,
            reader: PdfReader::new(),
        }
    }

    /// Compute the page plan without producing any output.
    ///
    /// Section documents are still loaded, since page accounting needs
    /// their real page counts.
    ///
    /// # Errors
    ///
    /// Returns [`DossierError::NoSectionsMerged`] if no content-bearing
    /// section could be loaded.
    pub async fn plan(&self, config: &MergeConfig) -> Result<MergePlan> {
        let prepared = self.prepare(config).await?;

        let mapping = page_mapping_of(&prepared.sections);
        let entries = contents_entries_of(&prepared.sections, &mapping, &self.catalog);

        Ok(MergePlan {
            page_mapping: mapping,
            contents_entries: entries,
            skipped: prepared.skipped,
        })
    }

    /// Merge the configured sections and write the dossier.
    ///
    /// # Errors
    ///
    /// Returns an error if no section could be merged or the output file
    /// cannot be written. Per-section failures are reported through
    /// [`MergeOutcome::skipped`] instead.
    pub async fn merge(&self, config: &MergeConfig) -> Result<MergeOutcome> {
        let merge_start = Instant::now();

        let mut prepared = self.prepare(config).await?;

        let mapping = page_mapping_of(&prepared.sections);
        let entries = contents_entries_of(&prepared.sections, &mapping, &self.catalog);

        // Pass 2: render the contents page into a scratch directory and
        // load it back like any other section. The directory is removed
        // when `scratch` drops, whether or not the merge succeeds.
        let scratch = tempfile::tempdir().map_err(DossierError::from)?;
        let mut contents_generated = false;

        for section in &mut prepared.sections {
            if section.source != SectionSource::Contents {
                continue;
            }

            let artifact = scratch.path().join("contenido.pdf");
            match self
                .render_contents(&config.contents_title, &entries, &artifact)
                .await
            {
                Ok(loaded) => {
                    section.document = Some(loaded);
                    contents_generated = true;
                }
                Err(e) => {
                    eprintln!("Warning: Skipping contents page: {e}");
                    prepared.skipped.push(SkippedSection {
                        key: section.key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Pass 3: concatenate in ordered-list order
        let docs: Vec<&LoadedPdf> = prepared
            .sections
            .iter()
            .filter_map(|s| s.document.as_ref())
            .collect();

        let document = concatenate(&docs, config.compression)?;
        let total_pages = document.get_pages().len();

        let writer = PdfWriter::with_options(WriteOptions {
            // Compression already ran during concatenation
            compress: false,
            optimize: false,
            ..Default::default()
        });
        let write_stats = writer.save_with_stats(&document, &config.output).await?;

        let statistics = MergeStatistics {
            sections_merged: docs.len(),
            sections_skipped: prepared.skipped.len(),
            total_pages,
            merge_time: merge_start.elapsed(),
            load_time: prepared.load_time,
            input_size: prepared
                .sections
                .iter()
                .filter_map(|s| s.document.as_ref())
                .map(|d| d.file_size)
                .sum(),
            contents_generated,
        };

        Ok(MergeOutcome {
            output_path: write_stats.output_path,
            page_mapping: mapping,
            skipped: prepared.skipped,
            statistics,
        })
    }

    /// Pass 1: resolve every key and load the content-bearing sections.
    async fn prepare(&self, config: &MergeConfig) -> Result<Prepared> {
        let mut sections = Vec::with_capacity(config.ordered_keys.len());
        let mut skipped = Vec::new();

        for key in &config.ordered_keys {
            let source =
                self.catalog
                    .resolve(key, config.budget_path.as_deref(), &config.external_files);
            sections.push(PreparedSection {
                key: key.clone(),
                source,
                document: None,
                page_count: 0,
            });
        }

        // Load file-backed sections together so batch parallelism applies
        let load_start = Instant::now();
        let indexed_paths: Vec<(usize, PathBuf)> = sections
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.source.path().map(|p| (i, p.to_path_buf())))
            .collect();

        let paths: Vec<PathBuf> = indexed_paths.iter().map(|(_, p)| p.clone()).collect();
        let results = self.reader.load_all(&paths, config.effective_jobs()).await;
        let load_time = load_start.elapsed();

        for ((idx, _), result) in indexed_paths.into_iter().zip(results) {
            let section = &mut sections[idx];
            match result {
                Ok(loaded) => {
                    section.page_count = loaded.page_count as u32;
                    section.document = Some(loaded);
                }
                Err(e) => {
                    eprintln!("Warning: Skipping section '{}': {e}", section.key);
                    skipped.push(SkippedSection {
                        key: section.key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        for section in &mut sections {
            match section.source {
                SectionSource::Contents => section.page_count = ASSUMED_CONTENTS_PAGES,
                SectionSource::Unresolved => {
                    eprintln!(
                        "Warning: Skipping section '{}': no file is known for this key",
                        section.key
                    );
                    skipped.push(SkippedSection {
                        key: section.key.clone(),
                        reason: "no file is known for this key".to_string(),
                    });
                }
                _ => {}
            }
        }

        if !sections.iter().any(|s| s.document.is_some()) {
            return Err(DossierError::NoSectionsMerged);
        }

        Ok(Prepared {
            sections,
            skipped,
            load_time,
        })
    }

    /// Render the contents page to `artifact` and load it back.
    async fn render_contents(
        &self,
        title: &str,
        entries: &[ContentsEntry],
        artifact: &std::path::Path,
    ) -> Result<LoadedPdf> {
        let doc = contents::build_contents_document(title, entries)?;

        let writer = PdfWriter::with_options(WriteOptions {
            atomic: false,
            compress: false,
            optimize: false,
            ..Default::default()
        });
        writer.save(&doc, artifact).await?;

        self.reader.load(artifact).await
    }
}

/// Start pages for every key in the ordered list.
///
/// Skipped sections keep a recorded start page but contribute zero
/// pages, so the sections that remain pack with no page gaps.
fn page_mapping_of(sections: &[PreparedSection]) -> PageMapping {
    assign_start_pages(sections.iter().map(|s| (s.key.clone(), s.page_count)))
}

/// Contents-page lines for the content-bearing sections.
///
/// Labels run A, B, C, ... in final document order; the contents page
/// itself and unresolvable keys get no line. A section whose file could
/// not be read is still listed at its recorded start page. Sections
/// past the label alphabet are merged but dropped from the listing with
/// a warning.
fn contents_entries_of(
    sections: &[PreparedSection],
    mapping: &PageMapping,
    catalog: &SectionCatalog,
) -> Vec<ContentsEntry> {
    let listed = sections.iter().filter(|s| s.source.is_content_bearing());

    let mut entries = Vec::new();
    for (i, section) in listed.enumerate() {
        let Some(label) = contents::letter_label(i) else {
            eprintln!(
                "Warning: Contents page lists only {} sections; '{}' is merged but not listed",
                contents::MAX_ENTRIES,
                section.key
            );
            continue;
        };

        let Some(page) = mapping.start_page(&section.key) else {
            continue;
        };

        entries.push(ContentsEntry {
            label,
            name: catalog.display_name(&section.key),
            page,
        });
    }

    entries
}

/// Concatenate loaded documents in order and apply compression.
fn concatenate(docs: &[&LoadedPdf], compression: CompressionLevel) -> Result<Document> {
    let Some((first, rest)) = docs.split_first() else {
        return Err(DossierError::NoSectionsMerged);
    };

    let mut merged = first.document.clone();
    let mut max_id = merged.max_id;

    for loaded in rest {
        let mut doc = loaded.document.clone();

        // Renumber objects to avoid ID conflicts
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        merged.objects.extend(doc.objects);

        add_pages_to_tree(&mut merged, &doc_pages)?;
    }

    match compression {
        CompressionLevel::None => {}
        CompressionLevel::Standard => {
            merged.compress();
        }
        CompressionLevel::Maximum => {
            merged.compress();
            merged.prune_objects();
        }
    }

    // Always renumber for consistency
    merged.renumber_objects();

    Ok(merged)
}

/// Add page references to the merged document's page tree.
fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let catalog = merged
        .catalog_mut()
        .map_err(|e| DossierError::other(format!("Failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| DossierError::other(format!("Failed to get pages reference: {e}")))?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| DossierError::other(format!("Failed to get pages object: {e}")))?;

    let Object::Dictionary(dict) = pages_dict else {
        return Err(DossierError::other("Pages object is not a dictionary"));
    };

    let kids = dict
        .get_mut(b"Kids")
        .map_err(|_| DossierError::other("Pages dictionary missing Kids array"))?;

    let Object::Array(kids_array) = kids else {
        return Err(DossierError::other("Kids is not an array"));
    };

    for &page_id in page_ids {
        kids_array.push(Object::Reference(page_id));
    }

    let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
