//! Dossier merge pipeline.
//!
//! Three passes over the ordered section list: page accounting
//! ([`pages`]), contents-page generation ([`contents`]) and
//! concatenation ([`merger`]).

pub mod contents;
pub mod merger;
pub mod pages;

pub use contents::{ContentsEntry, build_contents_document, format_entry_line, letter_label};
pub use merger::{MergeOutcome, MergePlan, MergeStatistics, SectionMerger, SkippedSection};
pub use pages::{ASSUMED_CONTENTS_PAGES, PageAssignment, PageMapping, assign_start_pages};
