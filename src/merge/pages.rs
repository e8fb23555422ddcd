//! Page accounting for the dossier merge.
//!
//! The first merge pass assigns every section its 1-based starting page
//! in the final document. It is implemented as a fold over the ordered
//! section list producing an immutable [`PageMapping`], so it can be
//! tested independently of file loading and concatenation.

use serde::Serialize;

/// Assumed page cost of the generated contents page.
///
/// The contents page is rendered after page accounting, so its true
/// length is unknown during the first pass. The dossier format assumes
/// it always fits on one page; if the entry list ever overflows, every
/// start page after the contents section is off by the overflow amount.
/// This is a documented limitation, not an oversight.
pub const ASSUMED_CONTENTS_PAGES: u32 = 1;

/// Starting page and page count for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageAssignment {
    /// Section key.
    pub key: String,

    /// 1-based page at which this section begins in the final document.
    pub start_page: u32,

    /// Number of pages this section contributes (actual count, the
    /// assumed count for the contents page, or zero for sections that
    /// could not be resolved or read).
    pub page_count: u32,
}

/// Mapping from section keys to starting pages, in ordered-list order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageMapping {
    assignments: Vec<PageAssignment>,
}

impl PageMapping {
    /// Starting page for a key, if the key is in the mapping.
    pub fn start_page(&self, key: &str) -> Option<u32> {
        self.assignments
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.start_page)
    }

    /// Iterate assignments in ordered-list order.
    pub fn iter(&self) -> impl Iterator<Item = &PageAssignment> {
        self.assignments.iter()
    }

    /// Number of sections in the mapping.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Total pages contributed by all sections.
    pub fn total_pages(&self) -> u32 {
        self.assignments.iter().map(|a| a.page_count).sum()
    }
}

/// Assign starting pages to an ordered list of `(key, page_count)` pairs.
///
/// The first section starts at page 1; each subsequent section starts at
/// 1 plus the sum of all preceding page counts. Zero-page sections keep
/// their place in the mapping without advancing the counter.
pub fn assign_start_pages<I>(sections: I) -> PageMapping
where
    I: IntoIterator<Item = (String, u32)>,
{
    let (assignments, _next) = sections.into_iter().fold(
        (Vec::new(), 1u32),
        |(mut assignments, next), (key, page_count)| {
            assignments.push(PageAssignment {
                key,
                start_page: next,
                page_count,
            });
            (assignments, next + page_count)
        },
    );

    PageMapping { assignments }
}
