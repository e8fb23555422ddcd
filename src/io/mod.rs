//! PDF input/output primitives.
//!
//! The reader is the page-counting/loading primitive the merger builds
//! on; the writer owns atomic output writes.

pub mod reader;
pub mod writer;

pub use reader::{LoadResult, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
