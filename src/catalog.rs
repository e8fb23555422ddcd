//! Section catalog and key resolution.
//!
//! A [`SectionCatalog`] is the immutable, injected configuration that
//! maps the fixed, well-known section keys of a dossier to their backing
//! PDF files, and section keys to human-readable labels for the
//! generated table of contents. It also names the two reserved keys: the
//! key that stands for the generated contents page and the key that
//! stands for the per-invocation budget document.
//!
//! Resolution order for a key is: reserved contents, reserved budget,
//! external file map, catalog. The external map overlays the catalog so
//! a single invocation can substitute one of the fixed sections.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{DossierError, Result};

/// Default reserved key for the generated table of contents.
pub const DEFAULT_CONTENTS_KEY: &str = "contenido_separadores";

/// Default reserved key for the generated budget document.
pub const DEFAULT_BUDGET_KEY: &str = "presupuesto_programacion";

/// Where a section key resolved to for one merge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSource {
    /// The generated table-of-contents page (rendered during the merge).
    Contents,
    /// The caller-supplied budget document.
    Budget(PathBuf),
    /// A per-invocation external file.
    External(PathBuf),
    /// A fixed file from the catalog.
    Catalog(PathBuf),
    /// The key matched no known source.
    Unresolved,
}

impl SectionSource {
    /// Physical path backing this source, if it has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Budget(p) | Self::External(p) | Self::Catalog(p) => Some(p),
            Self::Contents | Self::Unresolved => None,
        }
    }

    /// Whether this source represents real document content.
    ///
    /// Content-bearing sections get an entry on the generated contents
    /// page; the contents page itself and unresolvable keys do not.
    pub fn is_content_bearing(&self) -> bool {
        matches!(
            self,
            Self::Budget(_) | Self::External(_) | Self::Catalog(_)
        )
    }
}

/// Immutable mapping from section keys to files and display labels.
///
/// Built in code or loaded from a JSON file:
///
/// ```json
/// {
///   "sections": { "portadas": "/srv/dossier/portadas.pdf" },
///   "labels": { "portadas": "Portadas" },
///   "contents_key": "contenido_separadores",
///   "budget_key": "presupuesto_programacion"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionCatalog {
    /// Fixed section key → file path entries.
    pub sections: BTreeMap<String, PathBuf>,

    /// Section key → human-readable label for the contents page.
    pub labels: BTreeMap<String, String>,

    /// Reserved key denoting the generated contents page.
    pub contents_key: String,

    /// Reserved key denoting the generated budget document.
    pub budget_key: String,
}

impl Default for SectionCatalog {
    fn default() -> Self {
        Self {
            sections: BTreeMap::new(),
            labels: BTreeMap::new(),
            contents_key: DEFAULT_CONTENTS_KEY.to_string(),
            budget_key: DEFAULT_BUDGET_KEY.to_string(),
        }
    }
}

impl SectionCatalog {
    /// Create an empty catalog with the default reserved keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fixed section entry.
    pub fn with_section(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.sections.insert(key.into(), path.into());
        self
    }

    /// Add a display label for a key.
    pub fn with_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(key.into(), label.into());
        self
    }

    /// Override the reserved contents key.
    pub fn with_contents_key(mut self, key: impl Into<String>) -> Self {
        self.contents_key = key.into();
        self
    }

    /// Override the reserved budget key.
    pub fn with_budget_key(mut self, key: impl Into<String>) -> Self {
        self.budget_key = key.into();
        self
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DossierError::InvalidCatalog`] if the file cannot be
    /// read or does not parse as a catalog.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| DossierError::InvalidCatalog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| DossierError::InvalidCatalog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Resolve a key against this catalog and the per-invocation inputs.
    ///
    /// # Arguments
    ///
    /// * `key` - Section key from the ordered list
    /// * `budget_path` - Path of the generated budget document, if any
    /// * `external` - Per-invocation external file map
    pub fn resolve(
        &self,
        key: &str,
        budget_path: Option<&Path>,
        external: &HashMap<String, PathBuf>,
    ) -> SectionSource {
        if key == self.contents_key {
            return SectionSource::Contents;
        }

        if key == self.budget_key {
            return match budget_path {
                Some(p) => SectionSource::Budget(p.to_path_buf()),
                None => SectionSource::Unresolved,
            };
        }

        if let Some(p) = external.get(key) {
            return SectionSource::External(p.clone());
        }

        if let Some(p) = self.sections.get(key) {
            return SectionSource::Catalog(p.clone());
        }

        SectionSource::Unresolved
    }

    /// Display name for a key on the contents page.
    ///
    /// Falls back to an uppercased, underscore-to-space transliteration
    /// for keys with no configured label.
    pub fn display_name(&self, key: &str) -> String {
        match self.labels.get(key) {
            Some(label) => label.clone(),
            None => fallback_label(key),
        }
    }
}

/// Uppercase a key and turn underscores into spaces.
fn fallback_label(key: &str) -> String {
    key.chars()
        .map(|c| if c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_uppercase()
}
