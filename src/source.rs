//! Catalog sources: where a load cycle gets its catalogs from.
//!
//! A source hands back one slot per category, in merge precedence order:
//!
//! ```text
//!   slot 0  instruments   telescopes.json    required
//!   slot 1  surveys       surveys.json       required
//!   slot 2  simulations   simulations.json   required
//!   slot 3  models        sams.json          required
//!   slot 4  persons       persons.json       optional (slot omitted if absent)
//! ```
//!
//! A required catalog that cannot be found comes back as `None`, which the
//! merger turns into [`Error::MissingCatalog`](crate::Error::MissingCatalog).
//! Remote fetching lives outside this crate; implement [`CatalogSource`] for it.

use crate::catalog::Catalog;
use crate::Result;
use hoverscope_core::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Produces the catalogs for one load cycle.
pub trait CatalogSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fetch all catalogs, in precedence order.
    ///
    /// # Errors
    ///
    /// Any failure that makes the whole fetch unusable. A merely absent
    /// required catalog is a `None` slot, not an error.
    fn fetch(&self) -> Result<Vec<Option<Catalog>>>;
}

/// File name of each category's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFiles {
    /// Instrument catalog.
    pub instruments: String,
    /// Survey catalog.
    pub surveys: String,
    /// Simulation catalog.
    pub simulations: String,
    /// Semi-analytic model catalog.
    pub models: String,
    /// Person catalog (optional on disk).
    pub persons: String,
}

impl Default for CatalogFiles {
    fn default() -> Self {
        Self {
            instruments: "telescopes.json".to_string(),
            surveys: "surveys.json".to_string(),
            simulations: "simulations.json".to_string(),
            models: "sams.json".to_string(),
            persons: "persons.json".to_string(),
        }
    }
}

impl CatalogFiles {
    /// File name for a category.
    #[must_use]
    pub fn for_category(&self, category: Category) -> &str {
        match category {
            Category::Instrument => &self.instruments,
            Category::Survey => &self.surveys,
            Category::Simulation => &self.simulations,
            Category::Model => &self.models,
            Category::Person => &self.persons,
        }
    }
}

/// Reads catalog files from a local directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    files: CatalogFiles,
    name: String,
}

impl DirectorySource {
    /// Read the default file names from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_files(dir, CatalogFiles::default())
    }

    /// Read custom file names from `dir`.
    #[must_use]
    pub fn with_files(dir: impl Into<PathBuf>, files: CatalogFiles) -> Self {
        let dir = dir.into();
        let name = format!("dir:{}", dir.display());
        Self { dir, files, name }
    }

    /// Directory being read.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a category's catalog file.
    #[must_use]
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.dir.join(self.files.for_category(category))
    }

    fn read(&self, category: Category) -> Result<Option<Catalog>> {
        let path = self.path_for(category);
        if !path.is_file() {
            return Ok(None);
        }
        Catalog::from_path(category, &path).map(Some)
    }
}

impl CatalogSource for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<Option<Catalog>>> {
        let mut slots = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let slot = self.read(category)?;
            match (&slot, category) {
                (None, Category::Person) => {
                    log::debug!("[source] No person catalog in {}", self.dir.display());
                    continue;
                }
                (None, _) => log::warn!(
                    "[source] Required {} catalog not found: {}",
                    category,
                    self.path_for(category).display()
                ),
                (Some(_), _) => {}
            }
            slots.push(slot);
        }
        Ok(slots)
    }
}
