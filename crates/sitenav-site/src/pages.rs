//! Page discovery by filesystem walking.
//!
//! Every `.md` file under the content directory is a page. `index.md` stands
//! for its directory, so `guide/index.md` and `guide/` share the page path
//! `/guide`.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Serialize;

/// Known pages of a site, keyed by page path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageIndex {
    /// Page path (e.g. `/guide/setup`) to source-relative file path
    /// (e.g. `guide/setup.md`).
    pages: BTreeMap<String, String>,
}

impl PageIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page by its source-relative path.
    ///
    /// `guide.md` and `guide/index.md` share the page path `/guide`. On such
    /// a collision the `index.md` file owns the page regardless of insertion
    /// order, and the other file is ignored with a warning.
    pub fn insert(&mut self, source_path: &str) {
        let page_path = source_to_page_path(source_path);
        match self.pages.get_mut(&page_path) {
            None => {
                self.pages.insert(page_path, source_path.to_owned());
            }
            Some(existing) if existing.as_str() == source_path => {}
            Some(existing) => {
                let (kept, ignored) = if is_index_file(source_path) && !is_index_file(existing) {
                    let replaced = std::mem::replace(existing, source_path.to_owned());
                    (source_path.to_owned(), replaced)
                } else {
                    (existing.clone(), source_path.to_owned())
                };
                tracing::warn!(
                    page = %page_path,
                    kept = %kept,
                    ignored = %ignored,
                    "Two source files map to the same page"
                );
            }
        }
    }

    /// Source-relative path of a page, if it exists.
    #[must_use]
    pub fn source_path(&self, page_path: &str) -> Option<&str> {
        self.pages
            .get(&sitenav_tree::normalize_page_path(page_path))
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, page_path: &str) -> bool {
        self.source_path(page_path).is_some()
    }

    /// Page paths, for [`sitenav_tree::check_links`].
    #[must_use]
    pub fn known_paths(&self) -> HashSet<String> {
        self.pages.keys().cloned().collect()
    }

    /// `(page path, source path)` pairs in page path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages
            .iter()
            .map(|(page, source)| (page.as_str(), source.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for PageIndex {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut index = Self::new();
        for source_path in iter {
            index.insert(source_path);
        }
        index
    }
}

/// Walk `source_dir` and index every markdown page.
///
/// Hidden files and directories are skipped. Returns an empty index if the
/// directory doesn't exist.
#[must_use]
pub fn scan_pages(source_dir: &Path) -> PageIndex {
    let mut index = PageIndex::new();
    if source_dir.exists() {
        scan_directory(source_dir, "", &mut index);
    } else {
        tracing::debug!(path = %source_dir.display(), "Source directory does not exist");
    }
    index
}

fn scan_directory(dir_path: &Path, rel_prefix: &str, index: &mut PageIndex) {
    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir_path.display(), error = %e, "Failed to read directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let rel_path = if rel_prefix.is_empty() {
            name
        } else {
            format!("{rel_prefix}/{name}")
        };

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &rel_path, index);
        } else if path.extension().is_some_and(|e| e == "md") {
            index.insert(&rel_path);
        }
    }
}

fn is_index_file(source_path: &str) -> bool {
    source_path == "index.md" || source_path.ends_with("/index.md")
}

/// Convert a source-relative markdown path to its page path.
///
/// - `index.md` → `/`
/// - `guide/index.md` → `/guide`
/// - `guide/setup.md` → `/guide/setup`
fn source_to_page_path(source_path: &str) -> String {
    sitenav_tree::normalize_page_path(source_path)
}
