//! Path normalization for section matching.
//!
//! Section keys and page paths are both compared in a canonical form with a
//! leading and a trailing slash, so `/guide` and `/guide/` name the same
//! section and `/guidelines` never falls under `/guide/`.

use sitenav_tree::normalize_page_path;

/// Canonical form of a section key.
///
/// - `""`, `"/"` -> `"/"`
/// - `"guide"`, `"/guide"`, `"/guide/"` -> `"/guide/"`
#[must_use]
pub fn normalize_prefix(key: &str) -> String {
    let trimmed = key.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}/")
    }
}

/// Canonical form of a page path for prefix matching.
///
/// Query strings, fragments, `.md`/`.html` suffixes and trailing `index`
/// segments are dropped before the trailing slash is added.
#[must_use]
pub(crate) fn match_form(path: &str) -> String {
    let page = normalize_page_path(path.trim());
    if page == "/" {
        page
    } else {
        format!("{page}/")
    }
}

/// Parent prefix of a canonical prefix, `None` for the root.
///
/// `"/guide/basics/"` -> `"/guide/"` -> `"/"` -> `None`.
pub(crate) fn parent_prefix(prefix: &str) -> Option<&str> {
    if prefix == "/" {
        return None;
    }
    let without_slash = prefix.strip_suffix('/').unwrap_or(prefix);
    without_slash
        .rfind('/')
        .map(|idx| &without_slash[..=idx])
}
