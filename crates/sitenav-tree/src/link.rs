//! Link targets of navigation nodes.
//!
//! A target is either an internal page path, resolved against the site root,
//! or an absolute external URL. The distinction decides whether a target takes
//! part in link-existence checks.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Target of a navigation node.
///
/// Deserialization rejects blank strings; an authored target must point
/// somewhere.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Link {
    /// Site-relative page path, always with a leading slash.
    Internal(String),
    /// Absolute URL with a scheme (or protocol-relative `//host/...`).
    External(String),
}

impl Link {
    /// Parse an authored link string.
    ///
    /// Strings with a URL scheme become [`Link::External`]. Everything else is
    /// an internal path; a missing leading slash is added. A blank string
    /// yields an empty internal link, which points nowhere (see
    /// [`Link::is_empty`]).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            Self::Internal(String::new())
        } else if is_external(raw) {
            Self::External(raw.to_owned())
        } else if raw.starts_with('/') {
            Self::Internal(raw.to_owned())
        } else {
            Self::Internal(format!("/{raw}"))
        }
    }

    /// Link as authored (internal paths carry their leading slash).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Internal(path) | Self::External(path) => path,
        }
    }

    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Whether the link has no target at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Normalized page path of an internal link, `None` for external and
    /// empty links.
    ///
    /// See [`normalize_page_path`].
    #[must_use]
    pub fn page_path(&self) -> Option<String> {
        match self {
            Self::Internal(path) if !path.is_empty() => Some(normalize_page_path(path)),
            Self::Internal(_) | Self::External(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Err(de::Error::custom("link target cannot be empty"));
        }
        Ok(Self::parse(&raw))
    }
}

impl From<String> for Link {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Link {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Link> for String {
    fn from(value: Link) -> Self {
        match value {
            Link::Internal(path) | Link::External(path) => path,
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a link string points outside the site.
fn is_external(raw: &str) -> bool {
    if raw.starts_with("//") {
        return true;
    }
    let Some((scheme, rest)) = raw.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return false;
    }
    rest.starts_with("//")
        || scheme.eq_ignore_ascii_case("mailto")
        || scheme.eq_ignore_ascii_case("tel")
}

/// Normalize a page path for existence comparisons.
///
/// - `#fragment` and `?query` are dropped
/// - a `.md` or `.html` suffix is dropped
/// - empty and `.` segments are dropped, `..` removes the previous segment
/// - a trailing `index` segment is dropped
/// - the result always has a leading slash and no trailing slash; the root
///   is `/`
///
/// ```
/// use sitenav_tree::normalize_page_path;
///
/// assert_eq!(normalize_page_path("/guide/"), "/guide");
/// assert_eq!(normalize_page_path("guide/index.md"), "/guide");
/// assert_eq!(normalize_page_path("/guide/setup.html#install"), "/guide/setup");
/// assert_eq!(normalize_page_path("./guide/../guide/setup"), "/guide/setup");
/// assert_eq!(normalize_page_path("/index.md"), "/");
/// ```
#[must_use]
pub fn normalize_page_path(raw: &str) -> String {
    let end = raw.find(['#', '?']).unwrap_or(raw.len());
    let path = &raw[..end];
    let path = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".html"))
        .unwrap_or(path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    if segments.last() == Some(&"index") {
        segments.pop();
    }
    format!("/{}", segments.join("/"))
}
