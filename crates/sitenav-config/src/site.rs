//! Site configuration record types.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sitenav_tree::{Link, normalize_page_path};

use crate::ConfigError;

/// Placeholder replaced by the page's source path in edit links.
pub const PATH_PLACEHOLDER: &str = ":path";

/// Top-level site settings (`[site]` section).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description for meta tags.
    pub description: Option<String>,
    /// Base URL path the site is served under.
    pub base: String,
    /// Content source directory, relative to the config file.
    pub src_dir: Option<String>,
    /// "Edit this page" URL template.
    pub edit_link: Option<EditLink>,
    /// Extra tags for the document head.
    pub head: Vec<HeadTag>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            description: None,
            base: "/".to_owned(),
            src_dir: None,
            edit_link: None,
            head: Vec::new(),
        }
    }
}

/// Head tag descriptor, e.g. `{ tag = "link", attrs = { rel = "icon", href = "/logo.svg" } }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadTag {
    /// Element name.
    pub tag: String,
    /// Element attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content (for `script` / `style`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Edit-link URL template containing a `:path` placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditLink(String);

impl EditLink {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.0
    }

    /// Substitute the first `:path` with the page's source-relative path.
    ///
    /// ```
    /// use sitenav_config::EditLink;
    ///
    /// let link = EditLink::new("https://github.com/org/docs/edit/main/src/:path");
    /// assert_eq!(
    ///     link.render("guide/setup.md"),
    ///     "https://github.com/org/docs/edit/main/src/guide/setup.md"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, source_path: &str) -> String {
        self.0.replacen(PATH_PLACEHOLDER, source_path, 1)
    }

    pub(crate) fn template_mut(&mut self) -> &mut String {
        &mut self.0
    }
}

/// Top navigation bar entry (`[[nav]]`).
#[derive(Debug, Deserialize)]
pub struct NavEntry {
    /// Display text.
    pub text: String,
    /// Link target.
    pub link: Link,
    /// Regex deciding when the entry is highlighted.
    #[serde(default)]
    pub active_match: Option<String>,
    #[serde(skip)]
    matcher: Option<Regex>,
}

impl NavEntry {
    pub fn new(text: impl Into<String>, link: impl Into<Link>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            active_match: None,
            matcher: None,
        }
    }

    /// Set the highlight pattern.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the pattern is not a valid regex.
    pub fn with_active_match(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.active_match = Some(pattern.to_owned());
        self.compile()?;
        Ok(self)
    }

    /// Compile `active_match`, if set.
    pub(crate) fn compile(&mut self) -> Result<(), ConfigError> {
        self.matcher = match &self.active_match {
            Some(pattern) => Some(Regex::new(pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "nav entry '{}': invalid active_match: {e}",
                    self.text
                ))
            })?),
            None => None,
        };
        Ok(())
    }

    /// Whether the entry should be highlighted on `page_path`.
    ///
    /// Uses `active_match` when set; otherwise an internal link is active on
    /// its own page and every page below it (the root link only on `/`).
    /// Purely cosmetic: sidebar resolution never consults this.
    #[must_use]
    pub fn is_active(&self, page_path: &str) -> bool {
        if let Some(matcher) = &self.matcher {
            return matcher.is_match(page_path);
        }
        let Some(link) = self.link.page_path() else {
            return false;
        };
        let page = normalize_page_path(page_path);
        if link == "/" {
            return page == "/";
        }
        page == link
            || page
                .strip_prefix(link.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Social link (`[[social]]`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Platform name used for the icon, e.g. `github` or `discord`.
    pub platform: String,
    /// Profile or project URL.
    pub url: String,
}

/// Search provider selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Search index built by the site generator.
    #[default]
    Local,
    /// Hosted search service.
    External,
}

/// Search configuration (`[search]`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub provider: SearchProvider,
    /// Hosted search settings; required when `provider = "external"`.
    pub external: Option<ExternalSearchConfig>,
}

/// Hosted search service credentials.
#[derive(Debug, Deserialize)]
pub struct ExternalSearchConfig {
    pub app_id: String,
    pub api_key: String,
    pub index_name: String,
}

/// Link checking and strictness (`[check]`).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Keep dead links out of reports (they are still logged at debug level).
    pub ignore_dead_links: bool,
    /// Fail on malformed sidebar sections instead of skipping them.
    pub strict: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            ignore_dead_links: true,
            strict: false,
        }
    }
}
