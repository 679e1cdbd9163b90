//! Configuration management for sitenav.
//!
//! Parses `sitenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Layout
//!
//! ```toml
//! [site]
//! title = "NextFTC"
//! base = "/"
//! src_dir = "src"
//! edit_link = "https://github.com/org/docs/edit/main/src/:path"
//!
//! [[site.head]]
//! tag = "link"
//! attrs = { rel = "icon", href = "/logo.svg" }
//!
//! [[nav]]
//! text = "Guide"
//! link = "/guide/"
//! active_match = "^/guide/"
//!
//! [[social]]
//! platform = "github"
//! url = "https://github.com/org/docs"
//!
//! [search]
//! provider = "local"
//!
//! [check]
//! ignore_dead_links = true
//!
//! [[sidebar."/guide/"]]
//! text = "Getting Started"
//!
//! [[sidebar."/guide/".items]]
//! text = "Installation"
//! link = "/guide/installation"
//!
//! [versions]
//! current = "v1"
//!
//! [[versions.release]]
//! tag = "v0"
//! patches = [{ op = "remove", section = "/guide/", path = ["Getting Started"] }]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base`
//! - `site.edit_link`
//! - `social[].url`
//! - `search.external.app_id`
//! - `search.external.api_key`

mod expand;
mod site;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sitenav_sidebar::{Release, SidebarBuilder, SidebarTable};

pub use site::{
    CheckConfig, EditLink, ExternalSearchConfig, HeadTag, NavEntry, PATH_PLACEHOLDER,
    SearchConfig, SearchProvider, SiteConfig, SocialLink,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override strict mode.
    pub strict: Option<bool>,
    /// Select a sidebar version.
    pub version: Option<String>,
    /// Override dead-link reporting.
    pub ignore_dead_links: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site settings.
    pub site: SiteConfig,
    /// Top navigation bar entries.
    pub nav: Vec<NavEntry>,
    /// Social links.
    pub social: Vec<SocialLink>,
    /// Search provider selection.
    pub search: SearchConfig,
    /// Link checking settings.
    pub check: CheckConfig,
    /// Sidebar sections of the latest version.
    pub sidebar: SidebarTable,
    /// Version declarations.
    pub versions: VersionsConfig,

    /// Resolved content source directory (set after loading).
    #[serde(skip)]
    pub source_dir: PathBuf,
    /// Selected sidebar version, `None` for the latest (set by CLI settings).
    #[serde(skip)]
    pub version: Option<String>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Sidebar versions (`[versions]`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Tag of the version described by `[sidebar]`.
    pub current: Option<String>,
    /// Other versions, as patches on `[sidebar]`.
    #[serde(rename = "release")]
    pub releases: Vec<Release>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.edit_link`").
        field: String,
        /// Error message (e.g., "${`REPO`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate_version()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion, or validation fails.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.compile_patterns()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.source_dir.clone_from(source_dir);
        }
        if let Some(strict) = settings.strict {
            self.check.strict = strict;
        }
        if let Some(version) = &settings.version {
            self.version = Some(version.clone());
        }
        if let Some(ignore) = settings.ignore_dead_links {
            self.check.ignore_dead_links = ignore;
        }
    }

    /// Builder for the configured sidebar versions.
    #[must_use]
    pub fn sidebar_builder(&self) -> SidebarBuilder {
        let builder = SidebarBuilder::new(self.sidebar.clone())
            .releases(self.versions.releases.iter().cloned());
        match &self.versions.current {
            Some(tag) => builder.latest_tag(tag.clone()),
            None => builder,
        }
    }

    /// Get validated external search configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the provider is not external or
    /// the `[search.external]` section is missing or incomplete.
    pub fn require_external_search(&self) -> Result<&ExternalSearchConfig, ConfigError> {
        if self.search.provider != SearchProvider::External {
            return Err(ConfigError::Validation(
                "search.provider is not \"external\"".to_owned(),
            ));
        }
        let external = self.search.external.as_ref().ok_or_else(|| {
            ConfigError::Validation(
                "[search.external] section required when search.provider = \"external\"".into(),
            )
        })?;
        require_non_empty(&external.app_id, "search.external.app_id")?;
        require_non_empty(&external.api_key, "search.external.api_key")?;
        require_non_empty(&external.index_name, "search.external.index_name")?;
        Ok(external)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            nav: Vec::new(),
            social: Vec::new(),
            search: SearchConfig::default(),
            check: CheckConfig::default(),
            sidebar: SidebarTable::default(),
            versions: VersionsConfig::default(),
            source_dir: base.join("docs"),
            version: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_nav()?;
        self.validate_social()?;
        self.validate_search()?;
        self.validate_versions()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;

        let base = &self.site.base;
        if !base.starts_with('/') || !base.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base must start and end with '/' (got {base:?})"
            )));
        }

        if let Some(edit_link) = &self.site.edit_link {
            require_http_url(edit_link.template(), "site.edit_link")?;
            if !edit_link.template().contains(PATH_PLACEHOLDER) {
                return Err(ConfigError::Validation(format!(
                    "site.edit_link must contain the {PATH_PLACEHOLDER} placeholder"
                )));
            }
        }

        for (i, head) in self.site.head.iter().enumerate() {
            if head.tag.is_empty() || !head.tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::Validation(format!(
                    "site.head[{i}].tag must be a non-empty element name (got {:?})",
                    head.tag
                )));
            }
        }

        Ok(())
    }

    fn validate_nav(&self) -> Result<(), ConfigError> {
        for (i, entry) in self.nav.iter().enumerate() {
            require_non_empty(&entry.text, &format!("nav[{i}].text"))?;
            require_non_empty(entry.link.as_str(), &format!("nav[{i}].link"))?;
        }
        Ok(())
    }

    fn validate_social(&self) -> Result<(), ConfigError> {
        for (i, social) in self.social.iter().enumerate() {
            require_non_empty(&social.platform, &format!("social[{i}].platform"))?;
            require_http_url(&social.url, &format!("social[{i}].url"))?;
        }
        Ok(())
    }

    fn validate_search(&self) -> Result<(), ConfigError> {
        if self.search.provider == SearchProvider::External {
            self.require_external_search()?;
        }
        Ok(())
    }

    fn validate_versions(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        let tags = self
            .versions
            .current
            .iter()
            .chain(self.versions.releases.iter().map(|r| &r.tag));
        for tag in tags {
            require_non_empty(tag, "versions tag")?;
            if !seen.insert(tag.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "version {tag} is declared more than once"
                )));
            }
        }
        self.validate_version()
    }

    /// Check that the selected version is declared.
    fn validate_version(&self) -> Result<(), ConfigError> {
        let Some(selected) = &self.version else {
            return Ok(());
        };
        let declared = self.versions.current.as_ref() == Some(selected)
            || self.versions.releases.iter().any(|r| &r.tag == selected);
        if !declared {
            return Err(ConfigError::Validation(format!(
                "unknown version {selected:?}"
            )));
        }
        Ok(())
    }

    /// Compile `active_match` patterns of nav entries.
    fn compile_patterns(&mut self) -> Result<(), ConfigError> {
        for entry in &mut self.nav {
            entry.compile()?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_field(&mut self.site.base, "site.base")?;

        if let Some(edit_link) = self.site.edit_link.as_mut() {
            expand::expand_field(edit_link.template_mut(), "site.edit_link")?;
        }

        for (i, social) in self.social.iter_mut().enumerate() {
            expand::expand_field(&mut social.url, &format!("social[{i}].url"))?;
        }

        if let Some(external) = self.search.external.as_mut() {
            expand::expand_field(&mut external.app_id, "search.external.app_id")?;
            expand::expand_field(&mut external.api_key, "search.external.api_key")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.source_dir = config_dir.join(self.site.src_dir.as_deref().unwrap_or("docs"));
    }
}
