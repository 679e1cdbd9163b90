//! Site-level navigation for sitenav.
//!
//! Ties configuration, versioned sidebars and the content directory
//! together:
//!
//! - [`Site::new`] builds and validates the sidebar for one version
//! - [`scan_pages`] indexes the markdown pages of the content directory
//! - [`Site::page_context`] resolves the sidebar, active nav entry and edit
//!   link of one page
//! - [`Site::check`] reports malformed sections and dead links
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use sitenav_config::Config;
//! use sitenav_site::{PageIndex, Site};
//!
//! let config = Config::from_toml(
//!     r#"
//! [[sidebar."/guide/"]]
//! text = "Installation"
//! link = "/guide/installation"
//! "#,
//!     Path::new("."),
//! )?;
//! let site = Site::new(config)?;
//! let pages: PageIndex = ["guide/installation.md"].into_iter().collect();
//!
//! let context = site.page_context("/guide/installation", &pages);
//! assert_eq!(context.section, Some("/guide/"));
//! assert!(site.check(&pages).is_clean());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod pages;
mod site;

pub use error::SiteError;
pub use pages::{PageIndex, scan_pages};
pub use site::{CheckReport, PageContext, SectionDefect, Site};
