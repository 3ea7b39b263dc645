//! Content rendering
//!
//! Turns the site document into the HTML fragments the page templates
//! consume. Each rendered page maps well-known container ids
//! (`recent-posts`, `trending-posts`, `<category>-highlight`, ...) to a
//! fragment; templates that lack a container simply ignore the entry.
//!
//! The renderer holds no state of its own: pair it with a
//! [`Store`](crate::store::Store) subscription and re-render on every
//! change notification.

mod widgets;

pub use widgets::{escape_html, format_relative_date};

use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

use crate::config::SiteConfig;
use crate::document::{SiteDocument, DEFAULT_QUERY_LIMIT};

/// Well-known container id for the recent-posts widget
pub const RECENT_POSTS_CONTAINER: &str = "recent-posts";
/// Well-known container id for the trending-posts widget
pub const TRENDING_POSTS_CONTAINER: &str = "trending-posts";
/// Well-known container id for a category page's post grid
pub const CATEGORY_POSTS_CONTAINER: &str = "category-posts";

/// Which kind of page a filename maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// The landing page: recent + trending + per-category highlights
    Home,
    /// A named category page, filtered through the store
    Category(String),
    /// Any other page: recent posts only
    Generic,
}

impl PageKind {
    /// Dispatch by filename, the way the site routes its pages
    ///
    /// `index.html` (or an empty path) is the landing page; a filename
    /// whose stem matches a catalog category id is that category's
    /// page; everything else is generic.
    pub fn from_filename(filename: &str, config: &SiteConfig) -> Self {
        let name = filename.rsplit('/').next().unwrap_or(filename);
        if name.is_empty() || name == "index.html" {
            return PageKind::Home;
        }
        let stem = name.strip_suffix(".html").unwrap_or(name);
        if config.category(stem).is_some() {
            return PageKind::Category(stem.to_string());
        }
        PageKind::Generic
    }
}

/// A fully rendered page: document metadata plus container fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Value for the document title tag
    pub title: String,
    /// Value for the meta-description tag
    pub meta_description: String,
    /// HTML fragments keyed by container id
    pub fragments: BTreeMap<String, String>,
}

impl RenderedPage {
    /// Fragment for a container id, if this page produced one
    pub fn fragment(&self, container_id: &str) -> Option<&str> {
        self.fragments.get(container_id).map(String::as_str)
    }
}

/// Renders site content into page fragments
pub struct Renderer<'a> {
    config: &'a SiteConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Render the page for `filename` from the given document
    pub fn render(&self, filename: &str, doc: &SiteDocument) -> RenderedPage {
        self.render_at(filename, doc, Local::now().date_naive())
    }

    /// Render with an explicit "today" for relative dates
    pub fn render_at(&self, filename: &str, doc: &SiteDocument, today: NaiveDate) -> RenderedPage {
        match PageKind::from_filename(filename, self.config) {
            PageKind::Home => self.render_home(doc, today),
            PageKind::Category(id) => self.render_category(&id, doc, today),
            PageKind::Generic => self.render_generic(doc, today),
        }
    }

    fn render_home(&self, doc: &SiteDocument, today: NaiveDate) -> RenderedPage {
        let mut fragments = BTreeMap::new();

        fragments.insert(
            RECENT_POSTS_CONTAINER.to_string(),
            widgets::recent_posts(&doc.recent_posts(DEFAULT_QUERY_LIMIT), today),
        );
        fragments.insert(
            TRENDING_POSTS_CONTAINER.to_string(),
            widgets::trending_posts(&doc.trending_posts(DEFAULT_QUERY_LIMIT)),
        );

        // One highlight per catalog category that has a published post
        for category in &self.config.categories {
            let posts = doc.posts_by_category(&category.id);
            if let Some(post) = posts.first() {
                fragments.insert(
                    format!("{}-highlight", category.id),
                    widgets::category_highlight(category, post),
                );
            }
        }

        RenderedPage {
            title: self.config.site_name.clone(),
            meta_description: self.config.site_description.clone(),
            fragments,
        }
    }

    fn render_category(&self, id: &str, doc: &SiteDocument, today: NaiveDate) -> RenderedPage {
        let mut fragments = BTreeMap::new();

        fragments.insert(
            CATEGORY_POSTS_CONTAINER.to_string(),
            widgets::category_posts(&doc.posts_by_category(id), today),
        );
        fragments.insert(
            RECENT_POSTS_CONTAINER.to_string(),
            widgets::recent_posts(&doc.recent_posts(DEFAULT_QUERY_LIMIT), today),
        );

        // Category pages take their metadata from the catalog entry
        let name = self.config.category_name(id).unwrap_or(id);
        let description = self
            .config
            .category_description(id)
            .unwrap_or(&self.config.site_description);

        RenderedPage {
            title: format!("{} | {}", name, self.config.site_name),
            meta_description: description.to_string(),
            fragments,
        }
    }

    fn render_generic(&self, doc: &SiteDocument, today: NaiveDate) -> RenderedPage {
        let mut fragments = BTreeMap::new();
        fragments.insert(
            RECENT_POSTS_CONTAINER.to_string(),
            widgets::recent_posts(&doc.recent_posts(DEFAULT_QUERY_LIMIT), today),
        );

        RenderedPage {
            title: self.config.site_name.clone(),
            meta_description: self.config.site_description.clone(),
            fragments,
        }
    }
}
