//! WaveCMS Core Library
//!
//! This crate provides the core functionality for WaveCMS, the content
//! management layer behind the Wave Liberia news site.
//!
//! # Architecture
//!
//! - **Site document**: one JSON structure holding all posts, design
//!   settings, social links, and users, rewritten in full on every
//!   mutation
//! - **Store**: the single source of truth; owns the document,
//!   persists it, and notifies subscribers of changes
//! - **Renderer**: turns the document into the HTML fragments the page
//!   templates consume
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a post
//! let post = store.add_post(new_post)?;
//!
//! // Query posts
//! let recent = store.recent_posts(5);
//!
//! // Render a page
//! let page = Renderer::new(store.config()).render("index.html", store.document());
//! ```
//!
//! # Modules
//!
//! - `store`: unified storage interface (main entry point)
//! - `models`: data structures for posts, categories, and users
//! - `document`: the site document and its query logic
//! - `storage`: JSON persistence with atomic writes
//! - `render`: HTML fragment rendering
//! - `config`: site configuration

pub mod config;
pub mod document;
pub mod models;
pub mod render;
pub mod storage;
pub mod store;

pub use config::SiteConfig;
pub use document::{SiteDocument, DEFAULT_QUERY_LIMIT};
pub use models::{
    Category, DesignSettings, NewPost, Post, PostPatch, PostStatus, SocialLinks, User,
};
pub use render::{PageKind, RenderedPage, Renderer};
pub use storage::{JsonPersistence, StorageError, StorageResult};
pub use store::{Store, SubscriptionId};
