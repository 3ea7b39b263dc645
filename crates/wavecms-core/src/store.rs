//! Unified storage interface
//!
//! The `Store` is the single source of truth for site content. It owns
//! the in-memory site document, coordinates persistence, and notifies
//! subscribers after every successful write.
//!
//! There is no ambient global instance: construct the store once at
//! application start and pass a reference to every consumer. Late
//! joiners can pull the current snapshot with [`Store::document`]
//! before subscribing.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;  // Seeds starter content on first run
//!
//! let post = store.add_post(new_post)?;
//! let recent = store.recent_posts(5);
//! ```

use anyhow::{Context, Result};
use tracing::debug;
use uuid::Uuid;

use crate::config::SiteConfig;
use crate::document::SiteDocument;
use crate::models::{DesignSettings, NewPost, Post, PostPatch, SocialLinks, User};
use crate::storage::JsonPersistence;

/// Handle returned by [`Store::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SiteDocument)>;

/// Single source of truth for site content
///
/// Wraps the persisted site document with query and mutation
/// operations. Every mutation rewrites the whole document to disk and
/// then notifies subscribers synchronously, in registration order.
pub struct Store {
    /// The in-memory site document
    document: SiteDocument,
    /// Persistence handler
    persistence: JsonPersistence,
    /// Configuration
    config: SiteConfig,
    /// Change subscribers, in registration order
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    /// Next subscription id
    next_subscription: u64,
}

impl Store {
    /// Open the store, seeding starter content if none exists
    ///
    /// On first run the starter document (three example posts, default
    /// design tokens, the configured social links, one admin user) is
    /// created and saved. On subsequent runs the existing document is
    /// loaded untouched.
    pub fn open() -> Result<Self> {
        let config = SiteConfig::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: SiteConfig) -> Result<Self> {
        let persistence = JsonPersistence::new(config.clone());
        let document = persistence
            .load_or_seed()
            .context("Failed to load or seed site document")?;

        debug!(posts = document.posts.len(), "opened site store");

        Ok(Self {
            document,
            persistence,
            config,
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Current snapshot of the site document
    pub fn document(&self) -> &SiteDocument {
        &self.document
    }

    /// Replace the whole site document
    ///
    /// Full overwrite with no merging or version check: last writer
    /// wins. Persists, then notifies subscribers.
    pub fn replace_document(&mut self, document: SiteDocument) -> Result<()> {
        self.document = document;
        self.persist_and_notify()
    }

    // ==================== Post Queries ====================

    /// Get a post by id (any status)
    pub fn get_post(&self, id: Uuid) -> Option<&Post> {
        self.document.find_post(id)
    }

    /// Published posts in the given category, in storage order
    pub fn posts_by_category(&self, category: &str) -> Vec<Post> {
        self.document.posts_by_category(category)
    }

    /// Published posts sorted by publish date descending
    pub fn recent_posts(&self, limit: usize) -> Vec<Post> {
        self.document.recent_posts(limit)
    }

    /// Published posts sorted by view count descending
    pub fn trending_posts(&self, limit: usize) -> Vec<Post> {
        self.document.trending_posts(limit)
    }

    /// Total number of posts (any status)
    pub fn post_count(&self) -> usize {
        self.document.posts.len()
    }

    // ==================== Post Mutations ====================

    /// Add a new post
    ///
    /// Assigns a fresh id, stamps today's date, and prepends the post
    /// so that storage order stays newest-first. Returns the stored
    /// post.
    pub fn add_post(&mut self, new: NewPost) -> Result<Post> {
        let post = self.document.prepend_post(new);
        debug!(id = %post.id, title = %post.title, "added post");
        self.persist_and_notify()
            .context("Failed to persist new post")?;
        Ok(post)
    }

    /// Update a post by id with a shallow merge
    ///
    /// Fields present in the patch replace existing values; absent
    /// fields are preserved. Returns `false` (and persists nothing)
    /// when no post matches the id.
    pub fn update_post(&mut self, id: Uuid, patch: &PostPatch) -> Result<bool> {
        match self.document.find_post_mut(id) {
            Some(post) => {
                patch.apply(post);
                debug!(id = %id, "updated post");
                self.persist_and_notify()
                    .context("Failed to persist post update")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete every post with the given id
    ///
    /// Persists unconditionally, so calling this twice is idempotent:
    /// the second call removes nothing and still succeeds.
    pub fn delete_post(&mut self, id: Uuid) -> Result<()> {
        let removed = self.document.remove_posts(id);
        debug!(id = %id, removed, "deleted post");
        self.persist_and_notify()
            .context("Failed to persist post deletion")
    }

    // ==================== Other Document Sections ====================

    /// Dashboard users (read-only in this layer)
    pub fn users(&self) -> &[User] {
        &self.document.users
    }

    /// Site-wide design settings
    pub fn design(&self) -> &DesignSettings {
        &self.document.design
    }

    /// Social media links
    pub fn social(&self) -> &SocialLinks {
        &self.document.social
    }

    // ==================== Change Notification ====================

    /// Subscribe to document changes
    ///
    /// The callback runs synchronously after every successful write,
    /// receiving the updated document. Subscribers are notified in
    /// registration order. There is no replay: to catch up on the
    /// current state, pull [`Store::document`] first.
    pub fn subscribe(&mut self, callback: impl FnMut(&SiteDocument) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber
    ///
    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() < before
    }

    /// Save the document and notify subscribers
    fn persist_and_notify(&mut self) -> Result<()> {
        self.persistence
            .save(&self.document)
            .context("Failed to save site document")?;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.document);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostStatus;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> SiteConfig {
        SiteConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..SiteConfig::default()
        }
    }

    fn published(title: &str, category: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("<p>{}</p>", title),
            excerpt: title.to_string(),
            category: category.to_string(),
            tags: Vec::new(),
            author: "Tester".to_string(),
            status: PostStatus::Published,
            image: String::new(),
        }
    }

    #[test]
    fn test_open_seeds_starter_content() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let doc = store.document();
        assert_eq!(doc.posts.len(), 3);
        assert_eq!(doc.posts.iter().filter(|p| p.is_published()).count(), 2);
        assert_eq!(store.users().len(), 1);
        assert!(store.config().site_data_path().exists());
    }

    #[test]
    fn test_open_loads_existing_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let added_id;
        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            added_id = store.add_post(published("Persisted", "news")).unwrap().id;
        }

        let store = Store::open_with_config(config).unwrap();
        assert_eq!(store.post_count(), 4);
        assert!(store.get_post(added_id).is_some());
    }

    #[test]
    fn test_add_post_increments_and_assigns_distinct_ids() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let mut ids = Vec::new();
        for i in 0..5 {
            let before = store.post_count();
            let post = store
                .add_post(published(&format!("Post {}", i), "news"))
                .unwrap();
            assert_eq!(store.post_count(), before + 1);
            ids.push(post.id);
        }

        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_add_post_prepends() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let post = store.add_post(published("Newest", "news")).unwrap();
        assert_eq!(store.document().posts[0].id, post.id);
        assert_eq!(post.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_recent_posts_limit_and_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let recent = store.recent_posts(5);
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|p| p.is_published()));
        assert!(recent[0].date >= recent[1].date);

        let limited = store.recent_posts(1);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].title, "K-Zee's New Album Breaks Records");
    }

    #[test]
    fn test_posts_by_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        store.add_post(published("Tech story", "technology")).unwrap();
        let mut draft = published("Tech draft", "technology");
        draft.status = PostStatus::Draft;
        store.add_post(draft).unwrap();

        let tech = store.posts_by_category("technology");
        assert_eq!(tech.len(), 1);
        assert_eq!(tech[0].title, "Tech story");
        assert!(tech.iter().all(|p| p.category == "technology" && p.is_published()));
    }

    #[test]
    fn test_trending_posts_by_views() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let a = store.add_post(published("Quiet", "news")).unwrap();
        let b = store.add_post(published("Viral", "news")).unwrap();

        let mut doc = store.document().clone();
        doc.find_post_mut(a.id).unwrap().views = 10;
        doc.find_post_mut(b.id).unwrap().views = 5000;
        store.replace_document(doc).unwrap();

        let trending = store.trending_posts(2);
        assert_eq!(trending[0].title, "Viral");
        assert_eq!(trending[1].title, "Quiet");
    }

    #[test]
    fn test_update_post_shallow_merge() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let post = store.add_post(published("Original", "news")).unwrap();
        let patch = PostPatch {
            title: Some("Edited".to_string()),
            ..Default::default()
        };

        assert!(store.update_post(post.id, &patch).unwrap());

        let updated = store.get_post(post.id).unwrap();
        assert_eq!(updated.title, "Edited");
        // Everything else untouched
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.category, post.category);
        assert_eq!(updated.date, post.date);
        assert_eq!(updated.status, post.status);
    }

    #[test]
    fn test_update_post_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();
        let snapshot = store.document().clone();

        let patch = PostPatch {
            title: Some("X".to_string()),
            ..Default::default()
        };
        assert!(!store.update_post(Uuid::new_v4(), &patch).unwrap());

        // Nothing mutated
        assert_eq!(*store.document(), snapshot);
    }

    #[test]
    fn test_delete_post_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let post = store.add_post(published("Doomed", "news")).unwrap();
        let count = store.post_count();

        store.delete_post(post.id).unwrap();
        assert_eq!(store.post_count(), count - 1);
        assert!(store.get_post(post.id).is_none());

        // Second delete finds nothing and still succeeds
        store.delete_post(post.id).unwrap();
        assert_eq!(store.post_count(), count - 1);
    }

    #[test]
    fn test_replace_document_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();

        let mut doc = store.document().clone();
        doc.design.layout = "magazine".to_string();
        doc.settings
            .insert("theme".to_string(), serde_json::json!("dark"));
        store.replace_document(doc.clone()).unwrap();

        assert_eq!(*store.document(), doc);

        // Survives a reopen byte-for-byte
        let reopened = Store::open_with_config(config).unwrap();
        assert_eq!(*reopened.document(), doc);
    }

    #[test]
    fn test_subscribers_notified_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        store.subscribe(move |doc| {
            first
                .borrow_mut()
                .push(format!("first:{}", doc.posts.len()));
        });
        let second = Rc::clone(&log);
        store.subscribe(move |doc| {
            second
                .borrow_mut()
                .push(format!("second:{}", doc.posts.len()));
        });

        store.add_post(published("Ping", "news")).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["first:4".to_string(), "second:4".to_string()]
        );
    }

    #[test]
    fn test_subscriber_fires_per_write() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        let post = store.add_post(published("One", "news")).unwrap();
        let patch = PostPatch {
            title: Some("Two".to_string()),
            ..Default::default()
        };
        store.update_post(post.id, &patch).unwrap();
        store.delete_post(post.id).unwrap();

        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_failed_update_does_not_notify() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        let patch = PostPatch {
            title: Some("X".to_string()),
            ..Default::default()
        };
        assert!(!store.update_post(Uuid::new_v4(), &patch).unwrap());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.add_post(published("One", "news")).unwrap();
        assert_eq!(*count.borrow(), 1);

        assert!(store.unsubscribe(id));
        store.add_post(published("Two", "news")).unwrap();
        assert_eq!(*count.borrow(), 1);

        // Unknown id reports false
        assert!(!store.unsubscribe(id));
    }
}
