//! The site document
//!
//! `SiteDocument` is the single top-level persisted structure: all
//! posts, the design settings, social links, dashboard users, and an
//! open settings bag. It is serialized as one JSON value and rewritten
//! in full on every mutation.
//!
//! Query logic lives here as pure functions over the in-memory
//! document; the [`Store`](crate::store::Store) coordinates
//! persistence and change notification around them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::config::SiteConfig;
use crate::models::{DesignSettings, NewPost, Post, PostStatus, SocialLinks, User};

/// Default limit for recency and trending queries
pub const DEFAULT_QUERY_LIMIT: usize = 5;

/// The whole persisted site content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SiteDocument {
    /// All posts, newest first (new posts are prepended)
    #[serde(default)]
    pub posts: Vec<Post>,
    /// Site-wide design settings
    #[serde(default)]
    pub design: DesignSettings,
    /// Social media links
    #[serde(default)]
    pub social: SocialLinks,
    /// Dashboard users
    #[serde(default)]
    pub users: Vec<User>,
    /// Open settings bag for dashboard extensions
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl SiteDocument {
    /// An empty document carrying the configured social links and
    /// default design tokens
    pub fn empty(config: &SiteConfig) -> Self {
        Self {
            posts: Vec::new(),
            design: DesignSettings::default(),
            social: config.social.clone(),
            users: Vec::new(),
            settings: BTreeMap::new(),
        }
    }

    /// The seeded starter document: three example posts (two published,
    /// one draft) and one admin user
    pub fn seeded(config: &SiteConfig) -> Self {
        let mut doc = Self::empty(config);
        doc.posts = sample_posts();
        doc.users = vec![User::admin(
            "Complete Control",
            config.contact.email.clone(),
            "https://randomuser.me/api/portraits/men/75.jpg",
        )];
        doc
    }

    /// Published posts whose category matches, in storage order
    pub fn posts_by_category(&self, category: &str) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| p.is_published() && p.category == category)
            .cloned()
            .collect()
    }

    /// Published posts sorted by publish date descending, truncated to
    /// `limit`
    ///
    /// The sort is stable, so posts sharing a date keep their storage
    /// order (newest-first for posts added through the store).
    pub fn recent_posts(&self, limit: usize) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.is_published())
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts.truncate(limit);
        posts
    }

    /// Published posts sorted by view count descending, truncated to
    /// `limit`
    pub fn trending_posts(&self, limit: usize) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.is_published())
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.views.cmp(&a.views));
        posts.truncate(limit);
        posts
    }

    /// Find a post by id
    pub fn find_post(&self, id: Uuid) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Find a post by id, mutably
    pub fn find_post_mut(&mut self, id: Uuid) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    /// Prepend a post built from creation fields, returning a clone of
    /// the stored post
    pub fn prepend_post(&mut self, new: NewPost) -> Post {
        let post = Post::from_new(new);
        self.posts.insert(0, post.clone());
        post
    }

    /// Remove every post with the given id, returning how many were
    /// removed
    pub fn remove_posts(&mut self, id: Uuid) -> usize {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        before - self.posts.len()
    }
}

/// The three starter posts shipped with a fresh site
fn sample_posts() -> Vec<Post> {
    vec![
        Post {
            id: Uuid::new_v4(),
            title: "K-Zee's New Album Breaks Records".to_string(),
            content: "<p>Liberian artist K-Zee has released a groundbreaking new album that \
                      is breaking records across the country. The album features \
                      collaborations with international artists and has been praised for its \
                      unique blend of traditional Liberian sounds with modern production.</p>"
                .to_string(),
            excerpt: "Liberian artist K-Zee releases groundbreaking album breaking records \
                      nationwide."
                .to_string(),
            category: "entertainment".to_string(),
            tags: vec![
                "music".to_string(),
                "album".to_string(),
                "liberian-artist".to_string(),
            ],
            author: "Complete Control".to_string(),
            status: PostStatus::Published,
            date: date(2023, 11, 15),
            image: "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?auto=format&fit=crop&w=1000&q=80"
                .to_string(),
            views: 0,
            likes: 0,
        },
        Post {
            id: Uuid::new_v4(),
            title: "Liberian Designers Shine at Fashion Week".to_string(),
            content: "<p>Local fashion designers showcased their latest collections at \
                      Monrovia Fashion Week, receiving international acclaim for their \
                      innovative designs that incorporate traditional Liberian textiles and \
                      patterns.</p>"
                .to_string(),
            excerpt: "Liberian fashion designers gain international recognition at Monrovia \
                      Fashion Week."
                .to_string(),
            category: "lifestyle".to_string(),
            tags: vec![
                "fashion".to_string(),
                "design".to_string(),
                "liberian-culture".to_string(),
            ],
            author: "Complete Control".to_string(),
            status: PostStatus::Published,
            date: date(2023, 11, 14),
            image: "https://images.unsplash.com/photo-1539109136881-3be0616acf4b?auto=format&fit=crop&w=1000&q=80"
                .to_string(),
            views: 0,
            likes: 0,
        },
        Post {
            id: Uuid::new_v4(),
            title: "National Sports Team Secures Victory".to_string(),
            content: "<p>The national team secured a stunning victory in the regional \
                      championships, bringing pride to the nation and qualifying for the \
                      international tournament next year.</p>"
                .to_string(),
            excerpt: "National sports team wins regional championship, qualifies for \
                      international tournament."
                .to_string(),
            category: "sports".to_string(),
            tags: vec![
                "sports".to_string(),
                "victory".to_string(),
                "national-team".to_string(),
            ],
            author: "Complete Control".to_string(),
            status: PostStatus::Draft,
            date: date(2023, 11, 13),
            image: "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?auto=format&fit=crop&w=1000&q=80"
                .to_string(),
            views: 0,
            likes: 0,
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Seed dates are compile-time constants and always valid
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostPatch;

    fn post(title: &str, category: &str, status: PostStatus, d: NaiveDate) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: String::new(),
            excerpt: String::new(),
            category: category.to_string(),
            tags: Vec::new(),
            author: "Tester".to_string(),
            status,
            date: d,
            image: String::new(),
            views: 0,
            likes: 0,
        }
    }

    #[test]
    fn test_seeded_document() {
        let config = SiteConfig::default();
        let doc = SiteDocument::seeded(&config);

        assert_eq!(doc.posts.len(), 3);
        let published = doc.posts.iter().filter(|p| p.is_published()).count();
        assert_eq!(published, 2);
        assert_eq!(doc.users.len(), 1);
        assert_eq!(doc.users[0].role, "admin");
        assert_eq!(doc.social, config.social);
        assert_eq!(doc.design.layout, "standard");
    }

    #[test]
    fn test_seeded_recent_posts_scenario() {
        let doc = SiteDocument::seeded(&SiteConfig::default());

        let recent = doc.recent_posts(5);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "K-Zee's New Album Breaks Records");
        assert_eq!(recent[1].title, "Liberian Designers Shine at Fashion Week");
        assert_eq!(recent[0].date, date(2023, 11, 15));
        assert_eq!(recent[1].date, date(2023, 11, 14));
    }

    #[test]
    fn test_posts_by_category_filters_status_and_category() {
        let mut doc = SiteDocument::default();
        doc.posts = vec![
            post("a", "news", PostStatus::Published, date(2023, 1, 1)),
            post("b", "news", PostStatus::Draft, date(2023, 1, 2)),
            post("c", "sports", PostStatus::Published, date(2023, 1, 3)),
        ];

        let news = doc.posts_by_category("news");
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "a");

        assert!(doc.posts_by_category("education").is_empty());
    }

    #[test]
    fn test_recent_posts_sorted_and_limited() {
        let mut doc = SiteDocument::default();
        doc.posts = vec![
            post("old", "news", PostStatus::Published, date(2023, 1, 1)),
            post("newest", "news", PostStatus::Published, date(2023, 3, 1)),
            post("draft", "news", PostStatus::Draft, date(2023, 4, 1)),
            post("middle", "news", PostStatus::Published, date(2023, 2, 1)),
        ];

        let recent = doc.recent_posts(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "newest");
        assert_eq!(recent[1].title, "middle");
    }

    #[test]
    fn test_recent_posts_ties_keep_storage_order() {
        let same_day = date(2023, 5, 5);
        let mut doc = SiteDocument::default();
        doc.posts = vec![
            post("first", "news", PostStatus::Published, same_day),
            post("second", "news", PostStatus::Published, same_day),
            post("third", "news", PostStatus::Published, same_day),
        ];

        let recent = doc.recent_posts(5);
        let titles: Vec<_> = recent.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_trending_posts_sorted_by_views() {
        let mut doc = SiteDocument::default();
        let mut a = post("a", "news", PostStatus::Published, date(2023, 1, 1));
        a.views = 10;
        let mut b = post("b", "news", PostStatus::Published, date(2023, 1, 2));
        b.views = 300;
        let mut c = post("c", "news", PostStatus::Draft, date(2023, 1, 3));
        c.views = 9000;
        doc.posts = vec![a, b, c];

        let trending = doc.trending_posts(5);
        assert_eq!(trending.len(), 2);
        assert_eq!(trending[0].title, "b");
        assert_eq!(trending[1].title, "a");
    }

    #[test]
    fn test_prepend_post_goes_first() {
        let mut doc = SiteDocument::seeded(&SiteConfig::default());

        let stored = doc.prepend_post(NewPost {
            title: "Breaking".to_string(),
            status: PostStatus::Published,
            category: "news".to_string(),
            ..Default::default()
        });

        assert_eq!(doc.posts.len(), 4);
        assert_eq!(doc.posts[0].id, stored.id);
        assert_eq!(doc.posts[0].title, "Breaking");
    }

    #[test]
    fn test_remove_posts_idempotent() {
        let mut doc = SiteDocument::seeded(&SiteConfig::default());
        let id = doc.posts[0].id;

        assert_eq!(doc.remove_posts(id), 1);
        assert_eq!(doc.posts.len(), 2);
        // Second removal finds nothing and changes nothing
        assert_eq!(doc.remove_posts(id), 0);
        assert_eq!(doc.posts.len(), 2);
    }

    #[test]
    fn test_find_and_patch() {
        let mut doc = SiteDocument::seeded(&SiteConfig::default());
        let id = doc.posts[1].id;

        let patch = PostPatch {
            title: Some("Retitled".to_string()),
            ..Default::default()
        };
        patch.apply(doc.find_post_mut(id).unwrap());

        assert_eq!(doc.find_post(id).unwrap().title, "Retitled");
    }

    #[test]
    fn test_document_json_roundtrip() {
        let doc = SiteDocument::seeded(&SiteConfig::default());
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let loaded: SiteDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, loaded);
    }

    #[test]
    fn test_missing_sections_default() {
        // A document written by an older dashboard may carry only posts
        let doc: SiteDocument = serde_json::from_str(r#"{"posts": []}"#).unwrap();
        assert!(doc.users.is_empty());
        assert!(doc.settings.is_empty());
        assert_eq!(doc.design, DesignSettings::default());
    }
}
