//! Data models for WaveCMS
//!
//! Defines the core data structures: Post, Category, User, and the
//! design settings carried by the site document.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Publication status of a post
///
/// Only `Published` posts are surfaced by category and recency queries;
/// drafts stay visible to the dashboard only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn is_published(self) -> bool {
        matches!(self, PostStatus::Published)
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Published => write!(f, "published"),
        }
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!(
                "invalid post status '{}' (expected 'draft' or 'published')",
                other
            )),
        }
    }
}

/// A news article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Unique identifier
    pub id: Uuid,
    /// Headline
    pub title: String,
    /// Rich-text body (HTML)
    pub content: String,
    /// Short teaser shown in listings
    pub excerpt: String,
    /// Category id referencing the configured catalog
    ///
    /// Membership is not enforced; an unknown id simply never matches a
    /// catalog entry when rendering.
    pub category: String,
    /// Tags for organization
    pub tags: Vec<String>,
    /// Author display name
    pub author: String,
    /// Publication status
    pub status: PostStatus,
    /// Publish date
    pub date: NaiveDate,
    /// Cover image URL
    pub image: String,
    /// View counter (read-only in this layer)
    #[serde(default)]
    pub views: u64,
    /// Like counter (read-only in this layer)
    #[serde(default)]
    pub likes: u64,
}

/// Fields supplied when creating a post
///
/// The store assigns the id and stamps today's date; everything else
/// comes from the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    pub status: PostStatus,
    #[serde(default)]
    pub image: String,
}

impl Post {
    /// Build a post from creation fields, assigning a fresh id and
    /// stamping today's date
    pub fn from_new(new: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            excerpt: new.excerpt,
            category: new.category,
            tags: new.tags,
            author: new.author,
            status: new.status,
            date: Local::now().date_naive(),
            image: new.image,
            views: 0,
            likes: 0,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }
}

/// A partial update to a post
///
/// Fields left as `None` keep their current value; present fields
/// replace the existing value wholesale (shallow merge).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub status: Option<PostStatus>,
    pub date: Option<NaiveDate>,
    pub image: Option<String>,
}

impl PostPatch {
    /// Apply this patch to a post
    pub fn apply(&self, post: &mut Post) {
        if let Some(ref title) = self.title {
            post.title = title.clone();
        }
        if let Some(ref content) = self.content {
            post.content = content.clone();
        }
        if let Some(ref excerpt) = self.excerpt {
            post.excerpt = excerpt.clone();
        }
        if let Some(ref category) = self.category {
            post.category = category.clone();
        }
        if let Some(ref tags) = self.tags {
            post.tags = tags.clone();
        }
        if let Some(ref author) = self.author {
            post.author = author.clone();
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if let Some(date) = self.date {
            post.date = date;
        }
        if let Some(ref image) = self.image {
            post.image = image.clone();
        }
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.author.is_none()
            && self.status.is_none()
            && self.date.is_none()
            && self.image.is_none()
    }
}

/// A content category from the configured catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Stable identifier (also the page filename stem)
    pub id: String,
    /// Display name
    pub name: String,
    /// Color token used by the design layer
    pub color: String,
    /// Description used for page metadata
    pub description: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            description: description.into(),
        }
    }
}

/// Site-wide design settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DesignSettings {
    pub colors: ColorScheme,
    pub fonts: FontSettings,
    pub layout: String,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            colors: ColorScheme::default(),
            fonts: FontSettings::default(),
            layout: "standard".to_string(),
        }
    }
}

/// Color tokens for the design layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: "#002868".to_string(),
            secondary: "#BF0A30".to_string(),
            accent: "#FFFFFF".to_string(),
        }
    }
}

/// Font settings for the design layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FontSettings {
    pub family: String,
    pub base_size: String,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: "Poppins".to_string(),
            base_size: "16px".to_string(),
        }
    }
}

/// A dashboard user
///
/// Present in the schema; no operation in this layer mutates users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub avatar: String,
}

impl User {
    /// Create an active admin user
    pub fn admin(name: impl Into<String>, email: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            role: "admin".to_string(),
            status: "active".to_string(),
            avatar: avatar.into(),
        }
    }
}

/// Social media links keyed by platform name
pub type SocialLinks = BTreeMap<String, String>;
