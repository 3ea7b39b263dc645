//! Post command handlers

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use wavecms_core::{NewPost, PostPatch, PostStatus, Store};

use crate::output::Output;

/// Create a new post
#[allow(clippy::too_many_arguments)]
pub fn create(
    store: &mut Store,
    title: String,
    content: String,
    excerpt: String,
    category: String,
    tags: Vec<String>,
    author: String,
    publish: bool,
    image: String,
    output: &Output,
) -> Result<()> {
    if store.config().category(&category).is_none() {
        output.message(&format!(
            "Note: '{}' is not in the category catalog; the post will not appear on any category page.",
            category
        ));
    }

    let new = NewPost {
        title,
        content,
        excerpt,
        category,
        tags,
        author,
        status: if publish {
            PostStatus::Published
        } else {
            PostStatus::Draft
        },
        image,
    };

    let post = store.add_post(new).context("Failed to create post")?;

    output.success(&format!("Created post: {}", post.id));
    output.print_post(&post);
    Ok(())
}

/// List posts: all of them, or published ones in a category
pub fn list(store: &Store, category: Option<String>, output: &Output) -> Result<()> {
    let posts = match category {
        Some(ref c) => store.posts_by_category(c),
        None => store.document().posts.clone(),
    };

    output.print_posts(&posts);
    Ok(())
}

/// List recent published posts
pub fn recent(store: &Store, limit: usize, output: &Output) -> Result<()> {
    output.print_posts(&store.recent_posts(limit));
    Ok(())
}

/// List trending published posts (by view count)
pub fn trending(store: &Store, limit: usize, output: &Output) -> Result<()> {
    output.print_posts(&store.trending_posts(limit));
    Ok(())
}

/// Show a single post
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let uuid = resolve_post_id(&id, store)?;
    let post = store
        .get_post(uuid)
        .ok_or_else(|| anyhow::anyhow!("Post not found: {}", id))?;

    output.print_post(post);
    Ok(())
}

/// Update a post with the provided fields
#[allow(clippy::too_many_arguments)]
pub fn update(
    store: &mut Store,
    id: String,
    title: Option<String>,
    content: Option<String>,
    excerpt: Option<String>,
    category: Option<String>,
    tags: Option<Vec<String>>,
    author: Option<String>,
    status: Option<String>,
    date: Option<String>,
    image: Option<String>,
    output: &Output,
) -> Result<()> {
    let uuid = resolve_post_id(&id, store)?;

    let status = status
        .map(|s| s.parse::<PostStatus>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;
    let date = date
        .map(|d| {
            NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", d))
        })
        .transpose()?;

    let patch = PostPatch {
        title,
        content,
        excerpt,
        category,
        tags,
        author,
        status,
        date,
        image,
    };

    if patch.is_empty() {
        bail!("Nothing to update: provide at least one field flag.");
    }

    if store.update_post(uuid, &patch)? {
        output.success(&format!("Updated post: {}", uuid));
        if let Some(post) = store.get_post(uuid) {
            output.print_post(post);
        }
    } else {
        bail!("Post not found: {}", id);
    }

    Ok(())
}

/// Delete a post
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let uuid = resolve_post_id(&id, store)?;
    store.delete_post(uuid).context("Failed to delete post")?;
    output.success(&format!("Deleted post: {}", uuid));
    Ok(())
}

/// Resolve a post id from a full UUID or a unique prefix
fn resolve_post_id(input: &str, store: &Store) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(input) {
        return Ok(uuid);
    }

    let matches: Vec<Uuid> = store
        .document()
        .posts
        .iter()
        .filter(|p| p.id.to_string().starts_with(input))
        .map(|p| p.id)
        .collect();

    match matches.len() {
        0 => bail!("No post matches id '{}'", input),
        1 => Ok(matches[0]),
        n => bail!("Ambiguous id '{}': {} posts match. Use more characters.", input, n),
    }
}
