//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use wavecms_core::{Category, Post, RenderedPage};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single post in full
    pub fn print_post(&self, post: &Post) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", post.id);
                println!("Title:    {}", post.title);
                println!("Category: {}", post.category);
                println!("Status:   {}", post.status);
                println!("Author:   {}", post.author);
                println!("Date:     {}", post.date);
                if !post.excerpt.is_empty() {
                    println!("Excerpt:  {}", post.excerpt);
                }
                if !post.tags.is_empty() {
                    println!("Tags:     {}", post.tags.join(", "));
                }
                if !post.image.is_empty() {
                    println!("Image:    {}", post.image);
                }
                println!("Views:    {}  Likes: {}", post.views, post.likes);
                if !post.content.is_empty() {
                    println!();
                    println!("{}", post.content);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(post).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", post.id);
            }
        }
    }

    /// Print a list of posts
    pub fn print_posts(&self, posts: &[Post]) {
        match self.format {
            OutputFormat::Human => {
                if posts.is_empty() {
                    println!("No posts found.");
                    return;
                }
                for post in posts {
                    println!(
                        "{} | {} | {:14} | {:9} | {}",
                        &post.id.to_string()[..8],
                        post.date,
                        truncate(&post.category, 14),
                        post.status,
                        truncate(&post.title, 45)
                    );
                }
                println!("\n{} post(s)", posts.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(posts).unwrap());
            }
            OutputFormat::Quiet => {
                for post in posts {
                    println!("{}", post.id);
                }
            }
        }
    }

    /// Print the category catalog with post counts
    pub fn print_categories(&self, categories: &[(Category, usize)]) {
        match self.format {
            OutputFormat::Human => {
                for (category, count) in categories {
                    println!(
                        "{:14} {} ({} published) - {}",
                        category.id, category.name, count, category.description
                    );
                }
            }
            OutputFormat::Json => {
                let entries: Vec<_> = categories
                    .iter()
                    .map(|(c, count)| {
                        serde_json::json!({
                            "id": c.id,
                            "name": c.name,
                            "color": c.color,
                            "description": c.description,
                            "published_posts": count,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries).unwrap());
            }
            OutputFormat::Quiet => {
                for (category, _) in categories {
                    println!("{}", category.id);
                }
            }
        }
    }

    /// Print a rendered page
    pub fn print_rendered(&self, page: &RenderedPage) {
        match self.format {
            OutputFormat::Human => {
                println!("Title:            {}", page.title);
                println!("Meta description: {}", page.meta_description);
                for (container, html) in &page.fragments {
                    println!();
                    println!("── #{} ──", container);
                    println!("{}", html);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "title": page.title,
                        "meta_description": page.meta_description,
                        "fragments": page.fragments,
                    })
                );
            }
            OutputFormat::Quiet => {
                for container in page.fragments.keys() {
                    println!("{}", container);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
