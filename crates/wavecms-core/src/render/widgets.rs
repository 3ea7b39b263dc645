//! HTML fragment builders
//!
//! Markup matches the site's page templates (Tailwind utility classes,
//! Font Awesome icons). All interpolated text goes through
//! [`escape_html`].

use chrono::NaiveDate;

use crate::models::{Category, Post};

/// The recent-posts sidebar widget: ranked headlines with relative dates
pub fn recent_posts(posts: &[Post], today: NaiveDate) -> String {
    let mut html = String::new();
    for (index, post) in posts.iter().enumerate() {
        html.push_str(&format!(
            r#"<div class="trending-article">
    <div class="trending-number">{rank:02}</div>
    <div>
        <h4 class="font-bold text-sm leading-tight mb-1">{title}</h4>
        <div class="text-xs text-gray-500">{date}</div>
    </div>
</div>
"#,
            rank = index + 1,
            title = escape_html(&post.title),
            date = format_relative_date(post.date, today),
        ));
    }
    html
}

/// The trending-posts widget: headlines with view/like counters
pub fn trending_posts(posts: &[Post]) -> String {
    let mut html = String::new();
    for (index, post) in posts.iter().enumerate() {
        html.push_str(&format!(
            r#"<div class="flex items-center space-x-3 p-3 bg-gray-50 rounded-lg">
    <div class="flex-shrink-0 w-8 h-8 bg-blue-100 text-blue-600 rounded-full flex items-center justify-center font-bold text-sm">{rank}</div>
    <div class="flex-1 min-w-0">
        <h4 class="font-semibold text-sm leading-tight mb-1 truncate">{title}</h4>
        <div class="flex items-center text-xs text-gray-500">
            <span class="flex items-center mr-3"><i class="far fa-eye mr-1"></i> {views}</span>
            <span class="flex items-center"><i class="far fa-heart mr-1"></i> {likes}</span>
        </div>
    </div>
</div>
"#,
            rank = index + 1,
            title = escape_html(&post.title),
            views = post.views,
            likes = post.likes,
        ));
    }
    html
}

/// A single-category highlight card for the landing page
pub fn category_highlight(category: &Category, post: &Post) -> String {
    format!(
        r#"<article class="bg-white rounded-xl overflow-hidden shadow-lg border border-gray-100">
    <img src="{image}" alt="{title}" class="w-full h-40 object-cover">
    <div class="p-4">
        <span class="category-badge category-{id} text-xs mb-2">{name}</span>
        <h3 class="font-bold text-sm leading-tight mb-2">{title}</h3>
        <a href="{id}.html" class="text-blue-600 text-xs font-medium hover:text-blue-800">More {name} <i class="fas fa-arrow-right ml-1"></i></a>
    </div>
</article>
"#,
        image = escape_html(&post.image),
        title = escape_html(&post.title),
        id = escape_html(&category.id),
        name = escape_html(&category.name),
    )
}

/// The article grid on a category page
pub fn category_posts(posts: &[Post], today: NaiveDate) -> String {
    let mut html = String::new();
    for post in posts {
        html.push_str(&format!(
            r#"<article class="bg-white rounded-xl overflow-hidden shadow-lg border border-gray-100">
    <img src="{image}" alt="{title}" class="w-full h-48 object-cover">
    <div class="p-4">
        <h3 class="font-bold leading-tight mb-2">{title}</h3>
        <p class="text-sm text-gray-600 mb-2">{excerpt}</p>
        <div class="text-xs text-gray-500">By {author} · {date}</div>
    </div>
</article>
"#,
            image = escape_html(&post.image),
            title = escape_html(&post.title),
            excerpt = escape_html(&post.excerpt),
            author = escape_html(&post.author),
            date = format_relative_date(post.date, today),
        ));
    }
    html
}

/// Bucketed, non-localized relative date formatting
///
/// "today", "1 day ago", "N days ago" under a week, "N weeks ago" under
/// 30 days, absolute calendar date beyond that. Future dates (scheduled
/// posts) fall through to the absolute form.
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();
    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=13 => "1 week ago".to_string(),
        14..=29 => format!("{} weeks ago", days / 7),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

/// Minimal HTML escaping for interpolated text and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
