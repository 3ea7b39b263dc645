//! WaveCMS CLI
//!
//! Command-line interface for WaveCMS - content management for the
//! Wave Liberia news site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wavecms_core::Store;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "wavecms")]
#[command(about = "WaveCMS - content management for the Wave Liberia news site")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the site store (seeds starter content)
    Init {
        /// Delete any existing site document first
        #[arg(long)]
        fresh: bool,
    },
    /// Manage posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// List the category catalog
    Categories,
    /// Render a page's HTML fragments
    Render {
        /// Page filename (index.html, sports.html, ...)
        page: String,
        /// Write fragments to this directory instead of printing
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (document location, post counts)
    Status,
}

#[derive(Subcommand)]
enum PostCommands {
    /// Create a new post
    #[command(alias = "add")]
    Create {
        /// Headline
        title: String,
        /// Body HTML
        #[arg(short, long, default_value = "")]
        content: String,
        /// Teaser shown in listings
        #[arg(short, long, default_value = "")]
        excerpt: String,
        /// Category id
        #[arg(short = 'C', long, default_value = "news")]
        category: String,
        /// Tags to add
        #[arg(short, long)]
        tag: Vec<String>,
        /// Author display name
        #[arg(short, long, default_value = "Complete Control")]
        author: String,
        /// Publish immediately instead of saving as a draft
        #[arg(short, long)]
        publish: bool,
        /// Cover image URL
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// List posts
    #[command(alias = "ls")]
    List {
        /// Only published posts in this category
        #[arg(short = 'C', long)]
        category: Option<String>,
    },
    /// List recent published posts
    Recent {
        /// Maximum number of posts
        #[arg(short, long, default_value_t = wavecms_core::DEFAULT_QUERY_LIMIT)]
        limit: usize,
    },
    /// List trending published posts (by views)
    Trending {
        /// Maximum number of posts
        #[arg(short, long, default_value_t = wavecms_core::DEFAULT_QUERY_LIMIT)]
        limit: usize,
    },
    /// Show post details
    Show {
        /// Post ID (full UUID or prefix)
        id: String,
    },
    /// Update fields of a post
    #[command(alias = "edit")]
    Update {
        /// Post ID (full UUID or prefix)
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
        #[arg(short, long)]
        excerpt: Option<String>,
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Replace all tags
        #[arg(long)]
        tag: Option<Vec<String>>,
        #[arg(short, long)]
        author: Option<String>,
        /// 'draft' or 'published'
        #[arg(short, long)]
        status: Option<String>,
        /// Publish date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post ID (full UUID or prefix)
        id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (site_name, site_description, site_url, data_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that don't need the store
    match &cli.command {
        Commands::Config { command } => {
            return match command.clone() {
                Some(ConfigCommands::Set { key, value }) => {
                    commands::config::set(key, value, &output)
                }
                Some(ConfigCommands::Show) | None => commands::config::show(&output),
            };
        }
        Commands::Init { fresh } => return commands::init::run(*fresh, &output),
        _ => {}
    }

    // Opening the store seeds starter content on first run
    let mut store = Store::open()?;
    tracing::debug!(posts = store.post_count(), "store opened");

    match cli.command {
        Commands::Init { .. } | Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Post { command } => handle_post_command(command, &mut store, &output),
        Commands::Categories => commands::category::list(&store, &output),
        Commands::Render { page, out } => commands::render::page(&store, page, out, &output),
        Commands::Status => commands::status::show(&store, &output),
    }
}

fn handle_post_command(command: PostCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        PostCommands::Create {
            title,
            content,
            excerpt,
            category,
            tag,
            author,
            publish,
            image,
        } => commands::post::create(
            store, title, content, excerpt, category, tag, author, publish, image, output,
        ),
        PostCommands::List { category } => commands::post::list(store, category, output),
        PostCommands::Recent { limit } => commands::post::recent(store, limit, output),
        PostCommands::Trending { limit } => commands::post::trending(store, limit, output),
        PostCommands::Show { id } => commands::post::show(store, id, output),
        PostCommands::Update {
            id,
            title,
            content,
            excerpt,
            category,
            tag,
            author,
            status,
            date,
            image,
        } => commands::post::update(
            store, id, title, content, excerpt, category, tag, author, status, date, image, output,
        ),
        PostCommands::Delete { id } => commands::post::delete(store, id, output),
    }
}
