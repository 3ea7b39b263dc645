//! Init command handler

use anyhow::{Context, Result};

use wavecms_core::{JsonPersistence, SiteConfig, Store};

use crate::output::Output;

/// Initialize the site store, seeding starter content if none exists
///
/// With `fresh`, any existing site document is deleted first.
pub fn run(fresh: bool, output: &Output) -> Result<()> {
    let config = SiteConfig::load().context("Failed to load configuration")?;

    if fresh {
        let persistence = JsonPersistence::new(config.clone());
        if persistence.exists() {
            persistence
                .delete_all()
                .context("Failed to delete existing site document")?;
            output.message("Removed existing site document.");
        }
    }

    let existed = config.site_data_path().exists();
    let store = Store::open_with_config(config)?;

    if existed {
        output.message(&format!(
            "Site document already initialized ({} posts).",
            store.post_count()
        ));
    } else {
        output.success(&format!(
            "Seeded site document with {} starter posts at {}",
            store.post_count(),
            store.config().site_data_path().display()
        ));
    }

    Ok(())
}
