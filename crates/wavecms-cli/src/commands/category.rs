//! Category command handler

use anyhow::Result;

use wavecms_core::Store;

use crate::output::Output;

/// List the category catalog with published post counts
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let categories: Vec<_> = store
        .config()
        .categories
        .iter()
        .map(|c| (c.clone(), store.posts_by_category(&c.id).len()))
        .collect();

    output.print_categories(&categories);
    Ok(())
}
