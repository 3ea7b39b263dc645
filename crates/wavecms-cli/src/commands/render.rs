//! Render command handler

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use wavecms_core::{Renderer, Store};

use crate::output::Output;

/// Render a page's fragments from the current site document
///
/// With `out_dir`, each fragment is written to
/// `<out_dir>/<container-id>.html` instead of being printed.
pub fn page(store: &Store, page: String, out_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let renderer = Renderer::new(store.config());
    let rendered = renderer.render(&page, store.document());

    match out_dir {
        Some(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
            for (container, html) in &rendered.fragments {
                let path = dir.join(format!("{}.html", container));
                fs::write(&path, html)
                    .with_context(|| format!("Failed to write fragment: {:?}", path))?;
            }
            output.success(&format!(
                "Wrote {} fragment(s) for '{}' to {}",
                rendered.fragments.len(),
                page,
                dir.display()
            ));
        }
        None => output.print_rendered(&rendered),
    }

    Ok(())
}
