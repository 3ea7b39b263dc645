//! Status command handler

use anyhow::Result;

use wavecms_core::{PostStatus, Store};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let doc = store.document();
    let published = doc.posts.iter().filter(|p| p.is_published()).count();
    let drafts = doc.posts.iter().filter(|p| p.status == PostStatus::Draft).count();
    let data_path = store.config().site_data_path();
    let document_size = std::fs::metadata(&data_path).map(|m| m.len()).unwrap_or(0);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "site_name": store.config().site_name,
                    "data_path": data_path,
                    "document_size": document_size,
                    "counts": {
                        "posts": doc.posts.len(),
                        "published": published,
                        "drafts": drafts,
                        "users": doc.users.len(),
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", doc.posts.len());
        }
        OutputFormat::Human => {
            println!("WaveCMS Status");
            println!("==============");
            println!();
            println!("Site:     {}", store.config().site_name);
            println!("Document: {} ({} bytes)", data_path.display(), document_size);
            println!();
            println!("Posts:    {} total, {} published, {} draft", doc.posts.len(), published, drafts);
            println!("Users:    {}", doc.users.len());
        }
    }

    Ok(())
}
