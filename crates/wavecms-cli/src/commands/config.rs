//! Config command handlers

use anyhow::{bail, Context, Result};

use wavecms_core::SiteConfig;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = SiteConfig::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "site_name": config.site_name,
                    "site_description": config.site_description,
                    "site_url": config.site_url,
                    "data_dir": config.data_dir,
                    "categories": config.categories.iter().map(|c| &c.id).collect::<Vec<_>>(),
                    "social": config.social,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  site_name:        {}", config.site_name);
            println!("  site_description: {}", config.site_description);
            println!("  site_url:         {}", config.site_url);
            println!("  data_dir:         {}", config.data_dir.display());
            println!(
                "  categories:       {}",
                config
                    .categories
                    .iter()
                    .map(|c| c.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!(
                "  social:           {}",
                config.social.keys().cloned().collect::<Vec<_>>().join(", ")
            );
            println!();
            println!("Config file: {}", SiteConfig::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = SiteConfig::load().context("Failed to load configuration")?;

    match key.as_str() {
        "site_name" => config.site_name = value.clone(),
        "site_description" => config.site_description = value.clone(),
        "site_url" => config.site_url = value.clone(),
        "data_dir" => config.data_dir = value.clone().into(),
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: site_name, site_description, site_url, data_dir",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
