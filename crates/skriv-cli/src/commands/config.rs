//! Config command handlers

use anyhow::{bail, Context, Result};

use skriv_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_url": config.api_url,
                    "base_urls": config.base_urls(),
                    "timeout_secs": config.timeout_secs
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.api_url);
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!(
                "  api_url:      {}",
                if config.api_url.is_empty() {
                    "(not set)"
                } else {
                    &config.api_url
                }
            );
            println!("  timeout_secs: {}", config.timeout_secs);
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "api_url" => {
            config.api_url = if value == "none" { String::new() } else { value.clone() };
        }
        "timeout_secs" => {
            config.timeout_secs = value
                .parse()
                .context("Invalid value for timeout_secs. Use a number of seconds.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: api_url, timeout_secs",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}
