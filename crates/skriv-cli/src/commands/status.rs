//! Status command handler

use anyhow::Result;

use skriv_core::{Config, DocClient};

use crate::output::{Output, OutputFormat};

/// Show backend status
///
/// Probes the backend with a list call; which is also the cheapest way
/// to learn whether any configured base answers at all.
pub async fn show(config: &Config, client: &DocClient, output: &Output) -> Result<()> {
    let listing = client.list().await;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "base_urls": config.base_urls(),
                    "reachable": listing.is_ok(),
                    "documents": listing.as_ref().map(Vec::len).ok(),
                    "error": listing.as_ref().err().map(|e| e.to_string())
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", if listing.is_ok() { "ok" } else { "unreachable" });
        }
        OutputFormat::Human => {
            println!("skriv status");
            println!("============");
            println!();
            println!("Backend:");
            for base in config.base_urls() {
                println!("  {}", base);
            }
            println!();
            match listing {
                Ok(docs) => {
                    println!("Reachable: yes");
                    println!("Documents: {}", docs.len());
                }
                Err(err) => {
                    println!("Reachable: no");
                    println!("  Error: {}", err);
                    if let Some(suggestion) = err.recovery_suggestion() {
                        println!("  Hint:  {}", suggestion);
                    }
                }
            }
        }
    }

    Ok(())
}
