//! Document command handlers

use anyhow::{bail, Context, Result};

use skriv_core::{ApiError, DocClient, DocumentDraft};

use crate::editor::{confirm, edit_text, prompt_with_default};
use crate::output::Output;

/// List all documents
pub async fn list(client: &DocClient, output: &Output) -> Result<()> {
    let docs = client.list().await.context("Failed to list documents")?;
    output.print_documents(&docs);
    Ok(())
}

/// Show a single document
pub async fn show(client: &DocClient, id: &str, output: &Output) -> Result<()> {
    let doc = client
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch document: {}", id))?;

    output.print_document(&doc);
    Ok(())
}

/// Create a new document
pub async fn create(
    client: &DocClient,
    title: Option<String>,
    content: Option<String>,
    output: &Output,
) -> Result<()> {
    let title = match title {
        Some(t) => t,
        None => prompt_with_default("Title", "")?.unwrap_or_default(),
    };

    let content = match content {
        Some(c) => c,
        None => {
            let initial = "<!-- Write the document content below. -->\n\n";
            let edited = edit_text(initial).context("Failed to edit document content")?;

            // Remove the comment lines
            edited
                .lines()
                .filter(|line| !line.starts_with("<!--"))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        }
    };

    if content.is_empty() {
        bail!("Document content cannot be empty");
    }

    let draft = DocumentDraft::new(title, content);
    let doc = client
        .create(&draft)
        .await
        .context("Failed to create document")?;

    output.success(&format!("Created document: {}", doc.id));
    output.print_document(&doc);

    Ok(())
}

/// Edit a document
pub async fn edit(client: &DocClient, id: &str, output: &Output) -> Result<()> {
    let doc = client
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch document: {}", id))?;

    println!("Editing document: {}", doc.id);

    let title = prompt_with_default("Title", &doc.title)?.unwrap_or_else(|| doc.title.clone());
    let content = edit_text(&doc.content).context("Failed to edit document content")?;

    let draft = DocumentDraft::new(title, content);
    client
        .update(&doc.id, &draft)
        .await
        .with_context(|| format!("Failed to update document: {}", doc.id))?;

    output.success("Document updated");
    Ok(())
}

/// Delete a document
pub async fn delete(client: &DocClient, id: &str, output: &Output) -> Result<()> {
    if output.should_prompt() {
        println!("Delete document: {}", id);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match client.delete(id).await {
        Ok(()) => {
            output.success(&format!("Deleted document: {}", id));
            Ok(())
        }
        // The active dialect has no delete endpoint at all
        Err(ApiError::Unsupported { .. }) => {
            bail!("This backend has no delete endpoint; remove documents on the server instead.")
        }
        Err(err) => Err(err).with_context(|| format!("Failed to delete document: {}", id)),
    }
}
