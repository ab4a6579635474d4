//! Plain-text acquisition from resume files

use crate::error::{JobFinderError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

/// Extract plain text from a resume file, dispatching on the extension.
/// Supports `.txt`, `.md`, and `.pdf`.
pub async fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(JobFinderError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => Ok(fs::read_to_string(path).await?),
        "md" | "markdown" => {
            let content = fs::read_to_string(path).await?;
            Ok(markdown_to_text(&content))
        }
        "pdf" => {
            let bytes = fs::read(path).await?;
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                JobFinderError::TextExtraction(format!(
                    "Failed to extract text from PDF '{}': {}",
                    path.display(),
                    e
                ))
            })
        }
        other => Err(JobFinderError::UnsupportedFormat(format!(
            "Unsupported resume format '.{}' for: {}",
            other,
            path.display()
        ))),
    }
}

/// Flatten Markdown to plain text, keeping only the visible content.
fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak => text.push('\n'),
            Event::End(
                Tag::Paragraph
                | Tag::Heading(..)
                | Tag::Item
                | Tag::CodeBlock(_)
                | Tag::BlockQuote
                | Tag::List(_)
                | Tag::TableRow,
            ) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
