//! Plain-text ingestion for pre-extracted documents
//!
//! The pipeline consumes `(text, mime type)` pairs. Formats that are trivial
//! text transforms are handled here; binary document parsing (PDF, DOCX)
//! belongs to the upstream extraction service and is rejected as
//! unsupported.

use crate::error::{ResumeMatcherError, Result};
use pulldown_cmark::{Event, Parser, Tag};

/// Text handed to the pipeline, with provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub mime_type: String,
    pub original_name: Option<String>,
}

/// Convert an uploaded document into analysis-ready text.
pub fn text_from_upload(
    bytes: &[u8],
    mime_type: &str,
    original_name: Option<&str>,
) -> Result<ExtractedText> {
    let text = match mime_type {
        "text/plain" => std::str::from_utf8(bytes)
            .map_err(|e| ResumeMatcherError::Parse(format!("invalid UTF-8 text: {}", e)))?
            .to_string(),
        "text/markdown" => {
            let markdown = std::str::from_utf8(bytes)
                .map_err(|e| ResumeMatcherError::Parse(format!("invalid UTF-8 markdown: {}", e)))?;
            markdown_to_text(markdown)
        }
        other => {
            return Err(ResumeMatcherError::UnsupportedFormat(other.to_string()));
        }
    };

    Ok(ExtractedText {
        text,
        mime_type: mime_type.to_string(),
        original_name: original_name.map(|n| n.to_string()),
    })
}

/// Flatten markdown to plain text, preserving line structure so section
/// headings stay detectable.
fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::End(Tag::Heading(..))
            | Event::End(Tag::Paragraph)
            | Event::End(Tag::Item) => out.push('\n'),
            _ => {}
        }
    }

    let lines: Vec<&str> = out
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}
