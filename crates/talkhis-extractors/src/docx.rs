//! DOCX content extraction using docx-rs.
//!
//! Strips formatting and returns the raw text of paragraphs and tables,
//! one paragraph per line, plus the headings found along the way.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ContentSource, DocumentStructure, ExtractedContent, MediaType, Modality};
use crate::Extractor;
use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableChild, TableRowChild};
use tracing::debug;

/// DOCX content extractor using docx-rs library.
///
/// Wraps synchronous docx-rs calls in spawn_blocking to avoid blocking the
/// async runtime. Tables come out one row per line as `a | b`.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create new DOCX extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract text synchronously (called within spawn_blocking).
    fn extract_sync(content: Vec<u8>) -> ExtractResult<(String, Vec<String>)> {
        let docx = docx_rs::read_docx(&content)
            .map_err(|e| ExtractError::Decode(format!("Failed to parse DOCX: {}", e)))?;

        let mut text_parts: Vec<String> = Vec::new();
        let mut headings: Vec<String> = Vec::new();

        for child in docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let para_text = Self::extract_paragraph_text(&p);

                    if Self::is_heading(&p) && !para_text.trim().is_empty() {
                        headings.push(para_text.trim().to_string());
                    }

                    // Empty paragraphs keep their line so section spacing survives.
                    text_parts.push(para_text);
                }
                DocumentChild::Table(t) => {
                    let table_text = Self::extract_table_text(&t);
                    if !table_text.trim().is_empty() {
                        text_parts.push(table_text);
                    }
                }
                _ => {}
            }
        }

        let text = text_parts.join("\n").trim_end().to_string();
        Ok((text, headings))
    }

    fn is_heading(p: &docx_rs::Paragraph) -> bool {
        p.property.style.as_ref().is_some_and(|style| {
            let style_id = style.val.to_lowercase();
            style_id.starts_with("heading") || style_id.contains("title")
        })
    }

    /// Extract text from a paragraph.
    fn extract_paragraph_text(p: &docx_rs::Paragraph) -> String {
        let mut text = String::new();

        for child in &p.children {
            match child {
                ParagraphChild::Run(r) => Self::push_run_text(r, &mut text),
                ParagraphChild::Hyperlink(h) => {
                    for child in &h.children {
                        if let ParagraphChild::Run(r) = child {
                            Self::push_run_text(r, &mut text);
                        }
                    }
                }
                _ => {}
            }
        }

        text
    }

    fn push_run_text(r: &docx_rs::Run, text: &mut String) {
        for run_child in &r.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
    }

    /// Extract text from a table, one row per line.
    fn extract_table_text(t: &docx_rs::Table) -> String {
        let mut rows: Vec<Vec<String>> = Vec::new();

        for row in &t.rows {
            let TableChild::TableRow(r) = row;
            let mut cells: Vec<String> = Vec::new();
            for cell in &r.cells {
                let TableRowChild::TableCell(c) = cell;
                let mut cell_text = String::new();
                for child in &c.children {
                    if let docx_rs::TableCellContent::Paragraph(p) = child {
                        let para = Self::extract_paragraph_text(p);
                        if !cell_text.is_empty() && !para.is_empty() {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&para);
                    }
                }
                cells.push(cell_text.trim().to_string());
            }
            rows.push(cells);
        }

        rows.iter()
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Extractor for DocxExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();
        let (text, headings) =
            tokio::task::spawn_blocking(move || Self::extract_sync(content)).await??;

        debug!(
            bytes = content_len,
            chars = text.chars().count(),
            sections = headings.len(),
            "Decoded DOCX"
        );

        Ok(ExtractedContent::new(text, Modality::Docx, ContentSource::Bytes)
            .with_structure(DocumentStructure { sections: headings })
            .with_metadata("original_size", content_len))
    }

    fn supports(&self, media_type: &MediaType) -> bool {
        *media_type == MediaType::WordProcessingDocument
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}
