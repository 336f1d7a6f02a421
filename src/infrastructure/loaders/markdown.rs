//! Markdown loader

use std::path::Path;

use pulldown_cmark::{Event, Parser, Tag};

use crate::domain::{DocumentLoader, FileType, RagError};

/// Loader for Markdown files: markup is stripped down to its text content,
/// keeping line breaks between blocks so the chunker's separator still
/// applies.
#[derive(Debug, Clone, Default)]
pub struct MarkdownLoader;

impl MarkdownLoader {
    pub fn new() -> Self {
        Self
    }

    fn extract_text(markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut text = String::new();

        for event in parser {
            match event {
                Event::Text(t) | Event::Code(t) => {
                    text.push_str(&t);
                }
                Event::SoftBreak | Event::HardBreak => {
                    text.push(' ');
                }
                Event::End(Tag::Heading(..))
                | Event::End(Tag::Paragraph)
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => {
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                }
                _ => {}
            }
        }

        text.lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DocumentLoader for MarkdownLoader {
    fn file_type(&self) -> FileType {
        FileType::Markdown
    }

    fn load(&self, path: &Path) -> Result<Vec<String>, RagError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RagError::document_read(path.to_string_lossy(), e.to_string()))?;

        Ok(vec![Self::extract_text(&raw)])
    }
}
