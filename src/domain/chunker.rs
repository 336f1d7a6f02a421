//! Separator-preferring text splitting with fixed size and overlap

use std::collections::VecDeque;

use crate::domain::chunk::Chunk;
use crate::domain::error::RagError;

/// Splits text into overlapping fixed-size chunks.
///
/// Splitting prefers the configured separator; a single unit longer than
/// `chunk_size` is hard-cut into overlapping windows. Sizes are counted in
/// characters.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separator: String,
}

impl TextSplitter {
    pub fn new(
        chunk_size: usize,
        chunk_overlap: usize,
        separator: impl Into<String>,
    ) -> Result<Self, RagError> {
        if chunk_size == 0 {
            return Err(RagError::configuration("chunk_size must be greater than 0"));
        }

        if chunk_overlap >= chunk_size {
            return Err(RagError::configuration(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
            separator: separator.into(),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split one text segment into chunk texts.
    ///
    /// Chunks are trimmed; whitespace-only input yields no chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        self.merge(self.units(text))
    }

    /// Lazily produce chunks from document segments, tagging each with its
    /// source. Single pass; only one segment is expanded at a time.
    pub fn chunk_iter(&self, segments: Vec<String>, source: impl Into<String>) -> ChunkIter<'_> {
        ChunkIter {
            splitter: self,
            source: source.into(),
            segments: segments.into_iter(),
            pending: VecDeque::new(),
        }
    }

    /// Convenience form of [`chunk_iter`](Self::chunk_iter) that collects
    /// everything up front.
    pub fn chunk_all(&self, segments: Vec<String>, source: impl Into<String>) -> Vec<Chunk> {
        self.chunk_iter(segments, source).collect()
    }

    /// Separator-split the text, hard-cutting any unit over `chunk_size`.
    fn units(&self, text: &str) -> Vec<String> {
        let mut units = Vec::new();

        for part in text.split(self.separator.as_str()) {
            if part.chars().count() <= self.chunk_size {
                units.push(part.to_string());
            } else {
                units.extend(self.hard_cut(part));
            }
        }

        units
    }

    fn hard_cut(&self, part: &str) -> Vec<String> {
        let chars: Vec<char> = part.chars().collect();
        let step = self.chunk_size - self.chunk_overlap;
        let mut pieces = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            pieces.push(chars[start..end].iter().collect());

            if end == chars.len() {
                break;
            }

            start += step;
        }

        pieces
    }

    /// Greedily merge units into chunks up to `chunk_size`, carrying a tail
    /// of at most `chunk_overlap` characters into the next chunk.
    fn merge(&self, units: Vec<String>) -> Vec<String> {
        let sep_len = self.separator.chars().count();
        let mut chunks = Vec::new();
        let mut current: VecDeque<(String, usize)> = VecDeque::new();
        let mut total = 0usize;

        for unit in units {
            let unit_len = unit.chars().count();
            let extra = if current.is_empty() { 0 } else { sep_len };

            if total + unit_len + extra > self.chunk_size && !current.is_empty() {
                self.emit(&mut chunks, &current);

                while total > self.chunk_overlap
                    || (total + unit_len + sep_len > self.chunk_size && total > 0)
                {
                    let (_, dropped_len) = current.pop_front().expect("total > 0 implies units");
                    total -= dropped_len;
                    if !current.is_empty() {
                        total -= sep_len;
                    }
                }
            }

            if !current.is_empty() {
                total += sep_len;
            }
            total += unit_len;
            current.push_back((unit, unit_len));
        }

        self.emit(&mut chunks, &current);
        chunks
    }

    fn emit(&self, chunks: &mut Vec<String>, current: &VecDeque<(String, usize)>) {
        let joined = current
            .iter()
            .map(|(unit, _)| unit.as_str())
            .collect::<Vec<_>>()
            .join(&self.separator);

        let trimmed = joined.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
    }
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            chunk_size: 4000,
            chunk_overlap: 400,
            separator: "\n".to_string(),
        }
    }
}

/// Single-pass, non-restartable chunk producer.
///
/// Internal newlines are normalized to single spaces on each produced chunk,
/// after splitting has already happened on the raw text.
#[derive(Debug)]
pub struct ChunkIter<'a> {
    splitter: &'a TextSplitter,
    source: String,
    segments: std::vec::IntoIter<String>,
    pending: VecDeque<String>,
}

impl Iterator for ChunkIter<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            if let Some(text) = self.pending.pop_front() {
                return Some(Chunk::new(text.replace('\n', " "), self.source.clone()));
            }

            let segment = self.segments.next()?;
            self.pending = self.splitter.split(&segment).into();
        }
    }
}
