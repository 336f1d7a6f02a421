//! Document loading: file-type allow-list and loader dispatch

use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;
use std::path::Path;

use crate::domain::error::RagError;

/// The explicit allow-list of ingestable file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Pdf,
    Markdown,
    PlainText,
}

impl FileType {
    /// Resolve a declared type tag: a file extension or a MIME type.
    /// Anything outside the allow-list is `None`.
    pub fn from_declared(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pdf" | "application/pdf" => Some(Self::Pdf),
            "md" | "markdown" | "text/markdown" | "text/x-markdown" => Some(Self::Markdown),
            "txt" | "text" | "text/plain" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Resolve from a file path, preferring the guessed MIME type and
    /// falling back to the raw extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        if let Some(mime) = mime_guess::from_path(path).first_raw() {
            if let Some(file_type) = Self::from_declared(mime) {
                return Some(file_type);
            }
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_declared)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Markdown => "md",
            Self::PlainText => "txt",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for file-type-specific loaders.
///
/// A loader reads the source file once and returns one or more text
/// segments (e.g. PDF pages) for the chunker to consume.
pub trait DocumentLoader: Send + Sync + Debug {
    /// The file type this loader handles
    fn file_type(&self) -> FileType;

    /// Load the file into text segments
    fn load(&self, path: &Path) -> Result<Vec<String>, RagError>;
}

/// Map from file type to loader. Adding a type means registering one
/// entry, not extending a conditional chain.
#[derive(Debug, Default)]
pub struct LoaderRegistry {
    loaders: HashMap<FileType, Box<dyn DocumentLoader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    pub fn register(mut self, loader: Box<dyn DocumentLoader>) -> Self {
        self.loaders.insert(loader.file_type(), loader);
        self
    }

    pub fn get(&self, file_type: FileType) -> Option<&dyn DocumentLoader> {
        self.loaders.get(&file_type).map(|l| l.as_ref())
    }

    pub fn supported_types(&self) -> Vec<FileType> {
        self.loaders.keys().copied().collect()
    }
}
