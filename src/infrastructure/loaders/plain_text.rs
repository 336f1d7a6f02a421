//! Plain text loader

use std::path::Path;

use crate::domain::{DocumentLoader, FileType, RagError};

/// Loader for plain text files: the whole file is one segment.
#[derive(Debug, Clone, Default)]
pub struct PlainTextLoader;

impl PlainTextLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PlainTextLoader {
    fn file_type(&self) -> FileType {
        FileType::PlainText
    }

    fn load(&self, path: &Path) -> Result<Vec<String>, RagError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RagError::document_read(path.to_string_lossy(), e.to_string()))?;

        Ok(vec![content])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "line one\nline two").unwrap();

        let segments = PlainTextLoader::new().load(file.path()).unwrap();

        assert_eq!(segments, vec!["line one\nline two".to_string()]);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let error = PlainTextLoader::new()
            .load(Path::new("/nonexistent/file.txt"))
            .unwrap_err();

        assert!(matches!(error, RagError::DocumentRead { .. }));
    }
}
