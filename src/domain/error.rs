use thiserror::Error;

/// Core pipeline errors
#[derive(Debug, Error)]
pub enum RagError {
    #[error("File type not supported: {file_type}")]
    UnsupportedFileType { file_type: String },

    #[error("Empty file received: {source_name}")]
    EmptyDocument { source_name: String },

    #[error("Vector index unavailable: {message}")]
    IndexUnavailable { message: String },

    #[error("Do not have enough info to give a response")]
    InsufficientKnowledge,

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to read document {path}: {message}")]
    DocumentRead { path: String, message: String },
}

impl RagError {
    pub fn unsupported_file_type(file_type: impl Into<String>) -> Self {
        Self::UnsupportedFileType {
            file_type: file_type.into(),
        }
    }

    pub fn empty_document(source_name: impl Into<String>) -> Self {
        Self::EmptyDocument {
            source_name: source_name.into(),
        }
    }

    pub fn index_unavailable(message: impl Into<String>) -> Self {
        Self::IndexUnavailable {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn document_read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DocumentRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error is a client-input problem rather than a
    /// dependency or internal fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType { .. } | Self::EmptyDocument { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_file_type_error() {
        let error = RagError::unsupported_file_type("docx");
        assert_eq!(error.to_string(), "File type not supported: docx");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_insufficient_knowledge_error() {
        let error = RagError::InsufficientKnowledge;
        assert_eq!(
            error.to_string(),
            "Do not have enough info to give a response"
        );
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_index_unavailable_error() {
        let error = RagError::index_unavailable("connection refused");
        assert_eq!(
            error.to_string(),
            "Vector index unavailable: connection refused"
        );
    }
}
