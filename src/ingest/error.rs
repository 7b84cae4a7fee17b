//! Error types for file ingestion.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while turning a file into an identifier source.
#[derive(Debug, Clone, Error)]
pub enum IngestError {
    /// File extension is not a bibliography format we read
    #[error(
        "unsupported file '{file_name}': extension '{extension}' is not accepted\n  Suggestion: Export your references as .bib, .bibtex, or .ris"
    )]
    UnsupportedExtension {
        /// File name as given
        file_name: String,
        /// Lowercased extension, empty when missing
        extension: String,
    },

    /// Path has no usable file name component
    #[error("invalid file path '{path}': no file name\n  Suggestion: Pass a path to a file, not a directory")]
    InvalidPath {
        /// The offending path
        path: String,
    },

    /// File could not be read
    #[error("failed to process file '{path}': {reason}\n  Suggestion: {suggestion}")]
    Read {
        /// Path that failed
        path: String,
        /// Underlying I/O failure
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl IngestError {
    /// Creates an `UnsupportedExtension` error.
    #[must_use]
    pub fn unsupported(file_name: &str, extension: &str) -> Self {
        Self::UnsupportedExtension {
            file_name: file_name.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Creates an `InvalidPath` error.
    #[must_use]
    pub fn invalid_path(path: &Path) -> Self {
        Self::InvalidPath {
            path: path.display().to_string(),
        }
    }

    /// Creates a `Read` error from an I/O failure.
    #[must_use]
    pub fn read(path: &Path, error: &std::io::Error) -> Self {
        let suggestion = match error.kind() {
            std::io::ErrorKind::NotFound => "Check the file path and try again",
            std::io::ErrorKind::PermissionDenied => "Check file permissions",
            _ => "Make sure it's a valid BibTeX or RIS file and try again",
        };
        Self::Read {
            path: path.display().to_string(),
            reason: error.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Returns true if retrying the same file may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_lists_accepted_formats() {
        let err = IngestError::unsupported("notes.txt", "txt");
        let msg = err.to_string();
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains("'txt'"));
        assert!(msg.contains(".bib, .bibtex, or .ris"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_read_error_not_found_suggestion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IngestError::read(Path::new("refs.bib"), &io);
        let msg = err.to_string();
        assert!(msg.contains("failed to process file 'refs.bib'"));
        assert!(msg.contains("Check the file path"));
        assert!(err.is_transient());
    }
}
