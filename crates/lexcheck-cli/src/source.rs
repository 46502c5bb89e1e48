//! Input documents and the analysis report

use lexcheck_core::{ClassificationResult, ComplianceIssue};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upload formats accepted by the document pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Jpg,
    Jpeg,
    Png,
    Pdf,
    Txt,
}

impl FileType {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Txt => "txt",
        }
    }

    /// Whether text can be read without an extraction step
    pub fn is_plain_text(&self) -> bool {
        matches!(self, Self::Txt)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unsupported file type {0:?}; expected one of jpg, jpeg, png, pdf, txt")]
    Unsupported(String),

    #[error(
        "{} is a {file_type} file; extract its text first and pass the .txt output",
        .path.display()
    )]
    NeedsExtraction { path: PathBuf, file_type: FileType },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A document whose text is ready for analysis
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub filename: String,
    pub file_type: FileType,
    pub size_bytes: u64,
    pub text: String,
}

impl SourceDocument {
    /// Read a plain-text document, rejecting other upload formats
    pub fn read(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let file_type = FileType::from_extension(extension)
            .ok_or_else(|| SourceError::Unsupported(extension.to_string()))?;

        if !file_type.is_plain_text() {
            return Err(SourceError::NeedsExtraction {
                path: path.to_path_buf(),
                file_type,
            });
        }

        let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_type,
            size_bytes: bytes.len() as u64,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// Combined classification and compliance record for one document
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub filename: String,
    pub file_type: FileType,
    pub file_size_kb: f64,
    pub classification: ClassificationResult,
    pub issues: Vec<ComplianceIssue>,
    pub is_compliant: bool,
}

impl AnalysisReport {
    pub fn new(
        document: &SourceDocument,
        classification: ClassificationResult,
        issues: Vec<ComplianceIssue>,
    ) -> Self {
        Self {
            filename: document.filename.clone(),
            file_type: document.file_type,
            file_size_kb: document.size_kb(),
            classification,
            is_compliant: issues.is_empty(),
            issues,
        }
    }
}
