//! Request types describing a single recognition run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ErrorCode;

/// A request to extract text from one image, built from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Path to the image, if one was supplied.
    pub image_path: Option<PathBuf>,
}

impl InvocationRequest {
    /// Create a request for the given path.
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: Some(image_path.into()),
        }
    }

    /// Return the image path, or `ErrorCode::Usage` when it is absent or empty.
    pub fn validate(&self) -> Result<&Path, ErrorCode> {
        match self.image_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(ErrorCode::Usage),
        }
    }
}

/// Recognition language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Portuguese.
    Pt,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How much per-line metadata the engine should report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Text only.
    #[default]
    Text,
    /// Text plus pixel bounding boxes.
    Boxes,
}

/// Engine configuration for one recognition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionOptions {
    /// Languages the engine should recognize.
    pub languages: Vec<Language>,

    /// Request GPU acceleration.
    pub use_gpu: bool,

    /// Per-line metadata to report.
    pub detail: DetailLevel,

    /// Merge adjacent lines into paragraphs.
    pub paragraph: bool,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            languages: vec![Language::Pt, Language::En],
            use_gpu: false,
            detail: DetailLevel::Text,
            paragraph: false,
        }
    }
}
