//! Result types and the JSON envelope reported by the CLI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One line (or paragraph) of recognized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedLine {
    /// Recognized text.
    pub text: String,
    /// Left edge in image pixels.
    pub x: i32,
    /// Top edge in image pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl RecognizedLine {
    /// Create a line with no position information.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }

    /// Right edge in image pixels.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge in image pixels.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Ordered lines returned by the engine for one image.
///
/// An empty result (or one made only of blank lines) is a successful
/// "no text found" outcome, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Lines in the order the engine returned them.
    pub lines: Vec<RecognizedLine>,
}

impl RecognitionResult {
    /// Create a result from lines in engine order.
    pub fn new(lines: Vec<RecognizedLine>) -> Self {
        Self { lines }
    }

    /// Whether any line is non-empty once surrounding whitespace is stripped.
    pub fn has_text(&self) -> bool {
        self.lines.iter().any(|line| !line.text.trim().is_empty())
    }

    /// Line texts in engine order.
    pub fn text_lines(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// All lines joined by a single newline.
    pub fn joined(&self) -> String {
        self.text_lines().join("\n")
    }
}

/// A JSON document describing the outcome of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Whether the invocation succeeded.
    pub success: bool,

    /// Result data on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,

    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl Response {
    /// Create a successful response with data.
    pub fn success(data: ResponseData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorInfo {
                code,
                message: message.into(),
            }),
        }
    }

    /// Exit status the process should terminate with for this response.
    pub fn exit_code(&self) -> i32 {
        match &self.error {
            Some(error) => error.code.exit_code(),
            None => 0,
        }
    }
}

/// Response data variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseData {
    /// Text was recognized.
    Text {
        /// Joined text, lines separated by newline.
        text: String,
        /// Individual lines. Boxes are only present when detail was requested.
        lines: Vec<LineEntry>,
    },

    /// The engine ran but found no text.
    NoText {
        /// Image that was processed.
        path: String,
    },
}

/// A line entry in a JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEntry {
    /// Recognized text.
    pub text: String,

    /// Bounding box, present only when detail was requested.
    #[serde(flatten)]
    pub bounds: Option<Bounds>,
}

/// Pixel bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge in image pixels.
    pub x: i32,
    /// Top edge in image pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl From<&RecognizedLine> for Bounds {
    fn from(line: &RecognizedLine) -> Self {
        Self {
            x: line.x,
            y: line.y,
            width: line.width,
            height: line.height,
        }
    }
}

/// Error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    pub code: ErrorCode,

    /// Human-readable error message.
    pub message: String,
}

/// Failure categories. Each maps to its own process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No image path was supplied, or the arguments could not be parsed.
    #[error("usage error")]
    Usage,

    /// The image path does not exist.
    #[error("file not found")]
    NotFound,

    /// The OCR engine failed to load or to recognize the image.
    #[error("engine failure")]
    EngineFailure,
}

impl ErrorCode {
    /// Process exit status for this failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::Usage => 1,
            ErrorCode::NotFound => 2,
            ErrorCode::EngineFailure => 3,
        }
    }
}
