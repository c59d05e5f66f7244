//! Text extraction pipeline: validate the request, run the engine, shape the result.

use std::path::PathBuf;

use imgtext_protocol::{ErrorCode, InvocationRequest, RecognitionOptions, RecognitionResult};
use thiserror::Error;
use tracing::{debug, info};

use crate::ocr::group_paragraphs;
use crate::recognizer::TextRecognizer;

/// Why an extraction did not produce a result.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No image path was supplied.
    #[error("no image path provided")]
    MissingPath,

    /// The image path does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The engine failed to load or raised an error while recognizing.
    #[error("{0:#}")]
    Engine(anyhow::Error),
}

impl ExtractError {
    /// Failure category, which decides the process exit status.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExtractError::MissingPath => ErrorCode::Usage,
            ExtractError::NotFound(_) => ErrorCode::NotFound,
            ExtractError::Engine(_) => ErrorCode::EngineFailure,
        }
    }
}

/// Extract text from the image named by `request`.
///
/// The engine is only built through `make_engine` once the path has been
/// validated and found on disk, and is dropped when this returns. An image
/// with no text yields an empty (or blank-only) result, not an error.
pub fn extract_text<R, F>(
    request: &InvocationRequest,
    options: &RecognitionOptions,
    make_engine: F,
) -> Result<RecognitionResult, ExtractError>
where
    R: TextRecognizer,
    F: FnOnce() -> anyhow::Result<R>,
{
    let path = request.validate().map_err(|_| ExtractError::MissingPath)?;

    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }

    info!("Starting OCR for {:?}", path);

    let engine = make_engine().map_err(ExtractError::Engine)?;
    let lines = engine
        .recognize(path, options)
        .map_err(ExtractError::Engine)?;

    debug!("{} returned {} lines", engine.name(), lines.len());

    let lines = if options.paragraph {
        let paragraphs = group_paragraphs(lines);
        debug!("Grouped into {} paragraphs", paragraphs.len());
        paragraphs
    } else {
        lines
    };

    Ok(RecognitionResult::new(lines))
}
