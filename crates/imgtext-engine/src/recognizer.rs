//! The capability imgtext consumes from an OCR engine.

use std::path::Path;

use imgtext_protocol::{RecognitionOptions, RecognizedLine};

/// An OCR engine that turns an image file into text lines.
///
/// Any error returned from [`TextRecognizer::recognize`] is treated as an
/// engine failure; callers never inspect its type.
pub trait TextRecognizer {
    /// Engine identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Recognize the text in the image at `image`, top to bottom.
    fn recognize(
        &self,
        image: &Path,
        options: &RecognitionOptions,
    ) -> anyhow::Result<Vec<RecognizedLine>>;
}

