//! OCR engine wrapper and text extraction pipeline for imgtext.
//!
//! The engine itself is an opaque collaborator behind [`TextRecognizer`].
//! [`extract_text`] validates the request, builds the engine and turns its
//! output into a [`imgtext_protocol::RecognitionResult`].

pub mod extract;
pub mod ocr;
pub mod recognizer;

pub use extract::{extract_text, ExtractError};
pub use ocr::{find_models_dir, group_paragraphs, OcrService};
pub use recognizer::TextRecognizer;
