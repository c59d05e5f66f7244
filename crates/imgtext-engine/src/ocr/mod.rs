//! OCR (Optical Character Recognition) module.
//!
//! Provides text detection and recognition from image files using the ocrs library.

mod engine;
mod paragraph;

pub use engine::{find_models_dir, OcrService, DETECTION_MODEL, RECOGNITION_MODEL};
pub use paragraph::group_paragraphs;
