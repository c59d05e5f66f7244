//! OCR engine wrapper using the ocrs library.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use imgtext_protocol::{RecognitionOptions, RecognizedLine};
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use tracing::{debug, trace};

use crate::recognizer::TextRecognizer;

/// File name of the text detection model.
pub const DETECTION_MODEL: &str = "text-detection.rten";

/// File name of the text recognition model.
pub const RECOGNITION_MODEL: &str = "text-recognition.rten";

/// Directory the ocrs tooling downloads its models to.
const OCRS_CACHE_DIR: &str = "~/.cache/ocrs";

/// OCR service for text detection and recognition.
pub struct OcrService {
    engine: OcrEngine,
}

impl OcrService {
    /// Create a new OCR service by loading models from the given directory.
    pub fn new(models_dir: &Path) -> Result<Self> {
        let detection_path = models_dir.join(DETECTION_MODEL);
        let recognition_path = models_dir.join(RECOGNITION_MODEL);

        debug!("Loading OCR detection model from {:?}", detection_path);
        let detection_model = Model::load_file(&detection_path)
            .with_context(|| format!("Failed to load detection model from {:?}", detection_path))?;

        debug!("Loading OCR recognition model from {:?}", recognition_path);
        let recognition_model = Model::load_file(&recognition_path).with_context(|| {
            format!("Failed to load recognition model from {:?}", recognition_path)
        })?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .context("Failed to create OCR engine")?;

        debug!("OCR engine initialized successfully");
        Ok(Self { engine })
    }

    /// Get all text lines in an encoded image, top to bottom, with positions.
    ///
    /// # Arguments
    /// * `image_data` - Encoded image bytes (PNG, JPEG, ...)
    pub fn recognize_bytes(&self, image_data: &[u8]) -> Result<Vec<RecognizedLine>> {
        let img = image::load_from_memory(image_data)
            .context("Failed to decode image")?
            .into_rgb8();

        let (width, height) = (img.width(), img.height());
        trace!("Image loaded: {}x{}", width, height);

        let img_source = ImageSource::from_bytes(img.as_raw(), (width, height))
            .context("Failed to create image source")?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .context("Failed to prepare OCR input")?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .context("Failed to detect words")?;

        trace!("Detected {} word regions", word_rects.len());

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .context("Failed to recognize text")?;

        let mut lines = Vec::new();

        for line in line_texts.iter().flatten() {
            let text = line.to_string();
            if text.trim().is_empty() {
                continue;
            }

            let words: Vec<_> = line.words().collect();
            if words.is_empty() {
                continue;
            }

            let mut min_x = i32::MAX;
            let mut min_y = i32::MAX;
            let mut max_x = i32::MIN;
            let mut max_y = i32::MIN;

            for word in &words {
                let rect = word.bounding_rect();
                min_x = min_x.min(rect.left() as i32);
                min_y = min_y.min(rect.top() as i32);
                max_x = max_x.max((rect.left() + rect.width()) as i32);
                max_y = max_y.max((rect.top() + rect.height()) as i32);
            }

            lines.push(RecognizedLine {
                text,
                x: min_x,
                y: min_y,
                width: max_x - min_x,
                height: max_y - min_y,
            });
        }

        debug!("Detected {} text lines", lines.len());

        Ok(lines)
    }
}

impl TextRecognizer for OcrService {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn recognize(&self, image: &Path, options: &RecognitionOptions) -> Result<Vec<RecognizedLine>> {
        check_options(options)?;

        let image_data = std::fs::read(image)
            .with_context(|| format!("Failed to read image {:?}", image))?;

        self.recognize_bytes(&image_data)
    }
}

/// Reject configurations the ocrs engine cannot honor.
///
/// ocrs runs on the CPU with a single Latin-script recognition model, which
/// covers every [`imgtext_protocol::Language`].
fn check_options(options: &RecognitionOptions) -> Result<()> {
    if options.use_gpu {
        anyhow::bail!("GPU acceleration is not available, the ocrs engine runs on CPU only");
    }
    if options.languages.is_empty() {
        anyhow::bail!("No recognition language configured");
    }
    debug!(
        "Recognizing with languages [{}]",
        options
            .languages
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

fn has_models(dir: &Path) -> bool {
    dir.join(DETECTION_MODEL).exists() && dir.join(RECOGNITION_MODEL).exists()
}

/// Find the directory holding the ocrs models.
///
/// An explicit directory is used as-is. Otherwise the search tries
/// `bin/../models` relative to the executable, then the ocrs download cache
/// at `~/.cache/ocrs`.
pub fn find_models_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if has_models(dir) {
            debug!("Using models directory {:?}", dir);
            return Ok(dir.to_path_buf());
        }
        anyhow::bail!(
            "Could not find OCR models {} and {} in {:?}",
            DETECTION_MODEL,
            RECOGNITION_MODEL,
            dir
        );
    }

    let mut candidates = Vec::new();

    let exe_path = std::env::current_exe().context("Failed to get executable path")?;
    if let Some(root) = exe_path.parent().and_then(|p| p.parent()) {
        candidates.push(root.join("models"));
    }
    candidates.push(PathBuf::from(shellexpand::tilde(OCRS_CACHE_DIR).into_owned()));

    if let Some(dir) = candidates.iter().find(|dir| has_models(dir)) {
        debug!("Found models directory at {:?}", dir);
        return Ok(dir.clone());
    }

    anyhow::bail!(
        "Could not find OCR models in any of {:?}. Pass --models-dir or set IMGTEXT_MODELS_DIR.",
        candidates
    )
}
