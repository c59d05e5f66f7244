//! CLI argument definitions using clap.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use imgtext_protocol::{DetailLevel, ErrorCode, Language, RecognitionOptions};

/// Extract text lines from an image file with OCR.
#[derive(Parser, Debug)]
#[command(name = "imgtext")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image file to read text from
    pub image: Option<PathBuf>,

    /// Directory containing text-detection.rten and text-recognition.rten
    #[arg(long, env = "IMGTEXT_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Recognition languages
    #[arg(
        long = "lang",
        value_enum,
        value_delimiter = ',',
        default_values = ["pt", "en"]
    )]
    pub languages: Vec<LangArg>,

    /// Merge adjacent lines into paragraphs
    #[arg(long)]
    pub paragraph: bool,

    /// Include line bounding boxes (JSON output only)
    #[arg(long)]
    pub detail: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Tag prefixed to status and error messages
    #[arg(long, default_value = "imgtext", env = "IMGTEXT_TAG")]
    pub tag: String,
}

impl Cli {
    /// Engine options for this invocation. GPU acceleration is never requested.
    pub fn recognition_options(&self) -> RecognitionOptions {
        RecognitionOptions {
            languages: self.languages.iter().map(|&l| l.into()).collect(),
            use_gpu: false,
            detail: if self.detail {
                DetailLevel::Boxes
            } else {
                DetailLevel::Text
            },
            paragraph: self.paragraph,
        }
    }
}

/// Language argument values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LangArg {
    /// English
    En,
    /// Portuguese
    Pt,
}

impl From<LangArg> for Language {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::En => Language::En,
            LangArg::Pt => Language::Pt,
        }
    }
}

/// Exit status for an argument parsing outcome.
///
/// Help and version requests succeed; every other parse error is a usage
/// error so it never collides with the file-not-found status.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => ErrorCode::Usage.exit_code(),
    }
}

/// Whether `--json` appears among raw arguments, before any `--` separator.
///
/// Used when clap rejects the arguments and no parsed [`Cli`] exists.
pub fn json_requested<I, T>(args: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .take_while(|arg| arg.as_os_str() != "--")
        .any(|arg| arg.as_os_str() == "--json")
}
