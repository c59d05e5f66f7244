//! The extract command: one image in, recognized text or one status line out.

use std::io::Write;
use std::path::Path;

use imgtext_engine::{extract_text, ExtractError, TextRecognizer};
use imgtext_protocol::{ErrorCode, InvocationRequest};
use tracing::{debug, warn};

use crate::cli::{parse_error_exit_code, Cli};
use crate::output::Output;

/// Run one invocation and return the process exit status.
///
/// `make_engine` receives the configured models directory and is only
/// called once the image path has been validated.
pub fn run<R, F, W, E>(cli: &Cli, output: &mut Output<W, E>, make_engine: F) -> i32
where
    R: TextRecognizer,
    F: FnOnce(Option<&Path>) -> anyhow::Result<R>,
    W: Write,
    E: Write,
{
    let request = InvocationRequest {
        image_path: cli.image.clone(),
    };
    let options = cli.recognition_options();

    let result = extract_text(&request, &options, || make_engine(cli.models_dir.as_deref()));

    let (written, code) = match result {
        Ok(result) if result.has_text() => (output.print_text(&result, options.detail), 0),
        Ok(_) => {
            let path = request.image_path.as_deref().unwrap_or(Path::new(""));
            (output.print_no_text(path), 0)
        }
        Err(e) => {
            debug!("Extraction failed: {:?}", e);
            let code = e.code();
            (output.print_error(code, &error_message(&e)), code.exit_code())
        }
    };

    if let Err(e) = written {
        warn!("Failed to write output: {}", e);
    }

    code
}

/// Report an argument parsing failure as a usage error document and return
/// the process exit status.
pub fn report_parse_error<W, E>(err: &clap::Error, output: &mut Output<W, E>) -> i32
where
    W: Write,
    E: Write,
{
    let message = err.render().to_string();
    if let Err(e) = output.print_error(ErrorCode::Usage, message.trim_end()) {
        warn!("Failed to write output: {}", e);
    }
    parse_error_exit_code(err)
}

fn error_message(err: &ExtractError) -> String {
    match err {
        ExtractError::MissingPath => "Usage: imgtext <IMAGE>".to_string(),
        ExtractError::NotFound(path) => format!("File not found: {}", path.display()),
        ExtractError::Engine(e) => format!("OCR engine failed: {:#}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use crate::cli::json_requested;
    use clap::Parser;
    use imgtext_protocol::{RecognitionOptions, RecognizedLine};
    use tempfile::NamedTempFile;

    struct FixedRecognizer(Vec<&'static str>);

    impl TextRecognizer for FixedRecognizer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn recognize(
            &self,
            _image: &Path,
            _options: &RecognitionOptions,
        ) -> anyhow::Result<Vec<RecognizedLine>> {
            Ok(self.0.iter().map(|l| RecognizedLine::text_only(*l)).collect())
        }
    }

    struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn recognize(
            &self,
            _image: &Path,
            _options: &RecognitionOptions,
        ) -> anyhow::Result<Vec<RecognizedLine>> {
            Err(anyhow!("CUDA out of memory"))
        }
    }

    fn invoke<R: TextRecognizer>(
        args: &[&str],
        engine: anyhow::Result<R>,
    ) -> (i32, String, String) {
        let cli = Cli::try_parse_from(std::iter::once("imgtext").chain(args.iter().copied()))
            .unwrap();
        let mut output = Output::new(cli.json, cli.tag.clone(), Vec::new(), Vec::new());
        let code = run(&cli, &mut output, |_| engine);
        let (out, err) = output.into_inner();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_missing_argument() {
        let (code, out, err) = invoke(&[], Ok(FixedRecognizer(vec!["unused"])));
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(err, "[imgtext][ERROR] Usage: imgtext <IMAGE>\n");
    }

    #[test]
    fn test_file_not_found() {
        let (code, _, err) = invoke(
            &["/no/such/image.png"],
            Ok(FixedRecognizer(vec!["unused"])),
        );
        assert_eq!(code, 2);
        assert!(err.contains("/no/such/image.png"));
        assert_eq!(err.lines().count(), 1);
    }

    #[test]
    fn test_engine_failure() {
        let image = NamedTempFile::new().unwrap();
        let path = image.path().to_str().unwrap();
        let (code, out, err) = invoke(&[path], Ok(FailingRecognizer));
        assert_eq!(code, 3);
        assert!(out.is_empty());
        assert!(err.contains("CUDA out of memory"));
        assert_eq!(err.lines().count(), 1);
    }

    #[test]
    fn test_engine_load_failure() {
        let image = NamedTempFile::new().unwrap();
        let path = image.path().to_str().unwrap();
        let (code, _, err) = invoke::<FixedRecognizer>(
            &[path],
            Err(anyhow!("Could not find OCR models")),
        );
        assert_eq!(code, 3);
        assert!(err.contains("Could not find OCR models"));
    }

    #[test]
    fn test_no_text_found() {
        let image = NamedTempFile::new().unwrap();
        let path = image.path().to_str().unwrap();
        let (code, out, err) = invoke(&[path], Ok(FixedRecognizer(vec!["  ", ""])));
        assert_eq!(code, 0);
        assert!(out.starts_with("[imgtext][INFO] No text found"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_text_found() {
        let image = NamedTempFile::new().unwrap();
        let path = image.path().to_str().unwrap();
        let (code, out, _) = invoke(&[path], Ok(FixedRecognizer(vec!["HELLO", "WORLD"])));
        assert_eq!(code, 0);
        assert_eq!(out, "HELLO\nWORLD\n");
    }

    #[test]
    fn test_custom_tag() {
        let (_, _, err) = invoke(
            &["--tag", "PYTHON", "/no/such/image.png"],
            Ok(FixedRecognizer(vec![])),
        );
        assert!(err.starts_with("[PYTHON][ERROR]"));
    }

    #[test]
    fn test_json_failure_keeps_exit_code() {
        let (code, out, err) = invoke(
            &["--json", "/no/such/image.png"],
            Ok(FixedRecognizer(vec![])),
        );
        assert_eq!(code, 2);
        assert!(err.is_empty());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["error"]["code"], "not_found");
    }

    #[test]
    fn test_json_no_text() {
        let image = NamedTempFile::new().unwrap();
        let path = image.path().to_str().unwrap();
        let (code, out, _) = invoke(&["--json", path], Ok(FixedRecognizer(vec![])));
        assert_eq!(code, 0);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["data"]["type"], "no_text");
    }

    #[test]
    fn test_json_parse_error_prints_usage_document() {
        let args = ["imgtext", "--json", "--lang", "xx", "x.png"];
        assert!(json_requested(args));
        let err = Cli::try_parse_from(args).unwrap_err();

        let mut output = Output::new(true, "imgtext", Vec::new(), Vec::new());
        let code = report_parse_error(&err, &mut output);
        let (out, err) = output.into_inner();

        assert_eq!(code, 1);
        assert!(err.is_empty());
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "usage");
        assert!(value["error"]["message"].as_str().unwrap().contains("xx"));
    }

    #[test]
    fn test_models_dir_passed_to_engine() {
        let image = NamedTempFile::new().unwrap();
        let path = image.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["imgtext", "--models-dir", "/opt/models", path]).unwrap();
        let mut output = Output::new(false, "imgtext", Vec::new(), Vec::new());

        let code = run(&cli, &mut output, |dir| {
            assert_eq!(dir, Some(Path::new("/opt/models")));
            Ok(FixedRecognizer(vec!["ok"]))
        });
        assert_eq!(code, 0);
    }
}
