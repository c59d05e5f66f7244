//! Output formatting for CLI results.

use std::io::{self, Write};
use std::path::Path;

use imgtext_protocol::{
    Bounds, DetailLevel, ErrorCode, LineEntry, RecognitionResult, Response, ResponseData,
};

/// Output formatter.
///
/// Plain mode prints recognized text and status lines to `out` and error
/// lines to `err`, each prefixed with `[<tag>][<LEVEL>]`. JSON mode prints
/// exactly one [`Response`] document to `out` for every outcome.
pub struct Output<W: Write, E: Write> {
    json: bool,
    tag: String,
    out: W,
    err: E,
}

impl Output<io::Stdout, io::Stderr> {
    /// Formatter writing to the process's standard streams.
    pub fn stdio(json: bool, tag: impl Into<String>) -> Self {
        Self::new(json, tag, io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> Output<W, E> {
    /// Create a new output formatter.
    pub fn new(json: bool, tag: impl Into<String>, out: W, err: E) -> Self {
        Self {
            json,
            tag: tag.into(),
            out,
            err,
        }
    }

    /// Print recognized text.
    pub fn print_text(&mut self, result: &RecognitionResult, detail: DetailLevel) -> io::Result<()> {
        if self.json {
            let lines = result
                .lines
                .iter()
                .map(|line| LineEntry {
                    text: line.text.clone(),
                    bounds: match detail {
                        DetailLevel::Boxes => Some(Bounds::from(line)),
                        DetailLevel::Text => None,
                    },
                })
                .collect();
            self.print_response(&Response::success(ResponseData::Text {
                text: result.joined(),
                lines,
            }))
        } else {
            writeln!(self.out, "{}", result.joined())
        }
    }

    /// Print the informational "no text found" message.
    pub fn print_no_text(&mut self, path: &Path) -> io::Result<()> {
        if self.json {
            self.print_response(&Response::success(ResponseData::NoText {
                path: path.display().to_string(),
            }))
        } else {
            writeln!(self.out, "[{}][INFO] No text found in {}", self.tag, path.display())
        }
    }

    /// Print an error message.
    pub fn print_error(&mut self, code: ErrorCode, message: &str) -> io::Result<()> {
        if self.json {
            self.print_response(&Response::error(code, message))
        } else {
            writeln!(self.err, "[{}][ERROR] {}", self.tag, message)
        }
    }

    fn print_response(&mut self, response: &Response) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, response)?;
        writeln!(self.out)
    }

    /// Consume the formatter and return its writers.
    #[cfg(test)]
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}
