//! imgtext: extract text lines from an image file with OCR.

mod cli;
mod command;
mod output;

use clap::Parser;
use imgtext_engine::{find_models_dir, OcrService};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use output::Output;

fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = cli::parse_error_exit_code(&e);
            if code != 0 && cli::json_requested(std::env::args_os()) {
                let mut output = Output::stdio(true, "imgtext");
                std::process::exit(command::report_parse_error(&e, &mut output));
            }
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let mut output = Output::stdio(cli.json, cli.tag.clone());

    let code = command::run(&cli, &mut output, |models_dir| {
        let models_dir = find_models_dir(models_dir)?;
        OcrService::new(&models_dir)
    });

    std::process::exit(code);
}
