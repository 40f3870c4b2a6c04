/*!
 * Command-line interface for promptclip
 */

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use promptclip::clipboard::{Clipboard, SystemClipboard};
use promptclip::config::{Args, Config};
use promptclip::error::Result;
use promptclip::logger::initialize_logger;
use promptclip::minifier::PythonMinifier;
use promptclip::pipeline::Pipeline;
use promptclip::report::{PromptReport, ReportFormat, Reporter};
use promptclip::tokenizer::TiktokenTokenizer;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();
    initialize_logger(args.verbose);

    // Create configuration
    let config = Config::from_args(args);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(config: &Config) -> Result<()> {
    // Fail on bad arguments before loading the encoding
    config.validate()?;

    let progress = create_progress_bar();

    let minifier = PythonMinifier::new();
    let tokenizer = TiktokenTokenizer::new(config.encoding)?;
    let system_clipboard = SystemClipboard::new();
    let clipboard = config
        .clip
        .then_some(&system_clipboard as &dyn Clipboard);

    let pipeline = Pipeline::new(&minifier, &tokenizer, clipboard, Arc::new(progress.clone()));

    let start_time = Instant::now();
    let result = pipeline.run(config);
    progress.finish_and_clear();
    let output = result?;

    if config.print {
        println!("{}", output.prompt);
    }

    let report = PromptReport::from_output(&output, start_time.elapsed());
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}

/// Spinner on stderr, hidden when stderr is not a terminal
fn create_progress_bar() -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(0);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_spinner());
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Setup");
    progress
}
