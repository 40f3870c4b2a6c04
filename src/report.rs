/*!
 * Reporting functionality for promptclip
 *
 * Provides functionality for generating formatted reports of a run
 * using the tabled library for clean, consistent table rendering.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::pipeline::PromptOutput;
use crate::utils::count_lines;

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Root-relative path of the file
    pub path: String,
    /// Number of lines in the rendered content
    pub lines: usize,
    /// Number of characters in the rendered content
    pub chars: usize,
    /// Whether the content was minified
    pub minified: bool,
}

/// Statistics for one prompt build
#[derive(Debug, Clone)]
pub struct PromptReport {
    /// Time taken to build the prompt
    pub duration: Duration,
    /// Details for each file, in prompt order
    pub file_details: Vec<FileReportInfo>,
    /// Characters in the final prompt
    pub total_chars: usize,
    /// Tokens in the final prompt
    pub total_tokens: usize,
    /// Encoding the tokens were counted with
    pub encoding: String,
    /// Whether the prompt reached the clipboard
    pub copied: bool,
}

impl PromptReport {
    /// Collect report data from a finished run
    pub fn from_output(output: &PromptOutput, duration: Duration) -> Self {
        let file_details = output
            .files
            .iter()
            .map(|file| FileReportInfo {
                path: file.relative_path.clone(),
                lines: count_lines(&file.content),
                chars: file.content.chars().count(),
                minified: file.minified,
            })
            .collect();

        Self {
            duration,
            file_details,
            total_chars: output.prompt.chars().count(),
            total_tokens: output.total_tokens,
            encoding: output.encoding.clone(),
            copied: output.copied,
        }
    }

    /// Number of files that went through the minifier
    pub fn files_minified(&self) -> usize {
        self.file_details.iter().filter(|f| f.minified).count()
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for prompt builds
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &PromptReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stderr, keeping stdout free for the prompt
    pub fn print_report(&self, report: &PromptReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &PromptReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Processed".to_string(),
                value: self.format_number(report.file_details.len()),
            },
            SummaryRow {
                key: "🗜️ Files Minified".to_string(),
                value: self.format_number(report.files_minified()),
            },
            SummaryRow {
                key: "📝 Total Characters".to_string(),
                value: self.format_number(report.total_chars),
            },
            SummaryRow {
                key: "📦 LLM Tokens".to_string(),
                value: format!("{} ({})", report.total_tokens, report.encoding),
            },
            SummaryRow {
                key: "📋 Clipboard".to_string(),
                value: if report.copied { "copied" } else { "skipped" }.to_string(),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create a files table using the tabled crate
    fn create_files_table(&self, report: &PromptReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,

            #[tabled(rename = "Minified")]
            minified: String,
        }

        let rows: Vec<FileRow> = report
            .file_details
            .iter()
            .map(|info| FileRow {
                path: info.path.clone(),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
                minified: if info.minified { "yes" } else { "" }.to_string(),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &PromptReport) -> String {
        let summary_table = self.create_summary_table(report);
        let summary_title = if report.copied {
            "✅  PROMPT COPIED TO CLIPBOARD"
        } else {
            "✅  PROMPT BUILT"
        };

        if report.file_details.is_empty() {
            return format!(
                "⚠️  No files matched\n\n{}\n{}",
                summary_title, summary_table
            );
        }

        let files_table = self.create_files_table(report);
        format!(
            "📋  PROCESSED FILES\n{}\n\n{}\n{}",
            files_table, summary_title, summary_table
        )
    }
}
