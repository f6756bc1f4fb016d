use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use chat_week::analysis::analyze_file;
use chat_week::dialect::{HeaderDialect, ParserConfig};
use chat_week::report::{Report, ReportEnvelope};
use chat_week::{logging, renderer, timefmt, window};

#[derive(Parser)]
#[command(name = "chat-week")]
#[command(about = "Seven-day activity report for exported group chats", long_about = None)]
struct Cli {
    /// Append logs to <DIR>/chat-week.log instead of stderr (env: CHAT_WEEK_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a chat export and report the last 7 days of activity
    Analyze {
        /// Exported chat .txt file
        file: PathBuf,

        /// Reference instant (e.g. 2024-01-05 or 2024-01-05T12:00). Defaults to now.
        #[arg(long)]
        now: Option<String>,

        /// Accepted header clock dialects (comma-separated: 12h,24h). Accepts both if omitted.
        #[arg(long, value_enum, value_delimiter = ',')]
        dialect: Vec<HeaderDialect>,

        /// Output formats (comma-separated: text,md,json)
        #[arg(long, value_enum, value_delimiter = ',', default_value = "text")]
        format: Vec<OutputFormat>,

        /// Write reports into this directory instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a saved JSON report to Markdown
    Render {
        /// Report JSON written by `analyze --format json`
        #[arg(long)]
        report: PathBuf,

        /// Output directory (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Md,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            now,
            dialect,
            format,
            output,
        } => {
            init_logging(cli.log_dir, &file.display().to_string())?;
            run_analyze(&file, now.as_deref(), &dialect, &format, output.as_deref())
        }
        Commands::Render { report, output } => {
            init_logging(cli.log_dir, &report.display().to_string())?;
            run_render(&report, output.as_deref())
        }
    }
}

fn init_logging(flag: Option<PathBuf>, source: &str) -> Result<()> {
    match logging::resolve_log_dir(flag) {
        Some(dir) => logging::init_file_logging(&dir, source),
        None => {
            logging::init_stderr_logging();
            Ok(())
        }
    }
}

fn run_analyze(
    file: &Path,
    now: Option<&str>,
    dialects: &[HeaderDialect],
    formats: &[OutputFormat],
    output_dir: Option<&Path>,
) -> Result<()> {
    let now: NaiveDateTime = match now {
        Some(raw) => window::parse_instant(raw)?,
        None => chrono::Local::now().naive_local(),
    };
    tracing::debug!(now = %timefmt::format_instant(&now), "Reference instant");

    let config = ParserConfig::with_dialects(dialects);
    let analysis = analyze_file(file, &now, &config)?;
    let report = &analysis.report;

    let source = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    for format in formats {
        let (rendered, extension) = match format {
            OutputFormat::Text => (renderer::text::render(report), "txt"),
            OutputFormat::Md => (renderer::md::render(report)?, "md"),
            OutputFormat::Json => {
                let envelope = ReportEnvelope {
                    source: source.clone(),
                    generated_at: timefmt::format_instant(&now),
                    parsed: analysis.parsed,
                    report,
                };
                (envelope.to_json_pretty()?, "json")
            }
        };
        emit(&rendered, output_dir, &default_filename(report, extension))?;
    }

    Ok(())
}

fn run_render(report_path: &Path, output_dir: Option<&Path>) -> Result<()> {
    let report = Report::load_from_file(report_path)?;
    let markdown = renderer::md::render(&report)?;

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }
    emit(&markdown, output_dir, &default_filename(&report, "md"))
}

fn emit(content: &str, output_dir: Option<&Path>, filename: &str) -> Result<()> {
    match output_dir {
        Some(dir) => {
            let output_path = dir.join(filename);
            std::fs::write(&output_path, content)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            eprintln!("Report written to: {}", output_path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn default_filename(report: &Report, extension: &str) -> String {
    format!("chat-week-{}.{}", report.window.end, extension)
}
