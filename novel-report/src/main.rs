//! novel-report - Chapter word counts, word cloud and sentiment counts for a novel PDF

mod config;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ReportConfig;
use novel_text::{PageRange, analyze_document};
use report::ReportStyle;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "novel-report")]
#[command(about = "Chapter word counts, word cloud and sentiment counts for a novel PDF", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the PDF (default: source_path from the config file)
    pdf_file: Option<PathBuf>,

    /// Page range holding the chapters (e.g., "11-362")
    #[arg(long)]
    pages: Option<String>,

    /// Number of words kept in the frequency table
    #[arg(long)]
    top_n: Option<usize>,

    /// Stop-word list replacing the bundled one
    #[arg(long)]
    stop_words: Option<PathBuf>,

    /// Sentiment lexicon replacing the bundled one
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Emit JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: ~/.config/cli-programs/novel-report.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => ReportConfig::config_path()?,
    };

    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action, &config_path);
    }

    let mut config = ReportConfig::load_from(&config_path).context("Failed to load configuration")?;
    apply_overrides(&mut config, &args)?;
    config.validate()?;

    let pdf_path = args
        .pdf_file
        .clone()
        .or_else(|| config.source_path.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("PDF file path is required. Run 'novel-report --help' for usage.")
        })?;

    if !pdf_path.exists() {
        anyhow::bail!("PDF file not found: {}", pdf_path.display());
    }

    let stop_words = config.stop_words().context("Failed to load stop words")?;
    let lexicon = config.lexicon().context("Failed to load sentiment lexicon")?;

    if args.debug {
        eprintln!("PDF: {}", pdf_path.display());
        eprintln!("Config: {}", config_path.display());
        eprintln!("Page range: {:?}", config.page_range);
        eprintln!("Top words: {}", config.top_n_words);
        eprintln!("Stop words: {}", stop_words.len());
        eprintln!("Lexicon words: {}", lexicon.len());
    }

    eprintln!("Analyzing: {}", pdf_path.display());
    let analysis =
        analyze_document(&pdf_path, &config.analysis_options(), &stop_words, &lexicon)
            .context("Failed to analyze PDF")?;

    eprintln!(
        "Pages: {}, Chapters: {}, Words: {}",
        analysis.stats.pages_total,
        analysis.aggregates.chapter_counts.len(),
        analysis.stats.tokens
    );
    if analysis.stats.skipped_headings > 0 {
        eprintln!(
            "Skipped {} unparseable chapter heading(s)",
            analysis.stats.skipped_headings
        );
    }

    let rendered = if args.json {
        report::render_json(&pdf_path, &analysis)?
    } else {
        let style = ReportStyle {
            cloud_words: config.cloud_words,
            chart_width: config.chart_width,
        };
        report::render_text(&pdf_path, &analysis, &style)
    };

    write_report(&rendered, args.output.as_deref())
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut ReportConfig, args: &Args) -> Result<()> {
    if let Some(pages) = &args.pages {
        config.page_range = Some(parse_page_range(pages)?);
    }
    if let Some(top_n) = args.top_n {
        config.top_n_words = top_n;
    }
    if let Some(path) = &args.stop_words {
        config.stop_words_path = Some(path.clone());
    }
    if let Some(path) = &args.lexicon {
        config.lexicon_path = Some(path.clone());
    }
    Ok(())
}

/// Parse page range string like "11-362" or "5".
fn parse_page_range(range: &str) -> Result<PageRange> {
    let parsed = match range.split_once('-') {
        Some((first, last)) => {
            let first: usize = first.trim().parse().context("Invalid first page")?;
            let last: usize = last.trim().parse().context("Invalid last page")?;
            PageRange::new(first, last)
        }
        None => {
            let page: usize = range.trim().parse().context("Invalid page number")?;
            PageRange::new(page, page)
        }
    };

    if !parsed.is_valid() {
        anyhow::bail!(
            "Invalid page range '{}'. Use 'first-last' with 1 <= first <= last (e.g., '11-362')",
            range
        );
    }
    Ok(parsed)
}

fn write_report(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn handle_config_command(action: &ConfigAction, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ReportConfig::load_from(path)?;
            println!("Configuration file: {:?}", path);
            println!();
            match &config.source_path {
                Some(source) => println!("source_path = \"{}\"", source.display()),
                None => println!("source_path = (none)"),
            }
            match config.page_range {
                Some(range) => println!("page_range = {}", range),
                None => println!("page_range = (whole document)"),
            }
            println!("top_n_words = {}", config.top_n_words);
            match &config.stop_words_path {
                Some(p) => println!("stop_words_path = \"{}\"", p.display()),
                None => println!("stop_words_path = (bundled)"),
            }
            match &config.lexicon_path {
                Some(p) => println!("lexicon_path = \"{}\"", p.display()),
                None => println!("lexicon_path = (bundled)"),
            }
            println!("cloud_words = {}", config.cloud_words);
            println!("chart_width = {}", config.chart_width);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            ReportConfig::default().save_to(path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}
