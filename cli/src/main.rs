//! nbprint CLI - notebook to PDF conversion tool

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use nbprint::{Converter, Margins, PageSetup, PageSize, RenderOptions};

#[derive(Parser)]
#[command(name = "nbprint")]
#[command(version)]
#[command(about = "Convert Jupyter notebooks to paginated PDF", long_about = None)]
struct Cli {
    /// Input notebook file (.ipynb)
    #[arg(value_name = "NOTEBOOK")]
    input: PathBuf,

    /// Output PDF file (default: notebook path with .pdf extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Title for the title page (no title page without one)
    #[arg(short, long)]
    title: Option<String>,

    /// Subtitle for the title page
    #[arg(short, long)]
    subtitle: Option<String>,

    /// Accent color for headings and navigation (hex)
    #[arg(short = 'c', long, value_name = "HEX", default_value = nbprint::DEFAULT_ACCENT_COLOR)]
    color: String,

    /// Skip the table of contents
    #[arg(long)]
    no_toc: bool,

    /// Skip the title page even if a title is given
    #[arg(long)]
    no_title_page: bool,

    /// Paper size
    #[arg(long, value_enum, default_value = "a4")]
    page_size: Paper,

    /// Page margins in centimeters
    #[arg(long, value_name = "CM", default_value = "1.5")]
    margin: f64,

    /// Seconds to wait for math typesetting before degrading
    #[arg(long, value_name = "SECS", default_value = "20")]
    timeout: u64,

    /// Fail instead of degrading when typesetting times out
    #[arg(long)]
    strict: bool,

    /// Render cells sequentially (disable parallel rendering)
    #[arg(long)]
    sequential: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Paper {
    /// ISO A4
    A4,
    /// US Letter
    Letter,
    /// US Legal
    Legal,
}

impl From<Paper> for PageSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PageSize::A4,
            Paper::Letter => PageSize::Letter,
            Paper::Legal => PageSize::Legal,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("{} not found", cli.input.display()).into());
    }
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    let options = build_options(cli);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    pb.set_message(format!("Converting {}...", cli.input.display()));
    let converter = Converter::new(options);
    let result = converter.convert_file(&cli.input, &output)?;
    pb.finish_and_clear();

    if !result.typeset_complete {
        println!(
            "{} math typesetting did not finish; some formulas may be unrendered",
            "Warning:".yellow().bold()
        );
    }
    println!(
        "{} PDF created: {}",
        "✓".green().bold(),
        result.output_path.display()
    );
    println!("  Size: {:.1} KB", result.size_kb());
    if result.heading_count > 0 {
        println!("  Headings: {}", result.heading_count);
    }

    Ok(())
}

fn build_options(cli: &Cli) -> RenderOptions {
    let mut options = RenderOptions::new()
        .with_accent_color(cli.color.as_str())
        .with_toc(!cli.no_toc)
        .with_title_page(!cli.no_title_page)
        .with_page(
            PageSetup::new(cli.page_size.into()).with_margins(Margins::uniform(cli.margin)),
        )
        .with_typeset_timeout(Duration::from_secs(cli.timeout));

    if let Some(title) = &cli.title {
        options = options.with_title(title.as_str());
    }
    if let Some(subtitle) = &cli.subtitle {
        options = options.with_subtitle(subtitle.as_str());
    }
    if cli.strict {
        options = options.strict_typesetting();
    }
    if cli.sequential {
        options = options.sequential();
    }
    options
}
