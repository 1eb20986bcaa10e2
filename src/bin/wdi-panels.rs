use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wdi_panels::{AnalysisConfig, filter_dataset, load_dataset, pipeline, stats};

#[derive(Parser, Debug)]
#[command(
    name = "wdi-panels",
    version,
    about = "Filter a World Development Indicators spreadsheet and compose a 2x2 chart figure"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load, filter, shape and render the four-panel figure.
    Render(RenderArgs),
    /// Print per indicator/country statistics of the filtered data.
    Summary(SourceArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// JSON config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Spreadsheet or CSV to read (overrides the config).
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output image, `.png` or `.svg` (overrides the config).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// TrueType font for all text (overrides the config).
    #[arg(long)]
    font: Option<PathBuf>,
    /// Resolution in dots per inch (overrides the config).
    #[arg(long)]
    dpi: Option<u32>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Up to 4 decimals, trailing zeros and dot trimmed.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn load_config(args: &SourceArgs) -> Result<AnalysisConfig> {
    let mut cfg = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(input) = &args.input {
        cfg.input = input.clone();
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Summary(args) => cmd_summary(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut cfg = load_config(&args.source)?;
    if let Some(output) = args.output {
        cfg.output = output;
    }
    if let Some(font) = args.font {
        cfg.font_path = Some(font);
    }
    if let Some(dpi) = args.dpi {
        cfg.dpi = dpi;
    }
    let written = pipeline::run(&cfg).context("rendering figure")?;
    eprintln!("Wrote figure to {}", written.display());
    Ok(())
}

fn cmd_summary(args: SourceArgs) -> Result<()> {
    let cfg = load_config(&args)?;
    cfg.validate()?;
    let dataset = load_dataset(&cfg.input)
        .with_context(|| format!("loading {}", cfg.input.display()))?;
    let table = filter_dataset(&dataset, &cfg.criteria())?;
    for s in stats::grouped_summary(&table) {
        println!(
            "{} • {}  count={} missing={}  min={} max={} mean={}",
            s.key.indicator_name,
            s.key.country_name,
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean)
        );
    }
    Ok(())
}
