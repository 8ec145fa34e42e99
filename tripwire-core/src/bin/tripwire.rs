//! Tripwire command-line scanner.
//!
//! Scans documents or page snapshots against a site profile and prints the
//! matches and the disclaimer each one would receive.
//!
//! ## Usage
//!
//! ```bash
//! # Scan plain-text files
//! tripwire scan --profile verge.toml article.txt
//!
//! # Scan a page snapshot (selector -> section texts, plus a body)
//! tripwire scan --profile verge.toml page.json --format html
//!
//! # Read a document from stdin
//! cat article.txt | tripwire scan --profile verge.toml -
//!
//! # Inspect the trigger index built from a profile
//! tripwire stats --profile verge.toml
//! ```
//!
//! Logging goes to stderr and is controlled by `TRIPWIRE_LOG`
//! (for example `TRIPWIRE_LOG=debug`).

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use tripwire_core::{Report, ScanConfig, Scanner, SiteProfile, StaticPage};

#[derive(Parser)]
#[command(name = "tripwire", version, about = "Longest-match trigger scanner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan documents and print matches and disclaimers
    Scan(ScanArgs),
    /// Print statistics for a profile's trigger index
    Stats(ProfileArgs),
}

#[derive(Args)]
struct ProfileArgs {
    /// Site profile (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    profile: PathBuf,
}

#[derive(Args)]
struct ScanArgs {
    #[command(flatten)]
    profile: ProfileArgs,

    /// Documents to scan: plain text, a .json page snapshot, or - for stdin
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Largest document to scan, in bytes
    #[arg(long, default_value_t = ScanConfig::DEFAULT_MAX_DOCUMENT_BYTES)]
    max_bytes: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ExitCode {
    /// Every input scanned; no disclaimer needed
    Clean = 0,
    /// At least one input needs a disclaimer
    Matched = 1,
    /// Profile or argument error
    ConfigError = 2,
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TRIPWIRE_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tripwire: {e:#}");
            ExitCode::ConfigError
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Scan(args) => scan(args),
        Command::Stats(args) => {
            let scanner = load_scanner(args, ScanConfig::default())?;
            println!("{}", scanner.index().stats());
            Ok(ExitCode::Clean)
        }
    }
}

fn load_scanner(args: &ProfileArgs, config: ScanConfig) -> anyhow::Result<Scanner> {
    let profile = SiteProfile::load(&args.profile)?;
    let scanner = Scanner::from_profile(&profile, config)
        .with_context(|| format!("building scanner from {}", args.profile.display()))?;
    Ok(scanner)
}

fn scan(args: &ScanArgs) -> anyhow::Result<ExitCode> {
    let config = ScanConfig::with_max_document_bytes(args.max_bytes);
    let scanner = load_scanner(&args.profile, config)?;

    let mut exit_code = ExitCode::Clean;
    let mut json_reports = Vec::new();

    for input in &args.inputs {
        let page = read_page(input)?;
        let report = scanner
            .report(&page)
            .with_context(|| format!("scanning {}", input.display()))?;

        if report.is_some() {
            exit_code = ExitCode::Matched;
        }

        match args.format {
            Format::Text => print_text(input, report.as_ref()),
            Format::Html => {
                if let Some(report) = &report {
                    println!("{}", report.disclaimer.render_html());
                }
            }
            Format::Json => json_reports.push(to_json(input, report.as_ref())),
        }
    }

    if args.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&json_reports)?);
    }
    Ok(exit_code)
}

fn read_page(input: &Path) -> anyhow::Result<StaticPage> {
    if input == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("reading stdin")?;
        return Ok(StaticPage::from_body(body));
    }

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;

    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return StaticPage::from_json_str(&content)
            .with_context(|| format!("parsing page snapshot {}", input.display()));
    }
    Ok(StaticPage::from_body(content))
}

fn print_text(input: &Path, report: Option<&Report>) {
    match report {
        None => println!("{}: no triggers", input.display()),
        Some(report) => {
            println!("{}: {}", input.display(), report.matches.join(", "));
            println!("attach to: {}", report.attachment);
            println!("{}", report.disclaimer);
        }
    }
}

fn to_json(input: &Path, report: Option<&Report>) -> serde_json::Value {
    match report {
        None => serde_json::json!({
            "input": input.display().to_string(),
            "matches": [],
        }),
        Some(report) => serde_json::json!({
            "input": input.display().to_string(),
            "matches": report.matches,
            "attachment": report.attachment.to_string(),
            "disclaimer": report.disclaimer.lines(),
        }),
    }
}
