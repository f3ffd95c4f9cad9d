//! recruit-badge command line entrypoint

use clap::Parser;
use recruit_badge::output::{Rendered, render_generation, render_scan};
use recruit_badge::{
    BadgeComposer, BadgeConfig, BadgeSession, Error, GenerationState, QrStyle, Result,
    build_payload, logging, scan_badge,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "recruit-badge",
    version,
    about = "Generate recruiter QR badges as PNG files"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to recruit-badge.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Candidate name printed on the badge
    #[arg(long, value_name = "NAME", default_value = "")]
    name: String,

    /// Recruiter identifier encoded in the QR payload
    #[arg(long, value_name = "ID", default_value = "")]
    recruiter_id: String,

    /// Directory for the exported PNG (overrides config)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Generate without writing the PNG
    #[arg(long)]
    no_save: bool,

    /// Print the payload URL only, without rendering an image
    #[arg(long)]
    payload_only: bool,

    /// Decode a badge PNG and print the recovered recruiter id
    #[arg(long, value_name = "PNG", conflicts_with_all = ["name", "recruiter_id", "payload_only"])]
    scan: Option<PathBuf>,

    /// Regular font file (overrides config)
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Bold font file (overrides config)
    #[arg(long, value_name = "PATH")]
    bold_font: Option<PathBuf>,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = BadgeConfig::load(cli.config.as_deref())?;

    if let Some(ref dir) = cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(ref path) = cli.font {
        config.fonts.regular = Some(path.clone());
    }
    if let Some(ref path) = cli.bold_font {
        config.fonts.bold = Some(path.clone());
    }

    logging::init(&config.logging)?;

    if let Some(ref path) = cli.scan {
        handle_scan(path, cli.json)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.payload_only {
        handle_payload_only(&cli)?;
        return Ok(ExitCode::SUCCESS);
    }

    let composer = BadgeComposer::from_font_options(&config.fonts)?
        .with_qr_style(QrStyle::from_options(&config.qr)?);
    info!(name = %cli.name, text = composer.has_fonts(), "Generating badge");
    let mut session = BadgeSession::new(Arc::new(composer));

    let state = session.generate(&cli.name, &cli.recruiter_id).await.clone();

    let saved = match state {
        GenerationState::Rendered(_) if !cli.no_save => {
            Some(session.download(&config.output.directory).await?)
        }
        _ => None,
    };

    emit(&render_generation(&state, saved.as_deref()), cli.json)?;

    // The outcome message is already on stdout.
    match state {
        GenerationState::ValidationFailed(_) | GenerationState::RenderFailed(_) => {
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}

fn handle_payload_only(cli: &Cli) -> Result<()> {
    if cli.recruiter_id.trim().is_empty() {
        return Err(Error::missing_fields());
    }

    let payload = build_payload(&cli.recruiter_id);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{payload}");
    }
    Ok(())
}

fn handle_scan(path: &Path, json: bool) -> Result<()> {
    let image = image::open(path)?;
    let (text, recruiter_id) = scan_badge(&image)?;
    emit(&render_scan(&text, recruiter_id.as_deref()), json)
}

fn emit(rendered: &Rendered, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }
    Ok(())
}
