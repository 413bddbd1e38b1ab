//! Sharekit CLI - render share cards to PNG files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser, Subcommand};

use sharekit::{SharePayload, compose_image, fingerprint, log, logger, png_bytes};

/// Sharekit share-card renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(long, global = true)]
    verbose: bool,

    /// subcommands
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Compose a share card and write it as PNG
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        card: CardArgs,

        /// Output pixel density (non-positive falls back to the default)
        #[arg(short, long, default_value_t = 2.0)]
        scale: f32,

        /// Output file path
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,
    },

    /// Print the content fingerprint for a card without rendering it
    #[command(visible_alias = "f")]
    Fingerprint {
        #[command(flatten)]
        card: CardArgs,
    },
}

/// Card content shared by the render and fingerprint commands
#[derive(clap::Args, Debug, Clone)]
struct CardArgs {
    /// App name (blank falls back to a default)
    #[arg(short, long)]
    name: Option<String>,

    /// Prompt line under the app name
    #[arg(short, long)]
    prompt: Option<String>,

    /// URL shown in the footer
    #[arg(short, long)]
    url: Option<String>,

    /// Logo image file (PNG/JPEG/WebP)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    logo: Option<PathBuf>,

    /// QR code image file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    qr: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match cli.command {
        Commands::Render {
            card,
            scale,
            output,
        } => render(card, scale, &output),
        Commands::Fingerprint { card } => {
            let payload = build_payload(card)?;
            println!("{}", fingerprint(&payload).to_hex());
            Ok(())
        }
    }
}

fn render(card: CardArgs, scale: f32, output: &PathBuf) -> Result<()> {
    let payload = build_payload(card)?;

    let image = compose_image(&payload, scale);
    let bytes = png_bytes(&image)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(output, &bytes).with_context(|| format!("failed to write {}", output.display()))?;

    log!("render"; "wrote {} ({}x{})", output.display(), image.width(), image.height());
    Ok(())
}

fn build_payload(card: CardArgs) -> Result<SharePayload> {
    let mut builder = SharePayload::builder();
    if let Some(name) = card.name {
        builder = builder.app_name(name);
    }
    if let Some(prompt) = card.prompt {
        builder = builder.prompt(prompt);
    }
    if let Some(url) = card.url {
        builder = builder.url(url);
    }
    if let Some(path) = card.logo {
        let logo = image::open(&path)
            .with_context(|| format!("failed to read logo {}", path.display()))?;
        builder = builder.logo(logo.to_rgba8());
    }
    if let Some(path) = card.qr {
        let qr = image::open(&path)
            .with_context(|| format!("failed to read qr code {}", path.display()))?;
        builder = builder.qrcode(qr.to_rgba8());
    }
    Ok(builder.build())
}
