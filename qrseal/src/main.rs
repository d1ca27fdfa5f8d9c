//! QR Seal - CLI
//!
//! Seal a message into a QR code, open a QR code back into a message.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::ProgressBar;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use qrseal::symbol::{load_image, save_png};
use qrseal::{AppConfig, AppError, Conversation, QrScanner, SymbolScanner};
use qrseal_core::{BlobLayout, ErrorCorrection, SymbolCapacity};

#[derive(Parser)]
#[command(name = "qrseal")]
#[command(author = "Karen Tonoyan")]
#[command(version = qrseal::VERSION)]
#[command(about = "QR Seal - passphrase encrypted messages as QR codes")]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Blob wire layout
    #[arg(long, global = true, value_enum)]
    layout: Option<LayoutArg>,

    /// QR error correction level
    #[arg(long, global = true, value_enum)]
    ec: Option<EcArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message into a QR code
    Seal {
        /// Message text
        message: String,

        /// Passphrase (prompted when omitted)
        #[arg(short, long)]
        passphrase: Option<String>,

        /// Output PNG path
        #[arg(short, long, default_value = "qrseal.png")]
        output: PathBuf,

        /// Print the blob text only, do not write an image
        #[arg(long)]
        text_only: bool,
    },

    /// Decrypt a QR code or blob text
    Open {
        #[command(flatten)]
        source: Source,

        /// Passphrase (prompted when omitted)
        #[arg(short, long)]
        passphrase: Option<String>,
    },

    /// Show blob structure without decrypting
    Inspect {
        #[command(flatten)]
        source: Source,
    },

    /// Show the largest message each QR level can carry
    Capacity,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// QR image file
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Blob text
    #[arg(short, long)]
    text: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Legacy,
    Versioned,
}

impl From<LayoutArg> for BlobLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Legacy => BlobLayout::Legacy,
            LayoutArg::Versioned => BlobLayout::Versioned,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EcArg {
    Low,
    Medium,
    Quartile,
    High,
}

impl From<EcArg> for ErrorCorrection {
    fn from(arg: EcArg) -> Self {
        match arg {
            EcArg::Low => ErrorCorrection::Low,
            EcArg::Medium => ErrorCorrection::Medium,
            EcArg::Quartile => ErrorCorrection::Quartile,
            EcArg::High => ErrorCorrection::High,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<AppError>() {
            Some(app) => {
                tracing::debug!(error = %app, "command failed");
                eprintln!("{} {}", style("Error:").red().bold(), app.user_message());
            }
            None => eprintln!("{} {:#}", style("Error:").red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(layout) = cli.layout {
        config.layout = layout.into();
    }
    if let Some(ec) = cli.ec {
        config.symbol.error_correction = ec.into();
    }

    match cli.command {
        Commands::Seal {
            message,
            passphrase,
            output,
            text_only,
        } => {
            let passphrase = read_passphrase(passphrase)?;
            let session = Conversation::new(config);

            let sealed = with_spinner("🔐 Sealing message...", || {
                session.send(&message, &passphrase)
            })?;

            if text_only {
                println!("{}", sealed.text);
                return Ok(());
            }

            save_png(&sealed.image, &output)
                .with_context(|| format!("writing {}", output.display()))?;

            println!("✅ QR code written to: {}", style(output.display()).green());
            println!("   {}", style(&sealed.text).dim());
        }

        Commands::Open { source, passphrase } => {
            let passphrase = read_passphrase(passphrase)?;
            let session = Conversation::new(config);

            let message = match (source.image, source.text) {
                (Some(path), _) => {
                    let image = load_image(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    with_spinner("🔓 Opening code...", || {
                        session.receive_image(&image, &passphrase)
                    })?
                }
                (None, Some(text)) => with_spinner("🔓 Opening code...", || {
                    session.receive_text(&text, &passphrase)
                })?,
                (None, None) => bail!("provide --image or --text"),
            };

            println!("{}", message);
        }

        Commands::Inspect { source } => {
            let text = match (source.image, source.text) {
                (Some(path), _) => {
                    let image = load_image(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    QrScanner
                        .scan(&image)?
                        .ok_or(AppError::Seal(qrseal_core::SealError::NoSymbolDetected))?
                }
                (None, Some(text)) => text,
                (None, None) => bail!("provide --image or --text"),
            };

            let info = qrseal_core::inspect(&text, config.layout).map_err(AppError::from)?;

            println!("📦 Sealed blob");
            println!("{:-<40}", "");
            println!("Layout:          {:?}", info.layout);
            println!("Suite:           {}", info.suite.name());
            println!("Blob size:       {} bytes", info.total_len);
            println!("Ciphertext:      {} bytes (incl. tag)", info.ciphertext_len);
            println!("Message size:    {} bytes", info.plaintext_len);
            println!("Text size:       {} characters", text.trim().len());
        }

        Commands::Capacity => {
            println!("📏 Largest message per QR level ({:?} layout)", config.layout);
            println!("{:-<40}", "");
            for level in [
                ErrorCorrection::Low,
                ErrorCorrection::Medium,
                ErrorCorrection::Quartile,
                ErrorCorrection::High,
            ] {
                let capacity = SymbolCapacity::qr(level);
                let marker = if level == config.symbol.error_correction { "*" } else { " " };
                let max = capacity.max_message_len(config.layout).unwrap_or(0);
                println!(
                    "{} {:<9} {:>5} bytes of text ({} chars of code)",
                    marker,
                    format!("{:?}", level),
                    max,
                    capacity.max_text_len()
                );
            }
        }
    }

    Ok(())
}

fn read_passphrase(arg: Option<String>) -> anyhow::Result<SecretString> {
    let passphrase = match arg {
        Some(p) => p,
        None => rpassword::prompt_password("Passphrase: ").context("reading passphrase")?,
    };
    Ok(SecretString::from(passphrase))
}

/// Key derivation is slow; show a spinner while it runs
fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = f();
    spinner.finish_and_clear();
    result
}
