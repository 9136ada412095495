//! Keypad Studio
//!
//! Configuration editor for 4x4 matrix keypad HID devices: assign GPIO pins
//! to matrix rows/columns and map each key to a keyboard-emulation action.

use anyhow::Result;
use clap::Parser;
use keypad_studio::{app, catalog, profile};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Keypad Studio - configure 4x4 matrix keypad HID devices
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a board profile YAML (defaults to the embedded ESP32 profile)
    #[arg(short, long)]
    profile: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// List the selectable HID keys and exit
    #[arg(long)]
    list_keys: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting Keypad Studio...");

    let catalog = catalog::load_default()?;

    if args.list_keys {
        for key in catalog.keys() {
            println!(
                "{:<20} {:>6}  {}",
                key.name,
                key.code,
                key.description.as_deref().unwrap_or("")
            );
        }
        return Ok(());
    }

    let profile = match &args.profile {
        Some(path) => profile::BoardProfile::load_from_path(path)?,
        None => profile::load_default()?,
    };
    info!("Board profile: {}", profile.name);

    app::run(profile, catalog)?;

    info!("Keypad Studio shutdown complete");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}
