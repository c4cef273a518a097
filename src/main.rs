//! devportal - terminal front-end for the device service portal
//!
//! Binary entry point: parses the command line, loads settings and hands
//! over to the TUI runner.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

use devportal_app::config::load_settings;
use devportal_app::{Route, Settings};
use devportal_core::{logging, Language};

/// Device service portal: verify your phone, check warranty, open a service call
#[derive(Parser, Debug)]
#[command(name = "devportal", version)]
#[command(about = "Terminal front-end for the device service portal", long_about = None)]
struct Args {
    /// Route to open: `/`, `/device/<id>`, `/successful` or a bare device id
    #[arg(value_name = "ROUTE", default_value = "/")]
    route: String,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the settings file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Interface language: english or hebrew
    #[arg(long)]
    language: Option<Language>,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = load_settings(self.config.as_deref());
        if let Some(url) = &self.base_url {
            settings.backend.base_url = url.clone();
        }
        if let Some(language) = self.language {
            settings.ui.language = language;
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    logging::init()?;

    let settings = args.settings();
    let route = Route::parse(&args.route);
    tracing::info!("Opening {} with backend {}", route, settings.backend.base_url);

    devportal_tui::run(route, settings).await?;
    Ok(())
}
