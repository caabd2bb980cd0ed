//! Employee Registry - desktop client for registering and browsing employees.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use employee_registry as app;

use app::config::{AppConfig, ConfigLoadResult, validate_base_url};
use app::ui::App;

/// Desktop client for registering and browsing employees.
#[derive(Parser)]
#[command(name = "employee-registry")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Override the API base URL for this session
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = if cli.dev { PathBuf::from("logs") } else { AppConfig::log_dir() };
    let _log_guard = app::logging::init(&log_dir);

    tracing::info!("Employee Registry starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let (mut config, config_warning) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            (config, None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            (AppConfig::default(), Some(format!("Config ignored: {e}")))
        }
    };

    if let Some(url) = cli.api_url {
        validate_base_url(&url).context("invalid --api-url")?;
        tracing::info!("API base URL overridden: {}", url);
        config.api.base_url = url;
    }

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    let app = App::new(config, config_path, rt, config_warning).context("failed to start application")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Registration System")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Employee Registry",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
