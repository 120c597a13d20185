use anyhow::Context;
use clap::Parser;
use dioxus::prelude::*;
use guide_viewer_config::Config;
use std::path::{Path, PathBuf};

mod ui;

use ui::App;
use ui::components::ErrorScreen;

/// Desktop viewer for generated guides and research summaries.
#[derive(Debug, Parser)]
#[clap(name = "guide-viewer-dioxus", version, about)]
struct Args {
    /// Config file to use instead of ~/.config/guide-viewer/config.toml
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Outcome of loading configuration, handed to the root component.
#[derive(Debug, Clone)]
enum Startup {
    Ready(Config),
    Failed { config_path: PathBuf, error: String },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("guide-viewer starting up");

    let args = Args::parse();
    let config_path = resolve_config_path(args.config);
    log::info!("Config path: {}", config_path.display());

    let startup = match load_config(&config_path) {
        Ok(config) => {
            log::info!(
                "Using guide backend {} and summarizer {}",
                config.api_base_url,
                config.summarizer_url
            );
            Startup::Ready(config)
        }
        Err(e) => {
            log::error!("{e:#}");
            Startup::Failed {
                config_path,
                error: format!("{e:#}"),
            }
        }
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .with_context(startup)
        .launch(app_root);
}

fn resolve_config_path(arg: Option<PathBuf>) -> PathBuf {
    match arg {
        Some(path) => Config::expand_path(&path).unwrap_or(path),
        None => Config::config_path(),
    }
}

/// Load the config file. When it does not exist the defaults are used and written
/// there, so there is a file to edit next time.
fn load_config(config_path: &Path) -> anyhow::Result<Config> {
    let existed = config_path.exists();
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Could not load configuration from {}", config_path.display()))?;

    if !existed {
        log::info!("No config file found, using defaults");
        if let Err(e) = config.save_to_path(config_path) {
            log::warn!("Could not write default config to {}: {e:#}", config_path.display());
        }
    }
    Ok(config)
}

fn app_root() -> Element {
    match use_context::<Startup>() {
        Startup::Ready(config) => rsx! {
            App { config }
        },
        Startup::Failed { config_path, error } => rsx! {
            ErrorScreen {
                title: "Configuration Error".to_string(),
                message: format!("The config file at {} could not be used.", config_path.display()),
                details: Some(error),
            }
        },
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("guide-viewer")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
