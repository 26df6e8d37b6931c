mod app;
mod components;
mod config;
mod controller;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod miniapps;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, ThemeConfig, TreeConfig};
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// A launcher for small terminal mini-apps, including a lazy directory tree browser.
#[derive(Parser, Debug)]
#[command(name = "miniapps", version, about)]
struct Cli {
    /// Path to a config file (overrides the default search)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory levels listed eagerly when a tree is built
    #[arg(long, value_name = "N")]
    depth: Option<usize>,

    /// Color scheme: dark, light or custom
    #[arg(long, value_name = "SCHEME")]
    theme: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags as a partial config layered over every file source.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                log_file: self
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
            },
            tree: TreeConfig {
                max_eager_depth: self.depth,
                ..TreeConfig::default()
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    if let Some(log_path) = config.log_file().or_else(logging::default_log_path) {
        logging::init(&log_path);
    }
    tracing::info!(
        depth = config.max_eager_depth(),
        theme = config.theme_scheme(),
        "starting"
    );

    let theme = theme::resolve_theme(&config.theme);
    let mut app = App::new(&config, theme);

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(100));

    loop {
        tui.draw(&mut app)?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => {}
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    tracing::info!("exiting");
    Ok(())
}
