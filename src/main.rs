//! listforge demo: renders the example screen headlessly and prints the rows
//! after each scripted state change.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use listforge::component::Size;
use listforge::config::{Config, ThrottleConfig};
use listforge::demo::{self, ExampleIntent, ExampleReducer, ExampleState, FIRST_GROUP};
use listforge::layout::CellLayoutEngine;
use listforge::pipeline::{ControllerConfig, IndexPath, ListController, ThrottlePolicy};
use listforge::render::RowRenderer;
use listforge::view_model::{ViewModel, ViewModelOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThrottleArg {
    None,
    Debounce,
    FirstInWindow,
}

/// Headless declarative list demo
#[derive(Parser, Debug)]
#[command(name = "listforge")]
#[command(version)]
#[command(about = "Renders an example component list and prints it after each state change")]
struct Args {
    /// Path to configuration file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in character cells
    #[arg(long, default_value_t = 48.0)]
    width: f64,

    /// Viewport height in character cells
    #[arg(long, default_value_t = 24.0)]
    height: f64,

    /// Evaluate every reducer twice and abort on impure reducers
    #[arg(long)]
    debug_store: bool,

    /// Rebuild throttle policy (overrides the config file)
    #[arg(long, value_enum)]
    throttle: Option<ThrottleArg>,

    /// Throttle window in milliseconds
    #[arg(long, default_value_t = 100)]
    window_ms: u64,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if self.debug_store {
            config.store.debug_mode = true;
        }
        if let Some(throttle) = self.throttle {
            config.pipeline.throttle = match throttle {
                ThrottleArg::None => ThrottleConfig::None,
                ThrottleArg::Debounce => ThrottleConfig::Debounce {
                    window_ms: self.window_ms,
                },
                ThrottleArg::FirstInWindow => ThrottleConfig::FirstInWindow {
                    window_ms: self.window_ms,
                },
            };
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    args.apply_overrides(&mut config);
    config.validate().context("validating configuration")?;

    if args.dump_config {
        print!("{}", config.to_toml().context("rendering configuration")?);
        return Ok(());
    }

    listforge::logging::init_tracing(&config.logging);
    info!(config = ?config, "configuration resolved");

    let view_model = Arc::new(ViewModel::with_options(
        ExampleState::default(),
        ViewModelOptions::from(&config.store),
    ));
    let controller_config = ControllerConfig::from(&config.pipeline);
    let controller = demo::example_controller(&view_model, controller_config);

    let renderer = RowRenderer::new(Arc::new(CellLayoutEngine::new()), args.width);
    controller.attach_renderer(renderer.clone());
    controller.set_viewport(Size::new(args.width, args.height));
    controller.activate();

    let settle = settle_time(&controller_config);
    let step = Step {
        controller: &controller,
        renderer: &renderer,
        view_model: &view_model,
        settle,
    };

    step.show("initial").await?;

    // Selecting the header toggles it through the view model.
    controller.select(IndexPath::item(1));
    step.show("expand first group").await?;

    view_model.dispatch::<ExampleReducer>(ExampleIntent::ToggleButtons);
    step.show("show buttons").await?;

    view_model.dispatch::<ExampleReducer>(ExampleIntent::AppendString("Beef ribs".to_string()));
    step.show("append a row").await?;

    view_model.set_expandable_state(FIRST_GROUP, false);
    step.show("collapse first group").await?;

    controller.deactivate();
    view_model.dispose();
    Ok(())
}

struct Step<'a> {
    controller: &'a ListController,
    renderer: &'a RowRenderer,
    view_model: &'a ViewModel<ExampleState>,
    settle: Duration,
}

impl Step<'_> {
    async fn show(&self, title: &str) -> anyhow::Result<()> {
        self.view_model
            .state()
            .await
            .context("waiting for state to resolve")?;
        tokio::time::sleep(self.settle).await;

        println!("== {} (pass {}) ==", title, self.controller.rebuild_count());
        print!("{}", self.renderer.to_text());
        println!();
        Ok(())
    }
}

/// Long enough for a throttled rebuild and its render to land.
fn settle_time(config: &ControllerConfig) -> Duration {
    let window = match config.throttle {
        ThrottlePolicy::None => Duration::ZERO,
        ThrottlePolicy::Debounce(window) | ThrottlePolicy::FirstInWindow(window) => window,
    };
    window + Duration::from_millis(50)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_does_not_error() {
        let result = Args::try_parse_from(["listforge", "--help"]);
        let err = result.expect_err("help exits early");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn throttle_override_uses_window() {
        let args = Args::try_parse_from([
            "listforge",
            "--throttle",
            "first-in-window",
            "--window-ms",
            "250",
            "--debug-store",
        ])
        .expect("valid args");
        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert!(config.store.debug_mode);
        assert_eq!(
            config.pipeline.throttle,
            ThrottleConfig::FirstInWindow { window_ms: 250 }
        );
    }

    #[test]
    fn defaults_leave_config_untouched() {
        let args = Args::try_parse_from(["listforge"]).expect("valid args");
        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
        assert_eq!(args.width, 48.0);
    }
}
