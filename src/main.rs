//! peerfill CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use peerfill::cli::{normalize_args, Cli, CommandDispatcher};
use peerfill::config::{load_config, Settings};
use peerfill::installer::ShellInstaller;
use peerfill::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so stdout stays limited to user-facing output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("peerfill=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("peerfill=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args()));
    init_tracing(cli.debug);

    tracing::debug!("peerfill starting with args: {:?}", cli);

    // Determine project root
    let project_root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let config = match load_config(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let mut ui = create_ui(OutputMode::Normal, cli.no_color);
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    // Flags beat the config file
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        config.output.map(OutputMode::from).unwrap_or_default()
    };

    let mut ui = create_ui(output_mode, cli.no_color);
    let settings = Settings::resolve(config, &cli);
    tracing::debug!("Resolved settings: {:?}", settings);

    let dispatcher = CommandDispatcher::new(project_root);
    let mut installer = ShellInstaller::new();

    match dispatcher.dispatch(&settings, ui.as_mut(), &mut installer) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
