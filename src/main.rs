//! statline - multi-threaded status bar generator
//!
//! Samples system state through a fixed set of concurrently scheduled
//! components and publishes a single-line summary to the X root window
//! name (for window managers that display it) or to stdout.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use eyre::WrapErr;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use statline::app::App;
use statline::bar::BarConfig;
use statline::component;
use statline::sink::{RootWindowSink, Sink, StdoutSink};

#[derive(Debug, Parser)]
#[command(name = "statline", version, about = "Multi-threaded status bar generator")]
struct Cli {
    /// Print the status line to stdout instead of setting the root window name
    #[arg(short = 's', long = "stdout")]
    to_stdout: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Diagnostics go to stderr so a stdout sink stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // In root-window mode the PID is published so shell keybindings can
    // fire component triggers with `kill -RTMIN+n $(cat /tmp/statline.pid)`.
    let pidfile = if cli.to_stdout {
        None
    } else {
        Some(write_pidfile()?)
    };

    let sink: Box<dyn Sink> = if cli.to_stdout {
        Box::new(StdoutSink)
    } else {
        Box::new(RootWindowSink)
    };

    let app = App::new(component::default_components(), BarConfig::default(), sink)?;
    let outcome = app.run().await;

    if let Some(path) = pidfile {
        if let Err(err) = std::fs::remove_file(&path) {
            warn!(path = %path.display(), %err, "unable to remove pid file");
        }
    }

    outcome
}

fn write_pidfile() -> Result<PathBuf> {
    let path = std::env::temp_dir().join("statline.pid");
    std::fs::write(&path, std::process::id().to_string())
        .wrap_err_with(|| format!("unable to write pid file {}", path.display()))?;
    Ok(path)
}
