//! fig3d terminal demo - three spinning solids
//!
//! Controls:
//!   - Q/ESC: Quit
//!
//! Logs go to stderr; redirect it (`2>fig3d.log`) to keep the frame clean.

use anyhow::Result;
use fig3d_core::SceneConfig;
use fig3d_terminal::{TerminalApp, TerminalConfig};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Set up tracing
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    info!("Starting fig3d terminal renderer");

    let mut app = TerminalApp::new(&SceneConfig::default(), TerminalConfig::default())?;
    app.run()?;

    info!("Renderer stopped");
    Ok(())
}
