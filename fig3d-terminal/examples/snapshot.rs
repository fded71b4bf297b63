//! Example: Render a single frame without taking over the terminal
//!
//! Usage: cargo run --example snapshot -- [seconds] [width] [height]
//!
//! Advances the scene by `seconds` of simulated time (default 1.5) in 30 fps
//! steps and paints the last frame over a cleared screen.
use std::env;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use fig3d_core::SceneConfig;
use fig3d_terminal::{TerminalApp, TerminalConfig};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let arg = |index: usize, default: &str| {
        args.get(index)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    let seconds: f32 = arg(0, "1.5").parse().context("seconds must be a number")?;
    let width: usize = arg(1, "100").parse().context("width must be an integer")?;
    let height: usize = arg(2, "30").parse().context("height must be an integer")?;

    let config = TerminalConfig::default();
    let mut app = TerminalApp::with_size(&SceneConfig::default(), config, width, height)?;

    let step = Duration::from_secs(1) / config.target_fps;
    let frames = (seconds.max(0.0) * config.target_fps as f32).round() as u32;
    let start = Instant::now();
    for frame in 1..=frames.max(1) {
        app.render_frame(start + step * frame);
    }

    let mut stdout = io::stdout();
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    app.renderer().present(&mut stdout, 0)?;
    execute!(stdout, cursor::MoveTo(0, height as u16))?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
