//! Terminal host for the fig3d scene
//!
//! Rasterizes the shapes into colored terminal cells and drives the frame
//! loop. The scene itself lives in `fig3d-core`.
use anyhow::{Context, Result};
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use fig3d_core::{Animator, FrameDriver, RefreshScheduler, Scene, SceneConfig};
use std::io::{stdout, Write};
use std::time::Instant;
use tracing::info;

pub mod renderer;
pub mod scheduler;

pub use renderer::TerminalRenderer;
pub use scheduler::{FpsCounter, FrameLoop};

/// Rows reserved above the canvas for the status line
const CANVAS_OFFSET: u16 = 1;

/// Host-side settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalConfig {
    pub target_fps: u32,
    /// Height of a terminal cell relative to its width
    pub cell_aspect: f32,
}

impl TerminalConfig {
    /// Aspect ratio of a `width` x `height` cell canvas as it appears on screen
    pub fn aspect(&self, width: usize, height: usize) -> f32 {
        width as f32 / (height as f32 * self.cell_aspect)
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            cell_aspect: 2.0,
        }
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    driver: FrameDriver<TerminalRenderer>,
    renderer: TerminalRenderer,
    frame_loop: FrameLoop,
}

impl TerminalApp {
    /// Size the canvas to the current terminal
    pub fn new(scene: &SceneConfig, config: TerminalConfig) -> Result<Self> {
        let (width, height) = terminal::size().context("Failed to query terminal size")?;
        let height = height.saturating_sub(CANVAS_OFFSET).max(1);
        Self::with_size(scene, config, width.max(1) as usize, height as usize)
    }

    pub fn with_size(
        scene: &SceneConfig,
        config: TerminalConfig,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let mut renderer = TerminalRenderer::new(width, height);
        let aspect = config.aspect(width, height);
        let driver = FrameDriver::new(
            &mut renderer,
            Scene::from_config(scene, aspect, Instant::now())?,
            Animator::new(scene.animation),
        )?;
        info!(width, height, aspect, "Scene ready");

        Ok(Self {
            driver,
            renderer,
            frame_loop: FrameLoop::new(config.target_fps),
        })
    }

    pub fn renderer(&self) -> &TerminalRenderer {
        &self.renderer
    }

    pub fn scene(&self) -> &Scene {
        self.driver.scene()
    }

    /// Rasterize one frame at `now` without touching the terminal
    pub fn render_frame(&mut self, now: Instant) {
        draw_frame(&mut self.driver, &mut self.renderer, now);
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let Self {
            driver,
            renderer,
            frame_loop,
        } = self;
        let mut fps = FpsCounter::new(Instant::now());
        let mut stdout = stdout();

        frame_loop.run(|| {
            let now = Instant::now();
            draw_frame(driver, renderer, now);
            fps.tick(now);

            renderer.present(&mut stdout, CANVAS_OFFSET)?;
            queue!(
                stdout,
                cursor::MoveTo(0, 0),
                SetForegroundColor(Color::Yellow),
                Print(format!("fig3d | FPS: {:.1} | Q/Esc=Quit", fps.fps())),
                ResetColor
            )?;
            stdout.flush()?;
            Ok(())
        })
    }
}

fn draw_frame(
    driver: &mut FrameDriver<TerminalRenderer>,
    renderer: &mut TerminalRenderer,
    now: Instant,
) {
    renderer.clear();
    driver.run_frame(renderer, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CLEAR_COLOR;
    use std::time::Duration;

    #[test]
    fn test_aspect_accounts_for_tall_cells() {
        let config = TerminalConfig::default();
        assert!((config.aspect(80, 20) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_paints_every_shape() {
        let mut app =
            TerminalApp::with_size(&SceneConfig::default(), TerminalConfig::default(), 120, 40)
                .unwrap();
        app.render_frame(Instant::now() + Duration::from_millis(16));

        let renderer = app.renderer();
        let painted = |columns: std::ops::Range<usize>| {
            columns
                .flat_map(|x| (0..renderer.height()).map(move |y| (x, y)))
                .any(|(x, y)| renderer.cell(x, y) != CLEAR_COLOR)
        };
        // Octahedron left, scutoid centre, pyramid right
        assert!(painted(0..40));
        assert!(painted(40..80));
        assert!(painted(80..120));
    }

    #[test]
    fn test_frames_advance_animation() {
        let mut app =
            TerminalApp::with_size(&SceneConfig::default(), TerminalConfig::default(), 60, 20)
                .unwrap();
        let before: Vec<_> = app.scene().shapes.iter().map(|s| s.model).collect();

        let start = Instant::now();
        app.render_frame(start + Duration::from_millis(100));
        app.render_frame(start + Duration::from_millis(200));

        let after: Vec<_> = app.scene().shapes.iter().map(|s| s.model).collect();
        assert_ne!(before, after);
    }
}
