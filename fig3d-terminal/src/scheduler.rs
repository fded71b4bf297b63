//! Fixed-rate frame loop standing in for a display refresh callback
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fig3d_core::RefreshScheduler;
use std::time::{Duration, Instant};

/// Calls the frame callback at a steady rate until the user quits
pub struct FrameLoop {
    target_frame_time: Duration,
    running: bool,
}

impl FrameLoop {
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_frame_time: Duration::from_secs(1) / target_fps.max(1),
            running: false,
        }
    }

    pub fn target_frame_time(&self) -> Duration {
        self.target_frame_time
    }

    fn handle_input(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                    // Raw mode swallows SIGINT
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.running = false
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl RefreshScheduler for FrameLoop {
    fn run<F>(&mut self, mut frame: F) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        self.running = true;
        while self.running {
            let frame_start = Instant::now();

            self.handle_input()?;
            if !self.running {
                break;
            }

            frame()?;

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }
        }
        Ok(())
    }
}

/// Frames-per-second estimate refreshed about once a second
pub struct FpsCounter {
    last_report: Instant,
    frame_count: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            last_report: now,
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.frame_count += 1;
        let span = now.saturating_duration_since(self.last_report);
        if span >= Duration::from_secs(1) {
            self.fps = self.frame_count as f32 / span.as_secs_f32();
            self.frame_count = 0;
            self.last_report = now;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_frame_time() {
        assert_eq!(FrameLoop::new(30).target_frame_time(), Duration::from_nanos(33_333_333));
        assert_eq!(FrameLoop::new(0).target_frame_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_fps_reported_after_a_second() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        for frame in 1..30 {
            counter.tick(start + Duration::from_millis(frame * 33));
        }
        assert_eq!(counter.fps(), 0.0);

        counter.tick(start + Duration::from_millis(1000));
        assert_relative_eq!(counter.fps(), 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fps_window_resets() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        counter.tick(start + Duration::from_secs(2));
        assert_relative_eq!(counter.fps(), 0.5, epsilon = 1e-6);

        // A single frame in the next window does not report yet
        counter.tick(start + Duration::from_millis(2500));
        assert_relative_eq!(counter.fps(), 0.5, epsilon = 1e-6);
    }
}
