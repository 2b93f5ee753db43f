use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("invalid frame rate {0}")]
pub struct InvalidFps(pub f64);

/// Caps the frame rate by sleeping out the rest of short frames.
#[derive(Debug)]
pub struct FramePacer {
    created: Instant,
    this_frame_start: Instant,
    last_frame_start: Instant,
    min_frame_duration: Duration,
    last_frame_duration: Duration,
}

impl FramePacer {
    pub fn new(fps: f64) -> Result<Self, InvalidFps> {
        let now = Instant::now();

        Ok(Self {
            created: now,
            this_frame_start: now,
            last_frame_start: now,
            min_frame_duration: frame_duration(fps)?,
            last_frame_duration: Duration::ZERO,
        })
    }

    pub fn fps(&self) -> f64 {
        1.0 / self.min_frame_duration.as_secs_f64()
    }

    pub fn set_fps(&mut self, fps: f64) -> Result<(), InvalidFps> {
        self.min_frame_duration = frame_duration(fps)?;
        Ok(())
    }

    pub fn min_frame_duration(&self) -> Duration {
        self.min_frame_duration
    }

    /// Start of the current frame, measured from creation.
    pub fn this_frame_start(&self) -> Duration {
        self.this_frame_start - self.created
    }

    pub fn last_frame_start(&self) -> Duration {
        self.last_frame_start - self.created
    }

    pub fn last_frame_duration(&self) -> Duration {
        self.last_frame_duration
    }

    /// Ends the current frame and starts the next one.
    pub fn start_new_frame(&mut self) {
        let elapsed = self.this_frame_start.elapsed();

        if elapsed < self.min_frame_duration {
            std::thread::sleep(self.min_frame_duration - elapsed);
        }

        self.last_frame_start = self.this_frame_start;
        self.this_frame_start = Instant::now();
        self.last_frame_duration = self.this_frame_start - self.last_frame_start;
    }
}

/// Minimum frame duration for `fps`. The rate must be positive and its
/// period representable as a non-zero `Duration`.
pub fn frame_duration(fps: f64) -> Result<Duration, InvalidFps> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(InvalidFps(fps));
    }

    match Duration::try_from_secs_f64(1.0 / fps) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => Err(InvalidFps(fps)),
    }
}
