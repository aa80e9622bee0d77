//! Frame timing

use std::collections::VecDeque;
use std::time::{Duration, Instant};

// ============================================================================
// Frame Pacer
// ============================================================================

/// Gate that lets a frame through only once `interval` has passed since
/// the previous one
pub struct FramePacer {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the seconds elapsed since the last frame when a new frame is
    /// due, None otherwise. The first call only starts the clock.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let Some(last) = self.last_frame else {
            self.last_frame = Some(now);
            return None;
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.interval {
            return None;
        }
        self.last_frame = Some(now);
        Some(elapsed.as_secs_f32())
    }

    /// Time left until the next frame is due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.last_frame.map_or(Duration::ZERO, |last| {
            self.interval
                .saturating_sub(now.saturating_duration_since(last))
        })
    }
}

// ============================================================================
// FPS Counter
// ============================================================================

/// Rolling average of frame times
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    sample_count: usize,
}

impl FpsCounter {
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            sample_count: sample_count.max(1),
        }
    }

    /// Record one frame's delta time in seconds; returns the average FPS
    pub fn record(&mut self, dt: f32) -> f32 {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
        self.average_fps()
    }

    pub fn average_fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_dt = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacer_first_tick_primes() {
        let mut pacer = FramePacer::from_millis(20);
        let t0 = Instant::now();
        assert_eq!(pacer.tick(t0), None);
        assert_eq!(pacer.remaining(t0), Duration::from_millis(20));
    }

    #[test]
    fn test_pacer_waits_for_interval() {
        let mut pacer = FramePacer::from_millis(20);
        let t0 = Instant::now();
        pacer.tick(t0);
        assert_eq!(pacer.tick(t0 + Duration::from_millis(19)), None);

        let dt = pacer.tick(t0 + Duration::from_millis(25)).unwrap();
        assert!((dt - 0.025).abs() < 1e-6);

        // Clock restarts from the frame that went through
        assert_eq!(pacer.tick(t0 + Duration::from_millis(40)), None);
        assert!(pacer.tick(t0 + Duration::from_millis(45)).is_some());
    }

    #[test]
    fn test_fps_counter_average() {
        let mut fps = FpsCounter::new(3);
        assert_eq!(fps.average_fps(), 0.0);
        fps.record(0.5);
        fps.record(0.02);
        fps.record(0.02);
        let avg = fps.record(0.02);
        assert_eq!(fps.frame_count(), 3);
        assert!((avg - 50.0).abs() < 1e-3);
    }
}
