//! Frame pacing and FPS measurement.
//!
//! Pacing is a fixed sleep after each presented frame, which caps the polling
//! rate but does not target a frame rate. FPS is the instantaneous rate of
//! the last frame, not an average.

use std::time::{Duration, Instant};

/// Fixed post-frame delay plus per-frame FPS estimate.
#[derive(Debug)]
pub struct FramePacer {
    delay: Duration,
    last_tick: Instant,
}

impl FramePacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_tick: Instant::now(),
        }
    }

    /// Sleeps for the configured delay.
    pub fn throttle(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }

    /// Returns the FPS implied by the time since the previous call and starts
    /// the next measurement.
    pub fn measure(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        instantaneous_fps(elapsed.as_millis() as u64)
    }
}

/// Whole frames per second implied by one frame of `elapsed_ms`, rounded
/// down. Frames shorter than a millisecond count as one millisecond.
pub fn instantaneous_fps(elapsed_ms: u64) -> u32 {
    (1000 / elapsed_ms.max(1)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_from_frame_time() {
        assert_eq!(instantaneous_fps(10), 100);
        assert_eq!(instantaneous_fps(16), 62);
        assert_eq!(instantaneous_fps(1000), 1);
        assert_eq!(instantaneous_fps(2000), 0);
    }

    #[test]
    fn sub_millisecond_frame_is_clamped() {
        assert_eq!(instantaneous_fps(0), 1000);
        assert_eq!(instantaneous_fps(1), 1000);
    }

    #[test]
    fn exact_divisors_are_not_truncated() {
        for ms in [1u64, 2, 4, 5, 8, 10, 20, 25, 40, 50, 125, 200, 250, 500] {
            assert_eq!(instantaneous_fps(ms) as u64 * ms, 1000, "{ms} ms");
        }
    }

    #[test]
    fn throttle_waits_at_least_the_delay() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        pacer.measure();
        let start = Instant::now();
        pacer.throttle();
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert!(pacer.measure() <= 200);
    }
}
