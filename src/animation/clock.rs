use std::time::Instant;

/// Monotonic clock measuring elapsed scene time
///
/// Animation phases are derived from the total elapsed seconds, so the
/// clock only ever moves forward and is restarted when the window first
/// appears.
pub struct Clock {
    started: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Seconds elapsed since creation or the last restart
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Resets elapsed time to zero
    pub fn restart(&mut self) {
        self.started = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_elapsed_is_monotonic() {
        let clock = Clock::new();
        let first = clock.elapsed();
        thread::sleep(Duration::from_millis(2));
        let second = clock.elapsed();
        assert!(second >= first);
    }

    #[test]
    fn test_restart_rewinds_elapsed() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(10));
        assert!(clock.elapsed() >= 0.01);

        clock.restart();
        assert!(clock.elapsed() < 0.01);
    }
}
