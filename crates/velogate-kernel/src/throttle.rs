//! [`WarnThrottle`] – a timestamp-gated filter for operator advisories.
//!
//! The supervisor evaluates safety at 10 Hz, but an operator staring at a
//! wall does not need ten warnings a second. The throttle admits the first
//! event and then suppresses until the interval has elapsed.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct WarnThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl WarnThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// `true` if the caller should emit the advisory now.
    pub fn admit(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_is_admitted() {
        let mut throttle = WarnThrottle::new(Duration::from_secs(1));
        assert!(throttle.admit());
    }

    #[test]
    fn burst_within_the_interval_is_suppressed() {
        let mut throttle = WarnThrottle::new(Duration::from_secs(60));
        assert!(throttle.admit());
        for _ in 0..10 {
            assert!(!throttle.admit());
        }
    }

    #[test]
    fn admits_again_after_the_interval() {
        let mut throttle = WarnThrottle::new(Duration::from_millis(10));
        assert!(throttle.admit());
        assert!(!throttle.admit());
        std::thread::sleep(Duration::from_millis(15));
        assert!(throttle.admit());
    }
}
