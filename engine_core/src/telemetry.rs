use std::{collections::VecDeque, time::Duration};

use log::info;

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Counts delivered ticks inside the trailing one-second window.
///
/// Purely observational: nothing in the loop reads it to make decisions.
pub struct FpsCounter {
    stamps: VecDeque<Duration>,
    log_period: Option<Duration>,
    last_report: Duration,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            stamps: VecDeque::new(),
            log_period: None,
            last_report: Duration::ZERO,
        }
    }

    /// Enables periodic `fps=` reports. Periods under 250ms are raised to 250ms.
    pub fn configure_logging(&mut self, enabled: bool, period: Duration) {
        self.log_period = enabled.then(|| period.max(Duration::from_millis(250)));
    }

    pub fn record(&mut self, now: Duration) {
        self.stamps.push_back(now);
        while let Some(&front) = self.stamps.front() {
            if now.saturating_sub(front) >= FPS_WINDOW {
                self.stamps.pop_front();
            } else {
                break;
            }
        }

        let Some(period) = self.log_period else { return; };
        if now.saturating_sub(self.last_report) >= period {
            self.last_report = now;
            info!(target: "phi::fps", "fps={}", self.fps());
        }
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.stamps.len() as u32
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn counts_ticks_in_trailing_second() {
        let mut fps = FpsCounter::new();
        for i in 0..10 {
            fps.record(ms(i * 100));
        }
        assert_eq!(fps.fps(), 10);

        // 0ms falls out of the window exactly one second later.
        fps.record(ms(1000));
        assert_eq!(fps.fps(), 10);

        fps.record(ms(1550));
        assert_eq!(fps.fps(), 6);
    }

    #[test]
    fn long_pause_drains_window() {
        let mut fps = FpsCounter::new();
        fps.record(ms(0));
        fps.record(ms(16));
        fps.record(ms(5000));
        assert_eq!(fps.fps(), 1);
    }
}
