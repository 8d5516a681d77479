use std::time::{Duration, Instant};

use crate::telemetry::FpsCounter;

/// Monotonic time plus a way to give the CPU back to the host.
pub trait TimeSource {
    /// Time since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
    fn sleep(&self, d: Duration);
}

/// Wall clock of the running process.
pub struct HostTime {
    origin: Instant,
}

impl HostTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for HostTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for HostTime {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Fixed-interval frame pacer.
///
/// A tick is delivered only once at least one interval has passed since the
/// previous delivered tick. Early calls sleep off the remainder and return
/// `None`; the caller is expected to call `tick` again.
pub struct FrameClock<T: TimeSource = HostTime> {
    source: T,
    interval: Duration,
    last: Duration,
    delivered: u64,
    fps: FpsCounter,
}

impl FrameClock<HostTime> {
    pub fn new(target_hz: u32) -> Self {
        Self::with_source(HostTime::new(), target_hz)
    }
}

impl<T: TimeSource> FrameClock<T> {
    pub fn with_source(source: T, target_hz: u32) -> Self {
        let hz = u64::from(target_hz.max(1));
        let last = source.now();
        Self {
            source,
            interval: Duration::from_nanos(1_000_000_000 / hz),
            last,
            delivered: 0,
            fps: FpsCounter::new(),
        }
    }

    /// Returns the elapsed seconds since the previous delivered tick, or
    /// `None` after sleeping when called ahead of schedule.
    pub fn tick(&mut self) -> Option<f64> {
        let now = self.source.now();
        let delta = now.saturating_sub(self.last);

        if delta < self.interval {
            self.source.sleep(self.interval - delta);
            return None;
        }

        self.last = now;
        self.delivered += 1;
        self.fps.record(now);
        Some(delta.as_secs_f64())
    }

    pub fn wait_for_tick(&mut self) -> f64 {
        loop {
            if let Some(elapsed) = self.tick() {
                return elapsed;
            }
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Delivered ticks over the last second.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn fps_counter_mut(&mut self) -> &mut FpsCounter {
        &mut self.fps
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{cell::Cell, rc::Rc, time::Duration};

    use super::TimeSource;

    /// Time that only moves when told to, or when someone sleeps.
    #[derive(Clone, Default)]
    pub struct ManualTime {
        now: Rc<Cell<Duration>>,
        sleeps: Rc<Cell<u32>>,
    }

    impl ManualTime {
        pub fn advance(&self, d: Duration) {
            self.now.set(self.now.get() + d);
        }

        pub fn sleeps(&self) -> u32 {
            self.sleeps.get()
        }
    }

    impl TimeSource for ManualTime {
        fn now(&self) -> Duration {
            self.now.get()
        }

        fn sleep(&self, d: Duration) {
            self.sleeps.set(self.sleeps.get() + 1);
            self.advance(d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualTime;
    use super::*;

    #[test]
    fn early_tick_sleeps_remainder_and_is_not_delivered() {
        let time = ManualTime::default();
        let mut clock = FrameClock::with_source(time.clone(), 60);

        time.advance(Duration::from_millis(5));
        assert_eq!(clock.tick(), None);
        assert_eq!(time.sleeps(), 1);
        assert_eq!(time.now(), clock.interval());

        let elapsed = clock.tick().unwrap();
        assert!(elapsed >= clock.interval().as_secs_f64());
        assert_eq!(clock.delivered(), 1);
    }

    #[test]
    fn busy_caller_never_gets_short_ticks() {
        let time = ManualTime::default();
        let mut clock = FrameClock::with_source(time.clone(), 60);
        let min = clock.interval().as_secs_f64();

        let mut delivered = Vec::new();
        for _ in 0..200 {
            // fast host: time creeps forward by a fraction of a frame per call
            time.advance(Duration::from_micros(700));
            if let Some(dt) = clock.tick() {
                delivered.push(dt);
            }
        }

        assert!(!delivered.is_empty());
        assert!(delivered.iter().all(|&dt| dt >= min));
    }

    #[test]
    fn slow_frame_reports_full_delta_without_sleeping() {
        let time = ManualTime::default();
        let mut clock = FrameClock::with_source(time.clone(), 60);

        time.advance(Duration::from_millis(50));
        let dt = clock.tick().unwrap();
        assert!((dt - 0.05).abs() < 1e-9);
        assert_eq!(time.sleeps(), 0);
    }

    #[test]
    fn wait_for_tick_blocks_until_delivered() {
        let time = ManualTime::default();
        let mut clock = FrameClock::with_source(time.clone(), 30);

        let dt = clock.wait_for_tick();
        assert!(dt >= clock.interval().as_secs_f64());
        assert_eq!(clock.delivered(), 1);
    }

    #[test]
    fn fps_counts_delivered_ticks_only() {
        let time = ManualTime::default();
        let mut clock = FrameClock::with_source(time.clone(), 60);

        for _ in 0..30 {
            clock.wait_for_tick();
        }
        assert_eq!(clock.fps(), 30);
        assert_eq!(clock.delivered(), 30);
    }

    #[test]
    fn zero_hz_is_clamped() {
        let clock = FrameClock::with_source(ManualTime::default(), 0);
        assert_eq!(clock.interval(), Duration::from_secs(1));
    }
}
