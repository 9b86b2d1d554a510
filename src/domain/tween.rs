/// Time-based tweens with easing curves.
///
/// A `Tween` is a pure function of elapsed time: nothing is stored between
/// samples, so the same instant always yields the same value. Callers that need
/// a latched (never-decreasing) value keep that latch themselves.

use std::time::Duration;

/// Easing curves. All map `[0, 1]` onto `[0, 1]` with `f(0) = 0`, `f(1) = 1`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Easing {
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub const fn new(from: f64, to: f64, delay: Duration, duration: Duration, easing: Easing) -> Self {
        Tween { from, to, delay, duration, easing }
    }

    /// Linear progress through the run, 0.0 before `delay`, 1.0 at and after
    /// `delay + duration`. A zero duration jumps straight to 1.0.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if elapsed < self.delay {
            return 0.0;
        }
        let run = elapsed - self.delay;
        if self.duration.is_zero() || run >= self.duration {
            return 1.0;
        }
        run.as_secs_f64() / self.duration.as_secs_f64()
    }

    /// Eased value at `elapsed` since activation.
    pub fn sample(&self, elapsed: Duration) -> f64 {
        let eased = self.easing.apply(self.progress(elapsed));
        self.from + (self.to - self.from) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 2] = [Easing::EaseOut, Easing::EaseInOut];

    #[test]
    fn easing_endpoints() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-12, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?} at 1");
        }
    }

    #[test]
    fn easing_is_monotonic() {
        for e in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = e.apply(i as f64 / 100.0);
                assert!(v >= prev, "{e:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn ease_out_leads_ease_in_out() {
        // Fast start vs slow start
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn tween_holds_during_delay() {
        let tw = Tween::new(0.0, 0.35, Duration::from_millis(500), Duration::from_secs(1), Easing::EaseInOut);
        assert_eq!(tw.sample(Duration::ZERO), 0.0);
        assert_eq!(tw.sample(Duration::from_millis(499)), 0.0);
        assert!((tw.sample(Duration::from_millis(1000)) - 0.175).abs() < 1e-9);
        assert!((tw.sample(Duration::from_secs(5)) - 0.35).abs() < 1e-12);
        assert!((tw.sample(Duration::from_millis(1500)) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn zero_duration_completes_at_delay() {
        let tw = Tween::new(0.0, 1.0, Duration::from_millis(200), Duration::ZERO, Easing::EaseOut);
        assert_eq!(tw.sample(Duration::from_millis(199)), 0.0);
        assert_eq!(tw.sample(Duration::from_millis(200)), 1.0);
    }
}
