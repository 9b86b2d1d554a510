/// Spring-driven numeric counter.
///
/// ## Lifecycle
///
/// ```text
///   Waiting ──on_visible──▶ Armed ──begin──▶ Running ──(duration)──▶ Settled
/// ```
///
///   - **Waiting**: displays the start value (0). Nothing has been seen yet.
///   - **Armed**: the host element became visible; the start is pending
///     `delay`. The caller owns the timer that calls `begin`.
///   - **Running**: follows a second-order step response toward `target`.
///   - **Settled**: pinned to `target` exactly. Further samples never drift.
///
/// ## Curve
///
/// The response is solved in closed form (no integrator, so frame rate does
/// not change the curve). The natural frequency is chosen from the settle
/// duration, not from the distance to travel, so a counter to 12 and a counter
/// to 12 000 take the same wall time.

use std::time::Duration;

use super::visibility::AppearOnce;

/// ω·T at which the critically damped residual `(1 + ωT)·e^(−ωT)` drops to ~1e-3.
const SETTLE_RATIO: f64 = 9.24;

/// Upper bound on `bounce`. Anything above reads as a wobble, not a count-up.
pub const MAX_BOUNCE: f64 = 0.5;

const MIN_DURATION: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SpringCurve {
    omega: f64,
    zeta: f64,
    duration: Duration,
}

impl SpringCurve {
    /// `bounce = 0` is critically damped (monotonic); `bounce > 0` underdamps.
    pub fn new(duration: Duration, bounce: f64) -> Self {
        let duration = duration.max(MIN_DURATION);
        let bounce = if bounce.is_finite() { bounce.clamp(0.0, MAX_BOUNCE) } else { 0.0 };
        let zeta = 1.0 - bounce;
        SpringCurve {
            omega: SETTLE_RATIO / (zeta * duration.as_secs_f64()),
            zeta,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Normalized step response: 0.0 at `t = 0`, exactly 1.0 from `duration` on.
    /// Scaled by the raw response at `duration`, so the curve lands on 1.0
    /// continuously instead of snapping over the last residual.
    pub fn response(&self, t: Duration) -> f64 {
        if t.is_zero() {
            return 0.0;
        }
        if t >= self.duration {
            return 1.0;
        }
        self.raw(t.as_secs_f64()) / self.raw(self.duration.as_secs_f64())
    }

    fn raw(&self, s: f64) -> f64 {
        let w = self.omega;
        if self.zeta >= 1.0 {
            1.0 - (1.0 + w * s) * (-w * s).exp()
        } else {
            let z = self.zeta;
            let wd = w * (1.0 - z * z).sqrt();
            let envelope = (-z * w * s).exp();
            1.0 - envelope * ((wd * s).cos() + (z * w / wd) * (wd * s).sin())
        }
    }
}

impl Default for SpringCurve {
    fn default() -> Self {
        SpringCurve::new(Duration::from_secs(2), 0.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CounterPhase {
    Waiting,
    Armed,
    Running,
    Settled,
}

#[derive(Clone, Debug)]
pub struct AnimatedValue {
    target: i64,
    /// Where the current run started from (0 for the first run).
    from: f64,
    current: f64,
    delay: Duration,
    curve: SpringCurve,
    appear: AppearOnce,
    started_at: Option<Duration>,
    settled: bool,
}

impl AnimatedValue {
    pub fn new(target: i64, delay: Duration, curve: SpringCurve) -> Self {
        AnimatedValue {
            target,
            from: 0.0,
            current: 0.0,
            delay,
            curve,
            appear: AppearOnce::new(),
            started_at: None,
            settled: false,
        }
    }

    /// Rounded value as of the last `sample`.
    pub fn display(&self) -> i64 {
        if self.settled {
            self.target
        } else {
            self.current.round() as i64
        }
    }

    pub fn phase(&self) -> CounterPhase {
        if self.settled {
            CounterPhase::Settled
        } else if self.started_at.is_some() {
            CounterPhase::Running
        } else if self.appear.has_fired() {
            CounterPhase::Armed
        } else {
            CounterPhase::Waiting
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Host reports that the counter is on screen. On the first report,
    /// returns the instant the run should begin (`now + delay`).
    pub fn on_visible(&mut self, now: Duration) -> Option<Duration> {
        if self.appear.notify(now) {
            Some(now + self.delay)
        } else {
            None
        }
    }

    /// Start the spring run from the current value.
    pub fn begin(&mut self, now: Duration) {
        self.from = self.current;
        self.started_at = Some(now);
        self.settled = false;
    }

    /// Advance to `now` and return the rounded display value.
    pub fn sample(&mut self, now: Duration) -> i64 {
        if self.settled {
            return self.target;
        }
        let Some(start) = self.started_at else {
            return self.display();
        };
        let t = now.saturating_sub(start);
        if t >= self.curve.duration() {
            self.current = self.target as f64;
            self.settled = true;
            return self.target;
        }
        let r = self.curve.response(t);
        self.current = self.from + (self.target as f64 - self.from) * r;
        self.display()
    }
}

#[cfg(test)]
impl AnimatedValue {
    /// Underlying continuous value as of the last `sample`.
    fn current(&self) -> f64 {
        self.current
    }
}
