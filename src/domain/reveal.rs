/// Progressive line reveal between two points.
///
/// Coordinates are relative (0–100 on both axes); the renderer maps them onto
/// whatever surface it draws to. A path is created per mount, so there is no
/// "already revealed" memory across remounts.

use std::time::Duration;

use super::tween::{Easing, Tween};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// How much of the line gets drawn. Always chosen by the caller.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RevealMode {
    /// Whole line, ease-in-out.
    Full,
    /// 40% of the line, ease-out. Reads as a broken link.
    Partial,
}

impl RevealMode {
    pub fn extent(self) -> f64 {
        match self {
            RevealMode::Full => 1.0,
            RevealMode::Partial => 0.4,
        }
    }

    pub fn easing(self) -> Easing {
        match self {
            RevealMode::Full => Easing::EaseInOut,
            RevealMode::Partial => Easing::EaseOut,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RevealPath {
    pub from: Point,
    pub to: Point,
    pub mode: RevealMode,
    tween: Tween,
    activated_at: Option<Duration>,
    progress: f64,
}

impl RevealPath {
    pub fn new(from: Point, to: Point, mode: RevealMode, delay: Duration, duration: Duration) -> Self {
        RevealPath {
            from,
            to,
            mode,
            tween: Tween::new(0.0, mode.extent(), delay, duration, mode.easing()),
            activated_at: None,
            progress: 0.0,
        }
    }

    pub fn activate(&mut self, now: Duration) {
        if self.activated_at.is_none() {
            self.activated_at = Some(now);
        }
    }

    /// Advance to `now`; returns the drawn fraction. Never decreases.
    pub fn advance(&mut self, now: Duration) -> f64 {
        if let Some(at) = self.activated_at {
            let p = self.tween.sample(now.saturating_sub(at));
            if p > self.progress {
                self.progress = p;
            }
        }
        self.progress
    }

    /// Drawn fraction of the full line, in `[0, extent]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Opacity follows the reveal: 0 before it starts, 1 once fully drawn.
    pub fn opacity(&self) -> f64 {
        (self.progress / self.mode.extent()).clamp(0.0, 1.0)
    }

    /// The currently visible part of the line.
    pub fn drawn_segment(&self) -> (Point, Point) {
        (self.from, self.from.lerp(self.to, self.progress))
    }
}

#[cfg(test)]
impl Point {
    pub fn in_unit_range(self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

#[cfg(test)]
impl RevealPath {
    pub fn is_active(&self) -> bool {
        self.activated_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.mode.extent() - f64::EPSILON
    }
}
