/// One-shot "first became visible" trigger.
///
/// The host reports visibility every frame; only the first report is kept.
/// Scrolling away and back (or a resize that hides and re-shows a card) never
/// re-fires.

use std::time::Duration;

#[derive(Clone, Copy, Debug, Default)]
pub struct AppearOnce {
    fired_at: Option<Duration>,
}

impl AppearOnce {
    pub fn new() -> Self {
        AppearOnce { fired_at: None }
    }

    /// Record a visibility report. Returns true only on the first call.
    pub fn notify(&mut self, now: Duration) -> bool {
        if self.fired_at.is_some() {
            return false;
        }
        self.fired_at = Some(now);
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired_at.is_some()
    }
}
