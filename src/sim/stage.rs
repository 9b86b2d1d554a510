/// Stage: one mounted instance of a step.
///
/// A stage exclusively owns everything step-local: the overlay machine, one
/// counter per metric, one reveal path per link, the keyboard focus ring and
/// the ids of every timer it has scheduled. Changing step never mutates a
/// stage into another; the old one is unmounted (timers cancelled) and a
/// fresh one is mounted, so revisiting a step always starts clean.
///
/// Element timing (card entrance, beacon appearance, gauge fill) is measured
/// from `mounted_at`, so it restarts on every mount.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::overlay::{OverlayInput, OverlayMachine, Transition};
use crate::domain::reveal::RevealPath;
use crate::domain::spring::{AnimatedValue, SpringCurve};
use crate::domain::timer::{TimerId, TimerQueue};
use super::content::{Card, StepContent};
use super::event::{Click, PresentationEvent};

/// Work a stage defers to a later frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StageTimer {
    StartCounter(usize),
}

/// Timer payload tagged with the owning stage's mount epoch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Scheduled {
    pub epoch: u64,
    pub timer: StageTimer,
}

pub struct Stage {
    index: usize,
    epoch: u64,
    content: &'static StepContent,
    mounted_at: Duration,
    overlay: OverlayMachine,
    counters: Vec<AnimatedValue>,
    paths: Vec<RevealPath>,
    focus: Option<Click>,
    pending: Vec<TimerId>,
}

impl Stage {
    pub fn mount(
        index: usize,
        epoch: u64,
        content: &'static StepContent,
        curve: SpringCurve,
        now: Duration,
    ) -> Self {
        let counters = content
            .metrics
            .iter()
            .map(|m| AnimatedValue::new(m.target, m.delay, curve))
            .collect();
        let paths = content
            .links
            .iter()
            .map(|l| {
                let mut p = RevealPath::new(l.from, l.to, l.mode, l.delay, l.duration);
                p.activate(now);
                p
            })
            .collect();
        debug!(index, epoch, label = content.label, "stage mounted");
        Stage {
            index,
            epoch,
            content,
            mounted_at: now,
            overlay: OverlayMachine::new(),
            counters,
            paths,
            focus: None,
            pending: Vec::new(),
        }
    }

    /// Tear down: cancel every timer this stage still has pending.
    /// Returns how many were cancelled.
    pub fn unmount(self, timers: &mut TimerQueue<Scheduled>) -> usize {
        let cancelled = timers.cancel_all(&self.pending);
        debug!(index = self.index, epoch = self.epoch, cancelled, "stage unmounted");
        cancelled
    }

    // ── Accessors ──

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn content(&self) -> &'static StepContent {
        self.content
    }

    pub fn overlay(&self) -> &OverlayMachine {
        &self.overlay
    }

    pub fn counter(&self, metric: usize) -> Option<&AnimatedValue> {
        self.counters.get(metric)
    }

    pub fn paths(&self) -> &[RevealPath] {
        &self.paths
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.mounted_at)
    }

    // ── Element timing ──

    pub fn card_shown(&self, card: &Card, now: Duration) -> bool {
        self.elapsed(now) >= card.appear
    }

    pub fn beacon_shown(&self, beacon: usize, now: Duration) -> bool {
        self.content
            .beacons
            .get(beacon)
            .is_some_and(|b| self.elapsed(now) >= b.appear)
    }

    pub fn caption_shown(&self, now: Duration) -> bool {
        self.content
            .caption
            .is_some_and(|c| self.elapsed(now) >= c.appear)
    }

    /// Current gauge fill for a card, measured from when the card appeared.
    pub fn gauge_fill(&self, card: &Card, now: Duration) -> Option<f64> {
        let gauge = card.gauge?;
        let since_card = self.elapsed(now).saturating_sub(card.appear);
        Some(gauge.tween().sample(since_card))
    }

    // ── Overlay ──

    /// Apply a click that targets the overlay machine. Step-level clicks
    /// (`StepDot`, `Next`) are not the stage's business and are ignored.
    pub fn click(&mut self, click: Click) -> Transition {
        let input = match click {
            Click::Select(key) => match self.content.known_key(key) {
                Some(key) => OverlayInput::Select(key),
                None => {
                    warn!(key, step = self.content.label, "ignoring unknown info key");
                    return Transition::Unchanged;
                }
            },
            Click::Beacon(i) => match self.content.beacons.get(i) {
                Some(b) => OverlayInput::OpenContext(b.card),
                None => return Transition::Unchanged,
            },
            Click::InfoClose => OverlayInput::CloseInfo,
            Click::InfoBackdrop => OverlayInput::InfoBackdrop,
            Click::InfoBody => OverlayInput::InfoBody,
            Click::ContextClose => OverlayInput::CloseContext,
            Click::ContextBackdrop => OverlayInput::ContextBackdrop,
            Click::ContextBody => OverlayInput::ContextBody,
            Click::StepDot(_) | Click::Next => return Transition::Unchanged,
        };
        self.overlay.apply(input)
    }

    pub fn dismiss_top(&mut self) -> Transition {
        self.overlay.dismiss_top()
    }

    // ── Counters and timers ──

    /// The host saw metric `metric` on screen. On first sight, schedules
    /// the counter start and returns its deadline.
    pub fn notify_visible(
        &mut self,
        metric: usize,
        now: Duration,
        timers: &mut TimerQueue<Scheduled>,
    ) -> Option<Duration> {
        let start_at = self.counters.get_mut(metric)?.on_visible(now)?;
        let id = timers.schedule(
            start_at,
            Scheduled { epoch: self.epoch, timer: StageTimer::StartCounter(metric) },
        );
        self.pending.push(id);
        Some(start_at)
    }

    /// A timer this stage scheduled has come due.
    pub fn fire(&mut self, id: TimerId, timer: StageTimer, now: Duration) -> Option<PresentationEvent> {
        self.pending.retain(|p| *p != id);
        match timer {
            StageTimer::StartCounter(metric) => {
                let counter = self.counters.get_mut(metric)?;
                counter.begin(now);
                Some(PresentationEvent::CounterStarted { metric })
            }
        }
    }

    /// Advance counters and paths to `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<PresentationEvent> {
        let mut events = Vec::new();
        for (metric, counter) in self.counters.iter_mut().enumerate() {
            let was_settled = counter.is_settled();
            let value = counter.sample(now);
            if !was_settled && counter.is_settled() {
                events.push(PresentationEvent::CounterSettled { metric, value });
            }
        }
        for path in &mut self.paths {
            path.advance(now);
        }
        events
    }

    // ── Keyboard focus ──

    /// Clickable targets currently on screen, in tab order.
    pub fn focus_targets(&self, now: Duration) -> Vec<Click> {
        let c = self.content;
        let mut targets: Vec<Click> = c
            .cards
            .iter()
            .filter(|card| self.card_shown(card, now))
            .map(|card| Click::Select(card.key))
            .collect();
        if self.card_shown(&c.master, now) {
            targets.push(Click::Select(c.master.key));
        }
        targets.extend(c.metrics.iter().map(|m| Click::Select(m.key)));
        targets.extend(
            (0..c.beacons.len())
                .filter(|i| self.beacon_shown(*i, now))
                .map(Click::Beacon),
        );
        targets
    }

    /// The focused target, if it is still on screen.
    pub fn focused(&self, now: Duration) -> Option<Click> {
        let target = self.focus?;
        self.focus_targets(now).contains(&target).then_some(target)
    }

    /// Move focus one slot forward or back, wrapping. Returns the new slot.
    ///
    /// Focus is held by target, not by slot, so targets entering the ring
    /// ahead of it do not move it.
    pub fn move_focus(&mut self, forward: bool, now: Duration) -> Option<usize> {
        let targets = self.focus_targets(now);
        let n = targets.len();
        if n == 0 {
            self.focus = None;
            return None;
        }
        let current = self.focus.and_then(|f| targets.iter().position(|t| *t == f));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => n - 1,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        };
        self.focus = Some(targets[next]);
        Some(next)
    }
}

#[cfg(test)]
impl Stage {
    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::content::deck;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn mount(index: usize) -> Stage {
        Stage::mount(index, 7, deck()[index], SpringCurve::default(), ms(0))
    }

    #[test]
    fn mounts_closed_with_fresh_primitives() {
        let s = mount(2);
        assert!(s.overlay().is_quiet());
        assert_eq!(s.counter(1).map(|c| c.display()), Some(0));
        assert_eq!(s.pending_timers(), 0);
        assert!(mount(0).paths().iter().all(|p| p.is_active() && p.progress() == 0.0));
    }

    #[test]
    fn metric_click_opens_then_backdrop_closes() {
        let mut s = mount(2);
        assert_eq!(s.click(Click::Select("7-Day Demand")), Transition::InfoOpened("7-Day Demand"));
        assert!(s.overlay().is_info_open("7-Day Demand"));
        assert_eq!(s.click(Click::InfoBody), Transition::Unchanged);
        assert_eq!(s.click(Click::InfoBackdrop), Transition::InfoClosed("7-Day Demand"));
        assert!(s.overlay().is_quiet());
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut s = mount(2);
        assert_eq!(s.click(Click::Select("Store A")), Transition::Unchanged);
        assert!(s.overlay().is_quiet());
    }

    #[test]
    fn beacon_opens_context_over_info() {
        let mut s = mount(0);
        s.click(Click::Select("Amazon"));
        assert_eq!(s.click(Click::Beacon(1)), Transition::ContextOpened("The Economics of Fragmentation"));
        assert_eq!(s.overlay().info(), Some("Amazon"));
        assert_eq!(s.click(Click::Beacon(9)), Transition::Unchanged);
    }

    #[test]
    fn visibility_schedules_one_start() {
        let mut timers = TimerQueue::new();
        let mut s = mount(2);
        assert_eq!(s.notify_visible(1, ms(100), &mut timers), Some(ms(600)));
        assert_eq!(s.notify_visible(1, ms(200), &mut timers), None);
        assert_eq!(s.notify_visible(42, ms(200), &mut timers), None);
        assert_eq!(timers.len(), 1);
        assert_eq!(s.pending_timers(), 1);

        let fired = timers.poll(ms(600));
        let (id, sched) = fired[0];
        assert_eq!(sched, Scheduled { epoch: 7, timer: StageTimer::StartCounter(1) });
        assert_eq!(
            s.fire(id, sched.timer, ms(600)),
            Some(PresentationEvent::CounterStarted { metric: 1 })
        );
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn tick_reports_settle_once() {
        let mut timers = TimerQueue::new();
        let mut s = mount(2);
        s.notify_visible(1, ms(0), &mut timers);
        for (id, sched) in timers.poll(ms(500)) {
            s.fire(id, sched.timer, ms(500));
        }
        assert!(s.tick(ms(1500)).is_empty());
        assert_eq!(
            s.tick(ms(2500)),
            vec![PresentationEvent::CounterSettled { metric: 1, value: 120 }]
        );
        assert!(s.tick(ms(3000)).is_empty());
        assert_eq!(s.counter(1).map(|c| c.display()), Some(120));
    }

    #[test]
    fn unmount_cancels_pending_starts() {
        let mut timers = TimerQueue::new();
        let mut s = mount(2);
        for m in 0..3 {
            s.notify_visible(m, ms(0), &mut timers);
        }
        assert_eq!(s.unmount(&mut timers), 3);
        assert!(timers.poll(ms(60_000)).is_empty());
    }

    #[test]
    fn entrance_timing_gates_focus_targets() {
        let s = mount(0);
        // t=0: only Store A is in
        assert_eq!(s.focus_targets(ms(0)), vec![Click::Select("Store A")]);
        let late = s.focus_targets(ms(5000));
        assert_eq!(late.len(), 4 + 1 + 2);
        assert_eq!(late[4], Click::Select("problem"));
        assert_eq!(late[5], Click::Beacon(0));
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut s = mount(3);
        let now = ms(5000);
        let n = s.focus_targets(now).len();
        assert_eq!(s.move_focus(false, now), Some(n - 1));
        assert_eq!(s.move_focus(true, now), Some(0));
        assert_eq!(s.focused(now), Some(Click::Select("Inter-Store Transfer")));
        assert_eq!(s.move_focus(false, now), Some(n - 1));
    }

    #[test]
    fn focus_stays_on_target_as_cards_enter() {
        let mut s = mount(3);
        // t=100: only the engine is in
        assert_eq!(s.move_focus(true, ms(100)), Some(0));
        assert_eq!(s.focused(ms(100)), Some(Click::Select("engine")));
        // Inter-Store Transfer entered ahead of it at 600ms
        assert_eq!(s.focused(ms(700)), Some(Click::Select("engine")));
        assert_eq!(s.move_focus(true, ms(700)), Some(0));
        assert_eq!(s.focused(ms(700)), Some(Click::Select("Inter-Store Transfer")));
    }

    #[test]
    fn gauge_fills_after_card_appears() {
        let s = mount(0);
        let amazon = &deck()[0].cards[2];
        assert_eq!(s.gauge_fill(amazon, ms(400)), Some(0.0));
        let done = s.gauge_fill(amazon, ms(5000)).unwrap_or_default();
        assert!((done - 0.35).abs() < 1e-12);
        assert_eq!(s.gauge_fill(&deck()[0].master, ms(5000)), None);
    }
}
