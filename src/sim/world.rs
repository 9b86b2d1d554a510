/// PresentationState: the whole running presentation.
///
/// ## Ownership
///
///   - `sequencer` — which step is current. Only changes through
///     `advance` / `back` / `jump_to` / a step-dot click.
///   - `stage`     — the mounted instance of the current step. Replaced, never
///     reused: every step change unmounts the old stage and mounts a new one
///     with a fresh epoch.
///   - `timers`    — deferred counter starts. Entries are tagged with the epoch
///     of the stage that scheduled them. Unmount cancels a stage's entries;
///     anything with a stale epoch that still fires is dropped.
///
/// Every mutation is followed by a `PresentationEvent` to all listeners.

use std::time::Duration;

use tracing::{info, warn};

use crate::domain::observe::{ListenerId, Listeners};
use crate::domain::overlay::Transition;
use crate::domain::sequencer::{StepChange, StepSequencer};
use crate::domain::spring::SpringCurve;
use crate::domain::timer::TimerQueue;
use super::content::{self, StepContent};
use super::event::{Click, PresentationEvent};
use super::stage::{Scheduled, Stage};

pub struct PresentationState {
    deck: &'static [&'static StepContent],
    sequencer: StepSequencer,
    stage: Stage,
    timers: TimerQueue<Scheduled>,
    next_epoch: u64,
    curve: SpringCurve,
    listeners: Listeners<PresentationEvent>,
}

impl PresentationState {
    /// Start on the first step, mounted at `now`.
    pub fn new(curve: SpringCurve, now: Duration) -> Self {
        let deck = content::deck();
        let sequencer = StepSequencer::new(deck.len());
        let stage = Stage::mount(0, 0, deck[0], curve, now);
        PresentationState {
            deck,
            sequencer,
            stage,
            timers: TimerQueue::new(),
            next_epoch: 1,
            curve,
            listeners: Listeners::new(),
        }
    }

    // ── Observers ──

    pub fn subscribe(&mut self, f: impl FnMut(&PresentationEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(f)
    }

    #[allow(dead_code)]
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn emit(&mut self, event: PresentationEvent) {
        self.listeners.emit(&event);
    }

    // ── Queries ──

    pub fn step_index(&self) -> usize {
        self.sequencer.index()
    }

    pub fn step_count(&self) -> usize {
        self.sequencer.total()
    }

    pub fn is_last_step(&self) -> bool {
        self.sequencer.is_last()
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.deck.iter().map(|s| s.label)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    // ── Step navigation ──

    pub fn advance(&mut self, now: Duration) {
        let change = self.sequencer.advance();
        self.remount(change, now);
    }

    pub fn back(&mut self, now: Duration) {
        let change = self.sequencer.back();
        self.remount(change, now);
    }

    pub fn jump_to(&mut self, n: usize, now: Duration) {
        let change = self.sequencer.jump_to(n);
        self.remount(change, now);
    }

    fn remount(&mut self, change: Option<StepChange>, now: Duration) {
        let Some(change) = change else { return };
        let epoch = self.next_epoch;
        self.next_epoch += 1;
        let content = self.deck[change.to];
        let fresh = Stage::mount(change.to, epoch, content, self.curve, now);
        let old = std::mem::replace(&mut self.stage, fresh);
        let cancelled_timers = old.unmount(&mut self.timers);
        info!(from = change.from, to = change.to, label = content.label, "step change");
        self.emit(PresentationEvent::StepUnmounted { index: change.from, cancelled_timers });
        self.emit(PresentationEvent::StepMounted { index: change.to, label: content.label });
    }

    // ── Interaction ──

    pub fn click(&mut self, click: Click, now: Duration) {
        match click {
            Click::StepDot(n) => self.jump_to(n, now),
            Click::Next => self.advance(now),
            other => {
                let transition = self.stage.click(other);
                self.emit_transition(transition);
            }
        }
    }

    /// Escape: close the topmost overlay layer.
    pub fn dismiss_top(&mut self) {
        let transition = self.stage.dismiss_top();
        self.emit_transition(transition);
    }

    pub fn move_focus(&mut self, forward: bool, now: Duration) {
        let slot = self.stage.move_focus(forward, now);
        self.emit(PresentationEvent::FocusMoved { slot });
    }

    /// Enter: click the focused target, or advance when nothing is focused.
    pub fn activate(&mut self, now: Duration) {
        match self.stage.focused(now) {
            Some(click) => self.click(click, now),
            None => self.advance(now),
        }
    }

    fn emit_transition(&mut self, transition: Transition) {
        let event = match transition {
            Transition::InfoOpened(key) => PresentationEvent::InfoOpened { key },
            Transition::InfoReplaced { from, to } => PresentationEvent::InfoReplaced { from, to },
            Transition::InfoClosed(key) => PresentationEvent::InfoClosed { key },
            Transition::ContextOpened(title) => PresentationEvent::ContextOpened { title },
            Transition::ContextReplaced { from, to } => PresentationEvent::ContextReplaced { from, to },
            Transition::ContextClosed(title) => PresentationEvent::ContextClosed { title },
            Transition::Unchanged => return,
        };
        self.emit(event);
    }

    // ── Frame ──

    /// The renderer found these metrics fully on screen.
    pub fn report_visible(&mut self, metrics: &[usize], now: Duration) {
        for &metric in metrics {
            if let Some(start) = self.stage.notify_visible(metric, now, &mut self.timers) {
                self.emit(PresentationEvent::CounterArmed {
                    metric,
                    starts_at_ms: start.as_millis(),
                });
            }
        }
    }

    /// Fire due timers, then advance every animation to `now`.
    pub fn tick(&mut self, now: Duration) {
        for (id, scheduled) in self.timers.poll(now) {
            if scheduled.epoch != self.stage.epoch() {
                warn!(
                    epoch = scheduled.epoch,
                    current = self.stage.epoch(),
                    "dropping timer from unmounted step"
                );
                continue;
            }
            if let Some(event) = self.stage.fire(id, scheduled.timer, now) {
                self.emit(event);
            }
        }
        for event in self.stage.tick(now) {
            self.emit(event);
        }
    }
}

#[cfg(test)]
impl PresentationState {
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stage::StageTimer;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn state() -> PresentationState {
        PresentationState::new(SpringCurve::default(), ms(0))
    }

    fn recorded(s: &mut PresentationState) -> Rc<RefCell<Vec<PresentationEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        s.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn starts_on_first_step_closed() {
        let s = state();
        assert_eq!(s.step_index(), 0);
        assert_eq!(s.step_count(), 5);
        assert_eq!(s.stage().content().label, "Fragmentation");
        assert!(s.stage().overlay().is_quiet());
    }

    #[test]
    fn advance_saturates_at_last_step() {
        let mut s = state();
        for i in 0..5 {
            s.advance(ms(i * 10));
        }
        assert_eq!(s.step_index(), 4);
        assert!(s.is_last_step());
    }

    #[test]
    fn back_stops_at_first() {
        let mut s = state();
        s.advance(ms(0));
        s.back(ms(1));
        s.back(ms(2));
        assert_eq!(s.step_index(), 0);
    }

    #[test]
    fn step_dot_jumps_and_same_step_is_noop() {
        let mut s = state();
        let log = recorded(&mut s);
        s.click(Click::StepDot(3), ms(10));
        assert_eq!(s.step_index(), 3);
        s.click(Click::StepDot(3), ms(20));
        assert_eq!(
            *log.borrow(),
            vec![
                PresentationEvent::StepUnmounted { index: 0, cancelled_timers: 0 },
                PresentationEvent::StepMounted { index: 3, label: "Decision" },
            ]
        );
    }

    #[test]
    fn insight_scenario() {
        let mut s = state();
        s.advance(ms(0));
        s.advance(ms(0));
        assert_eq!(s.stage().content().label, "Insight");

        let log = recorded(&mut s);
        s.click(Click::Select("7-Day Demand"), ms(100));
        assert!(s.stage().overlay().is_info_open("7-Day Demand"));
        s.click(Click::InfoBody, ms(150));
        assert!(s.stage().overlay().is_info_open("7-Day Demand"));
        s.click(Click::InfoBackdrop, ms(200));
        assert!(s.stage().overlay().is_quiet());
        assert_eq!(
            *log.borrow(),
            vec![
                PresentationEvent::InfoOpened { key: "7-Day Demand" },
                PresentationEvent::InfoClosed { key: "7-Day Demand" },
            ]
        );
    }

    #[test]
    fn overlays_reset_on_step_change() {
        let mut s = state();
        s.click(Click::Select("Store B"), ms(0));
        s.click(Click::Beacon(0), ms(0));
        assert!(!s.stage().overlay().is_quiet());
        s.advance(ms(10));
        assert!(s.stage().overlay().is_quiet());
        s.back(ms(20));
        assert!(s.stage().overlay().is_quiet());
    }

    #[test]
    fn escape_closes_context_then_info() {
        let mut s = state();
        s.click(Click::Select("Amazon"), ms(0));
        s.click(Click::Beacon(0), ms(0));
        s.dismiss_top();
        assert_eq!(s.stage().overlay().info(), Some("Amazon"));
        assert!(s.stage().overlay().context().is_none());
        s.dismiss_top();
        assert!(s.stage().overlay().is_quiet());
    }

    #[test]
    fn counters_run_after_visibility_and_delay() {
        let mut s = state();
        s.jump_to(2, ms(0));
        let log = recorded(&mut s);
        s.report_visible(&[0, 1, 2], ms(100));
        s.report_visible(&[0, 1, 2], ms(133));
        assert_eq!(s.pending_timers(), 3);

        s.tick(ms(399));
        assert_eq!(s.pending_timers(), 3);
        s.tick(ms(400));
        assert_eq!(s.pending_timers(), 2);
        s.tick(ms(5000));
        assert_eq!(s.pending_timers(), 0);
        s.tick(ms(10_000));

        let values: Vec<_> = (0..3).filter_map(|m| s.stage().counter(m).map(|c| c.display())).collect();
        assert_eq!(values, [45, 120, 3]);

        let log = log.borrow();
        assert_eq!(log[0], PresentationEvent::CounterArmed { metric: 0, starts_at_ms: 400 });
        assert_eq!(log.iter().filter(|e| matches!(e, PresentationEvent::CounterArmed { .. })).count(), 3);
        assert_eq!(log.iter().filter(|e| matches!(e, PresentationEvent::CounterSettled { .. })).count(), 3);
    }

    #[test]
    fn leaving_a_step_cancels_its_counter_starts() {
        let mut s = state();
        s.jump_to(2, ms(0));
        s.report_visible(&[0, 1, 2], ms(100));

        let log = recorded(&mut s);
        s.jump_to(0, ms(150));
        assert_eq!(s.pending_timers(), 0);
        s.tick(ms(5000));
        assert!(!log
            .borrow()
            .iter()
            .any(|e| matches!(e, PresentationEvent::CounterStarted { .. } | PresentationEvent::CounterSettled { .. })));
        assert_eq!(log.borrow()[0], PresentationEvent::StepUnmounted { index: 2, cancelled_timers: 3 });
    }

    #[test]
    fn timer_from_an_earlier_mount_is_dropped() {
        let mut s = state();
        s.jump_to(2, ms(0));
        let stale = s.stage().epoch() - 1;
        s.timers.schedule(ms(10), Scheduled { epoch: stale, timer: StageTimer::StartCounter(0) });

        let log = recorded(&mut s);
        s.tick(ms(20));
        s.tick(ms(5000));
        assert_eq!(s.pending_timers(), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(s.stage().counter(0).map(|c| c.display()), Some(0));
    }

    #[test]
    fn revisiting_a_step_starts_counters_from_zero() {
        let mut s = state();
        s.jump_to(4, ms(0));
        s.report_visible(&[0], ms(0));
        s.tick(ms(500));
        s.tick(ms(5000));
        assert_eq!(s.stage().counter(0).map(|c| c.display()), Some(35));

        s.back(ms(6000));
        s.advance(ms(7000));
        s.tick(ms(7000));
        assert_eq!(s.stage().counter(0).map(|c| c.display()), Some(0));
    }

    #[test]
    fn unsubscribed_listener_hears_nothing() {
        let mut s = state();
        let log = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&log);
        let id = s.subscribe(move |_| *sink.borrow_mut() += 1);
        s.advance(ms(0));
        assert_eq!(*log.borrow(), 2);
        assert!(s.unsubscribe(id));
        s.advance(ms(1));
        assert_eq!(*log.borrow(), 2);
    }

    #[test]
    fn enter_advances_without_focus_and_clicks_with_it() {
        let mut s = state();
        s.activate(ms(0));
        assert_eq!(s.step_index(), 1);

        s.move_focus(true, ms(5000));
        let target = s.stage().focused(ms(5000));
        s.activate(ms(5000));
        assert_eq!(s.step_index(), 1);
        match target {
            Some(Click::Select(key)) => assert!(s.stage().overlay().is_info_open(key)),
            other => panic!("unexpected focus target {other:?}"),
        }
    }
}
