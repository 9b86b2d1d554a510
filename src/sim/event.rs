/// Input and output vocabulary of the presentation.
///
/// `Click` is what the UI resolves a pointer press (or an activated focus
/// target) into. `PresentationEvent` is emitted to listeners after every
/// state mutation.

use crate::domain::overlay::InfoKey;

/// An interactive region.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Click {
    StepDot(usize),
    Next,
    Select(InfoKey),
    Beacon(usize),
    InfoClose,
    InfoBackdrop,
    InfoBody,
    ContextClose,
    ContextBackdrop,
    ContextBody,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PresentationEvent {
    StepMounted { index: usize, label: &'static str },
    StepUnmounted { index: usize, cancelled_timers: usize },
    InfoOpened { key: InfoKey },
    InfoReplaced { from: InfoKey, to: InfoKey },
    InfoClosed { key: InfoKey },
    ContextOpened { title: &'static str },
    ContextReplaced { from: &'static str, to: &'static str },
    ContextClosed { title: &'static str },
    CounterArmed { metric: usize, starts_at_ms: u128 },
    CounterStarted { metric: usize },
    CounterSettled { metric: usize, value: i64 },
    FocusMoved { slot: Option<usize> },
}
