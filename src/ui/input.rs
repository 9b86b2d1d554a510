/// Input state tracker.
///
/// Collects everything the terminal reported since the last frame:
///   - Fresh key presses (Press only; Repeat and Release are ignored, since
///     every binding here is a one-shot action)
///   - Left mouse button presses, as terminal cell coordinates
///
/// Drained once per frame, before the presentation tick.

use std::time::Duration;

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

pub struct InputState {
    /// Keys pressed during the most recent `drain_events()` call, in order.
    pub raw_events: Vec<KeyEvent>,

    /// Left-button presses during the most recent drain, as (column, row).
    pub clicks: Vec<(u16, u16)>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            raw_events: Vec::with_capacity(8),
            clicks: Vec::with_capacity(4),
        }
    }

    /// Drain all pending terminal events without blocking.
    pub fn drain_events(&mut self) {
        self.raw_events.clear();
        self.clicks.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    self.raw_events.push(key);
                }
                Ok(Event::Mouse(m)) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
                    self.clicks.push((m.column, m.row));
                }
                _ => {}
            }
        }
    }
}

/// What a key press asks the presentation to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    Next,
    Back,
    Jump(usize),
    FocusNext,
    FocusPrev,
    Activate,
    Dismiss,
    Quit,
}

/// Map one key event to an action. Unbound keys yield `None`.
pub fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyAction::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('n') => Some(KeyAction::Next),
        KeyCode::Left => Some(KeyAction::Back),
        KeyCode::Char(c @ '1'..='5') => Some(KeyAction::Jump(c as usize - '1' as usize)),
        KeyCode::Tab => Some(KeyAction::FocusNext),
        KeyCode::BackTab => Some(KeyAction::FocusPrev),
        KeyCode::Enter => Some(KeyAction::Activate),
        KeyCode::Esc => Some(KeyAction::Dismiss),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        _ => None,
    }
}
