/// Per-step overlay state machine.
///
/// Two orthogonal layers:
///   - **Info panel** — `Closed` or `InfoOpen(key)`. Mutually exclusive:
///     selecting another key replaces the open one, never stacks.
///   - **Context overlay** — `ContextClosed` or `ContextOpen(card)`. Independent
///     of the info layer and drawn above it.
///
/// Every input is total. Closing something that is already closed, or
/// clicking inside an open panel's body, reports `Transition::Unchanged`.

/// Identifies an entity, metric or master card within one step.
pub type InfoKey = &'static str;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ContextCard {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OverlayInput {
    Select(InfoKey),
    CloseInfo,
    InfoBackdrop,
    InfoBody,
    OpenContext(ContextCard),
    CloseContext,
    ContextBackdrop,
    ContextBody,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    InfoOpened(InfoKey),
    InfoReplaced { from: InfoKey, to: InfoKey },
    InfoClosed(InfoKey),
    ContextOpened(&'static str),
    ContextReplaced { from: &'static str, to: &'static str },
    ContextClosed(&'static str),
    Unchanged,
}

#[derive(Clone, Debug, Default)]
pub struct OverlayMachine {
    info: Option<InfoKey>,
    context: Option<ContextCard>,
}

impl OverlayMachine {
    pub fn new() -> Self {
        OverlayMachine { info: None, context: None }
    }

    pub fn info(&self) -> Option<InfoKey> {
        self.info
    }

    pub fn context(&self) -> Option<&ContextCard> {
        self.context.as_ref()
    }

    pub fn apply(&mut self, input: OverlayInput) -> Transition {
        match input {
            OverlayInput::Select(key) => match self.info.replace(key) {
                None => Transition::InfoOpened(key),
                Some(prev) if prev == key => Transition::Unchanged,
                Some(prev) => Transition::InfoReplaced { from: prev, to: key },
            },
            OverlayInput::CloseInfo | OverlayInput::InfoBackdrop => match self.info.take() {
                Some(prev) => Transition::InfoClosed(prev),
                None => Transition::Unchanged,
            },
            OverlayInput::OpenContext(card) => match self.context.replace(card) {
                None => Transition::ContextOpened(card.title),
                Some(prev) if prev == card => Transition::Unchanged,
                Some(prev) => Transition::ContextReplaced { from: prev.title, to: card.title },
            },
            OverlayInput::CloseContext | OverlayInput::ContextBackdrop => match self.context.take() {
                Some(prev) => Transition::ContextClosed(prev.title),
                None => Transition::Unchanged,
            },
            OverlayInput::InfoBody | OverlayInput::ContextBody => Transition::Unchanged,
        }
    }

    /// Close the topmost open layer (context first). Used by Esc.
    pub fn dismiss_top(&mut self) -> Transition {
        if self.context.is_some() {
            self.apply(OverlayInput::CloseContext)
        } else {
            self.apply(OverlayInput::CloseInfo)
        }
    }
}

#[cfg(test)]
impl OverlayMachine {
    pub fn is_info_open(&self, key: InfoKey) -> bool {
        self.info == Some(key)
    }

    pub fn is_quiet(&self) -> bool {
        self.info.is_none() && self.context.is_none()
    }
}
