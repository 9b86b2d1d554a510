/// Step content: the static, illustrative data each step is built from.
///
/// Nothing here is computed. Each step module exposes one `StepContent`
/// static; `DECK` lists them in presentation order. Positions are relative
/// (0–100 on both axes) and refer to the centre of the element.

mod decision;
mod fragmentation;
mod insight;
mod intervention;
mod outcome;

use std::time::Duration;

use crate::domain::overlay::{ContextCard, InfoKey};
use crate::domain::reveal::{Point, RevealMode};
use crate::domain::tween::{Easing, Tween};

pub const fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Presentational accent colour.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLUE: Rgb = Rgb(59, 130, 246);
pub const ORANGE: Rgb = Rgb(249, 115, 22);
pub const TEAL: Rgb = Rgb(20, 184, 166);
pub const VIOLET: Rgb = Rgb(139, 92, 246);
pub const GREEN: Rgb = Rgb(16, 185, 129);
pub const RED: Rgb = Rgb(239, 68, 68);
pub const AMBER: Rgb = Rgb(245, 158, 11);
pub const SLATE: Rgb = Rgb(148, 163, 184);

/// A bar that fills to `fill` once its card is on screen.
#[derive(Clone, Copy, Debug)]
pub struct Gauge {
    pub caption: &'static str,
    pub status: &'static str,
    pub fill: f64,
    pub delay: Duration,
    pub duration: Duration,
}

impl Gauge {
    pub fn tween(&self) -> Tween {
        Tween::new(0.0, self.fill, self.delay, self.duration, Easing::EaseOut)
    }
}

/// A clickable card. Clicking opens the info panel keyed by `key`.
#[derive(Clone, Copy, Debug)]
pub struct Card {
    pub key: InfoKey,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Extra line under the subtitle (detail figures, call to action).
    pub note: &'static str,
    pub badge: Option<&'static str>,
    /// Info panel heading; defaults to `title`.
    pub panel_title: Option<&'static str>,
    pub detail: &'static str,
    pub accent: Rgb,
    pub pos: Point,
    pub appear: Duration,
    pub gauge: Option<Gauge>,
}

/// A numeric figure that counts up from zero once visible.
#[derive(Clone, Copy, Debug)]
pub struct Metric {
    pub key: InfoKey,
    pub label: &'static str,
    pub target: i64,
    pub suffix: &'static str,
    pub detail: &'static str,
    pub accent: Rgb,
    pub pos: Point,
    /// Counter start delay after the card first becomes visible.
    pub delay: Duration,
}

/// A "strategic context" marker. Opens the context overlay.
#[derive(Clone, Copy, Debug)]
pub struct Beacon {
    pub label: &'static str,
    pub card: ContextCard,
    pub pos: Point,
    pub appear: Duration,
}

/// A connection drawn between two positions.
#[derive(Clone, Copy, Debug)]
pub struct Link {
    pub from: Point,
    pub to: Point,
    pub mode: RevealMode,
    pub delay: Duration,
    pub duration: Duration,
    pub accent: Rgb,
}

#[derive(Clone, Copy, Debug)]
pub struct Caption {
    pub text: &'static str,
    pub y: f64,
    pub appear: Duration,
}

/// What the info panel shows for a key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Panel {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug)]
pub struct StepContent {
    pub label: &'static str,
    pub cards: &'static [Card],
    /// The step's main interaction (problem, hub, risk, engine, impact).
    pub master: Card,
    pub metrics: &'static [Metric],
    pub beacons: &'static [Beacon],
    pub links: &'static [Link],
    pub caption: Option<Caption>,
}

impl StepContent {
    /// Panel for `key`, or `None` if this step has no such key.
    pub fn panel(&self, key: &str) -> Option<Panel> {
        if self.master.key == key {
            return Some(card_panel(&self.master));
        }
        if let Some(card) = self.cards.iter().find(|c| c.key == key) {
            return Some(card_panel(card));
        }
        self.metrics
            .iter()
            .find(|m| m.key == key)
            .map(|m| Panel { title: m.label, body: m.detail })
    }

    /// Resolve a key to this step's own `'static` copy of it.
    pub fn known_key(&self, key: &str) -> Option<InfoKey> {
        std::iter::once(self.master.key)
            .chain(self.cards.iter().map(|c| c.key))
            .chain(self.metrics.iter().map(|m| m.key))
            .find(|k| *k == key)
    }
}

fn card_panel(card: &Card) -> Panel {
    Panel {
        title: card.panel_title.unwrap_or(card.title),
        body: card.detail,
    }
}

pub static DECK: [&StepContent; 5] = [
    &fragmentation::STEP,
    &intervention::STEP,
    &insight::STEP,
    &decision::STEP,
    &outcome::STEP,
];

pub fn deck() -> &'static [&'static StepContent] {
    &DECK
}

#[cfg(test)]
impl StepContent {
    pub fn keys(&self) -> impl Iterator<Item = InfoKey> + '_ {
        self.cards
            .iter()
            .map(|c| c.key)
            .chain(std::iter::once(self.master.key))
            .chain(self.metrics.iter().map(|m| m.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deck_has_five_labelled_steps() {
        let labels: Vec<_> = deck().iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Fragmentation", "Intervention", "Insight", "Decision", "Outcome"]);
    }

    #[test]
    fn keys_unique_within_each_step() {
        for step in deck() {
            let mut seen = HashSet::new();
            for key in step.keys() {
                assert!(seen.insert(key), "{}: duplicate key {key}", step.label);
            }
        }
    }

    #[test]
    fn every_key_has_a_panel() {
        for step in deck() {
            for key in step.keys() {
                let panel = step.panel(key).expect("panel");
                assert!(!panel.title.is_empty());
                assert!(!panel.body.is_empty(), "{}: {key} has no detail", step.label);
                assert_eq!(step.known_key(key), Some(key));
            }
            assert_eq!(step.panel("no-such-key"), None);
            assert_eq!(step.known_key("no-such-key"), None);
        }
    }

    #[test]
    fn positions_in_relative_range() {
        for step in deck() {
            let points = step
                .cards
                .iter()
                .map(|c| c.pos)
                .chain(std::iter::once(step.master.pos))
                .chain(step.metrics.iter().map(|m| m.pos))
                .chain(step.beacons.iter().map(|b| b.pos))
                .chain(step.links.iter().flat_map(|l| [l.from, l.to]));
            for p in points {
                assert!(p.in_unit_range(), "{}: {p:?}", step.label);
            }
        }
    }

    #[test]
    fn gauges_fill_within_bar() {
        for step in deck() {
            for card in step.cards.iter().chain(std::iter::once(&step.master)) {
                if let Some(g) = card.gauge {
                    assert!(g.fill > 0.0 && g.fill <= 1.0);
                }
            }
        }
    }

    #[test]
    fn master_panel_title_overrides_card_title() {
        let first = deck()[0];
        let panel = first.panel(first.master.key).expect("master panel");
        assert_eq!(panel.title, "The Problem: Fragmentation");
        assert_ne!(panel.title, first.master.title);
    }

    #[test]
    fn insight_metrics_match_forecast() {
        let insight = deck()[2];
        let targets: Vec<_> = insight.metrics.iter().map(|m| (m.label, m.target)).collect();
        assert_eq!(
            targets,
            [("Current Stock", 45), ("7-Day Demand", 120), ("Days to Stockout", 3)]
        );
    }

    #[test]
    fn first_step_links_are_broken() {
        assert!(deck()[0].links.iter().all(|l| l.mode == RevealMode::Partial));
        assert!(deck()[1].links.iter().all(|l| l.mode == RevealMode::Full));
    }
}
