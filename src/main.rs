/// Entry point and frame loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, LogConfig};
use sim::event::PresentationEvent;
use sim::world::PresentationState;
use ui::hit::HitMap;
use ui::input::{key_action, InputState, KeyAction};
use ui::renderer::Renderer;

const LOG_ENV: &str = "SYNCONE_LOG";

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: {e}");
        eprintln!("Using default settings.");
        AppConfig::default()
    });
    init_logging(&config.log)?;
    info!(?config, "starting");

    let clock = Instant::now();
    let mut state = PresentationState::new(config.timing.spring(), Duration::ZERO);
    state.subscribe(log_event);

    let mut renderer = Renderer::new(config.display.mouse, config.display.visibility_margin);
    renderer.init().context("terminal init failed")?;

    let result = run(&mut state, &mut renderer, &config, clock);
    let cleanup = renderer.cleanup().context("terminal cleanup failed");
    result?;
    cleanup?;

    info!(step = state.step_index(), "quit");
    println!("Thanks for walking through SyncOne.");
    Ok(())
}

/// Route `tracing` output to the configured log file. Stdout belongs to the
/// alternate screen, so nothing is logged there.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let Some(path) = &log.file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(
    state: &mut PresentationState,
    renderer: &mut Renderer,
    config: &AppConfig,
    clock: Instant,
) -> anyhow::Result<()> {
    let mut input = InputState::new();
    let frame = config.timing.frame();
    // Regions from the frame the user is looking at.
    let mut hits = HitMap::new();

    loop {
        let started = Instant::now();
        input.drain_events();
        let now = clock.elapsed();

        for key in &input.raw_events {
            match key_action(key) {
                Some(KeyAction::Quit) => return Ok(()),
                Some(action) => apply_key(state, action, now),
                None => {}
            }
        }
        for &(x, y) in &input.clicks {
            if let Some(click) = hits.resolve(x, y) {
                state.click(click, now);
            }
        }

        state.tick(now);
        let report = renderer.render(state, now).context("render failed")?;
        state.report_visible(&report.visible_metrics, now);
        hits = report.hits;

        std::thread::sleep(frame.saturating_sub(started.elapsed()));
    }
}

fn apply_key(state: &mut PresentationState, action: KeyAction, now: Duration) {
    match action {
        KeyAction::Next => state.advance(now),
        KeyAction::Back => state.back(now),
        KeyAction::Jump(n) => state.jump_to(n, now),
        KeyAction::FocusNext => state.move_focus(true, now),
        KeyAction::FocusPrev => state.move_focus(false, now),
        KeyAction::Activate => state.activate(now),
        KeyAction::Dismiss => state.dismiss_top(),
        KeyAction::Quit => {}
    }
}

/// Forward presentation events to the log.
fn log_event(event: &PresentationEvent) {
    match event {
        PresentationEvent::StepMounted { index, label } => info!(index, label, "step mounted"),
        PresentationEvent::StepUnmounted { index, cancelled_timers } => {
            info!(index, cancelled_timers, "step unmounted")
        }
        PresentationEvent::InfoOpened { key } => info!(key, "info opened"),
        PresentationEvent::InfoReplaced { from, to } => info!(from, to, "info replaced"),
        PresentationEvent::InfoClosed { key } => info!(key, "info closed"),
        PresentationEvent::ContextOpened { title } => info!(title, "context opened"),
        PresentationEvent::ContextReplaced { from, to } => info!(from, to, "context replaced"),
        PresentationEvent::ContextClosed { title } => info!(title, "context closed"),
        PresentationEvent::CounterArmed { metric, starts_at_ms } => {
            debug!(metric, starts_at_ms = ?starts_at_ms, "counter armed")
        }
        PresentationEvent::CounterStarted { metric } => debug!(metric, "counter started"),
        PresentationEvent::CounterSettled { metric, value } => debug!(metric, value, "counter settled"),
        PresentationEvent::FocusMoved { slot } => debug!(slot = ?slot, "focus moved"),
    }
}
