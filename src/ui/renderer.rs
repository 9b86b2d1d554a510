/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Compose the next frame into `front` (array of Cell), recording every
///      clickable region in a `HitMap` as it is painted
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Composition never touches the terminal, so a frame can be composed into a
/// bare `FrameBuffer` and inspected.
///
/// Layout (rows):
///   0        brand line
///   1        step indicator (clickable dots)
///   2        rule
///   3..h-2   body: cards, metrics, links, beacons, tagline
///   h-2      rule
///   h-1      footer: "k / 5", key hints, NEXT STEP
///
/// Content positions are relative (0–100) and are mapped onto the body.

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::reveal::{Point, RevealPath};
use crate::domain::spring::CounterPhase;
use crate::sim::content::{self, Card, Rgb};
use crate::sim::event::Click;
use crate::sim::stage::Stage;
use crate::sim::world::PresentationState;
use super::hit::{HitMap, Rect};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells, so that the
    /// gap colour between rows matches the cells on VTE terminals.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y), at most `max` columns. Returns columns written.
    fn put_str(&mut self, x: usize, y: usize, s: &str, max: usize, fg: Color, bg: Color) -> usize {
        let mut n = 0;
        for ch in s.chars() {
            if n >= max || x + n >= self.width {
                break;
            }
            self.set(x + n, y, Cell::new(ch, fg, bg));
            n += 1;
        }
        n
    }

    fn fill(&mut self, r: Rect, bg: Color) {
        for y in r.y as usize..(r.y + r.h) as usize {
            for x in r.x as usize..(r.x + r.w) as usize {
                self.set(x, y, Cell::new(' ', Color::White, bg));
            }
        }
    }

    /// Push everything already drawn toward the background (modal backdrop).
    fn fade_all(&mut self) {
        for cell in &mut self.cells {
            cell.fg = blend(cell.fg, Cell::BASE_BG, 0.7);
            cell.bg = blend(cell.bg, Color::Rgb { r: 0, g: 0, b: 0 }, 0.4);
        }
    }
}

// ── Palette ──

const TEXT: Color = Color::Rgb { r: 226, g: 232, b: 240 };
const MUTED: Color = Color::Rgb { r: 148, g: 163, b: 184 };
const DIM: Color = Color::Rgb { r: 71, g: 85, b: 105 };
const SURFACE: Color = Color::Rgb { r: 30, g: 32, b: 50 };
const PANEL: Color = Color::Rgb { r: 15, g: 23, b: 42 };
const FOCUS: Color = Color::Rgb { r: 250, g: 204, b: 21 };
const BRAND: Color = Color::Rgb { r: 96, g: 165, b: 250 };

fn color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

fn rgb_of(c: Color) -> (u8, u8, u8) {
    match c {
        Color::Rgb { r, g, b } => (r, g, b),
        Color::White => (240, 240, 240),
        Color::Reset => (22, 22, 35),
        _ => (160, 160, 160),
    }
}

/// Linear mix: `k = 0` is `a`, `k = 1` is `b`.
fn blend(a: Color, b: Color, k: f64) -> Color {
    let (ar, ag, ab) = rgb_of(a);
    let (br, bg, bb) = rgb_of(b);
    let k = k.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * k).round() as u8;
    Color::Rgb { r: mix(ar, br), g: mix(ag, bg), b: mix(ab, bb) }
}

// ── Layout ──

const HEADER_ROWS: usize = 3;
const FOOTER_ROWS: usize = 2;
const MIN_W: usize = 40;
const MIN_H: usize = 14;
const CARD_W: usize = 28;
const METRIC_W: usize = 24;
const METRIC_H: usize = 4;

/// What the host needs back from a composed frame.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub hits: HitMap,
    /// Metric indices whose card lies fully inside the body this frame.
    pub visible_metrics: Vec<usize>,
}

fn body_rect(w: usize, h: usize) -> Rect {
    Rect::new(
        0,
        HEADER_ROWS as u16,
        w as u16,
        h.saturating_sub(HEADER_ROWS + FOOTER_ROWS) as u16,
    )
}

/// Map a relative position onto a body cell.
fn anchor(body: &Rect, p: Point) -> (usize, usize) {
    let x = body.x as f64 + p.x / 100.0 * body.w.saturating_sub(1) as f64;
    let y = body.y as f64 + p.y / 100.0 * body.h.saturating_sub(1) as f64;
    (x.round().max(0.0) as usize, y.round().max(0.0) as usize)
}

/// A w×h rect centred on (cx, cy), pushed back inside `area`.
fn centred(area: &Rect, cx: usize, cy: usize, w: usize, h: usize) -> Rect {
    let w = w.min(area.w as usize);
    let h = h.min(area.h as usize);
    let max_x = area.x as usize + area.w as usize - w;
    let max_y = area.y as usize + area.h as usize - h;
    let x = cx.saturating_sub(w / 2).clamp(area.x as usize, max_x);
    let y = cy.saturating_sub(h / 2).clamp(area.y as usize, max_y);
    Rect::new(x as u16, y as u16, w as u16, h as u16)
}

/// Greedy word wrap by character count.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let wlen = word.chars().count();
        if len > 0 && len + 1 + wlen > width {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        line.push_str(word);
        len += wlen;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn draw_box(buf: &mut FrameBuffer, r: Rect, border: Color, bg: Color, double: bool) {
    if r.w < 2 || r.h < 2 {
        return;
    }
    let (hz, vt, tl, tr, bl, br) = if double {
        ('═', '║', '╔', '╗', '╚', '╝')
    } else {
        ('─', '│', '┌', '┐', '└', '┘')
    };
    buf.fill(r, bg);
    let (x0, y0) = (r.x as usize, r.y as usize);
    let (x1, y1) = (x0 + r.w as usize - 1, y0 + r.h as usize - 1);
    for x in x0 + 1..x1 {
        buf.set(x, y0, Cell::new(hz, border, bg));
        buf.set(x, y1, Cell::new(hz, border, bg));
    }
    for y in y0 + 1..y1 {
        buf.set(x0, y, Cell::new(vt, border, bg));
        buf.set(x1, y, Cell::new(vt, border, bg));
    }
    buf.set(x0, y0, Cell::new(tl, border, bg));
    buf.set(x1, y0, Cell::new(tr, border, bg));
    buf.set(x0, y1, Cell::new(bl, border, bg));
    buf.set(x1, y1, Cell::new(br, border, bg));
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    mouse: bool,
    margin: u16,
    last_step: Option<usize>,
}

impl Renderer {
    pub fn new(mouse: bool, visibility_margin: u16) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            mouse,
            margin: visibility_margin,
            last_step: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;
        if self.mouse {
            execute!(self.writer, EnableMouseCapture)?;
        }

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        if self.mouse {
            execute!(self.writer, DisableMouseCapture)?;
        }
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, state: &PresentationState, now: Duration) -> io::Result<FrameReport> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Step change → clear for a clean transition
        if self.last_step != Some(state.step_index()) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_step = Some(state.step_index());
        }

        self.front.clear();
        let report = compose(&mut self.front, state, now, self.margin);

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(report)
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colours; ResetColor would fall back to the terminal's
        // own default, which may differ from BASE_BG.
        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

// ── Compose: build front buffer content ──

fn compose(buf: &mut FrameBuffer, state: &PresentationState, now: Duration, margin: u16) -> FrameReport {
    let mut report = FrameReport::default();
    let (w, h) = (buf.width, buf.height);
    if w < MIN_W || h < MIN_H {
        buf.put_str(0, 0, "Terminal too small", w, MUTED, Cell::BASE_BG);
        return report;
    }

    let stage = state.stage();
    let body = body_rect(w, h);
    let focused = stage.focused(now);

    compose_header(buf, &mut report.hits, state);
    compose_footer(buf, &mut report.hits, state);

    let content = stage.content();
    // one path per link, mounted in link order
    for (path, link) in stage.paths().iter().zip(content.links) {
        compose_path(buf, &body, path, color(link.accent));
    }

    for card in content.cards.iter().chain(std::iter::once(&content.master)) {
        if stage.card_shown(card, now) {
            let r = compose_card(buf, &body, stage, card, now, focused == Some(Click::Select(card.key)));
            report.hits.push(r, Click::Select(card.key));
        }
    }

    for (i, metric) in content.metrics.iter().enumerate() {
        let (cx, cy) = anchor(&body, metric.pos);
        let r = centred(&body, cx, cy, METRIC_W, METRIC_H);
        let is_focused = focused == Some(Click::Select(metric.key));
        let accent = color(metric.accent);
        draw_box(buf, r, if is_focused { FOCUS } else { accent }, SURFACE, is_focused);
        let inner = (r.w as usize).saturating_sub(4);
        let (x, y) = (r.x as usize + 2, r.y as usize + 1);
        buf.put_str(x, y, metric.label, inner, MUTED, SURFACE);
        let counter = stage.counter(i);
        let value = counter.map_or(0, |c| c.display());
        // dim until the count starts
        let value_fg = match counter.map(|c| c.phase()) {
            Some(CounterPhase::Running | CounterPhase::Settled) => accent,
            _ => DIM,
        };
        buf.put_str(x, y + 1, &format!("{value}{}", metric.suffix), inner, value_fg, SURFACE);
        report.hits.push(r, Click::Select(metric.key));
        if body.encloses(&r, margin) {
            report.visible_metrics.push(i);
        }
    }

    for (i, beacon) in content.beacons.iter().enumerate() {
        if !stage.beacon_shown(i, now) {
            continue;
        }
        let (cx, cy) = anchor(&body, beacon.pos);
        let text = format!(" ◆ {} ", beacon.label);
        let len = text.chars().count();
        let r = centred(&body, cx, cy, len, 1);
        let amber = color(content::AMBER);
        let (fg, bg) = if focused == Some(Click::Beacon(i)) { (Cell::BASE_BG, FOCUS) } else { (amber, Cell::BASE_BG) };
        buf.put_str(r.x as usize, r.y as usize, &text, r.w as usize, fg, bg);
        report.hits.push(r, Click::Beacon(i));
    }

    if let Some(caption) = content.caption.filter(|_| stage.caption_shown(now)) {
        let (_, cy) = anchor(&body, Point::new(50.0, caption.y));
        let lines = wrap(caption.text, w.saturating_sub(8));
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            buf.put_str((w - len.min(w)) / 2, cy + row, line, w, MUTED, Cell::BASE_BG);
        }
    }

    // Overlays: info panel, then the context card above it.
    let overlay = stage.overlay();
    if let Some(panel) = overlay.info().and_then(|k| content.panel(k)) {
        compose_modal(buf, &mut report.hits, Layer::Info, panel.title, panel.body);
    }
    if let Some(card) = overlay.context() {
        compose_modal(buf, &mut report.hits, Layer::Context, card.title, card.body);
    }

    report
}

fn compose_header(buf: &mut FrameBuffer, hits: &mut HitMap, state: &PresentationState) {
    let w = buf.width;
    buf.put_str(1, 0, "SyncOne", w, BRAND, Cell::BASE_BG);
    buf.put_str(9, 0, "· Unified Retail Inventory", w, MUTED, Cell::BASE_BG);

    let current = state.step_index();
    let segments: Vec<String> = state
        .labels()
        .enumerate()
        .map(|(i, label)| {
            let mark = if i < current { '✓' } else if i == current { '●' } else { '○' };
            format!("{mark} {} {label}", i + 1)
        })
        .collect();
    const JOIN: &str = " ── ";
    let total: usize = segments.iter().map(|s| s.chars().count()).sum::<usize>()
        + JOIN.chars().count() * segments.len().saturating_sub(1);
    let mut x = w.saturating_sub(total) / 2;
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            let fg = if i <= current { BRAND } else { DIM };
            x += buf.put_str(x, 1, JOIN, w, fg, Cell::BASE_BG);
        }
        let fg = match i.cmp(&current) {
            std::cmp::Ordering::Less => MUTED,
            std::cmp::Ordering::Equal => TEXT,
            std::cmp::Ordering::Greater => DIM,
        };
        let n = buf.put_str(x, 1, seg, w, fg, Cell::BASE_BG);
        hits.push(Rect::new(x as u16, 1, n as u16, 1), Click::StepDot(i));
        x += n;
    }

    for x in 0..w {
        buf.set(x, 2, Cell::new('─', DIM, Cell::BASE_BG));
    }
}

fn compose_footer(buf: &mut FrameBuffer, hits: &mut HitMap, state: &PresentationState) {
    let (w, h) = (buf.width, buf.height);
    for x in 0..w {
        buf.set(x, h - 2, Cell::new('─', DIM, Cell::BASE_BG));
    }
    let y = h - 1;
    let counter = format!(" {} / {}", state.step_index() + 1, state.step_count());
    buf.put_str(0, y, &counter, w, TEXT, Cell::BASE_BG);

    let hint = "←/→ step · Tab focus · Enter open · Esc close · q quit";
    let hint_len = hint.chars().count();
    if w > hint_len + 30 {
        buf.put_str((w - hint_len) / 2, y, hint, w, DIM, Cell::BASE_BG);
    }

    if state.is_last_step() {
        let done = "✓ Complete ";
        buf.put_str(w - done.chars().count(), y, done, w, color(content::GREEN), Cell::BASE_BG);
    } else {
        let next = " NEXT STEP ▶ ";
        let len = next.chars().count();
        let x = w - len - 1;
        buf.put_str(x, y, next, len, Cell::BASE_BG, BRAND);
        hits.push(Rect::new(x as u16, y as u16, len as u16, 1), Click::Next);
    }
}

/// Draw the revealed part of a path, faded by its opacity.
fn compose_path(buf: &mut FrameBuffer, body: &Rect, path: &RevealPath, accent: Color) {
    if path.progress() <= 0.0 {
        return;
    }
    let fg = blend(Cell::BASE_BG, accent, path.opacity());

    let (a, b) = path.drawn_segment();
    let (x0, y0) = anchor(body, a);
    let (x1, y1) = anchor(body, b);
    let (dx, dy) = (x1 as i64 - x0 as i64, y1 as i64 - y0 as i64);
    // Cells are about twice as tall as wide.
    let glyph = if dy.abs() * 4 < dx.abs() {
        '─'
    } else if dx.abs() < dy.abs() {
        '│'
    } else if (dx > 0) == (dy > 0) {
        '╲'
    } else {
        '╱'
    };

    // Bresenham
    let (mut x, mut y) = (x0 as i64, y0 as i64);
    let (sx, sy) = (dx.signum(), dy.signum());
    let (adx, ady) = (dx.abs(), -dy.abs());
    let mut err = adx + ady;
    loop {
        buf.set(x as usize, y as usize, Cell::new(glyph, fg, Cell::BASE_BG));
        if x == x1 as i64 && y == y1 as i64 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= ady {
            err += ady;
            x += sx;
        }
        if e2 <= adx {
            err += adx;
            y += sy;
        }
    }
}

fn compose_card(
    buf: &mut FrameBuffer,
    body: &Rect,
    stage: &Stage,
    card: &Card,
    now: Duration,
    focused: bool,
) -> Rect {
    let accent = color(card.accent);
    let inner = CARD_W - 4;

    let mut lines: Vec<(String, Color)> = vec![
        (card.title.to_string(), accent),
        (card.subtitle.to_string(), TEXT),
    ];
    if !card.note.is_empty() {
        lines.push((card.note.to_string(), MUTED));
    }
    if let Some(badge) = card.badge {
        lines.push((format!("● {badge}"), accent));
    }
    if let (Some(gauge), Some(fill)) = (card.gauge, stage.gauge_fill(card, now)) {
        lines.push((format!("{}  {}", gauge.caption, gauge.status), MUTED));
        let bar_w = inner.saturating_sub(5);
        let filled = ((fill * bar_w as f64).round() as usize).min(bar_w);
        let pct = (fill * 100.0).round() as u32;
        lines.push((format!("{}{} {pct:>3}%", "█".repeat(filled), "░".repeat(bar_w - filled)), accent));
    }

    let (cx, cy) = anchor(body, card.pos);
    let r = centred(body, cx, cy, CARD_W, lines.len() + 2);
    draw_box(buf, r, if focused { FOCUS } else { accent }, SURFACE, focused);
    let rows = (r.h as usize).saturating_sub(2);
    for (i, (text, fg)) in lines.iter().take(rows).enumerate() {
        buf.put_str(r.x as usize + 2, r.y as usize + 1 + i, text, inner, *fg, SURFACE);
    }
    r
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Layer {
    Info,
    Context,
}

impl Layer {
    fn clicks(self) -> (Click, Click, Click) {
        match self {
            Layer::Info => (Click::InfoBackdrop, Click::InfoBody, Click::InfoClose),
            Layer::Context => (Click::ContextBackdrop, Click::ContextBody, Click::ContextClose),
        }
    }
}

fn compose_modal(buf: &mut FrameBuffer, hits: &mut HitMap, layer: Layer, title: &str, text: &str) {
    let (backdrop, body_click, close_click) = layer.clicks();
    let (w, h) = (buf.width, buf.height);
    let screen = Rect::new(0, 0, w as u16, h as u16);

    buf.fade_all();
    hits.push(screen, backdrop);

    let (heading, accent, max_w) = match layer {
        Layer::Info => ("DETAILS", BRAND, 64),
        Layer::Context => ("STRATEGIC CONTEXT", color(content::AMBER), 58),
    };
    let pw = max_w.min(w.saturating_sub(4));
    let inner = pw.saturating_sub(4);
    let lines = wrap(text, inner);
    let ph = (lines.len() + 6).min(h.saturating_sub(2));
    let r = centred(&screen, w / 2, h / 2, pw, ph);
    draw_box(buf, r, accent, PANEL, true);

    let (x, y) = (r.x as usize + 2, r.y as usize + 1);
    buf.put_str(x, y, heading, inner, accent, PANEL);
    buf.put_str(x, y + 1, title, inner, TEXT, PANEL);
    let room = (r.h as usize).saturating_sub(5);
    for (i, line) in lines.iter().take(room).enumerate() {
        buf.put_str(x, y + 3 + i, line, inner, MUTED, PANEL);
    }
    hits.push(r, body_click);

    let close = Rect::new(r.x + r.w - 5, r.y, 3, 1);
    buf.put_str(close.x as usize, close.y as usize, "[x]", 3, TEXT, PANEL);
    hits.push(close, close_click);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reveal::RevealMode;
    use crate::domain::spring::SpringCurve;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn insight() -> PresentationState {
        let mut s = PresentationState::new(SpringCurve::default(), ms(0));
        s.jump_to(2, ms(0));
        s
    }

    fn frame(state: &PresentationState, now: Duration) -> (FrameBuffer, FrameReport) {
        let mut buf = FrameBuffer::new(100, 30);
        let report = compose(&mut buf, state, now, 1);
        (buf, report)
    }

    fn row(buf: &FrameBuffer, y: usize) -> String {
        (0..buf.width).map(|x| buf.get(x, y).ch).collect()
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, ["one two", "three", "four five"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn metrics_are_clickable_and_reported_visible() {
        let s = insight();
        let (_, report) = frame(&s, ms(100));
        assert_eq!(report.visible_metrics, [0, 1, 2]);
        let body = body_rect(100, 30);
        let (cx, cy) = anchor(&body, Point::new(50.0, 62.0));
        assert_eq!(report.hits.resolve(cx as u16, cy as u16), Some(Click::Select("7-Day Demand")));
    }

    #[test]
    fn panel_body_and_backdrop_resolve_separately() {
        let mut s = insight();
        s.click(Click::Select("7-Day Demand"), ms(100));
        let (buf, report) = frame(&s, ms(100));
        assert_eq!(report.hits.resolve(50, 15), Some(Click::InfoBody));
        assert_eq!(report.hits.resolve(0, 0), Some(Click::InfoBackdrop));
        assert_eq!(report.hits.resolve(99, 29), Some(Click::InfoBackdrop));
        assert!((0..buf.height).any(|y| row(&buf, y).contains("7-Day Demand")));
    }

    #[test]
    fn context_overlay_sits_above_info_panel() {
        let mut s = insight();
        s.click(Click::Select("risk"), ms(2000));
        s.click(Click::Beacon(0), ms(2000));
        let (_, report) = frame(&s, ms(2000));
        assert_eq!(report.hits.resolve(50, 15), Some(Click::ContextBody));
        assert_eq!(report.hits.resolve(0, 0), Some(Click::ContextBackdrop));
    }

    #[test]
    fn close_control_resolves_to_close() {
        let mut s = insight();
        s.click(Click::Select("Current Stock"), ms(0));
        let (buf, report) = frame(&s, ms(0));
        let (y, line) = (0..buf.height)
            .map(|y| (y, row(&buf, y)))
            .find(|(_, l)| l.contains("[x]"))
            .unwrap_or_default();
        let x = line.chars().position(|c| c == '[').unwrap_or_default();
        assert_eq!(report.hits.resolve(x as u16 + 1, y as u16), Some(Click::InfoClose));
    }

    #[test]
    fn header_dots_jump_and_footer_shows_progress() {
        let s = insight();
        let (buf, report) = frame(&s, ms(0));
        let header = row(&buf, 1);
        let x = header.chars().position(|c| c == '4').unwrap_or_default();
        assert_eq!(report.hits.resolve(x as u16, 1), Some(Click::StepDot(3)));
        assert!(row(&buf, 29).contains("3 / 5"));
        assert!(row(&buf, 29).contains("NEXT STEP"));
    }

    #[test]
    fn last_step_shows_complete_and_no_next() {
        let mut s = insight();
        s.jump_to(4, ms(0));
        let (buf, report) = frame(&s, ms(0));
        assert!(row(&buf, 29).contains("✓ Complete"));
        assert!((0..100).all(|x| report.hits.resolve(x, 29) != Some(Click::Next)));
    }

    #[test]
    fn cards_and_beacons_wait_for_their_entrance() {
        let s = PresentationState::new(SpringCurve::default(), ms(0));
        let (_, early) = frame(&s, ms(0));
        let (_, late) = frame(&s, ms(3000));
        let count = |r: &FrameReport, c: Click| {
            (0..30).flat_map(|y| (0..100).map(move |x| (x, y))).any(|(x, y)| r.hits.resolve(x, y) == Some(c))
        };
        assert!(count(&early, Click::Select("Store A")));
        assert!(!count(&early, Click::Select("ONDC")));
        assert!(!count(&early, Click::Beacon(0)));
        assert!(count(&late, Click::Select("ONDC")));
        assert!(count(&late, Click::Beacon(1)));
    }

    #[test]
    fn metric_value_lights_up_once_counting_starts() {
        let mut s = insight();
        let metric = s.stage().content().metrics.iter().find(|m| m.key == "7-Day Demand").copied();
        let Some(metric) = metric else { panic!("Insight has no 7-Day Demand metric") };
        let value_fg = |buf: &FrameBuffer| {
            let (y, line) = (0..buf.height)
                .map(|y| (y, row(buf, y)))
                .find(|(_, l)| l.contains(metric.label))
                .unwrap_or_default();
            let x = line.find(metric.label).map_or(0, |i| line[..i].chars().count());
            buf.get(x, y + 1).fg
        };

        let (buf, report) = frame(&s, ms(100));
        assert_eq!(value_fg(&buf), DIM);
        s.report_visible(&report.visible_metrics, ms(100));
        s.tick(ms(1000));
        s.tick(ms(5000));
        let (buf, _) = frame(&s, ms(5000));
        assert_eq!(value_fg(&buf), color(metric.accent));
    }

    #[test]
    fn paths_sharing_endpoints_keep_their_own_accent() {
        let body = body_rect(100, 30);
        let (from, to) = (Point::new(10.0, 10.0), Point::new(90.0, 10.0));
        let mut path = RevealPath::new(from, to, RevealMode::Full, Duration::ZERO, Duration::ZERO);
        path.activate(ms(0));
        path.advance(ms(1));
        let (x, y) = anchor(&body, from);
        for accent in [BRAND, FOCUS] {
            let mut buf = FrameBuffer::new(100, 30);
            compose_path(&mut buf, &body, &path, accent);
            assert_eq!(buf.get(x, y).fg, accent);
        }
    }

    #[test]
    fn tiny_terminal_composes_nothing_clickable() {
        let s = insight();
        let mut buf = FrameBuffer::new(20, 5);
        let report = compose(&mut buf, &s, ms(0), 1);
        assert!(report.hits.is_empty());
        assert!(report.visible_metrics.is_empty());
    }
}
