/// Hit map: screen regions recorded while composing a frame.
///
/// Regions are pushed in paint order. A point resolves to the LAST region
/// pushed that contains it, so whatever was drawn on top wins, the same way
/// the eye sees it.

use crate::sim::event::Click;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Rect { x, y, w, h }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.w
            && (y - self.y) < self.h
    }

    /// True if `inner` lies entirely inside `self` shrunk by `margin` on every side.
    pub fn encloses(&self, inner: &Rect, margin: u16) -> bool {
        let left = self.x.saturating_add(margin);
        let top = self.y.saturating_add(margin);
        let right = (self.x + self.w).saturating_sub(margin);
        let bottom = (self.y + self.h).saturating_sub(margin);
        inner.w > 0
            && inner.h > 0
            && inner.x >= left
            && inner.y >= top
            && inner.x + inner.w <= right
            && inner.y + inner.h <= bottom
    }
}

#[derive(Default, Debug)]
pub struct HitMap {
    regions: Vec<(Rect, Click)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect, click: Click) {
        if rect.w > 0 && rect.h > 0 {
            self.regions.push((rect, click));
        }
    }

    pub fn resolve(&self, x: u16, y: u16) -> Option<Click> {
        self.regions
            .iter()
            .rev()
            .find(|(r, _)| r.contains(x, y))
            .map(|(_, c)| *c)
    }
}

#[cfg(test)]
impl HitMap {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
