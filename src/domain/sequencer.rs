/// Step sequencer: the single source of truth for which step is active.
///
/// The index starts at 0 and is always within `[0, total - 1]`. `advance`
/// saturates at the last step; `jump_to` clamps out-of-range requests.
/// Operations report a `StepChange` only when the index actually moved, so
/// the owner knows when to tear down and rebuild step content.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StepChange {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Debug)]
pub struct StepSequencer {
    index: usize,
    total: usize,
}

impl StepSequencer {
    /// A sequencer over `total` steps. Zero is treated as one step.
    pub fn new(total: usize) -> Self {
        StepSequencer { index: 0, total: total.max(1) }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }

    pub fn advance(&mut self) -> Option<StepChange> {
        if self.is_last() {
            return None;
        }
        self.set(self.index + 1)
    }

    /// Step back one, saturating at the first step.
    pub fn back(&mut self) -> Option<StepChange> {
        self.set(self.index.saturating_sub(1))
    }

    /// Jump to `n`, clamped to the last step.
    pub fn jump_to(&mut self, n: usize) -> Option<StepChange> {
        self.set(n.min(self.total - 1))
    }

    fn set(&mut self, to: usize) -> Option<StepChange> {
        if to == self.index {
            return None;
        }
        let change = StepChange { from: self.index, to };
        self.index = to;
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let s = StepSequencer::new(5);
        assert_eq!(s.index(), 0);
        assert_eq!(s.total(), 5);
        assert!(!s.is_last());
    }

    #[test]
    fn advance_saturates_at_last() {
        let mut s = StepSequencer::new(5);
        for i in 1..5 {
            assert_eq!(s.advance(), Some(StepChange { from: i - 1, to: i }));
        }
        assert_eq!(s.index(), 4);
        assert!(s.is_last());
        assert_eq!(s.advance(), None);
        assert_eq!(s.index(), 4);
    }

    #[test]
    fn advance_total_times_never_wraps() {
        let mut s = StepSequencer::new(5);
        for _ in 0..5 {
            s.advance();
        }
        assert_eq!(s.index(), 4);
    }

    #[test]
    fn jump_to_every_valid_index() {
        let mut s = StepSequencer::new(5);
        for n in [3, 0, 4, 1, 2] {
            s.jump_to(n);
            assert_eq!(s.index(), n);
        }
    }

    #[test]
    fn jump_out_of_range_clamps() {
        let mut s = StepSequencer::new(5);
        assert_eq!(s.jump_to(5), Some(StepChange { from: 0, to: 4 }));
        assert_eq!(s.index(), 4);
        assert_eq!(s.jump_to(usize::MAX), None);
        assert_eq!(s.index(), 4);
    }

    #[test]
    fn jump_to_current_is_noop() {
        let mut s = StepSequencer::new(5);
        s.jump_to(2);
        assert_eq!(s.jump_to(2), None);
    }

    #[test]
    fn back_saturates_at_first() {
        let mut s = StepSequencer::new(5);
        assert_eq!(s.back(), None);
        s.jump_to(2);
        assert_eq!(s.back(), Some(StepChange { from: 2, to: 1 }));
    }

    #[test]
    fn zero_total_is_one_step() {
        let mut s = StepSequencer::new(0);
        assert_eq!(s.total(), 1);
        assert!(s.is_last());
        assert_eq!(s.advance(), None);
        assert_eq!(s.jump_to(3), None);
    }
}
