//! Focus and stacking policy.
//!
//! Stacking values come from a single process-wide counter that only moves
//! forward: every open or focus takes a value strictly greater than anything
//! handed out before, so the most recently touched window is always on top
//! and two windows never tie. The counter is a `u64` and is never compacted.

use super::{WindowId, WindowRecord};
use crate::constants::INITIAL_STACKING;

#[derive(Debug, Clone)]
pub struct StackingCounter {
    highest: u64,
}

impl Default for StackingCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl StackingCounter {
    pub fn new() -> Self {
        Self {
            highest: INITIAL_STACKING,
        }
    }

    /// Highest value allocated so far (or the initial value if none).
    pub fn highest(&self) -> u64 {
        self.highest
    }

    pub fn allocate(&mut self) -> u64 {
        self.highest = self.highest.saturating_add(1);
        self.highest
    }
}

/// The window that should be active: the open record with the greatest
/// stacking value, or `None` when nothing is open.
pub fn elect_active<'a, I>(records: I) -> Option<WindowId>
where
    I: IntoIterator<Item = &'a WindowRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_open)
        .max_by_key(|record| record.z_index)
        .map(|record| record.id)
}
