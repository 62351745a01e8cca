//! Ball inventory: ball value -> count.
//!
//! A value whose count drops to zero is removed, so "absent" and "zero"
//! both read as unavailable. Counts never go negative.

use std::collections::BTreeMap;

use divisible_core::constants::BALL_VALUES;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: BTreeMap<u32, u32>,
}

impl Inventory {
    pub fn from_counts(counts: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            counts: counts.into_iter().filter(|&(_, count)| count > 0).collect(),
        }
    }

    pub fn count(&self, value: u32) -> u32 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Take one ball of `value`. Returns the remaining count, or `None`
    /// (and changes nothing) if none are available.
    pub fn take(&mut self, value: u32) -> Option<u32> {
        let count = self.counts.get_mut(&value)?;
        if *count == 0 {
            return None;
        }
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.remove(&value);
        }
        Some(remaining)
    }

    /// Add `amount` balls of `value`, returning the new count.
    pub fn credit(&mut self, value: u32, amount: u32) -> u32 {
        if amount == 0 {
            return self.count(value);
        }
        let count = self.counts.entry(value).or_insert(0);
        *count = count.saturating_add(amount);
        *count
    }

    /// Counts for every throwable value, zeros included, in ascending order.
    pub fn view(&self) -> Vec<(u32, u32)> {
        BALL_VALUES.iter().map(|&v| (v, self.count(v))).collect()
    }
}
