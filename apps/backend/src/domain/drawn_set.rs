//! The set of numbers already drawn in a round.

use crate::domain::rules::{is_valid_number, MAX_NUMBER};

/// Bitset over `1..=75`; bit `n` set means ball `n` has been drawn.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct DrawnSet(u128);

impl DrawnSet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Returns false when `n` was already present or is out of range.
    pub fn insert(&mut self, n: u8) -> bool {
        if !is_valid_number(n) || self.contains(n) {
            return false;
        }
        self.0 |= 1u128 << n;
        true
    }

    pub fn contains(&self, n: u8) -> bool {
        is_valid_number(n) && self.0 & (1u128 << n) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_exhausted(&self) -> bool {
        self.len() == MAX_NUMBER as usize
    }

    /// Drawn numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MAX_NUMBER).filter(move |n| self.contains(*n))
    }

    /// Numbers still in the pool, ascending.
    pub fn remaining(&self) -> Vec<u8> {
        (1..=MAX_NUMBER).filter(|n| !self.contains(*n)).collect()
    }
}

impl FromIterator<u8> for DrawnSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = DrawnSet::new();
        for n in iter {
            set.insert(n);
        }
        set
    }
}

impl Extend<u8> for DrawnSet {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        for n in iter {
            self.insert(n);
        }
    }
}
