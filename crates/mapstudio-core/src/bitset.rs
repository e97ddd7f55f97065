// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-width flag sets ("groups") packed into `u32` words.
use core::ops::{BitAnd, BitOr, Sub};

use thiserror::Error;

/// A flag did not fit the declared group width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("flag {flag} does not fit a {width}-bit group")]
pub struct FlagOutOfRange {
    /// Offending flag index.
    pub flag: u32,
    /// Declared width in bits.
    pub width: u32,
}

/// Decoded set of group flags.
///
/// The set itself is unbounded; the width is enforced at the codec boundary
/// by [`GroupBitSet::encode`] and [`GroupBitSet::decode`]. Trailing zero words
/// are trimmed so equal sets compare equal regardless of how they were built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupBitSet {
    words: Vec<u32>,
}

impl GroupBitSet {
    /// Empty set.
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Builds a set from flag indices.
    pub fn from_flags(flags: impl IntoIterator<Item = u32>) -> Self {
        let mut set = Self::new();
        for flag in flags {
            set.insert(flag);
        }
        set
    }

    /// Adds `flag`; returns `true` if it was newly inserted.
    pub fn insert(&mut self, flag: u32) -> bool {
        let (word, bit) = split(flag);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        let fresh = self.words[word] & bit == 0;
        self.words[word] |= bit;
        fresh
    }

    /// Removes `flag`; returns `true` if it was present.
    pub fn remove(&mut self, flag: u32) -> bool {
        let (word, bit) = split(flag);
        let Some(slot) = self.words.get_mut(word) else {
            return false;
        };
        let present = *slot & bit != 0;
        *slot &= !bit;
        self.trim();
        present
    }

    /// Returns `true` if `flag` is set.
    pub fn contains(&self, flag: u32) -> bool {
        let (word, bit) = split(flag);
        self.words.get(word).is_some_and(|w| w & bit != 0)
    }

    /// Returns `true` if no flag is set.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of set flags.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Flags present in either set.
    pub fn union(&self, other: &Self) -> Self {
        let len = self.words.len().max(other.words.len());
        let words = (0..len)
            .map(|i| word_at(&self.words, i) | word_at(&other.words, i))
            .collect();
        Self::from_words(words)
    }

    /// Flags present in `self` but not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let words = self
            .words
            .iter()
            .enumerate()
            .map(|(i, w)| w & !word_at(&other.words, i))
            .collect();
        Self::from_words(words)
    }

    /// Flags present in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let words = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| a & b)
            .collect();
        Self::from_words(words)
    }

    /// Set flags in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            (0..32u32).filter_map(move |bit| {
                (word & (1 << bit) != 0).then(|| word_index(i) * 32 + bit)
            })
        })
    }

    /// Packs the set into exactly `width.div_ceil(32)` words.
    ///
    /// # Errors
    /// [`FlagOutOfRange`] for the first flag `>= width`; nothing is truncated.
    pub fn encode(&self, width: u32) -> Result<Vec<u32>, FlagOutOfRange> {
        if let Some(flag) = self.iter().find(|&f| f >= width) {
            return Err(FlagOutOfRange { flag, width });
        }
        let mut words = self.words.clone();
        words.resize(width.div_ceil(32) as usize, 0);
        Ok(words)
    }

    /// Unpacks `words`, dropping any bit at or beyond `width`.
    pub fn decode(words: &[u32], width: u32) -> Self {
        let full = (width / 32) as usize;
        let rem = width % 32;
        let words = words
            .iter()
            .enumerate()
            .filter_map(|(i, &w)| match i.cmp(&full) {
                core::cmp::Ordering::Less => Some(w),
                core::cmp::Ordering::Equal if rem > 0 => Some(w & ((1u32 << rem) - 1)),
                _ => None,
            })
            .collect();
        Self::from_words(words)
    }

    fn from_words(words: Vec<u32>) -> Self {
        let mut set = Self { words };
        set.trim();
        set
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

fn split(flag: u32) -> (usize, u32) {
    ((flag / 32) as usize, 1 << (flag % 32))
}

fn word_at(words: &[u32], i: usize) -> u32 {
    words.get(i).copied().unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation)]
fn word_index(i: usize) -> u32 {
    // Word indices come from flags that were u32 to begin with.
    i as u32
}

impl BitOr for &GroupBitSet {
    type Output = GroupBitSet;

    fn bitor(self, rhs: Self) -> GroupBitSet {
        self.union(rhs)
    }
}

impl Sub for &GroupBitSet {
    type Output = GroupBitSet;

    fn sub(self, rhs: Self) -> GroupBitSet {
        self.difference(rhs)
    }
}

impl BitAnd for &GroupBitSet {
    type Output = GroupBitSet;

    fn bitand(self, rhs: Self) -> GroupBitSet {
        self.intersection(rhs)
    }
}

impl FromIterator<u32> for GroupBitSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from_flags(iter)
    }
}
