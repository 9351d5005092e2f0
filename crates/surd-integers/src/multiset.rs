//! Prime multisets.
//!
//! A `PrimeMultiset` stands for the product of its members. The empty
//! multiset is 1. A multiset holding the sentinel `0` is "zero" in a
//! numerator and "undefined" in a denominator; while the sentinel is present
//! no other factors are kept.

use std::collections::BTreeMap;
use std::fmt;

use num_traits::{One, Zero};

use crate::Integer;

/// The sentinel member marking a zero (or undefined) product.
pub const ZERO_SENTINEL: u64 = 0;

/// An unordered collection of primes with repetition.
///
/// Stored as prime → multiplicity, so two multisets compare equal exactly
/// when they hold the same primes the same number of times.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimeMultiset {
    counts: BTreeMap<u64, u32>,
}

impl PrimeMultiset {
    /// The empty multiset (product 1).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The multiset holding only the zero sentinel.
    #[must_use]
    pub fn zero_sentinel() -> Self {
        let mut counts = BTreeMap::new();
        counts.insert(ZERO_SENTINEL, 1);
        Self { counts }
    }

    /// Builds a multiset from a list of primes, repetitions included.
    pub fn from_primes(primes: impl IntoIterator<Item = u64>) -> Self {
        let mut set = Self::new();
        for p in primes {
            set.insert(p);
        }
        set
    }

    /// Returns true if this multiset is the zero sentinel.
    #[must_use]
    pub fn is_zero_sentinel(&self) -> bool {
        self.counts.contains_key(&ZERO_SENTINEL)
    }

    /// Returns true if the multiset is empty (product 1).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of members, counting repetitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.values().map(|&c| c as usize).sum()
    }

    /// Multiplicity of `prime`.
    #[must_use]
    pub fn count(&self, prime: u64) -> u32 {
        self.counts.get(&prime).copied().unwrap_or(0)
    }

    /// Distinct members with their multiplicities, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.counts.iter().map(|(&p, &c)| (p, c))
    }

    /// Distinct members, ascending.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.keys().copied()
    }

    /// Adds one occurrence of `prime`.
    pub fn insert(&mut self, prime: u64) {
        self.insert_many(prime, 1);
    }

    /// Adds `times` occurrences of `prime`.
    ///
    /// Inserting the sentinel collapses the multiset to the sentinel.
    pub fn insert_many(&mut self, prime: u64, times: u32) {
        if times == 0 || self.is_zero_sentinel() {
            return;
        }
        if prime == ZERO_SENTINEL {
            *self = Self::zero_sentinel();
            return;
        }
        *self.counts.entry(prime).or_insert(0) += times;
    }

    /// Removes up to `times` occurrences of `prime`, returning how many were removed.
    pub fn remove_many(&mut self, prime: u64, times: u32) -> u32 {
        let Some(count) = self.counts.get_mut(&prime) else {
            return 0;
        };
        let removed = times.min(*count);
        *count -= removed;
        if *count == 0 {
            self.counts.remove(&prime);
        }
        removed
    }

    /// Adds every member of `other`.
    pub fn extend(&mut self, other: &Self) {
        for (p, c) in other.iter() {
            self.insert_many(p, c);
        }
    }

    /// Multiset union with repetition (the product of both).
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.extend(other);
        out
    }

    /// Members of `self` left over after removing one match per member of `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (p, c) in other.iter() {
            out.remove_many(p, c);
        }
        out
    }

    /// Replicates every member `times` times; `None` if a multiplicity overflows.
    #[must_use]
    pub fn repeated(&self, times: u32) -> Option<Self> {
        if times == 0 {
            return Some(Self::new());
        }
        if self.is_zero_sentinel() {
            return Some(self.clone());
        }
        let mut counts = BTreeMap::new();
        for (p, c) in self.iter() {
            counts.insert(p, c.checked_mul(times)?);
        }
        Some(Self { counts })
    }

    /// The product of the members.
    #[must_use]
    pub fn product(&self) -> Integer {
        if self.is_zero_sentinel() {
            return Integer::zero();
        }
        self.iter()
            .fold(Integer::one(), |acc, (p, c)| acc * Integer::from(p).pow(c))
    }
}

impl fmt::Debug for PrimeMultiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.iter()
                    .flat_map(|(p, c)| std::iter::repeat(p).take(c as usize)),
            )
            .finish()
    }
}

impl FromIterator<u64> for PrimeMultiset {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self::from_primes(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_irrelevant_equality() {
        let a = PrimeMultiset::from_primes([2, 3, 2, 5]);
        let b = PrimeMultiset::from_primes([5, 2, 2, 3]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.count(2), 2);
        assert_eq!(a.product().to_i64(), Some(60));
    }

    #[test]
    fn test_empty_is_one() {
        let one = PrimeMultiset::new();
        assert!(one.is_empty());
        assert_eq!(one.product().to_i64(), Some(1));
    }

    #[test]
    fn test_sentinel_absorbs() {
        let mut set = PrimeMultiset::from_primes([2, 3]);
        set.insert(ZERO_SENTINEL);
        assert!(set.is_zero_sentinel());
        set.insert(7);
        assert_eq!(set, PrimeMultiset::zero_sentinel());
        assert_eq!(set.product().to_i64(), Some(0));
    }

    #[test]
    fn test_difference_and_union() {
        let a = PrimeMultiset::from_primes([2, 2, 3]);
        let b = PrimeMultiset::from_primes([2, 5]);
        assert_eq!(a.difference(&b), PrimeMultiset::from_primes([2, 3]));
        assert_eq!(b.difference(&a), PrimeMultiset::from_primes([5]));
        assert_eq!(a.union(&b), PrimeMultiset::from_primes([2, 2, 2, 3, 5]));
    }

    #[test]
    fn test_repeated() {
        let a = PrimeMultiset::from_primes([2, 3]);
        let cubed = a.repeated(3).unwrap();
        assert_eq!(cubed.product().to_i64(), Some(216));
        assert!(a.repeated(0).unwrap().is_empty());
    }

    #[test]
    fn test_debug_lists_members() {
        let a = PrimeMultiset::from_primes([3, 2, 2]);
        assert_eq!(format!("{a:?}"), "[2, 2, 3]");
    }
}
