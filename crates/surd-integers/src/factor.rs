//! Integer factorization by trial division.
//!
//! Factorization first divides by every prime in a sieved table. If a
//! cofactor remains that the table cannot prove prime, trial division
//! continues over `6k ± 1` candidates up to the configured limit. Anything
//! still unresolved after that is reported as `FactorizationOverflow`; a
//! partial factorization is never returned.

use num_traits::{One, Zero};
use tracing::{trace, warn};

use crate::error::{Result, SurdError};
use crate::multiset::PrimeMultiset;
use crate::primes::{FactorizerConfig, PrimeTable};
use crate::Integer;

/// Trial-division factorizer over a prime table.
#[derive(Clone, Debug)]
pub struct PrimeFactorizer<'t> {
    table: TableRef<'t>,
    trial_limit: u64,
}

#[derive(Clone, Debug)]
enum TableRef<'t> {
    Shared(&'t PrimeTable),
    Owned(PrimeTable),
}

impl TableRef<'_> {
    fn get(&self) -> &PrimeTable {
        match self {
            TableRef::Shared(t) => t,
            TableRef::Owned(t) => t,
        }
    }
}

impl PrimeFactorizer<'static> {
    /// Factorizer over the process-wide default table.
    #[must_use]
    pub fn global() -> Self {
        Self {
            table: TableRef::Shared(PrimeTable::global()),
            trial_limit: FactorizerConfig::default().trial_limit,
        }
    }

    /// Factorizer with its own table built from `config`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `config.table_bound` exceeds
    /// [`FactorizerConfig::MAX_TABLE_BOUND`].
    pub fn with_config(config: &FactorizerConfig) -> Result<Self> {
        if config.table_bound > FactorizerConfig::MAX_TABLE_BOUND {
            return Err(SurdError::malformed(format!(
                "prime table bound {} exceeds {}",
                config.table_bound,
                FactorizerConfig::MAX_TABLE_BOUND
            )));
        }
        Ok(Self {
            table: TableRef::Owned(PrimeTable::sieve(config.table_bound)),
            trial_limit: config.trial_limit,
        })
    }
}

impl<'t> PrimeFactorizer<'t> {
    /// Factorizer over a caller-owned table.
    #[must_use]
    pub fn with_table(table: &'t PrimeTable, trial_limit: u64) -> Self {
        Self {
            table: TableRef::Shared(table),
            trial_limit,
        }
    }

    /// The table this factorizer divides by.
    #[must_use]
    pub fn table(&self) -> &PrimeTable {
        self.table.get()
    }

    /// Factorizes a non-negative integer.
    ///
    /// `0` yields the zero sentinel and `1` the empty multiset.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` for negative input.
    /// - `FactorizationOverflow` when the cofactor is beyond reach.
    pub fn factorize(&self, n: &Integer) -> Result<PrimeMultiset> {
        if n.is_negative() {
            return Err(SurdError::malformed(format!(
                "cannot factorize negative integer {n}"
            )));
        }
        if n.is_zero() {
            return Ok(PrimeMultiset::zero_sentinel());
        }
        match n.to_u64() {
            Some(small) => self.factorize_u64(small),
            None => self.factorize_big(n.clone()),
        }
    }

    /// Factorizes a machine-word integer.
    ///
    /// # Errors
    ///
    /// Returns `FactorizationOverflow` when the cofactor is beyond reach.
    pub fn factorize_u64(&self, n: u64) -> Result<PrimeMultiset> {
        if n == 0 {
            return Ok(PrimeMultiset::zero_sentinel());
        }
        let mut factors = PrimeMultiset::new();
        let mut rest = n;

        for &p in self.table().primes() {
            if p.saturating_mul(p) > rest {
                break;
            }
            while rest % p == 0 {
                factors.insert(p);
                rest /= p;
            }
        }
        if rest == 1 {
            return Ok(factors);
        }
        if self.proven_prime(rest) {
            factors.insert(rest);
            return Ok(factors);
        }

        let rest = self.extend_search(&mut factors, rest)?;
        if rest != 1 {
            factors.insert(rest);
        }
        Ok(factors)
    }

    /// Returns true if `n` is prime.
    ///
    /// # Errors
    ///
    /// Returns `FactorizationOverflow` when primality cannot be decided
    /// within the trial limit.
    pub fn is_prime(&self, n: u64) -> Result<bool> {
        if n < 2 {
            return Ok(false);
        }
        let factors = self.factorize_u64(n)?;
        Ok(factors.len() == 1 && factors.count(n) == 1)
    }

    fn factorize_big(&self, mut rest: Integer) -> Result<PrimeMultiset> {
        let mut factors = PrimeMultiset::new();
        for &p in self.table().primes() {
            while rest.is_divisible_by(p) {
                factors.insert(p);
                rest = rest.div_u64(p);
            }
            if let Some(small) = rest.to_u64() {
                trace!(prime = p, "cofactor fits a machine word");
                factors.extend(&self.factorize_u64(small)?);
                return Ok(factors);
            }
        }

        for p in self.wheel_primes_missing() {
            while rest.is_divisible_by(p) {
                factors.insert(p);
                rest = rest.div_u64(p);
            }
        }

        let mut candidate = self.first_candidate();
        while candidate <= self.trial_limit {
            while rest.is_divisible_by(candidate) {
                factors.insert(candidate);
                rest = rest.div_u64(candidate);
            }
            if let Some(small) = rest.to_u64() {
                factors.extend(&self.factorize_u64(small)?);
                return Ok(factors);
            }
            candidate = next_candidate(candidate);
        }

        if rest.is_one() {
            return Ok(factors);
        }
        warn!(cofactor = %rest, limit = self.trial_limit, "factorization overflow");
        Err(SurdError::FactorizationOverflow { cofactor: rest })
    }

    /// Continues trial division past the table. Returns the remaining
    /// cofactor, which is either 1 or prime.
    fn extend_search(&self, factors: &mut PrimeMultiset, mut rest: u64) -> Result<u64> {
        for p in self.wheel_primes_missing() {
            while rest % p == 0 {
                factors.insert(p);
                rest /= p;
            }
        }
        if rest == 1 {
            return Ok(1);
        }

        let mut candidate = self.first_candidate();
        trace!(cofactor = rest, from = candidate, "extending trial division past the table");

        while candidate <= self.trial_limit {
            if candidate.saturating_mul(candidate) > rest {
                return Ok(rest);
            }
            while rest % candidate == 0 {
                factors.insert(candidate);
                rest /= candidate;
            }
            if rest == 1 {
                return Ok(1);
            }
            candidate = next_candidate(candidate);
        }

        if candidate.saturating_mul(candidate) > rest {
            return Ok(rest);
        }
        warn!(cofactor = rest, limit = self.trial_limit, "factorization overflow");
        Err(SurdError::FactorizationOverflow {
            cofactor: Integer::from(rest),
        })
    }

    /// A cofactor with no divisor up to the table's largest prime is prime
    /// when it is below that prime squared.
    fn proven_prime(&self, rest: u64) -> bool {
        match self.table().largest() {
            Some(p) => p.saturating_mul(p) > rest || self.table().contains(rest),
            None => rest < 4,
        }
    }

    /// 2 and 3 are skipped by the `6k ± 1` wheel, so a table too small to
    /// hold them needs them tried separately.
    fn wheel_primes_missing(&self) -> impl Iterator<Item = u64> + '_ {
        [2, 3].into_iter().filter(move |&p| !self.table().contains(p))
    }

    /// Smallest `6k ± 1` candidate above the table.
    fn first_candidate(&self) -> u64 {
        let mut c = self.table().largest().map_or(5, |p| p + 1).max(5);
        while c % 6 != 1 && c % 6 != 5 {
            c += 1;
        }
        c
    }
}

fn next_candidate(c: u64) -> u64 {
    if c % 6 == 5 {
        c + 2
    } else {
        c + 4
    }
}

/// Factorizes `n` with the process-wide default factorizer.
///
/// # Errors
///
/// See [`PrimeFactorizer::factorize`].
pub fn factorize(n: &Integer) -> Result<PrimeMultiset> {
    PrimeFactorizer::global().factorize(n)
}

/// Factorizes a machine-word integer with the default factorizer.
///
/// # Errors
///
/// See [`PrimeFactorizer::factorize_u64`].
pub fn factorize_u64(n: u64) -> Result<PrimeMultiset> {
    PrimeFactorizer::global().factorize_u64(n)
}
