//! Prime tables.
//!
//! A `PrimeTable` is an ascending list of every prime up to a bound,
//! produced by a sieve of Eratosthenes. The default table is built once on
//! first use and shared read-only by the whole process.

use std::sync::OnceLock;

use tracing::debug;

/// Configuration for prime tables and the trial-division factorizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactorizerConfig {
    /// Sieve every prime up to and including this value.
    pub table_bound: u64,
    /// Largest trial divisor tried once the table is exhausted.
    ///
    /// Inputs whose cofactor is still unresolved past this divisor fail with
    /// `FactorizationOverflow`.
    pub trial_limit: u64,
}

impl FactorizerConfig {
    /// Largest accepted `table_bound`.
    ///
    /// The sieve holds one flag per integer up to the bound, so this keeps a
    /// table under 256 MiB.
    pub const MAX_TABLE_BOUND: u64 = 1 << 28;
}

impl Default for FactorizerConfig {
    fn default() -> Self {
        Self {
            table_bound: 1 << 16,
            trial_limit: 1 << 24,
        }
    }
}

/// An immutable, ascending table of primes.
#[derive(Clone, Debug)]
pub struct PrimeTable {
    primes: Vec<u64>,
    bound: u64,
}

static DEFAULT_TABLE: OnceLock<PrimeTable> = OnceLock::new();

impl PrimeTable {
    /// Sieves every prime `<= bound`.
    ///
    /// Bounds above [`FactorizerConfig::MAX_TABLE_BOUND`] are clamped to it.
    #[must_use]
    pub fn sieve(bound: u64) -> Self {
        let bound = bound.min(FactorizerConfig::MAX_TABLE_BOUND);
        let Ok(len) = usize::try_from(bound) else {
            return Self::sieve(u64::from(u8::MAX));
        };
        if len < 2 {
            return Self {
                primes: Vec::new(),
                bound,
            };
        }

        let mut composite = vec![false; len + 1];
        let mut primes = Vec::new();
        for n in 2..=len {
            if composite[n] {
                continue;
            }
            primes.push(n as u64);
            let mut multiple = n.saturating_mul(n);
            while multiple <= len {
                composite[multiple] = true;
                multiple += n;
            }
        }

        Self { primes, bound }
    }

    /// Returns the process-wide table built from `FactorizerConfig::default()`.
    ///
    /// The first caller builds it; concurrent first calls block until it is
    /// ready and all of them observe the same table.
    pub fn global() -> &'static Self {
        DEFAULT_TABLE.get_or_init(|| {
            let bound = FactorizerConfig::default().table_bound;
            let table = Self::sieve(bound);
            debug!(bound, primes = table.len(), "prime table initialised");
            table
        })
    }

    /// The primes in ascending order.
    #[must_use]
    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    /// The sieve bound this table was built with.
    #[must_use]
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Number of primes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    /// Returns true if the table holds no primes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// The largest prime in the table, if any.
    #[must_use]
    pub fn largest(&self) -> Option<u64> {
        self.primes.last().copied()
    }

    /// Returns true if `n` is a prime listed in this table.
    #[must_use]
    pub fn contains(&self, n: u64) -> bool {
        self.primes.binary_search(&n).is_ok()
    }
}
