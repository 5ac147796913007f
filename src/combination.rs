//! Combination counts used to price "champ" wagers.
//!
//! A wager type whose core selection size is `k`, played over a pool of `n`
//! runners, stands for `P(n, k)` tickets when order matters and `C(n, k)`
//! otherwise. All arithmetic is checked; overflow is an error.

use crate::catalog::{self, BetTypeCatalog, CatalogCell};
use crate::dto::WagerTypeDefinition;
use crate::error::{BetError, Result};
use tracing::debug;

/// `n · (n − 1) · … · (n − k + 1)`; `0` when `k > n`.
pub fn permutations(n: u64, k: u64) -> Result<u64> {
    if k > n {
        return Ok(0);
    }
    (0..k).try_fold(1u64, |acc, i| {
        acc.checked_mul(n - i)
            .ok_or(BetError::CombinationOverflow { n, k })
    })
}

/// `n! / (k! (n − k)!)`; `0` when `k > n`.
pub fn combinations(n: u64, k: u64) -> Result<u64> {
    if k > n {
        return Ok(0);
    }
    let r = k.min(n - k);
    // c(i + 1) = c(i) * (n - i) / (i + 1) is exact at every step
    (0..r).try_fold(1u64, |acc, i| {
        acc.checked_mul(n - i)
            .map(|v| v / (i + 1))
            .ok_or(BetError::CombinationOverflow { n, k })
    })
}

pub fn count_for(definition: &WagerTypeDefinition, pool: usize) -> Result<u64> {
    let n = pool as u64;
    let k = definition.required_count() as u64;
    if definition.requires_order {
        permutations(n, k)
    } else {
        combinations(n, k)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CombinationCounter<'a> {
    catalog: &'a BetTypeCatalog,
}

impl<'a> CombinationCounter<'a> {
    pub fn new(catalog: &'a BetTypeCatalog) -> Self {
        Self { catalog }
    }

    /// Backed by the catalog cached in `cell`, built by `build` on first use.
    pub fn from_cell<F>(cell: &'a CatalogCell, build: F) -> Result<Self>
    where
        F: FnOnce() -> Result<BetTypeCatalog>,
    {
        Ok(Self::new(catalog::load(cell, build)?))
    }

    /// Number of elementary combinations `code` represents over `pool` runners.
    pub fn count(&self, code: &str, pool: usize) -> Result<u64> {
        let definition = self.catalog.lookup(code)?;
        let count = count_for(definition, pool)?;
        debug!(code, pool, count, "Counted combinations");
        Ok(count)
    }
}

impl CombinationCounter<'static> {
    pub fn global() -> Result<Self> {
        Ok(Self::new(catalog::global()?))
    }
}
