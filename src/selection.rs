//! Parsing of raw selection strings such as `"7,5,12"`.
//!
//! The runner order written by the caller is the predicted finish order for
//! order-sensitive wagers, so it is kept exactly as given.

use crate::catalog::{self, BetTypeCatalog, CatalogCell};
use crate::dto::WagerTypeDefinition;
use crate::error::{BetError, Result, ValidationError};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Characters accepted between runner numbers. `,` is canonical.
pub const DELIMITERS: &[char] = &[',', '-', ';'];

/// Runner numbers validated against a wager type.
///
/// Only produced by [`SelectionParser`] or [`Selection::validate`], so a value
/// of this type satisfies the bounds of the wager type named by
/// [`Selection::code`] and holds no duplicate runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    code: String,
    runners: Vec<u32>,
}

impl Selection {
    /// Checks `runners` against `definition` without reordering them.
    pub fn validate(definition: &WagerTypeDefinition, runners: Vec<u32>) -> Result<Self> {
        let got = runners.len();
        if got < definition.min_selections {
            return Err(ValidationError::TooFewSelections {
                code: definition.code.clone(),
                min: definition.min_selections,
                got,
            }
            .into());
        }
        if let Some(max) = definition.max_selections {
            if got > max {
                return Err(ValidationError::TooManySelections {
                    code: definition.code.clone(),
                    max,
                    got,
                }
                .into());
            }
        }

        let mut seen = HashSet::with_capacity(got);
        if let Some(&runner) = runners.iter().find(|&&r| !seen.insert(r)) {
            return Err(ValidationError::DuplicateRunner { runner }.into());
        }

        Ok(Self {
            code: definition.code.clone(),
            runners,
        })
    }

    /// Code of the wager type this selection was validated for.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn runners(&self) -> &[u32] {
        &self.runners
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    pub fn contains(&self, runner: u32) -> bool {
        self.runners.contains(&runner)
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.runners
    }
}

/// Splits a raw string into positive runner numbers, keeping their order.
///
/// An empty or blank string yields no runners; count checks are left to
/// [`Selection::validate`].
pub fn parse_runners(raw: &str) -> Result<Vec<u32>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(DELIMITERS)
        .map(|token| parse_runner(token.trim()))
        .collect()
}

fn parse_runner(token: &str) -> Result<u32> {
    let invalid = || BetError::Parse {
        token: token.to_string(),
    };

    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match token.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(runner) => Ok(runner),
    }
}

/// Turns raw selection strings into [`Selection`]s for a given wager type.
#[derive(Debug, Clone, Copy)]
pub struct SelectionParser<'a> {
    catalog: &'a BetTypeCatalog,
}

impl<'a> SelectionParser<'a> {
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

    pub fn parse(&self, raw: &str, code: &str) -> Result<Selection> {
        let definition = self.catalog.lookup(code)?;
        let runners = parse_runners(raw)?;
        let selection = Selection::validate(definition, runners)?;
        debug!(code, selection = ?selection.runners(), "Parsed selection");
        Ok(selection)
    }
}

impl SelectionParser<'static> {
    /// Parser backed by the process-wide catalog.
    pub fn global() -> Result<Self> {
        Ok(Self::new(catalog::global()?))
    }
}
