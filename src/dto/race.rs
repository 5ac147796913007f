use crate::error::{BetError, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Official arrival order of a race, best rank first.
///
/// An empty finish order means the race has no result yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct FinishOrder(Vec<u32>);

impl FinishOrder {
    /// Builds a finish order, rejecting zero and repeated runner numbers.
    pub fn new(runners: Vec<u32>) -> Result<Self, BetError> {
        let mut seen = HashSet::with_capacity(runners.len());
        for &runner in &runners {
            if runner == 0 {
                return Err(ValidationError::InvalidFinishOrder(
                    "runner numbers start at 1".to_string(),
                )
                .into());
            }
            if !seen.insert(runner) {
                return Err(ValidationError::InvalidFinishOrder(format!(
                    "runner {runner} finishes more than once"
                ))
                .into());
            }
        }
        Ok(Self(runners))
    }

    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn runners(&self) -> &[u32] {
        &self.0
    }

    pub fn winner(&self) -> Option<u32> {
        self.0.first().copied()
    }

    /// The first `n` finishers, or all of them when fewer have finished.
    pub fn top(&self, n: usize) -> &[u32] {
        &self.0[..n.min(self.0.len())]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u32>> for FinishOrder {
    type Error = BetError;

    fn try_from(runners: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(runners)
    }
}

impl From<FinishOrder> for Vec<u32> {
    fn from(order: FinishOrder) -> Self {
        order.0
    }
}

/// Structured form of a compact race code such as `R1C4/trio/7-5-12`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RaceCode {
    pub reunion: u32,
    pub course: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_type: Option<String>,
    pub selections: Vec<u32>,
}
