use crate::error::BetError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Won,
    Lost,
    Unresolved,
}

/// Result of settling one wager. Never persisted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettlementVerdict {
    pub outcome: Outcome,
    /// Presentation text; the outcome never depends on it.
    pub message: String,
    /// Prefix of the finish order the rule looked at.
    pub relevant_finishers: Vec<u32>,
    /// The selection as given, in the caller's order.
    pub selection: Vec<u32>,
}

impl SettlementVerdict {
    pub fn is_won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome != Outcome::Unresolved
    }

    /// Won/lost as a boolean, or [`BetError::UnresolvedRace`] while the race
    /// has no result.
    pub fn decided(&self) -> Result<bool, BetError> {
        match self.outcome {
            Outcome::Won => Ok(true),
            Outcome::Lost => Ok(false),
            Outcome::Unresolved => Err(BetError::UnresolvedRace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    fn verdict(outcome: Outcome) -> SettlementVerdict {
        SettlementVerdict {
            outcome,
            message: String::new(),
            relevant_finishers: vec![1, 2, 3],
            selection: vec![2, 1, 3],
        }
    }

    #[test]
    fn test_decided() {
        assert_eq!(verdict(Outcome::Won).decided(), Ok(true));
        assert_eq!(verdict(Outcome::Lost).decided(), Ok(false));
        assert_eq!(
            verdict(Outcome::Unresolved).decided(),
            Err(BetError::UnresolvedRace)
        );
    }

    #[test]
    fn test_verdict_serialization() {
        let value = to_value(verdict(Outcome::Won)).unwrap();
        assert_eq!(value["outcome"], json!("WON"));
        assert_eq!(value["relevantFinishers"], json!([1, 2, 3]));
        assert_eq!(value["selection"], json!([2, 1, 3]));
    }
}
