//! Error types for parsing, validating and settling wagers.
//!
//! Every error is returned synchronously and none is retried: all operations
//! of this crate are pure functions of their inputs. The only fatal condition
//! is [`BetError::CatalogIntegrity`], raised while the bet-type catalog is
//! built.

use thiserror::Error;

/// Errors raised by the catalog, the selection parser, the settlement engine
/// and the combination counter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BetError {
    /// A selection token is not a positive integer.
    #[error("invalid runner number '{token}'")]
    Parse {
        /// The offending token, as written by the caller.
        token: String,
    },

    /// The selection or finish order breaks a count or uniqueness rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No wager type is registered under this code.
    #[error("unknown bet type '{code}'")]
    UnknownBetType {
        /// The code that was looked up.
        code: String,
    },

    /// The race has no official finish order yet.
    #[error("race is not resolved yet")]
    UnresolvedRace,

    /// The catalog failed its self-check and must not serve requests.
    #[error("bet type catalog integrity check failed: {0}")]
    CatalogIntegrity(String),

    /// A combination count does not fit in a `u64`.
    #[error("combination count overflows for n = {n}, k = {k}")]
    CombinationOverflow { n: u64, k: u64 },
}

/// Count and uniqueness violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{code} needs at least {min} runner(s), got {got}")]
    TooFewSelections { code: String, min: usize, got: usize },

    #[error("{code} accepts at most {max} runner(s), got {got}")]
    TooManySelections { code: String, max: usize, got: usize },

    #[error("runner {runner} is selected more than once")]
    DuplicateRunner { runner: u32 },

    #[error("invalid finish order: {0}")]
    InvalidFinishOrder(String),

    /// A selection validated for one wager type was settled as another.
    #[error("selection was validated for {validated}, not {requested}")]
    WagerTypeMismatch { validated: String, requested: String },
}

pub type Result<T> = std::result::Result<T, BetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BetError::Parse {
            token: "x7".to_string(),
        };
        assert_eq!(err.to_string(), "invalid runner number 'x7'");

        let err = BetError::UnknownBetType {
            code: "quadruple".to_string(),
        };
        assert!(err.to_string().contains("quadruple"));
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: BetError = ValidationError::DuplicateRunner { runner: 7 }.into();
        assert_eq!(err.to_string(), "runner 7 is selected more than once");
        assert!(matches!(
            err,
            BetError::Validation(ValidationError::DuplicateRunner { runner: 7 })
        ));
    }

    #[test]
    fn test_too_few_message() {
        let err = ValidationError::TooFewSelections {
            code: "trio".to_string(),
            min: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "trio needs at least 3 runner(s), got 2");
    }
}
