//! # pmu-rs
//!
//! Settlement and wager-taxonomy engine for French pari-mutuel (PMU) horse
//! racing. It decides whether a recorded wager won against an official finish
//! order, across the PMU wager types (gagnant, placé, couplé, trio, tiercé,
//! multi, quarté+, quinté+, ...), and counts the combinations a multi-runner
//! ticket stands for.
//!
//! ## Quick Start
//!
//! ```
//! use pmu_rs::{FinishOrder, Outcome, SelectionParser, SettlementEngine};
//!
//! # fn example() -> Result<(), pmu_rs::BetError> {
//! pmu_rs::catalog::init()?;
//!
//! let selection = SelectionParser::global()?.parse("2,1,3", "trio")?;
//! let finish = FinishOrder::new(vec![1, 2, 3, 4, 5])?;
//!
//! let verdict = SettlementEngine::global()?.settle("trio", &selection, &finish)?;
//! assert_eq!(verdict.outcome, Outcome::Won);
//!
//! // Same runners, but the ordered wager needs the exact finish order
//! let verdict = SettlementEngine::global()?.settle_raw("trio_ordre", "2,1,3", &[1, 2, 3, 4, 5])?;
//! assert_eq!(verdict.outcome, Outcome::Lost);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Components
//!
//! - **Catalog**: the process-wide registry of wager types, built once and
//!   checked for consistency before it serves anything
//! - **Selection parsing**: `"7,5,12"` to runner numbers, order kept verbatim
//! - **Settlement**: won, lost, or unresolved when no result is posted yet
//! - **Combinations**: ticket counts for "champ" pricing, overflow-checked
//! - **Race codes**: `R1C4/trio/7-5-12` formatting and parsing
//!
//! ## Configuration
//!
//! Hosts may load a `config.toml`:
//!
//! ```toml
//! [settlement]
//! language = "fr"   # or "en"
//!
//! [logging]
//! level = "info"
//! ```

pub mod catalog;
pub mod combination;
pub mod config;
pub mod dto;
pub mod error;
pub mod race_code;
pub mod selection;
pub mod settlement;

// Re-export commonly used types at the crate root
pub use catalog::BetTypeCatalog;
pub use combination::CombinationCounter;
pub use config::Config;
pub use dto::*;
pub use error::{BetError, ValidationError};
pub use selection::{Selection, SelectionParser};
pub use settlement::SettlementEngine;
