//! Settlement of wagers against an official finish order.
//!
//! Rules are picked from the wager definition's [`SettlementRule`], never
//! from the code string, so a new wager type only needs a catalog entry.
//! Selections are compared in the order the bettor gave them.

use crate::catalog::{self, BetTypeCatalog, CatalogCell};
use crate::config::Language;
use crate::dto::{FinishOrder, Outcome, SettlementRule, SettlementVerdict, WagerTypeDefinition};
use crate::error::{Result, ValidationError};
use crate::selection::{Selection, SelectionParser};
use tracing::debug;

/// What a rule saw when it compared a selection to the finish order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Evaluation<'f> {
    won: bool,
    /// Leading finishers the rule looked at.
    window: &'f [u32],
    /// Selected runners counted as correct by the rule.
    hits: usize,
}

fn evaluate<'f>(
    definition: &WagerTypeDefinition,
    selection: &[u32],
    finish: &'f FinishOrder,
) -> Evaluation<'f> {
    let top = finish.top(definition.finish_window());
    let in_top = selection.iter().filter(|r| top.contains(*r)).count();

    let (won, hits) = match definition.rule {
        SettlementRule::TopUnordered { .. } => (in_top == selection.len(), in_top),
        SettlementRule::ExactOrder => {
            let required = definition.required_count();
            let matched = selection
                .iter()
                .zip(top)
                .filter(|(picked, finished)| picked == finished)
                .count();
            (top.len() == required && matched == required, matched)
        }
        SettlementRule::Bonus => (in_top + 1 >= definition.required_count(), in_top),
        SettlementRule::SingleWinner => {
            let won = selection
                .first()
                .is_some_and(|&r| finish.winner() == Some(r));
            (won, usize::from(won))
        }
        SettlementRule::WinOrPlace { .. } => {
            let runner = selection.first().copied();
            let wins = runner.is_some() && runner == finish.winner();
            let places = runner.is_some_and(|r| top.contains(&r));
            (wins || places, usize::from(wins || places))
        }
    };

    Evaluation {
        won,
        window: top,
        hits,
    }
}

fn join(runners: &[u32]) -> String {
    runners
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("-")
}

fn render_message(
    language: Language,
    outcome: Outcome,
    definition: &WagerTypeDefinition,
    selection: &[u32],
    finishers: &[u32],
    hits: usize,
) -> String {
    let name = &definition.name;
    let picked = join(selection);
    let arrival = join(finishers);

    match (language, outcome) {
        (Language::Fr, Outcome::Won) => format!(
            "Gagné : votre {name} {picked} est validé par l'arrivée {arrival} ({hits}/{} bons)",
            selection.len()
        ),
        (Language::Fr, Outcome::Lost) => format!(
            "Perdu : votre {name} {picked} ne correspond pas à l'arrivée {arrival} ({hits}/{} bons)",
            selection.len()
        ),
        (Language::Fr, Outcome::Unresolved) => format!(
            "En attente : l'arrivée officielle n'est pas encore connue pour votre {name} {picked}"
        ),
        (Language::En, Outcome::Won) => format!(
            "Won: your {name} {picked} matches the finish {arrival} ({hits}/{} correct)",
            selection.len()
        ),
        (Language::En, Outcome::Lost) => format!(
            "Lost: your {name} {picked} does not match the finish {arrival} ({hits}/{} correct)",
            selection.len()
        ),
        (Language::En, Outcome::Unresolved) => {
            format!("Pending: no official finish yet for your {name} {picked}")
        }
    }
}

/// Decides whether wagers won against an official finish order.
#[derive(Debug, Clone, Copy)]
pub struct SettlementEngine<'a> {
    catalog: &'a BetTypeCatalog,
    language: Language,
}

impl<'a> SettlementEngine<'a> {
    pub fn new(catalog: &'a BetTypeCatalog) -> Self {
        Self {
            catalog,
            language: Language::default(),
        }
    }

    /// Backed by the catalog cached in `cell`, built by `build` on first use.
    pub fn from_cell<F>(cell: &'a CatalogCell, build: F) -> Result<Self>
    where
        F: FnOnce() -> Result<BetTypeCatalog>,
    {
        Ok(Self::new(catalog::load(cell, build)?))
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Settles an already validated selection.
    ///
    /// `selection` must have been validated for `code`; any other wager type
    /// is refused with [`ValidationError::WagerTypeMismatch`]. An empty finish
    /// order gives [`Outcome::Unresolved`], never [`Outcome::Lost`].
    pub fn settle(
        &self,
        code: &str,
        selection: &Selection,
        finish: &FinishOrder,
    ) -> Result<SettlementVerdict> {
        let definition = self.catalog.lookup(code)?;
        if selection.code() != definition.code {
            return Err(ValidationError::WagerTypeMismatch {
                validated: selection.code().to_string(),
                requested: definition.code.clone(),
            }
            .into());
        }
        let runners = selection.runners();

        let verdict = if !finish.is_resolved() {
            SettlementVerdict {
                outcome: Outcome::Unresolved,
                message: render_message(
                    self.language,
                    Outcome::Unresolved,
                    definition,
                    runners,
                    &[],
                    0,
                ),
                relevant_finishers: Vec::new(),
                selection: runners.to_vec(),
            }
        } else {
            let eval = evaluate(definition, runners, finish);
            let outcome = if eval.won { Outcome::Won } else { Outcome::Lost };
            SettlementVerdict {
                outcome,
                message: render_message(
                    self.language,
                    outcome,
                    definition,
                    runners,
                    eval.window,
                    eval.hits,
                ),
                relevant_finishers: eval.window.to_vec(),
                selection: runners.to_vec(),
            }
        };

        debug!(
            code,
            outcome = ?verdict.outcome,
            selection = ?verdict.selection,
            finishers = ?verdict.relevant_finishers,
            "Settled wager"
        );
        Ok(verdict)
    }

    /// Parses the selection string and finish order, then settles.
    pub fn settle_raw(
        &self,
        code: &str,
        raw_selection: &str,
        finishers: &[u32],
    ) -> Result<SettlementVerdict> {
        let selection = SelectionParser::new(self.catalog).parse(raw_selection, code)?;
        let finish = FinishOrder::new(finishers.to_vec())?;
        self.settle(code, &selection, &finish)
    }
}

impl SettlementEngine<'static> {
    /// Engine backed by the process-wide catalog.
    pub fn global() -> Result<Self> {
        Ok(Self::new(catalog::global()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BetError;

    fn engine() -> SettlementEngine<'static> {
        SettlementEngine::global().unwrap()
    }

    fn outcome(code: &str, raw: &str, finish: &[u32]) -> Outcome {
        engine().settle_raw(code, raw, finish).unwrap().outcome
    }

    const FINISH: &[u32] = &[1, 2, 3, 4, 5];

    #[test]
    fn test_gagnant() {
        assert_eq!(outcome("gagnant", "1", FINISH), Outcome::Won);
        assert_eq!(outcome("gagnant", "2", FINISH), Outcome::Lost);
    }

    #[test]
    fn test_place_window() {
        assert_eq!(outcome("place", "3", FINISH), Outcome::Won);
        assert_eq!(outcome("place", "4", FINISH), Outcome::Lost);
    }

    #[test]
    fn test_exact_order_counts_matching_positions() {
        let verdict = engine().settle_raw("trio_ordre", "1,2,4", FINISH).unwrap();
        assert_eq!(verdict.outcome, Outcome::Lost);
        assert_eq!(verdict.relevant_finishers, vec![1, 2, 3]);
        assert!(verdict.message.contains("2/3"));
    }

    #[test]
    fn test_exact_order_short_finish_is_lost() {
        assert_eq!(outcome("couple_ordre", "1,2", &[1]), Outcome::Lost);
    }

    #[test]
    fn test_top_unordered_short_finish() {
        assert_eq!(outcome("place", "2", &[1, 2]), Outcome::Won);
        assert_eq!(outcome("trio", "3,2,1", &[1, 2]), Outcome::Lost);
    }

    #[test]
    fn test_quarte_bonus() {
        assert_eq!(outcome("quarte_bonus", "4,1,3,9", FINISH), Outcome::Won);
        assert_eq!(outcome("quarte_bonus", "4,1,8,9", FINISH), Outcome::Lost);
    }

    #[test]
    fn test_unresolved_message() {
        let verdict = engine().settle_raw("trio", "7,5,12", &[]).unwrap();
        assert_eq!(verdict.outcome, Outcome::Unresolved);
        assert!(verdict.relevant_finishers.is_empty());
        assert!(verdict.message.contains("7-5-12"));
        assert_eq!(verdict.decided(), Err(BetError::UnresolvedRace));
    }

    #[test]
    fn test_english_messages() {
        let verdict = engine()
            .with_language(Language::En)
            .settle_raw("trio", "2,1,3", FINISH)
            .unwrap();
        assert!(verdict.message.starts_with("Won:"));
        assert!(verdict.message.contains("1-2-3"));
    }

    #[test]
    fn test_selection_for_another_wager_type_is_refused() {
        let parser = SelectionParser::global().unwrap();
        let finish = FinishOrder::new(FINISH.to_vec()).unwrap();

        let single = parser.parse("3", "gagnant").unwrap();
        assert_eq!(
            engine().settle("trio", &single, &finish),
            Err(BetError::Validation(ValidationError::WagerTypeMismatch {
                validated: "gagnant".to_string(),
                requested: "trio".to_string(),
            }))
        );

        let wide = parser.parse("1,2,3,4,5,6,7", "multi").unwrap();
        assert!(matches!(
            engine().settle("trio_ordre", &wide, &finish),
            Err(BetError::Validation(ValidationError::WagerTypeMismatch { .. }))
        ));
    }

    #[test]
    fn test_invalid_finish_order() {
        assert!(matches!(
            engine().settle_raw("trio", "1,2,3", &[1, 2, 1]),
            Err(BetError::Validation(_))
        ));
    }
}
