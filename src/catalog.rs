//! Registry of PMU wager types.
//!
//! The built-in table is turned into a [`BetTypeCatalog`] once per process
//! through [`global`]. Construction runs an integrity check tying each code's
//! naming convention to its ordering flag and settlement rule; a catalog that
//! fails it is never handed out.

use crate::dto::{Category, SettlementRule, WagerTypeDefinition};
use crate::error::{BetError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use tracing::{error, info};

/// Suffix marking an order-sensitive wager type.
pub const ORDER_SUFFIX: &str = "_ordre";

/// Order-sensitive codes that do not carry [`ORDER_SUFFIX`].
pub const ORDERED_WITHOUT_SUFFIX: &[&str] = &["super4"];

/// Slot caching a catalog build, including a failed one.
pub type CatalogCell = OnceLock<Result<BetTypeCatalog>>;

static GLOBAL: CatalogCell = OnceLock::new();

#[derive(Debug, Clone)]
pub struct BetTypeCatalog {
    definitions: Vec<WagerTypeDefinition>,
    index: HashMap<String, usize>,
}

impl BetTypeCatalog {
    /// Builds a catalog from `definitions`, keeping their order.
    pub fn from_definitions(definitions: Vec<WagerTypeDefinition>) -> Result<Self> {
        check_integrity(&definitions)?;
        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (def.code.clone(), i))
            .collect();
        Ok(Self { definitions, index })
    }

    /// The standard PMU wager types.
    pub fn builtin() -> Result<Self> {
        Self::from_definitions(builtin_definitions())
    }

    pub fn lookup(&self, code: &str) -> Result<&WagerTypeDefinition> {
        self.index
            .get(code)
            .map(|&i| &self.definitions[i])
            .ok_or_else(|| BetError::UnknownBetType {
                code: code.to_string(),
            })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn list_by_category(&self, category: Category) -> Vec<&WagerTypeDefinition> {
        self.definitions
            .iter()
            .filter(|def| def.category == category)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WagerTypeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Builds the process-wide catalog on first use and returns it.
///
/// A catalog that failed its integrity check yields the same
/// [`BetError::CatalogIntegrity`] on every call.
pub fn global() -> Result<&'static BetTypeCatalog> {
    load(&GLOBAL, BetTypeCatalog::builtin)
}

/// Runs `build` the first time `cell` is read and hands out its result,
/// success or failure, on every call.
pub fn load<F>(cell: &CatalogCell, build: F) -> Result<&BetTypeCatalog>
where
    F: FnOnce() -> Result<BetTypeCatalog>,
{
    cell.get_or_init(|| {
        let catalog = build();
        match &catalog {
            Ok(c) => info!("Bet type catalog loaded with {} wager types", c.len()),
            Err(e) => error!("Refusing to serve settlements: {}", e),
        }
        catalog
    })
    .as_ref()
    .map_err(Clone::clone)
}

/// Startup hook for hosts: builds the catalog before any request is served.
pub fn init() -> Result<()> {
    global().map(|_| ())
}

/// Whether a code's name says it is order-sensitive.
pub fn code_implies_order(code: &str) -> bool {
    code.ends_with(ORDER_SUFFIX) || ORDERED_WITHOUT_SUFFIX.contains(&code)
}

fn check_integrity(definitions: &[WagerTypeDefinition]) -> Result<()> {
    let mut codes = HashSet::with_capacity(definitions.len());

    for def in definitions {
        let code = def.code.as_str();
        let fail = |reason: String| Err(BetError::CatalogIntegrity(format!("{code}: {reason}")));

        if code.trim().is_empty() {
            return Err(BetError::CatalogIntegrity("empty wager code".to_string()));
        }
        if !codes.insert(code) {
            return fail("duplicate code".to_string());
        }
        if def.min_selections == 0 {
            return fail("min_selections must be at least 1".to_string());
        }
        if let Some(max) = def.max_selections {
            if max < def.min_selections {
                return fail(format!(
                    "max_selections {} below min_selections {}",
                    max, def.min_selections
                ));
            }
        }
        if code_implies_order(code) != def.requires_order {
            return fail(format!(
                "code naming implies requires_order = {}, definition says {}",
                code_implies_order(code),
                def.requires_order
            ));
        }

        let exact = matches!(def.rule, SettlementRule::ExactOrder);
        if exact != def.requires_order {
            return fail("only exact-order rules may require order".to_string());
        }

        let single = def.min_selections == 1 && def.max_selections == Some(1);
        match def.rule {
            SettlementRule::TopUnordered { window } if window < def.min_selections => {
                return fail(format!(
                    "window {} smaller than min_selections {}",
                    window, def.min_selections
                ));
            }
            SettlementRule::Bonus if def.min_selections < 2 => {
                return fail("bonus needs at least 2 selections".to_string());
            }
            SettlementRule::SingleWinner | SettlementRule::WinOrPlace { .. } if !single => {
                return fail("single-runner rule needs exactly 1 selection".to_string());
            }
            SettlementRule::WinOrPlace { place_window: 0 } => {
                return fail("place window must be at least 1".to_string());
            }
            _ => {}
        }
    }

    Ok(())
}

fn def(
    code: &str,
    name: &str,
    description: &str,
    selections: (usize, Option<usize>),
    category: Category,
    rule: SettlementRule,
) -> WagerTypeDefinition {
    WagerTypeDefinition {
        code: code.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        min_selections: selections.0,
        max_selections: selections.1,
        requires_order: matches!(rule, SettlementRule::ExactOrder),
        category,
        rule,
    }
}

#[rustfmt::skip]
fn builtin_definitions() -> Vec<WagerTypeDefinition> {
    use Category::*;
    use SettlementRule::*;

    let top = |window| TopUnordered { window };
    vec![
        def("gagnant", "Simple gagnant", "Le cheval choisi termine premier", (1, Some(1)), Simple, SingleWinner),
        def("place", "Simple placé", "Le cheval choisi termine dans les 3 premiers", (1, Some(1)), Simple, top(3)),
        def(
            "gagnant_place",
            "Simple gagnant-placé",
            "Le cheval choisi gagne ou termine dans les 3 premiers",
            (1, Some(1)),
            Simple,
            WinOrPlace { place_window: 3 },
        ),
        def("couple_gagnant", "Couplé gagnant", "Les 2 chevaux choisis forment les 2 premiers, dans le désordre", (2, Some(2)), Couple, top(2)),
        def("couple_place", "Couplé placé", "Les 2 chevaux choisis terminent dans les 3 premiers", (2, Some(2)), Couple, top(3)),
        def("couple_ordre", "Couplé ordre", "Les 2 premiers dans l'ordre exact", (2, Some(2)), Couple, ExactOrder),
        def("2sur4", "2 sur 4", "Les 2 chevaux choisis terminent dans les 4 premiers", (2, Some(2)), Couple, top(4)),
        def("trio", "Trio", "Les 3 premiers dans le désordre", (3, Some(3)), Trio, top(3)),
        def("trio_ordre", "Trio ordre", "Les 3 premiers dans l'ordre exact", (3, Some(3)), Trio, ExactOrder),
        def("trio_bonus", "Trio bonus", "2 des 3 chevaux choisis dans les 3 premiers", (3, Some(3)), Trio, Bonus),
        def("tierce", "Tiercé", "Les 3 premiers dans le désordre", (3, Some(3)), Trio, top(3)),
        def("tierce_ordre", "Tiercé ordre", "Les 3 premiers dans l'ordre exact", (3, Some(3)), Trio, ExactOrder),
        def("multi", "Multi", "De 4 à 7 chevaux, tous dans les 4 premiers", (4, Some(7)), Multi, top(4)),
        def("mini_multi", "Mini multi", "De 4 à 6 chevaux, tous dans les 4 premiers", (4, Some(6)), Multi, top(4)),
        def("quarte", "Quarté+", "Les 4 premiers dans le désordre", (4, Some(4)), Special, top(4)),
        def("quarte_ordre", "Quarté+ ordre", "Les 4 premiers dans l'ordre exact", (4, Some(4)), Special, ExactOrder),
        def("quarte_bonus", "Quarté+ bonus", "3 des 4 chevaux choisis dans les 4 premiers", (4, Some(4)), Special, Bonus),
        def("super4", "Super 4", "Les 4 premiers dans l'ordre exact", (4, Some(4)), Special, ExactOrder),
        def("quinte", "Quinté+", "Les 5 premiers dans le désordre", (5, Some(5)), Special, top(5)),
        def("quinte_ordre", "Quinté+ ordre", "Les 5 premiers dans l'ordre exact", (5, Some(5)), Special, ExactOrder),
        def("pick5", "Pick 5", "Les 5 chevaux choisis terminent dans les 5 premiers", (5, Some(5)), Special, top(5)),
    ]
}
