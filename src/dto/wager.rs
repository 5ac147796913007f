use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family a wager type is listed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Simple,
    Couple,
    Trio,
    Multi,
    Special,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Simple,
        Category::Couple,
        Category::Trio,
        Category::Multi,
        Category::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Simple => "simple",
            Category::Couple => "couple",
            Category::Trio => "trio",
            Category::Multi => "multi",
            Category::Special => "special",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// How a wager type is settled against a finish order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SettlementRule {
    /// Every selected runner finishes within the first `window` places.
    TopUnordered { window: usize },
    /// The first `min_selections` runners match the finish order rank by rank.
    ExactOrder,
    /// At least `min_selections - 1` selected runners are in the top
    /// `min_selections`, order-free.
    Bonus,
    /// The selected runner wins the race.
    SingleWinner,
    /// The selected runner wins or finishes within the first `place_window`.
    WinOrPlace { place_window: usize },
}

/// A registered wager type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WagerTypeDefinition {
    pub code: String,
    pub name: String,
    pub description: String,
    pub min_selections: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
    pub requires_order: bool,
    pub category: Category,
    pub rule: SettlementRule,
}

impl WagerTypeDefinition {
    /// Core selection size: the number of finishers the wager predicts.
    pub fn required_count(&self) -> usize {
        self.min_selections
    }

    pub fn accepts_count(&self, count: usize) -> bool {
        count >= self.min_selections && self.max_selections.is_none_or(|max| count <= max)
    }

    /// Number of leading finishers the settlement rule looks at.
    pub fn finish_window(&self) -> usize {
        match self.rule {
            SettlementRule::TopUnordered { window } => window,
            SettlementRule::ExactOrder | SettlementRule::Bonus => self.min_selections,
            SettlementRule::SingleWinner => 1,
            SettlementRule::WinOrPlace { place_window } => place_window.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    fn multi() -> WagerTypeDefinition {
        WagerTypeDefinition {
            code: "multi".to_string(),
            name: "Multi".to_string(),
            description: "4 to 7 runners, all in the first 4".to_string(),
            min_selections: 4,
            max_selections: Some(7),
            requires_order: false,
            category: Category::Multi,
            rule: SettlementRule::TopUnordered { window: 4 },
        }
    }

    #[test]
    fn test_accepts_count() {
        let def = multi();
        assert!(!def.accepts_count(3));
        assert!(def.accepts_count(4));
        assert!(def.accepts_count(7));
        assert!(!def.accepts_count(8));
    }

    #[test]
    fn test_accepts_count_unbounded() {
        let mut def = multi();
        def.max_selections = None;
        assert!(def.accepts_count(20));
    }

    #[test]
    fn test_finish_window_is_fixed_for_multi() {
        assert_eq!(multi().finish_window(), 4);
        assert_eq!(multi().required_count(), 4);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Trio".parse::<Category>().unwrap(), Category::Trio);
        assert_eq!(" special ".parse::<Category>().unwrap(), Category::Special);
        assert!("quadruple".parse::<Category>().is_err());
    }

    #[test]
    fn test_definition_serialization() {
        let value = to_value(multi()).unwrap();
        assert_eq!(value["category"], json!("multi"));
        assert_eq!(value["rule"], json!({"kind": "top_unordered", "window": 4}));
        assert_eq!(value["minSelections"], json!(4));
        assert_eq!(value["maxSelections"], json!(7));
        assert_eq!(value["requiresOrder"], json!(false));
        assert!(value.get("max_selections").is_none());
    }

    #[test]
    fn test_rule_fields_are_camel_case() {
        let rule = SettlementRule::WinOrPlace { place_window: 3 };
        assert_eq!(
            to_value(rule).unwrap(),
            json!({"kind": "win_or_place", "placeWindow": 3})
        );
    }

    #[test]
    fn test_definition_deserializes_from_camel_case() {
        let def: WagerTypeDefinition = serde_json::from_value(json!({
            "code": "multi",
            "name": "Multi",
            "description": "4 to 7 runners, all in the first 4",
            "minSelections": 4,
            "maxSelections": 7,
            "requiresOrder": false,
            "category": "multi",
            "rule": {"kind": "top_unordered", "window": 4}
        }))
        .unwrap();
        assert_eq!(def, multi());
    }
}
