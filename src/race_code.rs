//! Compact race codes: `R{reunion}C{course}[/{bet_type}]/{selections}`.
//!
//! ```
//! use pmu_rs::race_code;
//!
//! let code = race_code::format(1, 4, &[7, 5, 12], Some("trio_ordre")).unwrap();
//! assert_eq!(code, "R1C4/trio_ordre/7-5-12");
//!
//! let parts = race_code::parse(&code).unwrap();
//! assert_eq!(parts.selections, vec![7, 5, 12]);
//! ```

use crate::dto::RaceCode;
use std::str::FromStr;

const SEGMENT_SEPARATOR: char = '/';
const RUNNER_SEPARATOR: char = '-';

/// Renders a race code, keeping the selections in the given order.
///
/// Returns `None` when the parts cannot be read back by [`parse`]: a zero
/// reunion, course or runner number, or a bet type that is empty, padded with
/// whitespace or contains `/`.
pub fn format(
    reunion: u32,
    course: u32,
    selections: &[u32],
    bet_type: Option<&str>,
) -> Option<String> {
    if reunion == 0 || course == 0 || selections.contains(&0) {
        return None;
    }
    if bet_type.is_some_and(|b| !is_valid_bet_type(b)) {
        return None;
    }

    let mut code = format!("R{reunion}C{course}");
    if let Some(bet_type) = bet_type {
        code.push(SEGMENT_SEPARATOR);
        code.push_str(bet_type);
    }
    code.push(SEGMENT_SEPARATOR);
    let runners: Vec<String> = selections.iter().map(u32::to_string).collect();
    code.push_str(&runners.join(&RUNNER_SEPARATOR.to_string()));
    Some(code)
}

fn is_valid_bet_type(bet_type: &str) -> bool {
    !bet_type.is_empty()
        && !bet_type.contains(SEGMENT_SEPARATOR)
        && bet_type.trim() == bet_type
}

/// Splits a race code into its parts, or `None` when it is malformed.
pub fn parse(code: &str) -> Option<RaceCode> {
    let mut segments = code.trim().split(SEGMENT_SEPARATOR);
    let head = segments.next()?;
    let (bet_type, runners) = match (segments.next(), segments.next(), segments.next()) {
        (Some(runners), None, None) => (None, runners),
        (Some(bet_type), Some(runners), None) if !bet_type.is_empty() => {
            (Some(bet_type.to_string()), runners)
        }
        _ => return None,
    };

    let (reunion, course) = parse_head(head)?;
    let selections = if runners.is_empty() {
        Vec::new()
    } else {
        runners
            .split(RUNNER_SEPARATOR)
            .map(positive)
            .collect::<Option<Vec<_>>>()?
    };

    Some(RaceCode {
        reunion,
        course,
        bet_type,
        selections,
    })
}

/// `R1C4` → `(1, 4)`; markers are case-insensitive.
fn parse_head(head: &str) -> Option<(u32, u32)> {
    let rest = head.strip_prefix(&['R', 'r'][..])?;
    let split = rest.find(&['C', 'c'][..])?;
    let reunion = positive(&rest[..split])?;
    let course = positive(&rest[split + 1..])?;
    Some((reunion, course))
}

fn positive(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n > 0)
}

impl RaceCode {
    /// Renders this code, or `None` when [`format`] would refuse its parts.
    pub fn to_code(&self) -> Option<String> {
        format(
            self.reunion,
            self.course,
            &self.selections,
            self.bet_type.as_deref(),
        )
    }
}

impl FromStr for RaceCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).ok_or_else(|| format!("malformed race code '{s}'"))
    }
}
