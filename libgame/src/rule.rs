use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::CellState;

/// Birth/survival neighbor counts. The default is Conway's B3/S23.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    pub birth: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
        }
    }
}

impl Rule {
    pub fn next_state(&self, current: CellState, alive_neighbors: usize) -> CellState {
        let alive = match current {
            CellState::Alive => self.survive.contains(&alive_neighbors),
            CellState::Dead => self.birth.contains(&alive_neighbors),
        };

        CellState::from(alive)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("expected a rule like \"B3/S23\", got {0:?}")]
    Malformed(String),

    #[error("neighbor count {0:?} is not a digit between 0 and 8")]
    InvalidCount(char),
}

impl FromStr for Rule {
    type Err = RuleParseError;

    /// Parses `B<digits>/S<digits>` notation, e.g. `B3/S23` or `b36/s23`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RuleParseError::Malformed(s.to_owned());

        let (birth, survive) = s.trim().split_once('/').ok_or_else(malformed)?;

        let birth = birth
            .strip_prefix(['B', 'b'])
            .ok_or_else(malformed)?;
        let survive = survive
            .strip_prefix(['S', 's'])
            .ok_or_else(malformed)?;

        Ok(Self {
            birth: parse_counts(birth)?,
            survive: parse_counts(survive)?,
        })
    }
}

fn parse_counts(digits: &str) -> Result<Vec<usize>, RuleParseError> {
    let mut counts = digits
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(count @ 0..=8) => Ok(count as usize),
            _ => Err(RuleParseError::InvalidCount(c)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    counts.sort_unstable();
    counts.dedup();
    Ok(counts)
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for count in &self.birth {
            write!(f, "{count}")?;
        }
        f.write_str("/S")?;
        for count in &self.survive {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rule {
    type Error = RuleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(value: Rule) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_conway() {
        let rule = Rule::default();

        for neighbors in 0..=8 {
            let expected_from_alive = matches!(neighbors, 2 | 3);
            let expected_from_dead = neighbors == 3;

            assert_eq!(
                rule.next_state(CellState::Alive, neighbors),
                CellState::from(expected_from_alive),
                "alive cell with {neighbors} neighbors"
            );
            assert_eq!(
                rule.next_state(CellState::Dead, neighbors),
                CellState::from(expected_from_dead),
                "dead cell with {neighbors} neighbors"
            );
        }
    }

    #[test]
    fn parses_and_prints_notation() {
        let rule: Rule = "B3/S23".parse().unwrap();
        assert_eq!(rule, Rule::default());
        assert_eq!(rule.to_string(), "B3/S23");

        let highlife: Rule = "b63/s32".parse().unwrap();
        assert_eq!(highlife.birth, vec![3, 6]);
        assert_eq!(highlife.survive, vec![2, 3]);

        let empty: Rule = "B/S".parse().unwrap();
        assert!(empty.birth.is_empty() && empty.survive.is_empty());
    }

    #[test]
    fn rejects_bad_notation() {
        assert!(matches!("23/3".parse::<Rule>(), Err(RuleParseError::Malformed(_))));
        assert!(matches!("B3S23".parse::<Rule>(), Err(RuleParseError::Malformed(_))));
        assert_eq!("B9/S23".parse::<Rule>(), Err(RuleParseError::InvalidCount('9')));
        assert_eq!("B3/Sx".parse::<Rule>(), Err(RuleParseError::InvalidCount('x')));
    }
}
