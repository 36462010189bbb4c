use crate::error::{CountdownError, Result};
use crate::model::CountdownId;
use crate::store::{CountdownStore, StorageBackend};
use std::fmt;
use std::str::FromStr;

/// How a user points at a countdown: its 1-based list position, or its id
/// (an unambiguous prefix is enough).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Position(usize),
    Id(String),
}

impl FromStr for Selector {
    type Err = CountdownError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CountdownError::Api("Empty countdown selector".to_string()));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            let n: usize = s
                .parse()
                .map_err(|_| CountdownError::Api(format!("Invalid position: {}", s)))?;
            if n == 0 {
                return Err(CountdownError::Api("Positions start at 1".to_string()));
            }
            return Ok(Selector::Position(n));
        }
        Ok(Selector::Id(s.to_string()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Position(n) => write!(f, "{}", n),
            Selector::Id(id) => write!(f, "\"{}\"", id),
        }
    }
}

/// Map a selector to the id of an existing countdown.
pub fn resolve<B: StorageBackend>(store: &CountdownStore<B>, selector: &Selector) -> Result<CountdownId> {
    let countdowns = store.countdowns();
    match selector {
        Selector::Position(n) => n
            .checked_sub(1)
            .and_then(|i| countdowns.get(i))
            .map(|c| c.id.clone())
            .ok_or_else(|| CountdownError::NotFound(format!("#{}", n))),
        Selector::Id(needle) => {
            if let Some(exact) = countdowns.iter().find(|c| c.id.as_str() == needle) {
                return Ok(exact.id.clone());
            }
            let matches: Vec<&CountdownId> = countdowns
                .iter()
                .map(|c| &c.id)
                .filter(|id| {
                    id.as_str().starts_with(needle.as_str())
                        || id
                            .as_str()
                            .strip_prefix("countdown-")
                            .is_some_and(|rest| rest.starts_with(needle.as_str()))
                })
                .collect();
            match matches.as_slice() {
                [one] => Ok((*one).clone()),
                [] => Err(CountdownError::NotFound(needle.clone())),
                _ => Err(CountdownError::Api(format!(
                    "Selector \"{}\" matches {} countdowns, use more characters",
                    needle,
                    matches.len()
                ))),
            }
        }
    }
}

/// Shortened id for display.
pub fn short_id(id: &CountdownId) -> &str {
    let s = id.as_str();
    let rest = s.strip_prefix("countdown-").unwrap_or(s);
    match rest.char_indices().nth(8) {
        Some((end, _)) => &rest[..end],
        None => rest,
    }
}
