// ── Label selection ──
//
// Selectors and expressions are kube's own types; this module adds the
// selector string syntax and a few constructors the listers need.

mod parser;

use thiserror::Error;

pub use kube::core::{Expression, Selector, SelectorExt};
pub use kubelist_store::Labels;
pub use parser::parse;

/// Invalid selector text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("invalid label key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid label value {value:?}: {reason}")]
    InvalidValue { value: String, reason: String },

    #[error("operator '{operator}' {reason}")]
    InvalidValues {
        operator: &'static str,
        reason: String,
    },

    #[error("unexpected {found} at position {position}, expected {expected}")]
    Syntax {
        position: usize,
        found: String,
        expected: &'static str,
    },
}

/// Selector that matches every object.
pub fn everything() -> Selector {
    std::iter::empty::<Expression>().collect()
}

/// Equality selector requiring every pair in `set`.
pub fn from_set(set: &Labels) -> Selector {
    set.iter()
        .map(|(k, v)| Expression::Equal(k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn everything_matches_any_label_set() {
        let sel = everything();
        assert!(sel.selects_all());
        assert!(sel.matches(&labels(&[("env", "prod")])));
        assert!(sel.matches(&labels(&[])));
        assert_eq!(sel.to_string(), "");
    }

    #[test]
    fn from_set_requires_all_pairs() {
        let sel = from_set(&labels(&[("env", "prod"), ("tier", "db")]));
        assert!(sel.matches(&labels(&[("env", "prod"), ("tier", "db"), ("x", "y")])));
        assert!(!sel.matches(&labels(&[("env", "prod")])));
        assert_eq!(sel.to_string(), "env=prod,tier=db");
    }
}
