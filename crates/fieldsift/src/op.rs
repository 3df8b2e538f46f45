//! Comparison operators for number filters.
//!
//! A number filter value may start with one of the operators in
//! [`Op::PREFIXES`]; without one, equality is assumed.

use std::cmp::Ordering;

/// Comparison operator for a number filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Op {
    /// Equal. Valid for numbers and specials.
    #[default]
    Eq,
    /// Not equal. Valid for numbers and specials.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl Op {
    /// Recognized operator prefixes, in matching order.
    ///
    /// Longer spellings come before their one-character prefixes so that
    /// `<=5` is read as `Lte 5`, not `Lt =5`.
    pub const PREFIXES: [(&'static str, Op); 8] = [
        ("==", Op::Eq),
        ("=", Op::Eq),
        ("!=", Op::Ne),
        ("!", Op::Ne),
        ("<=", Op::Lte),
        ("<", Op::Lt),
        (">=", Op::Gte),
        (">", Op::Gt),
    ];

    /// Splits a leading operator off `text`.
    ///
    /// Surrounding whitespace is trimmed from both the input and the operand.
    ///
    /// ```
    /// use fieldsift::Op;
    ///
    /// assert_eq!(Op::split_prefix(">= 42"), (Op::Gte, "42"));
    /// assert_eq!(Op::split_prefix("42"), (Op::Eq, "42"));
    /// ```
    pub fn split_prefix(text: &str) -> (Op, &str) {
        let text = text.trim();
        for (prefix, op) in Op::PREFIXES {
            if let Some(rest) = text.strip_prefix(prefix) {
                return (op, rest.trim_start());
            }
        }
        (Op::Eq, text)
    }

    /// Returns `true` if this operator only tests equality.
    ///
    /// Special (non-numeric) values only support these.
    pub fn is_equality(self) -> bool {
        matches!(self, Op::Eq | Op::Ne)
    }

    /// Evaluates a comparison given an ordering result.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }

    /// Evaluates the operator on an equality result alone.
    ///
    /// Ordering operators are false: unequal values of different kinds have
    /// no order.
    pub fn eval_equality(self, equal: bool) -> bool {
        match self {
            Op::Eq => equal,
            Op::Ne => !equal,
            _ => false,
        }
    }

    /// Returns the canonical symbol of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_every_prefix() {
        assert_eq!(Op::split_prefix("==1"), (Op::Eq, "1"));
        assert_eq!(Op::split_prefix("=1"), (Op::Eq, "1"));
        assert_eq!(Op::split_prefix("!=1"), (Op::Ne, "1"));
        assert_eq!(Op::split_prefix("!1"), (Op::Ne, "1"));
        assert_eq!(Op::split_prefix("<=1"), (Op::Lte, "1"));
        assert_eq!(Op::split_prefix("<1"), (Op::Lt, "1"));
        assert_eq!(Op::split_prefix(">=1"), (Op::Gte, "1"));
        assert_eq!(Op::split_prefix(">1"), (Op::Gt, "1"));
    }

    #[test]
    fn split_without_operator() {
        assert_eq!(Op::split_prefix("  7 "), (Op::Eq, "7"));
        assert_eq!(Op::split_prefix("X"), (Op::Eq, "X"));
        assert_eq!(Op::split_prefix(""), (Op::Eq, ""));
    }

    #[test]
    fn op_eval_ordering() {
        assert!(Op::Eq.eval_ordering(Ordering::Equal));
        assert!(!Op::Eq.eval_ordering(Ordering::Less));

        assert!(Op::Ne.eval_ordering(Ordering::Less));
        assert!(!Op::Ne.eval_ordering(Ordering::Equal));

        assert!(Op::Gt.eval_ordering(Ordering::Greater));
        assert!(!Op::Gt.eval_ordering(Ordering::Equal));

        assert!(Op::Gte.eval_ordering(Ordering::Equal));
        assert!(!Op::Gte.eval_ordering(Ordering::Less));

        assert!(Op::Lt.eval_ordering(Ordering::Less));
        assert!(!Op::Lt.eval_ordering(Ordering::Equal));

        assert!(Op::Lte.eval_ordering(Ordering::Equal));
        assert!(!Op::Lte.eval_ordering(Ordering::Greater));
    }

    #[test]
    fn op_eval_equality() {
        assert!(Op::Eq.eval_equality(true));
        assert!(Op::Ne.eval_equality(false));
        assert!(!Op::Lt.eval_equality(false));
        assert!(!Op::Gte.eval_equality(true));
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::Gte.to_string(), ">=");
        assert_eq!(Op::Ne.to_string(), "!=");
    }
}
