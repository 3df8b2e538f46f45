//! Number filters: an optional comparison operator and a numeric or special
//! operand.

use std::borrow::Cow;

use crate::error::FieldError;
use crate::op::Op;
use crate::value::{Number, Value};

/// Right-hand side of a number filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A numeric literal.
    Number(Number),
    /// One of the field's special non-numeric values.
    Special(String),
}

/// A parsed number filter value, e.g. `>=18` or `X`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberTest {
    pub op: Op,
    pub operand: Operand,
}

impl NumberTest {
    /// Parses a raw filter value, accepting `specials` as operands.
    ///
    /// ```
    /// use fieldsift::{NumberTest, Op, Operand, Number};
    ///
    /// let test = NumberTest::parse(">=18", &[]).unwrap();
    /// assert_eq!(test.op, Op::Gte);
    /// assert_eq!(test.operand, Operand::Number(Number::I64(18)));
    /// ```
    pub fn parse(raw: &str, specials: &[String]) -> Result<Self, FieldError> {
        let (op, operand) = Op::split_prefix(raw);
        if operand.is_empty() {
            return Err(FieldError::InvalidNumber(raw.trim().to_string()));
        }

        if specials.iter().any(|special| special == operand) {
            if !op.is_equality() {
                return Err(FieldError::InvalidOperator {
                    op,
                    value: operand.to_string(),
                });
            }
            return Ok(Self {
                op,
                operand: Operand::Special(operand.to_string()),
            });
        }

        let number =
            Number::parse(operand).ok_or_else(|| FieldError::InvalidNumber(operand.to_string()))?;
        Ok(Self {
            op,
            operand: Operand::Number(number),
        })
    }

    /// Tests a coerced record value.
    pub(crate) fn matches(&self, value: &Coerced<'_>) -> bool {
        match (value, &self.operand) {
            (Coerced::Number(v), Operand::Number(t)) => v
                .compare(*t)
                .map(|ordering| self.op.eval_ordering(ordering))
                .unwrap_or(false),
            (Coerced::Special(v), Operand::Special(t)) => self.op.eval_equality(*v == t.as_str()),
            (Coerced::Number(_), Operand::Special(_))
            | (Coerced::Special(_), Operand::Number(_)) => self.op.eval_equality(false),
            (Coerced::Invalid(_), _) => false,
        }
    }
}

/// A record value as read by a number field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Coerced<'a> {
    Number(Number),
    Special(&'a str),
    Invalid(Cow<'a, str>),
}

/// Reads a record value as a number, a special, or invalid text.
pub(crate) fn coerce<'a>(value: &Value<'a>, specials: &[String]) -> Coerced<'a> {
    match value {
        Value::Number(n) => Coerced::Number(*n),
        Value::Bool(b) => Coerced::Number(Number::I64(i64::from(*b))),
        Value::Text(text) => {
            let text: &'a str = text;
            let trimmed = text.trim();
            if specials.iter().any(|special| special == trimmed) {
                Coerced::Special(trimmed)
            } else if let Some(n) = Number::parse(trimmed) {
                Coerced::Number(n)
            } else {
                Coerced::Invalid(Cow::Borrowed(text))
            }
        }
        Value::None => Coerced::Invalid(Cow::Borrowed("")),
    }
}
