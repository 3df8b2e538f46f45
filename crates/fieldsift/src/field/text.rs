//! Text matching: substring, exact, and regular-expression patterns.

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};

use crate::error::FieldError;

/// Global matching modes that change how text filter values are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modes {
    /// Match case-sensitively.
    pub case: bool,
    /// Match the whole value instead of a substring.
    pub exact: bool,
    /// Read filter values as regular expressions.
    pub regex: bool,
}

/// A parsed text filter value.
///
/// A leading `!` negates the match; `!!` escapes a literal `!`.
///
/// ```
/// use fieldsift::{Modes, TextPattern};
///
/// let pattern = TextPattern::parse("ali", Modes::default()).unwrap();
/// assert!(pattern.matches("Alice"));
///
/// let negated = TextPattern::parse("!ali", Modes::default()).unwrap();
/// assert!(!negated.matches("Alice"));
/// ```
#[derive(Debug, Clone)]
pub struct TextPattern {
    negate: bool,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Literal {
        needle: String,
        exact: bool,
        case: bool,
    },
    Regex(Regex),
}

impl TextPattern {
    /// Parses a raw filter value under the given modes.
    ///
    /// Fails only in regex mode, when the pattern does not compile.
    pub fn parse(raw: &str, modes: Modes) -> Result<Self, FieldError> {
        let (negate, body) = match raw.strip_prefix('!') {
            Some(rest) if rest.starts_with('!') => (false, rest),
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let matcher = if modes.regex {
            let pattern = if modes.exact {
                Cow::Owned(format!("^(?:{})$", body))
            } else {
                Cow::Borrowed(body)
            };
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(!modes.case)
                .build()
                .map_err(|source| FieldError::InvalidRegex {
                    pattern: body.to_string(),
                    source,
                })?;
            Matcher::Regex(regex)
        } else {
            Matcher::Literal {
                needle: if modes.case {
                    body.to_string()
                } else {
                    body.to_lowercase()
                },
                exact: modes.exact,
                case: modes.case,
            }
        };

        Ok(Self { negate, matcher })
    }

    /// Returns `true` if the pattern was negated with a leading `!`.
    pub fn is_negated(&self) -> bool {
        self.negate
    }

    /// Tests `text` against the pattern, applying negation.
    ///
    /// An empty text never satisfies a literal pattern, so a negated literal
    /// pattern always matches it.
    pub fn matches(&self, text: &str) -> bool {
        let found = match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(text),
            Matcher::Literal { .. } if text.is_empty() => false,
            Matcher::Literal {
                needle,
                exact,
                case,
            } => {
                let haystack = if *case {
                    Cow::Borrowed(text)
                } else {
                    Cow::Owned(text.to_lowercase())
                };
                if *exact {
                    haystack == needle.as_str()
                } else {
                    haystack.contains(needle.as_str())
                }
            }
        };
        found ^ self.negate
    }
}

/// Splits a delimited value into trimmed, non-empty parts.
pub(crate) fn split_parts<'a>(text: &'a str, delimiter: &'a str) -> impl Iterator<Item = &'a str> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}
