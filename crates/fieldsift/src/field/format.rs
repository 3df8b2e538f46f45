//! Rendering of field values.

use std::borrow::Cow;

use fieldsift_markup::strip_tags;

use super::{is_truthy, number, split_parts, Field, Kind};
use crate::style::Painter;
use crate::value::Value;

impl Field {
    /// Renders a present value, styled. Empty text stays empty.
    pub fn format_value(&self, value: &Value<'_>, painter: &Painter) -> String {
        let style = self.base.style.as_ref();
        match &self.kind {
            Kind::Markup { tags } => painter.markup(&value.to_text(), tags, style),
            Kind::Number { specials, .. } => {
                let text = match number::coerce(value, specials) {
                    number::Coerced::Number(n) => Cow::Owned(n.to_string()),
                    number::Coerced::Special(s) => Cow::Borrowed(s),
                    number::Coerced::Invalid(s) => s,
                };
                painter.paint(&text, style)
            }
            _ => painter.paint(&value.to_text(), style),
        }
    }

    /// Text shown in place of a missing value.
    pub fn format_null(&self) -> String {
        format!("No {}", self.names.realname)
    }

    /// Brief template, if any: explicit, or the number kinds' defaults.
    fn brief_template(&self) -> Option<Cow<'_, str>> {
        if let Some(format) = &self.base.brief_format {
            return Some(Cow::Borrowed(format));
        }
        match &self.kind {
            Kind::Number { count, .. } if !self.is_unlabeled() => Some(Cow::Borrowed(if *count {
                "{value} {name}"
            } else {
                "{name} {value}"
            })),
            _ => None,
        }
    }

    /// Renders a value for a brief (one line per record) listing.
    ///
    /// ```
    /// use fieldsift::{Field, Painter, Value, Number};
    ///
    /// let age = Field::number("age");
    /// let painter = Painter::plain();
    /// assert_eq!(age.format_brief(Some(&Value::Number(Number::I64(42))), &painter), "Age 42");
    /// assert_eq!(age.format_brief(None, &painter), "No Age");
    /// ```
    pub fn format_brief(&self, value: Option<&Value<'_>>, painter: &Painter) -> String {
        let Some(value) = value else {
            return self.format_null();
        };
        if let Kind::Flag {
            truename,
            falsename,
        } = &self.kind
        {
            let name = if is_truthy(value) {
                truename
                    .clone()
                    .unwrap_or_else(|| self.names.realname.clone())
            } else {
                falsename
                    .clone()
                    .unwrap_or_else(|| format!("Non-{}", self.names.realname))
            };
            return painter.paint(&name, self.base.style.as_ref());
        }

        let formatted = self.format_value(value, painter);
        if formatted.is_empty() {
            return formatted;
        }
        match self.brief_template() {
            Some(template) => template
                .replace("{name}", &self.names.realname)
                .replace("{value}", &formatted),
            None => formatted,
        }
    }

    /// Renders a value as one line of a long listing.
    ///
    /// Returns an empty string for empty values, which are skipped.
    pub fn format_long(&self, value: Option<&Value<'_>>, painter: &Painter) -> String {
        let Some(value) = value else {
            return format!("{}: {}", self.names.realname, self.format_null());
        };
        if let Kind::Flag { .. } = &self.kind {
            let answer = if is_truthy(value) { "Yes" } else { "No" };
            return format!("{}: {}", self.names.realname, answer);
        }

        let formatted = self.format_value(value, painter);
        if formatted.is_empty() || self.is_unlabeled() {
            return formatted;
        }
        format!("{}: {}", self.names.realname, formatted)
    }

    /// Keys this record adds to a `--count` breakdown of this field.
    ///
    /// Delimited fields count each part. A missing value counts under
    /// [`format_null`](Self::format_null).
    pub fn count_keys(&self, value: Option<&Value<'_>>, painter: &Painter) -> Vec<String> {
        let Some(value) = value else {
            return vec![self.format_null()];
        };
        match &self.kind {
            Kind::Delimited { delimiter } => {
                let text = value.to_text();
                let keys: Vec<String> = split_parts(&text, delimiter)
                    .map(|part| painter.paint(part, self.base.style.as_ref()))
                    .collect();
                if keys.is_empty() {
                    vec![self.format_null()]
                } else {
                    keys
                }
            }
            _ => vec![self.format_brief(Some(value), painter)],
        }
    }

    /// Plain text of a value for sorting and grouping.
    pub(crate) fn plain_text(&self, value: &Value<'_>) -> String {
        match &self.kind {
            Kind::Markup { .. } => strip_tags(&value.to_text()),
            _ => value.to_text().into_owned(),
        }
    }
}
