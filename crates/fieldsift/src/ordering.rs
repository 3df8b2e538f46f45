//! Sorting records by field values.
//!
//! Provides [`Dir`] for sort direction and [`SortKey`], the comparable form
//! of one field value. Sorting is stable: records with equal keys keep their
//! input order in both directions.

use std::cmp::Ordering;

use crate::error::SearchError;
use crate::field::{coerce_number, is_truthy, Coerced, Field, Kind};
use crate::model::{FieldId, Model};
use crate::record::Record;
use crate::value::{Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first, missing values last).
    #[default]
    Asc,
    /// The exact reverse of ascending.
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparable form of a field value.
///
/// Within one field: numbers sort before specials, flags sort set first,
/// text sorts case-insensitively, and missing values sort last.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(Number),
    Special(String),
    Text(String),
    Flag(bool),
    Missing,
}

impl SortKey {
    /// Compares two keys in ascending order.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        use SortKey::*;
        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Missing, _) => Ordering::Greater,
            (_, Missing) => Ordering::Less,

            (Number(a), Number(b)) => a.compare(*b).unwrap_or(Ordering::Equal),
            (Number(_), Special(_)) => Ordering::Less,
            (Special(_), Number(_)) => Ordering::Greater,
            (Special(a), Special(b)) => a.cmp(b),

            (Text(a), Text(b)) => a.cmp(b),
            // Set flags first.
            (Flag(a), Flag(b)) => b.cmp(a),

            // Keys of one field never mix other kinds.
            _ => Ordering::Equal,
        }
    }
}

impl Field {
    /// Returns the sort key of a fetched value.
    ///
    /// Fails for text in a number field that is neither a number nor a
    /// special.
    pub fn sort_key(&self, value: Option<&Value<'_>>) -> Result<SortKey, SearchError> {
        let Some(value) = value else {
            return Ok(SortKey::Missing);
        };
        let key = match &self.kind {
            Kind::Number { specials, .. } => match coerce_number(value, specials) {
                Coerced::Number(n) => SortKey::Number(n),
                Coerced::Special(s) => SortKey::Special(s.to_string()),
                Coerced::Invalid(s) => {
                    return Err(SearchError::Unsortable {
                        field: self.names().realname.clone(),
                        value: s.into_owned(),
                    })
                }
            },
            Kind::Flag { .. } => SortKey::Flag(is_truthy(value)),
            _ => SortKey::Text(self.plain_text(value).to_lowercase()),
        };
        Ok(key)
    }
}

/// Computes the composite sort key of a record over `fields`.
pub fn record_key<R: Record + ?Sized>(
    model: &Model,
    fields: &[FieldId],
    record: &R,
) -> Result<Vec<SortKey>, SearchError> {
    fields
        .iter()
        .map(|&id| {
            let field = model.field(id);
            field.sort_key(field.fetch(record).as_ref())
        })
        .collect()
}

/// Compares composite keys field by field, then applies `dir`.
pub fn compare_keys(a: &[SortKey], b: &[SortKey], dir: Dir) -> Ordering {
    let ordering = a
        .iter()
        .zip(b)
        .map(|(a, b)| a.compare(b))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal);
    dir.apply(ordering)
}

/// Stably sorts records by `fields`.
///
/// All keys are computed up front, so an unsortable value fails the sort
/// before any reordering happens.
pub fn sort_records<R: Record>(
    model: &Model,
    fields: &[FieldId],
    dir: Dir,
    records: Vec<R>,
) -> Result<Vec<R>, SearchError> {
    if fields.is_empty() {
        return Ok(records);
    }
    let mut keyed = records
        .into_iter()
        .map(|record| record_key(model, fields, &record).map(|key| (key, record)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, dir));
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}
