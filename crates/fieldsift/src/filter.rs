//! The filter engine: one combined predicate over records.
//!
//! Filter values for one field are ANDed, or ORed when the field is
//! inclusive or named by `--or`. Fields are ANDed together, or ORed under
//! `--inclusive`. A record missing a filtered field fails that field's
//! filters. Autofilter fields add a "value is present" requirement on top.

use tracing::trace;

use crate::field::{FilterArg, FilterKind};
use crate::model::{FieldId, Model};
use crate::record::Record;

/// How several boolean results combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    /// Every result must hold.
    #[default]
    All,
    /// Any result may hold.
    Any,
}

impl Combine {
    fn fold<I: IntoIterator<Item = bool>>(self, results: I) -> bool {
        let mut results = results.into_iter();
        match self {
            Combine::All => results.all(|result| result),
            Combine::Any => results.any(|result| result),
        }
    }
}

/// One parsed filter value, with where it came from.
#[derive(Debug, Clone)]
pub struct FilterTest {
    pub kind: FilterKind,
    pub arg: FilterArg,
    /// Set for values injected by an implied filter.
    pub implied: bool,
}

/// All filter values given for one field.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: FieldId,
    pub combine: Combine,
    pub tests: Vec<FilterTest>,
}

impl FieldFilter {
    fn matches<R: Record + ?Sized>(&self, model: &Model, record: &R) -> bool {
        let field = model.field(self.field);
        let Some(value) = field.fetch(record) else {
            return false;
        };
        self.combine
            .fold(self.tests.iter().map(|test| field.test(test.kind, &test.arg, &value)))
    }
}

/// The combined predicate of one invocation.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub filters: Vec<FieldFilter>,
    pub across: Combine,
    /// Fields that must have a value.
    pub required: Vec<FieldId>,
}

impl FilterSpec {
    /// Returns `true` if no filter and no requirement is set.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.required.is_empty()
    }

    /// Tests a record. An empty filter list matches every record.
    pub fn matches<R: Record + ?Sized>(&self, model: &Model, record: &R) -> bool {
        let filtered = self.filters.is_empty()
            || self
                .across
                .fold(self.filters.iter().map(|filter| filter.matches(model, record)));
        let present = self
            .required
            .iter()
            .all(|&id| model.field(id).fetch(record).is_some());
        trace!(filtered, present, "record tested");
        filtered && present
    }
}
