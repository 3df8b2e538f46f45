//! The record model: an ordered set of fields, validated once.
//!
//! Everything that can be wrong with a model declaration is checked by
//! [`ModelBuilder::build`], so a built [`Model`] never fails for reasons the
//! user did not cause.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, FieldError};
use crate::field::{complete, Field, FilterKind, Modes};
use crate::options::{self, OptionSpec, OptionTarget};
use crate::style::title_style;

/// Index of a field within its [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the field in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A filter applied to `target` whenever the declaring field is filtered on
/// and `target` is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpliedFilter {
    pub target: FieldId,
    pub kind: FilterKind,
    /// Raw value; `None` for flag filters.
    pub value: Option<String>,
}

/// An ordered collection of fields describing one record shape.
#[derive(Debug, Clone)]
pub struct Model {
    fields: Vec<Field>,
    implied: Vec<Vec<ImpliedFilter>>,
    options: Vec<OptionSpec>,
    redirect: Option<FieldId>,
}

impl Model {
    /// Starts declaring a model.
    ///
    /// ```
    /// use fieldsift::{Field, Model};
    ///
    /// let model = Model::builder()
    ///     .field(Field::text("name"))
    ///     .field(Field::number("age"))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(model.len(), 2);
    /// assert!(model.field(model.title()).is_unlabeled());
    /// ```
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`: a built model has at least one field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.0]
    }

    /// Fields with their ids, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &Field)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| (FieldId(index), field))
    }

    pub(crate) fn field_list(&self) -> &[Field] {
        &self.fields
    }

    /// The first declared field, which titles brief lines.
    pub fn title(&self) -> FieldId {
        FieldId(0)
    }

    /// Looks a field up by its declared name.
    pub fn find(&self, name: &str) -> Option<FieldId> {
        self.fields
            .iter()
            .position(|field| field.name() == name)
            .map(FieldId)
    }

    /// Resolves a user-supplied FIELD argument by helpname, accepting any
    /// unambiguous case-insensitive prefix.
    pub fn resolve_field(&self, raw: &str) -> Result<FieldId, FieldError> {
        let helpnames: Vec<&str> = self
            .fields
            .iter()
            .map(|field| field.names().helpname.as_str())
            .collect();
        complete(raw, &helpnames).map(FieldId)
    }

    /// Filters implied by filtering on `id`.
    pub fn implied(&self, id: FieldId) -> &[ImpliedFilter] {
        &self.implied[id.0]
    }

    /// All synthesized options, global ones first.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// The field that receives bare positional arguments, if any.
    pub fn redirect(&self) -> Option<FieldId> {
        self.redirect
    }

    /// Describes who owns an option, for conflict messages.
    pub(crate) fn option_owner(&self, spec: &OptionSpec) -> String {
        owner(&self.fields, spec)
    }
}

fn owner(fields: &[Field], spec: &OptionSpec) -> String {
    match spec.target {
        OptionTarget::Filter { field, .. } | OptionTarget::Redirect { field } => {
            format!("field '{}'", fields[field.0].name())
        }
        OptionTarget::Global(global) => format!("global option '{}'", global.id()),
        OptionTarget::Reader => format!("reader parameter '{}'", spec.id),
    }
}

/// Builder for [`Model`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    fields: Vec<Field>,
}

impl ModelBuilder {
    /// Appends a field. Declaration order is display order.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Validates the declaration and builds the model.
    pub fn build(self) -> Result<Model, ConfigError> {
        let mut fields = self.fields;
        let Some(first) = fields.first_mut() else {
            return Err(ConfigError::NoFields);
        };
        if first.base.unlabeled.is_none() {
            first.base.unlabeled = Some(true);
        }
        if first.base.style.is_none() {
            first.base.style = Some(title_style());
        }

        let mut names = HashSet::new();
        for field in &fields {
            if !names.insert(field.name()) {
                return Err(ConfigError::DuplicateField(field.name().to_string()));
            }
        }

        let options = options::synthesize(&fields);
        options::check_conflicts(&options, |spec| owner(&fields, spec))?;

        let redirect = options.iter().find_map(|spec| match spec.target {
            OptionTarget::Redirect { field } => Some(field),
            _ => None,
        });

        let implied = fields
            .iter()
            .enumerate()
            .map(|(index, field)| match &field.base.implies {
                Some(text) => resolve_implied(&fields, &options, index, text),
                None => Ok(Vec::new()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            fields = fields.len(),
            options = options.len(),
            "model built"
        );

        Ok(Model {
            fields,
            implied,
            options,
            redirect,
        })
    }
}

/// Parses an implied option string such as `--member --age '>=18'` into
/// filters on other fields.
fn resolve_implied(
    fields: &[Field],
    options: &[OptionSpec],
    source: usize,
    text: &str,
) -> Result<Vec<ImpliedFilter>, ConfigError> {
    let field_name = || fields[source].name().to_string();

    let tokens = shell_words::split(text).map_err(|err| ConfigError::MalformedImplied {
        field: field_name(),
        reason: err.to_string(),
    })?;

    let mut implied = Vec::new();
    let mut tokens = tokens.into_iter();
    while let Some(token) = tokens.next() {
        let (spelling, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => {
                (name.to_string(), Some(value.to_string()))
            }
            _ => (token, None),
        };

        let (target, kind) = options
            .iter()
            .filter(|spec| spec.is_spelled(&spelling))
            .find_map(|spec| match spec.target {
                OptionTarget::Filter { field, kind } => Some((field, kind)),
                _ => None,
            })
            .ok_or_else(|| ConfigError::UnknownImpliedOption {
                field: field_name(),
                option: spelling.clone(),
            })?;

        if target.0 == source {
            return Err(ConfigError::SelfImplied(field_name()));
        }

        let value = if kind.is_flag() {
            None
        } else {
            let value = inline.or_else(|| tokens.next()).ok_or_else(|| {
                ConfigError::ImpliedMissingValue {
                    field: field_name(),
                    option: spelling.clone(),
                }
            })?;
            fields[target.0]
                .parse_filter(kind, &value, Modes::default())
                .map_err(|source| ConfigError::ImpliedValue {
                    field: field_name(),
                    option: spelling.clone(),
                    source,
                })?;
            Some(value)
        };

        implied.push(ImpliedFilter {
            target,
            kind,
            value,
        });
    }
    Ok(implied)
}
