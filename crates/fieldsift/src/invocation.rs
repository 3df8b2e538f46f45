//! Turning parsed option values into a validated [`Invocation`].
//!
//! This is where every user-supplied value is checked: filter values are
//! parsed per field kind, FIELD arguments are resolved to fields, and
//! implied filters are injected. Any failure is a [`UsageError`] naming the
//! option and the offending token, raised before a single record is read.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::UsageError;
use crate::field::{FilterKind, Modes};
use crate::filter::{Combine, FieldFilter, FilterSpec, FilterTest};
use crate::model::{FieldId, Model};
use crate::options::{GlobalOption, OptionTarget, ParsedOptions};

/// Display choices of one invocation, before they are adjusted to the number
/// of matching records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub verbose: u8,
    pub brief: bool,
    pub long: bool,
    pub show: Vec<FieldId>,
    pub sort: Vec<FieldId>,
    pub desc: bool,
    pub group: Vec<FieldId>,
    pub count: Vec<FieldId>,
}

/// A validated search request.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub modes: Modes,
    pub filter: FilterSpec,
    pub display: DisplayOptions,
}

/// A raw filter value waiting to be parsed.
struct Pending {
    kind: FilterKind,
    raw: Option<String>,
    option: String,
    implied: bool,
}

impl Invocation {
    /// Validates `options` against `model`.
    ///
    /// ```
    /// use fieldsift::{Field, Invocation, Model, ParsedOptions};
    ///
    /// let model = Model::builder()
    ///     .field(Field::text("name"))
    ///     .field(Field::number("age"))
    ///     .build()
    ///     .unwrap();
    ///
    /// let options = ParsedOptions::new().with_values("age", ["X"]);
    /// let err = Invocation::parse(&model, &options).unwrap_err();
    /// assert_eq!(err.to_string(), "Invalid value for '--age': 'X' is not a valid number");
    /// ```
    pub fn parse(model: &Model, options: &ParsedOptions) -> Result<Self, UsageError> {
        let modes = Modes {
            case: options.flag(GlobalOption::Case.id()),
            exact: options.flag(GlobalOption::Exact.id()),
            regex: options.flag(GlobalOption::Regex.id()),
        };

        let fields = |global: GlobalOption| resolve_fields(model, options, global);
        let display = DisplayOptions {
            verbose: options.count(GlobalOption::Verbose.id()),
            brief: options.flag(GlobalOption::Brief.id()),
            long: options.flag(GlobalOption::Long.id()),
            show: fields(GlobalOption::Show)?,
            sort: fields(GlobalOption::Sort)?,
            desc: options.flag(GlobalOption::Desc.id()),
            group: fields(GlobalOption::Group)?,
            count: fields(GlobalOption::Count)?,
        };
        let or_fields = fields(GlobalOption::Or)?;

        let mut pending = collect_explicit(model, options);
        inject_implied(model, &mut pending);

        let mut filters = Vec::with_capacity(pending.len());
        for (id, values) in pending {
            let field = model.field(id);
            let tests = values
                .into_iter()
                .map(|value| {
                    let raw = value.raw.as_deref().unwrap_or_default();
                    field
                        .parse_filter(value.kind, raw, modes)
                        .map(|arg| FilterTest {
                            kind: value.kind,
                            arg,
                            implied: value.implied,
                        })
                        .map_err(|source| UsageError::new(value.option, raw, source))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let combine = if field.is_inclusive() || or_fields.contains(&id) {
                Combine::Any
            } else {
                Combine::All
            };
            filters.push(FieldFilter {
                field: id,
                combine,
                tests,
            });
        }

        let mut required = Vec::new();
        for &id in display
            .count
            .iter()
            .chain(&display.sort)
            .chain(&display.group)
            .chain(&display.show)
        {
            if model.field(id).is_autofilter() && !required.contains(&id) {
                required.push(id);
            }
        }

        let across = if options.flag(GlobalOption::Inclusive.id()) {
            Combine::Any
        } else {
            Combine::All
        };

        debug!(
            filters = filters.len(),
            required = required.len(),
            ?across,
            "invocation parsed"
        );

        Ok(Self {
            modes,
            filter: FilterSpec {
                filters,
                across,
                required,
            },
            display,
        })
    }
}

/// Resolves the FIELD values of a global option.
fn resolve_fields(
    model: &Model,
    options: &ParsedOptions,
    global: GlobalOption,
) -> Result<Vec<FieldId>, UsageError> {
    options
        .values(global.id())
        .iter()
        .map(|raw| {
            model.resolve_field(raw).map_err(|source| {
                UsageError::new(format!("--{}", global.id()), raw.as_str(), source)
            })
        })
        .collect()
}

/// Gathers explicit filter values per field, in field order. Positional
/// values go to the primary filter of the redirect field.
fn collect_explicit(model: &Model, options: &ParsedOptions) -> BTreeMap<FieldId, Vec<Pending>> {
    let mut pending: BTreeMap<FieldId, Vec<Pending>> = BTreeMap::new();
    for spec in model.options() {
        match spec.target {
            OptionTarget::Filter { field, kind } if kind.is_flag() => {
                if options.flag(&spec.id) {
                    pending.entry(field).or_default().push(Pending {
                        kind,
                        raw: None,
                        option: spec.display_name(),
                        implied: false,
                    });
                }
            }
            OptionTarget::Filter { field, kind } => {
                for raw in options.values(&spec.id) {
                    pending.entry(field).or_default().push(Pending {
                        kind,
                        raw: Some(raw.clone()),
                        option: spec.display_name(),
                        implied: false,
                    });
                }
            }
            OptionTarget::Redirect { field } => {
                let Some(kind) = model.field(field).filter_kinds().next() else {
                    continue;
                };
                let option = format!("--{}", model.field(field).option_name(kind));
                for raw in options.values(&spec.id) {
                    pending.entry(field).or_default().push(Pending {
                        kind,
                        raw: Some(raw.clone()),
                        option: option.clone(),
                        implied: false,
                    });
                }
            }
            OptionTarget::Global(_) | OptionTarget::Reader => {}
        }
    }
    pending
}

/// Adds implied filters of explicitly filtered fields to targets without an
/// explicit filter. Implied filters do not trigger further implied filters.
fn inject_implied(model: &Model, pending: &mut BTreeMap<FieldId, Vec<Pending>>) {
    let explicit: Vec<FieldId> = pending.keys().copied().collect();
    for &source in &explicit {
        let source_option = format!("--{}", model.field(source).names().optname);
        for implied in model.implied(source) {
            if explicit.contains(&implied.target) {
                continue;
            }
            let target = model.field(implied.target);
            pending.entry(implied.target).or_default().push(Pending {
                kind: implied.kind,
                raw: implied.value.clone(),
                option: format!(
                    "--{} (implied by {})",
                    target.option_name(implied.kind),
                    source_option
                ),
                implied: true,
            });
        }
    }
}
