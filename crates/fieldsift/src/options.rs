//! Option synthesis.
//!
//! A [`Model`] is turned into a flat list of [`OptionSpec`]s: the global
//! options every search command has, plus one or two filter options per
//! field. The list is independent of any argument parser; [`crate::cli`] maps
//! it onto clap, and tests build [`ParsedOptions`] by hand.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::field::{Field, FilterKind};
use crate::model::{FieldId, Model};

/// Metavar of options that take a field name.
pub const FIELD_METAVAR: &str = "FIELD";

/// Id of the positional argument redirected to a field filter.
pub const REDIRECT_ID: &str = "_arg";

/// How many values an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A boolean switch.
    Flag,
    /// A switch that may be repeated, e.g. `-vv`.
    Count,
    /// An option taking one value, repeatable.
    Repeated,
    /// Bare positional values.
    Positional,
}

/// Field-independent options shared by every search command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalOption {
    Verbose,
    Brief,
    Long,
    Show,
    Case,
    Exact,
    Regex,
    Or,
    Inclusive,
    Sort,
    Desc,
    Group,
    Count,
}

impl GlobalOption {
    /// All global options, in help order.
    pub const ALL: [GlobalOption; 13] = [
        GlobalOption::Verbose,
        GlobalOption::Brief,
        GlobalOption::Long,
        GlobalOption::Show,
        GlobalOption::Case,
        GlobalOption::Exact,
        GlobalOption::Regex,
        GlobalOption::Or,
        GlobalOption::Inclusive,
        GlobalOption::Sort,
        GlobalOption::Desc,
        GlobalOption::Group,
        GlobalOption::Count,
    ];

    /// Option id, which is also its long name.
    pub fn id(self) -> &'static str {
        match self {
            GlobalOption::Verbose => "verbose",
            GlobalOption::Brief => "brief",
            GlobalOption::Long => "long",
            GlobalOption::Show => "show",
            GlobalOption::Case => "case",
            GlobalOption::Exact => "exact",
            GlobalOption::Regex => "regex",
            GlobalOption::Or => "or",
            GlobalOption::Inclusive => "inclusive",
            GlobalOption::Sort => "sort",
            GlobalOption::Desc => "desc",
            GlobalOption::Group => "group",
            GlobalOption::Count => "count",
        }
    }

    /// Returns `true` for options whose values are field names.
    pub fn takes_field(self) -> bool {
        matches!(
            self,
            GlobalOption::Show
                | GlobalOption::Or
                | GlobalOption::Sort
                | GlobalOption::Group
                | GlobalOption::Count
        )
    }

    fn help(self) -> &'static str {
        match self {
            GlobalOption::Verbose => "Show more data.",
            GlobalOption::Brief => "Show one line of data, regardless the level of verbose.",
            GlobalOption::Long => "Show multiple lines of data, regardless the level of verbose.",
            GlobalOption::Show => {
                "Show given field only. Can be repeated to show multiple fields in given order."
            }
            GlobalOption::Case => "Use case sensitive filtering.",
            GlobalOption::Exact => "Use exact match filtering.",
            GlobalOption::Regex => "Use regular expressions when filtering.",
            GlobalOption::Or => {
                "Treat multiple tests for given field with logical disjunction, i.e. OR-logic \
                 instead of AND-logic."
            }
            GlobalOption::Inclusive => {
                "Treat multiple tests for different fields with logical disjunction, i.e. \
                 OR-logic instead of AND-logic."
            }
            GlobalOption::Sort => "Sort results by given field.",
            GlobalOption::Desc => "Sort results in descending order.",
            GlobalOption::Group => "Group results by given field.",
            GlobalOption::Count => "Print a breakdown of all values for given field.",
        }
    }

    fn spec(self) -> OptionSpec {
        let arity = match self {
            GlobalOption::Verbose => Arity::Count,
            option if option.takes_field() => Arity::Repeated,
            _ => Arity::Flag,
        };
        OptionSpec {
            id: self.id().to_string(),
            long: Some(self.id().to_string()),
            short: (self == GlobalOption::Verbose).then_some('v'),
            aliases: Vec::new(),
            arity,
            help: self.help().to_string(),
            metavar: self.takes_field().then(|| FIELD_METAVAR.to_string()),
            target: OptionTarget::Global(self),
        }
    }
}

/// What a synthesized option feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTarget {
    /// A global option.
    Global(GlobalOption),
    /// A filter on a field.
    Filter { field: FieldId, kind: FilterKind },
    /// Bare positional values for the primary filter of a field.
    Redirect { field: FieldId },
    /// A parameter consumed by the reader.
    Reader,
}

/// A parser-independent description of one command-line option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Key of the option's values in [`ParsedOptions`].
    pub id: String,
    /// Long name without dashes. `None` for positionals.
    pub long: Option<String>,
    pub short: Option<char>,
    /// Extra long names, without dashes.
    pub aliases: Vec<String>,
    pub arity: Arity,
    pub help: String,
    pub metavar: Option<String>,
    pub target: OptionTarget,
}

impl OptionSpec {
    /// A positional parameter for a reader, e.g. input files.
    pub fn positional(id: &str, metavar: &str, help: &str) -> Self {
        Self {
            id: id.to_string(),
            long: None,
            short: None,
            aliases: Vec::new(),
            arity: Arity::Positional,
            help: help.to_string(),
            metavar: Some(metavar.to_string()),
            target: OptionTarget::Reader,
        }
    }

    /// A repeatable value option for a reader.
    pub fn repeated(long: &str, metavar: &str, help: &str) -> Self {
        Self {
            id: long.to_string(),
            long: Some(long.to_string()),
            short: None,
            aliases: Vec::new(),
            arity: Arity::Repeated,
            help: help.to_string(),
            metavar: Some(metavar.to_string()),
            target: OptionTarget::Reader,
        }
    }

    /// Returns `true` if `token` spells this option, e.g. `--age` or `-a`.
    pub fn is_spelled(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return self.long.as_deref() == Some(long) || self.aliases.iter().any(|a| a == long);
        }
        let mut chars = token.strip_prefix('-').unwrap_or_default().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.short == Some(c),
            _ => false,
        }
    }

    /// How the option is shown to users in messages.
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{}", long),
            (None, Some(short)) => format!("-{}", short),
            (None, None) => format!(
                "[{}]...",
                self.metavar
                    .clone()
                    .unwrap_or_else(|| self.id.to_uppercase())
            ),
        }
    }

    /// All names this option can be spelled with, dash-prefixed.
    fn spellings(&self) -> Vec<String> {
        let mut names: Vec<String> = self.long.iter().map(|l| format!("--{}", l)).collect();
        names.extend(self.aliases.iter().map(|a| format!("--{}", a)));
        names.extend(self.short.iter().map(|c| format!("-{}", c)));
        names
    }
}

/// Spellings taken by the argument parser itself.
const RESERVED: [&str; 4] = ["--help", "-h", "--version", "-V"];

/// Synthesizes the full option list of a model: global options, then field
/// filter options in field order.
///
/// ```
/// use fieldsift::{synthesize_options, Field, Model};
///
/// let model = Model::builder()
///     .field(Field::text("name"))
///     .field(Field::flag("member"))
///     .build()
///     .unwrap();
/// let longs: Vec<_> = synthesize_options(&model)
///     .into_iter()
///     .filter_map(|spec| spec.long)
///     .collect();
/// assert!(longs.contains(&"name".to_string()));
/// assert!(longs.contains(&"non-member".to_string()));
/// assert!(longs.contains(&"sort".to_string()));
/// ```
pub fn synthesize_options(model: &Model) -> Vec<OptionSpec> {
    synthesize(model.field_list())
}

pub(crate) fn synthesize(fields: &[Field]) -> Vec<OptionSpec> {
    let mut specs: Vec<OptionSpec> = GlobalOption::ALL.iter().map(|g| g.spec()).collect();

    for (index, field) in fields.iter().enumerate() {
        let id = FieldId::new(index);
        for (position, kind) in field.filter_kinds().enumerate() {
            let primary = position == 0;
            if primary && field.redirects_args() {
                specs.push(OptionSpec {
                    id: REDIRECT_ID.to_string(),
                    long: None,
                    short: None,
                    aliases: Vec::new(),
                    arity: Arity::Positional,
                    help: field.option_help(kind),
                    metavar: Some(field.names().typename.clone()),
                    target: OptionTarget::Redirect { field: id },
                });
            }

            let long = field.option_name(kind);
            let (short, aliases) = match field.alias().filter(|_| primary) {
                Some(alias) => split_alias(alias),
                None => (None, Vec::new()),
            };
            specs.push(OptionSpec {
                id: long.clone(),
                long: Some(long),
                short,
                aliases,
                arity: if kind.is_flag() {
                    Arity::Flag
                } else {
                    Arity::Repeated
                },
                help: field.option_help(kind),
                metavar: (!kind.is_flag()).then(|| field.names().typename.clone()),
                target: OptionTarget::Filter { field: id, kind },
            });
        }
    }
    specs
}

/// `-n` becomes a short flag, anything else a long alias.
fn split_alias(alias: &str) -> (Option<char>, Vec<String>) {
    if let Some(long) = alias.strip_prefix("--") {
        return (None, vec![long.to_string()]);
    }
    let bare = alias.trim_start_matches('-');
    let mut chars = bare.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => (Some(c), Vec::new()),
        _ => (None, vec![bare.to_string()]),
    }
}

/// Fails if two options share a spelling, or one is taken by the parser.
pub(crate) fn check_conflicts<'a, I, F>(specs: I, owner: F) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a OptionSpec>,
    F: Fn(&OptionSpec) -> String,
{
    let mut seen: BTreeMap<String, String> = RESERVED
        .iter()
        .map(|name| (name.to_string(), "the argument parser".to_string()))
        .collect();
    let mut redirect: Option<String> = None;

    for spec in specs {
        let who = owner(spec);
        if let OptionTarget::Redirect { .. } = spec.target {
            if let Some(first) = redirect.replace(who.clone()) {
                return Err(ConfigError::MultipleRedirects { first, second: who });
            }
        }
        for name in spec.spellings() {
            if let Some(first) = seen.get(&name) {
                return Err(ConfigError::OptionConflict {
                    option: name.trim_start_matches('-').to_string(),
                    first: first.clone(),
                    second: who,
                });
            }
            seen.insert(name, who.clone());
        }
    }
    Ok(())
}

/// Option values after argument parsing, keyed by [`OptionSpec::id`].
///
/// Built by the clap adapter, or by hand in tests:
///
/// ```
/// use fieldsift::ParsedOptions;
///
/// let options = ParsedOptions::new()
///     .with_values("age", [">=18"])
///     .with_flag("brief")
///     .with_count("verbose", 2);
/// assert_eq!(options.values("age"), [">=18"]);
/// assert!(options.flag("brief"));
/// assert_eq!(options.count("verbose"), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: BTreeMap<String, Vec<String>>,
    counts: BTreeMap<String, u8>,
}

impl ParsedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value for `id`.
    pub fn push_value(&mut self, id: &str, value: impl Into<String>) {
        self.values
            .entry(id.to_string())
            .or_default()
            .push(value.into());
    }

    /// Sets how many times a switch was given.
    pub fn set_count(&mut self, id: &str, count: u8) {
        if count == 0 {
            self.counts.remove(id);
        } else {
            self.counts.insert(id.to_string(), count);
        }
    }

    pub fn with_values<I, S>(mut self, id: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.push_value(id, value);
        }
        self
    }

    pub fn with_flag(self, id: &str) -> Self {
        self.with_count(id, 1)
    }

    pub fn with_count(mut self, id: &str, count: u8) -> Self {
        self.set_count(id, count);
        self
    }

    /// Values given for `id`, in command-line order.
    pub fn values(&self, id: &str) -> &[String] {
        self.values.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn flag(&self, id: &str) -> bool {
        self.count(id) > 0
    }

    pub fn count(&self, id: &str) -> u8 {
        self.counts.get(id).copied().unwrap_or(0)
    }
}
