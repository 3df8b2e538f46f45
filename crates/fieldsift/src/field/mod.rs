//! Field declarations.
//!
//! A [`Field`] is one named, typed attribute of the record shape. It knows how
//! to fetch its value from a [`Record`], how to parse filter values given on
//! the command line, how to test a record value against them, and how to
//! render the value.
//!
//! Fields are built with chained setters:
//!
//! ```
//! use fieldsift::Field;
//!
//! let age = Field::number("age").specials(["X"]).verbosity(1);
//! assert_eq!(age.names().realname, "Age");
//! assert_eq!(age.names().optname, "age");
//!
//! let hp = Field::count("hit_points");
//! assert_eq!(hp.names().realname, "Hit Points");
//! assert_eq!(hp.names().optname, "hit-points");
//! ```
//!
//! # Names
//!
//! Every field has five names. Each can be set explicitly; unset names are
//! derived from the declared name:
//!
//! | name       | default                                  | used for              |
//! |------------|------------------------------------------|-----------------------|
//! | `keyname`  | declared name                            | record lookup         |
//! | `realname` | declared name, `_` as space, title case  | labels                |
//! | `helpname` | `realname` lowercased                    | help and FIELD values |
//! | `optname`  | `helpname` with spaces as `-`            | option names          |
//! | `typename` | kind name, e.g. `NUMBER`                 | help metavar          |

mod choice;
mod format;
mod number;
mod text;

use std::collections::HashMap;

use console::Style;
use fieldsift_markup::{default_tag_styles, strip_tags};

use crate::error::FieldError;
use crate::record::Record;
use crate::value::{Number, Scalar, Value};

pub(crate) use choice::{complete, listing};
pub(crate) use number::{coerce as coerce_number, Coerced};
pub use number::{NumberTest, Operand};
pub(crate) use text::split_parts;
pub use text::{Modes, TextPattern};

/// The kinds of filter a field can synthesize options for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// `--{optname} VALUE`: value matches.
    Match,
    /// `--{optname}-isnt VALUE`: value does not match. Choice fields only.
    NotMatch,
    /// `--{optname}`: flag is set. Flag fields only.
    Set,
    /// `--non-{optname}`: flag is not set. Flag fields only.
    Unset,
}

impl FilterKind {
    /// Returns `true` if options of this kind take no value.
    pub fn is_flag(self) -> bool {
        matches!(self, FilterKind::Set | FilterKind::Unset)
    }
}

/// A filter value parsed for a specific field kind.
#[derive(Debug, Clone)]
pub enum FilterArg {
    /// Text-like fields.
    Text(TextPattern),
    /// Number and count fields.
    Number(NumberTest),
    /// Choice fields: the canonical choice the value completed to.
    Choice(String),
    /// Flag fields take no value.
    Flag,
}

/// Kind-specific configuration of a field.
#[derive(Debug, Clone)]
pub enum Kind {
    /// Free text, matched by substring.
    Text,
    /// Text holding several values separated by `delimiter`.
    Delimited { delimiter: String },
    /// Text with HTML-like markup tags.
    Markup { tags: HashMap<String, Style> },
    /// Numbers, with optional non-numeric `specials`.
    ///
    /// `count` only changes brief rendering: `3 Wins` instead of `Age 42`.
    Number { specials: Vec<String>, count: bool },
    /// One of a fixed set of values.
    Choice { choices: Vec<String> },
    /// Boolean.
    Flag {
        truename: Option<String>,
        falsename: Option<String>,
    },
}

impl Kind {
    /// Kind name, used as default metavar.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Text | Kind::Delimited { .. } | Kind::Markup { .. } => "TEXT",
            Kind::Number { .. } => "NUMBER",
            Kind::Choice { .. } => "CHOICE",
            Kind::Flag { .. } => "FLAG",
        }
    }

    /// Filter kinds this field kind synthesizes options for, primary first.
    pub fn filter_kinds(&self) -> &'static [FilterKind] {
        match self {
            Kind::Choice { .. } => &[FilterKind::Match, FilterKind::NotMatch],
            Kind::Flag { .. } => &[FilterKind::Set, FilterKind::Unset],
            _ => &[FilterKind::Match],
        }
    }
}

/// Configuration shared by all field kinds.
#[derive(Debug, Clone)]
pub(crate) struct FieldBase {
    pub(crate) name: String,
    pub(crate) keyname: Option<String>,
    pub(crate) realname: Option<String>,
    pub(crate) helpname: Option<String>,
    pub(crate) optname: Option<String>,
    pub(crate) typename: Option<String>,
    pub(crate) optalias: Option<String>,
    pub(crate) default: Option<Scalar>,
    pub(crate) inclusive: bool,
    pub(crate) skip_filters: Vec<FilterKind>,
    pub(crate) verbosity: Option<u8>,
    pub(crate) unlabeled: Option<bool>,
    pub(crate) brief_format: Option<String>,
    pub(crate) style: Option<Style>,
    pub(crate) redirect_args: bool,
    pub(crate) autofilter: bool,
    pub(crate) implies: Option<String>,
}

impl FieldBase {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            keyname: None,
            realname: None,
            helpname: None,
            optname: None,
            typename: None,
            optalias: None,
            default: None,
            inclusive: false,
            skip_filters: Vec::new(),
            verbosity: Some(0),
            unlabeled: None,
            brief_format: None,
            style: None,
            redirect_args: false,
            autofilter: false,
            implies: None,
        }
    }
}

/// A named, typed attribute of the record shape.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) base: FieldBase,
    pub(crate) kind: Kind,
    names: Names,
}

/// The resolved names of a field. See the [module docs](self) for how each
/// is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    pub keyname: String,
    pub realname: String,
    pub helpname: String,
    pub optname: String,
    pub typename: String,
}

impl Names {
    fn resolve(base: &FieldBase, kind: &Kind) -> Self {
        let keyname = base.keyname.clone().unwrap_or_else(|| base.name.clone());
        let realname = base
            .realname
            .clone()
            .unwrap_or_else(|| title_case(&base.name.replace('_', " ")));
        let helpname = base
            .helpname
            .clone()
            .unwrap_or_else(|| realname.to_lowercase());
        let optname = base
            .optname
            .clone()
            .unwrap_or_else(|| realname.to_lowercase().replace(' ', "-"));
        let typename = match (&base.typename, kind) {
            (Some(typename), _) => typename.clone(),
            (None, Kind::Choice { .. }) => helpname.to_uppercase(),
            (None, kind) => kind.name().to_string(),
        };
        Self {
            keyname,
            realname,
            helpname,
            optname,
            typename,
        }
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for c in text.chars() {
        if boundary {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        boundary = !c.is_alphabetic();
    }
    out
}

impl Field {
    fn with_kind(name: &str, kind: Kind) -> Self {
        let base = FieldBase::new(name);
        let names = Names::resolve(&base, &kind);
        Self { base, kind, names }
    }

    /// A free text field.
    pub fn text(name: &str) -> Self {
        Self::with_kind(name, Kind::Text)
    }

    /// A text field holding several values separated by `delimiter`.
    ///
    /// A filter matches when any of the values matches.
    pub fn delimited(name: &str, delimiter: &str) -> Self {
        Self::with_kind(
            name,
            Kind::Delimited {
                delimiter: delimiter.to_string(),
            },
        )
    }

    /// A text field whose values carry `<b>`/`<i>` style markup.
    pub fn markup(name: &str) -> Self {
        Self::with_kind(
            name,
            Kind::Markup {
                tags: default_tag_styles(),
            },
        )
    }

    /// A numeric field, rendered briefly as `Age 42`.
    pub fn number(name: &str) -> Self {
        Self::with_kind(
            name,
            Kind::Number {
                specials: Vec::new(),
                count: false,
            },
        )
    }

    /// A numeric field, rendered briefly as `3 Wins`.
    pub fn count(name: &str) -> Self {
        Self::with_kind(
            name,
            Kind::Number {
                specials: Vec::new(),
                count: true,
            },
        )
    }

    /// A field restricted to `choices`.
    pub fn choice<I, S>(name: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(
            name,
            Kind::Choice {
                choices: choices.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// A boolean field.
    pub fn flag(name: &str) -> Self {
        Self::with_kind(
            name,
            Kind::Flag {
                truename: None,
                falsename: None,
            },
        )
    }

    fn update(mut self, f: impl FnOnce(&mut FieldBase)) -> Self {
        f(&mut self.base);
        self.names = Names::resolve(&self.base, &self.kind);
        self
    }

    /// Key to look the value up under in records.
    pub fn keyname(self, keyname: &str) -> Self {
        self.update(|b| b.keyname = Some(keyname.to_string()))
    }

    /// Label used when rendering.
    pub fn realname(self, realname: &str) -> Self {
        self.update(|b| b.realname = Some(realname.to_string()))
    }

    /// Name used in help texts and accepted by `--show`, `--sort` and friends.
    pub fn helpname(self, helpname: &str) -> Self {
        self.update(|b| b.helpname = Some(helpname.to_string()))
    }

    /// Base name of the synthesized filter options.
    pub fn optname(self, optname: &str) -> Self {
        self.update(|b| b.optname = Some(optname.to_string()))
    }

    /// Metavar shown in help.
    pub fn typename(self, typename: &str) -> Self {
        self.update(|b| b.typename = Some(typename.to_string()))
    }

    /// Alternate spelling of the primary filter option, e.g. `-n`.
    pub fn optalias(self, optalias: &str) -> Self {
        self.update(|b| b.optalias = Some(optalias.to_string()))
    }

    /// Value used when a record lacks this field.
    pub fn default_value(self, value: impl Into<Scalar>) -> Self {
        let value = value.into();
        self.update(|b| b.default = Some(value))
    }

    /// Combine several values for this field with OR instead of AND.
    pub fn inclusive(self) -> Self {
        self.update(|b| b.inclusive = true)
    }

    /// Do not synthesize an option for `kind`.
    pub fn skip_filter(self, kind: FilterKind) -> Self {
        self.update(|b| b.skip_filters.push(kind))
    }

    /// Minimum verbosity at which the field is shown by default.
    pub fn verbosity(self, level: u8) -> Self {
        self.update(|b| b.verbosity = Some(level))
    }

    /// Only show the field when named by `--show`.
    pub fn hidden(self) -> Self {
        self.update(|b| b.verbosity = None)
    }

    /// Render the value without its label.
    pub fn unlabeled(self, unlabeled: bool) -> Self {
        self.update(|b| b.unlabeled = Some(unlabeled))
    }

    /// Brief rendering template with `{name}` and `{value}` placeholders.
    pub fn brief_format(self, format: &str) -> Self {
        self.update(|b| b.brief_format = Some(format.to_string()))
    }

    /// Terminal style of rendered values.
    pub fn style(self, style: Style) -> Self {
        self.update(|b| b.style = Some(style))
    }

    /// Use bare positional arguments as values for the primary filter.
    pub fn redirect_args(self) -> Self {
        self.update(|b| b.redirect_args = true)
    }

    /// Drop records missing this field whenever `--sort`, `--group`,
    /// `--count` or `--show` names it.
    pub fn autofilter(self) -> Self {
        self.update(|b| b.autofilter = true)
    }

    /// Filter options applied to other fields whenever this field is filtered
    /// on, e.g. `"--member --age >=18"`.
    ///
    /// Resolved and validated when the model is built.
    pub fn implies(self, options: &str) -> Self {
        self.update(|b| b.implies = Some(options.to_string()))
    }

    /// Non-numeric values accepted by a number field, e.g. `X`.
    pub fn specials<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Kind::Number { specials, .. } = &mut self.kind {
            specials.extend(values.into_iter().map(Into::into));
        }
        self
    }

    /// Brief rendering of a set flag.
    pub fn truename(mut self, name: &str) -> Self {
        if let Kind::Flag { truename, .. } = &mut self.kind {
            *truename = Some(name.to_string());
        }
        self
    }

    /// Brief rendering of an unset flag.
    pub fn falsename(mut self, name: &str) -> Self {
        if let Kind::Flag { falsename, .. } = &mut self.kind {
            *falsename = Some(name.to_string());
        }
        self
    }

    /// Style for a markup tag, e.g. `("u", Style::new().underlined())`.
    pub fn markup_tag(mut self, tag: &str, style: Style) -> Self {
        if let Kind::Markup { tags } = &mut self.kind {
            tags.insert(tag.to_ascii_lowercase(), style);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Resolved names.
    pub fn names(&self) -> &Names {
        &self.names
    }

    pub fn alias(&self) -> Option<&str> {
        self.base.optalias.as_deref()
    }

    pub fn is_inclusive(&self) -> bool {
        self.base.inclusive
    }

    /// `None` for fields only shown via `--show`.
    pub fn verbosity_level(&self) -> Option<u8> {
        self.base.verbosity
    }

    pub fn is_unlabeled(&self) -> bool {
        self.base.unlabeled.unwrap_or(false)
    }

    pub fn redirects_args(&self) -> bool {
        self.base.redirect_args
    }

    pub fn is_autofilter(&self) -> bool {
        self.base.autofilter
    }

    /// Filter kinds with a synthesized option, primary first.
    pub fn filter_kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.kind
            .filter_kinds()
            .iter()
            .copied()
            .filter(|kind| !self.base.skip_filters.contains(kind))
    }

    /// Long option name of the filter of `kind`, without dashes.
    pub fn option_name(&self, kind: FilterKind) -> String {
        let optname = &self.names.optname;
        match kind {
            FilterKind::Match | FilterKind::Set => optname.clone(),
            FilterKind::NotMatch => format!("{}-isnt", optname),
            FilterKind::Unset => format!("non-{}", optname),
        }
    }

    /// Help text of the filter option of `kind`.
    pub fn option_help(&self, kind: FilterKind) -> String {
        let helpname = &self.names.helpname;
        match (kind, &self.kind) {
            (FilterKind::Match, Kind::Number { .. }) => {
                format!("Filter on matching {} (number comparison).", helpname)
            }
            (FilterKind::Match, _) => format!("Filter on matching {}.", helpname),
            (FilterKind::NotMatch, _) => format!("Filter on non-matching {}.", helpname),
            (FilterKind::Set, _) => format!("Filter on {}.", helpname),
            (FilterKind::Unset, _) => format!("Filter on non-{}.", helpname),
        }
    }

    /// Longer description of this field's metavar, shown under "Where".
    pub fn metavar_help(&self) -> Option<String> {
        match &self.kind {
            Kind::Text | Kind::Delimited { .. } | Kind::Markup { .. } => Some(
                "A text partially matching the field value. The --case, --regex and \
                 --exact options can be applied. If prefixed with ! the match is negated."
                    .to_string(),
            ),
            Kind::Number { .. } => Some(
                "A number optionally prefixed by one of the supported comparison \
                 operators: ==, =, !=, !, <=, <, >=, >. With == being the default if \
                 only a number is given."
                    .to_string(),
            ),
            Kind::Choice { choices } => Some(format!("One of: {}.", listing(choices))),
            Kind::Flag { .. } => None,
        }
    }

    /// Fetches this field's value from `record`.
    ///
    /// Absent and null values fall back to the default, if any. Empty text in
    /// a number field counts as absent. An absent flag reads as unset.
    pub fn fetch<'a, R: Record + ?Sized>(&'a self, record: &'a R) -> Option<Value<'a>> {
        let value = record.field_value(&self.names.keyname);
        let missing = match (&value, &self.kind) {
            (Value::None, _) => true,
            (Value::Text(s), Kind::Number { .. }) => s.trim().is_empty(),
            _ => false,
        };
        if !missing {
            return Some(value);
        }
        match (&self.base.default, &self.kind) {
            (Some(default), _) => Some(default.as_value()),
            (None, Kind::Flag { .. }) => Some(Value::Bool(false)),
            (None, _) => None,
        }
    }

    /// Parses a raw filter value for the filter of `kind`.
    pub fn parse_filter(
        &self,
        kind: FilterKind,
        raw: &str,
        modes: Modes,
    ) -> Result<FilterArg, FieldError> {
        if kind.is_flag() {
            return Ok(FilterArg::Flag);
        }
        match &self.kind {
            Kind::Text | Kind::Delimited { .. } | Kind::Markup { .. } => {
                TextPattern::parse(raw, modes).map(FilterArg::Text)
            }
            Kind::Number { specials, .. } => {
                NumberTest::parse(raw, specials).map(FilterArg::Number)
            }
            Kind::Choice { choices } => {
                let index = complete(raw, choices)?;
                Ok(FilterArg::Choice(choices[index].clone()))
            }
            Kind::Flag { .. } => Ok(FilterArg::Flag),
        }
    }

    /// Tests a present value against one parsed filter.
    pub fn test(&self, kind: FilterKind, arg: &FilterArg, value: &Value<'_>) -> bool {
        match (&self.kind, arg) {
            (Kind::Text, FilterArg::Text(pattern)) => pattern.matches(&value.to_text()),
            (Kind::Markup { .. }, FilterArg::Text(pattern)) => {
                pattern.matches(&strip_tags(&value.to_text()))
            }
            (Kind::Delimited { delimiter }, FilterArg::Text(pattern)) => {
                let text = value.to_text();
                let found = split_parts(&text, delimiter).any(|part| pattern.matches(part));
                found
            }
            (Kind::Number { specials, .. }, FilterArg::Number(test)) => {
                test.matches(&number::coerce(value, specials))
            }
            (Kind::Choice { .. }, FilterArg::Choice(choice)) => {
                let equal = value.to_text().to_lowercase() == choice.to_lowercase();
                match kind {
                    FilterKind::NotMatch => !equal,
                    _ => equal,
                }
            }
            (Kind::Flag { .. }, FilterArg::Flag) => {
                let set = is_truthy(value);
                match kind {
                    FilterKind::Unset => !set,
                    _ => set,
                }
            }
            _ => false,
        }
    }
}

/// A flag is set by `true`, `1` or `"1"`.
pub(crate) fn is_truthy(value: &Value<'_>) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.compare(Number::I64(1)) == Some(std::cmp::Ordering::Equal),
        Value::Text(s) => s.trim() == "1",
        Value::None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod names {
        use super::*;

        #[test]
        fn derived_from_declared_name() {
            let field = Field::text("hit_points");
            assert_eq!(field.names().keyname, "hit_points");
            assert_eq!(field.names().realname, "Hit Points");
            assert_eq!(field.names().helpname, "hit points");
            assert_eq!(field.names().optname, "hit-points");
            assert_eq!(field.names().typename, "TEXT");
        }

        #[test]
        fn overrides_flow_down_the_chain() {
            let field = Field::number("hp").realname("Health Pool");
            assert_eq!(field.names().keyname, "hp");
            assert_eq!(field.names().helpname, "health pool");
            assert_eq!(field.names().optname, "health-pool");

            let field = Field::number("hp").realname("Health Pool").optname("hp");
            assert_eq!(field.names().optname, "hp");
            assert_eq!(field.names().helpname, "health pool");
        }

        #[test]
        fn choice_typename_is_helpname() {
            let field = Field::choice("gender", ["Female", "Male"]);
            assert_eq!(field.names().typename, "GENDER");
            assert_eq!(field.typename("SEX").names().typename, "SEX");
        }

        #[test]
        fn title_case_words() {
            assert_eq!(title_case("the great escape"), "The Great Escape");
            assert_eq!(title_case("mIxEd"), "Mixed");
            assert_eq!(title_case("a-b"), "A-B");
        }
    }

    mod options {
        use super::*;

        #[test]
        fn option_names_per_kind() {
            let flag = Field::flag("member");
            assert_eq!(flag.option_name(FilterKind::Set), "member");
            assert_eq!(flag.option_name(FilterKind::Unset), "non-member");

            let choice = Field::choice("gender", ["Female", "Male"]);
            assert_eq!(choice.option_name(FilterKind::NotMatch), "gender-isnt");
        }

        #[test]
        fn skipped_filters_are_not_listed() {
            let flag = Field::flag("member").skip_filter(FilterKind::Unset);
            assert_eq!(flag.filter_kinds().collect::<Vec<_>>(), vec![FilterKind::Set]);
        }

        #[test]
        fn help_texts() {
            let age = Field::number("age");
            assert_eq!(
                age.option_help(FilterKind::Match),
                "Filter on matching age (number comparison)."
            );
            let choice = Field::choice("gender", ["Male", "Female"]);
            assert_eq!(
                choice.metavar_help().unwrap(),
                "One of: female, male."
            );
            assert!(Field::flag("member").metavar_help().is_none());
        }
    }

    mod fetch {
        use super::*;

        #[test]
        fn present_value() {
            let record = json!({"name": "Alice"});
            assert_eq!(Field::text("name").fetch(&record), Some(Value::Text("Alice")));
        }

        #[test]
        fn keyname_is_used_for_lookup() {
            let record = json!({"full_name": "Alice"});
            let field = Field::text("name").keyname("full_name");
            assert_eq!(field.fetch(&record), Some(Value::Text("Alice")));
        }

        #[test]
        fn missing_and_null_use_default() {
            let field = Field::text("team").default_value("None");
            assert_eq!(field.fetch(&json!({})), Some(Value::Text("None")));
            assert_eq!(field.fetch(&json!({"team": null})), Some(Value::Text("None")));
            assert_eq!(Field::text("team").fetch(&json!({})), None);
        }

        #[test]
        fn empty_number_is_missing() {
            assert_eq!(Field::number("age").fetch(&json!({"age": " "})), None);
            assert_eq!(Field::text("age").fetch(&json!({"age": ""})), Some(Value::Text("")));
        }

        #[test]
        fn missing_flag_is_unset() {
            assert_eq!(Field::flag("member").fetch(&json!({})), Some(Value::Bool(false)));
        }
    }

    mod matching {
        use super::*;

        fn check(field: &Field, kind: FilterKind, raw: &str, value: Value<'_>) -> bool {
            let arg = field.parse_filter(kind, raw, Modes::default()).unwrap();
            field.test(kind, &arg, &value)
        }

        #[test]
        fn text() {
            let field = Field::text("name");
            assert!(check(&field, FilterKind::Match, "ali", Value::Text("Alice")));
            assert!(!check(&field, FilterKind::Match, "!ali", Value::Text("Alice")));
        }

        #[test]
        fn markup_matches_stripped_text() {
            let field = Field::markup("bio");
            assert!(check(&field, FilterKind::Match, "hero of", Value::Text("<i>Hero</i> of")));
            assert!(!check(&field, FilterKind::Match, "<i>", Value::Text("<i>Hero</i>")));
        }

        #[test]
        fn delimited_matches_any_part() {
            let field = Field::delimited("hobbies", ",");
            let value = Value::Text("chess, golf");
            assert!(check(&field, FilterKind::Match, "golf", value.clone()));
            assert!(check(&field, FilterKind::Match, "!golf", value.clone()));
            assert!(!check(&field, FilterKind::Match, "tennis", value.clone()));
            assert!(!check(&field, FilterKind::Match, "!golf", Value::Text("golf")));
        }

        #[test]
        fn number() {
            let field = Field::number("age").specials(["X"]);
            assert!(check(&field, FilterKind::Match, ">40", Value::Number(Number::I64(42))));
            assert!(check(&field, FilterKind::Match, "X", Value::Text("X")));
            assert!(!check(&field, FilterKind::Match, "42", Value::Text("old")));
        }

        #[test]
        fn choice() {
            let field = Field::choice("gender", ["Female", "Male"]);
            assert!(check(&field, FilterKind::Match, "fe", Value::Text("female")));
            assert!(!check(&field, FilterKind::Match, "male", Value::Text("Female")));
            assert!(check(&field, FilterKind::NotMatch, "male", Value::Text("Female")));
        }

        #[test]
        fn choice_ignores_text_modes() {
            let field = Field::choice("gender", ["Female", "Male"]);
            let modes = Modes {
                case: true,
                exact: true,
                regex: true,
            };
            let arg = field.parse_filter(FilterKind::Match, "f", modes).unwrap();
            assert!(field.test(FilterKind::Match, &arg, &Value::Text("FEMALE")));
        }

        #[test]
        fn choice_rejects_unknown() {
            let field = Field::choice("gender", ["Female", "Male"]);
            let err = field
                .parse_filter(FilterKind::Match, "x", Modes::default())
                .unwrap_err();
            assert!(matches!(err, FieldError::InvalidChoice { .. }));
        }

        #[test]
        fn flag() {
            let field = Field::flag("member");
            assert!(check(&field, FilterKind::Set, "", Value::Bool(true)));
            assert!(check(&field, FilterKind::Set, "", Value::Number(Number::I64(1))));
            assert!(check(&field, FilterKind::Set, "", Value::Text("1")));
            assert!(!check(&field, FilterKind::Set, "", Value::Text("yes")));
            assert!(check(&field, FilterKind::Unset, "", Value::Bool(false)));
        }
    }
}
