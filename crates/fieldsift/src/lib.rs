//! Fieldsift - declare a record shape once, search it from the command line.
//!
//! A [`Model`] is an ordered list of typed [`Field`]s. From it, fieldsift
//! derives:
//!
//! - Command-line filter options for every field (`--age '>=18'`,
//!   `--gender-isnt male`, `--non-member`, ...)
//! - A predicate engine combining those filters per field and across fields
//! - Sorting, grouping and value counts
//! - Brief (one line) and long (one line per field) record rendering
//!
//! # Quick Start
//!
//! ```rust
//! use fieldsift::{pipeline, Field, Invocation, Model, Painter, ParsedOptions};
//! use serde_json::json;
//!
//! let model = Model::builder()
//!     .field(Field::text("name").redirect_args())
//!     .field(Field::number("age"))
//!     .field(Field::flag("member"))
//!     .build()
//!     .unwrap();
//!
//! let records = vec![
//!     json!({"name": "Alice", "age": 42, "member": true}),
//!     json!({"name": "Bob", "age": 17}),
//!     json!({"name": "Carol", "age": 30, "member": true}),
//! ];
//!
//! // What `people --member --brief` parses to.
//! let options = ParsedOptions::new().with_flag("member").with_flag("brief");
//! let invocation = Invocation::parse(&model, &options).unwrap();
//!
//! let mut out = Vec::new();
//! let summary = pipeline::run(
//!     &model,
//!     &invocation,
//!     records.into_iter().map(Ok),
//!     Painter::plain(),
//!     &mut out,
//! )
//! .unwrap();
//!
//! assert_eq!(summary.total, 2);
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "Alice: Age 42. Member.\nCarol: Age 30. Member.\n\nTotal count: 2\n"
//! );
//! ```
//!
//! For a complete command, hand the model and a [`Reader`] to [`App`].
//!
//! # Field Kinds
//!
//! | Kind | Filter options | Matching |
//! |------|----------------|----------|
//! | Text | `--{name}` | substring, or exact or regex with `--exact` / `--regex` |
//! | Delimited | `--{name}` | any part of the split value |
//! | Markup | `--{name}` | the value with tags stripped |
//! | Number | `--{name}` | `==`, `!=`, `<`, `<=`, `>`, `>=` and specials |
//! | Choice | `--{name}`, `--{name}-isnt` | unique prefix of a choice |
//! | Flag | `--{name}`, `--non-{name}` | set or unset |
//!
//! # Filter Semantics
//!
//! ```text
//! match = combine_across(fields, combine_within(field values))
//!       ∧ (every referenced autofilter field has a value)
//! ```
//!
//! - Values of one field are ANDed, or ORed for inclusive fields and fields
//!   named by `--or`
//! - Fields are ANDed, or ORed under `--inclusive`
//! - A missing value fails every filter on its field, negated ones included

mod cli;
mod error;
mod field;
mod filter;
mod invocation;
mod model;
mod op;
mod options;
mod ordering;
pub mod pipeline;
mod reader;
mod record;
mod render;
mod style;
mod value;

// Re-export public API
pub use cli::{App, AppBuilder, RunError, FILTER_HEADING};
pub use error::{ConfigError, FieldError, ReadError, Result, SearchError, UsageError};
pub use field::{
    Field, FilterArg, FilterKind, Kind, Modes, Names, NumberTest, Operand, TextPattern,
};
pub use filter::{Combine, FieldFilter, FilterSpec, FilterTest};
pub use invocation::{DisplayOptions, Invocation};
pub use model::{FieldId, ImpliedFilter, Model, ModelBuilder};
pub use op::Op;
pub use options::{
    synthesize_options, Arity, GlobalOption, OptionSpec, OptionTarget, ParsedOptions,
    FIELD_METAVAR, REDIRECT_ID,
};
pub use ordering::{compare_keys, record_key, sort_records, Dir, SortKey};
pub use pipeline::Summary;
pub use reader::{JsonLinesReader, JsonReader, Reader, FILE_ID};
pub use record::Record;
pub use render::{Format, Printer, RenderState, Tally};
pub use style::{ColorMode, Painter};
pub use value::{Number, Scalar, Value};

/// Re-exported so field styles can be declared without a direct dependency.
pub use console::Style;
