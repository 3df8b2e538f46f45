//! The clap adapter.
//!
//! [`App`] turns a [`Model`] and a [`Reader`] into a complete search
//! command: every synthesized [`OptionSpec`] becomes a clap [`Arg`], parsed
//! matches become [`ParsedOptions`], and the run goes through the pipeline.
//!
//! ```no_run
//! use fieldsift::{App, Field, JsonLinesReader, Model};
//!
//! let model = Model::builder()
//!     .field(Field::text("name").redirect_args())
//!     .field(Field::number("age"))
//!     .build()
//!     .unwrap();
//!
//! let app = App::builder(model, JsonLinesReader::file_option("file"))
//!     .name("people")
//!     .about("Search people.")
//!     .build()
//!     .unwrap();
//! std::process::exit(i32::from(app.run_code()));
//! ```

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};
use console::measure_text_width;
use thiserror::Error;
use tracing::debug;

use crate::error::{ConfigError, SearchError, UsageError};
use crate::invocation::Invocation;
use crate::model::Model;
use crate::options::{check_conflicts, Arity, OptionSpec, OptionTarget, ParsedOptions};
use crate::pipeline::{self, Summary};
use crate::reader::{has_positional, Reader};
use crate::style::{ColorMode, Painter};

/// Help heading of field filter options.
pub const FILTER_HEADING: &str = "Field filters";

/// Errors that end a command-line run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Argument parsing failed, or help or version was requested.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// The search itself failed.
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl RunError {
    /// Process exit code for this error: clap's own code for parse errors,
    /// 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Cli(err) => u8::try_from(err.exit_code()).unwrap_or(2),
            RunError::Search(_) => 1,
        }
    }
}

/// A search command over one model and one reader.
pub struct App<Rd> {
    model: Model,
    reader: Rd,
    params: Vec<OptionSpec>,
    name: String,
    version: Option<String>,
    about: Option<String>,
    color: ColorMode,
}

/// Builder for [`App`].
pub struct AppBuilder<Rd> {
    model: Model,
    reader: Rd,
    name: String,
    version: Option<String>,
    about: Option<String>,
    color: ColorMode,
}

impl<Rd: Reader> AppBuilder<Rd> {
    /// Command name shown in usage and help.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables `--version`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// When to style output. Defaults to [`ColorMode::Auto`].
    pub fn color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Checks the reader's parameters against the model's options.
    pub fn build(self) -> Result<App<Rd>, ConfigError> {
        let params = self.reader.params();
        let model = &self.model;
        check_conflicts(model.options().iter().chain(&params), |spec| {
            model.option_owner(spec)
        })?;
        Ok(App {
            model: self.model,
            reader: self.reader,
            params,
            name: self.name,
            version: self.version,
            about: self.about,
            color: self.color,
        })
    }
}

impl<Rd: Reader> App<Rd> {
    pub fn builder(model: Model, reader: Rd) -> AppBuilder<Rd> {
        AppBuilder {
            model,
            reader,
            name: "search".to_string(),
            version: None,
            about: None,
            color: ColorMode::default(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    fn specs(&self) -> impl Iterator<Item = &OptionSpec> {
        self.model.options().iter().chain(&self.params)
    }

    /// Builds the clap command.
    pub fn command(&self) -> Command {
        // Reader positionals must not swallow redirected filter values.
        let reader_last = self.model.redirect().is_some() && has_positional(&self.params);

        let mut cmd = Command::new(self.name.clone())
            .color(match self.color {
                ColorMode::Auto => ColorChoice::Auto,
                ColorMode::Always => ColorChoice::Always,
                ColorMode::Never => ColorChoice::Never,
            })
            .after_help(self.where_section());
        if let Some(version) = &self.version {
            cmd = cmd.version(version.clone());
        }
        if let Some(about) = &self.about {
            cmd = cmd.about(about.clone());
        }

        for spec in self.specs() {
            let last = reader_last && spec.target == OptionTarget::Reader;
            cmd = cmd.arg(to_arg(spec, last));
        }
        cmd
    }

    /// `Where:` section describing each metavar, for the end of `--help`.
    fn where_section(&self) -> String {
        let mut entries: BTreeMap<String, String> = BTreeMap::new();
        for (_, field) in self.model.fields() {
            if let Some(help) = field.metavar_help() {
                entries
                    .entry(field.names().typename.clone())
                    .or_insert(help);
            }
        }
        let width = entries
            .keys()
            .map(|name| measure_text_width(name))
            .max()
            .unwrap_or(0);

        let mut section = String::from("Where:");
        for (name, help) in &entries {
            let padding = " ".repeat(width - measure_text_width(name));
            section.push_str(&format!("\n  {}{}  {}", name, padding, help));
        }
        section
    }

    /// Collects option values from clap matches.
    pub fn parse_matches(&self, matches: &ArgMatches) -> ParsedOptions {
        let mut options = ParsedOptions::new();
        for spec in self.specs() {
            match spec.arity {
                Arity::Flag => {
                    if matches.get_flag(&spec.id) {
                        options.set_count(&spec.id, 1);
                    }
                }
                Arity::Count => options.set_count(&spec.id, matches.get_count(&spec.id)),
                Arity::Repeated | Arity::Positional => {
                    for value in matches.get_many::<String>(&spec.id).into_iter().flatten() {
                        options.push_value(&spec.id, value.as_str());
                    }
                }
            }
        }
        options
    }

    /// Runs the command on `args`, writing results to `out`.
    ///
    /// Bad option values come back as clap errors of kind
    /// [`ErrorKind::ValueValidation`], so they print and exit like any other
    /// usage error.
    pub fn run_with<I, T, W>(&self, args: I, out: W) -> Result<Summary, RunError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        W: Write,
    {
        let matches = self.command().try_get_matches_from(args)?;
        let options = self.parse_matches(&matches);
        let invocation =
            Invocation::parse(&self.model, &options).map_err(|err| self.usage_error(err))?;
        let records = self.reader.read(&options).map_err(SearchError::from)?;
        debug!(records = records.len(), "records read");

        let painter = Painter::new(self.color);
        let summary = pipeline::run(
            &self.model,
            &invocation,
            records.into_iter().map(Ok),
            painter,
            out,
        )?;
        Ok(summary)
    }

    fn usage_error(&self, err: UsageError) -> RunError {
        RunError::Cli(self.command().error(ErrorKind::ValueValidation, err))
    }

    /// Runs on the process arguments and returns the exit code.
    pub fn run_code(&self) -> u8 {
        let stdout = io::stdout();
        match self.run_with(std::env::args_os(), stdout.lock()) {
            Ok(_) => 0,
            Err(RunError::Cli(err)) => {
                let _ = err.print();
                u8::try_from(err.exit_code()).unwrap_or(2)
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                err.exit_code()
            }
        }
    }

    /// Runs on the process arguments.
    pub fn run(&self) -> ExitCode {
        ExitCode::from(self.run_code())
    }
}

fn to_arg(spec: &OptionSpec, last: bool) -> Arg {
    let mut arg = Arg::new(spec.id.clone()).help(spec.help.clone());
    if let Some(long) = &spec.long {
        arg = arg.long(long.clone());
    }
    if let Some(short) = spec.short {
        arg = arg.short(short);
    }
    for alias in &spec.aliases {
        arg = arg.visible_alias(alias.clone());
    }
    if let Some(metavar) = &spec.metavar {
        arg = arg.value_name(metavar.clone());
    }
    if let OptionTarget::Filter { .. } = spec.target {
        arg = arg.help_heading(FILTER_HEADING);
    }
    match spec.arity {
        Arity::Flag => arg.action(ArgAction::SetTrue),
        Arity::Count => arg.action(ArgAction::Count),
        Arity::Repeated => arg.action(ArgAction::Append).num_args(1),
        Arity::Positional => arg.action(ArgAction::Append).num_args(1..).last(last),
    }
}
