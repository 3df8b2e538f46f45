//! `people` - search a list of people stored as JSON lines.
//!
//! ```text
//! people --file data/people.jsonl alice
//! people --file data/people.jsonl --age '>=30' --non-member
//! people --file data/people.jsonl --count gender --count hobbies
//! cat data/people.jsonl | people --group gender --sort age
//! ```
//!
//! Set `FIELDSIFT_LOG=debug` to trace the pipeline on stderr.

use std::process::ExitCode;

use anyhow::{Context, Result};
use fieldsift::{App, Field, JsonLinesReader, Model, Style};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn model() -> Result<Model> {
    Model::builder()
        .field(Field::text("name").redirect_args())
        .field(Field::number("age").specials(["Unknown"]))
        .field(Field::choice("gender", ["Female", "Male", "Other"]).optalias("-g"))
        .field(Field::flag("member").truename("Club member").falsename("Guest"))
        .field(Field::delimited("hobbies", ",").helpname("hobby").verbosity(1))
        .field(
            Field::markup("bio")
                .realname("About")
                .markup_tag("b", Style::new().yellow().bold())
                .verbosity(1),
        )
        .field(Field::count("wins").verbosity(1))
        .field(
            Field::text("club")
                .implies("--member")
                .autofilter()
                .verbosity(2),
        )
        .build()
        .context("people model is misconfigured")
}

/// Logs to stderr when `FIELDSIFT_LOG` is set, using its value as the filter.
fn init_tracing() {
    let Ok(directives) = std::env::var("FIELDSIFT_LOG") else {
        return;
    };
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);
    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let app = App::builder(model()?, JsonLinesReader::file_option("file"))
        .name("people")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search a list of people.")
        .build()
        .context("people command is misconfigured")?;
    tracing::debug!(fields = app.model().len(), "starting");

    Ok(app.run())
}
