//! The search pipeline: filter, sort, print, count.
//!
//! Records flow through four stages. Filtering drops records the
//! invocation's predicate rejects. Sorting orders the survivors by the
//! group fields followed by the sort fields. Printing writes each record,
//! with a header whenever the group changes. Counting tallies the values of
//! every `--count` field and finishes with the total.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::Write;

use tracing::debug;

use crate::error::{ReadError, Result};
use crate::invocation::Invocation;
use crate::model::{FieldId, Model};
use crate::ordering::{compare_keys, record_key, sort_records, Dir, SortKey};
use crate::record::Record;
use crate::render::{Format, Printer, RenderState, Tally};
use crate::style::Painter;

/// What a run printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of records that passed the filters.
    pub total: usize,
    /// Format records were printed in, `None` for counts only.
    pub format: Option<Format>,
    /// Effective verbosity.
    pub verbosity: i32,
    /// Value frequencies per `--count` field.
    pub counts: BTreeMap<FieldId, Vec<(String, usize)>>,
}

/// Runs a validated invocation over `records`, writing to `out`.
///
/// Reader errors abort the run before anything is printed.
pub fn run<R, I, W>(
    model: &Model,
    invocation: &Invocation,
    records: I,
    painter: Painter,
    out: W,
) -> Result<Summary>
where
    R: Record,
    I: IntoIterator<Item = std::result::Result<R, ReadError>>,
    W: Write,
{
    let mut matched = Vec::new();
    let mut seen = 0usize;
    for record in records {
        let record = record?;
        seen += 1;
        if invocation.filter.matches(model, &record) {
            matched.push(record);
        }
    }
    debug!(seen, matched = matched.len(), "records filtered");

    let display = &invocation.display;
    let sort_fields: Vec<FieldId> = display
        .group
        .iter()
        .chain(&display.sort)
        .copied()
        .collect();
    let dir = if display.desc { Dir::Desc } else { Dir::Asc };
    let matched = sort_records(model, &sort_fields, dir, matched)?;

    let state = RenderState::resolve(model, display, matched.len());
    debug!(
        verbosity = state.verbosity,
        format = ?state.format,
        fields = state.fields.len(),
        "render state resolved"
    );

    let mut printer = Printer::new(model, painter, out);
    let mut tallies: Vec<(FieldId, Tally)> = display
        .count
        .iter()
        .map(|&id| (id, Tally::default()))
        .collect();
    let mut current_group: Option<Vec<SortKey>> = None;

    for record in &matched {
        for (id, tally) in tallies.iter_mut() {
            let field = model.field(*id);
            for key in field.count_keys(field.fetch(record).as_ref(), &painter) {
                tally.add(key);
            }
        }

        let Some(format) = state.format else {
            continue;
        };

        if !display.group.is_empty() {
            let group = record_key(model, &display.group, record)?;
            if !same_group(current_group.as_deref(), &group) {
                let separate = current_group.is_some() && format == Format::Brief;
                printer.group_header(&display.group, record, separate)?;
                current_group = Some(group);
            }
        }

        printer.record(&state, record)?;
    }

    if state.format == Some(Format::Brief) {
        printer.blank()?;
    }
    let width = tallies.iter().map(|(_, tally)| tally.width()).max().unwrap_or(0);
    for (id, tally) in &tallies {
        printer.counts(*id, tally, width)?;
    }
    printer.total(matched.len())?;

    Ok(Summary {
        total: matched.len(),
        format: state.format,
        verbosity: state.verbosity,
        counts: tallies
            .into_iter()
            .map(|(id, tally)| (id, tally.sorted()))
            .collect(),
    })
}

/// Records share a group when their group keys compare equal, the same
/// test the sort used to make groups contiguous.
fn same_group(current: Option<&[SortKey]>, next: &[SortKey]) -> bool {
    current.is_some_and(|current| compare_keys(current, next, Dir::Asc) == Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::field::Field;
    use crate::options::ParsedOptions;
    use serde_json::{json, Value as Json};

    fn model() -> Model {
        Model::builder()
            .field(Field::text("name").redirect_args())
            .field(Field::number("age"))
            .field(Field::text("team").verbosity(1))
            .build()
            .unwrap()
    }

    fn data() -> Vec<Json> {
        vec![
            json!({"name": "Alice", "age": 30, "team": "Red"}),
            json!({"name": "Bob", "age": 25, "team": "Blue"}),
            json!({"name": "Carol", "team": "Red"}),
        ]
    }

    fn search(options: ParsedOptions) -> (Summary, String) {
        let model = model();
        let invocation = Invocation::parse(&model, &options).unwrap();
        let mut out = Vec::new();
        let records = data().into_iter().map(Ok);
        let summary = run(&model, &invocation, records, Painter::plain(), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn brief_listing() {
        let (summary, out) = search(ParsedOptions::new());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.format, Some(Format::Brief));
        assert_eq!(
            out,
            "Alice: Age 30.\nBob: Age 25.\nCarol\n\nTotal count: 3\n"
        );
    }

    #[test]
    fn single_match_prints_long() {
        let (summary, out) = search(ParsedOptions::new().with_values("_arg", ["bob"]));
        assert_eq!(summary.total, 1);
        assert_eq!(summary.format, Some(Format::Long));
        assert_eq!(out, "Bob\nAge: 25\nTeam: Blue\n\nTotal count: 1\n");
    }

    #[test]
    fn no_match_prints_total_only() {
        let (summary, out) = search(ParsedOptions::new().with_values("name", ["zed"]));
        assert_eq!(summary.total, 0);
        assert_eq!(out, "\nTotal count: 0\n");
    }

    #[test]
    fn groups_get_headers() {
        let (_, out) = search(ParsedOptions::new().with_values("group", ["team"]));
        assert_eq!(
            out,
            "[ Blue ]\n\nBob: Age 25.\n\n[ Red ]\n\nAlice: Age 30.\nCarol\n\nTotal count: 3\n"
        );
    }

    fn group_headers(model: &Model, records: Vec<Json>, group: &str) -> Vec<String> {
        let options = ParsedOptions::new()
            .with_values("group", [group])
            .with_flag("brief");
        let invocation = Invocation::parse(model, &options).unwrap();
        let mut out = Vec::new();
        run(model, &invocation, records.into_iter().map(Ok), Painter::plain(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .filter(|line| line.starts_with("[ "))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn groups_ignore_case() {
        let records = vec![
            json!({"name": "a", "team": "Red"}),
            json!({"name": "b", "team": "red"}),
            json!({"name": "c", "team": "Red"}),
            json!({"name": "d", "team": "Blue"}),
        ];
        assert_eq!(group_headers(&model(), records, "team"), ["[ Blue ]", "[ Red ]"]);
    }

    #[test]
    fn groups_ignore_markup() {
        let model = Model::builder()
            .field(Field::text("name"))
            .field(Field::markup("club"))
            .build()
            .unwrap();
        let records = vec![
            json!({"name": "a", "club": "<b>Chess</b>"}),
            json!({"name": "b", "club": "chess"}),
            json!({"name": "c", "club": "Chess"}),
        ];
        assert_eq!(group_headers(&model, records, "club"), ["[ Chess ]"]);
    }

    #[test]
    fn count_only() {
        let (summary, out) = search(ParsedOptions::new().with_values("count", ["team"]));
        assert_eq!(summary.format, None);
        assert_eq!(
            summary.counts.values().next().unwrap(),
            &vec![("Red".to_string(), 2), ("Blue".to_string(), 1)]
        );
        assert_eq!(
            out,
            "[ Team counts ]\n\nRed:  2\nBlue: 1\n\nTotal count: 3\n"
        );
    }

    #[test]
    fn sort_descending() {
        let (_, out) = search(
            ParsedOptions::new()
                .with_values("sort", ["age"])
                .with_flag("desc"),
        );
        assert_eq!(out, "Carol\nAlice: Age 30.\nBob: Age 25.\n\nTotal count: 3\n");
    }

    #[test]
    fn reader_error_aborts() {
        let model = model();
        let invocation = Invocation::default();
        let records = vec![Ok(json!({"name": "a"})), Err(ReadError::Other("boom".into()))];
        let mut out = Vec::new();
        let err = run(&model, &invocation, records, Painter::plain(), &mut out).unwrap_err();
        assert!(matches!(err, SearchError::Read(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn unsortable_value_aborts() {
        let model = model();
        let options = ParsedOptions::new().with_values("sort", ["age"]);
        let invocation = Invocation::parse(&model, &options).unwrap();
        let records = vec![Ok(json!({"name": "a", "age": "old"}))];
        let err = run(&model, &invocation, records, Painter::plain(), Vec::new()).unwrap_err();
        assert!(matches!(err, SearchError::Unsortable { .. }));
    }
}
