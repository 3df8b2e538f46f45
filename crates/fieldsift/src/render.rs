//! Rendering matched records.
//!
//! [`RenderState`] decides what to print from the invocation's display
//! options and the number of matched records. [`Printer`] writes records,
//! group headers and count breakdowns to any [`Write`].

use std::collections::HashMap;
use std::io::{self, Write};

use console::{measure_text_width, strip_ansi_codes};

use crate::invocation::DisplayOptions;
use crate::model::{FieldId, Model};
use crate::record::Record;
use crate::style::{count_style, group_style, label_style, Painter};

/// How records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One line per record.
    Brief,
    /// One line per field, records separated by blank lines.
    Long,
}

/// Display decisions for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    /// Effective verbosity after adjustments. Negative means counts only.
    pub verbosity: i32,
    /// `None` when only counts are printed.
    pub format: Option<Format>,
    /// Fields to print, in order.
    pub fields: Vec<FieldId>,
    /// Whether `fields` came from `--show`.
    pub explicit: bool,
}

impl RenderState {
    /// Applies the display rules, in order:
    ///
    /// 1. `--brief` sets verbosity to 0; otherwise a single match without
    ///    `--long` raises it by one.
    /// 2. `--count` lowers it by one.
    /// 3. Visible fields are the `--show` list (title field first), or every
    ///    field whose verbosity is at most the current level.
    /// 4. An explicit list holding a verbose field raises verbosity 0 to 1,
    ///    unless `--brief`.
    /// 5. Negative verbosity prints counts only; `--long` or positive
    ///    verbosity without `--brief` prints long; anything else is brief.
    pub fn resolve(model: &Model, display: &DisplayOptions, matched: usize) -> Self {
        let mut verbosity = i32::from(display.verbose);
        if display.brief {
            verbosity = 0;
        } else if !display.long && matched == 1 {
            verbosity += 1;
        }
        if !display.count.is_empty() {
            verbosity -= 1;
        }

        let explicit = !display.show.is_empty();
        let fields: Vec<FieldId> = if explicit {
            let title = model.title();
            let mut fields = display.show.clone();
            if !fields.contains(&title) {
                fields.insert(0, title);
            }
            fields
        } else {
            model
                .fields()
                .filter(|(_, field)| {
                    field
                        .verbosity_level()
                        .is_some_and(|level| i32::from(level) <= verbosity)
                })
                .map(|(id, _)| id)
                .collect()
        };

        if explicit
            && verbosity == 0
            && !display.brief
            && fields
                .iter()
                .any(|&id| model.field(id).verbosity_level().is_some_and(|level| level > 0))
        {
            verbosity = 1;
        }

        let format = if verbosity < 0 {
            None
        } else if display.long || (verbosity > 0 && !display.brief) {
            Some(Format::Long)
        } else {
            Some(Format::Brief)
        };

        Self {
            verbosity,
            format,
            fields,
            explicit,
        }
    }
}

/// Frequencies of values, remembering first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn add(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Entries by descending count, ties in first-seen order.
    pub fn sorted(&self) -> Vec<(String, usize)> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Display width of the widest key.
    pub fn width(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, _)| measure_text_width(key))
            .max()
            .unwrap_or(0)
    }
}

/// Writes rendered output.
pub struct Printer<'m, W> {
    model: &'m Model,
    painter: Painter,
    out: W,
}

impl<'m, W: Write> Printer<'m, W> {
    pub fn new(model: &'m Model, painter: Painter, out: W) -> Self {
        Self {
            model,
            painter,
            out,
        }
    }

    /// Prints one record in the state's format. Does nothing in counts-only
    /// mode.
    pub fn record<R: Record + ?Sized>(
        &mut self,
        state: &RenderState,
        record: &R,
    ) -> io::Result<()> {
        match state.format {
            Some(Format::Brief) => self.brief(&state.fields, record),
            Some(Format::Long) => self.long(&state.fields, record),
            None => Ok(()),
        }
    }

    /// One line: the first value, then the rest as sentences.
    ///
    /// `Alice: Age 42. Member.`
    pub fn brief<R: Record + ?Sized>(&mut self, fields: &[FieldId], record: &R) -> io::Result<()> {
        let mut line = String::new();
        let mut first = true;
        for &id in fields {
            let field = self.model.field(id);
            let Some(value) = field.fetch(record) else {
                continue;
            };
            let text = field.format_brief(Some(&value), &self.painter);
            if text.is_empty() {
                continue;
            }
            line.push_str(&text);
            if first {
                first = false;
                if fields.len() > 1 {
                    line.push_str(&self.painter.paint(":", field.base.style.as_ref()));
                    line.push(' ');
                }
            } else if strip_ansi_codes(&text).ends_with('.') {
                line.push(' ');
            } else {
                line.push_str(". ");
            }
        }
        writeln!(self.out, "{}", line.trim_end())
    }

    /// One line per present value, then a blank line.
    pub fn long<R: Record + ?Sized>(&mut self, fields: &[FieldId], record: &R) -> io::Result<()> {
        for &id in fields {
            let field = self.model.field(id);
            let Some(value) = field.fetch(record) else {
                continue;
            };
            let text = field.format_long(Some(&value), &self.painter);
            if !text.is_empty() {
                writeln!(self.out, "{}", text)?;
            }
        }
        writeln!(self.out)
    }

    /// Group header, e.g. `[ Red | No Age ]`.
    pub fn group_header<R: Record + ?Sized>(
        &mut self,
        fields: &[FieldId],
        record: &R,
        separate: bool,
    ) -> io::Result<()> {
        if separate {
            writeln!(self.out)?;
        }
        let header = fields
            .iter()
            .map(|&id| {
                let field = self.model.field(id);
                let value = field.fetch(record);
                strip_ansi_codes(&field.format_brief(value.as_ref(), &self.painter)).into_owned()
            })
            .collect::<Vec<_>>()
            .join(" | ");
        let header = format!("[ {} ]", header);
        writeln!(self.out, "{}", self.painter.paint(&header, Some(&group_style())))?;
        writeln!(self.out)
    }

    /// A blank line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Breakdown of one field's values. Labels are padded to `width`, the
    /// widest label across all breakdowns of the run.
    pub fn counts(&mut self, field: FieldId, tally: &Tally, width: usize) -> io::Result<()> {
        let title = format!("[ {} counts ]", self.model.field(field).names().realname);
        writeln!(self.out, "{}", self.painter.paint(&title, Some(&count_style())))?;
        writeln!(self.out)?;

        for (key, count) in tally.sorted() {
            let padding = " ".repeat(width.saturating_sub(measure_text_width(&key)));
            let label = format!("{}: {}", key, padding);
            writeln!(self.out, "{}{}", self.painter.paint(&label, Some(&label_style())), count)?;
        }
        writeln!(self.out)
    }

    /// `Total count: N`.
    pub fn total(&mut self, total: usize) -> io::Result<()> {
        let label = self.painter.paint("Total count:", Some(&count_style()));
        writeln!(self.out, "{} {}", label, total)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
