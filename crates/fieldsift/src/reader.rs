//! Record sources.
//!
//! A [`Reader`] declares the command-line parameters it needs and produces
//! records from the parsed options. Two file readers are provided:
//! [`JsonReader`] for files holding one JSON array each, and
//! [`JsonLinesReader`] for one JSON object per line. Both read standard
//! input when no file is given.
//!
//! Any closure taking [`ParsedOptions`] is a reader too, which is the easy
//! way to search records that are already in memory:
//!
//! ```
//! use fieldsift::{ParsedOptions, ReadError, Reader};
//! use serde_json::json;
//!
//! let reader = |_: &ParsedOptions| -> Result<Vec<serde_json::Value>, ReadError> {
//!     Ok(vec![json!({"name": "Alice"})])
//! };
//! assert!(reader.params().is_empty());
//! assert_eq!(reader.read(&ParsedOptions::new()).unwrap().len(), 1);
//! ```

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::error::ReadError;
use crate::options::{Arity, OptionSpec, ParsedOptions};
use crate::record::Record;

/// Id of the default input file parameter.
pub const FILE_ID: &str = "file";

/// Placeholder path used in errors about standard input.
const STDIN_PATH: &str = "<stdin>";

/// A source of records.
pub trait Reader {
    type Record: Record;

    /// Parameters this reader adds to the command line.
    fn params(&self) -> Vec<OptionSpec> {
        Vec::new()
    }

    /// Produces all records. Called once per run, after option validation.
    fn read(&self, options: &ParsedOptions) -> Result<Vec<Self::Record>, ReadError>;
}

impl<F, R> Reader for F
where
    F: Fn(&ParsedOptions) -> Result<Vec<R>, ReadError>,
    R: Record,
{
    type Record = R;

    fn read(&self, options: &ParsedOptions) -> Result<Vec<R>, ReadError> {
        self(options)
    }
}

/// Where file readers take their input paths from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FileParam {
    /// Bare `FILE...` arguments.
    Positional,
    /// A repeatable `--<long> FILE` option.
    Option(String),
}

impl FileParam {
    fn spec(&self) -> OptionSpec {
        match self {
            FileParam::Positional => OptionSpec::positional(
                FILE_ID,
                "FILE",
                "Files to read. Reads standard input if none.",
            ),
            FileParam::Option(long) => {
                OptionSpec::repeated(long, "FILE", "File to read. Reads standard input if none.")
            }
        }
    }

    fn id(&self) -> &str {
        match self {
            FileParam::Positional => FILE_ID,
            FileParam::Option(long) => long,
        }
    }
}

/// Input files of a run, or standard input.
#[derive(Debug, Clone)]
struct Inputs {
    param: FileParam,
}

impl Inputs {
    fn paths(&self, options: &ParsedOptions) -> Vec<PathBuf> {
        options
            .values(self.param.id())
            .iter()
            .map(PathBuf::from)
            .collect()
    }

    /// Calls `f` with the contents of every input, in order.
    fn each<F>(&self, options: &ParsedOptions, mut f: F) -> Result<(), ReadError>
    where
        F: FnMut(&Path, &mut dyn BufRead) -> Result<(), ReadError>,
    {
        let paths = self.paths(options);
        if paths.is_empty() {
            debug!("reading standard input");
            let stdin = io::stdin();
            return f(Path::new(STDIN_PATH), &mut stdin.lock());
        }
        for path in paths {
            debug!(path = %path.display(), "reading file");
            if path.is_dir() {
                return Err(ReadError::NotAFile(path));
            }
            let file = fs::File::open(&path).map_err(|source| ReadError::from_io(&path, source))?;
            f(&path, &mut BufReader::new(file))?;
        }
        Ok(())
    }
}

/// Reads files that each hold a JSON array of objects.
#[derive(Debug, Clone)]
pub struct JsonReader {
    inputs: Inputs,
}

impl JsonReader {
    /// Reads the files given as positional arguments.
    pub fn new() -> Self {
        Self {
            inputs: Inputs {
                param: FileParam::Positional,
            },
        }
    }

    /// Reads the files given with `--<long>` instead.
    pub fn file_option(long: &str) -> Self {
        Self {
            inputs: Inputs {
                param: FileParam::Option(long.to_string()),
            },
        }
    }
}

impl Default for JsonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JsonReader {
    type Record = Map<String, Json>;

    fn params(&self) -> Vec<OptionSpec> {
        vec![self.inputs.param.spec()]
    }

    fn read(&self, options: &ParsedOptions) -> Result<Vec<Self::Record>, ReadError> {
        let mut records = Vec::new();
        self.inputs.each(options, |path, input| {
            let mut text = String::new();
            input
                .read_to_string(&mut text)
                .map_err(|source| ReadError::from_io(path, source))?;
            let doc: Vec<Map<String, Json>> =
                serde_json::from_str(&text).map_err(|source| ReadError::Json {
                    path: path.to_path_buf(),
                    line: source.line(),
                    source,
                })?;
            records.extend(doc);
            Ok(())
        })?;
        debug!(records = records.len(), "json read");
        Ok(records)
    }
}

/// Reads files holding one JSON object per line. Blank lines are skipped.
#[derive(Debug, Clone)]
pub struct JsonLinesReader {
    inputs: Inputs,
}

impl JsonLinesReader {
    /// Reads the files given as positional arguments.
    pub fn new() -> Self {
        Self {
            inputs: Inputs {
                param: FileParam::Positional,
            },
        }
    }

    /// Reads the files given with `--<long>` instead.
    pub fn file_option(long: &str) -> Self {
        Self {
            inputs: Inputs {
                param: FileParam::Option(long.to_string()),
            },
        }
    }
}

impl Default for JsonLinesReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JsonLinesReader {
    type Record = Map<String, Json>;

    fn params(&self) -> Vec<OptionSpec> {
        vec![self.inputs.param.spec()]
    }

    fn read(&self, options: &ParsedOptions) -> Result<Vec<Self::Record>, ReadError> {
        let mut records = Vec::new();
        self.inputs.each(options, |path, input| {
            for (index, line) in input.lines().enumerate() {
                let line = line.map_err(|source| ReadError::from_io(path, source))?;
                if line.trim().is_empty() {
                    continue;
                }
                let record = serde_json::from_str(&line).map_err(|source| ReadError::Json {
                    path: path.to_path_buf(),
                    line: index + 1,
                    source,
                })?;
                records.push(record);
            }
            Ok(())
        })?;
        debug!(records = records.len(), "json lines read");
        Ok(records)
    }
}

/// Returns `true` if any reader parameter is positional.
pub(crate) fn has_positional(params: &[OptionSpec]) -> bool {
    params.iter().any(|spec| spec.arity == Arity::Positional)
}
