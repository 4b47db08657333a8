//! Read parameter text into typed rows.
//!
//! Input files are whitespace-delimited with `#` comments. Cleaning drops
//! comments and blank lines but keeps the 1-based source line number of
//! every surviving row so later stages can point back into the file.

use std::fs;
use std::path::Path;

use crate::error::{Error, Location, Result};


/// One cleaned row and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<R> {
    pub line: usize,
    pub value: R,
}

/// All rows of one input file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    pub file: String,
    pub rows: Vec<Row<R>>,
}

impl<R> Table<R> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn location(&self) -> Location {
        Location::file(&self.file)
    }

    pub fn location_of(&self, row: &Row<R>) -> Location {
        Location::line(&self.file, row.line)
    }
}

/// The shape of a row in one family of input files.
pub trait RowSchema: Sized {
    /// Number of whitespace-separated tokens a row must split into.
    const TOKENS: usize;
    /// Whether rows open with a human-readable base label to discard.
    const LABELLED: bool = false;

    fn from_tokens(tokens: &[&str]) -> std::result::Result<Self, String>;
}

/// A single value, as found in the stacking, mismatch and dangling-end files.
impl RowSchema for f64 {
    const TOKENS: usize = 1;
    const LABELLED: bool = true;

    fn from_tokens(tokens: &[&str]) -> std::result::Result<Self, String> {
        parse_value(tokens[0])
    }
}

/// `length interior bulge hairpin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopRow {
    pub length: i64,
    pub interior: f64,
    pub bulge: f64,
    pub hairpin: f64,
}

impl RowSchema for LoopRow {
    const TOKENS: usize = 4;

    fn from_tokens(tokens: &[&str]) -> std::result::Result<Self, String> {
        let length = tokens[0]
            .parse()
            .map_err(|_| format!("loop length {:?} is not an integer", tokens[0]))?;
        Ok(Self {
            length,
            interior: parse_value(tokens[1])?,
            bulge: parse_value(tokens[2])?,
            hairpin: parse_value(tokens[3])?,
        })
    }
}

/// `sequence value`
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionRow {
    pub sequence: String,
    pub value: f64,
}

impl RowSchema for ExceptionRow {
    const TOKENS: usize = 2;

    fn from_tokens(tokens: &[&str]) -> std::result::Result<Self, String> {
        if !tokens[0].is_ascii() {
            return Err(format!("loop sequence {:?} is not ASCII", tokens[0]));
        }
        Ok(Self {
            sequence: tokens[0].to_owned(),
            value: parse_value(tokens[1])?,
        })
    }
}

fn parse_value(token: &str) -> std::result::Result<f64, String> {
    match token.parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(v),
        _ => Err(format!("{token:?} is not a number")),
    }
}

/// Lines that carry data, paired with their 1-based line numbers.
pub fn cleaned(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(n, line)| {
        let line = match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        };
        let line = line.trim();
        (!line.is_empty()).then_some((n + 1, line))
    })
}

/// Drop a leading label of base letters, gap markers and blanks.
pub fn strip_label(line: &str) -> &str {
    line.trim_start_matches(|c| matches!(c, 'A' | 'C' | 'G' | 'T' | 'N' | '_' | ' ' | '\t'))
}

pub fn parse<R: RowSchema>(file: &str, text: &str) -> Result<Table<R>> {
    let mut rows = Vec::new();

    for (line, content) in cleaned(text) {
        let content = if R::LABELLED {
            strip_label(content)
        } else {
            content
        };
        let tokens: Vec<&str> = content.split_whitespace().collect();
        let at = || Location::line(file, line);

        if tokens.len() != R::TOKENS {
            return Err(Error::malformed(
                at(),
                format!("expected {} column(s), found {}", R::TOKENS, tokens.len()),
            ));
        }

        let value = R::from_tokens(&tokens).map_err(|reason| Error::malformed(at(), reason))?;
        rows.push(Row { line, value });
    }

    Ok(Table {
        file: file.to_owned(),
        rows,
    })
}

/// Read and parse one file. The handle is closed before this returns.
pub fn read<R: RowSchema>(path: &Path) -> Result<Table<R>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    parse(&path.display().to_string(), &text)
}
