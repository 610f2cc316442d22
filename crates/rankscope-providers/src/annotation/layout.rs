use super::ColumnSplit;
use crate::{Error, Result};
use std::borrow::Cow;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Column {
    name: String,
    /// Byte offset of the name in the header line
    start: usize,
}

/// Column names and positions discovered from a header line
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    split: ColumnSplit,
    line: usize,
    raw: String,
}

impl ColumnLayout {
    /// Discover columns from the header text found on `line`
    pub fn discover(header: &str, line: usize, split: ColumnSplit) -> Result<Self> {
        let columns: Vec<Column> = match split {
            ColumnSplit::Whitespace | ColumnSplit::Aligned => token_starts(header)
                .map(|(start, name)| Column {
                    name: name.to_string(),
                    start,
                })
                .collect(),
            ColumnSplit::Comma => split_csv_line(header, line)?
                .into_iter()
                .map(|name| Column { name, start: 0 })
                .collect(),
        };

        let mut index = HashMap::new();
        for (i, column) in columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(Error::malformed_row(line, header, "empty column name"));
            }
            if index.insert(column.name.clone(), i).is_some() {
                return Err(Error::malformed_row(
                    line,
                    header,
                    format!("duplicate column '{}'", column.name),
                ));
            }
        }

        Ok(Self {
            columns,
            index,
            split,
            line,
            raw: header.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Fail with `MissingColumn` unless `name` is in the header
    pub fn require(&self, name: &str) -> Result<usize> {
        self.position(name).ok_or_else(|| self.missing(name))
    }

    /// Fail with `MissingColumn` unless at least one of `names` is in the header.
    /// The error names the first candidate.
    pub fn require_any(&self, names: &[&str]) -> Result<()> {
        if names.iter().any(|name| self.position(name).is_some()) {
            return Ok(());
        }
        Err(self.missing(names.first().copied().unwrap_or_default()))
    }

    fn missing(&self, name: &str) -> Error {
        Error::MissingColumn {
            column: name.to_string(),
            line: self.line,
            raw: self.raw.clone(),
        }
    }

    /// Cut a data row into one cell per column
    pub fn split_row<'a>(&'a self, row: &'a str, line: usize) -> Result<RowFields<'a>> {
        let cells: Vec<Cow<'a, str>> = match self.split {
            ColumnSplit::Whitespace => row.split_whitespace().map(Cow::Borrowed).collect(),
            ColumnSplit::Comma => split_csv_line(row, line)?
                .into_iter()
                .map(Cow::Owned)
                .collect(),
            ColumnSplit::Aligned => self.slice_aligned(row, line)?,
        };

        if cells.len() != self.columns.len() {
            return Err(Error::malformed_row(
                line,
                row,
                format!(
                    "expected {} fields, found {}",
                    self.columns.len(),
                    cells.len()
                ),
            ));
        }

        Ok(RowFields::Columns {
            layout: self,
            cells,
        })
    }

    fn slice_aligned<'a>(&self, row: &'a str, line: usize) -> Result<Vec<Cow<'a, str>>> {
        let mut cells = Vec::with_capacity(self.columns.len());
        for (i, column) in self.columns.iter().enumerate() {
            let end = self
                .columns
                .get(i + 1)
                .map_or(row.len(), |next| next.start.min(row.len()));
            let start = column.start.min(end);
            let cell = row
                .get(start..end)
                .ok_or_else(|| Error::malformed_row(line, row, "row is not aligned with header"))?;
            cells.push(Cow::Borrowed(cell.trim()));
        }

        // Text past the last column start belongs to the last column; text
        // before the first column start has no column.
        if let Some(first) = self.columns.first()
            && row.get(..first.start.min(row.len())).is_some_and(|s| !s.trim().is_empty())
        {
            return Err(Error::malformed_row(
                line,
                row,
                "text before the first column",
            ));
        }

        Ok(cells)
    }
}

/// Field access for one data row, by column name
#[derive(Debug)]
pub enum RowFields<'a> {
    /// Cells of a tabular row, positioned by the header layout
    Columns {
        layout: &'a ColumnLayout,
        cells: Vec<Cow<'a, str>>,
    },
    /// Self-describing `key=value` pairs
    Pairs(Vec<(&'a str, &'a str)>),
}

impl<'a> RowFields<'a> {
    /// Parse a `key=value` row. Pairs are comma-separated when the row contains
    /// a comma, whitespace-separated otherwise.
    pub fn parse_pairs(row: &'a str, line: usize) -> Result<Self> {
        let mut pairs = Vec::new();
        for piece in pair_pieces(row) {
            let (key, value) = piece.split_once('=').ok_or_else(|| {
                Error::malformed_row(line, row, format!("expected key=value, found '{}'", piece))
            })?;
            pairs.push((key.trim(), value.trim()));
        }
        Ok(RowFields::Pairs(pairs))
    }

    /// Non-empty value of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match self {
            RowFields::Columns { layout, cells } => {
                layout.position(key).and_then(|i| cells.get(i)).map(|cell| &**cell)
            }
            RowFields::Pairs(pairs) => pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Keys with a non-empty value
    pub fn keys(&self) -> Vec<&str> {
        match self {
            RowFields::Columns { layout, cells } => layout
                .names()
                .zip(cells.iter())
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(name, _)| name)
                .collect(),
            RowFields::Pairs(pairs) => pairs
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, _)| *k)
                .collect(),
        }
    }
}

/// Tokenize one comma-separated line, honoring double quotes
fn split_csv_line(row: &str, line: usize) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(row.as_bytes());

    let mut record = csv::StringRecord::new();
    let found = reader
        .read_record(&mut record)
        .map_err(|err| Error::malformed_row(line, row, err.to_string()))?;
    if !found {
        return Err(Error::malformed_row(line, row, "empty row"));
    }
    Ok(record.iter().map(str::to_string).collect())
}

/// True when every field of the line is a `key=value` pair
pub(crate) fn is_pair_line(line: &str) -> bool {
    let mut pieces = pair_pieces(line).peekable();
    pieces.peek().is_some() && pieces.all(|piece| piece.contains('='))
}

fn pair_pieces(row: &str) -> Box<dyn Iterator<Item = &str> + '_> {
    if row.contains(',') {
        Box::new(row.split(',').map(str::trim).filter(|p| !p.is_empty()))
    } else {
        Box::new(row.split_whitespace())
    }
}

/// Whitespace-separated tokens with their byte offsets
fn token_starts(line: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push((s, &line[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push((s, &line[s..]));
    }
    tokens.into_iter()
}
