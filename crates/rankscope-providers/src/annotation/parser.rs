use super::layout::{ColumnLayout, RowFields, is_pair_line};
use super::{
    ANNOTATION, AnnotationOptions, DURATION, END_ANNOTATION, END_EVENT_PREFIX, END_MPI_FUNCTION,
    MPI_FUNCTION, OFFSET, RANK,
};
use crate::traits::{ProbeResult, TraceReader, first_content_line};
use crate::{Error, Result};
use rankscope_types::{EventId, EventRecord, EventStream, MAX_RANK, NameTable, Rank, Timestamp};
use std::cmp::Reverse;

/// One completed region read from a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub rank: Rank,
    pub begin: Timestamp,
    pub end: Timestamp,
    pub id: EventId,
    pub line: usize,
}

/// Display name of a hierarchical annotation path (its last `/` segment)
pub fn leaf_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parse annotation-trace text into records sorted into nesting order
pub fn parse_annotation(text: &str, options: &AnnotationOptions) -> Result<EventStream> {
    let mut names = NameTable::new();
    let mut windows = Vec::new();
    let mut skipped = 0usize;

    let Some((first_number, first_line)) = first_content_line(text) else {
        return Ok(EventStream::new());
    };

    let mut take_row = |fields: &RowFields<'_>, number: usize, raw: &str| -> Result<()> {
        match read_window(fields, number, raw, options, &mut names)? {
            Some(window) => windows.push(window),
            None => {
                skipped += 1;
                tracing::trace!(line = number, "row carries no event name, skipped");
            }
        }
        Ok(())
    };

    let rows = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .skip(first_number - 1)
        .filter(|(_, line)| !line.trim().is_empty());

    if is_pair_line(first_line) {
        for (number, raw) in rows {
            let fields = RowFields::parse_pairs(raw, number)?;
            take_row(&fields, number, raw)?;
        }
    } else {
        let layout = ColumnLayout::discover(first_line, first_number, options.split)?;
        layout.require(OFFSET)?;
        layout.require(DURATION)?;
        if options.include_mpi_function_names {
            layout.require_any(&[ANNOTATION, END_ANNOTATION, MPI_FUNCTION, END_MPI_FUNCTION])?;
        } else {
            layout.require_any(&[ANNOTATION, END_ANNOTATION])?;
        }

        for (number, raw) in rows.skip(1) {
            let fields = layout.split_row(raw, number)?;
            take_row(&fields, number, raw)?;
        }
    }

    tracing::debug!(
        regions = windows.len(),
        skipped,
        names = names.len(),
        "read annotation trace"
    );

    let mut stream = EventStream::new();
    for record in sort_records(&windows) {
        stream.push(record);
    }
    stream.names = names;
    Ok(stream)
}

/// Decode one row. `Ok(None)` means the row is not an event under `options`.
fn read_window(
    fields: &RowFields<'_>,
    number: usize,
    raw: &str,
    options: &AnnotationOptions,
    names: &mut NameTable,
) -> Result<Option<Window>> {
    let Some(name) = event_name(fields, options) else {
        return Ok(None);
    };
    if name.is_empty() {
        return Err(Error::malformed_row(number, raw, "empty annotation name"));
    }

    let offset = time_field(fields, OFFSET, number, raw)?;
    let duration = time_field(fields, DURATION, number, raw)?;
    let begin = offset.checked_sub(duration).ok_or_else(|| {
        Error::malformed_row(
            number,
            raw,
            format!("duration {} exceeds offset {}", duration, offset),
        )
    })?;

    let rank = match fields.get(RANK) {
        Some(value) => value
            .parse::<Rank>()
            .ok()
            .filter(|rank| *rank <= MAX_RANK)
            .ok_or_else(|| {
                Error::malformed_row(number, raw, format!("invalid {} '{}'", RANK, value))
            })?,
        None => 0,
    };

    Ok(Some(Window {
        rank,
        begin,
        end: offset,
        id: names.intern(name),
        line: number,
    }))
}

/// Pick the region name a row reports, if any.
///
/// Rows tagged `event.end#<attr>` report the end of that attribute's region;
/// untagged rows (plain tabular exports) report their `annotation`.
fn event_name<'r>(fields: &'r RowFields<'_>, options: &AnnotationOptions) -> Option<&'r str> {
    if let Some(name) = fields.get(END_ANNOTATION) {
        return Some(leaf_name(name));
    }
    if let Some(name) = fields.get(END_MPI_FUNCTION) {
        return options.include_mpi_function_names.then_some(name);
    }
    if fields
        .keys()
        .iter()
        .any(|key| key.starts_with(END_EVENT_PREFIX))
    {
        return None;
    }
    if let Some(path) = fields.get(ANNOTATION) {
        return Some(leaf_name(path));
    }
    if options.include_mpi_function_names {
        return fields.get(MPI_FUNCTION);
    }
    None
}

fn time_field(fields: &RowFields<'_>, key: &str, number: usize, raw: &str) -> Result<Timestamp> {
    let value = fields.get(key).ok_or_else(|| Error::MissingColumn {
        column: key.to_string(),
        line: number,
        raw: raw.to_string(),
    })?;
    parse_time_value(value).ok_or_else(|| {
        Error::malformed_row(number, raw, format!("invalid {} '{}'", key, value))
    })
}

/// Integer microseconds; non-negative decimals are rounded
fn parse_time_value(value: &str) -> Option<Timestamp> {
    if let Ok(micros) = value.parse::<Timestamp>() {
        return Some(micros);
    }
    let micros = value.parse::<f64>().ok()?;
    (micros.is_finite() && micros >= 0.0 && micros <= Timestamp::MAX as f64)
        .then(|| micros.round() as Timestamp)
}

/// Order region windows into begin/end records the builder can nest.
///
/// Records are grouped by rank and ordered by time. At equal times:
/// - ends of regions that started earlier come first, latest-started first
/// - then begins, longest region first
/// - then ends of zero-length regions, in reverse row order
///
/// Source line breaks any remaining tie so identical windows nest by row.
pub fn sort_records(windows: &[Window]) -> Vec<EventRecord> {
    let mut keyed: Vec<((Rank, Timestamp, u8, Reverse<Timestamp>, i64), EventRecord)> =
        Vec::with_capacity(windows.len() * 2);

    for w in windows {
        let line = w.line as i64;
        keyed.push((
            (w.rank, w.begin, 1, Reverse(w.end), line),
            EventRecord::begin(w.rank, w.begin, w.id, w.line),
        ));

        let class = if w.begin < w.end { 0 } else { 2 };
        keyed.push((
            (w.rank, w.end, class, Reverse(w.begin), -line),
            EventRecord::end(w.rank, w.end, Some(w.id), w.line),
        ));
    }

    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Reader for columnar annotation traces
pub struct AnnotationReader {
    pub options: AnnotationOptions,
}

impl AnnotationReader {
    pub fn new(options: AnnotationOptions) -> Self {
        Self { options }
    }
}

impl TraceReader for AnnotationReader {
    fn id(&self) -> &'static str {
        "annotation"
    }

    fn probe(&self, text: &str) -> ProbeResult {
        let Some((_, line)) = first_content_line(text) else {
            return ProbeResult::NoMatch;
        };
        if line.contains(OFFSET) && line.contains(DURATION) {
            ProbeResult::match_high()
        } else if is_pair_line(line) {
            ProbeResult::match_medium()
        } else {
            ProbeResult::NoMatch
        }
    }

    fn read_str(&self, text: &str) -> Result<EventStream> {
        parse_annotation(text, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::ColumnSplit;
    use rankscope_types::EventKind;

    fn window(rank: Rank, begin: Timestamp, end: Timestamp, id: usize, line: usize) -> Window {
        Window {
            rank,
            begin,
            end,
            id: EventId::new(id),
            line,
        }
    }

    fn shape(records: &[EventRecord]) -> Vec<(Rank, Timestamp, char, usize)> {
        records
            .iter()
            .map(|r| match r.kind {
                EventKind::Begin(id) => (r.rank, r.time, '<', id.index()),
                EventKind::End(id) => (r.rank, r.time, '>', id.map_or(usize::MAX, EventId::index)),
            })
            .collect()
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("main/solve/smooth"), "smooth");
        assert_eq!(leaf_name("main"), "main");
        assert_eq!(leaf_name("main/"), "");
    }

    #[test]
    fn test_sort_nests_larger_window_outside() {
        // child row completes (and is written) before its parent
        let records = sort_records(&[window(0, 10, 20, 1, 2), window(0, 0, 30, 0, 3)]);
        assert_eq!(
            shape(&records),
            vec![(0, 0, '<', 0), (0, 10, '<', 1), (0, 20, '>', 1), (0, 30, '>', 0)]
        );
    }

    #[test]
    fn test_sort_shared_boundaries() {
        let records = sort_records(&[
            window(0, 0, 10, 0, 1),  // parent
            window(0, 0, 4, 1, 2),   // first child, shares parent's begin
            window(0, 4, 10, 2, 3),  // second child, touches first, shares parent's end
            window(0, 4, 4, 3, 4),   // zero-length marker between the children
        ]);
        assert_eq!(
            shape(&records),
            vec![
                (0, 0, '<', 0),
                (0, 0, '<', 1),
                (0, 4, '>', 1),
                (0, 4, '<', 2),
                (0, 4, '<', 3),
                (0, 4, '>', 3),
                (0, 10, '>', 2),
                (0, 10, '>', 0),
            ]
        );
    }

    #[test]
    fn test_sort_groups_by_rank() {
        let records = sort_records(&[window(1, 0, 5, 0, 1), window(0, 3, 4, 0, 2)]);
        let ranks: Vec<Rank> = records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_parse_whitespace_table() {
        let text = "\
mpi.rank time.offset time.inclusive.duration annotation
0        20          10                      main/solve
0        30          30                      main
1        15          5                       main
";
        let stream = parse_annotation(text, &AnnotationOptions::default()).unwrap();

        let names: Vec<&str> = stream.names.iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["solve", "main"]);
        assert_eq!(
            shape(&stream.records),
            vec![
                (0, 0, '<', 1),
                (0, 10, '<', 0),
                (0, 20, '>', 0),
                (0, 30, '>', 1),
                (1, 10, '<', 1),
                (1, 15, '>', 1),
            ]
        );
        assert_eq!(stream.bounds(), Some((0, 30)));
    }

    #[test]
    fn test_parse_without_rank_column_defaults_to_rank_zero() {
        let text = "annotation,time.inclusive.duration,time.offset\nio,2,7\n";
        let options = AnnotationOptions::default().with_split(ColumnSplit::Comma);
        let stream = parse_annotation(text, &options).unwrap();
        assert_eq!(shape(&stream.records), vec![(0, 5, '<', 0), (0, 7, '>', 0)]);
    }

    #[test]
    fn test_parse_key_value_rows() {
        let text = "\
event.end#annotation=solve,annotation=main/solve,time.inclusive.duration=4,time.offset=9,mpi.rank=2
event.end#mpi.function=MPI_Send,mpi.function=MPI_Send,annotation=main,time.inclusive.duration=1,time.offset=11,mpi.rank=2
event.end#annotation=main,annotation=main,time.inclusive.duration=12,time.offset=12,mpi.rank=2
";
        let stream = parse_annotation(text, &AnnotationOptions::default()).unwrap();
        let names: Vec<&str> = stream.names.iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["solve", "main"]);
        assert_eq!(stream.len(), 4);

        let options = AnnotationOptions::default().with_mpi_function_names(true);
        let stream = parse_annotation(text, &options).unwrap();
        let names: Vec<&str> = stream.names.iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["solve", "MPI_Send", "main"]);
        assert_eq!(
            shape(&stream.records),
            vec![
                (2, 0, '<', 2),
                (2, 5, '<', 0),
                (2, 9, '>', 0),
                (2, 10, '<', 1),
                (2, 11, '>', 1),
                (2, 12, '>', 2),
            ]
        );
    }

    #[test]
    fn test_parse_missing_column() {
        let text = "time.offset annotation\n10 main\n";
        match parse_annotation(text, &AnnotationOptions::default()) {
            Err(Error::MissingColumn { column, line, raw }) => {
                assert_eq!(column, "time.inclusive.duration");
                assert_eq!(line, 1);
                assert_eq!(raw, "time.offset annotation");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }

        let text = "time.offset=10,annotation=main\n";
        assert!(matches!(
            parse_annotation(text, &AnnotationOptions::default()),
            Err(Error::MissingColumn { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_malformed_rows() {
        let header = "time.offset time.inclusive.duration annotation\n";
        for (row, reason) in [
            ("10 x main", "invalid time.inclusive.duration"),
            ("5 10 main", "exceeds offset"),
            ("10 5", "expected 3 fields"),
        ] {
            let text = format!("{}{}\n", header, row);
            match parse_annotation(&text, &AnnotationOptions::default()) {
                Err(Error::MalformedRow { line, raw, reason: got }) => {
                    assert_eq!(line, 2);
                    assert_eq!(raw, row);
                    assert!(got.contains(reason), "{} should mention {}", got, reason);
                }
                other => panic!("expected MalformedRow for {:?}, got {:?}", row, other),
            }
        }
    }

    #[test]
    fn test_rank_above_limit_is_malformed() {
        let text = "mpi.rank time.offset time.inclusive.duration annotation\n\
                    0 10 5 main\n\
                    18446744073709551615 10 5 main\n";
        match parse_annotation(text, &AnnotationOptions::default()) {
            Err(Error::MalformedRow { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(reason, "invalid mpi.rank '18446744073709551615'");
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_without_names_are_skipped() {
        let row = |a: &str, b: &str, c: &str, d: &str| format!("{:<12}{:<24}{:<12}{}\n", a, b, c, d);
        let text = [
            row("time.offset", "time.inclusive.duration", "annotation", "mpi.function"),
            row("10", "10", "main", ""),
            row("4", "1", "", "MPI_Recv"),
        ]
        .concat();
        let options = AnnotationOptions::default().with_split(ColumnSplit::Aligned);
        let stream = parse_annotation(&text, &options).unwrap();
        assert_eq!(stream.len(), 2);

        let stream = parse_annotation(&text, &options.with_mpi_function_names(true)).unwrap();
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.names.lookup_id("MPI_Recv").map(EventId::index), Ok(1));
    }

    #[test]
    fn test_decimal_times_are_rounded() {
        assert_eq!(parse_time_value("12"), Some(12));
        assert_eq!(parse_time_value("12.6"), Some(13));
        assert_eq!(parse_time_value("-1"), None);
        assert_eq!(parse_time_value("NaN"), None);
    }

    #[test]
    fn test_probe() {
        let reader = AnnotationReader::new(AnnotationOptions::default());
        assert!(
            reader
                .probe("annotation time.offset time.inclusive.duration\n")
                .is_match()
        );
        assert!(reader.probe("annotation=a,time.offset=1\n").is_match());
        assert!(!reader.probe("0 00:00:00.000000 <main\n").is_match());
    }
}
