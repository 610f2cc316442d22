use crate::{Error, Result};
use rankscope_providers::{
    AnnotationOptions, TraceFormat, create_reader, detect_format, detect_format_from_path,
};
use flate2::read::GzDecoder;
use rankscope_types::Trace;
use std::io::Read;
use std::path::Path;

/// Leading bytes of a gzip member
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// How a trace file should be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Force a format instead of detecting it
    pub format: Option<TraceFormat>,
    pub annotation: AnnotationOptions,
}

impl LoadOptions {
    pub fn with_format(mut self, format: TraceFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationOptions) -> Self {
        self.annotation = annotation;
        self
    }
}

/// A built trace and the format it was read as
#[derive(Debug, Clone)]
pub struct LoadedTrace {
    pub trace: Trace,
    pub format: TraceFormat,
}

/// Read a trace file as text, inflating it first when it is gzip-compressed.
///
/// Compression is recognized by content, not by the file name.
pub fn read_trace_text(path: impl AsRef<Path>) -> Result<String> {
    let bytes = std::fs::read(path.as_ref())?;
    let bytes = if bytes.starts_with(&GZIP_MAGIC) {
        let mut inflated = Vec::new();
        GzDecoder::new(bytes.as_slice()).read_to_end(&mut inflated)?;
        inflated
    } else {
        bytes
    };
    String::from_utf8(bytes)
        .map_err(|err| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

/// Build a trace from a file in the simple line format
pub fn build_trace_from_simple(path: impl AsRef<Path>) -> Result<Trace> {
    let text = read_trace_text(path)?;
    build_trace_from_str(&text, TraceFormat::Simple, AnnotationOptions::default())
}

/// Build a trace from an annotation table or key=value export
pub fn build_trace_from_annotation(
    path: impl AsRef<Path>,
    options: AnnotationOptions,
) -> Result<Trace> {
    let text = read_trace_text(path)?;
    build_trace_from_str(&text, TraceFormat::Annotation, options)
}

/// Build a trace from in-memory text
pub fn build_trace_from_str(
    text: &str,
    format: TraceFormat,
    options: AnnotationOptions,
) -> Result<Trace> {
    let stream = create_reader(format, options).read_str(text)?;
    rankscope_engine::build_trace(stream).map_err(|err| Error::structure(err, text))
}

/// Read a trace file, detecting its format unless one is forced.
///
/// Detection looks at the first content line, then at the file extension,
/// and falls back to the simple format.
pub fn load_trace(path: impl AsRef<Path>, options: &LoadOptions) -> Result<LoadedTrace> {
    let path = path.as_ref();
    let text = read_trace_text(path)?;

    let format = options
        .format
        .or_else(|| detect_format(&text))
        .or_else(|| detect_format_from_path(path))
        .unwrap_or(TraceFormat::Simple);

    let trace = build_trace_from_str(&text, format, options.annotation)?;

    tracing::info!(
        path = %path.display(),
        %format,
        ranks = trace.ranks(),
        intervals = trace.interval_count(),
        "loaded trace"
    );

    Ok(LoadedTrace { trace, format })
}
