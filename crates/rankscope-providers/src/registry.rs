use crate::annotation::{AnnotationOptions, AnnotationReader};
use crate::simple::SimpleReader;
use crate::traits::TraceReader;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct FormatMetadata {
    pub format: TraceFormat,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

const FORMATS: &[FormatMetadata] = &[
    FormatMetadata {
        format: TraceFormat::Simple,
        description: "One begin/end event per line: <rank> <H:MM:SS.ffffff> <name|>name",
        aliases: &["simple", "prf"],
        extensions: &["prf", "txt"],
    },
    FormatMetadata {
        format: TraceFormat::Annotation,
        description: "Annotation table export, one completed region per row",
        aliases: &["annotation", "caliper", "cali"],
        extensions: &["cali", "csv", "tsv"],
    },
];

/// Supported trace file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    Simple,
    Annotation,
}

impl TraceFormat {
    pub fn name(self) -> &'static str {
        match self {
            TraceFormat::Simple => "simple",
            TraceFormat::Annotation => "annotation",
        }
    }

    pub fn metadata(self) -> &'static FormatMetadata {
        match self {
            TraceFormat::Simple => &FORMATS[0],
            TraceFormat::Annotation => &FORMATS[1],
        }
    }
}

impl fmt::Display for TraceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TraceFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        FORMATS
            .iter()
            .find(|meta| meta.aliases.contains(&wanted.as_str()))
            .map(|meta| meta.format)
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

pub fn get_all_formats() -> &'static [FormatMetadata] {
    FORMATS
}

/// Create the reader for `format`. Simple traces ignore `options`.
pub fn create_reader(format: TraceFormat, options: AnnotationOptions) -> Box<dyn TraceReader> {
    match format {
        TraceFormat::Simple => Box::new(SimpleReader),
        TraceFormat::Annotation => Box::new(AnnotationReader::new(options)),
    }
}

/// Guess the format from the first content line of `text`
pub fn detect_format(text: &str) -> Option<TraceFormat> {
    let options = AnnotationOptions::default();
    [TraceFormat::Simple, TraceFormat::Annotation]
        .into_iter()
        .map(|format| (format, create_reader(format, options).probe(text)))
        .filter(|(_, probe)| probe.is_match())
        .max_by(|(_, a), (_, b)| a.confidence().total_cmp(&b.confidence()))
        .map(|(format, _)| format)
}

/// Guess the format from a file extension, looking through a trailing `.gz`
pub fn detect_format_from_path(path: &Path) -> Option<TraceFormat> {
    let mut ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if ext == "gz" {
        let stem = Path::new(path.file_stem()?);
        ext = stem.extension()?.to_str()?.to_ascii_lowercase();
    }
    FORMATS
        .iter()
        .find(|meta| meta.extensions.contains(&ext.as_str()))
        .map(|meta| meta.format)
}
