use crate::Result;
use rankscope_types::EventStream;
use std::path::Path;

/// Trace format reader
///
/// Responsibilities:
/// - Recognize its format from file content
/// - Turn the text into begin/end records in builder order
/// - Intern event names as they are first seen
pub trait TraceReader: Send + Sync {
    /// Unique format ID (e.g., "simple", "annotation")
    fn id(&self) -> &'static str;

    /// Check whether the text looks like this format
    fn probe(&self, text: &str) -> ProbeResult;

    /// Parse the whole text into an event stream
    fn read_str(&self, text: &str) -> Result<EventStream>;

    /// Read and parse a file
    fn read_file(&self, path: &Path) -> Result<EventStream> {
        let text = std::fs::read_to_string(path)?;
        self.read_str(&text)
    }
}

// --- Helper types ---

/// Probe result with confidence score
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeResult {
    /// Reader can handle this text with given confidence (0.0 - 1.0)
    Confidence(f32),
    /// Reader cannot handle this text
    NoMatch,
}

impl ProbeResult {
    /// Create high confidence match (1.0)
    pub fn match_high() -> Self {
        ProbeResult::Confidence(1.0)
    }

    /// Create medium confidence match (0.5)
    pub fn match_medium() -> Self {
        ProbeResult::Confidence(0.5)
    }

    /// Check if this is a match (confidence > 0)
    pub fn is_match(&self) -> bool {
        matches!(self, ProbeResult::Confidence(c) if *c > 0.0)
    }

    /// Get confidence score (0.0 if NoMatch)
    pub fn confidence(&self) -> f32 {
        match self {
            ProbeResult::Confidence(c) => *c,
            ProbeResult::NoMatch => 0.0,
        }
    }
}

/// First line with non-whitespace content, with its 1-based number
pub(crate) fn first_content_line(text: &str) -> Option<(usize, &str)> {
    text.lines()
        .enumerate()
        .find(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
}
