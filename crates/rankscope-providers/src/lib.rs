// Error types
pub mod error;

// Reader trait
pub mod traits;

// Format implementations
pub mod annotation;
pub mod simple;

// Format registry
pub mod registry;

// Traits
pub use traits::{ProbeResult, TraceReader};

// Readers
pub use annotation::{
    AnnotationOptions, AnnotationReader, ColumnSplit, parse_annotation, sort_records,
};
pub use simple::{SimpleReader, parse_simple};

// Registry
pub use registry::{
    FormatMetadata, TraceFormat, create_reader, detect_format, detect_format_from_path,
    get_all_formats,
};

// Error types
pub use error::{Error, Result};
