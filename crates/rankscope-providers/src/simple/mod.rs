//! Line-oriented format: `RANK H:MM:SS.ffffff <name` opens an interval,
//! `RANK H:MM:SS.ffffff >name` (any marker other than `<`) closes the
//! innermost open interval on that rank.

pub mod parser;

pub use self::parser::{SimpleLine, SimpleReader, parse_line, parse_simple};
