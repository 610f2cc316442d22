pub mod error;
pub mod interval;
pub mod names;
pub mod record;
pub mod stream;
pub mod time;
pub mod trace;

pub use error::{Error, Result};
pub use interval::Interval;
pub use names::{EventId, NameTable};
pub use record::{EventKind, EventRecord, MAX_RANK, Rank};
pub use stream::EventStream;
pub use time::{Timestamp, format_timestamp, parse_timestamp};
pub use trace::{Trace, TraceStats};
