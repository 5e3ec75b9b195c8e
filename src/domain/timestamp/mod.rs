pub mod encoding;
pub mod format;

pub use encoding::{normalize, reference_date, StoredTimestamp};
pub use format::{local_day, DisplayLocale, TimestampFormatter};
