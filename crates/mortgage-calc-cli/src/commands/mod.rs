pub mod format;
pub mod schedule;
