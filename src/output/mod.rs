//! Output sinks.
//!
//! Sinks receive the assembled image once, after the last tile, and decide where it goes.

/// PNG files in a directory.
pub mod png;
/// Sink trait and the in-memory sink.
pub mod sink;
