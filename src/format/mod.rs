//! Layout normalization engine.
//!
//! The engine takes raw source bytes and a [`crate::Config`] and produces
//! normalized bytes, or fails with an opaque error. Passes, in order:
//!
//! 1. Reject non-UTF-8 input
//! 2. Normalize CRLF/CR line endings to LF
//! 3. Expand leading tabs to spaces
//! 4. Strip trailing whitespace from each line
//! 5. Collapse over-long runs of blank lines
//! 6. Trim trailing blank lines and guarantee a single final newline
//!
//! Every pass is idempotent, so formatting already-formatted text is the
//! identity. The main entry point is [`format_source`]; [`format_bytes`] and
//! [`format_path`] are conveniences over it.

pub mod pipeline;
pub mod whitespace;

pub use pipeline::{format_bytes, format_path, format_source};
