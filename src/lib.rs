//! hsfmt - Layout normalizer for Haskell source code
//!
//! Normalizes whitespace layout (indentation tabs, trailing whitespace,
//! blank-line runs, final newline) without touching program structure.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod config;
pub mod directive;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod mode;
pub mod resolve;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use directive::{find_directive, parse_directive, DirectiveOverrides};
pub use dispatch::{dispatch_one, Outcome};
pub use error::Result;
pub use mode::Mode;
pub use resolve::{resolve_inputs, Input};
