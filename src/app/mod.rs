//! Application glue module
//!
//! Configuration and terminal size discovery. The core never reads files or
//! the environment; these helpers do it on its behalf.

mod config;
mod terminal_size;

pub use config::{Config, ConfigError, ScreenConfig};
pub use terminal_size::{SizeError, TerminalSize};
