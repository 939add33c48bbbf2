//! Charscreen Library
//!
//! A character-grid window compositor. Rectangular client buffers are layered
//! onto a fixed-size screen buffer and flattened into printable text.
//!
//! - `core`: grids, client surfaces, the screen and its compositing
//! - `clients`: ready-made client variants such as the status bar
//! - `app`: configuration file and terminal size discovery

pub mod app;
pub mod clients;
pub mod core;
