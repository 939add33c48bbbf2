//! Compositor Core Module
//!
//! Platform-independent compositing state. This module contains:
//! - Character grids shared by clients and screens
//! - Client surfaces, hooks and shared handles
//! - The screen and its refresh (compositing) algorithm
//! - Border glyphs and serializable snapshots
//!
//! Nothing in here performs I/O: the screen exposes its buffer and callers
//! decide where to print it.

mod border;
mod client;
mod error;
mod geometry;
mod grid;
mod screen;
mod snapshot;
mod surface;

pub use border::BorderGlyphs;
pub use client::{Client, ClientHandle, ClientHooks, ClientInfo, PlainClient};
pub use error::{Error, Result};
pub use geometry::{Position, Size};
pub use grid::{Grid, Row};
pub use screen::{Detach, Screen, ScreenContext, ScreenId};
pub use snapshot::Snapshot;
pub use surface::{Surface, DEFAULT_CLIENT_BACKGROUND};
