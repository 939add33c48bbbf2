//! Positions and sizes

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Top-left corner of a client, relative to the screen origin.
///
/// Either coordinate may be negative or past the screen edge; compositing
/// clips whatever falls outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Buffer dimensions in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    /// Create a size, rejecting zero dimensions
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }
}
