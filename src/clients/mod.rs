//! Ready-made client variants

mod status_bar;

pub use status_bar::{StatusBar, DEFAULT_STATUS_BAR_HEIGHT};
