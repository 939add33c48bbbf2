//! Status bar client
//!
//! Spans the top of the screen and reports how many clients are attached and
//! what kind the newest one is.

use crate::core::{Client, ClientHandle, ClientHooks, Result, ScreenContext, Surface};

/// Height of a status bar unless configured otherwise
pub const DEFAULT_STATUS_BAR_HEIGHT: usize = 2;

/// Hooks for a full-width bar pinned to the top-left corner
#[derive(Debug, Clone)]
pub struct StatusBar {
    height: usize,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self {
            height: DEFAULT_STATUS_BAR_HEIGHT,
        }
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height(height: usize) -> Self {
        Self { height }
    }

    /// A ready-to-attach status bar client
    pub fn client(self) -> Result<ClientHandle> {
        let mut surface = Surface::new(1, 1)?;
        surface.set_background('#');
        surface.fill();
        Ok(ClientHandle::new(Client::with_hooks(surface, self)))
    }

    /// The summary line for a screen
    pub fn summary(screen: &ScreenContext) -> String {
        let newest = screen.last_client().map_or("none", |c| c.kind.as_str());
        format!("Clients: {} | {}", screen.clients().len(), newest)
    }
}

impl ClientHooks for StatusBar {
    fn kind(&self) -> &str {
        "StatusBar"
    }

    fn on_attach(&mut self, surface: &mut Surface, screen: &ScreenContext) -> Result<()> {
        surface.set_position(0, 0);
        surface.set_size(screen.width(), self.height)?;
        surface.set_contents(&Self::summary(screen));
        Ok(())
    }
}
