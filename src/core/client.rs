//! Clients
//!
//! A client is a [`Surface`] plus the hooks that run when it is attached to
//! or detached from a screen. Callers create clients and share them with a
//! screen through a [`ClientHandle`].

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::geometry::{Position, Size};
use super::screen::{ScreenContext, ScreenId};
use super::surface::Surface;

/// Per-variant attach and detach behaviour
pub trait ClientHooks {
    /// Name of this client variant, as shown to other clients
    fn kind(&self) -> &str {
        "Client"
    }

    /// Runs right after the client joins `screen`, before any refresh.
    fn on_attach(&mut self, _surface: &mut Surface, _screen: &ScreenContext) -> Result<()> {
        Ok(())
    }

    /// Runs before the client is removed. Returning `false` keeps it attached.
    fn on_detach(&mut self, _surface: &mut Surface) -> bool {
        true
    }
}

/// A client with no special behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainClient;

impl ClientHooks for PlainClient {}

/// A surface together with its hooks and the screen it belongs to
pub struct Client {
    surface: Surface,
    hooks: Box<dyn ClientHooks>,
    /// Screen this client is attached to, if any
    context: Option<ScreenId>,
}

impl Client {
    /// Create a plain client
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self::with_hooks(Surface::new(width, height)?, PlainClient))
    }

    /// Create a client with custom hooks
    pub fn with_hooks(surface: Surface, hooks: impl ClientHooks + 'static) -> Self {
        Self {
            surface,
            hooks: Box::new(hooks),
            context: None,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn kind(&self) -> &str {
        self.hooks.kind()
    }

    /// Screen this client is attached to
    pub fn context(&self) -> Option<ScreenId> {
        self.context
    }

    pub fn info(&self) -> ClientInfo {
        ClientInfo {
            kind: self.kind().to_string(),
            position: self.surface.position(),
            size: self.surface.size(),
        }
    }

    pub(crate) fn set_context(&mut self, context: Option<ScreenId>) {
        self.context = context;
    }

    pub(crate) fn run_attach(&mut self, screen: &ScreenContext) -> Result<()> {
        self.hooks.on_attach(&mut self.surface, screen)
    }

    pub(crate) fn run_detach(&mut self) -> bool {
        self.hooks.on_detach(&mut self.surface)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("kind", &self.kind())
            .field("surface", &self.surface)
            .field("context", &self.context)
            .finish()
    }
}

/// Read-only summary of a client, handed to hooks of its peers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub kind: String,
    pub position: Position,
    pub size: Size,
}

/// Shared handle to a client.
///
/// Clones refer to the same client; equality is identity. Handles are
/// single-threaded.
#[derive(Clone)]
pub struct ClientHandle(Rc<RefCell<Client>>);

impl ClientHandle {
    pub fn new(client: Client) -> Self {
        Self(Rc::new(RefCell::new(client)))
    }

    /// Create a handle to a plain client
    pub fn plain(width: usize, height: usize) -> Result<Self> {
        Ok(Self::new(Client::new(width, height)?))
    }

    /// Borrow the client.
    ///
    /// # Panics
    ///
    /// Panics if the client is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, Client> {
        self.0.borrow()
    }

    /// Borrow the client mutably.
    ///
    /// # Panics
    ///
    /// Panics if the client is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Client> {
        self.0.borrow_mut()
    }

    pub fn surface(&self) -> Ref<'_, Surface> {
        Ref::map(self.0.borrow(), Client::surface)
    }

    pub fn surface_mut(&self) -> RefMut<'_, Surface> {
        RefMut::map(self.0.borrow_mut(), Client::surface_mut)
    }

    /// Whether both handles point at the same client
    pub fn ptr_eq(&self, other: &ClientHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ClientHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ClientHandle {}

impl From<Client> for ClientHandle {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(client) => fmt::Debug::fmt(&*client, f),
            Err(_) => f.write_str("Client { <borrowed> }"),
        }
    }
}
