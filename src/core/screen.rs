//! Screen model implementation
//!
//! The screen owns a fixed-size buffer and an ordered list of attached
//! clients. Refreshing clears the buffer, draws the border and then copies
//! every client on top in attachment order, so the most recently attached
//! client ends up on top.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::border::BorderGlyphs;
use super::client::{ClientHandle, ClientInfo};
use super::error::{Error, Result};
use super::geometry::Size;
use super::grid::Grid;
use super::snapshot::Snapshot;

static NEXT_SCREEN_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(u64);

impl ScreenId {
    fn next() -> Self {
        Self(NEXT_SCREEN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// What an attaching client may know about its screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenContext {
    id: ScreenId,
    size: Size,
    background: char,
    clients: Vec<ClientInfo>,
}

impl ScreenContext {
    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn background(&self) -> char {
        self.background
    }

    /// Attached clients in attachment order
    pub fn clients(&self) -> &[ClientInfo] {
        &self.clients
    }

    /// The most recently attached client
    pub fn last_client(&self) -> Option<&ClientInfo> {
        self.clients.last()
    }
}

/// Outcome of [`Screen::detach`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detach {
    /// One instance of the client was removed
    Removed,
    /// The client's hook refused; nothing changed
    Vetoed,
    /// The client was not attached to this screen
    NotAttached,
}

impl Detach {
    pub fn is_removed(self) -> bool {
        self == Detach::Removed
    }
}

/// The compositing screen
#[derive(Debug)]
pub struct Screen {
    id: ScreenId,
    size: Size,
    background: char,
    border: BorderGlyphs,
    grid: Grid,
    /// Attached clients, bottom of the stack first
    clients: Vec<ClientHandle>,
}

impl Screen {
    /// Create a blank screen with the default border
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_border(width, height, BorderGlyphs::default())
    }

    /// Create a blank screen with a custom border
    pub fn with_border(width: usize, height: usize, border: BorderGlyphs) -> Result<Self> {
        let size = Size::new(width, height)?;
        let mut screen = Self {
            id: ScreenId::next(),
            size,
            background: ' ',
            border,
            grid: Grid::new(width, height, ' '),
            clients: Vec::new(),
        };
        screen.clear();
        Ok(screen)
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn background(&self) -> char {
        self.background
    }

    pub fn border(&self) -> &BorderGlyphs {
        &self.border
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the character at a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        self.grid.cell(col, row)
    }

    /// Change the background. Visible after the next clear or refresh.
    pub fn set_background(&mut self, ch: char) {
        self.background = ch;
    }

    /// Change the border glyphs. Visible after the next clear or refresh.
    pub fn set_border(&mut self, border: BorderGlyphs) {
        self.border = border;
    }

    /// Copy of the attached clients in attachment order
    pub fn clients(&self) -> Vec<ClientHandle> {
        self.clients.clone()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Geometry and peer list as seen by client hooks
    pub fn context(&self) -> ScreenContext {
        ScreenContext {
            id: self.id,
            size: self.size,
            background: self.background,
            clients: self.clients.iter().map(|c| c.borrow().info()).collect(),
        }
    }

    /// Attach a client on top of the stack and run its attach hook.
    ///
    /// The same client may be attached to this screen more than once, but not
    /// to two screens at the same time. If the hook fails the client is
    /// taken off again and the error is returned.
    ///
    /// # Panics
    ///
    /// Panics if the client is borrowed elsewhere during the call.
    pub fn attach(&mut self, client: &ClientHandle) -> Result<()> {
        let (previous, info) = {
            let inner = client.borrow();
            (inner.context(), inner.info())
        };
        if matches!(previous, Some(id) if id != self.id) {
            return Err(Error::AlreadyAttached);
        }

        // Peers are read before the list changes so a borrow panic leaves it intact
        let mut context = self.context();
        context.clients.push(info);
        self.clients.push(client.clone());

        let mut inner = client.borrow_mut();
        inner.set_context(Some(self.id));
        debug!(
            screen = %self.id,
            kind = inner.kind(),
            clients = self.clients.len(),
            "attaching client"
        );

        if let Err(e) = inner.run_attach(&context) {
            warn!(screen = %self.id, kind = inner.kind(), "attach hook failed: {}", e);
            inner.set_context(previous);
            drop(inner);
            self.clients.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Detach the first instance of `client` if its detach hook allows it.
    ///
    /// The hook is not run for clients that are not attached here.
    pub fn detach(&mut self, client: &ClientHandle) -> Detach {
        let Some(index) = self.clients.iter().position(|c| c == client) else {
            debug!(screen = %self.id, "detach of unknown client ignored");
            return Detach::NotAttached;
        };

        let mut inner = client.borrow_mut();
        if !inner.run_detach() {
            debug!(screen = %self.id, kind = inner.kind(), "detach vetoed");
            return Detach::Vetoed;
        }
        debug!(screen = %self.id, kind = inner.kind(), "detaching client");

        self.clients.remove(index);
        if !self.clients.contains(client) {
            inner.set_context(None);
        }
        Detach::Removed
    }

    /// Reset the buffer to the background and draw the border
    pub fn clear(&mut self) {
        self.grid.fill(self.background);
        self.draw_border();
    }

    /// Draw the border over the outermost rows and columns
    pub fn draw_border(&mut self) {
        self.border.draw(&mut self.grid);
    }

    /// Recompose the buffer from scratch.
    ///
    /// Clients are copied in attachment order; later clients cover earlier
    /// ones and anything outside the screen is clipped.
    ///
    /// # Panics
    ///
    /// Panics if an attached client is currently borrowed mutably, for
    /// example through a live `surface_mut()` guard.
    pub fn refresh(&mut self) {
        self.clear();
        for client in &self.clients {
            let client = client.borrow();
            let surface = client.surface();
            self.grid.blit(surface.grid(), surface.position());
        }
        trace!(screen = %self.id, clients = self.clients.len(), "refreshed");
    }

    /// Serialize the buffer: rows joined by newlines, no trailing newline
    pub fn render(&self) -> String {
        self.grid.to_string()
    }

    /// Serializable copy of the current buffer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_grid(&self.grid)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Client, ClientHooks, Surface};

    struct Stubborn;

    impl ClientHooks for Stubborn {
        fn on_detach(&mut self, _surface: &mut Surface) -> bool {
            false
        }
    }

    struct Failing;

    impl ClientHooks for Failing {
        fn on_attach(&mut self, surface: &mut Surface, _screen: &ScreenContext) -> Result<()> {
            surface.set_line(5, "boom")
        }
    }

    /// Records what it saw when attached
    struct Probe {
        seen: std::rc::Rc<std::cell::RefCell<Option<ScreenContext>>>,
    }

    impl ClientHooks for Probe {
        fn on_attach(&mut self, _surface: &mut Surface, screen: &ScreenContext) -> Result<()> {
            *self.seen.borrow_mut() = Some(screen.clone());
            Ok(())
        }
    }

    fn text_client(width: usize, height: usize, x: i32, y: i32, text: &str) -> ClientHandle {
        let handle = ClientHandle::plain(width, height).unwrap();
        {
            let mut surface = handle.surface_mut();
            surface.set_position(x, y);
            surface.set_contents(text);
        }
        handle
    }

    #[test]
    fn test_new_screen_is_cleared() {
        let screen = Screen::new(4, 3).unwrap();
        assert_eq!(screen.render(), "┏━━┓\n┃  ┃\n┗━━┛");
        assert_eq!(screen.background(), ' ');
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            Screen::new(0, 5),
            Err(Error::InvalidSize {
                width: 0,
                height: 5
            })
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Screen::new(1, 1).unwrap();
        let b = Screen::new(1, 1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_refresh_without_clients_matches_clear() {
        let mut screen = Screen::new(6, 4).unwrap();
        screen.clear();
        let cleared = screen.render();
        screen.refresh();
        assert_eq!(screen.render(), cleared);
    }

    #[test]
    fn test_refresh_example() {
        let mut screen = Screen::new(5, 4).unwrap();
        let client = text_client(3, 1, 1, 1, "abc");
        screen.attach(&client).unwrap();
        screen.refresh();
        assert_eq!(screen.render(), "┏━━━┓\n┃abc┃\n┃   ┃\n┗━━━┛");
    }

    #[test]
    fn test_later_client_on_top() {
        let mut screen = Screen::new(6, 4).unwrap();
        let a = text_client(3, 2, 0, 0, "aaa\naaa");
        let b = text_client(3, 2, 2, 1, "bbb\nbbb");
        screen.attach(&a).unwrap();
        screen.attach(&b).unwrap();
        screen.refresh();
        assert_eq!(screen.render(), "aaa━━┓\naabbb┃\n┃ bbb┃\n┗━━━━┛");
    }

    #[test]
    fn test_client_covers_border() {
        let mut screen = Screen::new(3, 3).unwrap();
        let client = text_client(3, 1, 0, 2, "xyz");
        screen.attach(&client).unwrap();
        screen.refresh();
        assert_eq!(screen.render(), "┏━┓\n┃ ┃\nxyz");
    }

    #[test]
    fn test_set_background_applies_on_refresh() {
        let mut screen = Screen::new(3, 3).unwrap();
        screen.set_background('.');
        assert_eq!(screen.cell(1, 1), Some(' '));
        screen.refresh();
        assert_eq!(screen.cell(1, 1), Some('.'));
    }

    #[test]
    fn test_attach_sets_context() {
        let mut screen = Screen::new(3, 3).unwrap();
        let client = ClientHandle::plain(1, 1).unwrap();
        screen.attach(&client).unwrap();
        assert_eq!(client.borrow().context(), Some(screen.id()));
        assert_eq!(screen.client_count(), 1);
    }

    #[test]
    fn test_attach_hook_sees_geometry_and_self() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(None));
        let probe = ClientHandle::new(Client::with_hooks(
            Surface::new(1, 1).unwrap(),
            Probe { seen: seen.clone() },
        ));
        let mut screen = Screen::new(7, 5).unwrap();
        screen.attach(&ClientHandle::plain(2, 2).unwrap()).unwrap();
        screen.attach(&probe).unwrap();

        let context = seen.borrow().clone().unwrap();
        assert_eq!(context.id(), screen.id());
        assert_eq!((context.width(), context.height()), (7, 5));
        assert_eq!(context.clients().len(), 2);
    }

    #[test]
    fn test_attach_to_second_screen_fails() {
        let mut first = Screen::new(3, 3).unwrap();
        let mut second = Screen::new(3, 3).unwrap();
        let client = ClientHandle::plain(1, 1).unwrap();
        first.attach(&client).unwrap();
        assert_eq!(second.attach(&client), Err(Error::AlreadyAttached));
        assert_eq!(second.client_count(), 0);
        assert_eq!(client.borrow().context(), Some(first.id()));
    }

    #[test]
    fn test_attach_twice_to_same_screen() {
        let mut screen = Screen::new(3, 3).unwrap();
        let client = ClientHandle::plain(1, 1).unwrap();
        screen.attach(&client).unwrap();
        screen.attach(&client).unwrap();
        assert_eq!(screen.client_count(), 2);

        assert_eq!(screen.detach(&client), Detach::Removed);
        assert_eq!(client.borrow().context(), Some(screen.id()));
        assert_eq!(screen.detach(&client), Detach::Removed);
        assert_eq!(client.borrow().context(), None);
    }

    #[test]
    fn test_failed_attach_rolls_back() {
        let mut screen = Screen::new(3, 3).unwrap();
        let client = ClientHandle::new(Client::with_hooks(Surface::new(1, 1).unwrap(), Failing));
        let err = screen.attach(&client).unwrap_err();
        assert_eq!(err, Error::LineOutOfRange { index: 5, rows: 1 });
        assert_eq!(screen.client_count(), 0);
        assert_eq!(client.borrow().context(), None);
    }

    #[test]
    fn test_detach_veto() {
        let mut screen = Screen::new(3, 3).unwrap();
        let stubborn = ClientHandle::new(Client::with_hooks(Surface::new(1, 1).unwrap(), Stubborn));
        screen.attach(&stubborn).unwrap();
        assert_eq!(screen.detach(&stubborn), Detach::Vetoed);
        assert_eq!(screen.clients(), vec![stubborn.clone()]);
        assert_eq!(stubborn.borrow().context(), Some(screen.id()));
    }

    #[test]
    fn test_detach_unknown_client() {
        let mut screen = Screen::new(3, 3).unwrap();
        let client = ClientHandle::plain(1, 1).unwrap();
        assert_eq!(screen.detach(&client), Detach::NotAttached);
        assert!(!Detach::NotAttached.is_removed());
    }

    #[test]
    fn test_detach_then_attach_elsewhere() {
        let mut first = Screen::new(3, 3).unwrap();
        let mut second = Screen::new(3, 3).unwrap();
        let client = ClientHandle::plain(1, 1).unwrap();
        first.attach(&client).unwrap();
        assert!(first.detach(&client).is_removed());
        second.attach(&client).unwrap();
        assert_eq!(client.borrow().context(), Some(second.id()));
    }

    #[test]
    fn test_attach_panic_leaves_list_unchanged() {
        let mut screen = Screen::new(3, 3).unwrap();
        let busy = ClientHandle::plain(1, 1).unwrap();
        screen.attach(&busy).unwrap();

        let newcomer = ClientHandle::plain(1, 1).unwrap();
        let guard = busy.surface_mut();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            screen.attach(&newcomer)
        }));
        drop(guard);

        assert!(result.is_err());
        assert_eq!(screen.clients(), vec![busy]);
        assert_eq!(newcomer.borrow().context(), None);
    }

    #[test]
    fn test_clients_is_a_copy() {
        let mut screen = Screen::new(3, 3).unwrap();
        screen.attach(&ClientHandle::plain(1, 1).unwrap()).unwrap();
        let mut copy = screen.clients();
        copy.clear();
        assert_eq!(screen.client_count(), 1);
    }
}
