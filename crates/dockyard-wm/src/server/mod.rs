//! Window-server collaborator.
//!
//! The protocol-level work (X requests, client messages, property setup)
//! lives behind this trait; the registry and service only decide *what*
//! should happen to a window.

use dockyard_common::{PlatformError, WindowId, WindowState};

pub mod headless;

pub use headless::HeadlessWindowServer;

pub type Result<T> = std::result::Result<T, PlatformError>;

pub trait WindowServer: Send {
    /// A window was mapped and is now managed.
    fn window_mapped(&self, _window: WindowId) {}

    /// A managed window went away.
    fn window_unmapped(&self, _window: WindowId) {}

    fn focus_window(&self, window: WindowId) -> Result<()>;
    fn set_hidden(&self, window: WindowId, hidden: bool) -> Result<()>;
    /// Politely ask the client to close `window`.
    fn close_window(&self, window: WindowId) -> Result<()>;
    /// Forcibly disconnect the client owning `window`.
    fn kill_client(&self, window: WindowId) -> Result<()>;
    fn window_state(&self, window: WindowId) -> Option<WindowState>;
    fn setup_frame_offset_property(&self) -> Result<()>;
    /// Leave process signals to the host application.
    fn suppress_signal_handling(&self) -> Result<()>;
}

impl<T> WindowServer for std::sync::Arc<T>
where
    T: WindowServer + Sync + ?Sized,
{
    fn window_mapped(&self, window: WindowId) {
        (**self).window_mapped(window)
    }

    fn window_unmapped(&self, window: WindowId) {
        (**self).window_unmapped(window)
    }

    fn focus_window(&self, window: WindowId) -> Result<()> {
        (**self).focus_window(window)
    }

    fn set_hidden(&self, window: WindowId, hidden: bool) -> Result<()> {
        (**self).set_hidden(window, hidden)
    }

    fn close_window(&self, window: WindowId) -> Result<()> {
        (**self).close_window(window)
    }

    fn kill_client(&self, window: WindowId) -> Result<()> {
        (**self).kill_client(window)
    }

    fn window_state(&self, window: WindowId) -> Option<WindowState> {
        (**self).window_state(window)
    }

    fn setup_frame_offset_property(&self) -> Result<()> {
        (**self).setup_frame_offset_property()
    }

    fn suppress_signal_handling(&self) -> Result<()> {
        (**self).suppress_signal_handling()
    }
}
