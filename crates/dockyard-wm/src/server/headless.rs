//! Window server with no display connection.
//!
//! Tracks the state it was asked to apply so queries answer consistently.
//! Used by the headless daemon and in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use dockyard_common::{PlatformError, WindowId, WindowState};
use tracing::debug;

use super::{Result, WindowServer};

#[derive(Debug, Default)]
pub struct HeadlessWindowServer {
    states: Mutex<HashMap<WindowId, WindowState>>,
    focused: Mutex<Option<WindowId>>,
}

impl HeadlessWindowServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused.lock().ok().and_then(|f| *f)
    }

    fn update(&self, window: WindowId, state: Option<WindowState>) -> Result<()> {
        let mut states = self
            .states
            .lock()
            .map_err(|_| PlatformError::RequestFailed("state lock poisoned".into()))?;
        match state {
            Some(state) => {
                states.insert(window, state);
            }
            None => {
                states.remove(&window);
            }
        }
        Ok(())
    }
}

impl WindowServer for HeadlessWindowServer {
    fn window_mapped(&self, window: WindowId) {
        if let Ok(mut states) = self.states.lock() {
            states.insert(window, WindowState::Normal);
        }
    }

    fn window_unmapped(&self, window: WindowId) {
        if let Err(e) = self.update(window, None) {
            debug!(%window, "failed to forget window: {e}");
        }
    }

    fn focus_window(&self, window: WindowId) -> Result<()> {
        debug!(%window, "focus");
        if let Ok(mut focused) = self.focused.lock() {
            *focused = Some(window);
        }
        Ok(())
    }

    fn set_hidden(&self, window: WindowId, hidden: bool) -> Result<()> {
        let state = if hidden {
            WindowState::Hidden
        } else {
            WindowState::Normal
        };
        self.update(window, Some(state))
    }

    fn close_window(&self, window: WindowId) -> Result<()> {
        debug!(%window, "close");
        self.update(window, None)
    }

    fn kill_client(&self, window: WindowId) -> Result<()> {
        debug!(%window, "kill client");
        self.update(window, None)
    }

    fn window_state(&self, window: WindowId) -> Option<WindowState> {
        self.states.lock().ok()?.get(&window).copied()
    }

    fn setup_frame_offset_property(&self) -> Result<()> {
        Ok(())
    }

    fn suppress_signal_handling(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_window_has_no_state() {
        let server = HeadlessWindowServer::new();
        assert!(server.window_state(WindowId(1)).is_none());
    }

    #[test]
    fn hide_and_show_are_tracked() {
        let server = HeadlessWindowServer::new();
        server.window_mapped(WindowId(1));
        assert_eq!(server.window_state(WindowId(1)), Some(WindowState::Normal));
        server.set_hidden(WindowId(1), true).unwrap();
        assert_eq!(server.window_state(WindowId(1)), Some(WindowState::Hidden));
        server.set_hidden(WindowId(1), false).unwrap();
        assert_eq!(server.window_state(WindowId(1)), Some(WindowState::Normal));
    }

    #[test]
    fn closed_window_is_forgotten() {
        let server = HeadlessWindowServer::new();
        server.window_mapped(WindowId(7));
        server.close_window(WindowId(7)).unwrap();
        assert!(server.window_state(WindowId(7)).is_none());
    }

    #[test]
    fn unmapped_window_is_forgotten() {
        let server = HeadlessWindowServer::new();
        server.window_mapped(WindowId(9));
        server.set_hidden(WindowId(9), true).unwrap();
        server.window_unmapped(WindowId(9));
        assert!(server.window_state(WindowId(9)).is_none());
    }

    #[test]
    fn focus_is_recorded() {
        let server = HeadlessWindowServer::new();
        server.focus_window(WindowId(3)).unwrap();
        assert_eq!(server.focused(), Some(WindowId(3)));
    }
}
