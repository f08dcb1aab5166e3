//! Activation, focus, hiding and workspace bookkeeping.

use dockyard_common::WindowId;
use dockyard_gateway::XwNotification;
use tracing::debug;

use super::registry::ApplicationRegistry;
use super::types::AppState;

/// What the window server has to do to bring an application forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activation {
    pub focus: Option<WindowId>,
    /// Members that were hidden and must be shown again.
    pub shown: Vec<WindowId>,
}

impl ApplicationRegistry {
    /// Make `leader` the active application.
    ///
    /// Unhides it if hidden, stops urgent bouncing and picks the window to
    /// focus: the last focused member if still mapped, else the newest.
    pub fn activate(&mut self, leader: WindowId) -> Option<Activation> {
        if !self.apps.contains_key(&leader) {
            return None;
        }
        if let Some(previous) = self.active.filter(|p| *p != leader) {
            self.deactivate(previous);
        }

        let shown = self.unhide(leader);
        self.cancel_urgent_bounce(leader);

        let workspace = self.current_workspace;
        let app = self.apps.get_mut(&leader)?;
        app.last_workspace = workspace;
        app.state = AppState::Active;
        let focus = app.focus_target();
        self.active = Some(leader);

        debug!(%leader, focus = ?focus, "application activated");
        Some(Activation { focus, shown })
    }

    /// `leader` is losing focus; remember which member had it.
    pub fn deactivate(&mut self, leader: WindowId) -> bool {
        let focused = self.focused;
        let Some(app) = self.apps.get_mut(&leader) else {
            return false;
        };
        if let Some(window) = focused.filter(|w| app.is_member(*w)) {
            app.last_focused = Some(window);
        }
        app.state = if app.flags.hidden {
            AppState::Hidden
        } else {
            AppState::Inactive
        };
        if self.active == Some(leader) {
            self.active = None;
        }
        true
    }

    /// The window server moved focus. Returns the leader of the
    /// application that now has it.
    pub fn focus_changed(&mut self, window: Option<WindowId>) -> Option<WindowId> {
        let previous_active = self.active;
        self.focused = window;

        let Some(leader) = window.and_then(|w| self.windows.get(&w).copied()) else {
            if let Some(previous) = previous_active {
                self.deactivate(previous);
            }
            return None;
        };

        if let Some(previous) = previous_active.filter(|p| *p != leader) {
            self.deactivate(previous);
        }

        self.cancel_urgent_bounce(leader);

        let workspace = self.current_workspace;
        if let Some(app) = self.apps.get_mut(&leader) {
            app.last_focused = window;
            app.last_workspace = workspace;
            app.state = AppState::Active;
        }
        self.active = Some(leader);
        Some(leader)
    }

    /// Hide every member of `leader`. Returns the windows to unmap.
    pub fn hide(&mut self, leader: WindowId) -> Vec<WindowId> {
        match self.apps.get(&leader) {
            Some(app) if !app.flags.hidden => {}
            _ => return Vec::new(),
        }
        self.deactivate(leader);
        let Some(app) = self.apps.get_mut(&leader) else {
            return Vec::new();
        };
        app.flags.hidden = true;
        app.state = AppState::Hidden;
        debug!(%leader, "application hidden");
        app.members.clone()
    }

    /// Reverse [`hide`](Self::hide). Returns the windows to map again.
    pub fn unhide(&mut self, leader: WindowId) -> Vec<WindowId> {
        let active = self.active;
        let Some(app) = self.apps.get_mut(&leader) else {
            return Vec::new();
        };
        if !app.flags.hidden {
            return Vec::new();
        }
        app.flags.hidden = false;
        app.state = if active == Some(leader) {
            AppState::Active
        } else {
            AppState::Inactive
        };
        debug!(%leader, "application unhidden");
        app.members.clone()
    }

    /// Switch the current workspace and tell the shell.
    pub fn set_current_workspace(&mut self, workspace: usize) -> bool {
        if workspace == self.current_workspace {
            return false;
        }
        self.current_workspace = workspace;
        if let Some(app) = self.active.and_then(|l| self.apps.get_mut(&l)) {
            app.last_workspace = workspace;
        }
        self.notify(XwNotification::WorkspaceDidChange {
            workspace,
            focused: self.focused,
        });
        true
    }
}
