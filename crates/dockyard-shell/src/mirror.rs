//! The shell's picture of the window manager's state, rebuilt from XW
//! notifications.

use std::collections::{BTreeMap, VecDeque};

use dockyard_common::{ScreenInfo, WindowId};
use dockyard_config::PersistedDockState;
use dockyard_gateway::XwNotification;
use tracing::{debug, warn};

/// Failures kept between drains; older ones are dropped first.
pub const MAX_LAUNCH_FAILURES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredApp {
    pub leader: WindowId,
    pub name: String,
    pub windows: Vec<WindowId>,
}

/// A launch the window manager gave up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchFailure {
    pub name: String,
    pub position: Option<usize>,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct WorkspaceMirror {
    apps: BTreeMap<WindowId, MirroredApp>,
    workspace: usize,
    focused: Option<WindowId>,
    screen: Option<ScreenInfo>,
    dock: Option<PersistedDockState>,
    dock_stale: bool,
    failures: VecDeque<LaunchFailure>,
}

impl WorkspaceMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one notification in. Returns false for notifications that do
    /// not describe state (activation requests).
    pub fn apply(&mut self, notification: &XwNotification) -> bool {
        match notification {
            XwNotification::ApplicationDidCreate {
                leader,
                window,
                name,
            } => {
                self.apps.insert(
                    *leader,
                    MirroredApp {
                        leader: *leader,
                        name: name.clone(),
                        windows: vec![*window],
                    },
                );
            }
            XwNotification::ApplicationDidAddWindow { leader, window } => {
                match self.apps.get_mut(leader) {
                    Some(app) if !app.windows.contains(window) => app.windows.push(*window),
                    Some(_) => {}
                    None => warn!(%leader, %window, "window added to an application never announced"),
                }
            }
            XwNotification::ApplicationDidCloseWindow { leader, window } => {
                if let Some(app) = self.apps.get_mut(leader) {
                    app.windows.retain(|w| w != window);
                }
                if self.focused == Some(*window) {
                    self.focused = None;
                }
            }
            XwNotification::ApplicationDidDestroy { leader } => {
                if self.apps.remove(leader).is_none() {
                    debug!(%leader, "destroy for an unknown application");
                }
            }
            XwNotification::ScreenInfoDidUpdate(screen) => self.screen = Some(*screen),
            XwNotification::WorkspaceDidChange { workspace, focused } => {
                self.workspace = *workspace;
                self.focused = *focused;
            }
            XwNotification::DockContentDidChange => self.dock_stale = true,
            XwNotification::LaunchFailed {
                name,
                position,
                reason,
                ..
            } => {
                if self.failures.len() == MAX_LAUNCH_FAILURES {
                    self.failures.pop_front();
                }
                self.failures.push_back(LaunchFailure {
                    name: name.clone(),
                    position: *position,
                    reason: reason.clone(),
                });
            }
            XwNotification::ActivateApplication { .. } | XwNotification::ActivateWorkspaceApp => {
                return false;
            }
        }
        true
    }

    pub fn apps(&self) -> impl Iterator<Item = &MirroredApp> {
        self.apps.values()
    }

    pub fn app(&self, leader: WindowId) -> Option<&MirroredApp> {
        self.apps.get(&leader)
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.apps.values().any(|app| app.name == name)
    }

    pub fn workspace(&self) -> usize {
        self.workspace
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn screen(&self) -> Option<ScreenInfo> {
        self.screen
    }

    pub fn dock(&self) -> Option<&PersistedDockState> {
        self.dock.as_ref()
    }

    /// The window manager changed the dock since the last snapshot.
    pub fn dock_stale(&self) -> bool {
        self.dock_stale
    }

    pub fn set_dock(&mut self, state: PersistedDockState) {
        self.dock = Some(state);
        self.dock_stale = false;
    }

    pub fn launch_failures(&self) -> impl Iterator<Item = &LaunchFailure> {
        self.failures.iter()
    }

    /// Hand over the recorded failures, oldest first, and forget them.
    pub fn take_launch_failures(&mut self) -> Vec<LaunchFailure> {
        std::mem::take(&mut self.failures).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEADER: WindowId = WindowId(0x100);

    fn created() -> XwNotification {
        XwNotification::ApplicationDidCreate {
            leader: LEADER,
            window: WindowId(0x101),
            name: "TextEdit".into(),
        }
    }

    #[test]
    fn tracks_application_lifecycle() {
        let mut mirror = WorkspaceMirror::new();
        mirror.apply(&created());
        mirror.apply(&XwNotification::ApplicationDidAddWindow {
            leader: LEADER,
            window: WindowId(0x102),
        });
        assert!(mirror.is_running("TextEdit"));
        assert_eq!(mirror.app(LEADER).unwrap().windows.len(), 2);

        mirror.apply(&XwNotification::ApplicationDidCloseWindow {
            leader: LEADER,
            window: WindowId(0x101),
        });
        assert_eq!(mirror.app(LEADER).unwrap().windows, vec![WindowId(0x102)]);

        mirror.apply(&XwNotification::ApplicationDidDestroy { leader: LEADER });
        assert!(!mirror.is_running("TextEdit"));
        assert_eq!(mirror.apps().count(), 0);
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let mut mirror = WorkspaceMirror::new();
        mirror.apply(&created());
        mirror.apply(&XwNotification::ApplicationDidAddWindow {
            leader: LEADER,
            window: WindowId(0x101),
        });
        assert_eq!(mirror.app(LEADER).unwrap().windows.len(), 1);
    }

    #[test]
    fn workspace_change_moves_focus() {
        let mut mirror = WorkspaceMirror::new();
        mirror.apply(&XwNotification::WorkspaceDidChange {
            workspace: 2,
            focused: Some(WindowId(0x101)),
        });
        assert_eq!(mirror.workspace(), 2);
        assert_eq!(mirror.focused(), Some(WindowId(0x101)));

        mirror.apply(&created());
        mirror.apply(&XwNotification::ApplicationDidCloseWindow {
            leader: LEADER,
            window: WindowId(0x101),
        });
        assert_eq!(mirror.focused(), None);
    }

    #[test]
    fn dock_snapshot_goes_stale_on_change() {
        let mut mirror = WorkspaceMirror::new();
        assert!(!mirror.dock_stale());
        mirror.apply(&XwNotification::DockContentDidChange);
        assert!(mirror.dock_stale());
        mirror.set_dock(PersistedDockState::default());
        assert!(!mirror.dock_stale());
        assert!(mirror.dock().is_some());
    }

    #[test]
    fn activation_requests_are_not_state() {
        let mut mirror = WorkspaceMirror::new();
        assert!(!mirror.apply(&XwNotification::ActivateApplication { name: "Ink".into() }));
        assert!(!mirror.apply(&XwNotification::ActivateWorkspaceApp));
        assert!(mirror.apply(&XwNotification::LaunchFailed {
            launch_id: None,
            position: Some(2),
            name: "Ink".into(),
            reason: "timed out".into(),
        }));
        assert_eq!(mirror.launch_failures().next().unwrap().position, Some(2));
    }

    fn failed(position: usize) -> XwNotification {
        XwNotification::LaunchFailed {
            launch_id: None,
            position: Some(position),
            name: "Clock".into(),
            reason: "application did not start in time".into(),
        }
    }

    #[test]
    fn launch_failures_are_capped_and_drained() {
        let mut mirror = WorkspaceMirror::new();
        for position in 0..MAX_LAUNCH_FAILURES + 5 {
            mirror.apply(&failed(position));
        }
        assert_eq!(mirror.launch_failures().count(), MAX_LAUNCH_FAILURES);
        assert_eq!(mirror.launch_failures().next().unwrap().position, Some(5));

        let drained = mirror.take_launch_failures();
        assert_eq!(drained.len(), MAX_LAUNCH_FAILURES);
        assert_eq!(drained.last().unwrap().position, Some(MAX_LAUNCH_FAILURES + 4));
        assert_eq!(mirror.launch_failures().count(), 0);
        assert!(mirror.take_launch_failures().is_empty());
    }
}
