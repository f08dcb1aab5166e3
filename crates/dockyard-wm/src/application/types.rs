//! The Application entity.

use dockyard_common::{TimerId, WindowId};

use super::menu::AppMenu;
use crate::timer::TimerTask;

/// Independent per-application flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppFlags {
    pub is_gnustep: bool,
    /// Swallow the next bounce request.
    pub skip_next_animation: bool,
    pub hidden: bool,
    /// Grouping was invented because the client named no leader.
    pub emulated: bool,
    pub bouncing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Created,
    Active,
    Inactive,
    Hidden,
}

/// One running application, keyed by its group leader.
///
/// Relations to windows and dock slots are stored as keys; a key that no
/// longer resolves means the other side is gone.
#[derive(Debug)]
pub struct Application {
    pub(super) leader: WindowId,
    pub(super) name: String,
    pub(super) refcount: usize,
    /// Holds taken with `retain`; counted in `refcount` as well.
    pub(super) holds: usize,
    /// The leader's own window, when it is mapped.
    pub(super) main_window: Option<WindowId>,
    /// Member windows in map order.
    pub(super) members: Vec<WindowId>,
    pub(super) app_icon: Option<usize>,
    pub(super) last_focused: Option<WindowId>,
    pub(super) last_workspace: usize,
    pub(super) urgent_bounce_timer: Option<TimerTask>,
    pub(super) urgent_windows: Vec<WindowId>,
    pub(super) flags: AppFlags,
    pub(super) state: AppState,
    pub(super) menu: Option<AppMenu>,
}

impl Application {
    pub(super) fn new(leader: WindowId, name: String, workspace: usize, flags: AppFlags) -> Self {
        Self {
            leader,
            name,
            refcount: 0,
            holds: 0,
            main_window: None,
            members: Vec::new(),
            app_icon: None,
            last_focused: None,
            last_workspace: workspace,
            urgent_bounce_timer: None,
            urgent_windows: Vec::new(),
            flags,
            state: AppState::Created,
            menu: None,
        }
    }

    pub fn leader(&self) -> WindowId {
        self.leader
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn refcount(&self) -> usize {
        self.refcount
    }

    pub fn holds(&self) -> usize {
        self.holds
    }

    pub fn main_window(&self) -> Option<WindowId> {
        self.main_window
    }

    pub fn members(&self) -> &[WindowId] {
        &self.members
    }

    pub fn is_member(&self, window: WindowId) -> bool {
        self.members.contains(&window)
    }

    pub fn app_icon(&self) -> Option<usize> {
        self.app_icon
    }

    pub fn last_focused(&self) -> Option<WindowId> {
        self.last_focused
    }

    pub fn last_workspace(&self) -> usize {
        self.last_workspace
    }

    pub fn flags(&self) -> AppFlags {
        self.flags
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.hidden
    }

    pub fn is_bouncing(&self) -> bool {
        self.flags.bouncing
    }

    pub fn urgent_windows(&self) -> &[WindowId] {
        &self.urgent_windows
    }

    pub fn urgent_timer_id(&self) -> Option<TimerId> {
        self.urgent_bounce_timer.as_ref().map(TimerTask::id)
    }

    pub fn has_menu(&self) -> bool {
        self.menu.is_some()
    }

    /// Window to focus when the application is brought forward: the last
    /// focused member if it is still mapped, else the newest member.
    pub fn focus_target(&self) -> Option<WindowId> {
        self.last_focused
            .filter(|w| self.is_member(*w))
            .or_else(|| self.members.last().copied())
    }
}
