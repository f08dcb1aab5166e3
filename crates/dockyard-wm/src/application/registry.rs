//! Application lifecycle: creation, membership, holds and destruction.

use std::collections::HashMap;
use std::sync::Arc;

use dockyard_common::WindowId;
use dockyard_gateway::XwNotification;
use tracing::{debug, info, warn};

use super::bounce::BounceSettings;
use super::menu::AppMenu;
use super::types::{AppFlags, Application};
use crate::resolver::GroupResolver;
use crate::timer::TimerSink;

/// Owns every live [`Application`].
///
/// Transitions queue XW notifications; the owner drains them with
/// [`take_notifications`](Self::take_notifications) once the transition is
/// complete and posts them in order.
pub struct ApplicationRegistry {
    pub(super) apps: HashMap<WindowId, Application>,
    /// Leaders, most recently made-first at the head.
    pub(super) order: Vec<WindowId>,
    /// Member window → leader.
    pub(super) windows: HashMap<WindowId, WindowId>,
    pub(super) resolver: GroupResolver,
    pub(super) current_workspace: usize,
    pub(super) focused: Option<WindowId>,
    pub(super) active: Option<WindowId>,
    pub(super) outbox: Vec<XwNotification>,
    pub(super) timers: Arc<dyn TimerSink>,
    pub(super) bounce: BounceSettings,
}

impl ApplicationRegistry {
    pub fn new(timers: Arc<dyn TimerSink>, bounce: BounceSettings) -> Self {
        Self {
            apps: HashMap::new(),
            order: Vec::new(),
            windows: HashMap::new(),
            resolver: GroupResolver::new(),
            current_workspace: 0,
            focused: None,
            active: None,
            outbox: Vec::new(),
            timers,
            bounce,
        }
    }

    // -- Accessors --

    pub fn resolver(&self) -> &GroupResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut GroupResolver {
        &mut self.resolver
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn get(&self, leader: WindowId) -> Option<&Application> {
        self.apps.get(&leader)
    }

    /// Applications in registry order.
    pub fn applications(&self) -> impl Iterator<Item = &Application> {
        self.order.iter().filter_map(|leader| self.apps.get(leader))
    }

    pub fn app_by_name(&self, name: &str) -> Option<&Application> {
        self.applications().find(|app| app.name == name)
    }

    pub fn current_workspace(&self) -> usize {
        self.current_workspace
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    /// Notifications raised since the last call, oldest first.
    pub fn take_notifications(&mut self) -> Vec<XwNotification> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn notify(&mut self, notification: XwNotification) {
        self.outbox.push(notification);
    }

    // -- Lifecycle --

    /// The application `window` belongs to, created if needed.
    ///
    /// An existing application for the resolved leader is returned as is,
    /// without a notification or refcount change.
    pub fn create(&mut self, window: WindowId) -> &Application {
        let leader = self.resolver.leader_of(window);

        if !self.apps.contains_key(&leader) {
            let flags = AppFlags {
                is_gnustep: self.resolver.is_gnustep(window),
                emulated: self.resolver.is_emulated(window),
                ..Default::default()
            };
            let name = self.resolver.name_of(window);
            let mut app = Application::new(leader, name.clone(), self.current_workspace, flags);
            app.refcount = 1;
            app.members.push(window);
            if window == leader {
                app.main_window = Some(leader);
            }

            self.windows.insert(window, leader);
            self.order.push(leader);
            self.apps.insert(leader, app);

            info!(%leader, %window, name = %name, "application created");
            self.notify(XwNotification::ApplicationDidCreate {
                leader,
                window,
                name,
            });
        }

        &self.apps[&leader]
    }

    /// Make `window` a member of `leader`'s application. Returns false if
    /// there is no such application or the window already belongs to it.
    pub fn add_window(&mut self, leader: WindowId, window: WindowId) -> bool {
        let Some(app) = self.apps.get_mut(&leader) else {
            debug!(%leader, %window, "add_window for unknown application");
            return false;
        };
        if app.is_member(window) {
            return false;
        }

        app.refcount += 1;
        app.members.push(window);
        if window == leader {
            app.main_window = Some(leader);
        }
        self.windows.insert(window, leader);

        debug!(%leader, %window, refcount = app.refcount, "window added");
        self.notify(XwNotification::ApplicationDidAddWindow { leader, window });
        true
    }

    /// Drop `window` from `leader`'s application, destroying the
    /// application when nothing references it any more.
    pub fn remove_window(&mut self, leader: WindowId, window: WindowId) -> bool {
        let Some(app) = self.apps.get_mut(&leader) else {
            return false;
        };
        let Some(index) = app.members.iter().position(|w| *w == window) else {
            return false;
        };

        app.members.remove(index);
        app.refcount = app.refcount.saturating_sub(1);
        if app.main_window == Some(window) {
            app.main_window = None;
        }
        if app.last_focused == Some(window) {
            app.last_focused = None;
        }
        let was_urgent = app.urgent_windows.contains(&window);
        app.urgent_windows.retain(|w| *w != window);
        let refcount = app.refcount;
        let urgency_over = was_urgent && app.urgent_windows.is_empty();

        self.windows.remove(&window);
        if self.focused == Some(window) {
            self.focused = None;
        }

        debug!(%leader, %window, refcount, "window removed");
        self.notify(XwNotification::ApplicationDidCloseWindow { leader, window });

        if refcount == 0 {
            self.destroy(leader);
        } else if urgency_over {
            self.cancel_urgent_bounce(leader);
        }
        true
    }

    /// Keep `leader`'s application alive without a window.
    pub fn retain(&mut self, leader: WindowId) -> bool {
        match self.apps.get_mut(&leader) {
            Some(app) => {
                app.holds += 1;
                app.refcount += 1;
                true
            }
            None => false,
        }
    }

    /// Give back a hold taken with [`retain`](Self::retain).
    pub fn release(&mut self, leader: WindowId) -> bool {
        let Some(app) = self.apps.get_mut(&leader) else {
            return false;
        };
        if app.holds == 0 {
            warn!(%leader, "release without a matching hold");
            return false;
        }
        app.holds -= 1;
        app.refcount = app.refcount.saturating_sub(1);
        if app.refcount == 0 {
            self.destroy(leader);
        }
        true
    }

    /// Tear down `leader`'s application. Calling it again, from anywhere,
    /// once teardown has begun does nothing and returns false.
    pub fn destroy(&mut self, leader: WindowId) -> bool {
        // Unlinked first so a nested call sees nothing to destroy.
        let Some(mut app) = self.apps.remove(&leader) else {
            return false;
        };

        // The timer goes before anything can observe the teardown.
        if let Some(timer) = app.urgent_bounce_timer.take() {
            timer.cancel();
        }
        app.flags.bouncing = false;
        app.app_icon = None;
        app.menu = None;

        for window in &app.members {
            self.windows.remove(window);
        }
        self.order.retain(|l| *l != leader);
        if self.active == Some(leader) {
            self.active = None;
        }

        info!(%leader, name = %app.name, "application destroyed");
        self.notify(XwNotification::ApplicationDidDestroy { leader });
        true
    }

    /// The application `window` belongs to. No side effects.
    pub fn lookup(&self, window: WindowId) -> Option<&Application> {
        if let Some(leader) = self.windows.get(&window) {
            return self.apps.get(leader);
        }
        self.apps.get(&self.resolver.leader_of(window))
    }

    pub fn leader_of(&self, window: WindowId) -> Option<WindowId> {
        self.lookup(window).map(Application::leader)
    }

    /// Move `leader` to the head of the ordering.
    pub fn make_first(&mut self, leader: WindowId) -> bool {
        let Some(index) = self.order.iter().position(|l| *l == leader) else {
            return false;
        };
        let leader = self.order.remove(index);
        self.order.insert(0, leader);
        true
    }

    // -- Dock link and menu --

    pub fn set_app_icon(&mut self, leader: WindowId, position: Option<usize>) -> bool {
        match self.apps.get_mut(&leader) {
            Some(app) => {
                app.app_icon = position;
                true
            }
            None => false,
        }
    }

    /// Sever every application's link to dock `position`.
    pub fn detach_app_icon(&mut self, position: usize) {
        for app in self.apps.values_mut() {
            if app.app_icon == Some(position) {
                app.app_icon = None;
            }
        }
    }

    pub fn set_skip_next_animation(&mut self, leader: WindowId, skip: bool) -> bool {
        match self.apps.get_mut(&leader) {
            Some(app) => {
                app.flags.skip_next_animation = skip;
                true
            }
            None => false,
        }
    }

    /// The application's menu, built on first use.
    pub fn menu(&mut self, leader: WindowId) -> Option<&AppMenu> {
        let app = self.apps.get_mut(&leader)?;
        let hidden = app.flags.hidden;
        let docked = app.app_icon.is_some();
        if app.menu.is_none() {
            app.menu = Some(AppMenu::new(&app.name));
        }
        let menu = app.menu.as_mut()?;
        menu.refresh(hidden, docked);
        Some(&*menu)
    }
}
