//! Window-server events.

use dockyard_common::{GatewayError, LaunchId, ScreenInfo, WindowId};
use dockyard_gateway::{AlertChoice, XwNotification, XwReply, XwRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::WindowManagerService;
use crate::resolver::WindowHints;

/// Something the window server observed or the user did on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WindowEvent {
    Mapped {
        window: WindowId,
        #[serde(default)]
        hints: WindowHints,
    },
    Unmapped {
        window: WindowId,
    },
    FocusChanged {
        #[serde(default)]
        window: Option<WindowId>,
    },
    UrgencyChanged {
        window: WindowId,
        urgent: bool,
    },
    WorkspaceChanged {
        workspace: usize,
    },
    ScreenChanged {
        screen: ScreenInfo,
    },
    Activate {
        window: WindowId,
    },
    Hide {
        window: WindowId,
    },
    Unhide {
        window: WindowId,
    },
    BounceFinished {
        leader: WindowId,
    },
    LaunchIconPlaced {
        id: LaunchId,
    },
    /// Double-click on a docked icon.
    AppIconActivated {
        position: usize,
    },
    /// The user docked or undocked an icon by dragging it.
    DockSlotChanged {
        position: usize,
        #[serde(default)]
        command: Option<String>,
    },
    /// "Kill" chosen from an application's menu.
    KillApplication {
        window: WindowId,
    },
}

impl WindowManagerService {
    pub(super) async fn handle_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Mapped { window, hints } => self.window_mapped(window, hints),
            WindowEvent::Unmapped { window } => {
                self.server.window_unmapped(window);
                if let Some(leader) = self.registry.leader_of(window) {
                    self.registry.remove_window(leader, window);
                }
                self.registry.resolver_mut().forget(window);
            }
            WindowEvent::FocusChanged { window } => {
                self.registry.focus_changed(window);
            }
            WindowEvent::UrgencyChanged { window, urgent } => {
                if let Some(outcome) = self.registry.urgency_changed(window, urgent) {
                    if let Some(leader) = self.registry.leader_of(window) {
                        self.run_bounce(leader, outcome);
                    }
                }
            }
            WindowEvent::WorkspaceChanged { workspace } => {
                self.registry.set_current_workspace(workspace);
            }
            WindowEvent::ScreenChanged { screen } => {
                info!(width = screen.width, height = screen.height, "screen changed");
                self.screen = screen;
                self.placer.set_screen(screen);
                self.notify(XwNotification::ScreenInfoDidUpdate(screen));
            }
            WindowEvent::Activate { window } => {
                if let Some(leader) = self.registry.leader_of(window) {
                    self.activate_app(leader);
                }
            }
            WindowEvent::Hide { window } => {
                if let Some(leader) = self.registry.leader_of(window) {
                    let windows = self.registry.hide(leader);
                    self.apply_hidden(&windows, true);
                }
            }
            WindowEvent::Unhide { window } => {
                if let Some(leader) = self.registry.leader_of(window) {
                    let windows = self.registry.unhide(leader);
                    self.apply_hidden(&windows, false);
                }
            }
            WindowEvent::BounceFinished { leader } => self.registry.bounce_finished(leader),
            WindowEvent::LaunchIconPlaced { id } => {
                if let Some(dock) = self.dock.as_mut() {
                    dock.placement_finished(id);
                }
            }
            WindowEvent::AppIconActivated { position } => self.app_icon_activated(position),
            WindowEvent::DockSlotChanged { position, command } => {
                self.dock_slot_changed(position, command.unwrap_or_default())
            }
            WindowEvent::KillApplication { window } => self.kill_application(window).await,
        }
    }

    fn window_mapped(&mut self, window: WindowId, hints: WindowHints) {
        self.server.window_mapped(window);
        self.registry.resolver_mut().record(window, hints);
        let leader = self.registry.resolver().leader_of(window);

        if self.registry.get(leader).is_some() {
            self.registry.add_window(leader, window);
            return;
        }

        let name = self.registry.create(window).name().to_string();
        let Some(dock) = self.dock.as_mut() else {
            return;
        };
        if let Some(position) = dock.position_of(&name) {
            self.registry.set_app_icon(leader, Some(position));
            self.slot_timers.remove(&position);
        }
        let finished = dock.finish_launch(&name);
        for icon in &finished {
            debug!(launch_id = %icon.id, name = %name, "launch completed");
            self.launch_timers.remove(&icon.id);
        }
        if !finished.is_empty() {
            // The launch animation already drew attention to it.
            self.registry.set_skip_next_animation(leader, true);
        }
    }

    fn apply_hidden(&self, windows: &[WindowId], hidden: bool) {
        for window in windows {
            if let Err(e) = self.server.set_hidden(*window, hidden) {
                warn!(%window, hidden, "failed to change window visibility: {e}");
            }
        }
    }

    fn activate_app(&mut self, leader: WindowId) {
        let Some(activation) = self.registry.activate(leader) else {
            return;
        };
        self.apply_hidden(&activation.shown, false);
        if let Some(window) = activation.focus {
            if let Err(e) = self.server.focus_window(window) {
                warn!(%window, "failed to focus window: {e}");
            }
        }
    }

    fn app_icon_activated(&mut self, position: usize) {
        let Some(dock) = self.dock.as_ref() else {
            return;
        };
        let Some(name) = dock.app_name(position) else {
            debug!(position, "activated an unassigned dock slot");
            return;
        };

        if name == self.shell_name {
            self.notify(XwNotification::ActivateWorkspaceApp);
            return;
        }

        if let Some(app) = self.registry.app_by_name(&name) {
            let leader = app.leader();
            if app.flags().is_gnustep {
                // GNUstep applications bring themselves forward.
                self.notify(XwNotification::ActivateApplication { name });
            } else {
                self.activate_app(leader);
            }
            return;
        }

        let Some(dock) = self.dock.as_mut() else {
            return;
        };
        match dock.launch(position, self.launcher.as_ref()) {
            Ok(_) => self.arm_slot_timer(position),
            Err(e) => self.notify(XwNotification::LaunchFailed {
                launch_id: None,
                position: Some(position),
                name,
                reason: e.to_string(),
            }),
        }
    }

    fn dock_slot_changed(&mut self, position: usize, command: String) {
        let Some(dock) = self.dock.as_mut() else {
            return;
        };
        if let Err(e) = dock.set_command(position, &command) {
            warn!(position, "failed to update dock slot: {e}");
            return;
        }
        self.relink_app_icon(position);
        self.notify(XwNotification::DockContentDidChange);
    }

    /// Ask the shell to confirm, then kill. Without a shell to ask, nothing
    /// is killed.
    async fn kill_application(&mut self, window: WindowId) {
        let Some(app) = self.registry.lookup(window) else {
            return;
        };
        let leader = app.leader();
        let request = XwRequest::RunAlertPanel {
            title: "Kill Application".to_string(),
            message: format!(
                "Force {} to quit? Any unsaved changes will be lost.",
                app.name()
            ),
            default_button: "Kill".to_string(),
            alternate_button: Some("Cancel".to_string()),
            other_button: None,
        };

        let answer = match &self.shell {
            Some(shell) => shell.request(request).await,
            None => Err(GatewayError::Unavailable("shell")),
        };

        match answer {
            Ok(XwReply::Alert(AlertChoice::Default)) => {
                info!(%leader, "killing application");
                if let Err(e) = self.server.kill_client(leader) {
                    warn!(%leader, "failed to kill client: {e}");
                }
            }
            Ok(reply) => debug!(%leader, ?reply, "kill cancelled"),
            Err(GatewayError::Unavailable(_)) => {
                warn!(%leader, "no shell to confirm the kill, leaving the application running");
                self.shell = None;
            }
            Err(e) => warn!(%leader, "kill confirmation failed: {e}"),
        }
    }
}
