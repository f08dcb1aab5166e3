//! Handling of the shell → window manager (WWM) vector.

use std::fmt::Display;
use std::sync::Arc;

use dockyard_common::{LaunchId, LaunchTarget, Point, ShutdownMode};
use dockyard_dock::{auto_launch, DockSlot, IconImage};
use dockyard_gateway::{
    AutoLaunchOutcome, DockAppEntry, LaunchingIconInfo, WwmReply, WwmRequest, XwNotification,
};
use tracing::{info, warn};

use super::WindowManagerService;
use crate::timer::{TimerKind, TimerTask};

const INTEGRATION_DISABLED: &str = "shell integration is disabled";

fn ack<E: Display>(result: Result<(), E>) -> WwmReply {
    match result {
        Ok(()) => WwmReply::Ack,
        Err(e) => WwmReply::Failed(e.to_string()),
    }
}

impl WindowManagerService {
    pub(super) fn handle_request(&mut self, request: WwmRequest) -> WwmReply {
        match request {
            WwmRequest::Initialize => self.initialize(),
            WwmRequest::SetupSignalHandling => ack(self.server.suppress_signal_handling()),
            WwmRequest::SetupFrameOffsetProperty => ack(self.server.setup_frame_offset_property()),
            WwmRequest::WindowState { window } => {
                WwmReply::WindowState(self.server.window_state(window))
            }
            WwmRequest::NotDockedAppList => WwmReply::AppNames(self.not_docked_apps()),
            WwmRequest::IsAppRunning { name } => {
                WwmReply::Bool(self.registry.app_by_name(&name).is_some())
            }
            WwmRequest::ExecuteCommand { command } => match self.launcher.launch(&command) {
                Ok(pid) => WwmReply::Pid(pid),
                Err(reason) => WwmReply::Failed(reason),
            },
            WwmRequest::WipeDesktop => self.wipe_desktop(),
            WwmRequest::Shutdown { mode } => self.begin_shutdown(mode),
            dock_request => self.handle_dock_request(dock_request),
        }
    }

    fn initialize(&mut self) -> WwmReply {
        if self.initialized {
            return WwmReply::Ack;
        }
        self.initialized = true;
        info!(
            integrated = self.is_integrated(),
            apps = self.registry.len(),
            "window manager initialized"
        );
        if self.dock.is_some() {
            self.notify(XwNotification::ScreenInfoDidUpdate(self.screen));
            self.notify(XwNotification::DockContentDidChange);
        }
        WwmReply::Ack
    }

    fn not_docked_apps(&self) -> Vec<String> {
        self.registry
            .applications()
            .filter(|app| {
                self.dock
                    .as_ref()
                    .map_or(true, |dock| dock.position_of(app.name()).is_none())
            })
            .map(|app| app.name().to_string())
            .collect()
    }

    /// Close every managed window ahead of a logout.
    fn wipe_desktop(&mut self) -> WwmReply {
        let windows: Vec<_> = self
            .registry
            .applications()
            .flat_map(|app| app.members().to_vec())
            .collect();
        info!(windows = windows.len(), "wiping desktop");
        for window in windows {
            if let Err(e) = self.server.close_window(window) {
                warn!(%window, "failed to close window: {e}");
            }
        }
        WwmReply::Ack
    }

    fn begin_shutdown(&mut self, mode: ShutdownMode) -> WwmReply {
        info!(?mode, "shutdown requested");
        if mode == ShutdownMode::Kill {
            let leaders: Vec<_> = self.registry.applications().map(|a| a.leader()).collect();
            for leader in leaders {
                if let Err(e) = self.server.kill_client(leader) {
                    warn!(%leader, "failed to kill client: {e}");
                }
            }
        }
        if let Some(dock) = self.dock.as_mut() {
            if let Err(e) = dock.save_state() {
                warn!("failed to save dock state at shutdown: {e}");
            }
        }
        self.launch_timers.clear();
        self.slot_timers.clear();
        self.shell = None;
        self.shutdown = Some(mode);
        WwmReply::Ack
    }

    // -- Dock --

    fn handle_dock_request(&mut self, request: WwmRequest) -> WwmReply {
        if self.dock.is_none() {
            return WwmReply::Failed(INTEGRATION_DISABLED.to_string());
        }
        match request {
            WwmRequest::DockAutoLaunch => self.dock_auto_launch(),
            WwmRequest::CreateLaunchingIcon {
                name,
                image,
                source_point,
                image_path,
            } => self.create_launching_icon(&name, image, source_point, &image_path),
            WwmRequest::DestroyLaunchingIcon { id } => {
                WwmReply::Bool(self.destroy_launching_icon(id))
            }
            WwmRequest::SetDockAppCommand { position, command } => {
                let reply = match self.dock.as_mut() {
                    Some(dock) => ack(dock.set_command(position, &command)),
                    None => WwmReply::Failed(INTEGRATION_DISABLED.to_string()),
                };
                if reply == WwmReply::Ack {
                    self.relink_app_icon(position);
                }
                reply
            }
            other => self.handle_slot_request(other),
        }
    }

    fn handle_slot_request(&mut self, request: WwmRequest) -> WwmReply {
        let Some(dock) = self.dock.as_mut() else {
            return WwmReply::Failed(INTEGRATION_DISABLED.to_string());
        };
        match request {
            WwmRequest::DockShowIcons => {
                dock.show_icons();
                WwmReply::Ack
            }
            WwmRequest::DockHideIcons => {
                dock.hide_icons();
                WwmReply::Ack
            }
            WwmRequest::DockCollapse => ack(dock.collapse()),
            WwmRequest::DockUncollapse => ack(dock.uncollapse()),
            WwmRequest::IconYardShowIcons => {
                dock.show_yard();
                WwmReply::Ack
            }
            WwmRequest::IconYardHideIcons => {
                dock.hide_yard();
                WwmReply::Ack
            }
            WwmRequest::DockLevel => WwmReply::Level(dock.level()),
            WwmRequest::SetDockLevel { level } => {
                dock.set_level(level);
                WwmReply::Ack
            }
            WwmRequest::DockState => WwmReply::DockState(dock.state()),
            WwmRequest::DockStateSave => ack(dock.save_state()),
            WwmRequest::DockStateApps => WwmReply::DockApps(
                dock.state_apps()
                    .into_iter()
                    .map(|(position, record)| DockAppEntry { position, record })
                    .collect(),
            ),
            WwmRequest::DockAppsCount => WwmReply::Count(dock.apps_count()),
            WwmRequest::DockApp { position } => WwmReply::Slot(
                dock.slot(position)
                    .filter(|s| s.is_assigned())
                    .map(DockSlot::to_record),
            ),
            WwmRequest::SetDockAppPasteCommand { position, command } => {
                ack(dock.set_paste_command(position, &command))
            }
            WwmRequest::SetDockAppDndCommand { position, command } => {
                ack(dock.set_dnd_command(position, &command))
            }
            WwmRequest::SetDockAppAutolaunch {
                position,
                autolaunch,
            } => ack(dock.set_autolaunch(position, autolaunch)),
            WwmRequest::SetDockAppLocked { position, locked } => {
                ack(dock.set_locked(position, locked))
            }
            WwmRequest::SetDockAppImage {
                position,
                path,
                saved,
            } => ack(dock.set_image_path(position, &path, saved)),
            WwmRequest::SetDockAppiconState {
                position,
                launching,
            } => ack(dock.set_launching(position, launching)),
            other => WwmReply::Failed(format!("{} is not a dock request", other.kind())),
        }
    }

    /// Point the running application for `position`, if any, at its slot.
    pub(super) fn relink_app_icon(&mut self, position: usize) {
        self.registry.detach_app_icon(position);
        let Some(name) = self.dock.as_ref().and_then(|d| d.app_name(position)) else {
            return;
        };
        if let Some(leader) = self.registry.app_by_name(&name).map(|a| a.leader()) {
            self.registry.set_app_icon(leader, Some(position));
        }
    }

    fn dock_auto_launch(&mut self) -> WwmReply {
        let Some(dock) = self.dock.as_mut() else {
            return WwmReply::Failed(INTEGRATION_DISABLED.to_string());
        };
        let reports = auto_launch(dock, self.launcher.as_ref());

        let mut outcomes = Vec::with_capacity(reports.len());
        for report in reports {
            let position = report.position;
            match report.result {
                Ok(pid) => {
                    self.arm_slot_timer(position);
                    outcomes.push(AutoLaunchOutcome {
                        position,
                        pid: Some(pid),
                        error: None,
                    });
                }
                Err(e) => {
                    let name = self
                        .dock
                        .as_ref()
                        .and_then(|d| d.app_name(position))
                        .unwrap_or_default();
                    self.notify(XwNotification::LaunchFailed {
                        launch_id: None,
                        position: Some(position),
                        name,
                        reason: e.to_string(),
                    });
                    outcomes.push(AutoLaunchOutcome {
                        position,
                        pid: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }
        WwmReply::AutoLaunched(outcomes)
    }

    pub(super) fn arm_slot_timer(&mut self, position: usize) {
        let timer = TimerTask::once(
            Arc::clone(&self.timers),
            TimerKind::SlotLaunchTimeout(position),
            self.launch_timeout,
        );
        self.slot_timers.insert(position, timer);
    }

    fn create_launching_icon(
        &mut self,
        name: &str,
        image: IconImage,
        source_point: Point,
        image_path: &str,
    ) -> WwmReply {
        let Some(dock) = self.dock.as_mut() else {
            return WwmReply::Failed(INTEGRATION_DISABLED.to_string());
        };
        let icon = dock.create_launching_icon(
            name,
            image,
            source_point,
            image_path,
            self.placer.as_ref(),
        );
        let info = LaunchingIconInfo {
            id: icon.id,
            target: icon.target,
            destination: icon.destination,
        };

        // A replaced icon takes its timeout with it.
        self.launch_timers
            .retain(|id, _| dock.launching_icon(*id).is_some());
        self.launch_timers.insert(
            info.id,
            TimerTask::once(
                Arc::clone(&self.timers),
                TimerKind::LaunchTimeout(info.id),
                self.launch_timeout,
            ),
        );

        if !self.animator.slide(info.id, source_point, info.destination) {
            dock.placement_finished(info.id);
        }
        if let LaunchTarget::Dock(position) = info.target {
            self.slot_timers.remove(&position);
        }
        WwmReply::LaunchingIcon(info)
    }

    /// Returns whether the icon still existed.
    pub(super) fn destroy_launching_icon(&mut self, id: LaunchId) -> bool {
        self.launch_timers.remove(&id);
        self.dock
            .as_mut()
            .and_then(|dock| dock.destroy_launching_icon(id))
            .is_some()
    }
}
