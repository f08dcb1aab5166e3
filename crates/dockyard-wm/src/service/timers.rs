//! Timer fires routed back through the window-manager queue.

use dockyard_common::LaunchTarget;
use dockyard_gateway::XwNotification;
use tracing::{debug, info};

use super::{WindowManagerService, WmHandle, WmInbound};
use crate::timer::{TimerFire, TimerKind, TimerSink};

impl TimerSink for WmHandle {
    fn fire(&self, fire: TimerFire) -> bool {
        self.post(WmInbound::Timer(fire)).is_ok()
    }
}

impl WindowManagerService {
    pub(super) fn handle_timer(&mut self, fire: TimerFire) {
        match fire.kind {
            TimerKind::UrgentBounce(leader) => {
                if let Some(outcome) = self.registry.on_timer(fire) {
                    self.run_bounce(leader, outcome);
                }
            }
            TimerKind::LaunchTimeout(id) => {
                let current = self
                    .launch_timers
                    .get(&id)
                    .is_some_and(|timer| timer.produced(&fire));
                if !current {
                    debug!(launch_id = %id, timer = %fire.id, "stale launch timeout ignored");
                    return;
                }
                self.launch_timers.remove(&id);

                let Some(icon) = self
                    .dock
                    .as_mut()
                    .and_then(|dock| dock.destroy_launching_icon(id))
                else {
                    return;
                };
                info!(launch_id = %id, name = %icon.name, "launch timed out");
                let position = match icon.target {
                    LaunchTarget::Dock(position) => Some(position),
                    LaunchTarget::Yard(_) => None,
                };
                self.notify(XwNotification::LaunchFailed {
                    launch_id: Some(id),
                    position,
                    name: icon.name,
                    reason: "application did not start in time".to_string(),
                });
            }
            TimerKind::SlotLaunchTimeout(position) => {
                let current = self
                    .slot_timers
                    .get(&position)
                    .is_some_and(|timer| timer.produced(&fire));
                if !current {
                    debug!(position, timer = %fire.id, "stale slot timeout ignored");
                    return;
                }
                self.slot_timers.remove(&position);

                let Some(dock) = self.dock.as_mut() else {
                    return;
                };
                if !dock.is_launching(position) {
                    return;
                }
                if let Err(e) = dock.set_launching(position, false) {
                    debug!(position, "could not clear launching flag: {e}");
                }
                let name = dock.app_name(position).unwrap_or_default();
                info!(position, name = %name, "docked launch timed out");
                self.notify(XwNotification::LaunchFailed {
                    launch_id: None,
                    position: Some(position),
                    name,
                    reason: "application did not start in time".to_string(),
                });
            }
        }
    }
}
