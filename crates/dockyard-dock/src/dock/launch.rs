//! Launching-icon lifecycle and slot launches.

use std::time::Instant;

use dockyard_common::{DockError, LaunchId, LaunchTarget, Point};
use tracing::{debug, info, warn};

use super::Dock;
use crate::launcher::Launcher;
use crate::launching::{IconImage, LaunchingIcon};
use crate::placement::IconPlacer;

impl Dock {
    /// Start the launch animation for `name`.
    ///
    /// Lands on the docked slot for `name` when there is one, otherwise on
    /// the next free icon-yard position. An icon already in flight toward
    /// the same target is destroyed first.
    pub fn create_launching_icon(
        &mut self,
        name: &str,
        image: IconImage,
        source_point: Point,
        image_path: &str,
        placer: &dyn IconPlacer,
    ) -> &LaunchingIcon {
        let target = match self.position_of(name) {
            Some(position) => LaunchTarget::Dock(position),
            None => {
                let occupied: Vec<usize> = self
                    .launching
                    .keys()
                    .filter_map(|t| match t {
                        LaunchTarget::Yard(p) => Some(*p),
                        LaunchTarget::Dock(_) => None,
                    })
                    .collect();
                LaunchTarget::Yard(placer.next_yard_position(&occupied))
            }
        };

        if let Some(prior) = self.launching.remove(&target) {
            debug!(launch_id = %prior.id, %target, "replacing launching icon");
        }

        let id = LaunchId(self.next_launch_id);
        self.next_launch_id += 1;

        if let LaunchTarget::Dock(position) = target {
            if let Some(slot) = self.slots.get_mut(position) {
                slot.launching = true;
            }
        }

        let icon = LaunchingIcon {
            id,
            name: name.to_string(),
            image,
            source_point,
            destination: placer.point_for(target),
            image_path: image_path.to_string(),
            target,
            placed: false,
            created_at: Instant::now(),
        };
        info!(launch_id = %id, name, %target, "launching icon created");
        self.launching.entry(target).or_insert(icon)
    }

    pub fn launching_icon(&self, id: LaunchId) -> Option<&LaunchingIcon> {
        self.launching.values().find(|icon| icon.id == id)
    }

    pub fn launching_icons(&self) -> impl Iterator<Item = &LaunchingIcon> {
        self.launching.values()
    }

    /// Remove a launching icon. Returns `None` if it is already gone.
    pub fn destroy_launching_icon(&mut self, id: LaunchId) -> Option<LaunchingIcon> {
        let target = self
            .launching
            .iter()
            .find(|(_, icon)| icon.id == id)
            .map(|(target, _)| *target)?;
        let icon = self.launching.remove(&target)?;
        if let LaunchTarget::Dock(position) = target {
            if let Some(slot) = self.slots.get_mut(position) {
                slot.launching = false;
            }
        }
        debug!(launch_id = %id, %target, "launching icon destroyed");
        Some(icon)
    }

    /// The slide animation for `id` landed. Stale ids are ignored.
    pub fn placement_finished(&mut self, id: LaunchId) -> bool {
        match self.launching.values_mut().find(|icon| icon.id == id) {
            Some(icon) => {
                icon.placed = true;
                true
            }
            None => {
                debug!(launch_id = %id, "placement callback for a launch that is gone");
                false
            }
        }
    }

    /// The application named `name` showed up; every launch of it is over.
    /// Returns the launching icons that were in flight, in target order.
    pub fn finish_launch(&mut self, name: &str) -> Vec<LaunchingIcon> {
        if let Some(position) = self.position_of(name) {
            if let Some(slot) = self.slots.get_mut(position) {
                slot.launching = false;
            }
        }
        let ids: Vec<LaunchId> = self
            .launching
            .values()
            .filter(|icon| icon.name == name)
            .map(|icon| icon.id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.destroy_launching_icon(id))
            .collect()
    }

    /// Run the command at `position`, marking the slot launching.
    pub fn launch(&mut self, position: usize, launcher: &dyn Launcher) -> Result<u32, DockError> {
        self.check_position(position)?;
        let command = match self.assigned(position) {
            Some(slot) => slot.command.clone(),
            None => return Err(DockError::Unassigned(position)),
        };

        self.set_launching(position, true)?;
        match launcher.launch(&command) {
            Ok(pid) => {
                info!(position, pid, command = %command, "dock slot launched");
                Ok(pid)
            }
            Err(reason) => {
                warn!(position, command = %command, "launch failed: {reason}");
                self.set_launching(position, false)?;
                Err(DockError::LaunchFailed { position, reason })
            }
        }
    }
}
