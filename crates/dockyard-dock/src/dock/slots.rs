//! Slot mutators. Each validates the position, applies the change and
//! commits it.

use dockyard_common::DockError;
use tracing::debug;

use super::Dock;
use crate::slot::DockSlot;

impl Dock {
    fn update<F>(&mut self, position: usize, attr: &'static str, f: F) -> Result<(), DockError>
    where
        F: FnOnce(&mut DockSlot),
    {
        self.check_position(position)?;
        if let Some(slot) = self.slots.get_mut(position) {
            f(slot);
        }
        debug!(position, attr, "dock slot updated");
        self.commit()
    }

    /// Assign the launch command. An empty command clears the slot.
    pub fn set_command(&mut self, position: usize, command: &str) -> Result<(), DockError> {
        if command.trim().is_empty() {
            return self.clear_slot(position);
        }
        self.update(position, "command", |s| s.command = command.to_string())
    }

    pub fn set_paste_command(&mut self, position: usize, command: &str) -> Result<(), DockError> {
        self.update(position, "paste_command", |s| {
            s.paste_command = command.to_string()
        })
    }

    pub fn set_dnd_command(&mut self, position: usize, command: &str) -> Result<(), DockError> {
        self.update(position, "dnd_command", |s| s.dnd_command = command.to_string())
    }

    pub fn set_autolaunch(&mut self, position: usize, autolaunch: bool) -> Result<(), DockError> {
        self.update(position, "autolaunch", |s| s.autolaunch = autolaunch)
    }

    pub fn set_locked(&mut self, position: usize, locked: bool) -> Result<(), DockError> {
        self.update(position, "locked", |s| s.locked = locked)
    }

    pub fn set_name(&mut self, position: usize, name: &str) -> Result<(), DockError> {
        self.update(position, "name", |s| s.name = name.to_string())
    }

    /// Point the slot at a new icon image. With `saved` false the path is
    /// shown for this session only and the store is not touched.
    pub fn set_image_path(
        &mut self,
        position: usize,
        path: &str,
        saved: bool,
    ) -> Result<(), DockError> {
        if !saved {
            self.check_position(position)?;
            if let Some(slot) = self.slots.get_mut(position) {
                slot.image_path = path.to_string();
            }
            return Ok(());
        }
        self.update(position, "image_path", |s| s.image_path = path.to_string())
    }

    /// Unassign a position. Neighbouring slots keep their positions.
    pub fn clear_slot(&mut self, position: usize) -> Result<(), DockError> {
        self.update(position, "cleared", DockSlot::clear)
    }

    /// Transient launching indicator; never persisted.
    pub fn set_launching(&mut self, position: usize, launching: bool) -> Result<(), DockError> {
        self.check_position(position)?;
        if let Some(slot) = self.slots.get_mut(position) {
            slot.launching = launching;
        }
        Ok(())
    }
}
