use dockyard_config::DockSlotRecord;

/// One position of the Dock.
///
/// Persisted attributes mirror [`DockSlotRecord`]; `launching` is on-screen
/// state only and never written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockSlot {
    pub name: String,
    pub command: String,
    pub paste_command: String,
    pub dnd_command: String,
    pub autolaunch: bool,
    pub locked: bool,
    pub image_path: String,
    pub launching: bool,
}

impl DockSlot {
    pub fn from_record(record: &DockSlotRecord) -> Self {
        Self {
            name: record.name.clone(),
            command: record.command.clone(),
            paste_command: record.paste_command.clone(),
            dnd_command: record.dnd_command.clone(),
            autolaunch: record.autolaunch,
            locked: record.locked,
            image_path: record.image_path.clone(),
            launching: false,
        }
    }

    pub fn to_record(&self) -> DockSlotRecord {
        DockSlotRecord {
            name: self.name.clone(),
            command: self.command.clone(),
            paste_command: self.paste_command.clone(),
            dnd_command: self.dnd_command.clone(),
            autolaunch: self.autolaunch,
            locked: self.locked,
            image_path: self.image_path.clone(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        !self.command.trim().is_empty()
    }

    /// Reset every attribute, keeping the position itself.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Application instance name this slot stands for.
    ///
    /// Uses the explicit name when set, otherwise the file stem of the
    /// command's program (`/usr/bin/xterm -ls` → `xterm`,
    /// `Calculator.app` → `Calculator`).
    pub fn app_name(&self) -> Option<String> {
        if !self.name.trim().is_empty() {
            return Some(self.name.trim().to_string());
        }
        let program = self.command.split_whitespace().next()?;
        let base = program.rsplit('/').next().unwrap_or(program);
        let stem = match base.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => base,
        };
        Some(stem.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_prefers_explicit_name() {
        let slot = DockSlot {
            name: "Terminal".into(),
            command: "xterm".into(),
            ..Default::default()
        };
        assert_eq!(slot.app_name().as_deref(), Some("Terminal"));
    }

    #[test]
    fn app_name_from_bundle_command() {
        let slot = DockSlot {
            command: "Calculator.app".into(),
            ..Default::default()
        };
        assert_eq!(slot.app_name().as_deref(), Some("Calculator"));
    }

    #[test]
    fn app_name_from_path_with_args() {
        let slot = DockSlot {
            command: "/usr/bin/xterm -ls".into(),
            ..Default::default()
        };
        assert_eq!(slot.app_name().as_deref(), Some("xterm"));
    }

    #[test]
    fn unassigned_slot_has_no_name() {
        assert!(DockSlot::default().app_name().is_none());
        assert!(!DockSlot::default().is_assigned());
    }

    #[test]
    fn record_conversion_drops_launching() {
        let slot = DockSlot {
            command: "Mail.app".into(),
            autolaunch: true,
            launching: true,
            ..Default::default()
        };
        let back = DockSlot::from_record(&slot.to_record());
        assert!(back.autolaunch);
        assert!(!back.launching);
        assert_eq!(back.command, "Mail.app");
    }
}
