//! Core type, constructors and accessors for the Dock.

use std::collections::BTreeMap;

use dockyard_common::{DockError, LaunchTarget};
use dockyard_config::{DockSlotRecord, DockStateStore, PersistedDockState, DOCK_STATE_VERSION};
use tracing::{debug, info, warn};

use crate::launching::LaunchingIcon;
use crate::slot::DockSlot;

/// Window level the dock starts at.
pub const DEFAULT_DOCK_LEVEL: i32 = 0;

pub struct Dock {
    pub(super) slots: Vec<DockSlot>,
    /// Launches in flight, at most one per target.
    pub(super) launching: BTreeMap<LaunchTarget, LaunchingIcon>,
    pub(super) icons_visible: bool,
    pub(super) yard_visible: bool,
    pub(super) collapsed: bool,
    pub(super) level: i32,
    pub(super) store: Option<DockStateStore>,
    /// Open batch guards; writes are deferred while non-zero.
    pub(super) batch_depth: usize,
    /// A mutation happened inside a batch and still needs writing.
    pub(super) dirty: bool,
    pub(super) next_launch_id: u64,
}

impl Dock {
    /// An empty dock with `size` positions and no backing store.
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![DockSlot::default(); size],
            launching: BTreeMap::new(),
            icons_visible: true,
            yard_visible: true,
            collapsed: false,
            level: DEFAULT_DOCK_LEVEL,
            store: None,
            batch_depth: 0,
            dirty: false,
            next_launch_id: 1,
        }
    }

    /// A dock backed by `store`, populated from whatever it holds.
    pub fn with_store(size: usize, store: DockStateStore) -> Self {
        let state = store.load();
        let mut dock = Self::new(size);
        dock.restore(&state);
        dock.store = Some(store);
        info!(
            slots = size,
            assigned = dock.assigned_count(),
            path = %dock.store.as_ref().map(|s| s.path().display().to_string()).unwrap_or_default(),
            "dock initialized"
        );
        dock
    }

    /// Replace slot contents from a persisted snapshot. Does not write.
    pub fn restore(&mut self, state: &PersistedDockState) {
        for slot in &mut self.slots {
            slot.clear();
        }
        for (position, record) in state.assigned() {
            match self.slots.get_mut(position) {
                Some(slot) => *slot = DockSlot::from_record(record),
                None => warn!(
                    position,
                    len = self.slots.len(),
                    "persisted slot is beyond the dock size, ignoring it"
                ),
            }
        }
        self.collapsed = state.collapsed;
    }

    // -- Accessors --

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, position: usize) -> Option<&DockSlot> {
        self.slots.get(position)
    }

    pub fn slots(&self) -> &[DockSlot] {
        &self.slots
    }

    /// Number of assigned slots.
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_assigned()).count()
    }

    pub fn apps_count(&self) -> usize {
        self.assigned_count()
    }

    pub fn command(&self, position: usize) -> Option<&str> {
        self.assigned(position).map(|s| s.command.as_str())
    }

    pub fn paste_command(&self, position: usize) -> Option<&str> {
        self.assigned(position).map(|s| s.paste_command.as_str())
    }

    pub fn dnd_command(&self, position: usize) -> Option<&str> {
        self.assigned(position).map(|s| s.dnd_command.as_str())
    }

    pub fn image_path(&self, position: usize) -> Option<&str> {
        self.assigned(position).map(|s| s.image_path.as_str())
    }

    pub fn is_autolaunch(&self, position: usize) -> bool {
        self.assigned(position).is_some_and(|s| s.autolaunch)
    }

    pub fn is_locked(&self, position: usize) -> bool {
        self.slots.get(position).is_some_and(|s| s.locked)
    }

    pub fn is_launching(&self, position: usize) -> bool {
        self.slots.get(position).is_some_and(|s| s.launching)
    }

    pub fn app_name(&self, position: usize) -> Option<String> {
        self.assigned(position).and_then(DockSlot::app_name)
    }

    /// Lowest assigned position whose application name is `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.is_assigned() && s.app_name().as_deref() == Some(name))
    }

    /// Assigned positions flagged for autolaunch, ascending.
    pub fn autolaunch_positions(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_assigned() && s.autolaunch)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn store(&self) -> Option<&DockStateStore> {
        self.store.as_ref()
    }

    // -- Presentation --

    pub fn icons_visible(&self) -> bool {
        self.icons_visible
    }

    pub fn show_icons(&mut self) {
        self.icons_visible = true;
        debug!("dock icons shown");
    }

    pub fn hide_icons(&mut self) {
        self.icons_visible = false;
        debug!("dock icons hidden");
    }

    pub fn yard_visible(&self) -> bool {
        self.yard_visible
    }

    pub fn show_yard(&mut self) {
        self.yard_visible = true;
    }

    pub fn hide_yard(&mut self) {
        self.yard_visible = false;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Compact the dock. Persisted like any slot change.
    pub fn collapse(&mut self) -> Result<(), DockError> {
        if self.collapsed {
            return Ok(());
        }
        self.collapsed = true;
        self.commit()
    }

    pub fn uncollapse(&mut self) -> Result<(), DockError> {
        if !self.collapsed {
            return Ok(());
        }
        self.collapsed = false;
        self.commit()
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    // -- Snapshots --

    /// Persistable snapshot of the assigned slots.
    pub fn state(&self) -> PersistedDockState {
        PersistedDockState {
            version: DOCK_STATE_VERSION,
            collapsed: self.collapsed,
            slots: self
                .slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.is_assigned())
                .map(|(p, s)| (p, s.to_record()))
                .collect(),
        }
    }

    /// Assigned slots as `(position, record)` pairs, ascending.
    pub fn state_apps(&self) -> Vec<(usize, DockSlotRecord)> {
        self.state().slots.into_iter().collect()
    }

    /// Write the current state now, regardless of open batches.
    pub fn save_state(&mut self) -> Result<(), DockError> {
        self.dirty = false;
        self.write_store()
    }

    pub(super) fn assigned(&self, position: usize) -> Option<&DockSlot> {
        self.slots.get(position).filter(|s| s.is_assigned())
    }

    pub(super) fn check_position(&self, position: usize) -> Result<(), DockError> {
        if position < self.slots.len() {
            Ok(())
        } else {
            Err(DockError::SlotOutOfRange {
                position,
                len: self.slots.len(),
            })
        }
    }

    /// Write through to the store, or mark dirty while a batch is open.
    pub(super) fn commit(&mut self) -> Result<(), DockError> {
        if self.batch_depth > 0 {
            self.dirty = true;
            return Ok(());
        }
        self.write_store()
    }

    pub(super) fn write_store(&self) -> Result<(), DockError> {
        match &self.store {
            Some(store) => store.save(&self.state()).map_err(DockError::from),
            None => Ok(()),
        }
    }
}
