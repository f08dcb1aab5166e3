//! Persisted Dock state: an ordered mapping from slot position to slot
//! attributes, stored as TOML next to the daemon config.
//!
//! Loading is forgiving: a missing file, an unparseable file, or a malformed
//! slot entry yields unassigned slots (with a warning) instead of an error.
//! Saving is atomic: a reader sees either the previous file or the new one.

mod store;
mod types;

#[cfg(test)]
mod tests;

pub use store::DockStateStore;
pub use types::{DockSlotRecord, PersistedDockState, DOCK_STATE_VERSION};
