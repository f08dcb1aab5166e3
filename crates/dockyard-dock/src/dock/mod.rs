//! The Dock: a fixed row of launch slots plus the launches in flight.

mod batch;
mod launch;
mod slots;
mod types;

pub use batch::DockBatch;
pub use types::*;
