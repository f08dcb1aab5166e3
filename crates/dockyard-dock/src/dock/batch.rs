//! Scoped batching of dock mutations into a single store write.

use std::ops::{Deref, DerefMut};

use dockyard_common::DockError;
use tracing::warn;

use super::Dock;

/// Guard returned by [`Dock::batch`]. Mutations made through it are written
/// once, on [`commit`](DockBatch::commit) or when the guard drops.
pub struct DockBatch<'a> {
    dock: &'a mut Dock,
    finished: bool,
}

impl Dock {
    pub fn batch(&mut self) -> DockBatch<'_> {
        self.batch_depth += 1;
        DockBatch {
            dock: self,
            finished: false,
        }
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }
}

impl DockBatch<'_> {
    /// Close the batch and write if anything changed.
    pub fn commit(mut self) -> Result<(), DockError> {
        self.finish()
    }

    fn finish(&mut self) -> Result<(), DockError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.dock.batch_depth = self.dock.batch_depth.saturating_sub(1);
        if self.dock.batch_depth == 0 && self.dock.dirty {
            self.dock.dirty = false;
            return self.dock.write_store();
        }
        Ok(())
    }
}

impl Deref for DockBatch<'_> {
    type Target = Dock;

    fn deref(&self) -> &Dock {
        self.dock
    }
}

impl DerefMut for DockBatch<'_> {
    fn deref_mut(&mut self) -> &mut Dock {
        self.dock
    }
}

impl Drop for DockBatch<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            warn!("dock batch write failed: {e}");
        }
    }
}
