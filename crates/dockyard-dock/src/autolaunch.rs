//! Start-up launch of slots flagged `autolaunch`.

use dockyard_common::DockError;
use tracing::{info, warn};

use crate::dock::Dock;
use crate::launcher::Launcher;

/// Outcome of launching one autolaunch slot.
#[derive(Debug)]
pub struct LaunchReport {
    pub position: usize,
    pub result: Result<u32, DockError>,
}

impl LaunchReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Launch every assigned autolaunch slot in ascending position order.
///
/// A failing slot is reported and the rest still run.
pub fn auto_launch(dock: &mut Dock, launcher: &dyn Launcher) -> Vec<LaunchReport> {
    let positions = dock.autolaunch_positions();
    let mut reports = Vec::with_capacity(positions.len());

    for position in positions {
        let result = dock.launch(position, launcher);
        if let Err(e) = &result {
            warn!(position, "autolaunch failed: {e}");
        }
        reports.push(LaunchReport { position, result });
    }

    info!(
        launched = reports.iter().filter(|r| r.is_ok()).count(),
        failed = reports.iter().filter(|r| !r.is_ok()).count(),
        "autolaunch complete"
    );
    reports
}
