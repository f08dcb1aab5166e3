//! Icon placement collaborator.
//!
//! Real geometry (stacking, multi-head, icon yard packing) is owned by the
//! window manager's placement code; the dock only asks where a target lands.

use dockyard_common::{LaunchTarget, Point, ScreenInfo};

pub trait IconPlacer: Send {
    /// Screen coordinate of the icon at `target`.
    fn point_for(&self, target: LaunchTarget) -> Point;

    /// First free icon-yard position given the positions already taken.
    fn next_yard_position(&self, occupied: &[usize]) -> usize {
        (0..).find(|p| !occupied.contains(p)).unwrap_or(0)
    }

    /// Screen geometry changed.
    fn set_screen(&mut self, _screen: ScreenInfo) {}
}

/// Dock down the right edge, icon yard along the bottom, one icon per cell.
#[derive(Debug, Clone, Copy)]
pub struct GridPlacer {
    screen: ScreenInfo,
}

impl GridPlacer {
    pub fn new(screen: ScreenInfo) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> ScreenInfo {
        self.screen
    }
}

impl IconPlacer for GridPlacer {
    fn point_for(&self, target: LaunchTarget) -> Point {
        let icon = f64::from(self.screen.icon_size);
        match target {
            LaunchTarget::Dock(position) => Point::new(
                f64::from(self.screen.width) - icon,
                position as f64 * icon,
            ),
            LaunchTarget::Yard(position) => Point::new(
                position as f64 * icon,
                f64::from(self.screen.height) - icon,
            ),
        }
    }

    fn set_screen(&mut self, screen: ScreenInfo) {
        self.screen = screen;
    }
}
