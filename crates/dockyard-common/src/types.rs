use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level window handle as seen by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where a launching icon lands: a docked slot or a free spot in the icon yard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "area", content = "position", rename_all = "snake_case")]
pub enum LaunchTarget {
    Dock(usize),
    Yard(usize),
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchTarget::Dock(p) => write!(f, "dock[{p}]"),
            LaunchTarget::Yard(p) => write!(f, "yard[{p}]"),
        }
    }
}

/// Screen geometry reported by the window manager after a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub icon_size: u32,
}

impl Default for ScreenInfo {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            icon_size: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    Normal,
    Miniaturized,
    Hidden,
    Shaded,
}

impl WindowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowState::Normal => "normal",
            WindowState::Miniaturized => "miniaturized",
            WindowState::Hidden => "hidden",
            WindowState::Shaded => "shaded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownMode {
    /// Leave the session, letting clients save state.
    Logout,
    /// Stop the window manager only.
    Exit,
    /// Kill remaining clients without asking.
    Kill,
    /// Release the display so a new window manager can take over.
    RestartPreparation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_id_display_is_hex() {
        assert_eq!(WindowId(0x1c00003).to_string(), "0x1c00003");
    }

    #[test]
    fn window_id_hash_and_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(WindowId(1));
        set.insert(WindowId(2));
        set.insert(WindowId(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn launch_target_orders_dock_before_yard() {
        assert!(LaunchTarget::Dock(9) < LaunchTarget::Yard(0));
        assert!(LaunchTarget::Dock(1) < LaunchTarget::Dock(2));
    }

    #[test]
    fn launch_target_serialization() {
        let json = serde_json::to_string(&LaunchTarget::Dock(3)).unwrap();
        assert_eq!(json, r#"{"area":"dock","position":3}"#);
        let back: LaunchTarget = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LaunchTarget::Dock(3));
    }

    #[test]
    fn window_state_strings() {
        assert_eq!(WindowState::Normal.as_str(), "normal");
        assert_eq!(WindowState::Miniaturized.as_str(), "miniaturized");
        assert_eq!(WindowState::Hidden.as_str(), "hidden");
        assert_eq!(WindowState::Shaded.as_str(), "shaded");
    }

    #[test]
    fn shutdown_mode_serde() {
        let json = serde_json::to_string(&ShutdownMode::RestartPreparation).unwrap();
        assert_eq!(json, r#""restart_preparation""#);
    }

    #[test]
    fn default_screen_info() {
        let screen = ScreenInfo::default();
        assert_eq!(screen.width, 1920);
        assert_eq!(screen.icon_size, 64);
    }
}
