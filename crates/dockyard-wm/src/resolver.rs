//! Window → group leader resolution.
//!
//! The window server reports each window's hints when it is mapped; the
//! resolver remembers them so later events can be attributed to the right
//! application.

use std::collections::HashMap;

use dockyard_common::WindowId;
use serde::{Deserialize, Serialize};

/// Grouping hints read from a window when it is mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowHints {
    /// Explicit group leader. Absent for clients that set none.
    pub leader: Option<WindowId>,
    /// Instance part of the class hint.
    pub instance: String,
    /// Class part of the class hint.
    pub class: String,
    /// The client speaks the GNUstep protocol and draws its own menus.
    pub gnustep: bool,
}

#[derive(Debug, Default)]
pub struct GroupResolver {
    hints: HashMap<WindowId, WindowHints>,
}

impl GroupResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, window: WindowId, hints: WindowHints) {
        self.hints.insert(window, hints);
    }

    pub fn forget(&mut self, window: WindowId) -> Option<WindowHints> {
        self.hints.remove(&window)
    }

    pub fn hints(&self, window: WindowId) -> Option<&WindowHints> {
        self.hints.get(&window)
    }

    /// Group leader of `window`. A window without a leader hint leads itself.
    pub fn leader_of(&self, window: WindowId) -> WindowId {
        self.hints
            .get(&window)
            .and_then(|h| h.leader)
            .unwrap_or(window)
    }

    /// True when the grouping was made up because the client gave none.
    pub fn is_emulated(&self, window: WindowId) -> bool {
        self.hints.get(&window).map_or(true, |h| h.leader.is_none())
    }

    pub fn is_gnustep(&self, window: WindowId) -> bool {
        self.hints.get(&window).is_some_and(|h| h.gnustep)
    }

    /// Instance name, falling back to the class and then to the handle.
    pub fn name_of(&self, window: WindowId) -> String {
        self.hints
            .get(&window)
            .and_then(|h| {
                [&h.instance, &h.class]
                    .into_iter()
                    .find(|s| !s.trim().is_empty())
                    .map(|s| s.trim().to_string())
            })
            .unwrap_or_else(|| format!("window-{window}"))
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(leader: Option<u64>, instance: &str) -> WindowHints {
        WindowHints {
            leader: leader.map(WindowId),
            instance: instance.into(),
            class: "Class".into(),
            gnustep: false,
        }
    }

    #[test]
    fn explicit_leader_is_used() {
        let mut r = GroupResolver::new();
        r.record(WindowId(0x20), hints(Some(0x10), "xterm"));
        assert_eq!(r.leader_of(WindowId(0x20)), WindowId(0x10));
        assert!(!r.is_emulated(WindowId(0x20)));
    }

    #[test]
    fn window_without_leader_leads_itself() {
        let mut r = GroupResolver::new();
        r.record(WindowId(0x30), hints(None, "xclock"));
        assert_eq!(r.leader_of(WindowId(0x30)), WindowId(0x30));
        assert!(r.is_emulated(WindowId(0x30)));
        assert_eq!(r.leader_of(WindowId(0x99)), WindowId(0x99));
    }

    #[test]
    fn name_falls_back_to_class_then_handle() {
        let mut r = GroupResolver::new();
        r.record(WindowId(1), hints(None, "xterm"));
        r.record(WindowId(2), hints(None, ""));
        assert_eq!(r.name_of(WindowId(1)), "xterm");
        assert_eq!(r.name_of(WindowId(2)), "Class");
        assert_eq!(r.name_of(WindowId(3)), "window-0x3");
    }

    #[test]
    fn hints_deserialize_with_defaults() {
        let h: WindowHints = serde_json::from_str(r#"{"instance":"Mail"}"#).unwrap();
        assert_eq!(h.instance, "Mail");
        assert!(h.leader.is_none());
        assert!(!h.gnustep);
    }
}
