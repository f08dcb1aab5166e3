//! Per-application menu model. Rendering is someone else's job.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    UnhideHere,
    Hide,
    Launch,
    SetIcon,
    Kill,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub action: MenuAction,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMenu {
    pub title: String,
    pub items: Vec<MenuItem>,
}

impl AppMenu {
    pub fn new(name: &str) -> Self {
        let item = |title: &str, action| MenuItem {
            title: title.to_string(),
            action,
            enabled: true,
        };
        Self {
            title: name.to_string(),
            items: vec![
                item("Unhide Here", MenuAction::UnhideHere),
                item("Hide", MenuAction::Hide),
                item("Launch", MenuAction::Launch),
                item("Set Icon...", MenuAction::SetIcon),
                item("Kill", MenuAction::Kill),
            ],
        }
    }

    pub fn item(&self, action: MenuAction) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.action == action)
    }

    /// Match item titles and availability to the application's state.
    pub(super) fn refresh(&mut self, hidden: bool, docked: bool) {
        for item in &mut self.items {
            match item.action {
                MenuAction::Hide => {
                    item.title = if hidden { "Unhide" } else { "Hide" }.to_string();
                }
                MenuAction::UnhideHere => item.enabled = hidden,
                MenuAction::Launch => item.enabled = docked,
                MenuAction::SetIcon | MenuAction::Kill => {}
            }
        }
    }
}
