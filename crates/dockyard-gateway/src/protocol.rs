//! Versioned message schema for both directions.
//!
//! WWM messages travel from the shell to the window manager; XW messages
//! travel the other way.

use dockyard_common::{
    LaunchId, LaunchTarget, Point, ScreenInfo, ShutdownMode, WindowId, WindowState,
};
use dockyard_config::{DockSlotRecord, PersistedDockState};
use dockyard_dock::IconImage;
use serde::{Deserialize, Serialize};

/// Schema version stamped on every envelope.
pub const PROTOCOL_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Shell → window manager
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WwmRequest {
    Initialize,
    SetupSignalHandling,
    SetupFrameOffsetProperty,

    DockShowIcons,
    DockHideIcons,
    DockCollapse,
    DockUncollapse,
    IconYardShowIcons,
    IconYardHideIcons,
    DockLevel,
    SetDockLevel { level: i32 },

    DockState,
    DockStateSave,
    DockStateApps,
    DockAppsCount,
    DockApp { position: usize },

    SetDockAppCommand { position: usize, command: String },
    SetDockAppPasteCommand { position: usize, command: String },
    SetDockAppDndCommand { position: usize, command: String },
    SetDockAppAutolaunch { position: usize, autolaunch: bool },
    SetDockAppLocked { position: usize, locked: bool },
    SetDockAppImage {
        position: usize,
        path: String,
        saved: bool,
    },
    SetDockAppiconState { position: usize, launching: bool },
    DockAutoLaunch,

    CreateLaunchingIcon {
        name: String,
        image: IconImage,
        source_point: Point,
        image_path: String,
    },
    DestroyLaunchingIcon { id: LaunchId },

    WindowState { window: WindowId },
    NotDockedAppList,
    IsAppRunning { name: String },
    ExecuteCommand { command: String },
    WipeDesktop,
    Shutdown { mode: ShutdownMode },
}

impl WwmRequest {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WwmRequest::Initialize => "initialize",
            WwmRequest::SetupSignalHandling => "setup_signal_handling",
            WwmRequest::SetupFrameOffsetProperty => "setup_frame_offset_property",
            WwmRequest::DockShowIcons => "dock_show_icons",
            WwmRequest::DockHideIcons => "dock_hide_icons",
            WwmRequest::DockCollapse => "dock_collapse",
            WwmRequest::DockUncollapse => "dock_uncollapse",
            WwmRequest::IconYardShowIcons => "icon_yard_show_icons",
            WwmRequest::IconYardHideIcons => "icon_yard_hide_icons",
            WwmRequest::DockLevel => "dock_level",
            WwmRequest::SetDockLevel { .. } => "set_dock_level",
            WwmRequest::DockState => "dock_state",
            WwmRequest::DockStateSave => "dock_state_save",
            WwmRequest::DockStateApps => "dock_state_apps",
            WwmRequest::DockAppsCount => "dock_apps_count",
            WwmRequest::DockApp { .. } => "dock_app",
            WwmRequest::SetDockAppCommand { .. } => "set_dock_app_command",
            WwmRequest::SetDockAppPasteCommand { .. } => "set_dock_app_paste_command",
            WwmRequest::SetDockAppDndCommand { .. } => "set_dock_app_dnd_command",
            WwmRequest::SetDockAppAutolaunch { .. } => "set_dock_app_autolaunch",
            WwmRequest::SetDockAppLocked { .. } => "set_dock_app_locked",
            WwmRequest::SetDockAppImage { .. } => "set_dock_app_image",
            WwmRequest::SetDockAppiconState { .. } => "set_dock_appicon_state",
            WwmRequest::DockAutoLaunch => "dock_auto_launch",
            WwmRequest::CreateLaunchingIcon { .. } => "create_launching_icon",
            WwmRequest::DestroyLaunchingIcon { .. } => "destroy_launching_icon",
            WwmRequest::WindowState { .. } => "window_state",
            WwmRequest::NotDockedAppList => "not_docked_app_list",
            WwmRequest::IsAppRunning { .. } => "is_app_running",
            WwmRequest::ExecuteCommand { .. } => "execute_command",
            WwmRequest::WipeDesktop => "wipe_desktop",
            WwmRequest::Shutdown { .. } => "shutdown",
        }
    }
}

/// One assigned dock slot as reported to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockAppEntry {
    pub position: usize,
    pub record: DockSlotRecord,
}

/// Where a freshly created launching icon is headed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchingIconInfo {
    pub id: LaunchId,
    pub target: LaunchTarget,
    pub destination: Point,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoLaunchOutcome {
    pub position: usize,
    pub pid: Option<u32>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WwmReply {
    Ack,
    DockState(PersistedDockState),
    DockApps(Vec<DockAppEntry>),
    Slot(Option<DockSlotRecord>),
    Count(usize),
    Level(i32),
    LaunchingIcon(LaunchingIconInfo),
    AutoLaunched(Vec<AutoLaunchOutcome>),
    WindowState(Option<WindowState>),
    AppNames(Vec<String>),
    Bool(bool),
    Pid(u32),
    Failed(String),
}

// ---------------------------------------------------------------------------
// Window manager → shell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum XwNotification {
    ApplicationDidCreate {
        leader: WindowId,
        window: WindowId,
        name: String,
    },
    ApplicationDidAddWindow {
        leader: WindowId,
        window: WindowId,
    },
    ApplicationDidDestroy {
        leader: WindowId,
    },
    ApplicationDidCloseWindow {
        leader: WindowId,
        window: WindowId,
    },
    ScreenInfoDidUpdate(ScreenInfo),
    /// The user activated a docked application the window manager cannot
    /// bring forward by itself.
    ActivateApplication {
        name: String,
    },
    /// Bring the shell itself to the front.
    ActivateWorkspaceApp,
    WorkspaceDidChange {
        workspace: usize,
        focused: Option<WindowId>,
    },
    DockContentDidChange,
    LaunchFailed {
        launch_id: Option<LaunchId>,
        position: Option<usize>,
        name: String,
        reason: String,
    },
}

impl XwNotification {
    pub fn kind(&self) -> &'static str {
        match self {
            XwNotification::ApplicationDidCreate { .. } => "application_did_create",
            XwNotification::ApplicationDidAddWindow { .. } => "application_did_add_window",
            XwNotification::ApplicationDidDestroy { .. } => "application_did_destroy",
            XwNotification::ApplicationDidCloseWindow { .. } => "application_did_close_window",
            XwNotification::ScreenInfoDidUpdate(_) => "screen_info_did_update",
            XwNotification::ActivateApplication { .. } => "activate_application",
            XwNotification::ActivateWorkspaceApp => "activate_workspace_app",
            XwNotification::WorkspaceDidChange { .. } => "workspace_did_change",
            XwNotification::DockContentDidChange => "dock_content_did_change",
            XwNotification::LaunchFailed { .. } => "launch_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum XwRequest {
    RunAlertPanel {
        title: String,
        message: String,
        default_button: String,
        alternate_button: Option<String>,
        other_button: Option<String>,
    },
}

/// Button the user picked in an alert panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertChoice {
    Default,
    Alternate,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum XwReply {
    Ack,
    Alert(AlertChoice),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let json = serde_json::to_value(WwmRequest::SetDockAppLocked {
            position: 3,
            locked: true,
        })
        .unwrap();
        assert_eq!(json["type"], "SetDockAppLocked");
        assert_eq!(json["data"]["position"], 3);
        assert_eq!(json["data"]["locked"], true);
    }

    #[test]
    fn unit_request_has_no_data() {
        let json = serde_json::to_string(&WwmRequest::DockCollapse).unwrap();
        assert_eq!(json, r#"{"type":"DockCollapse"}"#);
    }

    #[test]
    fn workspace_change_carries_focus() {
        let note = XwNotification::WorkspaceDidChange {
            workspace: 2,
            focused: Some(WindowId(0x400001)),
        };
        let json = serde_json::to_string(&note).unwrap();
        let back: XwNotification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn dock_state_reply_decodes() {
        let mut state = PersistedDockState::default();
        state.slots.insert(1, DockSlotRecord::new("Mail.app"));
        let json = serde_json::to_string(&WwmReply::DockState(state.clone())).unwrap();
        match serde_json::from_str::<WwmReply>(&json).unwrap() {
            WwmReply::DockState(back) => assert_eq!(back, state),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn unknown_message_type_is_rejected() {
        let result = serde_json::from_str::<WwmRequest>(r#"{"type":"FormatDisk"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn kinds_are_snake_case() {
        assert_eq!(WwmRequest::DockAppsCount.kind(), "dock_apps_count");
        assert_eq!(
            XwNotification::DockContentDidChange.kind(),
            "dock_content_did_change"
        );
    }
}
