use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dockyard_common::{GatewayError, LaunchId, LaunchTarget, Point, ShutdownMode, WindowId};
use dockyard_config::{DockStateStore, DockyardConfig, PersistedDockState};
use dockyard_dock::{Dock, Launcher};
use dockyard_gateway::{
    channel, AlertChoice, AutoLaunchOutcome, Endpoint, LaunchingIconInfo, QueueId, WmLink,
    WwmReply, WwmRequest, XwNotification, XwReply, XwRequest,
};
use dockyard_wm::{TimerSink, WindowEvent, WindowHints, WindowManagerService, WmInbound};
use tempfile::TempDir;

use super::*;
use crate::presenter::{HeadlessAlerts, LoggingActivator};

type Script = Box<dyn Fn(&WwmRequest) -> Result<WwmReply, GatewayError> + Send + Sync>;

/// A window manager that answers from a script and records every call.
struct ScriptedWm {
    calls: Arc<Mutex<Vec<WwmRequest>>>,
    script: Script,
}

impl ScriptedWm {
    fn new(
        script: impl Fn(&WwmRequest) -> Result<WwmReply, GatewayError> + Send + Sync + 'static,
    ) -> (Self, Arc<Mutex<Vec<WwmRequest>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let wm = Self {
            calls: Arc::clone(&calls),
            script: Box::new(script),
        };
        (wm, calls)
    }
}

#[async_trait]
impl WmLink for ScriptedWm {
    fn post(&self, request: WwmRequest) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(request);
        Ok(())
    }

    async fn call(&self, request: WwmRequest) -> Result<WwmReply, GatewayError> {
        let reply = (self.script)(&request);
        self.calls.lock().unwrap().push(request);
        reply
    }
}

fn cooperative(request: &WwmRequest) -> Result<WwmReply, GatewayError> {
    Ok(match request {
        WwmRequest::DockState => WwmReply::DockState(PersistedDockState::default()),
        WwmRequest::DockAutoLaunch => WwmReply::AutoLaunched(vec![AutoLaunchOutcome {
            position: 0,
            pid: Some(42),
            error: None,
        }]),
        WwmRequest::IsAppRunning { name } => WwmReply::Bool(name == "Running"),
        WwmRequest::CreateLaunchingIcon { .. } => WwmReply::LaunchingIcon(LaunchingIconInfo {
            id: LaunchId(7),
            target: LaunchTarget::Yard(0),
            destination: Point::default(),
        }),
        WwmRequest::ExecuteCommand { command } if command.starts_with("missing") => {
            WwmReply::Failed(format!("{command}: not found"))
        }
        WwmRequest::ExecuteCommand { .. } => WwmReply::Pid(100),
        WwmRequest::DestroyLaunchingIcon { .. } => WwmReply::Bool(true),
        _ => WwmReply::Ack,
    })
}

fn kinds(calls: &Arc<Mutex<Vec<WwmRequest>>>) -> Vec<&'static str> {
    calls.lock().unwrap().iter().map(WwmRequest::kind).collect()
}

fn launch(name: &str, command: &str) -> ShellCommand {
    ShellCommand::LaunchApplication {
        name: name.into(),
        command: command.into(),
        source_point: Point::default(),
    }
}

#[tokio::test]
async fn start_runs_the_handshake_in_order() {
    let (wm, calls) = ScriptedWm::new(cooperative);
    let mut shell = ShellService::new(wm);

    let reply = shell.handle(None, ShellCommand::Start.into()).await;
    assert_eq!(reply, XwReply::Ack);
    assert!(shell.is_started());
    assert!(shell.mirror().dock().is_some());
    assert_eq!(
        kinds(&calls),
        vec![
            "initialize",
            "setup_signal_handling",
            "setup_frame_offset_property",
            "dock_state",
            "dock_auto_launch",
        ]
    );

    shell.handle(None, ShellCommand::Start.into()).await;
    assert_eq!(kinds(&calls).len(), 5);
}

#[tokio::test]
async fn start_keeps_going_past_refusals() {
    let (wm, calls) = ScriptedWm::new(|request| match request {
        WwmRequest::SetupSignalHandling => Ok(WwmReply::Failed("not supported".into())),
        WwmRequest::DockState => Ok(WwmReply::Failed("shell integration is disabled".into())),
        other => cooperative(other),
    });
    let mut shell = ShellService::new(wm);

    assert_eq!(shell.handle(None, ShellCommand::Start.into()).await, XwReply::Ack);
    assert_eq!(kinds(&calls).len(), 5);
    assert!(shell.mirror().dock().is_none());
}

#[tokio::test]
async fn vanished_window_manager_is_forgotten() {
    let (wm, calls) = ScriptedWm::new(|_| Err(GatewayError::Unavailable("window-manager")));
    let mut shell = ShellService::new(wm);

    let reply = shell.handle(None, ShellCommand::Start.into()).await;
    assert!(matches!(reply, XwReply::Failed(_)));
    assert!(!shell.wm_connected());
    // Only the first call reached it.
    assert_eq!(kinds(&calls), vec!["initialize"]);
}

#[tokio::test]
async fn refresh_rejects_a_reply_of_the_wrong_kind() {
    let (wm, _calls) = ScriptedWm::new(|request| match request {
        WwmRequest::DockState => Ok(WwmReply::Count(3)),
        other => cooperative(other),
    });
    let mut shell = ShellService::new(wm);

    let reply = shell.handle(None, ShellCommand::RefreshDock.into()).await;
    assert_eq!(reply, XwReply::Failed("unexpected reply: Count(3)".into()));
    assert!(shell.mirror().dock().is_none());
}

#[tokio::test]
async fn launch_shows_an_icon_then_runs_the_command() {
    let (wm, calls) = ScriptedWm::new(cooperative);
    let mut shell = ShellService::new(wm);

    let reply = shell.handle(None, launch("Ink", "Ink.app").into()).await;
    assert_eq!(reply, XwReply::Ack);
    assert_eq!(
        kinds(&calls),
        vec!["is_app_running", "create_launching_icon", "execute_command"]
    );
}

#[tokio::test]
async fn running_app_is_not_launched_again() {
    let (wm, calls) = ScriptedWm::new(cooperative);
    let mut shell = ShellService::new(wm);

    assert_eq!(shell.handle(None, launch("Running", "r").into()).await, XwReply::Ack);
    assert_eq!(kinds(&calls), vec!["is_app_running"]);
}

#[tokio::test]
async fn failed_launch_removes_its_icon() {
    let (wm, calls) = ScriptedWm::new(cooperative);
    let mut shell = ShellService::new(wm);

    let reply = shell.handle(None, launch("Ghost", "missing-ghost").into()).await;
    assert_eq!(reply, XwReply::Failed("missing-ghost: not found".into()));
    assert_eq!(
        calls.lock().unwrap().last(),
        Some(&WwmRequest::DestroyLaunchingIcon { id: LaunchId(7) })
    );
}

#[tokio::test]
async fn logout_saves_wipes_and_shuts_down() {
    let (wm, calls) = ScriptedWm::new(cooperative);
    let mut shell = ShellService::new(wm);

    let reply = shell
        .handle(
            None,
            ShellCommand::Logout {
                mode: ShutdownMode::Logout,
            }
            .into(),
        )
        .await;
    assert_eq!(reply, XwReply::Ack);
    assert_eq!(
        kinds(&calls),
        vec!["dock_state_save", "wipe_desktop", "shutdown"]
    );
    assert!(shell.is_finished());
    assert_eq!(shell.logged_out(), Some(ShutdownMode::Logout));
}

#[tokio::test]
async fn alert_panel_is_answered_by_the_presenter() {
    let (wm, _calls) = ScriptedWm::new(cooperative);
    let mut shell = ShellService::new(wm).with_alerts(HeadlessAlerts::new(AlertChoice::Default));

    let reply = shell
        .handle(
            Some(QueueId::WindowManager),
            XwRequest::RunAlertPanel {
                title: "Kill Application".into(),
                message: "Force TextEdit to quit?".into(),
                default_button: "Kill".into(),
                alternate_button: Some("Cancel".into()),
                other_button: None,
            }
            .into(),
        )
        .await;
    assert_eq!(reply, XwReply::Alert(AlertChoice::Default));
}

#[tokio::test]
async fn notifications_update_the_mirror_and_activate() {
    let (wm, _calls) = ScriptedWm::new(cooperative);
    let activator = Arc::new(LoggingActivator::new());
    let mut shell = ShellService::new(wm).with_activator(Arc::clone(&activator));

    shell
        .handle(
            None,
            XwNotification::ApplicationDidCreate {
                leader: WindowId(0x100),
                window: WindowId(0x100),
                name: "Ink".into(),
            }
            .into(),
        )
        .await;
    shell
        .handle(
            None,
            XwNotification::ActivateApplication { name: "Ink".into() }.into(),
        )
        .await;

    assert!(shell.mirror().is_running("Ink"));
    assert_eq!(activator.activated(), vec!["Ink"]);
}

#[test]
fn shell_command_json_shape() {
    let command: ShellCommand = serde_json::from_str(r#"{"action":"logout","mode":"kill"}"#).unwrap();
    assert_eq!(
        command,
        ShellCommand::Logout {
            mode: ShutdownMode::Kill
        }
    );
    let command: ShellCommand = serde_json::from_str(
        r#"{"action":"launch_application","name":"Ink","command":"Ink.app"}"#,
    )
    .unwrap();
    assert_eq!(command, launch("Ink", "Ink.app"));
}

// -- Both queues --

struct Quiet;

impl Launcher for Quiet {
    fn launch(&self, _command: &str) -> Result<u32, String> {
        Ok(1)
    }
}

#[tokio::test]
async fn shell_and_window_manager_talk_over_their_queues() {
    let dir = TempDir::new().unwrap();
    let store = DockStateStore::new(dir.path().join("dock.toml"));
    let mut dock = Dock::with_store(8, store.clone());
    dock.set_command(2, "TextEdit").unwrap();

    let timeout = Duration::from_secs(2);
    let (wm_handle, wm_rx) = channel::<WmInbound, WwmReply>(QueueId::WindowManager, timeout);
    let (shell_handle, shell_rx) = channel::<ShellInbound, XwReply>(QueueId::Shell, timeout);

    let sink: Arc<dyn TimerSink> = Arc::new(wm_handle.clone());
    let wm = WindowManagerService::new(&DockyardConfig::default(), sink)
        .with_dock(dock)
        .with_shell(shell_handle.clone())
        .with_launcher(Quiet);
    let wm_task = wm_rx.spawn(wm);
    let shell_task = shell_rx.spawn(ShellService::new(wm_handle.clone()));

    assert_eq!(shell_handle.call(ShellCommand::Start).await.unwrap(), XwReply::Ack);

    wm_handle
        .post(WindowEvent::Mapped {
            window: WindowId(0x101),
            hints: WindowHints {
                leader: Some(WindowId(0x100)),
                instance: "TextEdit".into(),
                ..Default::default()
            },
        })
        .unwrap();
    let link: &dyn WmLink = &wm_handle;
    let running = link
        .call(WwmRequest::IsAppRunning {
            name: "TextEdit".into(),
        })
        .await
        .unwrap();
    assert_eq!(running, WwmReply::Bool(true));

    let reply = shell_handle
        .call(ShellCommand::Logout {
            mode: ShutdownMode::Logout,
        })
        .await
        .unwrap();
    assert_eq!(reply, XwReply::Ack);

    let shell = shell_task.await.unwrap();
    let wm = wm_task.await.unwrap();

    assert!(shell.mirror().is_running("TextEdit"));
    assert_eq!(
        shell.mirror().dock().and_then(|d| d.slot(2)).map(|s| s.command.as_str()),
        Some("TextEdit")
    );
    assert_eq!(wm.shutdown_mode(), Some(ShutdownMode::Logout));
    assert_eq!(
        wm.registry().get(WindowId(0x100)).and_then(|a| a.app_icon()),
        Some(2)
    );
    assert_eq!(store.load().slot(2).unwrap().command, "TextEdit");
}
