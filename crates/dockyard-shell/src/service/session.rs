//! Session commands: startup, launching and logout.

use dockyard_common::{GatewayError, Point, ShutdownMode};
use dockyard_dock::IconImage;
use dockyard_gateway::{WwmReply, WwmRequest, XwReply};
use tracing::{info, warn};

use super::{ShellCommand, ShellService};

impl ShellService {
    pub(super) async fn handle_command(&mut self, command: ShellCommand) -> XwReply {
        match command {
            ShellCommand::Start => self.start().await,
            ShellCommand::LaunchApplication {
                name,
                command,
                source_point,
            } => self.launch_application(&name, &command, source_point).await,
            ShellCommand::RefreshDock => self.refresh_dock().await,
            ShellCommand::Logout { mode } => self.logout(mode).await,
        }
    }

    /// The startup handshake. Each step is attempted even if an earlier
    /// one failed.
    async fn start(&mut self) -> XwReply {
        if self.started {
            return XwReply::Ack;
        }
        for request in [
            WwmRequest::Initialize,
            WwmRequest::SetupSignalHandling,
            WwmRequest::SetupFrameOffsetProperty,
        ] {
            let _ = self.call_wm(request).await;
        }
        self.refresh_dock().await;

        if let Ok(WwmReply::AutoLaunched(outcomes)) = self.call_wm(WwmRequest::DockAutoLaunch).await
        {
            let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
            info!(launched = outcomes.len() - failed, failed, "dock autolaunch done");
        }

        self.started = true;
        if self.wm.is_none() {
            return XwReply::Failed("window manager unavailable".to_string());
        }
        XwReply::Ack
    }

    async fn refresh_dock(&mut self) -> XwReply {
        match self.call_wm(WwmRequest::DockState).await {
            Ok(WwmReply::DockState(state)) => {
                info!(assigned = state.assigned().count(), "dock snapshot refreshed");
                self.mirror.set_dock(state);
                XwReply::Ack
            }
            Ok(WwmReply::Failed(reason)) => XwReply::Failed(reason),
            Ok(other) => XwReply::Failed(unexpected(&other).to_string()),
            Err(e) => XwReply::Failed(e.to_string()),
        }
    }

    /// Run `command` behind a launching icon. An application already
    /// running is left alone.
    async fn launch_application(&mut self, name: &str, command: &str, source_point: Point) -> XwReply {
        let running = self
            .call_wm(WwmRequest::IsAppRunning {
                name: name.to_string(),
            })
            .await;
        if matches!(running, Ok(WwmReply::Bool(true))) {
            info!(name, "already running, not launching again");
            return XwReply::Ack;
        }

        let icon = match self
            .call_wm(WwmRequest::CreateLaunchingIcon {
                name: name.to_string(),
                image: IconImage::default(),
                source_point,
                image_path: String::new(),
            })
            .await
        {
            Ok(WwmReply::LaunchingIcon(info)) => Some(info.id),
            // Launching still works without the icon.
            _ => None,
        };

        match self
            .call_wm(WwmRequest::ExecuteCommand {
                command: command.to_string(),
            })
            .await
        {
            Ok(WwmReply::Pid(pid)) => {
                info!(name, pid, "application launched");
                XwReply::Ack
            }
            outcome => {
                if let Some(id) = icon {
                    let _ = self.call_wm(WwmRequest::DestroyLaunchingIcon { id }).await;
                }
                let reason = match outcome {
                    Ok(WwmReply::Failed(reason)) => reason,
                    Ok(other) => unexpected(&other).to_string(),
                    Err(e) => e.to_string(),
                };
                warn!(name, reason = %reason, "launch failed");
                XwReply::Failed(reason)
            }
        }
    }

    /// Save the dock, close every window and stop the window manager.
    async fn logout(&mut self, mode: ShutdownMode) -> XwReply {
        info!(?mode, "logging out");
        let mut failures = Vec::new();
        for request in [
            WwmRequest::DockStateSave,
            WwmRequest::WipeDesktop,
            WwmRequest::Shutdown { mode },
        ] {
            let kind = request.kind();
            match self.call_wm(request).await {
                Ok(WwmReply::Failed(reason)) => failures.push(format!("{kind}: {reason}")),
                Ok(_) => {}
                Err(e) => failures.push(format!("{kind}: {e}")),
            }
        }
        self.logged_out = Some(mode);

        if failures.is_empty() {
            XwReply::Ack
        } else {
            XwReply::Failed(failures.join("; "))
        }
    }
}

fn unexpected(reply: &WwmReply) -> GatewayError {
    GatewayError::UnexpectedReply(format!("{reply:?}"))
}
