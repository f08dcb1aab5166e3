//! The shell's queue endpoint.

mod session;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use dockyard_common::{GatewayError, Point, ShutdownMode};
use dockyard_gateway::{
    Endpoint, QueueHandle, QueueId, WmLink, WwmReply, WwmRequest, XwNotification, XwReply,
    XwRequest,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::mirror::WorkspaceMirror;
use crate::presenter::{AlertPresenter, AppActivator, HeadlessAlerts, LoggingActivator};

/// Session commands issued by the shell's own front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ShellCommand {
    /// Handshake with the window manager and autolaunch docked apps.
    Start,
    /// Launch `command`, showing a launching icon for `name`.
    LaunchApplication {
        name: String,
        command: String,
        #[serde(default)]
        source_point: Point,
    },
    /// Fetch a fresh dock snapshot.
    RefreshDock,
    Logout { mode: ShutdownMode },
}

/// Everything the shell queue accepts.
#[derive(Debug)]
pub enum ShellInbound {
    Notification(XwNotification),
    Request(XwRequest),
    Command(ShellCommand),
}

impl From<XwNotification> for ShellInbound {
    fn from(notification: XwNotification) -> Self {
        ShellInbound::Notification(notification)
    }
}

impl From<XwRequest> for ShellInbound {
    fn from(request: XwRequest) -> Self {
        ShellInbound::Request(request)
    }
}

impl From<ShellCommand> for ShellInbound {
    fn from(command: ShellCommand) -> Self {
        ShellInbound::Command(command)
    }
}

/// Handle to the shell queue. Also what the window manager holds as its
/// `ShellLink`.
pub type ShellHandle = QueueHandle<ShellInbound, XwReply>;

pub struct ShellService {
    wm: Option<Box<dyn WmLink>>,
    mirror: WorkspaceMirror,
    alerts: Box<dyn AlertPresenter>,
    activator: Box<dyn AppActivator>,
    started: bool,
    logged_out: Option<ShutdownMode>,
}

impl ShellService {
    pub fn new(wm: impl WmLink + 'static) -> Self {
        Self {
            wm: Some(Box::new(wm)),
            mirror: WorkspaceMirror::new(),
            alerts: Box::new(HeadlessAlerts::default()),
            activator: Box::new(LoggingActivator::new()),
            started: false,
            logged_out: None,
        }
    }

    pub fn with_alerts(mut self, alerts: impl AlertPresenter + 'static) -> Self {
        self.alerts = Box::new(alerts);
        self
    }

    pub fn with_activator(mut self, activator: impl AppActivator + 'static) -> Self {
        self.activator = Box::new(activator);
        self
    }

    pub fn mirror(&self) -> &WorkspaceMirror {
        &self.mirror
    }

    pub fn wm_connected(&self) -> bool {
        self.wm.is_some()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn logged_out(&self) -> Option<ShutdownMode> {
        self.logged_out
    }

    /// Synchronous call into the window manager. A vanished window
    /// manager is forgotten; later calls fail fast.
    async fn call_wm(&mut self, request: WwmRequest) -> Result<WwmReply, GatewayError> {
        let kind = request.kind();
        let Some(wm) = &self.wm else {
            return Err(GatewayError::Unavailable(QueueId::WindowManager.name()));
        };
        let result = wm.call(request).await;
        match &result {
            Ok(WwmReply::Failed(reason)) => warn!(kind, reason = %reason, "window manager refused"),
            Ok(_) => debug!(kind, "window manager replied"),
            Err(GatewayError::Unavailable(queue)) => {
                warn!(queue, "window manager is gone, shell continues alone");
                self.wm = None;
            }
            Err(e) => warn!(kind, "window manager call failed: {e}"),
        }
        result
    }

    fn handle_notification(&mut self, notification: XwNotification) {
        debug!(kind = notification.kind(), "xw notification");
        match &notification {
            XwNotification::ActivateApplication { name } => {
                if !self.activator.activate(name) {
                    warn!(name = %name, "could not activate application");
                }
            }
            XwNotification::ActivateWorkspaceApp => info!("shell brought to front"),
            XwNotification::LaunchFailed { name, reason, .. } => {
                warn!(name = %name, reason = %reason, "launch failed");
            }
            _ => {}
        }
        self.mirror.apply(&notification);
    }

    fn handle_xw_request(&mut self, request: XwRequest) -> XwReply {
        match request {
            XwRequest::RunAlertPanel {
                title,
                message,
                default_button,
                alternate_button,
                other_button,
            } => {
                let mut buttons = vec![default_button.as_str()];
                buttons.extend(alternate_button.as_deref());
                buttons.extend(other_button.as_deref());
                XwReply::Alert(self.alerts.run_alert(&title, &message, &buttons))
            }
        }
    }
}

#[async_trait]
impl Endpoint for ShellService {
    type Inbound = ShellInbound;
    type Reply = XwReply;

    async fn handle(&mut self, _origin: Option<QueueId>, msg: ShellInbound) -> XwReply {
        match msg {
            ShellInbound::Notification(notification) => {
                self.handle_notification(notification);
                XwReply::Ack
            }
            ShellInbound::Request(request) => self.handle_xw_request(request),
            ShellInbound::Command(command) => self.handle_command(command).await,
        }
    }

    fn is_finished(&self) -> bool {
        self.logged_out.is_some()
    }
}
