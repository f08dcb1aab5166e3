//! The window manager's queue endpoint.
//!
//! Owns the registry and, when shell integration is on, the Dock. Window
//! server events, shell requests and timer fires all arrive here and are
//! handled one at a time.

mod events;
mod requests;
mod timers;

pub use events::WindowEvent;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dockyard_common::{GatewayError, LaunchId, ScreenInfo, ShutdownMode, WindowId};
use dockyard_config::DockyardConfig;
use dockyard_dock::{CommandLauncher, Dock, GridPlacer, IconPlacer, Launcher};
use dockyard_gateway::{Endpoint, QueueHandle, QueueId, ShellLink, WwmReply, WwmRequest, XwNotification};
use tracing::{debug, info, warn};

use crate::animator::{Animator, NoopAnimator};
use crate::application::{ApplicationRegistry, BounceOutcome, BounceSettings};
use crate::server::{HeadlessWindowServer, WindowServer};
use crate::timer::{TimerFire, TimerSink, TimerTask};

/// Everything the window-manager queue accepts.
#[derive(Debug)]
pub enum WmInbound {
    Wwm(WwmRequest),
    Window(WindowEvent),
    Timer(TimerFire),
}

impl From<WwmRequest> for WmInbound {
    fn from(request: WwmRequest) -> Self {
        WmInbound::Wwm(request)
    }
}

impl From<WindowEvent> for WmInbound {
    fn from(event: WindowEvent) -> Self {
        WmInbound::Window(event)
    }
}

impl From<TimerFire> for WmInbound {
    fn from(fire: TimerFire) -> Self {
        WmInbound::Timer(fire)
    }
}

/// Handle to the window-manager queue.
pub type WmHandle = QueueHandle<WmInbound, WwmReply>;

pub struct WindowManagerService {
    registry: ApplicationRegistry,
    /// Present only with shell integration.
    dock: Option<Dock>,
    server: Box<dyn WindowServer>,
    placer: Box<dyn IconPlacer>,
    launcher: Box<dyn Launcher>,
    animator: Box<dyn Animator>,
    shell: Option<Box<dyn ShellLink>>,
    timers: Arc<dyn TimerSink>,
    launch_timeout: Duration,
    shell_name: String,
    launch_timers: HashMap<LaunchId, TimerTask>,
    slot_timers: HashMap<usize, TimerTask>,
    screen: ScreenInfo,
    initialized: bool,
    shutdown: Option<ShutdownMode>,
}

impl WindowManagerService {
    /// A standalone service: no dock, no shell, headless collaborators.
    pub fn new(config: &DockyardConfig, timers: Arc<dyn TimerSink>) -> Self {
        let screen = config.screen.to_screen_info();
        Self {
            registry: ApplicationRegistry::new(
                Arc::clone(&timers),
                BounceSettings::from(&config.bounce),
            ),
            dock: None,
            server: Box::new(HeadlessWindowServer::new()),
            placer: Box::new(GridPlacer::new(screen)),
            launcher: Box::new(CommandLauncher::new()),
            animator: Box::new(NoopAnimator),
            shell: None,
            timers,
            launch_timeout: config.dock.launch_timeout(),
            shell_name: config.integration.shell_name.clone(),
            launch_timers: HashMap::new(),
            slot_timers: HashMap::new(),
            screen,
            initialized: false,
            shutdown: None,
        }
    }

    pub fn with_dock(mut self, dock: Dock) -> Self {
        self.dock = Some(dock);
        self
    }

    pub fn with_shell(mut self, shell: impl ShellLink + 'static) -> Self {
        self.shell = Some(Box::new(shell));
        self
    }

    pub fn with_window_server(mut self, server: impl WindowServer + 'static) -> Self {
        self.server = Box::new(server);
        self
    }

    pub fn with_placer(mut self, placer: impl IconPlacer + 'static) -> Self {
        self.placer = Box::new(placer);
        self
    }

    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    pub fn with_animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Box::new(animator);
        self
    }

    // -- Accessors --

    pub fn registry(&self) -> &ApplicationRegistry {
        &self.registry
    }

    pub fn dock(&self) -> Option<&Dock> {
        self.dock.as_ref()
    }

    pub fn is_integrated(&self) -> bool {
        self.dock.is_some()
    }

    pub fn shell_connected(&self) -> bool {
        self.shell.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn screen(&self) -> ScreenInfo {
        self.screen
    }

    pub fn shutdown_mode(&self) -> Option<ShutdownMode> {
        self.shutdown
    }

    // -- Shared helpers --

    fn notify(&mut self, notification: XwNotification) {
        self.registry.notify(notification);
    }

    /// Post everything the last transition raised, in order. A shell that
    /// has gone away is dropped and the service carries on standalone.
    fn flush_notifications(&mut self) {
        let notifications = self.registry.take_notifications();
        let Some(shell) = &self.shell else {
            return;
        };

        let mut lost = false;
        for notification in notifications {
            let kind = notification.kind();
            match shell.notify(notification) {
                Ok(()) => debug!(kind, "posted to shell"),
                Err(GatewayError::Unavailable(queue)) => {
                    warn!(queue, "shell is unreachable, continuing without integration");
                    lost = true;
                    break;
                }
                Err(e) => warn!(kind, "failed to notify shell: {e}"),
            }
        }
        if lost {
            self.shell = None;
        }
    }

    fn run_bounce(&mut self, leader: WindowId, outcome: BounceOutcome) {
        if outcome == BounceOutcome::Started && !self.animator.bounce(leader) {
            self.registry.bounce_finished(leader);
        }
    }
}

#[async_trait]
impl Endpoint for WindowManagerService {
    type Inbound = WmInbound;
    type Reply = WwmReply;

    async fn handle(&mut self, origin: Option<QueueId>, msg: WmInbound) -> WwmReply {
        let reply = match msg {
            WmInbound::Wwm(request) => {
                debug!(kind = request.kind(), from = ?origin, "wwm request");
                self.handle_request(request)
            }
            WmInbound::Window(event) => {
                self.handle_window_event(event).await;
                WwmReply::Ack
            }
            WmInbound::Timer(fire) => {
                self.handle_timer(fire);
                WwmReply::Ack
            }
        };
        self.flush_notifications();
        reply
    }

    fn is_finished(&self) -> bool {
        if let Some(mode) = self.shutdown {
            info!(?mode, "window manager service finished");
            return true;
        }
        false
    }
}
