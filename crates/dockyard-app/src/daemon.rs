//! Wiring of the two queues and the stdin event pump.

use std::sync::Arc;

use dockyard_common::{DockyardError, GatewayError, Result, ShutdownMode};
use dockyard_config::{DockStateStore, DockyardConfig};
use dockyard_dock::Dock;
use dockyard_gateway::{channel, QueueId, WmLink, WwmReply, WwmRequest, XwReply};
use dockyard_shell::{ShellCommand, ShellHandle, ShellInbound, ShellService};
use dockyard_wm::{TimerSink, WindowManagerService, WmHandle, WmInbound};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::input::{parse_line, InputLine};

pub struct Daemon {
    wm: WmHandle,
    wm_task: JoinHandle<WindowManagerService>,
    shell: Option<(ShellHandle, JoinHandle<ShellService>)>,
}

impl Daemon {
    /// Start the window-manager queue, plus the dock and shell queue when
    /// integration is on.
    pub fn spawn(config: &DockyardConfig, standalone: bool) -> Result<Self> {
        let timeout = config.integration.call_timeout();
        let (wm, wm_rx) = channel::<WmInbound, WwmReply>(QueueId::WindowManager, timeout);
        let sink: Arc<dyn TimerSink> = Arc::new(wm.clone());
        let service = WindowManagerService::new(config, sink);

        if standalone || !config.integration.enabled {
            info!("shell integration off, running standalone");
            let wm_task = wm_rx.spawn(service);
            return Ok(Self {
                wm,
                wm_task,
                shell: None,
            });
        }

        let store = DockStateStore::new(config.dock_state_path()?);
        let dock = Dock::with_store(config.dock.slots as usize, store);
        info!(
            slots = dock.len(),
            docked = dock.assigned_count(),
            "dock loaded"
        );

        let (shell, shell_rx) = channel::<ShellInbound, XwReply>(QueueId::Shell, timeout);
        let wm_task = wm_rx.spawn(service.with_dock(dock).with_shell(shell.clone()));
        let shell_task = shell_rx.spawn(ShellService::new(wm.clone()));

        Ok(Self {
            wm,
            wm_task,
            shell: Some((shell, shell_task)),
        })
    }

    pub fn is_integrated(&self) -> bool {
        self.shell.is_some()
    }

    /// Run the shell's startup handshake. Standalone daemons just
    /// initialize the window manager.
    pub async fn start(&self) -> Result<()> {
        let reply = match &self.shell {
            Some((shell, _)) => shell.call(ShellCommand::Start).await?,
            None => match self.wm.call(WwmRequest::Initialize).await? {
                WwmReply::Ack => XwReply::Ack,
                other => return Err(GatewayError::UnexpectedReply(format!("{other:?}")).into()),
            },
        };
        match reply {
            XwReply::Failed(reason) => Err(DockyardError::Other(reason)),
            _ => Ok(()),
        }
    }

    /// Route one input line to its queue.
    pub async fn feed(&self, line: InputLine) -> Result<()> {
        match line {
            InputLine::Event(event) => {
                debug!(?event, "window event");
                self.wm.post(event)?;
            }
            InputLine::Command(command) => {
                let Some((shell, _)) = &self.shell else {
                    warn!(?command, "shell command ignored in standalone mode");
                    return Ok(());
                };
                let reply = shell.call(command).await?;
                info!(?reply, "shell command done");
            }
        }
        Ok(())
    }

    /// Feed every line of `reader` until EOF.
    pub async fn pump<R: AsyncBufRead + Unpin>(&self, reader: R) -> Result<()> {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            match parse_line(&line) {
                None => continue,
                Some(Ok(input)) => {
                    if let Err(e) = self.feed(input).await {
                        if matches!(e, DockyardError::Gateway(GatewayError::Unavailable(_))) {
                            return Err(e);
                        }
                        warn!("input line failed: {e}");
                    }
                }
                Some(Err(e)) => warn!(line = %line, "unreadable input line: {e}"),
            }
        }
        debug!("input closed");
        Ok(())
    }

    /// Stop the window manager, saving the dock, and wait for both queues.
    pub async fn shutdown(self) -> Result<WindowManagerService> {
        let link: &dyn WmLink = &self.wm;
        match link
            .call(WwmRequest::Shutdown {
                mode: ShutdownMode::Exit,
            })
            .await
        {
            Ok(_) => {}
            // Already stopped, e.g. after a logout command.
            Err(GatewayError::Unavailable(_)) => {}
            Err(e) => warn!("shutdown request failed: {e}"),
        }

        let Daemon { wm, wm_task, shell } = self;
        drop(wm);
        let service = wm_task
            .await
            .map_err(|e| DockyardError::Other(format!("window manager task failed: {e}")))?;

        if let Some((shell, shell_task)) = shell {
            // The stopped window manager let go of its link, so this was
            // the last handle.
            drop(shell);
            shell_task
                .await
                .map_err(|e| DockyardError::Other(format!("shell task failed: {e}")))?;
        }
        info!("daemon stopped");
        Ok(service)
    }
}
