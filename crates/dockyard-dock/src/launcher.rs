use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Starts the program behind a dock slot.
pub trait Launcher: Send + Sync {
    /// Spawn `command` detached and return its process id.
    fn launch(&self, command: &str) -> Result<u32, String>;
}

/// Runs commands through `sh -c` with stdio detached.
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    shell: String,
}

impl CommandLauncher {
    pub fn new() -> Self {
        Self {
            shell: "/bin/sh".to_string(),
        }
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for CommandLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for CommandLauncher {
    fn launch(&self, command: &str) -> Result<u32, String> {
        if command.trim().is_empty() {
            return Err("empty command".to_string());
        }

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("failed to spawn `{command}`: {e}"))?;

        let pid = child.id();
        debug!(pid, command, "launched");

        // Reap the child so it does not linger as a zombie.
        let spawned = std::thread::Builder::new()
            .name(format!("reap-{pid}"))
            .spawn(move || match child.wait() {
                Ok(status) => debug!(pid, %status, "launched process exited"),
                Err(e) => warn!(pid, "failed to wait on launched process: {e}"),
            });
        if let Err(e) = spawned {
            warn!(pid, "could not start reaper thread: {e}");
        }

        Ok(pid)
    }
}
