use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config write error: {0}")]
    WriteError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DockError {
    #[error("dock position {position} is out of range (dock has {len} slots)")]
    SlotOutOfRange { position: usize, len: usize },

    #[error("dock position {0} has no assigned command")]
    Unassigned(usize),

    #[error("failed to launch dock position {position}: {reason}")]
    LaunchFailed { position: usize, reason: String },

    #[error("dock state store error: {0}")]
    Store(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway unavailable: {0} queue is closed")]
    Unavailable(&'static str),

    #[error("gateway call to {queue} timed out after {after_ms}ms")]
    Timeout { queue: &'static str, after_ms: u64 },

    #[error("re-entrant synchronous call into {0} queue rejected")]
    Reentrant(&'static str),

    #[error("protocol version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),
}

/// Failure reported by the window-server collaborator.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("no such window: 0x{0:x}")]
    NoSuchWindow(u64),

    #[error("window server request failed: {0}")]
    RequestFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DockyardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dock(#[from] DockError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::WriteError("disk full".into());
        assert_eq!(err.to_string(), "config write error: disk full");
    }

    #[test]
    fn dock_error_display() {
        let err = DockError::SlotOutOfRange { position: 20, len: 16 };
        assert_eq!(
            err.to_string(),
            "dock position 20 is out of range (dock has 16 slots)"
        );

        let err = DockError::Unassigned(4);
        assert_eq!(err.to_string(), "dock position 4 has no assigned command");

        let err = DockError::LaunchFailed {
            position: 3,
            reason: "no such file".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to launch dock position 3: no such file"
        );
    }

    #[test]
    fn dock_error_from_config() {
        let err: DockError = ConfigError::WriteError("read-only fs".into()).into();
        assert!(matches!(err, DockError::Store(_)));
        assert!(err.to_string().contains("read-only fs"));
    }

    #[test]
    fn gateway_error_display() {
        let err = GatewayError::Unavailable("shell");
        assert_eq!(err.to_string(), "gateway unavailable: shell queue is closed");

        let err = GatewayError::Timeout {
            queue: "window-manager",
            after_ms: 2000,
        };
        assert_eq!(
            err.to_string(),
            "gateway call to window-manager timed out after 2000ms"
        );

        let err = GatewayError::VersionMismatch {
            expected: 1,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "protocol version mismatch: expected 1, found 2"
        );

        let err = GatewayError::UnexpectedReply("Count(3)".into());
        assert_eq!(err.to_string(), "unexpected reply: Count(3)");
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::NoSuchWindow(0x1c00003);
        assert_eq!(err.to_string(), "no such window: 0x1c00003");
    }

    #[test]
    fn dockyard_error_from_variants() {
        let err: DockyardError = DockError::Unassigned(1).into();
        assert!(matches!(err, DockyardError::Dock(_)));

        let err: DockyardError = GatewayError::Reentrant("shell").into();
        assert!(matches!(err, DockyardError::Gateway(_)));
        assert!(err.to_string().contains("re-entrant"));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DockyardError = io_err.into();
        assert!(matches!(err, DockyardError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
