use clap::Parser;

/// Dockyard: window-manager and desktop-shell coordination daemon.
///
/// Reads window-server events as JSON lines on stdin and shuts down at EOF.
#[derive(Parser, Debug)]
#[command(name = "dockyard", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run the window-manager side alone, without dock or shell.
    #[arg(long)]
    pub standalone: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["dockyard"]);
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
        assert!(!args.standalone);
    }

    #[test]
    fn all_flags() {
        let args = Args::parse_from([
            "dockyard",
            "--config",
            "/tmp/dockyard.toml",
            "--log-level",
            "debug",
            "--standalone",
        ]);
        assert_eq!(args.config.as_deref(), Some("/tmp/dockyard.toml"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.standalone);
    }
}
