//! Lines read from stdin.

use dockyard_shell::ShellCommand;
use dockyard_wm::WindowEvent;
use serde::Deserialize;

/// One input line: a window-server event (`"event"` tag) or a shell
/// session command (`"action"` tag).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputLine {
    Event(WindowEvent),
    Command(ShellCommand),
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Option<Result<InputLine, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(line))
}

#[cfg(test)]
mod tests {
    use dockyard_common::{ShutdownMode, WindowId};

    use super::*;

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("# mapped the clock").is_none());
    }

    #[test]
    fn window_event_line() {
        let line = parse_line(r#"{"event":"unmapped","window":4096}"#).unwrap().unwrap();
        assert_eq!(
            line,
            InputLine::Event(WindowEvent::Unmapped {
                window: WindowId(4096)
            })
        );
    }

    #[test]
    fn command_line() {
        let line = parse_line(r#"{"action":"logout","mode":"exit"}"#).unwrap().unwrap();
        assert_eq!(
            line,
            InputLine::Command(ShellCommand::Logout {
                mode: ShutdownMode::Exit
            })
        );
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_line("{not json").unwrap().is_err());
        assert!(parse_line(r#"{"event":"exploded"}"#).unwrap().is_err());
    }
}
