//! Desktop-shell side of dockyard.
//!
//! Mirrors what the window manager reports about running applications and
//! drives the session: startup handshake, launches and logout.

pub mod mirror;
pub mod presenter;
pub mod service;

pub use mirror::{LaunchFailure, MirroredApp, WorkspaceMirror};
pub use presenter::{AlertPresenter, AppActivator, HeadlessAlerts, LoggingActivator};
pub use service::{ShellCommand, ShellHandle, ShellInbound, ShellService};
