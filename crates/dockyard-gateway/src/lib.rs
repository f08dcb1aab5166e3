//! Message schema and serial queues connecting the window manager and the
//! desktop shell.
//!
//! Each side owns one queue. Notifications are posted and forgotten;
//! queries are synchronous calls bounded by a timeout. A handler may not
//! call back into a queue that is blocked waiting on it.

pub mod link;
pub mod protocol;
pub mod queue;

pub use link::{ShellLink, WmLink};
pub use protocol::{
    AlertChoice, AutoLaunchOutcome, DockAppEntry, LaunchingIconInfo, WwmReply, WwmRequest,
    XwNotification, XwReply, XwRequest, PROTOCOL_VERSION,
};
pub use queue::{channel, Endpoint, Envelope, QueueHandle, QueueId, QueueReceiver};
