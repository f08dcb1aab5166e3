//! Serial message queues, one per side.
//!
//! A queue is a tokio task draining an unbounded channel into an
//! [`Endpoint`]. The endpoint's state is touched only by that task.

mod dispatch;
mod handle;

pub use dispatch::{Endpoint, QueueReceiver};
pub use handle::QueueHandle;

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;

use dockyard_common::GatewayError;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueId {
    Shell,
    WindowManager,
}

impl QueueId {
    pub fn name(&self) -> &'static str {
        match self {
            QueueId::Shell => "shell",
            QueueId::WindowManager => "window-manager",
        }
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A message in transit, with the reply slot for synchronous calls.
pub struct Envelope<M, R> {
    pub seq: u64,
    pub version: u32,
    /// Queue whose handler sent this, if any.
    pub origin: Option<QueueId>,
    pub body: M,
    pub reply: Option<oneshot::Sender<Result<R, GatewayError>>>,
}

/// Default bound on a synchronous call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(2000);

/// Create the queue `id`. The receiver is turned into a running task with
/// [`QueueReceiver::spawn`]; handles are cloned freely.
pub fn channel<M, R>(id: QueueId, call_timeout: Duration) -> (QueueHandle<M, R>, QueueReceiver<M, R>)
where
    M: Send + 'static,
    R: Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = QueueHandle::new(id, tx, call_timeout, Arc::new(AtomicU64::new(1)));
    (handle, QueueReceiver::new(id, rx))
}
