//! Sending side of a queue.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dockyard_common::{new_correlation_id, GatewayError};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::dispatch::current_dispatch;
use super::{Envelope, QueueId};
use crate::protocol::PROTOCOL_VERSION;

pub struct QueueHandle<M, R> {
    id: QueueId,
    tx: mpsc::UnboundedSender<Envelope<M, R>>,
    timeout: Duration,
    seq: Arc<AtomicU64>,
    version: u32,
}

impl<M, R> Clone for QueueHandle<M, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tx: self.tx.clone(),
            timeout: self.timeout,
            seq: Arc::clone(&self.seq),
            version: self.version,
        }
    }
}

impl<M, R> QueueHandle<M, R> {
    pub(super) fn new(
        id: QueueId,
        tx: mpsc::UnboundedSender<Envelope<M, R>>,
        timeout: Duration,
        seq: Arc<AtomicU64>,
    ) -> Self {
        Self {
            id,
            tx,
            timeout,
            seq,
            version: PROTOCOL_VERSION,
        }
    }

    /// The queue this handle delivers to.
    pub fn id(&self) -> QueueId {
        self.id
    }

    pub fn call_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    #[cfg(test)]
    pub(super) fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    fn envelope(
        &self,
        body: M,
        reply: Option<oneshot::Sender<Result<R, GatewayError>>>,
    ) -> Envelope<M, R> {
        Envelope {
            seq: self.seq.fetch_add(1, Ordering::Relaxed),
            version: self.version,
            origin: current_dispatch().map(|d| d.queue),
            body,
            reply,
        }
    }

    /// Enqueue without waiting for the handler.
    pub fn post(&self, msg: impl Into<M>) -> Result<(), GatewayError> {
        let envelope = self.envelope(msg.into(), None);
        self.tx
            .send(envelope)
            .map_err(|_| GatewayError::Unavailable(self.id.name()))
    }

    /// Enqueue and wait for the handler's reply, up to the call timeout.
    ///
    /// Fails with [`GatewayError::Reentrant`] when made from a handler of
    /// this same queue, or from a handler serving a synchronous call that
    /// this queue is blocked on.
    pub async fn call(&self, msg: impl Into<M>) -> Result<R, GatewayError> {
        if let Some(ctx) = current_dispatch() {
            if ctx.queue == self.id || ctx.caller_waiting == Some(self.id) {
                warn!(
                    from = %ctx.queue,
                    to = %self.id,
                    "rejecting re-entrant synchronous call"
                );
                return Err(GatewayError::Reentrant(self.id.name()));
            }
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = self.envelope(msg.into(), Some(reply_tx));
        let seq = envelope.seq;
        let cid = new_correlation_id();
        debug!(queue = %self.id, seq, cid = %cid, "gateway call");

        self.tx
            .send(envelope)
            .map_err(|_| GatewayError::Unavailable(self.id.name()))?;

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(result)) => {
                debug!(queue = %self.id, seq, cid = %cid, ok = result.is_ok(), "gateway reply");
                result
            }
            Ok(Err(_)) => Err(GatewayError::Unavailable(self.id.name())),
            Err(_) => {
                warn!(queue = %self.id, seq, cid = %cid, "gateway call timed out");
                Err(GatewayError::Timeout {
                    queue: self.id.name(),
                    after_ms: self.timeout.as_millis() as u64,
                })
            }
        }
    }
}
