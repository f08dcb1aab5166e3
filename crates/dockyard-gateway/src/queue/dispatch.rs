//! Receiving side of a queue: the task loop and the handler trait.

use async_trait::async_trait;
use dockyard_common::GatewayError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{Envelope, QueueId};
use crate::protocol::PROTOCOL_VERSION;

/// Handler state owned by one queue task.
#[async_trait]
pub trait Endpoint: Send {
    type Inbound: Send + 'static;
    type Reply: Send + 'static;

    /// Process one message. `origin` is the queue whose handler sent it.
    /// The reply is discarded for posted messages.
    async fn handle(&mut self, origin: Option<QueueId>, msg: Self::Inbound) -> Self::Reply;

    /// Stop draining once this returns true.
    fn is_finished(&self) -> bool {
        false
    }
}

/// What the current task is dispatching, if it is a queue task.
#[derive(Debug, Clone, Copy)]
pub(super) struct Dispatch {
    pub queue: QueueId,
    /// Queue blocked on this handler's reply.
    pub caller_waiting: Option<QueueId>,
}

tokio::task_local! {
    static DISPATCH: Dispatch;
}

pub(super) fn current_dispatch() -> Option<Dispatch> {
    DISPATCH.try_with(|d| *d).ok()
}

pub struct QueueReceiver<M, R> {
    id: QueueId,
    rx: mpsc::UnboundedReceiver<Envelope<M, R>>,
}

impl<M, R> QueueReceiver<M, R>
where
    M: Send + 'static,
    R: Send + 'static,
{
    pub(super) fn new(id: QueueId, rx: mpsc::UnboundedReceiver<Envelope<M, R>>) -> Self {
        Self { id, rx }
    }

    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Run `endpoint` on its own task until every handle is dropped or the
    /// endpoint reports it is finished. The endpoint is handed back.
    pub fn spawn<E>(self, endpoint: E) -> JoinHandle<E>
    where
        E: Endpoint<Inbound = M, Reply = R> + 'static,
    {
        tokio::spawn(self.run(endpoint))
    }

    pub async fn run<E>(mut self, mut endpoint: E) -> E
    where
        E: Endpoint<Inbound = M, Reply = R>,
    {
        info!(queue = %self.id, "queue started");

        while let Some(envelope) = self.rx.recv().await {
            let Envelope {
                seq,
                version,
                origin,
                body,
                reply,
            } = envelope;

            if version != PROTOCOL_VERSION {
                warn!(queue = %self.id, seq, version, "dropping message with foreign protocol version");
                if let Some(reply) = reply {
                    let _ = reply.send(Err(GatewayError::VersionMismatch {
                        expected: PROTOCOL_VERSION,
                        found: version,
                    }));
                }
                continue;
            }

            let ctx = Dispatch {
                queue: self.id,
                caller_waiting: if reply.is_some() { origin } else { None },
            };
            let result = DISPATCH.scope(ctx, endpoint.handle(origin, body)).await;

            if let Some(reply) = reply {
                if reply.send(Ok(result)).is_err() {
                    debug!(queue = %self.id, seq, "caller gave up before the reply");
                }
            }

            if endpoint.is_finished() {
                break;
            }
        }

        info!(queue = %self.id, "queue stopped");
        endpoint
    }
}
