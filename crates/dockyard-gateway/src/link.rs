//! Typed views of a peer's queue.
//!
//! Each side's queue carries its own inbound enum; these traits expose only
//! the vector the peer is allowed to send.

use async_trait::async_trait;
use dockyard_common::GatewayError;

use crate::protocol::{WwmReply, WwmRequest, XwNotification, XwReply, XwRequest};
use crate::queue::QueueHandle;

/// The shell's view of the window manager.
#[async_trait]
pub trait WmLink: Send + Sync {
    fn post(&self, request: WwmRequest) -> Result<(), GatewayError>;

    async fn call(&self, request: WwmRequest) -> Result<WwmReply, GatewayError>;
}

/// The window manager's view of the shell.
#[async_trait]
pub trait ShellLink: Send + Sync {
    fn notify(&self, notification: XwNotification) -> Result<(), GatewayError>;

    async fn request(&self, request: XwRequest) -> Result<XwReply, GatewayError>;
}

#[async_trait]
impl<M> WmLink for QueueHandle<M, WwmReply>
where
    M: From<WwmRequest> + Send + 'static,
{
    fn post(&self, request: WwmRequest) -> Result<(), GatewayError> {
        QueueHandle::post(self, request)
    }

    async fn call(&self, request: WwmRequest) -> Result<WwmReply, GatewayError> {
        QueueHandle::call(self, request).await
    }
}

#[async_trait]
impl<M> ShellLink for QueueHandle<M, XwReply>
where
    M: From<XwNotification> + From<XwRequest> + Send + 'static,
{
    fn notify(&self, notification: XwNotification) -> Result<(), GatewayError> {
        self.post(notification)
    }

    async fn request(&self, request: XwRequest) -> Result<XwReply, GatewayError> {
        self.call(request).await
    }
}
