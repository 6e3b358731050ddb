use azservicebus::{
    ServiceBusClient, ServiceBusReceiveMode, ServiceBusReceivedMessage, ServiceBusSessionReceiver,
    ServiceBusSessionReceiverOptions,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::message::SessionMessageModel;
use crate::common::{SdkError, SdkResult};

const DISPOSED: &str = "Receiver already disposed";

fn messaging_error(action: &str, e: impl std::fmt::Display) -> SdkError {
    SdkError::Messaging(format!("Failed to {action}: {e}"))
}

/// The receiver still held in `slot`, or the disposed error.
fn active<R>(slot: &mut Option<R>) -> SdkResult<&mut R> {
    slot.as_mut()
        .ok_or_else(|| SdkError::Messaging(DISPOSED.to_string()))
}

/// A receiver that gives its lock back when closed.
trait CloseReceiver {
    fn close(self) -> impl Future<Output = SdkResult<()>> + Send;
}

impl CloseReceiver for ServiceBusSessionReceiver {
    async fn close(self) -> SdkResult<()> {
        self.dispose()
            .await
            .map_err(|e| messaging_error("dispose receiver", e))
    }
}

/// Close whatever is left in `slot`. Returns whether anything was closed.
async fn close_slot<R: CloseReceiver>(slot: &Mutex<Option<R>>) -> SdkResult<bool> {
    let receiver = slot.lock().await.take();
    match receiver {
        Some(receiver) => {
            receiver.close().await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// A locked session on a queue.
///
/// Cloning shares the underlying receiver. Once [`dispose`](Self::dispose)
/// has run, every other call fails with `Receiver already disposed`.
#[derive(Clone)]
pub struct SessionConsumer {
    session_id: String,
    receiver: Arc<Mutex<Option<ServiceBusSessionReceiver>>>,
}

impl std::fmt::Debug for SessionConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConsumer")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

impl SessionConsumer {
    pub fn new(session_id: impl Into<String>, receiver: ServiceBusSessionReceiver) -> Self {
        Self {
            session_id: session_id.into(),
            receiver: Arc::new(Mutex::new(Some(receiver))),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn is_disposed(&self) -> bool {
        self.receiver.lock().await.is_none()
    }

    /// Receive up to `max_count` messages. A timeout yields an empty batch.
    pub async fn receive_messages_with_timeout(
        &self,
        max_count: u32,
        timeout: Duration,
    ) -> SdkResult<Vec<ServiceBusReceivedMessage>> {
        let mut guard = self.receiver.lock().await;
        let receiver = active(&mut *guard)?;

        match tokio::time::timeout(timeout, receiver.receive_messages(max_count)).await {
            Ok(result) => result.map_err(|e| messaging_error("receive messages", e)),
            Err(_) => {
                log::debug!(
                    "receive_messages on session {} timed out after {:?}",
                    self.session_id,
                    timeout
                );
                Ok(Vec::new())
            }
        }
    }

    /// Receive and convert in one step.
    pub async fn receive_models_with_timeout(
        &self,
        max_count: u32,
        timeout: Duration,
    ) -> SdkResult<Vec<SessionMessageModel>> {
        let messages = self.receive_messages_with_timeout(max_count, timeout).await?;
        Ok(SessionMessageModel::convert_all(&messages))
    }

    pub async fn complete_message(&self, message: &ServiceBusReceivedMessage) -> SdkResult<()> {
        let mut guard = self.receiver.lock().await;
        let receiver = active(&mut *guard)?;
        receiver
            .complete_message(message)
            .await
            .map_err(|e| messaging_error("complete message", e))
    }

    pub async fn abandon_message(&self, message: &ServiceBusReceivedMessage) -> SdkResult<()> {
        let mut guard = self.receiver.lock().await;
        let receiver = active(&mut *guard)?;
        receiver
            .abandon_message(message, None)
            .await
            .map_err(|e| messaging_error("abandon message", e))
    }

    /// Release the session lock. Calling it twice is a no-op.
    pub async fn dispose(&self) -> SdkResult<()> {
        if close_slot(&self.receiver).await? {
            log::debug!("Disposed session receiver for {}", self.session_id);
        }
        Ok(())
    }
}

pub trait ServiceBusClientExt {
    /// Accept the named session on `queue_name`.
    fn accept_session_consumer(
        &mut self,
        queue_name: impl Into<String> + Send,
        session_id: impl Into<String> + Send,
        receive_mode: ServiceBusReceiveMode,
    ) -> impl Future<Output = SdkResult<SessionConsumer>>;
}

impl<RP> ServiceBusClientExt for ServiceBusClient<RP>
where
    RP: azservicebus::ServiceBusRetryPolicy
        + From<azservicebus::ServiceBusRetryOptions>
        + Send
        + Sync
        + 'static,
{
    async fn accept_session_consumer(
        &mut self,
        queue_name: impl Into<String> + Send,
        session_id: impl Into<String> + Send,
        receive_mode: ServiceBusReceiveMode,
    ) -> SdkResult<SessionConsumer> {
        let queue_name = queue_name.into();
        let session_id = session_id.into();
        let options = ServiceBusSessionReceiverOptions {
            receive_mode,
            ..Default::default()
        };

        let receiver = self
            .accept_session_for_queue(queue_name.clone(), session_id.clone(), options)
            .await
            .map_err(|e| {
                SdkError::Messaging(format!(
                    "Failed to accept session '{session_id}' on queue '{queue_name}': {e}"
                ))
            })?;

        log::info!("Accepted session {session_id} on queue {queue_name}");
        Ok(SessionConsumer::new(session_id, receiver))
    }
}
