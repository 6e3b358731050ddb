//! Receive from one named session of a session-enabled queue.

use super::resolve_secret;
use crate::config::SampleConfig;
use crate::constants::env_vars::SERVICEBUS_CONNECTION_STRING;
use crate::error::{SampleError, SampleResult};
use azrest::messaging::{ServiceBusClientExt, SessionConsumer, SessionMessageModel};
use azservicebus::{
    ServiceBusClient, ServiceBusClientOptions, ServiceBusReceiveMode, ServiceBusReceivedMessage,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct ReceiveOptions {
    pub queue_name: String,
    pub session_id: String,
    pub duration: Duration,
    pub max_messages: u32,
    pub poll_interval: Duration,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveSummary {
    pub completed: usize,
    pub abandoned: usize,
}

pub fn format_message(model: &SessionMessageModel) -> String {
    format!(
        "Session: {}. Sequence #: {}. Contents: {}",
        model.session_id.as_deref().unwrap_or_default(),
        model.sequence,
        model.body
    )
}

pub async fn run(config: &SampleConfig, options: ReceiveOptions) -> SampleResult<ReceiveSummary> {
    let connection_string = resolve_secret(
        &config.servicebus().connection_string(),
        "servicebus.connection_string",
        SERVICEBUS_CONNECTION_STRING,
    )?;

    let mut client =
        ServiceBusClient::new_from_connection_string(&connection_string, ServiceBusClientOptions::default())
            .await
            .map_err(|e| SampleError::ServiceBus(format!("Failed to create client: {e}")))?;

    let consumer = client
        .accept_session_consumer(
            options.queue_name.clone(),
            options.session_id.clone(),
            ServiceBusReceiveMode::PeekLock,
        )
        .await?;
    log::info!(
        "Accepted session {} on queue {}",
        consumer.session_id(),
        options.queue_name
    );

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Ctrl-C received, stopping");
                cancel.cancel();
            }
        }
    });

    let result = receive_until_stopped(&consumer, &options, &cancel).await;
    ctrl_c.abort();

    if let Err(e) = consumer.dispose().await {
        log::warn!("Failed to dispose session receiver: {e}");
    }
    client
        .dispose()
        .await
        .map_err(|e| SampleError::ServiceBus(format!("Failed to dispose client: {e}")))?;

    result
}

async fn receive_until_stopped(
    consumer: &SessionConsumer,
    options: &ReceiveOptions,
    cancel: &CancellationToken,
) -> SampleResult<ReceiveSummary> {
    let mut summary = ReceiveSummary::default();
    let deadline = tokio::time::sleep(options.duration);
    tokio::pin!(deadline);

    loop {
        let batch = tokio::select! {
            _ = cancel.cancelled() => break,
            _ = &mut deadline => {
                log::info!("Receive window of {:?} elapsed", options.duration);
                break;
            }
            batch = consumer.receive_messages_with_timeout(options.max_messages, options.poll_interval) => batch?,
        };

        for message in &batch {
            if handle_message(consumer, message).await {
                summary.completed += 1;
            } else {
                summary.abandoned += 1;
            }
        }
    }

    Ok(summary)
}

/// Print and complete `message`; abandon it when it cannot be processed.
async fn handle_message(consumer: &SessionConsumer, message: &ServiceBusReceivedMessage) -> bool {
    let processed = match SessionMessageModel::try_from(message) {
        Ok(model) => {
            println!("{}", format_message(&model));
            consumer.complete_message(message).await
        }
        Err(e) => Err(azrest::SdkError::Messaging(e.to_string())),
    };

    match processed {
        Ok(()) => true,
        Err(e) => {
            log::error!(
                "Failed to process message #{}: {e}",
                message.sequence_number()
            );
            if let Err(e) = consumer.abandon_message(message).await {
                log::error!("Failed to abandon message #{}: {e}", message.sequence_number());
            }
            false
        }
    }
}
