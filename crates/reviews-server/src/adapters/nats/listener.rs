//! Inbound message loop
//!
//! Subscribes to every review pattern in a queue group and answers each
//! request on its own task.

use std::sync::Arc;

use anyhow::Context;
use async_nats::{Client, Message};
use futures::StreamExt;
use tracing::Instrument;

use reviews::{ProductExistenceChecker, ReviewRepository, RpcError};

use super::packet::{pattern_subject, RequestPacket, ResponsePacket};
use crate::application::ReviewService;
use crate::routes;

/// Serve review patterns until the subscriptions close
pub async fn listen<R, P>(
    client: Client,
    service: Arc<ReviewService<R, P>>,
    queue_group: String,
) -> anyhow::Result<()>
where
    R: ReviewRepository + 'static,
    P: ProductExistenceChecker + 'static,
{
    let mut subscriptions = Vec::with_capacity(routes::PATTERNS.len());
    for cmd in routes::PATTERNS {
        let subject = pattern_subject(cmd);
        let subscriber = client
            .queue_subscribe(subject.clone(), queue_group.clone())
            .await
            .with_context(|| format!("Failed to subscribe to {subject}"))?;
        tracing::info!("📨 Listening on {} (queue {})", subject, queue_group);
        subscriptions.push(subscriber);
    }

    let mut messages = futures::stream::select_all(subscriptions);
    while let Some(message) = messages.next().await {
        let client = client.clone();
        let service = service.clone();
        tokio::spawn(async move { handle_message(&client, &service, message).await });
    }

    tracing::warn!("All subscriptions closed");
    Ok(())
}

async fn handle_message<R, P>(client: &Client, service: &ReviewService<R, P>, message: Message)
where
    R: ReviewRepository,
    P: ProductExistenceChecker,
{
    let Some(reply) = message.reply.clone() else {
        tracing::warn!("Dropping message on {} without reply subject", message.subject);
        return;
    };

    let packet = respond(service, &message.payload).await;
    let body = match serde_json::to_vec(&packet) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Failed to encode reply packet: {}", e);
            return;
        }
    };

    if let Err(e) = client.publish(reply, body.into()).await {
        tracing::error!("Failed to publish reply: {}", e);
    }
}

/// Decode a request packet, dispatch it, and build the reply packet
pub async fn respond<R, P>(service: &ReviewService<R, P>, payload: &[u8]) -> ResponsePacket
where
    R: ReviewRepository,
    P: ProductExistenceChecker,
{
    let request: RequestPacket = match serde_json::from_slice(payload) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Malformed request packet: {}", e);
            return ResponsePacket::reply(
                None,
                Err(RpcError::bad_input(format!("Malformed request packet: {e}"))),
            );
        }
    };

    let cmd = request.cmd().unwrap_or_default().to_string();
    let span = tracing::info_span!(
        "message",
        cmd = %cmd,
        packet_id = request.id.as_deref().unwrap_or("-")
    );

    let result = routes::dispatch(service, &cmd, request.data)
        .instrument(span)
        .await;

    ResponsePacket::reply(request.id, result)
}
