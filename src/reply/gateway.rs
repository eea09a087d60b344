//! Reply submission gateway.
//!
//! `submit` rejects empty input with no side effects, writes the durable
//! local backup *before* attempting remote delivery (delivery failure must
//! never lose the reply), then delivers and acknowledges. Delivery sits
//! behind [`ReplyTransport`] so tests run without a network.

use async_trait::async_trait;
use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use super::store::ReplyStore;

/// JSON body sent to the remote endpoint. The timestamp is the
/// locale-formatted capture time; the backup keeps the ISO-8601 form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReplyPayload {
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("failed to persist reply backup: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("failed to deliver reply: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing happened.
    Rejected,
    /// Backup written, delivery succeeded, acknowledgment invoked.
    Sent,
}

#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn deliver(&self, payload: &ReplyPayload) -> anyhow::Result<()>;
}

type AckFn = Box<dyn Fn(&str) + Send + Sync>;

pub struct ReplyGateway<T: ReplyTransport> {
    transport: T,
    store: ReplyStore,
    ack: Option<AckFn>,
}

impl<T: ReplyTransport> ReplyGateway<T> {
    pub fn new(transport: T, store: ReplyStore) -> Self {
        Self {
            transport,
            store,
            ack: None,
        }
    }

    /// Install the acknowledgment callback, invoked with the raw text
    /// exactly once per successful delivery.
    pub fn with_ack(mut self, ack: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.ack = Some(Box::new(ack));
        self
    }

    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome, ReplyError> {
        if text.trim().is_empty() {
            return Ok(SubmitOutcome::Rejected);
        }

        // Backup first: the sole durability guarantee in the system, so it
        // must not depend on the network call's outcome.
        self.store.record_reply(text)?;

        let payload = ReplyPayload {
            message: text.to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        self.transport
            .deliver(&payload)
            .await
            .map_err(|e| ReplyError::Delivery(e.to_string()))?;

        if let Some(ack) = &self.ack {
            ack(text);
        }
        Ok(SubmitOutcome::Sent)
    }

    pub fn store(&self) -> &ReplyStore {
        &self.store
    }
}

/// Production transport: HTTP POST to the configured endpoint. The
/// response body is ignored; only success or failure of the call matters.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ReplyTransport for HttpTransport {
    async fn deliver(&self, payload: &ReplyPayload) -> anyhow::Result<()> {
        self.client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::mock::MockTransport;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn gateway_with(
        transport: MockTransport,
    ) -> (ReplyGateway<MockTransport>, Arc<AtomicUsize>) {
        let acks = Arc::new(AtomicUsize::new(0));
        let counter = acks.clone();
        let gateway = ReplyGateway::new(transport, ReplyStore::in_memory().unwrap())
            .with_ack(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        (gateway, acks)
    }

    #[tokio::test]
    async fn successful_submit_backs_up_and_acknowledges_once() {
        let transport = MockTransport::new();
        let deliveries = transport.deliveries_handle();
        let (gateway, acks) = gateway_with(transport);

        let outcome = gateway.submit("Hello").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(gateway.store().reply().unwrap(), Some("Hello".to_string()));

        let stamp = gateway.store().reply_timestamp().unwrap().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());

        assert_eq!(acks.load(Ordering::SeqCst), 1);
        let sent = deliveries.lock().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Hello");
    }

    #[tokio::test]
    async fn whitespace_only_input_is_rejected_with_no_side_effects() {
        let transport = MockTransport::new();
        let deliveries = transport.deliveries_handle();
        let (gateway, acks) = gateway_with(transport);

        let outcome = gateway.submit("   ").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(gateway.store().reply().unwrap(), None);
        assert_eq!(gateway.store().reply_timestamp().unwrap(), None);
        assert!(deliveries.lock().is_empty());
        assert_eq!(acks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delivery_failure_keeps_the_backup_and_skips_the_ack() {
        let (gateway, acks) = gateway_with(MockTransport::failing());

        let err = gateway.submit("still here").await.unwrap_err();
        assert!(matches!(err, ReplyError::Delivery(_)));
        // Write-before-send: the backup survives the failed delivery.
        assert_eq!(
            gateway.store().reply().unwrap(),
            Some("still here".to_string())
        );
        assert_eq!(acks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn payload_serializes_to_the_wire_shape() {
        let payload = ReplyPayload {
            message: "Hello".into(),
            timestamp: "2025-11-08 21:14:09".into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": "Hello",
                "timestamp": "2025-11-08 21:14:09",
            })
        );
    }

    #[tokio::test]
    async fn payload_carries_a_locale_timestamp() {
        let transport = MockTransport::new();
        let deliveries = transport.deliveries_handle();
        let (gateway, _) = gateway_with(transport);

        gateway.submit("hi").await.unwrap();
        let sent = deliveries.lock().clone();
        assert!(!sent[0].timestamp.is_empty());
    }
}
