//! Recording transport for deterministic testing
//!
//! Implements ReplyTransport to capture payloads (or fail on demand)
//! without touching the network. Use this for unit and integration tests
//! that need to verify the submission flow.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;

use super::gateway::{ReplyPayload, ReplyTransport};

#[derive(Clone)]
pub struct MockTransport {
    delivered: Arc<Mutex<Vec<ReplyPayload>>>,
    fail: bool,
}

impl MockTransport {
    /// A transport that records every delivery and always succeeds.
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A transport that rejects every delivery, recording nothing.
    pub fn failing() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Handle to the recorded payloads, usable after the transport has
    /// been moved into a gateway.
    pub fn deliveries_handle(&self) -> Arc<Mutex<Vec<ReplyPayload>>> {
        self.delivered.clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyTransport for MockTransport {
    async fn deliver(&self, payload: &ReplyPayload) -> anyhow::Result<()> {
        if self.fail {
            return Err(anyhow!("simulated network failure"));
        }
        self.delivered.lock().push(payload.clone());
        Ok(())
    }
}
