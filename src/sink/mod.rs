//! Status sink adapter.
//!
//! The engine notifies a [`StatusSink`] on every state entry and never
//! learns whether the notification arrived. Fallible transports plug in
//! through [`BestEffort`], which swallows and logs their failures.

mod snapshot;

pub use snapshot::StatusSnapshot;

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::warn;

/// Fire-and-forget receiver of published status payloads.
pub trait StatusSink {
    fn publish(&mut self, topic: &str, payload: &[u8]);
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn publish(&mut self, _topic: &str, _payload: &[u8]) {}
}

/// One message as received by a [`MemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Published {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Published {
    pub fn snapshot(&self) -> Result<StatusSnapshot, serde_json::Error> {
        StatusSnapshot::from_payload(&self.payload)
    }
}

/// In-memory sink. Clones share one buffer, so a test can keep a handle
/// while the machine owns another.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<Published>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Published>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn messages(&self) -> Vec<Published> {
        self.lock().clone()
    }

    /// Decoded snapshots, skipping payloads that are not snapshots.
    pub fn snapshots(&self) -> Vec<StatusSnapshot> {
        self.lock()
            .iter()
            .filter_map(|message| message.snapshot().ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl StatusSink for MemorySink {
    fn publish(&mut self, topic: &str, payload: &[u8]) {
        self.lock().push(Published {
            topic: topic.to_string(),
            payload: payload.to_vec(),
        });
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport rejected message on '{topic}': {reason}")]
    Rejected { topic: String, reason: String },
}

/// A publish-subscribe transport that can fail.
pub trait Transport {
    fn send(&mut self, topic: &str, payload: &[u8]) -> Result<(), TransportError>;
}

/// Adapts a fallible [`Transport`] into a [`StatusSink`].
///
/// Failures are logged and counted, never retried and never reported to
/// the engine.
#[derive(Debug)]
pub struct BestEffort<T> {
    transport: T,
    dropped: u64,
}

impl<T: Transport> BestEffort<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            dropped: 0,
        }
    }

    /// Messages the transport failed to send.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> StatusSink for BestEffort<T> {
    fn publish(&mut self, topic: &str, payload: &[u8]) {
        if let Err(error) = self.transport.send(topic, payload) {
            self.dropped += 1;
            warn!(topic, %error, dropped = self.dropped, "status publish failed");
        }
    }
}

/// Transport writing one `topic payload` line per message.
#[derive(Debug)]
pub struct WriterTransport<W> {
    writer: W,
}

impl<W: Write> WriterTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for WriterTransport<W> {
    fn send(&mut self, topic: &str, payload: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(topic.as_bytes())?;
        self.writer.write_all(b" ")?;
        self.writer.write_all(payload)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
