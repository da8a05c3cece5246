use crate::error::{TfResult, TourForgeError};
use crate::protocol::{MigrationEnvelope, MigrationTag};
use std::collections::HashMap;
use std::sync::{Condvar, Mutex};
use tracing::debug;

/// Point-to-point transport between node workers.
///
/// `receive` is a rendezvous: it blocks until the envelope tagged
/// `(rank, epoch)` arrives, whatever else is already queued.
pub trait Exchange: Send + Sync {
    fn send(&self, envelope: MigrationEnvelope) -> TfResult<()>;

    fn receive(&self, rank: usize, epoch: usize) -> TfResult<MigrationEnvelope>;

    /// Wakes every blocked receiver with an error. Called when a node fails.
    fn abort(&self);
}

#[derive(Default)]
struct Mailbox {
    slots: HashMap<MigrationTag, String>,
    aborted: bool,
}

/// In-process exchange: a tag-keyed mailbox behind a mutex.
///
/// Payloads are stored as JSON so both ends go through the same encoding a
/// network transport would use.
#[derive(Default)]
pub struct LocalExchange {
    mailbox: Mutex<Mailbox>,
    arrived: Condvar,
}

impl LocalExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of envelopes sent but not yet received.
    pub fn pending(&self) -> usize {
        self.mailbox.lock().map(|m| m.slots.len()).unwrap_or(0)
    }
}

impl Exchange for LocalExchange {
    fn send(&self, envelope: MigrationEnvelope) -> TfResult<()> {
        let tag = envelope.tag();
        let wire = serde_json::to_string(&envelope)?;

        let mut mailbox = self
            .mailbox
            .lock()
            .map_err(|e| TourForgeError::Protocol(e.to_string()))?;
        if mailbox.slots.insert(tag, wire).is_some() {
            return Err(TourForgeError::Protocol(format!(
                "second envelope for node {} at epoch {}",
                tag.target_rank, tag.epoch
            )));
        }
        debug!(
            from = envelope.sender_rank,
            to = tag.target_rank,
            epoch = tag.epoch,
            tours = envelope.tours.len(),
            "envelope sent"
        );
        self.arrived.notify_all();
        Ok(())
    }

    fn receive(&self, rank: usize, epoch: usize) -> TfResult<MigrationEnvelope> {
        let tag = MigrationTag {
            target_rank: rank,
            epoch,
        };
        let mut mailbox = self
            .mailbox
            .lock()
            .map_err(|e| TourForgeError::Protocol(e.to_string()))?;

        loop {
            if let Some(wire) = mailbox.slots.remove(&tag) {
                drop(mailbox);
                let envelope: MigrationEnvelope = serde_json::from_str(&wire).map_err(|e| {
                    TourForgeError::Protocol(format!("undecodable envelope: {}", e))
                })?;
                if envelope.tag() != tag {
                    return Err(TourForgeError::Protocol(format!(
                        "envelope for node {} epoch {} filed under node {} epoch {}",
                        envelope.target_rank, envelope.epoch, rank, epoch
                    )));
                }
                return Ok(envelope);
            }
            if mailbox.aborted {
                return Err(TourForgeError::Aborted(format!(
                    "exchange closed while node {} waited for epoch {}",
                    rank, epoch
                )));
            }
            mailbox = self
                .arrived
                .wait(mailbox)
                .map_err(|e| TourForgeError::Protocol(e.to_string()))?;
        }
    }

    fn abort(&self) {
        if let Ok(mut mailbox) = self.mailbox.lock() {
            mailbox.aborted = true;
        }
        self.arrived.notify_all();
    }
}
