//! Cross-thread style changes.
//!
//! The pad itself is single-threaded. The background color may be set from
//! other threads; those writes are posted here and applied when the owning
//! thread calls [`crate::SignaturePad::process_pending`].

use crate::color::SerializableColor;
use crate::error::{SignatureError, SignatureResult};
use peniko::Color;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

/// A change waiting to be applied on the pad's thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingChange {
    BackgroundColor(SerializableColor),
}

/// Sendable handle for setting the background color from any thread.
#[derive(Debug, Clone)]
pub struct BackgroundColorHandle {
    tx: Sender<PendingChange>,
}

impl BackgroundColorHandle {
    /// Queue a new background color for the pad.
    pub fn set(&self, color: Color) -> SignatureResult<()> {
        self.tx
            .send(PendingChange::BackgroundColor(color.into()))
            .map_err(|_| SignatureError::Disconnected)
    }
}

/// Receiving side, owned by the pad.
#[derive(Debug)]
pub(crate) struct PendingQueue {
    tx: Sender<PendingChange>,
    rx: Receiver<PendingChange>,
}

impl PendingQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    pub(crate) fn handle(&self) -> BackgroundColorHandle {
        BackgroundColorHandle {
            tx: self.tx.clone(),
        }
    }

    /// Take everything posted so far without blocking.
    pub(crate) fn drain(&self) -> Vec<PendingChange> {
        let mut changes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(change) => changes.push(change),
                Err(TryRecvError::Empty) => break,
                // The queue holds its own sender, so this never happens while it lives.
                Err(TryRecvError::Disconnected) => break,
            }
        }
        changes
    }
}
