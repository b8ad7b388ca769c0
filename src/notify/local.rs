//! In-process notification bus

use super::Notifier;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, trace};

/// Messages buffered per peer before the oldest are dropped
const BUS_CAPACITY: usize = 64;

/// Broadcast channel shared by sessions in one process
#[derive(Debug)]
pub struct LocalBus {
    sender: broadcast::Sender<u64>,
    next_id: AtomicU64,
}

impl LocalBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender, next_id: AtomicU64::new(0) }
    }

    /// Register a new peer. It only sees notifications sent after joining.
    pub fn join(&self) -> LocalPeer {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(peer = id, "Peer joined local bus");
        LocalPeer { id, sender: self.sender.clone(), receiver: self.sender.subscribe() }
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new()
    }
}

/// One session's endpoint on a [`LocalBus`]
#[derive(Debug)]
pub struct LocalPeer {
    id: u64,
    sender: broadcast::Sender<u64>,
    receiver: broadcast::Receiver<u64>,
}

impl LocalPeer {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Notifier for LocalPeer {
    fn notify_peers(&self) {
        // Err only means nobody is subscribed, which cannot happen while self
        // holds a receiver.
        let _ = self.sender.send(self.id);
        trace!(peer = self.id, "Posted board update");
    }

    fn pending(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(sender) if sender == self.id => {}
                Ok(_) => count += 1,
                // Overwritten notifications still mean "re-read the board".
                Err(TryRecvError::Lagged(skipped)) => count += skipped as usize,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        count
    }
}
