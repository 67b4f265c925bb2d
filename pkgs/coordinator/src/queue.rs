//! The `availableSolvers` blocking queue (§4.9): a pool of worker indices
//! ready to take the next cube, consumed by the dispatch thread and
//! replenished by the listener as workers finish.

use crossbeam_channel::{unbounded, Receiver, Sender};
use panoramyx_core::PanoramyxError;
use parking_lot::Mutex;

/// A blocking multi-producer, multi-consumer pool of worker indices.
/// `clear()` discards every pending entry and makes every future `get()`
/// fail with [`PanoramyxError::QueueClosed`] once drained, matching the
/// "no-more-elements" error kind raised when the coordinator clears the
/// pool after a SAT event (`spec.md` §7 item 3).
pub struct AvailableSolvers {
    channel: Mutex<(Sender<usize>, Receiver<usize>)>,
}

impl AvailableSolvers {
    pub fn new() -> Self {
        Self {
            channel: Mutex::new(unbounded()),
        }
    }

    pub fn add(&self, worker_index: usize) {
        let (sender, _) = &*self.channel.lock();
        let _ = sender.send(worker_index);
    }

    /// Blocks until a worker is available, or returns
    /// [`PanoramyxError::QueueClosed`] once the pool has been cleared and
    /// closed.
    pub fn get(&self) -> Result<usize, PanoramyxError> {
        let receiver = self.channel.lock().1.clone();
        receiver.recv().map_err(|_| PanoramyxError::QueueClosed)
    }

    /// Drops every pending entry and replaces the channel with one that is
    /// already disconnected, so any thread currently blocked in `get()`
    /// observes disconnection and returns `QueueClosed`. The pool stays
    /// closed from then on: this run is over.
    pub fn clear(&self) {
        let mut channel = self.channel.lock();
        while channel.1.try_recv().is_ok() {}
        // Each half below is paired with a receiver/sender that is
        // immediately dropped, so both the stored sender and the stored
        // receiver are dead ends on their own: `add` silently no-ops and
        // `get` fails immediately, which is exactly the terminal state we
        // want.
        let (dead_sender, _) = unbounded();
        let (_, dead_receiver) = unbounded();
        *channel = (dead_sender, dead_receiver);
    }
}

impl Default for AvailableSolvers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn add_then_get_round_trips_a_worker_index() {
        let pool = AvailableSolvers::new();
        pool.add(3);
        assert_eq!(pool.get().unwrap(), 3);
    }

    #[test]
    fn clearing_unblocks_a_pending_get_with_queue_closed() {
        let pool = Arc::new(AvailableSolvers::new());
        let waiter = Arc::clone(&pool);
        let handle = thread::spawn(move || waiter.get());
        thread::sleep(Duration::from_millis(20));
        pool.clear();
        assert!(matches!(handle.join().unwrap(), Err(PanoramyxError::QueueClosed)));
    }
}
