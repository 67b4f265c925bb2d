//! In-process transport: logical "ranks" are threads sharing one address
//! space, and messages travel over per-`(tag, src)` mailboxes rather than
//! real sockets.
//!
//! Grounded directly on the original thread-based network implementation:
//! each destination owns a lazily-created queue per `(tag, src)` pair,
//! guarded by a mutex only while the queue itself is being looked up or
//! created — never while blocking on it, which would deadlock a
//! same-process send/receive pair. Wildcard tag/source is not supported
//! here (`spec.md` §9(b)), matching the original's own limitation.

use crate::{Transport, ANY_SOURCE, ANY_TAG};
use crossbeam_channel::{unbounded, Receiver, Sender};
use panoramyx_codec::Frame;
use panoramyx_core::PanoramyxError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

type MailboxKey = (i16, i32);
type Mailbox = HashMap<MailboxKey, (Sender<Frame>, Receiver<Frame>)>;

struct Shared {
    size: i32,
    mailboxes: Vec<Mutex<Mailbox>>,
}

/// Owns the mailboxes shared by every logical process and spawns the
/// threads that play their role.
pub struct ThreadTransportGroup {
    shared: Arc<Shared>,
}

impl ThreadTransportGroup {
    pub fn new(num_processes: i32) -> Self {
        assert!(num_processes > 0, "a transport needs at least one process");
        let mailboxes = (0..num_processes).map(|_| Mutex::new(HashMap::new())).collect();
        Self {
            shared: Arc::new(Shared {
                size: num_processes,
                mailboxes,
            }),
        }
    }

    pub fn handle(&self, id: i32) -> ThreadTransportHandle {
        assert!(id >= 0 && id < self.shared.size, "rank out of range");
        ThreadTransportHandle {
            shared: self.shared.clone(),
            id,
        }
    }

    /// Spawns one thread per process, each running a clone of
    /// `entry_point` with its own [`ThreadTransportHandle`].
    pub fn start<F>(&self, entry_point: F) -> Vec<JoinHandle<()>>
    where
        F: Fn(ThreadTransportHandle) + Send + Clone + 'static,
    {
        (0..self.shared.size)
            .map(|id| {
                let handle = self.handle(id);
                let entry_point = entry_point.clone();
                std::thread::Builder::new()
                    .name(format!("panoramyx-worker-{id}"))
                    .spawn(move || entry_point(handle))
                    .expect("failed to spawn worker thread")
            })
            .collect()
    }
}

/// One logical process's view of a [`ThreadTransportGroup`].
#[derive(Clone)]
pub struct ThreadTransportHandle {
    shared: Arc<Shared>,
    id: i32,
}

impl ThreadTransportHandle {
    fn mailbox_channel(&self, owner: i32, key: MailboxKey) -> (Sender<Frame>, Receiver<Frame>) {
        let mut mailbox = self.shared.mailboxes[owner as usize].lock();
        mailbox.entry(key).or_insert_with(unbounded).clone()
    }
}

impl Transport for ThreadTransportHandle {
    fn id(&self) -> i32 {
        self.id
    }

    fn size(&self) -> i32 {
        self.shared.size
    }

    fn send(&self, mut frame: Frame, dest: i32) -> Result<(), PanoramyxError> {
        if frame.tag == ANY_TAG {
            return Err(PanoramyxError::WildcardUnsupported);
        }
        frame.src = self.id;
        let key = (frame.tag, frame.src);
        let (sender, _) = self.mailbox_channel(dest, key);
        sender
            .send(frame)
            .map_err(|_| PanoramyxError::QueueClosed)
    }

    fn receive(&self, tag: i16, src: i32) -> Result<Frame, PanoramyxError> {
        if tag == ANY_TAG || src == ANY_SOURCE {
            return Err(PanoramyxError::WildcardUnsupported);
        }
        let (_, receiver) = self.mailbox_channel(self.id, (tag, src));
        receiver.recv().map_err(|_| PanoramyxError::QueueClosed)
    }

    fn finalize(&self) {
        log::debug!("thread transport handle {} finalized", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panoramyx_codec::MessageBuilder;

    #[test]
    fn send_then_receive_round_trips_and_stamps_src() {
        let group = ThreadTransportGroup::new(2);
        let h0 = group.handle(0);
        let h1 = group.handle(1);

        let frame = MessageBuilder::new().with_tag(9).with_int(42).build();
        h0.send(frame, 1).unwrap();

        let received = h1.receive(9, 0).unwrap();
        assert_eq!(received.src, 0);
        assert_eq!(received.tag, 9);
    }

    #[test]
    fn wildcard_source_is_rejected() {
        let group = ThreadTransportGroup::new(1);
        let h0 = group.handle(0);
        assert!(matches!(
            h0.receive(1, ANY_SOURCE),
            Err(PanoramyxError::WildcardUnsupported)
        ));
    }

    #[test]
    fn distinct_tags_do_not_interfere() {
        let group = ThreadTransportGroup::new(2);
        let h0 = group.handle(0);
        let h1 = group.handle(1);

        h0.send(MessageBuilder::new().with_tag(1).with_int(1).build(), 1)
            .unwrap();
        h0.send(MessageBuilder::new().with_tag(2).with_int(2).build(), 1)
            .unwrap();

        assert_eq!(h1.receive(2, 0).unwrap().tag, 2);
        assert_eq!(h1.receive(1, 0).unwrap().tag, 1);
    }
}
