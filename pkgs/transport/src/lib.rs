//! Transport abstraction over tagged message passing (§4.1).
//!
//! The coordination layer never talks to sockets or MPI directly: every
//! send and receive goes through the [`Transport`] trait, so the exact
//! same coordinator and worker-loop code runs whether the "processes" are
//! threads sharing an address space ([`thread`]) or real MPI ranks
//! (`mpi`, behind the `mpi` feature).

pub mod thread;

#[cfg(feature = "mpi")]
pub mod mpi_backend;

use panoramyx_codec::Frame;
use panoramyx_core::PanoramyxError;

/// A destination or source that matches any rank. Only the MPI backend can
/// honor it; the thread backend rejects it (`spec.md` §9(b): its mailboxes
/// are indexed by a concrete `(tag, src)` pair).
pub const ANY_SOURCE: i32 = -1;
pub const ANY_TAG: i16 = -1;

/// A tagged point-to-point channel between a fixed number of logical
/// processes, numbered `0..size()`.
pub trait Transport: Send + Sync {
    /// This process's own rank.
    fn id(&self) -> i32;

    /// The total number of processes taking part.
    fn size(&self) -> i32;

    /// Sends `frame` to `dest`. The transport overwrites `frame.src` with
    /// this process's own id before putting it on the wire — callers never
    /// need to (and cannot reliably) set it themselves.
    fn send(&self, frame: Frame, dest: i32) -> Result<(), PanoramyxError>;

    /// Blocks until a frame tagged `tag` from `src` is available, then
    /// returns it. `src` must be a concrete rank for the thread backend.
    fn receive(&self, tag: i16, src: i32) -> Result<Frame, PanoramyxError>;

    /// Releases any transport-level resources. Idempotent.
    fn finalize(&self);
}
