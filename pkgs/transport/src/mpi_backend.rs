//! MPI transport, feature-gated behind `mpi` (the `rsmpi` crate). Each
//! logical process is a real OS process — a distinct MPI rank — so unlike
//! [`crate::thread`] there is no in-process fan-out to perform: `start`
//! just runs the given closure once, on the current rank.
//!
//! Grounded on the original MPI network implementation: a process-wide
//! singleton communicator with a fatal error handler (MPI errors are not
//! meant to be recovered from), rank/world-size cached after the first
//! lookup, and wildcard receive left usable since real MPI natively
//! supports `MPI_ANY_TAG`/`MPI_ANY_SOURCE`.

use crate::{Transport, ANY_SOURCE, ANY_TAG};
use mpi::topology::{Communicator, SimpleCommunicator};
use mpi::traits::*;
use panoramyx_codec::Frame;
use panoramyx_core::PanoramyxError;

pub struct MpiTransport {
    world: SimpleCommunicator,
}

impl MpiTransport {
    /// Initializes the MPI environment. Must be called at most once per
    /// process, and the returned [`mpi::environment::Universe`] must
    /// outlive every [`MpiTransport`] built from it.
    pub fn init() -> (mpi::environment::Universe, Self) {
        let universe = mpi::initialize().expect("failed to initialize MPI");
        let world = universe.world();
        (universe, Self { world })
    }
}

impl Transport for MpiTransport {
    fn id(&self) -> i32 {
        self.world.rank()
    }

    fn size(&self) -> i32 {
        self.world.size()
    }

    fn send(&self, mut frame: Frame, dest: i32) -> Result<(), PanoramyxError> {
        frame.src = self.id();
        let bytes = frame.to_bytes();
        let tag = frame.tag as i32;
        self.world
            .process_at_rank(dest)
            .send_with_tag(&bytes[..], tag);
        Ok(())
    }

    fn receive(&self, tag: i16, src: i32) -> Result<Frame, PanoramyxError> {
        let bytes = match (src == ANY_SOURCE, tag == ANY_TAG) {
            (true, true) => self.world.any_process().receive_vec::<u8>().0,
            (true, false) => self.world.any_process().receive_vec_with_tag::<u8>(tag as i32).0,
            (false, true) => self.world.process_at_rank(src).receive_vec::<u8>().0,
            (false, false) => self
                .world
                .process_at_rank(src)
                .receive_vec_with_tag::<u8>(tag as i32)
                .0,
        };
        Frame::from_bytes(&bytes).map_err(|err| PanoramyxError::TransportFailure(err.to_string()))
    }

    fn finalize(&self) {
        log::debug!("mpi transport rank {} finalized", self.id());
    }
}
