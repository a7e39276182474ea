//! Implements the host-memory backend for the remote arena.
//!
//! This is the backend you get without an accelerator: "remote" buffers are
//! ordinary host heap allocations. It exists for two reasons. First, it is
//! the reference implementation the test suite builds mirrors against:
//! because its addresses are host-valid, a test can reconstitute every
//! [`RemoteSlice`] and compare the mirrored bytes to the source. Second, it
//! lets the rest of the solver run unmodified on machines where the device
//! backend (see the `plugin/` directory) isn't available.

use meshmirror_nostd_internal::{ArenaError, DeviceCopy, RemoteArena, RemoteSlice};
use std::any::Any;

/// A [`RemoteArena`] whose "remote" address space is host memory.
///
/// Each reservation copies the source into a fresh boxed slice and keeps
/// that allocation alive until the arena is dropped, so handed-out addresses
/// stay valid for the arena's whole lifetime (boxed slices never move once
/// created).
#[derive(Default)]
pub struct HostArena {
    reservations: Vec<Box<dyn Any>>,
}

impl HostArena {
    pub fn new() -> Self {
        HostArena {
            reservations: Vec::new(),
        }
    }

    /// number of reservations currently kept alive (zero-length
    /// reservations allocate nothing and aren't counted)
    pub fn live_reservations(&self) -> usize {
        self.reservations.len()
    }
}

impl RemoteArena for HostArena {
    // host allocation failure aborts the process rather than returning, so
    // this implementation never actually produces an ArenaError; the
    // signature stays fallible because callers must handle backends where
    // the target space genuinely runs out
    fn reserve_from_slice<T: DeviceCopy + Copy + 'static>(
        &mut self,
        src: &[T],
    ) -> Result<RemoteSlice<T>, ArenaError> {
        if src.is_empty() {
            return Ok(RemoteSlice::empty());
        }
        let copy: Box<[T]> = src.to_vec().into_boxed_slice();
        let handle = RemoteSlice::from_raw_parts(copy.as_ptr(), copy.len());
        self.reservations.push(Box::new(copy));
        Ok(handle)
    }
}
