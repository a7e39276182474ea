//! The innermost layer of the meshmirror package.
//!
//! This crate is `no_std` so that every type in it can also be compiled into
//! GPU kernel code (see the `plugin/` directory of this repository). It holds
//! the pieces that must be visible on both sides of the host/device boundary:
//!
//! - the target-address-space abstraction ([`RemoteArena`], [`RemoteSlice`])
//! - the plain-data element types stored inside mirrored arrays
//! - the "packet" types: device-resident descriptors in which every owned
//!   sequence of the host domain model has been replaced by an explicit
//!   address + count pair
//!
//! The host domain model itself (and the builder that produces the packets)
//! lives in the `meshmirror` crate, since it owns heap allocations.

#![no_std]

mod elements;
mod packet;
mod remote;

pub use elements::{FacetAdjacency, GeneralPlane, Vector3};
pub use packet::{
    CellConnectivityPacket, CellGeometryPacket, CellStatePacket, DomainPacket, MeshPacket,
};
pub use remote::{
    ArenaError, ArenaErrorKind, DeviceCopy, RemoteArena, RemoteSlice, ReplicateToDevice,
};
