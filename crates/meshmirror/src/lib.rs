/*!
Builds self-contained device-resident mirrors of the spatial domains used by
a particle-transport solver.

The host side of the solver owns a tree of variable-length arrays: domains,
each with a mesh (nodes, per-cell connectivity, per-cell geometry) and
per-cell physical state (cached cross sections, one per energy group). A
compute kernel can't follow host pointers, so before tracking starts the
whole tree has to be rebuilt in the accelerator's address space with every
embedded pointer rewritten to an address that is valid *there*, and with an
explicit element count recorded next to every address (device arrays carry
no bounds metadata of their own).

[`DomainMirror::build`] does exactly that, bottom-up: leaf arrays first,
then each parent level with its children's device handles already patched
in, finishing with a single transfer of the patched descriptor array. The
walk aborts on the first allocation or copy failure and releases everything
it reserved; a half-built mirror with addresses indistinguishable from
valid ones is strictly worse than no mirror.

Which address space the mirror lands in is abstracted behind
[`RemoteArena`]: [`HostArena`] builds the same structure in host memory (the
reference backend, also what the tests use), and the `plugin/` directory of
this repository provides the CUDA-backed arena plus kernels that walk the
mirrored structure on the device.

# Developer Guide

See the crate-level documentation of [`meshmirror_nostd_internal`] for the
split between the two crates.

*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the modules in this package
mod build;
mod domain;
mod error;
mod host_arena;

// pull in the symbols that are visible outside of the package
pub use build::DomainMirror;
pub use domain::{CellConnectivity, CellGeometry, CellState, Domain, DomainMesh};
pub use error::Error;
pub use host_arena::HostArena;
pub use meshmirror_nostd_internal::{
    ArenaError, ArenaErrorKind, CellConnectivityPacket, CellGeometryPacket, CellStatePacket,
    DeviceCopy, DomainPacket, FacetAdjacency, GeneralPlane, MeshPacket, RemoteArena, RemoteSlice,
    ReplicateToDevice, Vector3,
};
