//! Device-resident descriptors of the host domain model.
//!
//! Each packet is the address-space-translated counterpart of one level of
//! the host structure: every `Vec<T>` of the host model shows up here as a
//! [`RemoteSlice<T>`], i.e. a remote address with its element count recorded
//! alongside (the remote space has no implicit bounds metadata).
//!
//! Packets are plain `Copy` data. That's load-bearing twice over: the
//! builder stages arrays of them in host memory before reserving the staged
//! array as one more remote buffer, and kernels receive the root packet
//! slice by value and walk the nested handles with no host round-trip.
//!
//! Field layouts mirror the host structs one-to-one so that a kernel
//! iterating cell index `j` sees the same cell in `cell_state`,
//! `cell_connectivity` and `cell_geometry` that the host saw at index `j`.

use crate::elements::{FacetAdjacency, GeneralPlane, Vector3};
use crate::remote::RemoteSlice;

#[cfg(feature = "cuda")]
use cust_core::DeviceCopy;

/// Mirror of one cell's physical state.
///
/// The scalar fields cross over verbatim; only `total` (the cached
/// macroscopic cross section per energy group) needed its address patched.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "cuda", derive(DeviceCopy))]
#[repr(C)]
pub struct CellStatePacket {
    /// one cached cross-section total per energy group
    pub total: RemoteSlice<f64>,
    pub volume: f64,
    pub cell_number_density: f64,
    pub id: u64,
    pub material: i32,
    pub source_tally: i32,
}

/// Mirror of one cell's connectivity: which mesh points it uses and what
/// lies on the other side of each facet. Both arrays are per-cell
/// variable-length.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "cuda", derive(DeviceCopy))]
#[repr(C)]
pub struct CellConnectivityPacket {
    pub points: RemoteSlice<i32>,
    pub facets: RemoteSlice<FacetAdjacency>,
}

/// Mirror of one cell's bounding geometry.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "cuda", derive(DeviceCopy))]
#[repr(C)]
pub struct CellGeometryPacket {
    pub planes: RemoteSlice<GeneralPlane>,
}

/// Mirror of a domain's mesh.
///
/// `nbr_domain_gid` from the host mesh deliberately has no counterpart
/// here: the tracking kernels only ever need the neighbor *ranks*.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "cuda", derive(DeviceCopy))]
#[repr(C)]
pub struct MeshPacket {
    pub domain_gid: i32,
    pub nbr_rank: RemoteSlice<i32>,
    pub node: RemoteSlice<Vector3>,
    pub cell_connectivity: RemoteSlice<CellConnectivityPacket>,
    pub cell_geometry: RemoteSlice<CellGeometryPacket>,
}

/// Mirror of one domain: the root descriptor handed to kernels.
///
/// Cell-indexed arrays preserve host iteration order exactly, so
/// `cell_state`, `mesh.cell_connectivity` and `mesh.cell_geometry` share a
/// cell index space with each other and with the host originals.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "cuda", derive(DeviceCopy))]
#[repr(C)]
pub struct DomainPacket {
    pub domain_index: i32,
    pub global_domain: i32,
    pub cell_state: RemoteSlice<CellStatePacket>,
    pub mesh: MeshPacket,
}

impl DomainPacket {
    /// number of cells in the mirrored domain (readable without touching
    /// remote memory)
    pub fn cell_count(&self) -> usize {
        self.cell_state.len()
    }
}
