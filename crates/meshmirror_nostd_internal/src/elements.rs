//! Plain-data element types stored inside mirrored arrays.
//!
//! These are the leaf records of the domain structure: once the builder has
//! reserved a remote buffer for an array of them, the bytes cross the
//! host/device boundary verbatim (nothing inside needs patching). They are
//! all `#[repr(C)]` so host and device agree on the layout.

#[cfg(feature = "cuda")]
use cust_core::DeviceCopy;

/// A node position in the mesh (3D Cartesian coordinates).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "cuda", derive(DeviceCopy))]
#[repr(C)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }
}

/// Adjacency record for one facet of a cell.
///
/// Describes what a particle crossing this facet encounters: the cell (and
/// facet of that cell) on the other side, which may belong to another
/// domain. `event` encodes the crossing kind (interior transit, boundary
/// condition, domain exit); the decomposition subsystem that builds these
/// owns the encoding, we only ferry it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cuda", derive(DeviceCopy))]
#[repr(C)]
pub struct FacetAdjacency {
    pub event: i32,
    pub adjacent_cell: i32,
    pub adjacent_facet: i32,
    pub adjacent_domain: i32,
    pub neighbor_index: i32,
    /// the three mesh points spanning the facet, as indices into the cell's
    /// point list
    pub points: [i32; 3],
}

/// One facet's geometric plane, in `a*x + b*y + c*z + d = 0` form.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "cuda", derive(DeviceCopy))]
#[repr(C)]
pub struct GeneralPlane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl GeneralPlane {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        GeneralPlane { a, b, c, d }
    }
}
