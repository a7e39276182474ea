//! The host-resident domain model.
//!
//! These are the structures the domain-decomposition subsystem hands us: an
//! ordered collection of domains, each owning a mesh and one physical-state
//! record per mesh cell. The mirror builder only ever reads them; the one
//! mutating operation ([`Domain::clear_cross_section_cache`]) belongs to the
//! solver's setup phase, before any mirror is built.
//!
//! All sequence-owning fields are plain `Vec`s, so a declared count can
//! never disagree with the number of elements actually present. What *can*
//! disagree, and is therefore validated at mirror-build time, is the
//! cell-index parity between `cell_state`, `cell_connectivity` and
//! `cell_geometry`, and the per-cell cross-section length against the
//! domain-wide energy-group count.

use meshmirror_nostd_internal::{FacetAdjacency, GeneralPlane, Vector3};

/// Connectivity for a single cell.
///
/// Per-cell variable-length: a hexahedral cell and a degenerate boundary
/// cell in the same mesh will have different point and facet counts.
#[derive(Clone, Debug, PartialEq)]
pub struct CellConnectivity {
    /// indices into the mesh's node array
    pub points: Vec<i32>,
    /// one adjacency record per facet
    pub facets: Vec<FacetAdjacency>,
}

impl CellConnectivity {
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_facets(&self) -> usize {
        self.facets.len()
    }
}

/// Bounding geometry for a single cell: one plane per facet.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGeometry {
    pub planes: Vec<GeneralPlane>,
}

impl CellGeometry {
    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }
}

/// Physical state of a single cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellState {
    /// cached macroscopic cross-section total, one entry per energy group
    /// (the group count is a simulation-wide constant, not stored here)
    pub total: Vec<f64>,
    pub volume: f64,
    pub cell_number_density: f64,
    pub id: u64,
    pub material: i32,
    pub source_tally: i32,
}

/// The geometric/topological description of one domain.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainMesh {
    /// identifier of this domain in the global decomposition
    pub domain_gid: i32,
    /// global ids of neighboring domains (host bookkeeping; not mirrored)
    pub nbr_domain_gid: Vec<i32>,
    /// MPI-style rank owning each neighboring domain
    pub nbr_rank: Vec<i32>,
    pub node: Vec<Vector3>,
    /// per-cell connectivity, indexed by cell
    pub cell_connectivity: Vec<CellConnectivity>,
    /// per-cell geometry, indexed by cell
    pub cell_geometry: Vec<CellGeometry>,
}

/// One spatial partition of the simulated mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    pub domain_index: i32,
    pub global_domain: i32,
    /// per-cell physical state, indexed by cell (same index space as
    /// `mesh.cell_connectivity` / `mesh.cell_geometry`)
    pub cell_state: Vec<CellState>,
    pub mesh: DomainMesh,
}

impl Domain {
    /// Zero every cell's cached cross-section totals.
    ///
    /// The tracking phase treats a zero entry as "not yet computed", so this
    /// is how the solver invalidates the cache between cycles.
    pub fn clear_cross_section_cache(&mut self) {
        for cell in self.cell_state.iter_mut() {
            cell.total.fill(0.0);
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cell_state.len()
    }
}
