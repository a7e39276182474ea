//! The device-residency mirror builder.
//!
//! [`DomainMirror::build`] walks the host domain model bottom-up and rebuilds
//! it, level by level, in the address space of a [`RemoteArena`]:
//!
//! 1. for each cell, reserve remote buffers for the cell's leaf arrays
//!    (energy totals, point indices, facet adjacency, geometry planes);
//! 2. record the resulting handles in a host-side staging copy of the
//!    per-cell array, then reserve the whole patched staging array as one
//!    more remote buffer;
//! 3. repeat one level up until the domain descriptors themselves have been
//!    patched and copied across in a single final transfer.
//!
//! The ordering is not a convention we have to remember: a parent packet can
//! only be constructed from its children's already-reserved handles (see
//! [`ReplicateToDevice`]), so copying a parent before its children simply
//! doesn't typecheck. Copying parent-before-child would embed a host (or
//! uninitialized) address into remote memory, which a kernel could not tell
//! apart from a valid one.
//!
//! Every reservation is fallible. The first failure aborts the whole build:
//! there is no partial mirror, no retry. The arena (which owns every buffer
//! reserved so far) is dropped on the error path, so an aborted build
//! releases everything it touched.

use crate::domain::{CellConnectivity, CellGeometry, CellState, Domain, DomainMesh};
use crate::error::Error;
use log::{debug, trace};
use meshmirror_nostd_internal::{
    ArenaError, CellConnectivityPacket, CellGeometryPacket, CellStatePacket, DomainPacket,
    MeshPacket, RemoteArena, RemoteSlice, ReplicateToDevice,
};
use std::num::NonZeroUsize;

impl ReplicateToDevice for CellState {
    type Packet = CellStatePacket;

    fn replicate<A: RemoteArena>(&self, arena: &mut A) -> Result<CellStatePacket, ArenaError> {
        let total = arena
            .reserve_from_slice(&self.total)
            .map_err(|e| e.at_stage("cell-state energy totals"))?;
        Ok(CellStatePacket {
            total,
            volume: self.volume,
            cell_number_density: self.cell_number_density,
            id: self.id,
            material: self.material,
            source_tally: self.source_tally,
        })
    }
}

impl ReplicateToDevice for CellConnectivity {
    type Packet = CellConnectivityPacket;

    fn replicate<A: RemoteArena>(
        &self,
        arena: &mut A,
    ) -> Result<CellConnectivityPacket, ArenaError> {
        // the two arrays are reserved independently; each carries its own
        // per-cell length
        let points = arena
            .reserve_from_slice(&self.points)
            .map_err(|e| e.at_stage("connectivity point indices"))?;
        let facets = arena
            .reserve_from_slice(&self.facets)
            .map_err(|e| e.at_stage("connectivity facet adjacency"))?;
        Ok(CellConnectivityPacket { points, facets })
    }
}

impl ReplicateToDevice for CellGeometry {
    type Packet = CellGeometryPacket;

    fn replicate<A: RemoteArena>(&self, arena: &mut A) -> Result<CellGeometryPacket, ArenaError> {
        let planes = arena
            .reserve_from_slice(&self.planes)
            .map_err(|e| e.at_stage("geometry planes"))?;
        Ok(CellGeometryPacket { planes })
    }
}

impl ReplicateToDevice for DomainMesh {
    type Packet = MeshPacket;

    fn replicate<A: RemoteArena>(&self, arena: &mut A) -> Result<MeshPacket, ArenaError> {
        // per-cell connectivity: replicate every cell, staging the patched
        // records on the host, then ship the staged array in one copy
        let mut connectivity_staging = Vec::with_capacity(self.cell_connectivity.len());
        for cell in self.cell_connectivity.iter() {
            connectivity_staging.push(cell.replicate(arena)?);
        }
        let cell_connectivity = arena
            .reserve_from_slice(&connectivity_staging)
            .map_err(|e| e.at_stage("connectivity cell array"))?;

        // same pattern for geometry, with a single variable array per cell
        let mut geometry_staging = Vec::with_capacity(self.cell_geometry.len());
        for cell in self.cell_geometry.iter() {
            geometry_staging.push(cell.replicate(arena)?);
        }
        let cell_geometry = arena
            .reserve_from_slice(&geometry_staging)
            .map_err(|e| e.at_stage("geometry cell array"))?;

        // the flat top-level arrays need no staging pass
        let node = arena
            .reserve_from_slice(&self.node)
            .map_err(|e| e.at_stage("mesh nodes"))?;
        let nbr_rank = arena
            .reserve_from_slice(&self.nbr_rank)
            .map_err(|e| e.at_stage("neighbor ranks"))?;

        // nbr_domain_gid stays host-side only
        Ok(MeshPacket {
            domain_gid: self.domain_gid,
            nbr_rank,
            node,
            cell_connectivity,
            cell_geometry,
        })
    }
}

impl ReplicateToDevice for Domain {
    type Packet = DomainPacket;

    fn replicate<A: RemoteArena>(&self, arena: &mut A) -> Result<DomainPacket, ArenaError> {
        let mut cell_state_staging = Vec::with_capacity(self.cell_state.len());
        for cell in self.cell_state.iter() {
            cell_state_staging.push(cell.replicate(arena)?);
        }
        let cell_state = arena
            .reserve_from_slice(&cell_state_staging)
            .map_err(|e| e.at_stage("cell-state array"))?;

        let mesh = self.mesh.replicate(arena)?;

        Ok(DomainPacket {
            domain_index: self.domain_index,
            global_domain: self.global_domain,
            cell_state,
            mesh,
        })
    }
}

/// check the invariants the builder refuses to take on trust (see the
/// crate-level discussion of the validation decision)
fn validate(domains: &[Domain], num_energy_groups: NonZeroUsize) -> Result<(), Error> {
    let n_groups = num_energy_groups.get();
    for (i, domain) in domains.iter().enumerate() {
        let n_cells = domain.cell_state.len();
        let n_connectivity = domain.mesh.cell_connectivity.len();
        let n_geometry = domain.mesh.cell_geometry.len();
        if (n_connectivity != n_cells) || (n_geometry != n_cells) {
            return Err(Error::cell_count_mismatch(
                i,
                n_cells,
                n_connectivity,
                n_geometry,
            ));
        }
        for (j, cell) in domain.cell_state.iter().enumerate() {
            if cell.total.len() != n_groups {
                return Err(Error::energy_group_len(i, j, n_groups, cell.total.len()));
            }
        }
    }
    Ok(())
}

/// A self-contained copy of the host domain model, resident in the address
/// space of its arena.
///
/// The mirror is the sole owner of every remote buffer reachable from its
/// descriptor array: the arena that reserved them lives inside the mirror,
/// and nothing else will reclaim them. Consumers (compute kernels, or host
/// code when the arena is a [`crate::HostArena`]) walk the structure through
/// [`DomainMirror::domains`] with no host mediation.
pub struct DomainMirror<A: RemoteArena> {
    arena: A,
    domains: RemoteSlice<DomainPacket>,
    num_energy_groups: NonZeroUsize,
}

impl<A: RemoteArena> DomainMirror<A> {
    /// Build the mirror of `domains` in `arena`'s address space.
    ///
    /// `num_energy_groups` is the simulation-wide energy-group count; every
    /// cell's cached cross-section array must have exactly that many
    /// entries, and the three cell-indexed sequences of each domain must
    /// agree on the cell count. Violations are hard errors: silently
    /// truncating or padding physics data is categorically worse than
    /// refusing to build.
    ///
    /// An empty `domains` slice is degenerate but valid: the result is a
    /// zero-count mirror.
    ///
    /// On the first reservation failure the build aborts; `arena` (and with
    /// it, every buffer reserved so far) is dropped before this function
    /// returns the error.
    pub fn build(
        mut arena: A,
        domains: &[Domain],
        num_energy_groups: NonZeroUsize,
    ) -> Result<Self, Error> {
        validate(domains, num_energy_groups)?;

        debug!(
            "mirroring {} domains ({} energy groups)",
            domains.len(),
            num_energy_groups
        );

        // host-side staging array for the domain descriptors; by the time it
        // is copied across, every address-valued field in it refers to the
        // remote space
        let mut staging = Vec::with_capacity(domains.len());
        for (i, domain) in domains.iter().enumerate() {
            trace!("replicating domain {} ({} cells)", i, domain.cell_count());
            staging.push(domain.replicate(&mut arena).map_err(Error::from_arena)?);
        }

        // the fully patched descriptor array crosses over in a single
        // transfer
        let root = arena
            .reserve_from_slice(&staging)
            .map_err(|e| Error::from_arena(e.at_stage("domain descriptor array")))?;

        Ok(DomainMirror {
            arena,
            domains: root,
            num_energy_groups,
        })
    }

    /// handle to the remote descriptor array (address + domain count)
    pub fn domains(&self) -> RemoteSlice<DomainPacket> {
        self.domains
    }

    /// number of mirrored domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// the energy-group count the mirror was built with (every mirrored
    /// cell's `total` array has this many entries)
    pub fn num_energy_groups(&self) -> NonZeroUsize {
        self.num_energy_groups
    }

    /// the arena owning every remote buffer of this mirror
    pub fn arena(&self) -> &A {
        &self.arena
    }

    /// Release every remote buffer the mirror owns.
    ///
    /// Equivalent to dropping the mirror; it exists so that teardown shows
    /// up as an operation in the caller's code rather than as an implicit
    /// scope end.
    pub fn release(self) {}
}
