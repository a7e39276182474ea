use cuda_std::prelude::*;
use meshmirror_nostd_internal::{DomainPacket, RemoteSlice};

/// One thread per cell of the selected domain: sum the cell's cached
/// cross-section totals over all energy groups.
///
/// Everything this kernel touches comes from the mirror: the descriptor
/// array, the per-domain cell-state array and each cell's energy array are
/// all walked through device addresses, with no host round-trip.
#[kernel]
#[allow(improper_ctypes_definitions, clippy::missing_safety_doc)]
pub unsafe fn cell_total_sums(
    domains: RemoteSlice<DomainPacket>,
    domain_idx: usize,
    out: *mut f64,
) {
    let domains = unsafe { domains.as_slice() };
    if domain_idx >= domains.len() {
        return;
    }
    let cell_states = unsafe { domains[domain_idx].cell_state.as_slice() };

    let idx = thread::index_1d() as usize;
    if idx < cell_states.len() {
        let totals = unsafe { cell_states[idx].total.as_slice() };
        let mut sum = 0.0;
        for value in totals {
            sum += *value;
        }
        let elem = unsafe { &mut *out.add(idx) };
        *elem = sum;
    }
}

/// One thread per cell: count the facets reachable through the mirrored
/// connectivity records (exercises the deepest nesting level).
#[kernel]
#[allow(improper_ctypes_definitions, clippy::missing_safety_doc)]
pub unsafe fn cell_facet_counts(
    domains: RemoteSlice<DomainPacket>,
    domain_idx: usize,
    out: *mut u32,
) {
    let domains = unsafe { domains.as_slice() };
    if domain_idx >= domains.len() {
        return;
    }
    let connectivity = unsafe { domains[domain_idx].mesh.cell_connectivity.as_slice() };

    let idx = thread::index_1d() as usize;
    if idx < connectivity.len() {
        let facets = unsafe { connectivity[idx].facets.as_slice() };
        let elem = unsafe { &mut *out.add(idx) };
        *elem = facets.len() as u32;
    }
}
