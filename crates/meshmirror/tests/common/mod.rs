// the reason this is named mod.rs has to do with some complexities of how
// testing is handled
//
// we are following the advice of the rust book
// https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests

use meshmirror::{
    CellConnectivity, CellGeometry, CellState, Domain, DomainMesh, FacetAdjacency, GeneralPlane,
    Vector3,
};
use ndarray::Array2;
use rand::distr::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

/// Deterministically generate one host domain.
///
/// Cells cycle through three shapes so every fixture exercises
/// heterogeneous per-cell counts: shape k has `4 + 2k` points and
/// `6 + 3k` facets (with one geometry plane per facet).
pub fn sample_domain(seed: u64, domain_index: i32, n_cells: usize, n_groups: usize) -> Domain {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let coord_dist = Uniform::new(-10.0_f64, 10.0).unwrap();
    let xs_dist = Uniform::new(0.0_f64, 5.0).unwrap();
    let vol_dist = Uniform::new(0.1_f64, 2.0).unwrap();

    let n_nodes = 8 + 2 * n_cells;
    let node: Vec<Vector3> = (0..n_nodes)
        .map(|_| {
            Vector3::new(
                coord_dist.sample(&mut rng),
                coord_dist.sample(&mut rng),
                coord_dist.sample(&mut rng),
            )
        })
        .collect();
    let node_idx_dist = Uniform::try_from(0..n_nodes as i32).unwrap();

    // cached cross sections as one cells x groups table
    let totals = Array2::from_shape_fn((n_cells, n_groups), |_| xs_dist.sample(&mut rng));

    let cell_state: Vec<CellState> = (0..n_cells)
        .map(|c| CellState {
            total: totals.row(c).to_vec(),
            volume: vol_dist.sample(&mut rng),
            cell_number_density: vol_dist.sample(&mut rng),
            id: (domain_index as u64) << 32 | c as u64,
            material: (c % 4) as i32,
            source_tally: 0,
        })
        .collect();

    let cell_connectivity: Vec<CellConnectivity> = (0..n_cells)
        .map(|c| {
            let shape = c % 3;
            let num_points = 4 + 2 * shape;
            let num_facets = 6 + 3 * shape;
            let points: Vec<i32> = (0..num_points)
                .map(|_| node_idx_dist.sample(&mut rng))
                .collect();
            let facets: Vec<FacetAdjacency> = (0..num_facets)
                .map(|f| FacetAdjacency {
                    event: (f % 3) as i32,
                    adjacent_cell: ((c + f) % n_cells) as i32,
                    adjacent_facet: (f % num_facets) as i32,
                    adjacent_domain: domain_index,
                    neighbor_index: f as i32,
                    points: [
                        (f % num_points) as i32,
                        ((f + 1) % num_points) as i32,
                        ((f + 2) % num_points) as i32,
                    ],
                })
                .collect();
            CellConnectivity { points, facets }
        })
        .collect();

    let cell_geometry: Vec<CellGeometry> = (0..n_cells)
        .map(|c| {
            let num_facets = 6 + 3 * (c % 3);
            let planes: Vec<GeneralPlane> = (0..num_facets)
                .map(|_| {
                    GeneralPlane::new(
                        coord_dist.sample(&mut rng),
                        coord_dist.sample(&mut rng),
                        coord_dist.sample(&mut rng),
                        coord_dist.sample(&mut rng),
                    )
                })
                .collect();
            CellGeometry { planes }
        })
        .collect();

    Domain {
        domain_index,
        global_domain: 100 + domain_index,
        cell_state,
        mesh: DomainMesh {
            domain_gid: 100 + domain_index,
            nbr_domain_gid: vec![101 + domain_index, 102 + domain_index],
            nbr_rank: vec![domain_index + 1, domain_index + 2],
            node,
            cell_connectivity,
            cell_geometry,
        },
    }
}

/// one domain per entry of `cell_counts`, all from one seeded stream
pub fn sample_domains(seed: u64, cell_counts: &[usize], n_groups: usize) -> Vec<Domain> {
    cell_counts
        .iter()
        .enumerate()
        .map(|(i, &n_cells)| sample_domain(seed.wrapping_add(i as u64), i as i32, n_cells, n_groups))
        .collect()
}
