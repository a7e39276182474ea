use meshmirror::{
    CellConnectivity, CellGeometry, CellState, Domain, DomainMesh, FacetAdjacency, GeneralPlane,
    Vector3,
};
use meshmirror_cuda::{ExecContext, exec_cell_total_sums, mirror_to_device};

use std::error::Error;
use std::num::NonZeroUsize;

const NUM_ENERGY_GROUPS: usize = 4;

/// a tiny two-cell domain so the demo output is easy to eyeball
fn demo_domain() -> Domain {
    let state = |tag: u64| CellState {
        total: (0..NUM_ENERGY_GROUPS)
            .map(|g| tag as f64 + g as f64)
            .collect(),
        volume: 1.0,
        cell_number_density: 0.5,
        id: tag,
        material: 0,
        source_tally: 0,
    };
    let connectivity = |tag: i32| CellConnectivity {
        points: vec![0, 1, 2, 3],
        facets: (0..6)
            .map(|f| FacetAdjacency {
                event: 0,
                adjacent_cell: 1 - tag,
                adjacent_facet: f,
                adjacent_domain: 0,
                neighbor_index: f,
                points: [0, 1, 2],
            })
            .collect(),
    };
    let geometry = CellGeometry {
        planes: (0..6).map(|f| GeneralPlane::new(1.0, 0.0, 0.0, f as f64)).collect(),
    };
    Domain {
        domain_index: 0,
        global_domain: 0,
        cell_state: vec![state(1), state(10)],
        mesh: DomainMesh {
            domain_gid: 0,
            nbr_domain_gid: vec![],
            nbr_rank: vec![0],
            node: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(0.0, 0.0, 1.0),
            ],
            cell_connectivity: vec![connectivity(0), connectivity(1)],
            cell_geometry: vec![geometry.clone(), geometry],
        },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // the context must exist before the arena allocates anything
    let exec_context = ExecContext::new()?;

    let domains = vec![demo_domain()];
    let mirror = mirror_to_device(&domains, NonZeroUsize::new(NUM_ENERGY_GROUPS).unwrap())?;

    let sums = exec_cell_total_sums(&exec_context, &mirror, 0, domains[0].cell_count())?;
    for (cell, sum) in sums.iter().enumerate() {
        let host_sum: f64 = domains[0].cell_state[cell].total.iter().sum();
        println!("cell {cell}: device sum = {sum}, host sum = {host_sum}");
    }

    mirror.release();
    Ok(())
}
