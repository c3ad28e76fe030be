//! Greedy and LP-rounded correlation clustering on a small signed graph.

use corrclust::{CorrelationClustering, LpSolution};
use tracing_subscriber::EnvFilter;

fn main() -> corrclust::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Two friend groups {1, 2, 3} and {4, 5}, with one noisy "friendship" across.
    let vertices = [1, 2, 3, 4, 5];
    let positive = [(1, 2), (2, 3), (1, 3), (4, 5), (3, 4)];
    let negative = [(1, 4), (2, 5), (1, 5)];

    let cc = CorrelationClustering::new(vertices, positive, negative)?;
    let stats = cc.graph_stats();
    println!(
        "graph: {} vertices, {} positive / {} negative edges",
        stats.vertex_count, stats.positive_edge_count, stats.negative_edge_count
    );

    for (name, result) in [
        ("greedy (cluster pairs)", cc.greedy_cluster()),
        ("greedy (vertex pairs)", cc.simple_greedy_cluster()),
    ] {
        println!(
            "\n=== {name}: {} clusters, {} mistakes ===",
            result.cluster_count(),
            result.mistakes()
        );
        for (id, members) in cc.clusters_as_arrays(result.partition()) {
            println!("  cluster {id}: {members:?}");
        }
    }

    let lp = cc.formulate_lp();
    println!(
        "\n=== LP relaxation: {} variables, {} constraints ===",
        lp.variables().len(),
        lp.constraints().len()
    );

    // No solver ships with the crate; use the integral point of the greedy answer
    // as a stand-in solution.
    let greedy = cc.greedy_cluster();
    let solution: LpSolution = cc.lp().indicator_solution(greedy.partition())?;
    println!("  objective at greedy point: {}", lp.objective_value(&solution)?);

    let rounded = cc.interpret_solution(&solution)?;
    println!("  rounded mistakes: {}", cc.count_mistakes(&rounded)?);
    for (id, members) in cc.clusters_as_arrays(&rounded) {
        println!("  cluster {id}: {members:?}");
    }

    Ok(())
}
