use hungarian_matching::{max_cardinality_matching, perfect_matching, BipartiteGraph, Error};
use tracing_subscriber::EnvFilter;

fn main() -> hungarian_matching::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let graph = BipartiteGraph::new(
        5,
        vec![vec![0, 1], vec![0, 4], vec![1, 2, 3], vec![1, 2, 4], vec![0, 4]],
    )?;
    println!("graph:\n{graph}");
    println!("perfect matching: {}", perfect_matching(&graph)?);

    let deficient = BipartiteGraph::new(3, vec![vec![0, 1], vec![0], vec![1]])?;
    println!("graph:\n{deficient}");
    println!("maximum matching: {}", max_cardinality_matching(&deficient)?);
    match perfect_matching(&deficient) {
        Err(err @ Error::PerfectMatchingNotExists { .. }) => println!("{err}"),
        other => println!("unexpected: {other:?}"),
    }
    Ok(())
}
