use hungarian_matching::{hungarian, BipartiteGraph};
use tracing_subscriber::EnvFilter;

fn main() -> hungarian_matching::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    #[rustfmt::skip]
    let costs = nalgebra::Matrix5::from_row_slice(
        &[
             6.,  7.,  8., 14.,  7.,
             8., 14.,  6.,  9.,  7.,
            14., 14., 13.,  9., 11.,
             5., 12., 10.,  9., 14.,
             6., 10.,  8., 10., 15.,
        ]
    );
    println!("costs:{costs}");

    let mut reduced = costs;
    hungarian_matching::initial_reduce(&mut reduced);
    println!("reduced:{reduced}");
    println!("tight edges:\n{}", BipartiteGraph::from_tight_entries(&reduced)?);

    let assignment = hungarian(&costs)?;
    println!("assignment: {}", assignment.matching());
    println!("total: {}", assignment.total_cost());
    Ok(())
}
