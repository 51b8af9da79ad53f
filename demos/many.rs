use hungarian_matching::HungarianSolver;
use tracing_subscriber::EnvFilter;

const ASSIGNMENT_SIZE: usize = 64;
const N: usize = 100;

fn main() -> hungarian_matching::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let solver = HungarianSolver::default();
    let mut total_cost = 0.;
    let mut dual_adjustments = 0;
    for _ in 0..N {
        let costs = nalgebra::DMatrix::<f64>::new_random(ASSIGNMENT_SIZE, ASSIGNMENT_SIZE);
        let assignment = solver.solve(&costs)?;
        total_cost += assignment.assignment().map(|a| costs[a]).sum::<f64>();
        dual_adjustments += assignment.stats().dual_adjustments;
    }

    println!("total: {total_cost}");
    println!("dual adjustments: {dual_adjustments}");
    Ok(())
}
