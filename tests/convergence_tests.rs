mod common;

use common::unit_square;
use rstest::rstest;
use tourforge::config::RunParams;
use tourforge::optimizer::{GenerationSettings, Island, Optimizer, SilentProgress};
use tourforge::stream::RngStream;

fn square_params(seed: i32) -> RunParams {
    RunParams {
        population_size: 8,
        generations: 50,
        seed,
        ..Default::default()
    }
    .into_sequential()
}

fn is_perimeter_cycle(order: &[tourforge::geometry::City]) -> bool {
    (0..order.len()).all(|i| order[i].distance(&order[(i + 1) % order.len()]) == 1.0)
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(-77)]
#[case(2024)]
fn test_unit_square_converges_on_one_island(#[case] seed: i32) {
    let params = square_params(seed);
    let mut island = Island::new(
        &unit_square(),
        GenerationSettings::from(&params),
        RngStream::new(seed, 0, 1),
        0,
        0,
    );
    island.evolve(params.generations);

    let best = island.best().expect("island is never empty");
    assert_eq!(best.length(), 4.0);
    assert!(is_perimeter_cycle(best.cities()));
    assert_eq!(island.population.len(), 8);
}

#[test]
fn test_unit_square_through_the_optimizer() {
    let optimizer = Optimizer::new(unit_square(), square_params(3)).unwrap();
    let report = optimizer.run(&SilentProgress).unwrap();

    assert_eq!(report.best.length, 4.0);
    assert!(is_perimeter_cycle(&report.best.tour));
    assert_eq!(report.submissions.len(), 1);

    let mut order = report.best_order.clone();
    order.sort();
    assert_eq!(order, vec![0, 1, 2, 3]);
    assert!(report.cycle_string().ends_with(&format!("-> {}", report.best_order[0])));
}

#[test]
fn test_best_never_regresses_across_generations() {
    let cities = common::scatter(12, 9);
    let params = RunParams {
        population_size: 20,
        ..Default::default()
    };
    let mut island = Island::new(
        &cities,
        GenerationSettings::from(&params),
        RngStream::new(5, 0, 1),
        0,
        0,
    );

    let mut last = island.best().map(|t| t.length()).unwrap_or(f64::INFINITY);
    for _ in 0..30 {
        island.step();
        let now = island.best().map(|t| t.length()).unwrap_or(f64::INFINITY);
        assert!(now <= last, "best went from {} to {}", last, now);
        last = now;
    }
}
