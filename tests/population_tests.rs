mod common;

use common::unit_square;
use tourforge::population::Population;
use tourforge::tour::Tour;

#[test]
fn test_add_if_absent_twice_keeps_one() {
    let mut pop = Population::new();
    let a = Tour::from_cities(unit_square());

    let mut b = Tour::new();
    for c in unit_square() {
        b.add_city(c);
    }

    assert!(pop.add_if_absent(a));
    assert!(!pop.add_if_absent(b));
    assert_eq!(pop.len(), 1);
}

#[test]
fn test_contains_is_by_key_not_identity() {
    let mut pop = Population::new();
    pop.add_if_absent(Tour::from_cities(unit_square()));

    let mut lookalike = Tour::from_cities(unit_square());
    lookalike.fitness = 123.0;
    assert!(pop.contains(&lookalike));

    lookalike.swap_positions(0, 3);
    assert!(!pop.contains(&lookalike));
}

#[test]
fn test_best_and_worst() {
    let sq = unit_square();
    let crossed = Tour::from_cities(vec![sq[0], sq[2], sq[1], sq[3]]);
    let pop: Population = vec![crossed.clone(), Tour::from_cities(sq)]
        .into_iter()
        .collect();

    assert_eq!(pop.best().map(Tour::length), Some(4.0));
    assert_eq!(pop.worst_length(), Some(crossed.length()));
}
