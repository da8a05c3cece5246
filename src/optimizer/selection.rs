use crate::population::Population;

/// Sets each tour's probability and sampling count from the fitness total.
///
/// `count = floor(p * P) + 1`, so every tour keeps at least one slot in the
/// breeding pool. A zero total means no tour is favoured.
pub fn assign_sampling_counts(population: &mut Population, total_fitness: f64) {
    let size = population.len() as f64;
    for tour in population.iter_mut() {
        tour.probability = if total_fitness > 0.0 {
            tour.fitness / total_fitness
        } else {
            0.0
        };
        tour.sampling_count = (tour.probability * size).floor() as usize + 1;
    }
}

/// Breeding pool as population indices, each repeated by its sampling count.
pub fn breeding_pool(population: &Population) -> Vec<usize> {
    population
        .iter()
        .enumerate()
        .flat_map(|(i, t)| std::iter::repeat(i).take(t.sampling_count))
        .collect()
}
