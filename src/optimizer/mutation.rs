use crate::geometry::City;
use crate::population::Population;
use crate::stream::RngStream;
use crate::tour::Tour;
use fastrand::Rng;

/// Copy of `tour` with two uniformly drawn positions swapped.
/// Both draws may land on the same position.
pub fn swap_mutation(tour: &Tour, rng: &mut Rng) -> Tour {
    let mut mutant = tour.clone();
    if tour.is_empty() {
        return mutant;
    }
    let i = rng.usize(0..tour.len());
    let j = rng.usize(0..tour.len());
    mutant.swap_positions(i, j);
    mutant
}

/// Performs `count` mutation events against the current population.
pub fn mutate(population: &Population, count: usize, stream: &mut RngStream) -> Vec<Tour> {
    if population.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let mut rng = stream.draw();
            let source = &population.tours()[rng.usize(0..population.len())];
            swap_mutation(source, &mut rng)
        })
        .collect()
}

/// A uniformly shuffled copy of the city template.
pub fn shuffled_tour(template: &[City], rng: &mut Rng) -> Tour {
    let mut cities = template.to_vec();
    rng.shuffle(&mut cities);
    Tour::from_cities(cities)
}
