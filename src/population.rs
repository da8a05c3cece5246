use crate::tour::Tour;

/// Tours owned by a single island, unique by canonical key.
#[derive(Debug, Clone, Default)]
pub struct Population {
    tours: Vec<Tour>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tours: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    #[inline]
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tour> {
        self.tours.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tour> {
        self.tours.iter_mut()
    }

    /// Canonical-key membership.
    pub fn contains(&self, tour: &Tour) -> bool {
        self.tours.iter().any(|t| t.same_order(tour))
    }

    /// Inserts `tour` unless an equal-key tour is already present.
    pub fn add_if_absent(&mut self, tour: Tour) -> bool {
        if self.contains(&tour) {
            return false;
        }
        self.tours.push(tour);
        true
    }

    /// Scores every tour as `max_len - len` and returns the total fitness.
    pub fn evaluate_fitness(&mut self) -> f64 {
        let max_len = self
            .tours
            .iter()
            .map(Tour::length)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut total = 0.0;
        for t in &mut self.tours {
            t.fitness = max_len - t.length();
            total += t.fitness;
        }
        total
    }

    /// Stable: equal-fitness tours keep their relative order.
    pub fn sort_by_fitness_descending(&mut self) {
        self.tours.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    /// Copies of the first `k` tours. Expects a sorted population.
    pub fn top_k(&self, k: usize) -> Vec<Tour> {
        self.tours.iter().take(k).cloned().collect()
    }

    /// Shortest tour, first one wins on ties.
    pub fn best(&self) -> Option<&Tour> {
        self.tours
            .iter()
            .reduce(|best, t| if t.length() < best.length() { t } else { best })
    }

    /// Length of the longest tour.
    pub fn worst_length(&self) -> Option<f64> {
        self.tours.iter().map(Tour::length).reduce(f64::max)
    }

    pub fn replace(&mut self, index: usize, tour: Tour) {
        self.tours[index] = tour;
    }

    pub fn truncate(&mut self, len: usize) {
        self.tours.truncate(len);
    }
}

impl FromIterator<Tour> for Population {
    /// Collects tours, silently dropping duplicate keys.
    fn from_iter<I: IntoIterator<Item = Tour>>(iter: I) -> Self {
        let mut pop = Population::new();
        for t in iter {
            pop.add_if_absent(t);
        }
        pop
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Tour;
    type IntoIter = std::slice::Iter<'a, Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.tours.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::City;

    fn tour(points: &[(i32, i32)]) -> Tour {
        Tour::from_cities(points.iter().map(|&p| City::from(p)).collect())
    }

    #[test]
    fn test_add_if_absent_rejects_same_order() {
        let mut pop = Population::new();
        assert!(pop.add_if_absent(tour(&[(0, 0), (0, 1), (1, 1)])));
        assert!(!pop.add_if_absent(tour(&[(0, 0), (0, 1), (1, 1)])));
        assert!(pop.add_if_absent(tour(&[(0, 1), (0, 0), (1, 1)])));
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_fitness_is_relative_to_longest() {
        let mut pop: Population = vec![
            tour(&[(0, 0), (0, 1), (1, 1), (1, 0)]),
            tour(&[(0, 0), (1, 1), (0, 1), (1, 0)]),
        ]
        .into_iter()
        .collect();
        let total = pop.evaluate_fitness();
        pop.sort_by_fitness_descending();

        assert_eq!(pop.tours()[0].length(), 4.0);
        assert_eq!(pop.tours()[1].fitness, 0.0);
        assert!((total - (2.0 * 2.0f64.sqrt() - 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_equal_lengths_score_zero() {
        let mut pop: Population = vec![
            tour(&[(0, 0), (0, 1), (1, 1), (1, 0)]),
            tour(&[(0, 1), (1, 1), (1, 0), (0, 0)]),
        ]
        .into_iter()
        .collect();
        assert_eq!(pop.evaluate_fitness(), 0.0);
        assert!(pop.iter().all(|t| t.fitness == 0.0));
    }

    #[test]
    fn test_top_k_copies() {
        let mut pop: Population = vec![
            tour(&[(0, 0), (0, 1), (1, 1), (1, 0)]),
            tour(&[(0, 0), (1, 1), (0, 1), (1, 0)]),
        ]
        .into_iter()
        .collect();
        pop.evaluate_fitness();
        pop.sort_by_fitness_descending();
        let mut elites = pop.top_k(5);
        assert_eq!(elites.len(), 2);
        elites[0].swap_positions(0, 1);
        assert_eq!(pop.tours()[0].key(), "0 0,0 1,1 1,1 0");
    }
}
