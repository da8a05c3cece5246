use crate::geometry::City;
use std::collections::HashMap;
use std::fmt;

/// An ordered visit of every city, plus the metrics cached for it.
///
/// The canonical key (`"x y,x y,..."`) identifies a tour by its city order;
/// two tours are the same iff their keys match. `fitness`, `probability`
/// and `sampling_count` are only meaningful inside the population that last
/// scored the tour.
#[derive(Debug, Clone, Default)]
pub struct Tour {
    cities: Vec<City>,
    key: String,
    length: f64,
    pub fitness: f64,
    pub probability: f64,
    pub sampling_count: usize,
}

impl Tour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cities(cities: Vec<City>) -> Self {
        let mut tour = Self {
            cities,
            ..Self::default()
        };
        tour.rebuild_key();
        tour.measure();
        tour
    }

    /// Appends a city, extending the key and the cyclic length in place.
    pub fn add_city(&mut self, city: City) {
        if !self.key.is_empty() {
            self.key.push(',');
        }
        self.key.push_str(&city.to_string());

        if let (Some(first), Some(last)) = (self.cities.first(), self.cities.last()) {
            self.length += last.distance(&city) + city.distance(first) - last.distance(first);
        }
        self.cities.push(city);
    }

    /// Swaps the cities at `i` and `j`. Panics on an out-of-range index.
    pub fn swap_positions(&mut self, i: usize, j: usize) {
        self.cities.swap(i, j);
        self.rebuild_key();
        self.measure();
    }

    /// Cached cyclic length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Recomputes the cyclic length, wrapping last to first.
    pub fn measure(&mut self) -> f64 {
        self.length = cyclic_length(&self.cities);
        self.length
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn same_order(&self, other: &Tour) -> bool {
        self.key == other.key
    }

    #[inline]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn into_cities(self) -> Vec<City> {
        self.cities
    }

    /// True when the tour holds every city of `template` exactly once.
    pub fn is_permutation_of(&self, template: &[City]) -> bool {
        if self.cities.len() != template.len() {
            return false;
        }
        let mut ours = self.cities.clone();
        let mut theirs = template.to_vec();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }

    /// Positions of this tour's cities within `template`, in visit order.
    /// Cities missing from the template are skipped.
    pub fn indices_in(&self, template: &[City]) -> Vec<usize> {
        let lookup: HashMap<City, usize> =
            template.iter().enumerate().map(|(i, c)| (*c, i)).collect();
        self.cities
            .iter()
            .filter_map(|c| lookup.get(c).copied())
            .collect()
    }

    fn rebuild_key(&mut self) {
        self.key = self
            .cities
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

pub fn cyclic_length(cities: &[City]) -> f64 {
    if cities.len() < 2 {
        return 0.0;
    }
    let open: f64 = cities.windows(2).map(|w| w[0].distance(&w[1])).sum();
    open + cities[cities.len() - 1].distance(&cities[0])
}
