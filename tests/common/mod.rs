#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use tourforge::geometry::City;

pub fn unit_square() -> Vec<City> {
    vec![
        City::new(0, 0),
        City::new(0, 1),
        City::new(1, 1),
        City::new(1, 0),
    ]
}

/// Points on a coarse circle, in angular order, so the input order is the
/// optimal tour.
pub fn ring_cities(n: usize, radius: f64) -> Vec<City> {
    (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            City::new((radius * a.cos()).round() as i32, (radius * a.sin()).round() as i32)
        })
        .collect()
}

/// Deterministic scatter with distinct x coordinates.
pub fn scatter(n: usize, seed: u64) -> Vec<City> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n as i32)
        .map(|i| City::new(i * 7, rng.i32(-50..50)))
        .collect()
}

pub struct CityFile {
    _dir: TempDir,
    pub path: PathBuf,
}

impl CityFile {
    pub fn new(cities: &[City]) -> Self {
        let body: String = cities.iter().map(|c| format!("{}\n", c)).collect();
        Self::raw(&body)
    }

    pub fn raw(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("cities.txt");
        let mut f = File::create(&path).unwrap();
        write!(f, "{}", body).unwrap();
        Self { _dir: dir, path }
    }
}
