use crate::error::{TfResult, TourForgeError};
use crate::geometry::City;
use crate::tour::Tour;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads a city file: one `x y` pair of integers per line.
pub fn load_cities<P: AsRef<Path>>(path: P) -> TfResult<Vec<City>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        TourForgeError::Io(std::io::Error::new(
            e.kind(),
            format!("could not open city file '{}': {}", path.display(), e),
        ))
    })?;
    let cities = parse_cities(file)?;
    debug!(path = %path.display(), count = cities.len(), "loaded cities");
    Ok(cities)
}

pub fn parse_cities<R: Read>(reader: R) -> TfResult<Vec<City>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut cities = Vec::new();
    let mut seen = HashSet::new();

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = row_idx + 1;

        if rec.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if rec.len() != 2 {
            return Err(TourForgeError::Validation(format!(
                "line {}: Each line should have exactly 2 numbers, found {}",
                line,
                rec.len()
            )));
        }

        let x = parse_coordinate(&rec[0], line)?;
        let y = parse_coordinate(&rec[1], line)?;
        let city = City::new(x, y);

        if !seen.insert(city) {
            return Err(TourForgeError::Validation(format!(
                "line {}: duplicate city '{}'",
                line, city
            )));
        }
        cities.push(city);
    }

    if cities.len() < 2 {
        return Err(TourForgeError::Validation(format!(
            "at least 2 cities are required, found {}",
            cities.len()
        )));
    }

    Ok(cities)
}

/// Parses a comma-separated list of city indices (`"0,3,2,1"`) into a tour.
pub fn parse_order(order: &str, cities: &[City]) -> TfResult<Tour> {
    let mut tour = Tour::new();
    let mut used = vec![false; cities.len()];

    for token in order.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let idx: usize = token
            .parse()
            .map_err(|_| TourForgeError::Validation(format!("'{}' is not a city index", token)))?;
        let city = cities.get(idx).ok_or_else(|| {
            TourForgeError::Validation(format!(
                "city index {} out of range (0..{})",
                idx,
                cities.len()
            ))
        })?;
        if std::mem::replace(&mut used[idx], true) {
            return Err(TourForgeError::Validation(format!(
                "city index {} appears twice",
                idx
            )));
        }
        tour.add_city(*city);
    }

    if tour.len() != cities.len() {
        return Err(TourForgeError::Validation(format!(
            "order visits {} of {} cities",
            tour.len(),
            cities.len()
        )));
    }
    Ok(tour)
}

fn parse_coordinate(field: &str, line: usize) -> TfResult<i32> {
    field.trim().parse().map_err(|_| {
        TourForgeError::Validation(format!(
            "line {}: '{}' is not an integer coordinate",
            line, field
        ))
    })
}
