use crate::geometry::City;
use crate::population::Population;
use crate::stream::RngStream;
use crate::tour::Tour;
use fastrand::Rng;
use std::collections::HashSet;
use tracing::warn;

/// Ordered crossover (OX) with the cut points drawn from `rng`.
pub fn ordered_crossover(p1: &Tour, p2: &Tour, rng: &mut Rng) -> Tour {
    let n = p1.len();
    if n < 2 {
        return p1.clone();
    }
    let (cp1, cp2) = loop {
        let a = rng.usize(0..n);
        let b = rng.usize(0..n);
        if a < b {
            break (a, b);
        }
    };
    ordered_crossover_at(p1, p2, cp1, cp2)
}

/// Ordered crossover (OX) with fixed cut points, `cp1 < cp2 <= n`.
///
/// The child keeps `p1[cp1..cp2]` in place. Positions `cp2..n` and then
/// `0..cp1` are filled with the cities of `p2` not yet placed, read from
/// index `cp2` onward and wrapping at `n`.
pub fn ordered_crossover_at(p1: &Tour, p2: &Tour, cp1: usize, cp2: usize) -> Tour {
    let n = p1.len();
    let parent1 = p1.cities();
    let parent2 = p2.cities();

    let mut child: Vec<Option<City>> = vec![None; n];
    let mut placed: HashSet<City> = HashSet::with_capacity(n);

    for pos in cp1..cp2 {
        child[pos] = Some(parent1[pos]);
        placed.insert(parent1[pos]);
    }

    let mut cursor = cp2;
    for pos in (cp2..n).chain(0..cp1) {
        for _ in 0..n {
            let city = parent2[cursor % n];
            cursor += 1;
            if placed.insert(city) {
                child[pos] = Some(city);
                break;
            }
        }
    }

    // Parents are permutations of the same set, so every slot is filled.
    Tour::from_cities(child.into_iter().flatten().collect())
}

/// Pairs breeding-pool entries and produces one OX child per pair.
///
/// Runs `pool.len() / 2` pairings. A draw is rejected when both entries
/// hold the same tour or the index pair was already used this generation;
/// after `retry_limit` rejections the last draw is accepted anyway.
pub fn breed(
    population: &Population,
    pool: &[usize],
    stream: &mut RngStream,
    retry_limit: usize,
) -> Vec<Tour> {
    let pairs = pool.len() / 2;
    let mut children = Vec::with_capacity(pairs);
    let mut used: HashSet<(usize, usize)> = HashSet::with_capacity(pairs);
    let mut fallbacks = 0;
    let mut rng = stream.draw();

    for _ in 0..pairs {
        let mut rejected = 0;
        let (r1, r2) = loop {
            let r1 = rng.usize(0..pool.len());
            let r2 = rng.usize(0..pool.len());
            let (a, b) = (&population.tours()[pool[r1]], &population.tours()[pool[r2]]);
            if !a.same_order(b) && !used.contains(&(r1, r2)) {
                break (r1, r2);
            }
            rejected += 1;
            if rejected >= retry_limit {
                fallbacks += 1;
                break (r1, r2);
            }
        };
        used.insert((r1, r2));

        let p1 = &population.tours()[pool[r1]];
        let p2 = &population.tours()[pool[r2]];
        children.push(ordered_crossover(p1, p2, &mut stream.draw()));
    }

    if fallbacks > 0 {
        warn!(
            fallbacks,
            pairs, "crossover pairing exhausted its retries, accepted duplicate pairs"
        );
    }
    children
}
