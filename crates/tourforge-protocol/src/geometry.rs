use serde::{Deserialize, Serialize};
use std::fmt;

/// A point of the city set.
///
/// Two cities are the same city iff their coordinate pairs match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct City {
    pub x: i32,
    pub y: i32,
}

impl City {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance. Differences are taken in `i64` so extreme
    /// coordinates cannot overflow.
    #[inline(always)]
    pub fn distance(&self, other: &City) -> f64 {
        let dx = (self.x as i64 - other.x as i64) as f64;
        let dy = (self.y as i64 - other.y as i64) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl From<(i32, i32)> for City {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
