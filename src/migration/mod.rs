//! Elite exchange between islands and nodes.
//!
//! The same [`Ring`] routes both levels: islands on one node hand their
//! elite batch to their core-ring predecessor in memory, and nodes send
//! their aggregated batch to their node-ring predecessor through an
//! [`Exchange`].

pub mod exchange;
pub mod reduction;

pub use self::exchange::{Exchange, LocalExchange};
pub use self::reduction::GlobalReduction;

/// `(rank - 1) mod size`.
#[inline]
pub fn predecessor(rank: usize, size: usize) -> usize {
    (rank + size - 1) % size
}

/// Cyclic predecessor relation over `size` ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    size: usize,
}

impl Ring {
    /// `size` must be at least 1.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn predecessor(&self, rank: usize) -> usize {
        predecessor(rank, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 4, 3)]
    #[case(1, 4, 0)]
    #[case(3, 4, 2)]
    #[case(0, 1, 0)]
    fn test_predecessor(#[case] rank: usize, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(predecessor(rank, size), expected);
        assert_eq!(Ring::new(size).predecessor(rank), expected);
    }
}
