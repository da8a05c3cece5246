//! Data types shared across the node boundary.
//!
//! Everything in this crate is plain data: cities, run parameters and the
//! envelopes that travel between node workers. The evolutionary engine
//! lives in the `tourforge` crate.

pub mod config;
pub mod geometry;
pub mod job;
pub mod protocol;
