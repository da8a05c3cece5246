//! Island-model genetic search for short closed tours over a fixed city set.
//!
//! Each node runs several islands that evolve their own population of tours
//! and pass elite batches around two rings: islands inside a node, and nodes
//! across the run. The final epoch reduces every node's best tour to one
//! answer.

pub mod api;
pub mod error;
pub mod loader;
pub mod migration;
pub mod optimizer;
pub mod population;
pub mod stream;
pub mod tour;

pub use tourforge_protocol::{config, geometry, job, protocol};
