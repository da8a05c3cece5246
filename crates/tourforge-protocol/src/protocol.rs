use crate::geometry::City;
use serde::{Deserialize, Serialize};

/// Rendezvous key of an inter-node message: the receiving node and the
/// epoch the payload belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MigrationTag {
    pub target_rank: usize,
    pub epoch: usize,
}

/// Elite tours travelling from one node to its ring predecessor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MigrationEnvelope {
    pub target_rank: usize,
    pub sender_rank: usize,
    pub epoch: usize,
    /// Best first.
    pub tours: Vec<Vec<City>>,
}

impl MigrationEnvelope {
    pub fn tag(&self) -> MigrationTag {
        MigrationTag {
            target_rank: self.target_rank,
            epoch: self.epoch,
        }
    }
}

/// A node's single best tour, handed to the global reduction on the final epoch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Submission {
    pub node_rank: usize,
    pub tour: Vec<City>,
    pub length: f64,
}
