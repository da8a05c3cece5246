use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Statically configured shape of a run.
///
/// Outer (inter-node) epochs contain intra-node rounds, which contain
/// `generations` generation steps per island.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Tours held by every island
    #[arg(long, default_value_t = 30)]
    pub population_size: usize,
    /// Generations per island call
    #[arg(long, default_value_t = 10)]
    pub generations: usize,
    /// Intra-node migration rounds per inter-node epoch
    #[arg(long, default_value_t = 2)]
    pub intra_rounds: usize,
    /// Inter-node migration epochs
    #[arg(long, default_value_t = 3)]
    pub inter_epochs: usize,
    /// Tours per elite batch
    #[arg(long, default_value_t = 6)]
    pub elite_batch: usize,
    /// Fraction of the sorted population carried over unchanged
    #[arg(long, default_value_t = 0.20)]
    pub elitism_fraction: f64,
    /// Mutation events per generation, as a fraction of the population
    #[arg(long, default_value_t = 0.10)]
    pub mutation_fraction: f64,
    /// Global run seed
    #[arg(long, default_value_t = 0)]
    pub seed: i32,
    /// Node-level workers
    #[arg(long, default_value_t = 2)]
    pub nodes: usize,
    /// Islands per node
    #[arg(long, default_value_t = 4)]
    pub islands_per_node: usize,
    /// Rejected draws tolerated before a crossover pair is accepted as-is
    #[arg(long, default_value_t = 1000)]
    pub pairing_retry_limit: usize,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 10,
            intra_rounds: 2,
            inter_epochs: 3,
            elite_batch: 6,
            elitism_fraction: 0.20,
            mutation_fraction: 0.10,
            seed: 0,
            nodes: 2,
            islands_per_node: 4,
            pairing_retry_limit: 1000,
        }
    }
}

impl RunParams {
    /// Total number of islands across the whole run. Saturates; `validate`
    /// rejects shapes whose product overflows.
    pub fn width(&self) -> usize {
        self.nodes.saturating_mul(self.islands_per_node)
    }

    /// Number of top-ranked tours carried into the next generation unchanged.
    pub fn elite_count(&self) -> usize {
        let crossover_share = (self.population_size as f64 * (1.0 - self.elitism_fraction)) as usize;
        self.population_size - crossover_share.min(self.population_size)
    }

    /// Number of mutation events per generation.
    pub fn mutation_count(&self) -> usize {
        (self.population_size as f64 * self.mutation_fraction) as usize
    }

    /// Collapses the run to a single island without any migration.
    pub fn into_sequential(self) -> Self {
        Self {
            nodes: 1,
            islands_per_node: 1,
            intra_rounds: 1,
            inter_epochs: 1,
            ..self
        }
    }

    pub fn validate(&self, city_count: usize) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.generations == 0 {
            return Err("generations must be at least 1".into());
        }
        if self.intra_rounds == 0 || self.inter_epochs == 0 {
            return Err("intra_rounds and inter_epochs must be at least 1".into());
        }
        if self.nodes == 0 || self.islands_per_node == 0 {
            return Err("nodes and islands_per_node must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.elitism_fraction) {
            return Err("elitism_fraction must lie in [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_fraction) {
            return Err("mutation_fraction must lie in [0, 1]".into());
        }
        if self.elite_batch == 0 || self.elite_batch > self.population_size {
            return Err(format!(
                "elite_batch must lie in [1, {}]",
                self.population_size
            ));
        }
        let width = self
            .nodes
            .checked_mul(self.islands_per_node)
            .ok_or("nodes * islands_per_node overflows")?;
        if width > i32::MAX as usize {
            return Err("nodes * islands_per_node exceeds the stream counter range".into());
        }
        if city_count < 2 {
            return Err("at least 2 cities are required".into());
        }
        if let Some(distinct) = distinct_tours(city_count) {
            if (self.population_size as u64) > distinct {
                return Err(format!(
                    "population_size {} exceeds the {} distinct tours of {} cities",
                    self.population_size, distinct, city_count
                ));
            }
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read params file '{}': {}", path.display(), e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse params JSON '{}': {}", path.display(), e))
    }

    /// Copies every field the user typed on the command line over the
    /// file-provided value.
    pub fn merge_from_cli(&mut self, cli: &RunParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(population_size, "population_size");
        update_if_present!(generations, "generations");
        update_if_present!(intra_rounds, "intra_rounds");
        update_if_present!(inter_epochs, "inter_epochs");
        update_if_present!(elite_batch, "elite_batch");
        update_if_present!(elitism_fraction, "elitism_fraction");
        update_if_present!(mutation_fraction, "mutation_fraction");
        update_if_present!(seed, "seed");
        update_if_present!(nodes, "nodes");
        update_if_present!(islands_per_node, "islands_per_node");
        update_if_present!(pairing_retry_limit, "pairing_retry_limit");
    }
}

/// `n!`, or `None` once it no longer fits in a `u64`.
fn distinct_tours(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() {
        let p = RunParams::default();
        assert_eq!(p.population_size, 30);
        assert_eq!(p.elite_batch, 6);
        assert_eq!(p.width(), 8);
        assert_eq!(p.elite_count(), 6);
        assert_eq!(p.mutation_count(), 3);
        assert!(p.validate(10).is_ok());
    }

    #[test]
    fn test_small_population_counts() {
        let p = RunParams {
            population_size: 8,
            ..Default::default()
        };
        assert_eq!(p.elite_count(), 2);
        assert_eq!(p.mutation_count(), 0);
    }

    #[test]
    fn test_population_larger_than_tour_space() {
        let p = RunParams {
            population_size: 7,
            elite_batch: 2,
            ..Default::default()
        };
        // 3 cities only admit 3! = 6 orderings
        assert!(p.validate(3).is_err());
        assert!(p.validate(4).is_ok());
    }

    #[test]
    fn test_rejects_bad_fractions() {
        let p = RunParams {
            elitism_fraction: 1.5,
            ..Default::default()
        };
        assert!(p.validate(10).is_err());
    }

    #[test]
    fn test_rejects_overflowing_width() {
        let p = RunParams {
            nodes: usize::MAX / 2,
            islands_per_node: 4,
            ..Default::default()
        };
        assert_eq!(
            p.validate(10),
            Err("nodes * islands_per_node overflows".to_string())
        );

        let p = RunParams {
            nodes: 1 << 16,
            islands_per_node: 1 << 16,
            ..Default::default()
        };
        assert!(p.validate(10).is_err());
    }

    #[test]
    fn test_sequential_collapses_topology() {
        let p = RunParams::default().into_sequential();
        assert_eq!(p.width(), 1);
        assert_eq!(p.inter_epochs, 1);
        assert_eq!(p.intra_rounds, 1);
        assert_eq!(p.population_size, 30);
    }

    #[test]
    fn test_json_fills_missing_fields() {
        let p: RunParams = serde_json::from_str(r#"{"population_size": 12, "seed": 7}"#).unwrap();
        assert_eq!(p.population_size, 12);
        assert_eq!(p.seed, 7);
        assert_eq!(p.islands_per_node, 4);
    }
}
