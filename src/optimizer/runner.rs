use crate::config::RunParams;
use crate::error::{TfResult, TourForgeError};
use crate::geometry::City;
use crate::job::RunFingerprint;
use crate::migration::{Exchange, GlobalReduction, LocalExchange, Ring};
use crate::optimizer::{GenerationSettings, Island};
use crate::population::Population;
use crate::protocol::{MigrationEnvelope, Submission};
use crate::stream::RngStream;
use crate::tour::Tour;
use rayon::prelude::*;
use serde::Serialize;
use std::thread;
use tracing::{debug, info};

/// Receives the best length a node reached at the end of each epoch.
pub trait ProgressCallback: Send + Sync {
    fn on_epoch(&self, node: usize, epoch: usize, best_length: f64);
}

pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_epoch(&self, _node: usize, _epoch: usize, _best_length: f64) {}
}

/// Outcome of a full run.
#[derive(Serialize, Debug, Clone)]
pub struct RunReport {
    pub fingerprint: String,
    pub params: RunParams,
    pub city_count: usize,
    pub best: Submission,
    /// Positions of the best tour's cities in the input file.
    pub best_order: Vec<usize>,
    /// One entry per node, by rank.
    pub submissions: Vec<Submission>,
}

impl RunReport {
    /// `i0 -> i1 -> ... -> i0`
    pub fn cycle_string(&self) -> String {
        let mut parts: Vec<String> = self.best_order.iter().map(|i| i.to_string()).collect();
        if let Some(first) = self.best_order.first() {
            parts.push(first.to_string());
        }
        parts.join(" -> ")
    }

    pub fn best_key(&self) -> String {
        Tour::from_cities(self.best.tour.clone()).key().to_string()
    }
}

pub struct Optimizer {
    cities: Vec<City>,
    params: RunParams,
}

impl Optimizer {
    pub fn new(cities: Vec<City>, params: RunParams) -> TfResult<Self> {
        params
            .validate(cities.len())
            .map_err(TourForgeError::Config)?;
        Ok(Self { cities, params })
    }

    /// Runs every node over an in-process exchange.
    pub fn run<CB: ProgressCallback>(&self, callback: &CB) -> TfResult<RunReport> {
        self.run_with_exchange(&LocalExchange::new(), callback)
    }

    /// Runs one scoped thread per node, then reduces their submissions.
    /// The first node error aborts the exchange and is returned.
    pub fn run_with_exchange<E: Exchange, CB: ProgressCallback>(
        &self,
        exchange: &E,
        callback: &CB,
    ) -> TfResult<RunReport> {
        let p = &self.params;
        let fingerprint = RunFingerprint::from_parts(&self.cities, p);
        info!(
            run = fingerprint.short(),
            cities = self.cities.len(),
            nodes = p.nodes,
            islands_per_node = p.islands_per_node,
            "starting run"
        );

        let reduction = GlobalReduction::new();

        let outcomes: Vec<TfResult<()>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..p.nodes)
                .map(|rank| {
                    let reduction = &reduction;
                    scope.spawn(move || {
                        let worker = NodeWorker::new(rank, &self.cities, p);
                        let result = worker.run(exchange, reduction, callback);
                        if result.is_err() {
                            exchange.abort();
                        }
                        result
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| {
                    h.join().unwrap_or_else(|_| {
                        exchange.abort();
                        Err(TourForgeError::Protocol("node worker panicked".into()))
                    })
                })
                .collect()
        });

        // Report the failing node, not the aborts it triggered elsewhere.
        let mut errors: Vec<TourForgeError> =
            outcomes.into_iter().filter_map(Result::err).collect();
        if !errors.is_empty() {
            let root = errors
                .iter()
                .position(|e| !matches!(e, TourForgeError::Aborted(_)))
                .unwrap_or(0);
            return Err(errors.swap_remove(root));
        }

        let (best, submissions) = reduction.finish()?;
        let best_order = Tour::from_cities(best.tour.clone()).indices_in(&self.cities);

        Ok(RunReport {
            fingerprint: fingerprint.hash,
            params: p.clone(),
            city_count: self.cities.len(),
            best,
            best_order,
            submissions,
        })
    }
}

/// A node: its islands, its position in the node ring, and the epoch loop.
pub struct NodeWorker<'a> {
    rank: usize,
    cities: &'a [City],
    params: &'a RunParams,
    islands: Vec<Island>,
    core_ring: Ring,
    node_ring: Ring,
}

impl<'a> NodeWorker<'a> {
    pub fn new(rank: usize, cities: &'a [City], params: &'a RunParams) -> Self {
        let settings = GenerationSettings::from(params);
        let width = params.width();
        let islands = (0..params.islands_per_node)
            .map(|core| {
                let flat_rank = rank * params.islands_per_node + core;
                let stream = RngStream::new(params.seed, flat_rank, width);
                Island::new(cities, settings, stream, rank, core)
            })
            .collect();

        Self {
            rank,
            cities,
            params,
            islands,
            core_ring: Ring::new(params.islands_per_node),
            node_ring: Ring::new(params.nodes),
        }
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// One intra-node round: every island evolves in parallel, then each
    /// elite batch is queued on the island's core-ring predecessor.
    pub fn intra_round(&mut self) {
        let generations = self.params.generations;
        let batches: Vec<Vec<Tour>> = self
            .islands
            .par_iter_mut()
            .map(|island| island.evolve(generations))
            .collect();

        if self.core_ring.size() < 2 {
            return;
        }
        for (core, batch) in batches.into_iter().enumerate() {
            let target = self.core_ring.predecessor(core);
            self.islands[target].deliver(batch);
        }
    }

    /// Best `elite_batch` tours across all local islands, re-scored together.
    pub fn aggregate_elites(&self) -> Vec<Tour> {
        let mut pool: Population = self
            .islands
            .iter()
            .flat_map(|island| island.population.iter().cloned())
            .collect();
        pool.evaluate_fitness();
        pool.sort_by_fitness_descending();
        pool.top_k(self.params.elite_batch)
    }

    pub fn run<E: Exchange, CB: ProgressCallback>(
        mut self,
        exchange: &E,
        reduction: &GlobalReduction,
        callback: &CB,
    ) -> TfResult<()> {
        let epochs = self.params.inter_epochs;

        for epoch in 0..epochs {
            for round in 0..self.params.intra_rounds {
                self.intra_round();
                debug!(
                    node = self.rank,
                    epoch,
                    round,
                    best = self.best_length(),
                    "intra round complete"
                );
            }

            let elites = self.aggregate_elites();
            let best = elites
                .first()
                .cloned()
                .ok_or_else(|| TourForgeError::Validation("node holds no tours".into()))?;
            info!(node = self.rank, epoch, best = best.length(), "epoch complete");
            callback.on_epoch(self.rank, epoch, best.length());

            if epoch + 1 == epochs {
                let length = best.length();
                reduction.submit(Submission {
                    node_rank: self.rank,
                    tour: best.into_cities(),
                    length,
                })?;
                break;
            }

            exchange.send(MigrationEnvelope {
                target_rank: self.node_ring.predecessor(self.rank),
                sender_rank: self.rank,
                epoch,
                tours: elites.into_iter().map(Tour::into_cities).collect(),
            })?;

            let envelope = exchange.receive(self.rank, epoch)?;
            let incoming = self.decode(envelope)?;
            for island in &mut self.islands {
                island.deliver(incoming.clone());
            }
        }
        Ok(())
    }

    /// Checks that every inbound tour is a permutation of the city set.
    fn decode(&self, envelope: MigrationEnvelope) -> TfResult<Vec<Tour>> {
        let sender = envelope.sender_rank;
        envelope
            .tours
            .into_iter()
            .map(|cities| {
                let tour = Tour::from_cities(cities);
                if tour.is_permutation_of(self.cities) {
                    Ok(tour)
                } else {
                    Err(TourForgeError::Protocol(format!(
                        "node {} sent a tour that is not a permutation of the {} cities",
                        sender,
                        self.cities.len()
                    )))
                }
            })
            .collect()
    }

    fn best_length(&self) -> f64 {
        self.islands
            .iter()
            .filter_map(Island::best)
            .map(Tour::length)
            .fold(f64::INFINITY, f64::min)
    }
}
