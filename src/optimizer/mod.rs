pub mod crossover;
pub mod mutation;
pub mod runner;
pub mod selection;

pub use self::runner::{Optimizer, ProgressCallback, RunReport, SilentProgress};

use crate::config::RunParams;
use crate::geometry::City;
use crate::population::Population;
use crate::stream::RngStream;
use crate::tour::Tour;
use tracing::trace;

/// Per-generation constants, derived once from the run parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub population_size: usize,
    pub elite_count: usize,
    pub mutation_count: usize,
    pub elite_batch: usize,
    pub pairing_retry_limit: usize,
}

impl From<&RunParams> for GenerationSettings {
    fn from(params: &RunParams) -> Self {
        Self {
            population_size: params.population_size,
            elite_count: params.elite_count(),
            mutation_count: params.mutation_count(),
            elite_batch: params.elite_batch,
            pairing_retry_limit: params.pairing_retry_limit,
        }
    }
}

/// One independently evolving population with its private stream.
pub struct Island {
    pub node_rank: usize,
    pub core_rank: usize,
    pub population: Population,
    pub stream: RngStream,
    settings: GenerationSettings,
    inbound: Vec<Vec<Tour>>,
    generation: usize,
}

impl Island {
    /// Builds the initial population from novel shuffles of `template`.
    ///
    /// The caller guarantees `population_size <= template.len()!`.
    pub fn new(
        template: &[City],
        settings: GenerationSettings,
        stream: RngStream,
        node_rank: usize,
        core_rank: usize,
    ) -> Self {
        let mut island = Self {
            node_rank,
            core_rank,
            population: Population::with_capacity(settings.population_size),
            stream,
            settings,
            inbound: Vec::new(),
            generation: 0,
        };

        while island.population.len() < settings.population_size {
            let mut rng = island.stream.draw();
            island
                .population
                .add_if_absent(mutation::shuffled_tour(template, &mut rng));
        }
        island.rescore();
        island
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Queues an elite batch; it is merged when the next `evolve` starts.
    pub fn deliver(&mut self, batch: Vec<Tour>) {
        if !batch.is_empty() {
            self.inbound.push(batch);
        }
    }

    pub fn pending_batches(&self) -> usize {
        self.inbound.len()
    }

    /// Merges pending elites, runs `generations` steps, and returns a copy
    /// of the resulting elite batch.
    pub fn evolve(&mut self, generations: usize) -> Vec<Tour> {
        for batch in std::mem::take(&mut self.inbound) {
            self.merge_elites(batch);
        }
        for _ in 0..generations {
            self.step();
        }
        self.elite_batch()
    }

    /// One generation: fitness, selection, crossover, mutation, replacement.
    pub fn step(&mut self) {
        let s = self.settings;

        let total = self.population.evaluate_fitness();
        self.population.sort_by_fitness_descending();
        selection::assign_sampling_counts(&mut self.population, total);

        let pool = selection::breeding_pool(&self.population);
        let elites = self.population.top_k(s.elite_count);
        let children = crossover::breed(
            &self.population,
            &pool,
            &mut self.stream,
            s.pairing_retry_limit,
        );
        let mutants = mutation::mutate(&self.population, s.mutation_count, &mut self.stream);

        let next = replacement(&self.population, elites, children, mutants, s.population_size);
        self.population = next;
        self.generation += 1;

        if let Some(best) = self.population.best() {
            trace!(
                node = self.node_rank,
                core = self.core_rank,
                generation = self.generation,
                best = best.length(),
                "generation complete"
            );
        }
    }

    /// Replaces the weakest tours with incoming elites that are not already
    /// present, working upward from the last slot.
    pub fn merge_elites(&mut self, incoming: Vec<Tour>) -> usize {
        self.rescore();

        let mut add_at = self.population.len();
        let mut merged = 0;
        for tour in incoming {
            if add_at == 0 {
                break;
            }
            if self.population.contains(&tour) {
                continue;
            }
            add_at -= 1;
            self.population.replace(add_at, tour);
            merged += 1;
        }

        self.rescore();
        merged
    }

    /// Deep copies of the best `elite_batch` tours.
    pub fn elite_batch(&self) -> Vec<Tour> {
        self.population.top_k(self.settings.elite_batch)
    }

    pub fn best(&self) -> Option<&Tour> {
        self.population.best()
    }

    fn rescore(&mut self) {
        self.population.evaluate_fitness();
        self.population.sort_by_fitness_descending();
    }
}

/// Assembles the next generation.
///
/// Candidates enter in order (elites, children, mutants) and are deduplicated
/// by key. Short pools are padded from `prior` in rank order. The result is
/// re-scored, sorted and cut to `size`.
pub fn replacement(
    prior: &Population,
    elites: Vec<Tour>,
    children: Vec<Tour>,
    mutants: Vec<Tour>,
    size: usize,
) -> Population {
    let mut next = Population::with_capacity(size + children.len() + mutants.len());
    for tour in elites.into_iter().chain(children).chain(mutants) {
        next.add_if_absent(tour);
    }

    for tour in prior.iter() {
        if next.len() >= size {
            break;
        }
        next.add_if_absent(tour.clone());
    }

    next.evaluate_fitness();
    next.sort_by_fitness_descending();
    next.truncate(size);
    next
}
