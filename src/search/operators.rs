//! Field-level genetic operators over opaque configurations.
//!
//! All operators work on deep copies: an input individual is never
//! modified, and offspring never share state with their parents.
//!
//! # Operators
//!
//! - [`ConfigSampler::sample`]: a fresh random configuration
//! - [`ConfigSampler::mutate`]: overwrite randomly chosen fields with
//!   values from a fresh sample
//! - [`ConfigSampler::crossover`]: swap randomly chosen fields between two
//!   parents
//!
//! Both `mutate` and `crossover` run one random field pick per partition
//! field. Picks may collide, so the number of distinct fields touched
//! varies between 1 and the partition size.

use super::individual::Individual;
use super::types::{CandidateGenerator, Configuration};
use crate::partition::Partition;
use rand::Rng;

/// Draws and recombines configurations of one family over one partition.
#[derive(Debug)]
pub struct ConfigSampler<'a, G> {
    generator: &'a G,
    family: &'a str,
    partition: &'a Partition,
}

impl<G> Clone for ConfigSampler<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for ConfigSampler<'_, G> {}

impl<'a, G: CandidateGenerator> ConfigSampler<'a, G> {
    /// Binds a generator to a family and partition.
    pub fn new(generator: &'a G, family: &'a str, partition: &'a Partition) -> Self {
        Self {
            generator,
            family,
            partition,
        }
    }

    /// The partition this sampler draws over.
    pub fn partition(&self) -> &'a Partition {
        self.partition
    }

    /// Draws a fresh configuration. No memoization: every call is an
    /// independent draw.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> G::Config {
        self.generator.sample(self.family, self.partition, rng)
    }

    /// Draws a fresh, unevaluated individual.
    pub fn sample_individual<R: Rng>(&self, rng: &mut R) -> Individual<G::Config> {
        Individual::new(self.sample(rng))
    }

    /// Mutation: copy `individual`, then for each partition field pick a
    /// random field and overwrite it with the value from one fresh sample.
    ///
    /// The result is unevaluated; `individual` is untouched.
    pub fn mutate<R: Rng>(
        &self,
        individual: &Individual<G::Config>,
        rng: &mut R,
    ) -> Individual<G::Config> {
        let donor = self.sample(rng);
        let mut child = individual.config().clone();
        let names = self.partition.names();
        let n = names.len();

        for _ in 0..n {
            let field = &names[rng.random_range(0..n)];
            if let Some(value) = donor.get(field) {
                child.set(field, value);
            }
        }

        Individual::new(child)
    }

    /// Crossover: copy both parents, then for each partition field pick a
    /// random field and swap its value between the two copies.
    ///
    /// No value is created or lost; both children are unevaluated.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Individual<G::Config>,
        parent2: &Individual<G::Config>,
        rng: &mut R,
    ) -> (Individual<G::Config>, Individual<G::Config>) {
        let mut child1 = parent1.config().clone();
        let mut child2 = parent2.config().clone();
        let names = self.partition.names();
        let n = names.len();

        for _ in 0..n {
            let field = &names[rng.random_range(0..n)];
            if let (Some(v1), Some(v2)) = (child1.get(field), child2.get(field)) {
                child1.set(field, v2);
                child2.set(field, v1);
            }
        }

        (Individual::new(child1), Individual::new(child2))
    }
}
