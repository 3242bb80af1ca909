//! The fitness abstraction consumed by optimizers.

use mander_core::{Communities, Graph, Result};

/// A scalar fitness function over a partition. Optimizers maximize it.
///
/// Implementations must not mutate the partition; they observe it through
/// shared references only. Geometric failures inside a metric propagate as
/// errors rather than being folded into the score.
pub trait Fitness {
    fn score(&self, graph: &Graph, communities: &Communities) -> Result<f64>;
}

/// Any infallible closure over the partition is a fitness function.
impl<F> Fitness for F
where
    F: Fn(&Graph, &Communities) -> f64,
{
    fn score(&self, graph: &Graph, communities: &Communities) -> Result<f64> {
        Ok(self(graph, communities))
    }
}

/// Weighted combination of fitness terms.
///
/// # Example
///
/// ```
/// use mander_core::{Communities, Graph};
/// use mander_scoring::{Fitness, WeightedSum};
///
/// let constant = |_: &Graph, _: &Communities| 2.0;
/// let mut combined = WeightedSum::new();
/// combined.push(1.5, &constant);
///
/// let graph = Graph::new();
/// let communities = Communities::default();
/// assert_eq!(combined.score(&graph, &communities).unwrap(), 3.0);
/// ```
#[derive(Default)]
pub struct WeightedSum<'a> {
    terms: Vec<(f64, &'a dyn Fitness)>,
}

impl<'a> WeightedSum<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, weight: f64, term: &'a dyn Fitness) -> &mut Self {
        self.terms.push((weight, term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Fitness for WeightedSum<'_> {
    fn score(&self, graph: &Graph, communities: &Communities) -> Result<f64> {
        let mut total = 0.0;
        for (weight, term) in &self.terms {
            total += weight * term.score(graph, communities)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_fitness() {
        let fitness = |_: &Graph, communities: &Communities| communities.len() as f64;
        let graph = Graph::new();
        let communities = Communities::default();
        assert_eq!(fitness.score(&graph, &communities).unwrap(), 0.0);
    }

    #[test]
    fn test_weighted_sum() {
        let one = |_: &Graph, _: &Communities| 1.0;
        let ten = |_: &Graph, _: &Communities| 10.0;

        let mut combined = WeightedSum::new();
        combined.push(2.0, &one);
        combined.push(0.5, &ten);

        let graph = Graph::new();
        let communities = Communities::default();
        assert_eq!(combined.score(&graph, &communities).unwrap(), 7.0);
        assert_eq!(combined.len(), 2);
    }
}
