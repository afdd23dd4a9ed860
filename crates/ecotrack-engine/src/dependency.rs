//! Predator-prey dependency graph
//!
//! The [`DependencyGraph`] records directed predator -> prey edges and a
//! population snapshot per species, and answers "what is affected if this
//! species disappears?".
//!
//! ## Impact propagation
//!
//! Losing a species affects its prey (they lose a predator) and its
//! predators (they lose a food source). Both effects propagate: starting
//! from the lost species, every frontier member contributes
//!
//! 1. the species it preys upon (outgoing edges), and
//! 2. the species that prey upon it (incoming edges).
//!
//! Each species is reported at most once, so cycles terminate. The lost
//! species itself is reported only when an impacted species preys upon it,
//! as in `A -> B -> A`. The traversal is breadth-first over an explicit
//! queue, with edges taken in insertion order, which makes the reported
//! order deterministic.
//!
//! The dependency factor of every affected species is computed against the
//! population of the lost species, not of the hop that reached it.

use std::collections::{HashMap, HashSet, VecDeque};

use ecotrack_core::{ImpactedSpecies, SpeciesId};
use tracing::trace;

/// Directed predator -> prey graph with a population snapshot
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Predator -> prey, duplicates kept
    prey: HashMap<SpeciesId, Vec<SpeciesId>>,
    /// Prey -> predators, mirrors `prey`
    predators: HashMap<SpeciesId, Vec<SpeciesId>>,
    /// Last known population per species
    populations: HashMap<SpeciesId, u64>,
    edge_count: usize,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `predator` preys upon `prey`
    ///
    /// Edges are not deduplicated; adding the same pair twice stores it twice.
    pub fn add_edge(&mut self, predator: SpeciesId, prey: SpeciesId) {
        self.predators
            .entry(prey.clone())
            .or_default()
            .push(predator.clone());
        self.prey.entry(predator).or_default().push(prey);
        self.edge_count += 1;
    }

    /// Overwrite the population snapshot for a species
    pub fn set_population(&mut self, species: SpeciesId, population: u64) {
        self.populations.insert(species, population);
    }

    /// Snapshot population, 0 if never set
    pub fn population(&self, species: &SpeciesId) -> u64 {
        self.populations.get(species).copied().unwrap_or(0)
    }

    /// Species that `predator` preys upon, in insertion order
    pub fn prey_of(&self, predator: &SpeciesId) -> &[SpeciesId] {
        self.prey.get(predator).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Species that prey upon `prey`, in insertion order
    pub fn predators_of(&self, prey: &SpeciesId) -> &[SpeciesId] {
        self.predators.get(prey).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `species` has any outgoing edge
    pub fn has_dependencies(&self, species: &SpeciesId) -> bool {
        !self.prey_of(species).is_empty()
    }

    /// Every species transitively affected by the loss of `species`
    ///
    /// The origin appears only if an impacted species preys upon it.
    /// Returns an empty set for a species without edges.
    pub fn impacted_set(&self, species: &SpeciesId) -> Vec<SpeciesId> {
        let mut visited: HashSet<&SpeciesId> = HashSet::new();
        let mut impacted = Vec::new();
        let mut frontier: VecDeque<&SpeciesId> = VecDeque::new();

        frontier.push_back(species);

        while let Some(current) = frontier.pop_front() {
            // The origin is reachable only as prey
            let predators = self
                .predators_of(current)
                .iter()
                .filter(|predator| *predator != species);
            let neighbours = self.prey_of(current).iter().chain(predators);
            for next in neighbours {
                if visited.insert(next) {
                    trace!(from = %current, to = %next, "Impact propagates");
                    impacted.push(next.clone());
                    frontier.push_back(next);
                }
            }
        }

        impacted
    }

    /// Impact of losing `species`, with dependency factors
    ///
    /// Returns `None` if `species` preys on nothing.
    pub fn impact_of(&self, species: &SpeciesId) -> Option<Vec<ImpactedSpecies>> {
        if !self.has_dependencies(species) {
            return None;
        }

        let origin_population = self.population(species);
        let impacted = self
            .impacted_set(species)
            .into_iter()
            .map(|affected| {
                let divisor = self.population(&affected);
                let dependency_factor = if divisor == 0 {
                    0.0
                } else {
                    origin_population as f64 / divisor as f64
                };
                ImpactedSpecies {
                    species: affected,
                    dependency_factor,
                }
            })
            .collect();

        Some(impacted)
    }

    /// Number of edges, duplicates included
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of species with a population snapshot
    pub fn tracked_populations(&self) -> usize {
        self.populations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> SpeciesId {
        SpeciesId::new(name)
    }

    fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (predator, prey) in edges {
            graph.add_edge(id(predator), id(prey));
        }
        graph
    }

    fn names(ids: &[SpeciesId]) -> Vec<&str> {
        ids.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_direct_dependency_factor() {
        let mut graph = graph(&[("Tiger", "Deer")]);
        graph.set_population(id("Tiger"), 10);
        graph.set_population(id("Deer"), 5);

        let impact = graph.impact_of(&id("Tiger")).unwrap();
        assert_eq!(impact.len(), 1);
        assert_eq!(impact[0].species, id("Deer"));
        assert!((impact[0].dependency_factor - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_outgoing_edges_is_no_dependency() {
        let graph = graph(&[("Tiger", "Deer")]);
        assert!(graph.impact_of(&id("Deer")).is_none());
        assert!(graph.impact_of(&id("Lichen")).is_none());
        assert!(graph.impacted_set(&id("Lichen")).is_empty());
    }

    #[test]
    fn test_transitive_both_directions() {
        // Tiger -> Deer -> Grass, Wolf -> Deer
        let graph = graph(&[("Tiger", "Deer"), ("Deer", "Grass"), ("Wolf", "Deer")]);

        let impacted = graph.impacted_set(&id("Deer"));
        assert_eq!(names(&impacted), vec!["Grass", "Tiger", "Wolf", "Deer"]);

        // Tiger has no predator, so it is never reported
        let impacted = graph.impacted_set(&id("Tiger"));
        assert_eq!(names(&impacted), vec!["Deer", "Grass", "Wolf"]);
    }

    #[test]
    fn test_cycle_terminates_and_reports_once() {
        let mut graph = graph(&[("A", "B"), ("B", "A")]);
        graph.set_population(id("A"), 10);
        graph.set_population(id("B"), 20);

        let impacted = graph.impacted_set(&id("A"));
        assert_eq!(names(&impacted), vec!["B", "A"]);

        let impact = graph.impact_of(&id("A")).unwrap();
        assert!((impact[0].dependency_factor - 0.5).abs() < f64::EPSILON);
        assert!((impact[1].dependency_factor - 1.0).abs() < f64::EPSILON);

        let graph = graph_with_triangle();
        let impacted = graph.impacted_set(&id("A"));
        assert_eq!(names(&impacted), vec!["B", "C", "A"]);
        let unique: HashSet<_> = impacted.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    fn graph_with_triangle() -> DependencyGraph {
        graph(&[("A", "B"), ("B", "C"), ("C", "A"), ("A", "B")])
    }

    #[test]
    fn test_duplicate_edges_are_counted() {
        let graph = graph_with_triangle();
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.prey_of(&id("A")).len(), 2);
    }

    #[test]
    fn test_factor_uses_origin_population() {
        let mut graph = graph(&[("Eagle", "Snake"), ("Snake", "Frog")]);
        graph.set_population(id("Eagle"), 30);
        graph.set_population(id("Snake"), 10);
        graph.set_population(id("Frog"), 60);

        let impact = graph.impact_of(&id("Eagle")).unwrap();
        let frog = impact.iter().find(|i| i.species == id("Frog")).unwrap();
        assert!((frog.dependency_factor - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_population_divisor() {
        let mut graph = graph(&[("Deer", "Grass")]);
        graph.set_population(id("Deer"), 40);

        let impact = graph.impact_of(&id("Deer")).unwrap();
        assert_eq!(impact[0].dependency_factor, 0.0);
    }

    #[test]
    fn test_long_chain_without_overflow() {
        let mut graph = DependencyGraph::new();
        for i in 0..20_000u32 {
            graph.add_edge(id(&format!("s{i}")), id(&format!("s{}", i + 1)));
        }
        assert_eq!(graph.impacted_set(&id("s0")).len(), 20_000);
    }
}
