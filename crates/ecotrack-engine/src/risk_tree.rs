//! Risk-ordered species tree
//!
//! The [`RiskTree`] is an unbalanced binary search tree keyed by risk level
//! at insertion time. Lower risk levels sort left and ties descend right,
//! so an in-order walk lists species from most to least endangered and
//! keeps insertion order among species of equal risk.
//!
//! ## Layout
//!
//! Nodes live in an arena (`Vec`) and link to their children by index.
//! Because the placement key (risk level) says nothing about where a given
//! species sits, the tree also keeps an identifier index so that updates
//! by identity always find their node. Nodes are never removed or moved:
//! an update overwrites the payload in place, and ranked order keeps
//! reflecting the risk level each species was inserted with.
//!
//! Every walk is iterative, so sorted insertions that degrade the tree to a
//! list cannot overflow the stack.

use std::collections::HashMap;

use ecotrack_core::{RankedEntry, SpeciesId};

use crate::registry::InitialPopulations;

/// A species node in the risk tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskNode {
    pub id: SpeciesId,
    pub risk_level: u8,
    pub population: u64,
    left: Option<usize>,
    right: Option<usize>,
}

impl RiskNode {
    fn new(id: SpeciesId, risk_level: u8, population: u64) -> Self {
        Self {
            id,
            risk_level,
            population,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree ordered by insertion-time risk level
#[derive(Debug, Clone, Default)]
pub struct RiskTree {
    nodes: Vec<RiskNode>,
    root: Option<usize>,
    /// Identifier -> arena slot
    index: HashMap<SpeciesId, usize>,
}

impl RiskTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new species
    ///
    /// Returns `false` without touching the tree if the species already has
    /// a node; use [`update_by_identifier`](Self::update_by_identifier) for
    /// known species.
    pub fn insert(&mut self, id: SpeciesId, risk_level: u8, population: u64) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }

        let slot = self.nodes.len();
        match self.root {
            None => self.root = Some(slot),
            Some(mut current) => loop {
                let node = &mut self.nodes[current];
                let link = if risk_level < node.risk_level {
                    &mut node.left
                } else {
                    &mut node.right
                };
                match *link {
                    Some(child) => current = child,
                    None => {
                        *link = Some(slot);
                        break;
                    }
                }
            },
        }

        self.index.insert(id.clone(), slot);
        self.nodes.push(RiskNode::new(id, risk_level, population));
        true
    }

    /// Overwrite risk level and population of the node for `id`
    ///
    /// The node keeps its position. Returns `false` if the species has no node.
    pub fn update_by_identifier(&mut self, id: &SpeciesId, risk_level: u8, population: u64) -> bool {
        match self.index.get(id) {
            Some(&slot) => {
                let node = &mut self.nodes[slot];
                node.risk_level = risk_level;
                node.population = population;
                true
            }
            None => false,
        }
    }

    /// Overwrite the population of every node whose identifier matches
    ///
    /// Visits the whole tree. Returns the number of nodes updated.
    pub fn update_population_everywhere(&mut self, id: &SpeciesId, population: u64) -> usize {
        let mut updated = 0;
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(slot) = stack.pop() {
            let node = &mut self.nodes[slot];
            if node.id == *id {
                node.population = population;
                updated += 1;
            }
            stack.extend(node.left);
            stack.extend(node.right);
        }
        updated
    }

    /// Lazy in-order walk, most endangered first
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder {
            tree: self,
            stack: Vec::new(),
            current: self.root,
        }
    }

    /// In-order walk with population change since first insertion
    pub fn ranked<'a>(
        &'a self,
        initials: &'a InitialPopulations,
    ) -> impl Iterator<Item = RankedEntry> + 'a {
        self.in_order().map(move |node| RankedEntry {
            species: node.id.clone(),
            risk_level: node.risk_level,
            population: node.population,
            delta: initials.delta(&node.id, node.population),
        })
    }

    /// Get the node for a species
    pub fn get(&self, id: &SpeciesId) -> Option<&RiskNode> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    /// Check whether a species has a node
    pub fn contains(&self, id: &SpeciesId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of levels on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((slot, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[slot];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// In-order iterator over a [`RiskTree`]
pub struct InOrder<'a> {
    tree: &'a RiskTree,
    stack: Vec<usize>,
    current: Option<usize>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a RiskNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.current {
            self.stack.push(slot);
            self.current = self.tree.nodes[slot].left;
        }
        let slot = self.stack.pop()?;
        let node = &self.tree.nodes[slot];
        self.current = node.right;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> SpeciesId {
        SpeciesId::new(name)
    }

    fn names(tree: &RiskTree) -> Vec<String> {
        tree.in_order().map(|n| n.id.to_string()).collect()
    }

    #[test]
    fn test_in_order_by_risk_level() {
        let mut tree = RiskTree::new();
        tree.insert(id("Deer"), 3, 5);
        tree.insert(id("Tiger"), 1, 10);
        tree.insert(id("Grass"), 5, 0);
        tree.insert(id("Eagle"), 2, 60);

        assert_eq!(names(&tree), vec!["Tiger", "Eagle", "Deer", "Grass"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut tree = RiskTree::new();
        tree.insert(id("B"), 2, 1);
        tree.insert(id("A"), 2, 1);
        tree.insert(id("C"), 2, 1);
        tree.insert(id("Z"), 1, 1);

        assert_eq!(names(&tree), vec!["Z", "B", "A", "C"]);
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut tree = RiskTree::new();
        assert!(tree.insert(id("Tiger"), 1, 10));
        assert!(!tree.insert(id("tiger"), 4, 99));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&id("Tiger")).unwrap().population, 10);
    }

    #[test]
    fn test_update_by_identifier_when_name_order_diverges() {
        // Root "Zebra"; a name-ordered search for "Aardvark" would go left,
        // but risk ordering put it on the right.
        let mut tree = RiskTree::new();
        tree.insert(id("Zebra"), 1, 100);
        tree.insert(id("Aardvark"), 5, 40);
        tree.insert(id("Mole"), 3, 70);

        assert!(tree.update_by_identifier(&id("Aardvark"), 4, 41));
        assert!(tree.update_by_identifier(&id("Mole"), 2, 71));

        let aardvark = tree.get(&id("Aardvark")).unwrap();
        assert_eq!((aardvark.risk_level, aardvark.population), (4, 41));
        let mole = tree.get(&id("Mole")).unwrap();
        assert_eq!((mole.risk_level, mole.population), (2, 71));
    }

    #[test]
    fn test_update_does_not_reorder() {
        let mut tree = RiskTree::new();
        tree.insert(id("Tiger"), 1, 10);
        tree.insert(id("Deer"), 3, 5);

        tree.update_by_identifier(&id("Tiger"), 5, 10);

        assert_eq!(names(&tree), vec!["Tiger", "Deer"]);
        assert_eq!(tree.in_order().next().unwrap().risk_level, 5);
    }

    #[test]
    fn test_update_unknown_identifier() {
        let mut tree = RiskTree::new();
        tree.insert(id("Tiger"), 1, 10);
        assert!(!tree.update_by_identifier(&id("Dodo"), 1, 1));
        assert_eq!(tree.update_population_everywhere(&id("Dodo"), 1), 0);
    }

    #[test]
    fn test_update_population_everywhere() {
        let mut tree = RiskTree::new();
        tree.insert(id("Zebra"), 1, 100);
        tree.insert(id("Aardvark"), 5, 40);
        tree.insert(id("Mole"), 3, 70);

        assert_eq!(tree.update_population_everywhere(&id("mole"), 0), 1);
        assert_eq!(tree.get(&id("Mole")).unwrap().population, 0);
    }

    #[test]
    fn test_in_order_is_restartable() {
        let mut tree = RiskTree::new();
        tree.insert(id("Deer"), 3, 5);
        tree.insert(id("Tiger"), 1, 10);

        let first: Vec<_> = tree.in_order().collect();
        let second: Vec<_> = tree.in_order().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ranked_reports_delta() {
        let mut initials = InitialPopulations::default();
        initials.record_once(&id("Deer"), 5);

        let mut tree = RiskTree::new();
        tree.insert(id("Deer"), 3, 5);
        tree.insert(id("Grass"), 5, 0);
        tree.update_population_everywhere(&id("Deer"), 12);

        let ranked: Vec<_> = tree.ranked(&initials).collect();
        assert_eq!(ranked[0].delta, 7);
        assert_eq!(ranked[1].delta, 0);
    }

    #[test]
    fn test_sorted_insertion_degenerates_without_overflow() {
        let mut tree = RiskTree::new();
        for i in 0..10_000u32 {
            tree.insert(id(&format!("s{i}")), 3, u64::from(i));
        }
        assert_eq!(tree.depth(), 10_000);
        assert_eq!(tree.in_order().count(), 10_000);
        assert_eq!(tree.update_population_everywhere(&id("s9999"), 1), 1);
    }

    #[test]
    fn test_empty_tree() {
        let tree = RiskTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.in_order().next(), None);
    }
}
