//! Choice graph module.
//!
//! Provides the `ChoiceGraph` type, which records which features a choice
//! can expand into. Catalog content is meant to form a DAG; the graph finds
//! the places where it does not, so content authors can fix them before the
//! resolver has to cut the branch at runtime.

use crate::error::HeroError;
use crate::id::Id;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// A directed graph of choice features and their options.
///
/// Nodes are feature ids. An edge `a -> b` means choice `a` offers a
/// feature with id `b` as an option. Features sharing an id share a node,
/// matching how the resolver tracks ids on its path.
///
/// # Examples
///
/// ```rust
/// use herostat::graph::ChoiceGraph;
/// use herostat::Id;
///
/// let mut graph = ChoiceGraph::new();
/// graph.add_option(Id::new("boon"), Id::new("boon-might"));
/// assert!(graph.cycles().is_empty());
///
/// graph.add_option(Id::new("boon-might"), Id::new("boon"));
/// assert_eq!(graph.cycles().len(), 1);
/// ```
pub struct ChoiceGraph {
    graph: DiGraph<Id, ()>,
    node_map: HashMap<Id, NodeIndex>,
}

impl ChoiceGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a feature node if it doesn't exist and return its index.
    pub fn add_feature(&mut self, id: Id) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&id) {
            idx
        } else {
            let idx = self.graph.add_node(id.clone());
            self.node_map.insert(id, idx);
            idx
        }
    }

    /// Record that choice `choice` offers `option`.
    ///
    /// Both nodes are added if missing. Repeated edges are ignored.
    pub fn add_option(&mut self, choice: Id, option: Id) {
        let from = self.add_feature(choice);
        let to = self.add_feature(option);
        self.graph.update_edge(from, to, ());
    }

    /// Check if a feature id is in the graph.
    pub fn contains_feature(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Number of distinct feature ids.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Every self-referential chain in the graph.
    ///
    /// Each strongly connected component with more than one node, or a
    /// single node pointing at itself, becomes one `HeroError::Cycle`. The
    /// path lists the component's ids in sorted order and repeats the
    /// first id to close the loop.
    pub fn cycles(&self) -> Vec<HeroError> {
        let mut cycles: Vec<Vec<Id>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                _ => true,
            })
            .map(|component| {
                let mut path: Vec<Id> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect();
                path.sort();
                path.push(path[0].clone());
                path
            })
            .collect();
        cycles.sort();
        cycles
            .into_iter()
            .map(|path| HeroError::Cycle { path })
            .collect()
    }
}

impl Default for ChoiceGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_feature_deduplicates() {
        let mut graph = ChoiceGraph::new();
        let a = graph.add_feature(Id::new("a"));
        let again = graph.add_feature(Id::new("a"));
        assert_eq!(a, again);
        assert_eq!(graph.len(), 1);
        assert!(graph.contains_feature("a"));
        assert!(!graph.contains_feature("b"));
    }

    #[test]
    fn test_dag_has_no_cycles() {
        let mut graph = ChoiceGraph::new();
        graph.add_option(Id::new("a"), Id::new("b"));
        graph.add_option(Id::new("a"), Id::new("c"));
        graph.add_option(Id::new("b"), Id::new("c"));
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn test_self_reference_detected() {
        let mut graph = ChoiceGraph::new();
        graph.add_option(Id::new("a"), Id::new("a"));
        let cycles = graph.cycles();
        assert_eq!(cycles.len(), 1);
        match &cycles[0] {
            HeroError::Cycle { path } => {
                assert_eq!(path, &vec![Id::new("a"), Id::new("a")]);
            }
            other => panic!("Expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_longer_cycle_path() {
        let mut graph = ChoiceGraph::new();
        graph.add_option(Id::new("c"), Id::new("a"));
        graph.add_option(Id::new("a"), Id::new("b"));
        graph.add_option(Id::new("b"), Id::new("c"));
        graph.add_option(Id::new("x"), Id::new("a"));

        let cycles = graph.cycles();
        assert_eq!(cycles.len(), 1);
        let display = cycles[0].to_string();
        assert!(display.contains("a -> b -> c -> a"));
    }

    #[test]
    fn test_repeated_edges_collapse() {
        let mut graph = ChoiceGraph::new();
        graph.add_option(Id::new("a"), Id::new("b"));
        graph.add_option(Id::new("a"), Id::new("b"));
        assert_eq!(graph.len(), 2);
        assert!(graph.cycles().is_empty());
    }
}
