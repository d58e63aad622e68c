//! Predicate composition over node attributes.
//!
//! A [`FilterSpec`] is an immutable value object combining a closed set of
//! predicates with AND semantics. Applying it never mutates the input graph;
//! the result is a new graph over the surviving nodes and the edges whose
//! endpoints both survive, so layout positions keyed by node id stay valid.

use std::collections::HashSet;

use super::types::{Graph, Node};

/// The active inclusion predicates applied to the graph for display.
///
/// An empty set or `None` deactivates the corresponding predicate; the
/// default spec passes every node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
	/// File types to keep. Empty = no restriction.
	pub file_types: HashSet<String>,
	/// Subsystems to keep (uppercase, as derived). Empty = no restriction.
	pub subsystems: HashSet<String>,
	/// Minimum `references + referenced_by` a node must have.
	pub min_connections: u32,
	/// Keep only core (`Some(true)`) or non-core (`Some(false)`) nodes.
	pub show_core: Option<bool>,
	/// Case-insensitive substring matched against label or path.
	/// Empty = no restriction.
	pub search_term: String,
}

impl FilterSpec {
	/// Whether every predicate is inactive, i.e. applying the spec returns
	/// the full graph.
	pub fn is_unrestricted(&self) -> bool {
		self.file_types.is_empty()
			&& self.subsystems.is_empty()
			&& self.min_connections == 0
			&& self.show_core.is_none()
			&& self.search_term.is_empty()
	}

	/// Whether a single node passes every active predicate.
	pub fn matches(&self, node: &Node) -> bool {
		if !self.file_types.is_empty() && !self.file_types.contains(&node.kind) {
			return false;
		}
		if !self.subsystems.is_empty() && !self.subsystems.contains(&node.subsystem) {
			return false;
		}
		if node.connections() < self.min_connections {
			return false;
		}
		if let Some(core) = self.show_core {
			if node.is_core != core {
				return false;
			}
		}
		if !self.search_term.is_empty() {
			let term = self.search_term.to_lowercase();
			if !node.label.to_lowercase().contains(&term)
				&& !node.path.to_lowercase().contains(&term)
			{
				return false;
			}
		}
		true
	}

	/// Apply the filter, producing a new graph over the surviving nodes and
	/// the edges connecting them.
	///
	/// Pure and idempotent: the input is untouched, and reference counts are
	/// carried over from it rather than recomputed, so a connection
	/// threshold keeps meaning "connections in the ingested graph" under
	/// repeated application.
	pub fn apply(&self, graph: &Graph) -> Graph {
		let nodes: Vec<Node> = graph
			.nodes()
			.iter()
			.filter(|n| self.matches(n))
			.cloned()
			.collect();

		let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let edges = graph
			.edges()
			.iter()
			.filter(|e| kept.contains(e.source.as_str()) && kept.contains(e.target.as_str()))
			.cloned()
			.collect();

		Graph::from_parts(nodes, edges)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::ingest;
	use crate::graph::types::{GraphData, RawEdge, RawNode};

	fn dataset() -> Graph {
		let node = |id: &str, kind: &str, path: &str, core: bool| RawNode {
			id: id.into(),
			label: id.into(),
			path: path.into(),
			kind: kind.into(),
			is_core: core,
			..RawNode::default()
		};
		let edge = |s: &str, t: &str| RawEdge {
			source: s.into(),
			target: t.into(),
			..RawEdge::default()
		};
		ingest::build(GraphData {
			nodes: vec![
				node("A", "markdown", "subsystems/KOIOS/a.md", true),
				node("B", "python", "subsystems/KOIOS/b.py", false),
				node("C", "python", "subsystems/ETHIK/c.py", false),
				node("D", "yaml", "config/d.yaml", false),
				node("E", "markdown", "docs/e.md", false),
			],
			// A has 2 connections, everything else at most 1.
			edges: vec![edge("A", "B"), edge("C", "A")],
		})
	}

	#[test]
	fn unrestricted_spec_returns_the_full_graph() {
		let graph = dataset();
		let spec = FilterSpec::default();
		assert!(spec.is_unrestricted());

		let filtered = spec.apply(&graph);
		assert_eq!(filtered.nodes(), graph.nodes());
		assert_eq!(filtered.edges(), graph.edges());
	}

	#[test]
	fn connection_threshold_can_strand_a_node() {
		// Only A reaches 2 connections; its neighbors are filtered out, so
		// the result is one node and zero edges.
		let graph = dataset();
		let spec = FilterSpec {
			min_connections: 2,
			..FilterSpec::default()
		};

		let filtered = spec.apply(&graph);
		assert_eq!(filtered.node_count(), 1);
		assert!(filtered.contains_node("A"));
		assert_eq!(filtered.edge_count(), 0);
	}

	#[test]
	fn application_is_pure_and_idempotent() {
		let graph = dataset();
		let before = graph.clone();
		let spec = FilterSpec {
			min_connections: 2,
			..FilterSpec::default()
		};

		let once = spec.apply(&graph);
		assert_eq!(graph.nodes(), before.nodes());
		assert_eq!(graph.edges(), before.edges());

		let twice = spec.apply(&once);
		assert_eq!(twice.nodes(), once.nodes());
		assert_eq!(twice.edges(), once.edges());
	}

	#[test]
	fn predicates_combine_with_and_semantics() {
		let graph = dataset();
		let spec = FilterSpec {
			file_types: ["python".to_string()].into(),
			subsystems: ["KOIOS".to_string()].into(),
			..FilterSpec::default()
		};

		let filtered = spec.apply(&graph);
		assert_eq!(filtered.node_count(), 1);
		assert!(filtered.contains_node("B"));
		for node in filtered.nodes() {
			assert!(spec.matches(node));
		}
	}

	#[test]
	fn core_flag_filters_both_ways() {
		let graph = dataset();
		let core_only = FilterSpec {
			show_core: Some(true),
			..FilterSpec::default()
		};
		assert_eq!(core_only.apply(&graph).node_count(), 1);

		let non_core = FilterSpec {
			show_core: Some(false),
			..FilterSpec::default()
		};
		assert_eq!(non_core.apply(&graph).node_count(), 4);
	}

	#[test]
	fn search_matches_label_or_path_case_insensitively() {
		let graph = dataset();
		let by_label = FilterSpec {
			search_term: "a".into(),
			..FilterSpec::default()
		};
		assert!(by_label.apply(&graph).contains_node("A"));

		let by_path = FilterSpec {
			search_term: "CONFIG".into(),
			..FilterSpec::default()
		};
		let filtered = by_path.apply(&graph);
		assert_eq!(filtered.node_count(), 1);
		assert!(filtered.contains_node("D"));
	}

	#[test]
	fn edges_survive_only_with_both_endpoints() {
		let graph = dataset();
		let spec = FilterSpec {
			subsystems: ["KOIOS".to_string()].into(),
			..FilterSpec::default()
		};

		let filtered = spec.apply(&graph);
		// A and B survive; the C -> A edge loses its source.
		assert_eq!(filtered.node_count(), 2);
		assert_eq!(filtered.edge_count(), 1);
		assert_eq!(filtered.edges()[0].source, "A");
	}
}
