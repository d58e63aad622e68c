//! Dataset validation: builds a consistent [`Graph`] from raw records.
//!
//! Datasets are generated and evolving, so validation is deliberately
//! lenient: offending records are skipped with a warning and ingestion
//! continues. Only the surviving, consistent graph is returned.

use std::collections::HashSet;

use log::{debug, warn};

use super::enrich;
use super::types::{Edge, Graph, GraphData, Node};

/// Validate a raw dataset into a [`Graph`].
///
/// - Nodes missing `id`, `type`, or `path` are skipped.
/// - Duplicate node ids keep the first occurrence.
/// - Edges referencing a missing node are dropped.
/// - Duplicate `(source, target)` pairs keep the first occurrence.
/// - Missing edge ids are derived as `edge-{index}`; absent or non-positive
///   weights default to 1.0.
///
/// Subsystems are derived from paths and reference counts recomputed from
/// the surviving edge set before the graph is returned.
pub fn build(data: GraphData) -> Graph {
	let mut nodes = Vec::with_capacity(data.nodes.len());
	let mut seen_ids = HashSet::new();

	for raw in data.nodes {
		if raw.id.is_empty() || raw.kind.is_empty() || raw.path.is_empty() {
			warn!(
				"skipping node with missing required fields (id={:?}, type={:?}, path={:?})",
				raw.id, raw.kind, raw.path
			);
			continue;
		}
		if !seen_ids.insert(raw.id.clone()) {
			warn!("skipping duplicate node id {:?}", raw.id);
			continue;
		}

		let subsystem = enrich::subsystem_of(&raw.path);
		let label = if raw.label.is_empty() {
			raw.id.clone()
		} else {
			raw.label
		};
		nodes.push(Node {
			id: raw.id,
			label,
			path: raw.path,
			kind: raw.kind,
			references: 0,
			referenced_by: 0,
			has_mqp: raw.has_mqp,
			has_roadmap: raw.has_roadmap,
			is_core: raw.is_core,
			last_modified: raw.last_modified,
			subsystem,
		});
	}

	let mut edges = Vec::with_capacity(data.edges.len());
	let mut seen_pairs = HashSet::new();
	let mut seen_edge_ids = HashSet::new();

	for (i, raw) in data.edges.into_iter().enumerate() {
		if !seen_ids.contains(&raw.source) || !seen_ids.contains(&raw.target) {
			warn!(
				"dropping edge {} -> {}: missing endpoint",
				raw.source, raw.target
			);
			continue;
		}
		if !seen_pairs.insert((raw.source.clone(), raw.target.clone())) {
			debug!("skipping duplicate edge {} -> {}", raw.source, raw.target);
			continue;
		}

		let id = raw.id.unwrap_or_else(|| format!("edge-{i}"));
		if !seen_edge_ids.insert(id.clone()) {
			warn!("skipping edge with duplicate id {id:?}");
			continue;
		}
		let weight = raw
			.weight
			.filter(|w| w.is_finite() && *w > 0.0)
			.unwrap_or(1.0);
		edges.push(Edge {
			id,
			source: raw.source,
			target: raw.target,
			weight,
		});
	}

	enrich::recount(&mut nodes, &edges);
	Graph::from_parts(nodes, edges)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::{RawEdge, RawNode};

	fn raw_node(id: &str) -> RawNode {
		RawNode {
			id: id.into(),
			label: id.into(),
			path: format!("subsystems/KOIOS/{id}.md"),
			kind: "markdown".into(),
			..RawNode::default()
		}
	}

	fn raw_edge(source: &str, target: &str) -> RawEdge {
		RawEdge {
			source: source.into(),
			target: target.into(),
			..RawEdge::default()
		}
	}

	#[test]
	fn duplicate_edges_keep_first_occurrence() {
		// Nodes [A,B,C], edges [(A->B), (A->B), (B->C)] yields two edges.
		let data = GraphData {
			nodes: vec![raw_node("A"), raw_node("B"), raw_node("C")],
			edges: vec![raw_edge("A", "B"), raw_edge("A", "B"), raw_edge("B", "C")],
		};
		let graph = build(data);

		assert_eq!(graph.edge_count(), 2);
		assert_eq!(graph.node("A").unwrap().references, 1);
		assert_eq!(graph.node("B").unwrap().referenced_by, 1);
		assert_eq!(graph.node("B").unwrap().references, 1);
		assert_eq!(graph.node("C").unwrap().referenced_by, 1);
	}

	#[test]
	fn dangling_edges_are_dropped() {
		let data = GraphData {
			nodes: vec![raw_node("A")],
			edges: vec![raw_edge("A", "Z")],
		};
		let graph = build(data);

		assert_eq!(graph.node_count(), 1);
		assert_eq!(graph.edge_count(), 0);
		assert_eq!(graph.node("A").unwrap().references, 0);
	}

	#[test]
	fn malformed_nodes_are_skipped_not_fatal() {
		let mut missing_path = raw_node("B");
		missing_path.path = String::new();
		let mut missing_kind = raw_node("C");
		missing_kind.kind = String::new();
		let data = GraphData {
			nodes: vec![raw_node("A"), missing_path, missing_kind],
			edges: vec![raw_edge("A", "B")],
		};
		let graph = build(data);

		assert_eq!(graph.node_count(), 1);
		assert!(graph.contains_node("A"));
		// The edge to the skipped node dangles and is dropped too.
		assert_eq!(graph.edge_count(), 0);
	}

	#[test]
	fn duplicate_node_ids_keep_first_occurrence() {
		let mut second = raw_node("A");
		second.label = "second".into();
		let data = GraphData {
			nodes: vec![raw_node("A"), second],
			edges: vec![],
		};
		let graph = build(data);

		assert_eq!(graph.node_count(), 1);
		assert_eq!(graph.node("A").unwrap().label, "A");
	}

	#[test]
	fn edge_ids_and_weights_are_defaulted() {
		let mut weighted = raw_edge("A", "B");
		weighted.id = Some("custom".into());
		weighted.weight = Some(2.5);
		let mut bad_weight = raw_edge("B", "A");
		bad_weight.weight = Some(-3.0);
		let data = GraphData {
			nodes: vec![raw_node("A"), raw_node("B")],
			edges: vec![weighted, bad_weight],
		};
		let graph = build(data);

		assert_eq!(graph.edges()[0].id, "custom");
		assert_eq!(graph.edges()[0].weight, 2.5);
		assert_eq!(graph.edges()[1].id, "edge-1");
		assert_eq!(graph.edges()[1].weight, 1.0);
	}

	#[test]
	fn duplicate_edge_ids_keep_first_occurrence() {
		let mut first = raw_edge("A", "B");
		first.id = Some("e".into());
		let mut second = raw_edge("B", "A");
		second.id = Some("e".into());
		let data = GraphData {
			nodes: vec![raw_node("A"), raw_node("B")],
			edges: vec![first, second],
		};
		let graph = build(data);

		assert_eq!(graph.edge_count(), 1);
		assert_eq!(graph.edges()[0].source, "A");
	}

	#[test]
	fn advisory_counts_are_overwritten() {
		let mut inflated = raw_node("A");
		inflated.references = 99;
		inflated.referenced_by = 99;
		let data = GraphData {
			nodes: vec![inflated, raw_node("B")],
			edges: vec![raw_edge("A", "B")],
		};
		let graph = build(data);

		assert_eq!(graph.node("A").unwrap().references, 1);
		assert_eq!(graph.node("A").unwrap().referenced_by, 0);
	}

	#[test]
	fn labels_fall_back_to_the_id() {
		let mut unlabeled = raw_node("A");
		unlabeled.label = String::new();
		let data = GraphData {
			nodes: vec![unlabeled],
			edges: vec![],
		};
		let graph = build(data);

		assert_eq!(graph.node("A").unwrap().label, "A");
	}
}
