//! Graph data structures: raw dataset records and the validated graph.

use std::collections::HashMap;

use serde::Deserialize;

/// A node record as it appears in a dataset, before validation.
///
/// Every field is defaulted so a partially malformed dataset still parses;
/// [`crate::graph::ingest::build`] decides which records survive.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawNode {
	/// Unique identifier. Required; records without one are skipped.
	#[serde(default)]
	pub id: String,
	/// Display label. Falls back to `id` when absent.
	#[serde(default)]
	pub label: String,
	/// File path the node represents. Required.
	#[serde(default)]
	pub path: String,
	/// File-type tag (e.g. "markdown", "python"). Required.
	#[serde(default, rename = "type")]
	pub kind: String,
	/// Advisory outgoing reference count. Always recomputed from edges.
	#[serde(default)]
	pub references: u32,
	/// Advisory incoming reference count. Always recomputed from edges.
	#[serde(default)]
	pub referenced_by: u32,
	/// Whether the file carries an MQP reference.
	#[serde(default)]
	pub has_mqp: bool,
	/// Whether the file carries a roadmap reference.
	#[serde(default)]
	pub has_roadmap: bool,
	/// Whether the node is flagged as structurally central.
	#[serde(default)]
	pub is_core: bool,
	/// Last-modified timestamp, kept as an opaque string.
	#[serde(default)]
	pub last_modified: String,
	/// Advisory subsystem tag. Always re-derived from `path`.
	#[serde(default)]
	pub subsystem: Option<String>,
}

/// A directed edge record as it appears in a dataset.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawEdge {
	/// Edge identifier. Derived as `edge-{index}` when absent.
	#[serde(default)]
	pub id: Option<String>,
	/// Source node ID.
	#[serde(default)]
	pub source: String,
	/// Target node ID.
	#[serde(default)]
	pub target: String,
	/// Edge weight. Defaults to 1.0 when absent or non-positive.
	#[serde(default)]
	pub weight: Option<f64>,
}

/// Complete raw dataset: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// Node records.
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	/// Edge records.
	#[serde(default)]
	pub edges: Vec<RawEdge>,
}

/// A validated node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique identifier.
	pub id: String,
	/// Display label, never empty.
	pub label: String,
	/// File path.
	pub path: String,
	/// File-type tag.
	pub kind: String,
	/// Outgoing reference count, recomputed from the edge set.
	pub references: u32,
	/// Incoming reference count, recomputed from the edge set.
	pub referenced_by: u32,
	/// Whether the file carries an MQP reference.
	pub has_mqp: bool,
	/// Whether the file carries a roadmap reference.
	pub has_roadmap: bool,
	/// Whether the node is flagged as structurally central.
	pub is_core: bool,
	/// Last-modified timestamp.
	pub last_modified: String,
	/// Subsystem label derived from `path`, `"OTHER"` when nothing matches.
	pub subsystem: String,
}

impl Node {
	/// Total connection count (outgoing + incoming references).
	pub fn connections(&self) -> u32 {
		self.references + self.referenced_by
	}

	/// Whether the node has no incoming references.
	pub fn is_orphaned(&self) -> bool {
		self.referenced_by == 0
	}
}

/// A validated directed edge. Both endpoints exist in the owning graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Unique edge identifier.
	pub id: String,
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Edge weight, always finite and positive.
	pub weight: f64,
}

impl Edge {
	/// Whether the edge touches the given node.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

/// A validated cross-reference graph.
///
/// Invariants maintained by construction: node ids are unique, every edge's
/// endpoints exist in the node set, and at most one edge exists per ordered
/// `(source, target)` pair.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	index: HashMap<String, usize>,
}

impl Graph {
	/// Assemble a graph from pre-validated parts. Callers guarantee the
	/// invariants above; this only builds the id index.
	pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		let index = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		Self {
			nodes,
			edges,
			index,
		}
	}

	/// All nodes, in dataset iteration order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edges, in dataset iteration order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Position of a node in [`Self::nodes`], if present.
	pub fn node_position(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Whether a node with the given id exists.
	pub fn contains_node(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether the graph has no nodes. An empty graph is a terminal,
	/// non-error state: layout yields an empty position map and the
	/// renderer shows its "no data" state.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
