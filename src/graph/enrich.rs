//! Derived node attributes: subsystem tagging and reference counts.

use std::collections::HashMap;

use super::types::{Edge, Graph, Node};

/// Subsystem names recognized anywhere in a path, case-insensitively.
/// The lowest-priority heuristic; structural markers win over it.
const KNOWN_SUBSYSTEMS: &[&str] = &[
	"cronos", "atlas", "nexus", "koios", "ethik", "coruja", "harmony", "vibe", "slop",
];

/// Sentinel subsystem for nodes whose path matches no heuristic.
pub const OTHER_SUBSYSTEM: &str = "OTHER";

/// Derive a subsystem label from a file path.
///
/// Segments are tested in priority order, first match wins:
/// 1. the segment following a `subsystems` directory marker,
/// 2. any all-uppercase segment of length >= 3,
/// 3. any segment in the known-subsystem list (case-insensitive).
///
/// The result is uppercased; paths matching nothing get [`OTHER_SUBSYSTEM`].
pub fn subsystem_of(path: &str) -> String {
	let segments: Vec<&str> = path
		.split(['/', '\\'])
		.filter(|s| !s.is_empty())
		.collect();

	for (i, segment) in segments.iter().enumerate() {
		if segment.eq_ignore_ascii_case("subsystems") {
			if let Some(next) = segments.get(i + 1) {
				return next.to_uppercase();
			}
		}
	}

	for segment in &segments {
		if segment.len() >= 3
			&& segment.chars().all(|c| c.is_ascii_uppercase())
		{
			return segment.to_string();
		}
	}

	for segment in &segments {
		if KNOWN_SUBSYSTEMS
			.iter()
			.any(|known| segment.eq_ignore_ascii_case(known))
		{
			return segment.to_uppercase();
		}
	}

	OTHER_SUBSYSTEM.to_string()
}

/// Recompute `references` / `referenced_by` for every node from the edge set.
///
/// Raw counts carried by the input are advisory only and are overwritten
/// here. Must run again whenever the edge set changes.
pub(crate) fn recount(nodes: &mut [Node], edges: &[Edge]) {
	let mut outgoing: HashMap<&str, u32> = HashMap::new();
	let mut incoming: HashMap<&str, u32> = HashMap::new();
	for edge in edges {
		*outgoing.entry(edge.source.as_str()).or_insert(0) += 1;
		*incoming.entry(edge.target.as_str()).or_insert(0) += 1;
	}

	for node in nodes {
		node.references = outgoing.get(node.id.as_str()).copied().unwrap_or(0);
		node.referenced_by = incoming.get(node.id.as_str()).copied().unwrap_or(0);
	}
}

impl Graph {
	/// Unique file types present in the graph, sorted alphabetically.
	pub fn file_types(&self) -> Vec<String> {
		let mut types: Vec<String> = self
			.nodes()
			.iter()
			.map(|n| n.kind.clone())
			.collect();
		types.sort();
		types.dedup();
		types
	}

	/// Unique subsystems present in the graph, sorted alphabetically.
	pub fn subsystems(&self) -> Vec<String> {
		let mut subsystems: Vec<String> = self
			.nodes()
			.iter()
			.map(|n| n.subsystem.clone())
			.collect();
		subsystems.sort();
		subsystems.dedup();
		subsystems
	}

	/// The largest connection count any node has. Useful as the upper bound
	/// of a connection-threshold control.
	pub fn max_connections(&self) -> u32 {
		self.nodes()
			.iter()
			.map(Node::connections)
			.max()
			.unwrap_or(0)
	}

	/// Nodes sorted by incoming reference count, descending, capped at
	/// `limit`. Ties keep dataset iteration order.
	pub fn top_referenced(&self, limit: usize) -> Vec<&Node> {
		let mut ranked: Vec<&Node> = self.nodes().iter().collect();
		ranked.sort_by(|a, b| b.referenced_by.cmp(&a.referenced_by));
		ranked.truncate(limit);
		ranked
	}
}
