//! Synthetic dataset generation for tests and benchmarks.
//!
//! Produces raw datasets with the same shape and quirks as real ones:
//! advisory reference counts, subsystem-flavored paths, and a connectivity
//! floor of one outgoing edge per node.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{GraphData, RawEdge, RawNode};

const SUBSYSTEMS: &[&str] = &[
	"KOIOS", "CRONOS", "ETHIK", "CORUJA", "ATLAS", "NEXUS", "HARMONY", "VIBE", "OTHER",
];

const FILE_TYPES: &[&str] = &[
	"markdown",
	"python",
	"typescript",
	"json",
	"yaml",
	"javascript",
	"css",
	"html",
	"rust",
	"cpp",
	"c",
	"go",
];

/// Shape of a generated dataset.
#[derive(Clone, Debug)]
pub struct SynthParams {
	/// Number of nodes.
	pub node_count: usize,
	/// Fraction of all possible ordered pairs to connect, 0.0 to 1.0.
	pub edge_density: f64,
	/// Number of distinct subsystems to draw from.
	pub subsystem_count: usize,
	/// Number of distinct file types to draw from.
	pub file_type_count: usize,
}

impl Default for SynthParams {
	fn default() -> Self {
		Self {
			node_count: 1000,
			edge_density: 0.01,
			subsystem_count: 8,
			file_type_count: 10,
		}
	}
}

/// Generate a seeded synthetic dataset.
///
/// Every node gets at least one outgoing edge; additional edges are added
/// up to the density target with a bounded attempt count, skipping
/// self-references and already-connected pairs. Weights fall in `[1, 6)`.
/// Advisory reference counts are filled in so the dataset exercises the
/// overwrite-on-ingest policy.
pub fn generate(params: &SynthParams, seed: u64) -> GraphData {
	let n = params.node_count;
	if n == 0 {
		return GraphData::default();
	}
	let mut rng = StdRng::seed_from_u64(seed);
	let density = params.edge_density.clamp(0.0, 1.0);
	let subsystems = &SUBSYSTEMS[..params.subsystem_count.clamp(1, SUBSYSTEMS.len())];
	let file_types = &FILE_TYPES[..params.file_type_count.clamp(1, FILE_TYPES.len())];

	let mut nodes: Vec<RawNode> = (0..n)
		.map(|i| {
			let subsystem = subsystems[rng.gen_range(0..subsystems.len())];
			let file_type = file_types[rng.gen_range(0..file_types.len())];
			let name = format!("file-{i}.{file_type}");
			RawNode {
				id: name.clone(),
				label: name,
				path: format!(
					"EGOS/subsystems/{}/src/file-{i}.{file_type}",
					subsystem.to_lowercase()
				),
				kind: file_type.to_string(),
				has_mqp: rng.gen_bool(0.3),
				has_roadmap: rng.gen_bool(0.25),
				is_core: rng.gen_bool(0.15),
				last_modified: "2025-05-21T00:00:00Z".to_string(),
				..RawNode::default()
			}
		})
		.collect();

	let mut edges = Vec::new();
	let mut pairs = std::collections::HashSet::new();

	// Connectivity floor: every node references someone.
	for i in 0..n {
		if n == 1 {
			break;
		}
		let mut target = rng.gen_range(0..n);
		while target == i {
			target = rng.gen_range(0..n);
		}
		pairs.insert((i, target));
		edges.push(RawEdge {
			id: Some(format!("edge-{i}-{target}")),
			source: nodes[i].id.clone(),
			target: nodes[target].id.clone(),
			weight: Some(rng.gen_range(1.0..6.0)),
		});
	}

	// Top up to the density target, bounded so sparse requests terminate.
	let target_count = ((n * (n - 1)) as f64 * density) as usize;
	let mut remaining = target_count.saturating_sub(edges.len());
	let mut attempts = remaining * 10;
	while remaining > 0 && attempts > 0 {
		attempts -= 1;
		let source = rng.gen_range(0..n);
		let target = rng.gen_range(0..n);
		if source == target || !pairs.insert((source, target)) {
			continue;
		}
		edges.push(RawEdge {
			id: Some(format!("edge-{}", edges.len())),
			source: nodes[source].id.clone(),
			target: nodes[target].id.clone(),
			weight: Some(rng.gen_range(1.0..6.0)),
		});
		remaining -= 1;
	}

	// Advisory counts, as real generated datasets carry them.
	for node in &mut nodes {
		node.references = edges.iter().filter(|e| e.source == node.id).count() as u32;
		node.referenced_by = edges.iter().filter(|e| e.target == node.id).count() as u32;
	}

	GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generation_is_deterministic_per_seed() {
		let params = SynthParams {
			node_count: 50,
			..SynthParams::default()
		};
		let a = generate(&params, 3);
		let b = generate(&params, 3);

		assert_eq!(a.nodes.len(), b.nodes.len());
		for (x, y) in a.edges.iter().zip(&b.edges) {
			assert_eq!((&x.source, &x.target), (&y.source, &y.target));
		}
	}

	#[test]
	fn every_node_has_an_outgoing_edge() {
		let params = SynthParams {
			node_count: 40,
			edge_density: 0.0,
			..SynthParams::default()
		};
		let data = generate(&params, 1);

		for node in &data.nodes {
			assert!(data.edges.iter().any(|e| e.source == node.id));
		}
	}

	#[test]
	fn no_self_references_or_duplicate_pairs() {
		let params = SynthParams {
			node_count: 30,
			edge_density: 0.1,
			..SynthParams::default()
		};
		let data = generate(&params, 9);

		let mut seen = std::collections::HashSet::new();
		for edge in &data.edges {
			assert_ne!(edge.source, edge.target);
			assert!(seen.insert((edge.source.clone(), edge.target.clone())));
		}
	}

	#[test]
	fn zero_nodes_yields_an_empty_dataset() {
		let params = SynthParams {
			node_count: 0,
			..SynthParams::default()
		};
		let data = generate(&params, 1);
		assert!(data.nodes.is_empty());
		assert!(data.edges.is_empty());
	}
}
