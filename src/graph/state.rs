//! Interaction tracking and highlight derivation.
//!
//! Hover and selection never touch the graph data or computed layout; they
//! only feed a render-time overlay recomputed from the current graph on each
//! render pass. The state machine: `Idle` -> `Hovering(node)` (transient,
//! reverts on leave) -> `Selected(node)` (persists until a background click
//! or re-selection). An active selection suppresses hover-derived
//! highlighting.

use std::collections::HashSet;

use super::types::Graph;

/// Current hover/selection state, owned by the interactive session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
	hovered: Option<String>,
	selected: Option<String>,
}

impl InteractionState {
	/// A fresh, idle state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Enter or leave a node. `None` signifies hover-out.
	pub fn hover(&mut self, node: Option<&str>) {
		self.hovered = node.map(str::to_owned);
	}

	/// Select a node, locking its highlight until deselection.
	pub fn select(&mut self, node: &str) {
		self.selected = Some(node.to_owned());
	}

	/// Background click: clear the selection.
	pub fn deselect(&mut self) {
		self.selected = None;
	}

	/// The hovered node, if any.
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// The selected node, if any.
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// The node whose neighborhood should be highlighted: the selection when
	/// present, otherwise the hovered node.
	pub fn focus(&self) -> Option<&str> {
		self.selected.as_deref().or(self.hovered.as_deref())
	}

	/// Whether nothing is hovered or selected.
	pub fn is_idle(&self) -> bool {
		self.hovered.is_none() && self.selected.is_none()
	}
}

/// Per-render visual state derived from the graph and interaction state.
///
/// `highlighted_nodes` is exactly the 1-hop neighbor set of the focused
/// node; `highlighted_edges` exactly the edges touching it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderState {
	/// The hovered node, if any.
	pub hovered: Option<String>,
	/// The selected node, if any.
	pub selected: Option<String>,
	/// 1-hop neighbors of the focused node (the focus itself excluded).
	pub highlighted_nodes: HashSet<String>,
	/// Edges connecting the focused node to its neighbors.
	pub highlighted_edges: HashSet<String>,
}

impl RenderState {
	/// Derive the highlight sets by traversing one hop of adjacency from
	/// the focused node. Idle state yields empty sets.
	pub fn derive(graph: &Graph, interaction: &InteractionState) -> Self {
		let mut state = Self {
			hovered: interaction.hovered().map(str::to_owned),
			selected: interaction.selected().map(str::to_owned),
			..Self::default()
		};

		let Some(focus) = interaction.focus() else {
			return state;
		};

		for edge in graph.edges() {
			if !edge.touches(focus) {
				continue;
			}
			state.highlighted_edges.insert(edge.id.clone());
			if edge.source != focus {
				state.highlighted_nodes.insert(edge.source.clone());
			}
			if edge.target != focus {
				state.highlighted_nodes.insert(edge.target.clone());
			}
		}
		state
	}

	/// Whether the node is the focus or one of its highlighted neighbors.
	pub fn emphasizes(&self, id: &str) -> bool {
		self.selected.as_deref() == Some(id)
			|| (self.selected.is_none() && self.hovered.as_deref() == Some(id))
			|| self.highlighted_nodes.contains(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::ingest;
	use crate::graph::types::{GraphData, RawEdge, RawNode};

	fn chain_graph() -> Graph {
		// A -> B -> C, as in the duplicate-edge ingestion scenario.
		let node = |id: &str| RawNode {
			id: id.into(),
			label: id.into(),
			path: format!("docs/{id}.md"),
			kind: "markdown".into(),
			..RawNode::default()
		};
		let edge = |s: &str, t: &str| RawEdge {
			source: s.into(),
			target: t.into(),
			..RawEdge::default()
		};
		ingest::build(GraphData {
			nodes: vec![node("A"), node("B"), node("C")],
			edges: vec![edge("A", "B"), edge("B", "C")],
		})
	}

	#[test]
	fn selecting_highlights_exactly_one_hop() {
		let graph = chain_graph();
		let mut interaction = InteractionState::new();
		interaction.select("B");

		let state = RenderState::derive(&graph, &interaction);
		assert_eq!(
			state.highlighted_nodes,
			HashSet::from(["A".to_string(), "C".to_string()])
		);
		assert_eq!(state.highlighted_edges.len(), 2);
	}

	#[test]
	fn hover_is_transient() {
		let graph = chain_graph();
		let mut interaction = InteractionState::new();

		interaction.hover(Some("A"));
		let state = RenderState::derive(&graph, &interaction);
		assert_eq!(state.highlighted_nodes, HashSet::from(["B".to_string()]));

		interaction.hover(None);
		assert!(interaction.is_idle());
		let state = RenderState::derive(&graph, &interaction);
		assert!(state.highlighted_nodes.is_empty());
		assert!(state.highlighted_edges.is_empty());
	}

	#[test]
	fn selection_suppresses_hover_highlighting() {
		let graph = chain_graph();
		let mut interaction = InteractionState::new();
		interaction.select("A");
		interaction.hover(Some("C"));

		let state = RenderState::derive(&graph, &interaction);
		// The highlight follows the selection, not the hover.
		assert_eq!(state.highlighted_nodes, HashSet::from(["B".to_string()]));
		assert!(state.emphasizes("A"));
		assert!(!state.emphasizes("C"));
	}

	#[test]
	fn deselect_returns_to_hover_or_idle() {
		let graph = chain_graph();
		let mut interaction = InteractionState::new();
		interaction.select("B");
		interaction.deselect();
		assert!(interaction.is_idle());

		let state = RenderState::derive(&graph, &interaction);
		assert_eq!(state, RenderState::default());
	}

	#[test]
	fn reselection_moves_the_highlight() {
		let graph = chain_graph();
		let mut interaction = InteractionState::new();
		interaction.select("A");
		interaction.select("C");

		let state = RenderState::derive(&graph, &interaction);
		assert_eq!(state.highlighted_nodes, HashSet::from(["B".to_string()]));
	}

	#[test]
	fn self_loops_highlight_the_edge_but_not_the_node() {
		let node = |id: &str| RawNode {
			id: id.into(),
			label: id.into(),
			path: format!("docs/{id}.md"),
			kind: "markdown".into(),
			..RawNode::default()
		};
		let edge = |s: &str, t: &str| RawEdge {
			source: s.into(),
			target: t.into(),
			..RawEdge::default()
		};
		let graph = ingest::build(GraphData {
			nodes: vec![node("A"), node("B")],
			edges: vec![edge("A", "A"), edge("A", "B")],
		});

		let mut interaction = InteractionState::new();
		interaction.select("A");
		let state = RenderState::derive(&graph, &interaction);

		assert_eq!(state.highlighted_nodes, HashSet::from(["B".to_string()]));
		assert_eq!(state.highlighted_edges.len(), 2);
	}

	#[test]
	fn derivation_leaves_graph_untouched() {
		let graph = chain_graph();
		let before = graph.clone();
		let mut interaction = InteractionState::new();
		interaction.select("B");
		let _ = RenderState::derive(&graph, &interaction);

		assert_eq!(graph.nodes(), before.nodes());
		assert_eq!(graph.edges(), before.edges());
	}
}
