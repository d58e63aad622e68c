//! Renderer-facing scene construction.
//!
//! A pure function from (graph, layout, interaction state) to the visual
//! attributes a rendering surface consumes: per-node `(id, x, y, size,
//! color, label)` and per-edge `(id, source, target, weight, color)`. The
//! drawing layer itself (canvas/WebGL/SVG) is an external collaborator; this
//! module never touches it.

use super::layout::{Layout, Position};
use super::state::{InteractionState, RenderState};
use super::theme::{self, Theme};
use super::types::Graph;

/// Base node radius before connection scaling.
const BASE_SIZE: f64 = 3.0;
/// Size multiplier for the selection and its neighbors.
const SELECT_EMPHASIS: f64 = 1.5;
/// Size multiplier for the hovered node and its neighbors.
const HOVER_EMPHASIS: f64 = 1.3;

/// Visual attributes for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	/// Node id.
	pub id: String,
	/// Horizontal position from the layout.
	pub x: f64,
	/// Vertical position from the layout.
	pub y: f64,
	/// Display radius, connection-scaled and emphasis-adjusted.
	pub size: f64,
	/// Fill color as CSS.
	pub color: String,
	/// Display label.
	pub label: String,
	/// Border color, set for core nodes.
	pub border: Option<String>,
	/// Whether the node sits outside an active highlight.
	pub dimmed: bool,
}

/// Visual attributes for one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisual {
	/// Edge id.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Edge weight.
	pub weight: f64,
	/// Stroke color as CSS.
	pub color: String,
	/// Whether the edge sits outside an active highlight.
	pub dimmed: bool,
}

/// A complete frame's worth of render attributes.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	/// Node visuals, in graph iteration order.
	pub nodes: Vec<NodeVisual>,
	/// Edge visuals, in graph iteration order.
	pub edges: Vec<EdgeVisual>,
}

impl Scene {
	/// Whether there is nothing to draw; the renderer should show its
	/// explicit "no data" state instead.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Display radius for a node with the given connection count:
/// logarithmic in connections, capped.
pub fn node_size(connections: u32) -> f64 {
	BASE_SIZE + (f64::from(connections) + 1.0).ln().min(5.0)
}

/// Build the scene for the current graph, layout, and interaction state.
///
/// Nodes the layout does not cover land at the origin. With an active
/// selection, the selected node and its neighbors are emphasized and
/// everything else dimmed; a hover (with no selection) does the same with a
/// weaker emphasis.
pub fn scene(
	graph: &Graph,
	layout: &Layout,
	interaction: &InteractionState,
	theme: &Theme,
) -> Scene {
	let state = RenderState::derive(graph, interaction);
	let focused = state.selected.is_some() || state.hovered.is_some();
	let emphasis = if state.selected.is_some() {
		SELECT_EMPHASIS
	} else {
		HOVER_EMPHASIS
	};

	let nodes = graph
		.nodes()
		.iter()
		.map(|node| {
			let Position { x, y } = layout.get(&node.id).unwrap_or_default();
			let emphasized = state.emphasizes(&node.id);
			let dimmed = focused && !emphasized;
			let size = if emphasized {
				node_size(node.connections()) * emphasis
			} else {
				node_size(node.connections())
			};
			let color = if dimmed {
				theme.node_dimmed.to_css()
			} else {
				theme::subsystem_color(&node.subsystem).to_css()
			};
			NodeVisual {
				id: node.id.clone(),
				x,
				y,
				size,
				color,
				label: node.label.clone(),
				border: node.is_core.then(|| theme.core_border.to_css()),
				dimmed,
			}
		})
		.collect();

	let edges = graph
		.edges()
		.iter()
		.map(|edge| {
			let highlighted = state.highlighted_edges.contains(&edge.id);
			let dimmed = focused && !highlighted;
			let color = if highlighted {
				theme.edge_highlight.to_css()
			} else if dimmed {
				theme.edge_dimmed.to_css()
			} else {
				theme.edge.to_css()
			};
			EdgeVisual {
				id: edge.id.clone(),
				source: edge.source.clone(),
				target: edge.target.clone(),
				weight: edge.weight,
				color,
				dimmed,
			}
		})
		.collect();

	Scene { nodes, edges }
}
