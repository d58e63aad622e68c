//! Node placement: force-directed layout with a hierarchical alternative.
//!
//! The force-directed layout is a bounded-iteration procedure, not a
//! convergence loop: iteration count scales with node count and is clamped
//! to a sane range. Initial placement comes from a seedable random source so
//! runs are reproducible under the same seed. If the force computation ever
//! produces a non-finite coordinate the layout degrades to independent
//! random placement rather than failing; the graph must always stay
//! renderable.

use std::collections::HashMap;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Graph;

/// A 2D node position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

/// A complete node-id-keyed position map for one layout run.
///
/// Ephemeral: recomputed when the node/edge set changes, frozen in between
/// so pan/zoom/hover never trigger recomputation. Committed as a single
/// value, which keeps the old/new handoff atomic if an embedder computes it
/// off the interactive thread.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	positions: HashMap<String, Position>,
	degraded: bool,
}

impl Layout {
	fn new(positions: HashMap<String, Position>, degraded: bool) -> Self {
		Self {
			positions,
			degraded,
		}
	}

	/// Position of a node, if it was part of the layout run.
	pub fn get(&self, id: &str) -> Option<Position> {
		self.positions.get(id).copied()
	}

	/// The full position map.
	pub fn positions(&self) -> &HashMap<String, Position> {
		&self.positions
	}

	/// Number of positioned nodes.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// Whether no nodes were positioned.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Whether the preferred algorithm failed and positions fell back to
	/// random placement. Embedders may surface this as a warning banner.
	pub fn degraded(&self) -> bool {
		self.degraded
	}
}

/// Tunable parameters for the force-directed layout.
#[derive(Clone, Debug)]
pub struct LayoutParams {
	/// Pull towards the graph centroid. Stronger values pack clusters tighter.
	pub gravity: f64,
	/// Scales node-node repulsion.
	pub scaling_ratio: f64,
	/// Above this node count, repulsion uses grid-aggregated approximation
	/// instead of exact pairwise computation.
	pub partition_threshold: usize,
	/// Side length of the square initial placement region.
	pub span: f64,
	/// Seed for initial placement. `None` seeds from entropy.
	pub seed: Option<u64>,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			gravity: 0.1,
			scaling_ratio: 8.0,
			partition_threshold: 500,
			span: 100.0,
			seed: None,
		}
	}
}

/// Spring constant for attraction along edges.
const ATTRACTION: f64 = 0.01;
/// Cap on per-iteration node displacement, in world units.
const MAX_DISPLACEMENT: f64 = 10.0;
/// Distance floor to keep repulsion finite for coincident nodes.
const MIN_DISTANCE: f64 = 0.01;

/// Iteration budget for a graph of `n` nodes: one iteration per five nodes,
/// clamped to 50..=200 so small graphs still settle and large graphs stay
/// bounded.
pub fn iteration_count(n: usize) -> usize {
	n.div_ceil(5).clamp(50, 200)
}

/// Compute a force-directed layout for the graph.
///
/// The returned map has exactly one finite position per node. An empty
/// graph yields an empty map.
pub fn force_directed(graph: &Graph, params: &LayoutParams) -> Layout {
	let n = graph.node_count();
	if n == 0 {
		return Layout::default();
	}

	let mut rng = seeded_rng(params.seed);
	let mut xs: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..params.span)).collect();
	let mut ys: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..params.span)).collect();

	// Edges as node indices, with weights.
	let edges: Vec<(usize, usize, f64)> = graph
		.edges()
		.iter()
		.filter_map(|e| {
			let s = graph.node_position(&e.source)?;
			let t = graph.node_position(&e.target)?;
			Some((s, t, e.weight))
		})
		.collect();

	// Degree-based mass: hubs repel harder, which spreads clusters apart.
	let mut mass = vec![1.0f64; n];
	for &(s, t, _) in &edges {
		mass[s] += 1.0;
		mass[t] += 1.0;
	}

	let iterations = iteration_count(n);
	let slow_down = 2.0 + (n as f64).ln() / 8.0;
	let mut grid = (n > params.partition_threshold).then(|| Grid::new(n));
	debug!(
		"force layout: {} nodes, {} iterations, grid={}",
		n,
		iterations,
		grid.is_some()
	);

	let mut fx = vec![0.0f64; n];
	let mut fy = vec![0.0f64; n];
	for _ in 0..iterations {
		fx.fill(0.0);
		fy.fill(0.0);

		if let Some(grid) = grid.as_mut() {
			grid_repulsion(grid, &xs, &ys, &mass, params.scaling_ratio, &mut fx, &mut fy);
		} else {
			exact_repulsion(&xs, &ys, &mass, params.scaling_ratio, &mut fx, &mut fy);
		}

		// Attraction along edges, proportional to distance and weight.
		for &(s, t, w) in &edges {
			let dx = xs[t] - xs[s];
			let dy = ys[t] - ys[s];
			let f = ATTRACTION * w;
			fx[s] += dx * f;
			fy[s] += dy * f;
			fx[t] -= dx * f;
			fy[t] -= dy * f;
		}

		// Gravity towards the centroid keeps disconnected components nearby.
		let cx = xs.iter().sum::<f64>() / n as f64;
		let cy = ys.iter().sum::<f64>() / n as f64;
		for i in 0..n {
			let dx = cx - xs[i];
			let dy = cy - ys[i];
			let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
			let f = params.gravity * mass[i] / dist;
			fx[i] += dx * f;
			fy[i] += dy * f;
		}

		for i in 0..n {
			let mut dx = fx[i] / slow_down;
			let mut dy = fy[i] / slow_down;
			let step = (dx * dx + dy * dy).sqrt();
			if !step.is_finite() {
				warn!(
					"force layout produced a non-finite displacement, falling back to random placement"
				);
				return random_fallback(graph, params);
			}
			if step > MAX_DISPLACEMENT {
				dx = dx / step * MAX_DISPLACEMENT;
				dy = dy / step * MAX_DISPLACEMENT;
			}
			xs[i] += dx;
			ys[i] += dy;
		}
	}

	let positions = graph
		.nodes()
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.clone(), Position { x: xs[i], y: ys[i] }))
		.collect();
	Layout::new(positions, false)
}

/// Exact pairwise repulsion: `scaling_ratio * m_i * m_j / d^2` along the
/// separating axis.
fn exact_repulsion(
	xs: &[f64],
	ys: &[f64],
	mass: &[f64],
	scaling_ratio: f64,
	fx: &mut [f64],
	fy: &mut [f64],
) {
	let n = xs.len();
	for i in 0..n {
		for j in (i + 1)..n {
			let dx = xs[j] - xs[i];
			let dy = ys[j] - ys[i];
			let dist_sq = (dx * dx + dy * dy).max(MIN_DISTANCE);
			let f = scaling_ratio * mass[i] * mass[j] / dist_sq;
			fx[i] -= dx * f;
			fy[i] -= dy * f;
			fx[j] += dx * f;
			fy[j] += dy * f;
		}
	}
}

/// Scratch buffers for the grid repulsion pass, allocated once per layout
/// run and rebucketed each iteration.
struct Grid {
	side: usize,
	members: Vec<Vec<usize>>,
	/// Per-cell (mass, mass-weighted x sum, mass-weighted y sum).
	agg: Vec<(f64, f64, f64)>,
}

impl Grid {
	fn new(n: usize) -> Self {
		// Cell count grows with sqrt(n), keeping both the near-window pass
		// and the far-cell scan sublinear per node.
		let side = ((3.0 * (n as f64).sqrt()).sqrt().ceil() as usize).max(2);
		Self {
			side,
			members: vec![Vec::new(); side * side],
			agg: vec![(0.0, 0.0, 0.0); side * side],
		}
	}
}

/// Grid-aggregated repulsion for large graphs: nodes in the same or adjacent
/// cells interact exactly; distant cells act as a single body at their
/// centre of mass.
fn grid_repulsion(
	grid: &mut Grid,
	xs: &[f64],
	ys: &[f64],
	mass: &[f64],
	scaling_ratio: f64,
	fx: &mut [f64],
	fy: &mut [f64],
) {
	let n = xs.len();
	let side = grid.side;
	let (min_x, max_x) = bounds(xs);
	let (min_y, max_y) = bounds(ys);
	let cell_w = ((max_x - min_x) / side as f64).max(MIN_DISTANCE);
	let cell_h = ((max_y - min_y) / side as f64).max(MIN_DISTANCE);

	let cell_of = |i: usize| -> (usize, usize) {
		let cx = (((xs[i] - min_x) / cell_w) as usize).min(side - 1);
		let cy = (((ys[i] - min_y) / cell_h) as usize).min(side - 1);
		(cx, cy)
	};

	for cell in &mut grid.members {
		cell.clear();
	}
	grid.agg.fill((0.0, 0.0, 0.0));
	for i in 0..n {
		let (cx, cy) = cell_of(i);
		let c = cy * side + cx;
		grid.members[c].push(i);
		grid.agg[c].0 += mass[i];
		grid.agg[c].1 += xs[i] * mass[i];
		grid.agg[c].2 += ys[i] * mass[i];
	}

	for i in 0..n {
		let (cx, cy) = cell_of(i);
		for gy in 0..side {
			for gx in 0..side {
				let c = gy * side + gx;
				let near = gx.abs_diff(cx) <= 1 && gy.abs_diff(cy) <= 1;
				if near {
					for &j in &grid.members[c] {
						if j == i {
							continue;
						}
						let dx = xs[j] - xs[i];
						let dy = ys[j] - ys[i];
						let dist_sq = (dx * dx + dy * dy).max(MIN_DISTANCE);
						let f = scaling_ratio * mass[i] * mass[j] / dist_sq;
						fx[i] -= dx * f;
						fy[i] -= dy * f;
					}
				} else {
					let (total_mass, wx, wy) = grid.agg[c];
					if total_mass == 0.0 {
						continue;
					}
					let dx = wx / total_mass - xs[i];
					let dy = wy / total_mass - ys[i];
					let dist_sq = (dx * dx + dy * dy).max(MIN_DISTANCE);
					let f = scaling_ratio * mass[i] * total_mass / dist_sq;
					fx[i] -= dx * f;
					fy[i] -= dy * f;
				}
			}
		}
	}
}

fn bounds(values: &[f64]) -> (f64, f64) {
	values.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &v| {
		(lo.min(v), hi.max(v))
	})
}

/// Assign every node an independent random position within the placement
/// region. A usable layout in its own right for tiny graphs.
pub fn random(graph: &Graph, params: &LayoutParams) -> Layout {
	Layout::new(scatter(graph, params), false)
}

/// Random placement taken because the force pass failed; the layout is
/// marked degraded so embedders can surface it.
fn random_fallback(graph: &Graph, params: &LayoutParams) -> Layout {
	Layout::new(scatter(graph, params), true)
}

fn scatter(graph: &Graph, params: &LayoutParams) -> HashMap<String, Position> {
	let mut rng = seeded_rng(params.seed);
	graph
		.nodes()
		.iter()
		.map(|node| {
			(
				node.id.clone(),
				Position {
					x: rng.gen_range(0.0..params.span),
					y: rng.gen_range(0.0..params.span),
				},
			)
		})
		.collect()
}

/// Layered left-to-right placement: nodes are ranked by BFS depth from the
/// roots (nodes with no incoming references) and stacked vertically within
/// each rank. Suits datasets with a clear dependency direction.
pub fn hierarchical(graph: &Graph, params: &LayoutParams) -> Layout {
	let n = graph.node_count();
	if n == 0 {
		return Layout::default();
	}

	// Outgoing adjacency as indices.
	let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); n];
	for edge in graph.edges() {
		if let (Some(s), Some(t)) = (
			graph.node_position(&edge.source),
			graph.node_position(&edge.target),
		) {
			outgoing[s].push(t);
		}
	}

	let mut depth: Vec<Option<usize>> = vec![None; n];
	let mut queue: std::collections::VecDeque<usize> = graph
		.nodes()
		.iter()
		.enumerate()
		.filter(|(_, node)| node.is_orphaned())
		.map(|(i, _)| i)
		.collect();
	for &root in &queue {
		depth[root] = Some(0);
	}

	while let Some(i) = queue.pop_front() {
		let next = depth[i].unwrap_or(0) + 1;
		for &j in &outgoing[i] {
			if depth[j].is_none() {
				depth[j] = Some(next);
				queue.push_back(j);
			}
		}
	}

	// Nodes unreachable from any root (cycles) sit in rank 0.
	let depths: Vec<usize> = depth.into_iter().map(|d| d.unwrap_or(0)).collect();
	let max_depth = depths.iter().copied().max().unwrap_or(0);
	let column_gap = params.span / (max_depth + 1) as f64;

	let mut row_counts = vec![0usize; max_depth + 1];
	let positions = graph
		.nodes()
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let rank = depths[i];
			let row = row_counts[rank];
			row_counts[rank] += 1;
			(
				node.id.clone(),
				Position {
					x: rank as f64 * column_gap,
					y: row as f64 * column_gap,
				},
			)
		})
		.collect();
	Layout::new(positions, false)
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
	match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	}
}
