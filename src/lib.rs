//! xref-graph: cross-reference graph construction, filtering, and layout.
//!
//! This crate implements the data pipeline behind a cross-reference network
//! visualization: dataset ingestion and validation, subsystem enrichment,
//! predicate-based filtering, force-directed node placement, and
//! hover/selection highlight state. It stops at the data contract a
//! rendering surface consumes; drawing is the embedder's concern.
//!
//! ```
//! use xref_graph::{FilterSpec, InteractionState, LayoutParams, Theme};
//! use xref_graph::graph::{dataset, export, ingest, layout, render};
//!
//! # fn main() -> Result<(), xref_graph::DatasetError> {
//! let data = dataset::from_json_str(
//! 	r#"{
//! 		"nodes": [
//! 			{"id": "a.md", "path": "subsystems/KOIOS/a.md", "type": "markdown"},
//! 			{"id": "b.py", "path": "subsystems/ETHIK/b.py", "type": "python"}
//! 		],
//! 		"edges": [{"source": "a.md", "target": "b.py"}]
//! 	}"#,
//! )?;
//!
//! let graph = ingest::build(data);
//! let positions = layout::force_directed(&graph, &LayoutParams::default());
//!
//! let visible = FilterSpec::default().apply(&graph);
//! let scene = render::scene(&visible, &positions, &InteractionState::new(), &Theme::default());
//! assert_eq!(scene.nodes.len(), 2);
//!
//! let csv = export::to_csv(&visible);
//! assert!(csv.starts_with("File,Type"));
//! # Ok(())
//! # }
//! ```

pub mod graph;

pub use graph::{
	Color, DatasetError, Edge, EdgeVisual, FilterSpec, Graph, GraphData, InteractionState, Layout,
	LayoutParams, Node, NodeVisual, Position, RenderState, Scene, Theme,
};
