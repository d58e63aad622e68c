//! Cross-reference graph pipeline.
//!
//! The pipeline runs leaf-to-root:
//! 1. [`dataset`] loads a raw `{ nodes, edges }` dataset.
//! 2. [`ingest`] validates it into a consistent [`types::Graph`], dropping
//!    dangling and duplicate edges, deriving subsystems ([`enrich`]) and
//!    recomputing reference counts.
//! 3. [`filter`] applies an AND-composed [`filter::FilterSpec`] as a pure
//!    view over the graph, on every control change.
//! 4. [`layout`] places nodes with a bounded, seedable force-directed run
//!    (random fallback on degradation), once per data load.
//! 5. [`state`] and [`render`] turn hover/selection into the per-frame
//!    scene a rendering surface consumes; [`export`] serializes the
//!    visible nodes as CSV.
//!
//! Everything is synchronous and single-threaded; a [`layout::Layout`] is
//! committed as one value, so offloading it to a worker stays atomic.

pub mod dataset;
pub mod enrich;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod layout;
pub mod render;
pub mod state;
pub mod synth;
pub mod theme;
pub mod types;

pub use dataset::DatasetError;
pub use filter::FilterSpec;
pub use layout::{Layout, LayoutParams, Position};
pub use render::{EdgeVisual, NodeVisual, Scene};
pub use state::{InteractionState, RenderState};
pub use theme::{Color, Theme};
pub use types::{Edge, Graph, GraphData, Node, RawEdge, RawNode};
