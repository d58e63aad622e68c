//! Dataset loading.
//!
//! Datasets are JSON objects of the shape `{ "nodes": [...], "edges": [...] }`,
//! bundled statically or fetched by the embedder. Transport is the embedder's
//! concern; a load failure is the one condition surfaced as a typed error,
//! since there is genuinely no data to operate on.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;
use thiserror::Error;

use super::types::GraphData;

/// Failure to obtain a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// The dataset could not be read.
	#[error("failed to read dataset: {0}")]
	Io(#[from] std::io::Error),
	/// The dataset was read but is not valid JSON of the expected shape.
	#[error("failed to parse dataset: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Parse a dataset from a JSON string.
pub fn from_json_str(json: &str) -> Result<GraphData, DatasetError> {
	let data: GraphData = serde_json::from_str(json)?;
	info!(
		"loaded dataset: {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Ok(data)
}

/// Parse a dataset from a reader.
pub fn from_reader(reader: impl Read) -> Result<GraphData, DatasetError> {
	let data: GraphData = serde_json::from_reader(reader)?;
	info!(
		"loaded dataset: {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Ok(data)
}

/// Read and parse a dataset from a file on disk.
pub fn from_file(path: impl AsRef<Path>) -> Result<GraphData, DatasetError> {
	let file = File::open(path)?;
	from_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_minimal_dataset() {
		let data = from_json_str(r#"{"nodes": [], "edges": []}"#).unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.edges.is_empty());
	}

	#[test]
	fn tolerates_missing_fields() {
		let json = r#"{
			"nodes": [{"id": "a"}, {"label": "no id"}],
			"edges": [{"source": "a", "target": "b"}]
		}"#;
		let data = from_json_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].id, "a");
		assert!(data.nodes[1].id.is_empty());
		assert!(data.edges[0].id.is_none());
		assert!(data.edges[0].weight.is_none());
	}

	#[test]
	fn missing_collections_default_to_empty() {
		let data = from_json_str("{}").unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.edges.is_empty());
	}

	#[test]
	fn invalid_json_is_a_parse_error() {
		let err = from_json_str("not json").unwrap_err();
		assert!(matches!(err, DatasetError::Parse(_)));
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let err = from_file("/nonexistent/graph-data.json").unwrap_err();
		assert!(matches!(err, DatasetError::Io(_)));
	}
}
