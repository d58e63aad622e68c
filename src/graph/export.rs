//! CSV serialization of the visible node set.

use std::fmt::Write;

use super::types::Graph;

const HEADER: &str = "File,Type,References,Referenced By,Has MQP,Has ROADMAP,Is Core";

/// Serialize the graph's nodes as CSV, one row per node in iteration order.
///
/// Callers export the currently filtered graph, so rows match what the user
/// sees. Booleans serialize as `Yes`/`No`.
pub fn to_csv(graph: &Graph) -> String {
	let mut out = String::from(HEADER);
	out.push('\n');

	for node in graph.nodes() {
		let _ = writeln!(
			out,
			"{},{},{},{},{},{},{}",
			escape(&node.label),
			escape(&node.kind),
			node.references,
			node.referenced_by,
			yes_no(node.has_mqp),
			yes_no(node.has_roadmap),
			yes_no(node.is_core),
		);
	}
	out
}

fn yes_no(value: bool) -> &'static str {
	if value { "Yes" } else { "No" }
}

/// Double-quote a field when it contains a delimiter, quote, or newline.
fn escape(field: &str) -> String {
	if field.contains([',', '"', '\n', '\r']) {
		format!("\"{}\"", field.replace('"', "\"\""))
	} else {
		field.to_string()
	}
}
