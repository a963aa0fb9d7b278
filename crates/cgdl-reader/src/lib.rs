#![forbid(unsafe_code)]

//! Incremental CGDL reader.
//!
//! Lines are fed one at a time into [`read_line`] (or a [`Reader`] session);
//! each call classifies the line, moves the cursor, mutates the graph and
//! appends diagnostics before returning.

mod reader;
mod recognizers;
mod session;
mod state;

use cgdl_core::{CgGraph, Diagnostics, ReaderOptions};
use serde::Serialize;
use serde_json::json;

pub use reader::{LineOutcome, read_line};
pub use recognizers::{
    ClassControl, Directive, NodeControl, classify, parse_class_control, parse_node_control,
    parse_outgoing_edge, parse_property_text, parse_same_class_edge,
};
pub use session::Reader;
pub use state::ReaderState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadResult {
    pub graph: CgGraph,
    pub state: ReaderState,
    pub diagnostics: Diagnostics,
    /// One entry per input line, in order.
    pub outcomes: Vec<LineOutcome>,
}

/// Reference line splitter: `\r\n` and lone `\r` become `\n`, then split.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Reads a whole text through the same line-at-a-time path as interactive use.
#[must_use]
pub fn read_text(text: &str, options: &ReaderOptions) -> ReadResult {
    let mut reader = Reader::new(options.clone());
    for line in split_lines(text) {
        reader.feed(&line);
    }
    reader.finish()
}

/// Compact summary of a read, for tooling and logs.
#[must_use]
pub fn read_summary_json(result: &ReadResult) -> String {
    let counts = result.diagnostics.counts();
    json!({
        "node_count": result.graph.len(),
        "edge_count": result.graph.edge_count(),
        "line_count": result.outcomes.len(),
        "warning_count": counts.warnings,
        "error_count": counts.errors,
        "warnings": result.diagnostics.warning_messages(),
        "errors": result.diagnostics.error_messages(),
    })
    .to_string()
}
