#![forbid(unsafe_code)]

//! Core data model for CGDL: normalization, identifier validation, line
//! classification, the node/edge/property graph and the diagnostics log.
//!
//! Nothing here performs I/O or raises on malformed input.

mod diagnostics;
mod graph;
mod line;
mod node;
mod normalize;
mod options;
mod validate;

pub use diagnostics::{
    DiagnosticCode, DiagnosticCounts, DiagnosticEntry, DiagnosticLevel, Diagnostics,
};
pub use graph::CgGraph;
pub use line::{Line, PROPERTY_SIGNAL, is_command_punct};
pub use node::{CgNode, EdgeRef, NodeKey};
pub use normalize::{normalize_display, normalize_key_part};
pub use options::{ConfigError, ReaderOptions, ReaderOptionsParse, parse_reader_options_value};
pub use validate::{IdentifierError, has_forbidden_digraph, validate_class_or_label};
