use cgdl_core::{
    CgGraph, CgNode, DiagnosticCode, Diagnostics, Line, ReaderOptions, validate_class_or_label,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::ReaderState;
use crate::recognizers::{Directive, classify};

/// What one line was recognized as, for callers that want per-line feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOutcome {
    Blank,
    ClassOpen,
    ClassClose,
    NodeOpen,
    NodeClose,
    Property,
    EdgeOut,
    StoredLine,
    /// Nothing anchored the line; it was dropped with a warning.
    #[serde(rename = "none")]
    Ignored,
}

impl LineOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::ClassOpen => "class_open",
            Self::ClassClose => "class_close",
            Self::NodeOpen => "node_open",
            Self::NodeClose => "node_close",
            Self::Property => "property",
            Self::EdgeOut => "edge_out",
            Self::StoredLine => "stored_line",
            Self::Ignored => "none",
        }
    }
}

/// Feeds one raw line through the state machine.
///
/// Graph mutations and diagnostics for this line are complete when the call
/// returns. Never fails: malformed input ends up as diagnostics.
pub fn read_line(
    graph: &mut CgGraph,
    state: &mut ReaderState,
    diagnostics: &mut Diagnostics,
    raw_line: &str,
    line_number: usize,
    options: &ReaderOptions,
) -> LineOutcome {
    let mut step = Step {
        graph,
        state,
        diagnostics,
        line_number,
        options,
    };

    let outcome = match classify(raw_line, options) {
        Directive::Blank => LineOutcome::Blank,
        Directive::ClassOpen { class_name } => step.open_class(class_name),
        Directive::ClassClose => step.close_class(),
        Directive::NodeOpen { label } => step.open_node(&label),
        Directive::NodeClose => step.close_node(),
        Directive::Property { key, value } => step.set_property(key, value),
        Directive::MalformedProperty { body } => step.reject_property(&body),
        Directive::SameClassEdge { label } => {
            let cls = step.state.current_class.clone();
            step.add_edge(&cls, &label, false)
        }
        Directive::OutgoingEdge(edge) => step.add_edge(&edge.cls, &edge.label, true),
        Directive::Text(line) => step.store_line(line, raw_line),
    };

    trace!(line_number, outcome = outcome.as_str(), "classified line");
    outcome
}

struct Step<'a> {
    graph: &'a mut CgGraph,
    state: &'a mut ReaderState,
    diagnostics: &'a mut Diagnostics,
    line_number: usize,
    options: &'a ReaderOptions,
}

impl Step<'_> {
    // The cursor adopts an invalid class name; the error is only recorded.
    fn open_class(&mut self, class_name: String) -> LineOutcome {
        self.check_identifier(&class_name, DiagnosticCode::InvalidClassName, "class name");
        debug!(line_number = self.line_number, class = %class_name, "class opened");
        self.state.open_class(class_name);
        LineOutcome::ClassOpen
    }

    fn close_class(&mut self) -> LineOutcome {
        debug!(line_number = self.line_number, "class closed");
        self.state.close_class();
        LineOutcome::ClassClose
    }

    // An empty current class is allowed and yields keys of the form "::label".
    fn open_node(&mut self, label: &str) -> LineOutcome {
        self.check_identifier(label, DiagnosticCode::InvalidNodeLabel, "node label");
        let key = self
            .graph
            .get_or_create_node(&self.state.current_class, label)
            .key()
            .clone();
        debug!(line_number = self.line_number, node = %key, "node selected");
        self.state.select_node(key);
        LineOutcome::NodeOpen
    }

    fn close_node(&mut self) -> LineOutcome {
        if self.state.close_node().is_none() {
            self.diagnostics.warn(
                self.line_number,
                DiagnosticCode::NodeCloseWithoutOpen,
                "## closes node but no node is open",
            );
        }
        LineOutcome::NodeClose
    }

    fn set_property(&mut self, key: String, value: String) -> LineOutcome {
        self.effective_node().set_property(key, value);
        LineOutcome::Property
    }

    fn reject_property(&mut self, body: &str) -> LineOutcome {
        self.diagnostics.warn(
            self.line_number,
            DiagnosticCode::MalformedProperty,
            format!("Malformed property ignored (expected 'key = value'): '{body}'"),
        );
        LineOutcome::Property
    }

    fn add_edge(&mut self, cls: &str, label: &str, check_class: bool) -> LineOutcome {
        if check_class {
            self.check_identifier(cls, DiagnosticCode::InvalidEdgeClass, "outgoing edge class");
        }
        self.check_identifier(label, DiagnosticCode::InvalidEdgeLabel, "outgoing edge label");

        if !self.effective_node().add_outgoing(cls, label) {
            self.diagnostics.warn(
                self.line_number,
                DiagnosticCode::DuplicateOutgoingEdge,
                format!("Duplicate outgoing edge ignored: {cls}:{label}"),
            );
        }

        if self.options.create_stub_nodes_for_edges && self.graph.ensure_node(cls, label) {
            debug!(line_number = self.line_number, cls, label, "stub node created");
        }
        LineOutcome::EdgeOut
    }

    fn store_line(&mut self, line: Line, raw_line: &str) -> LineOutcome {
        if !self.state.has_open_node() && !self.state.has_open_class() {
            self.diagnostics.warn(
                self.line_number,
                DiagnosticCode::OrphanContent,
                format!(
                    "Content outside of any class or node ignored: '{}'",
                    raw_line.trim()
                ),
            );
            return LineOutcome::Ignored;
        }
        self.effective_node().add_line(line);
        LineOutcome::StoredLine
    }

    /// The open node, or the class-default node `(current_class, "")`.
    fn effective_node(&mut self) -> &mut CgNode {
        let current = self.state.current_node_key().map(|key| key.as_str());
        self.graph
            .resolve_or_create(current, &self.state.current_class, "")
    }

    fn check_identifier(&mut self, value: &str, code: DiagnosticCode, what: &str) {
        if !self.options.strict {
            return;
        }
        if let Err(err) = validate_class_or_label(value) {
            self.diagnostics.error(
                self.line_number,
                code,
                format!("Invalid {what} '{value}': {err}"),
            );
        }
    }
}
