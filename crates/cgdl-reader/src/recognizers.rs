//! Stateless shape matchers for the graph-building subset of CGDL.
//!
//! | shape            | example                     |
//! |------------------|-----------------------------|
//! | class open       | `[[ People ]]`              |
//! | class close      | `[[ ]]`, `[[]]`, `]]`       |
//! | node open        | `## Paris`                  |
//! | node close       | `##`                        |
//! | property         | `{} country = France`       |
//! | same-class edge  | `: Lyon` (opt-in)           |
//! | outgoing edge    | `Person : Victor Hugo`      |
//!
//! Recognizers only extract shape. Identifier validation and diagnostics
//! belong to the reader.

use cgdl_core::{EdgeRef, Line, ReaderOptions};
use serde::Serialize;

/// What a single raw line was recognized as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Directive {
    Blank,
    ClassOpen { class_name: String },
    ClassClose,
    NodeOpen { label: String },
    NodeClose,
    Property { key: String, value: String },
    /// `{}` line whose body is not `key = value`.
    MalformedProperty { body: String },
    SameClassEdge { label: String },
    OutgoingEdge(EdgeRef),
    Text(Line),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassControl {
    Open(String),
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeControl {
    Open(String),
    Close,
}

type Recognizer = fn(&str, &Line) -> Option<Directive>;

const STANDARD: [Recognizer; 5] = [
    recognize_blank,
    recognize_class_control,
    recognize_node_control,
    recognize_property,
    recognize_outgoing_edge,
];

const WITH_SHORTHAND: [Recognizer; 6] = [
    recognize_blank,
    recognize_class_control,
    recognize_node_control,
    recognize_property,
    recognize_same_class_edge,
    recognize_outgoing_edge,
];

/// Runs the recognizers in priority order; first match wins.
///
/// Lines nothing else claims come back as [`Directive::Text`].
#[must_use]
pub fn classify(raw_line: &str, options: &ReaderOptions) -> Directive {
    let line = Line::parse(raw_line);
    let recognizers: &[Recognizer] = if options.allow_same_class_edge_shorthand {
        &WITH_SHORTHAND
    } else {
        &STANDARD
    };

    recognizers
        .iter()
        .find_map(|recognize| recognize(raw_line, &line))
        .unwrap_or(Directive::Text(line))
}

#[must_use]
pub fn parse_class_control(raw_line: &str) -> Option<ClassControl> {
    let trimmed = raw_line.trim();
    if trimmed == "]]" {
        return Some(ClassControl::Close);
    }

    let inner = trimmed.strip_prefix("[[")?.strip_suffix("]]")?.trim();
    if inner.is_empty() {
        Some(ClassControl::Close)
    } else {
        Some(ClassControl::Open(inner.to_string()))
    }
}

#[must_use]
pub fn parse_node_control(raw_line: &str) -> Option<NodeControl> {
    let rest = raw_line.trim_start().strip_prefix("##")?.trim();
    if rest.is_empty() {
        Some(NodeControl::Close)
    } else {
        Some(NodeControl::Open(rest.to_string()))
    }
}

/// Splits `key = value` on the first `=`. The key must be non-empty; the
/// value may be empty.
#[must_use]
pub fn parse_property_text(text: &str) -> Option<(String, String)> {
    let (key, value) = text.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// `Class : Label`, split on the first `:`; both sides required.
#[must_use]
pub fn parse_outgoing_edge(raw_line: &str) -> Option<EdgeRef> {
    let (cls, label) = raw_line.trim().split_once(':')?;
    let cls = cls.trim();
    let label = label.trim();
    if cls.is_empty() || label.is_empty() {
        return None;
    }
    Some(EdgeRef::new(cls, label))
}

/// `: Label`, an edge whose class is the current one.
#[must_use]
pub fn parse_same_class_edge(raw_line: &str) -> Option<String> {
    let label = raw_line.trim().strip_prefix(':')?.trim();
    (!label.is_empty()).then(|| label.to_string())
}

fn recognize_blank(raw_line: &str, _line: &Line) -> Option<Directive> {
    raw_line.trim().is_empty().then_some(Directive::Blank)
}

fn recognize_class_control(raw_line: &str, _line: &Line) -> Option<Directive> {
    parse_class_control(raw_line).map(|control| match control {
        ClassControl::Open(class_name) => Directive::ClassOpen { class_name },
        ClassControl::Close => Directive::ClassClose,
    })
}

fn recognize_node_control(raw_line: &str, _line: &Line) -> Option<Directive> {
    parse_node_control(raw_line).map(|control| match control {
        NodeControl::Open(label) => Directive::NodeOpen { label },
        NodeControl::Close => Directive::NodeClose,
    })
}

fn recognize_property(_raw_line: &str, line: &Line) -> Option<Directive> {
    if !line.is_property() {
        return None;
    }
    Some(match parse_property_text(&line.text) {
        Some((key, value)) => Directive::Property { key, value },
        None => Directive::MalformedProperty {
            body: line.text.clone(),
        },
    })
}

// Signalled lines are payload for higher layers, never edges.
fn recognize_same_class_edge(raw_line: &str, line: &Line) -> Option<Directive> {
    if line.has_signal() {
        return None;
    }
    parse_same_class_edge(raw_line).map(|label| Directive::SameClassEdge { label })
}

fn recognize_outgoing_edge(raw_line: &str, line: &Line) -> Option<Directive> {
    if line.has_signal() {
        return None;
    }
    parse_outgoing_edge(raw_line).map(Directive::OutgoingEdge)
}
