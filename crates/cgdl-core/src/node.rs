use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{Line, normalize_display, normalize_key_part};

/// Canonical node identity: `norm(class) + "::" + norm(label)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    #[must_use]
    pub fn new(class_name: &str, label: &str) -> Self {
        Self(format!(
            "{}::{}",
            normalize_key_part(class_name),
            normalize_key_part(label)
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for NodeKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

/// Reference to another node as written in the source (not normalized).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EdgeRef {
    pub cls: String,
    pub label: String,
}

impl EdgeRef {
    #[must_use]
    pub fn new(cls: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            cls: cls.into(),
            label: label.into(),
        }
    }

    /// Identity of the referenced node, same rule as [`NodeKey`].
    #[must_use]
    pub fn target_key(&self) -> NodeKey {
        NodeKey::new(&self.cls, &self.label)
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.cls, self.label)
    }
}

/// One graph vertex.
///
/// Edge lists keep first-insertion order; the paired key sets exist only to
/// answer "already present?" and never drive iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CgNode {
    key: NodeKey,
    pub class_name_display: String,
    pub label_display: String,
    pub properties: IndexMap<String, String>,
    outgoing: Vec<EdgeRef>,
    incoming: Vec<EdgeRef>,
    #[serde(skip)]
    outgoing_index: FxHashSet<NodeKey>,
    #[serde(skip)]
    incoming_index: FxHashSet<NodeKey>,
    lines: Vec<Line>,
}

impl CgNode {
    #[must_use]
    pub fn new(key: NodeKey, class_name: &str, label: &str) -> Self {
        Self {
            key,
            class_name_display: normalize_display(class_name),
            label_display: normalize_display(label),
            properties: IndexMap::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            outgoing_index: FxHashSet::default(),
            incoming_index: FxHashSet::default(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// Updates the display strings; identity is untouched.
    pub fn refresh_display(&mut self, class_name: &str, label: &str) {
        self.class_name_display = normalize_display(class_name);
        self.label_display = normalize_display(label);
    }

    /// Last write wins; an overwritten key keeps its original position.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns `false` when an equivalent edge is already present.
    pub fn add_outgoing(&mut self, cls: &str, label: &str) -> bool {
        insert_edge(&mut self.outgoing, &mut self.outgoing_index, cls, label)
    }

    /// Returns `false` when an equivalent edge is already present.
    pub fn add_incoming(&mut self, cls: &str, label: &str) -> bool {
        insert_edge(&mut self.incoming, &mut self.incoming_index, cls, label)
    }

    #[must_use]
    pub fn has_outgoing(&self, cls: &str, label: &str) -> bool {
        self.outgoing_index.contains(&NodeKey::new(cls, label))
    }

    #[must_use]
    pub fn outgoing(&self) -> &[EdgeRef] {
        &self.outgoing
    }

    #[must_use]
    pub fn incoming(&self) -> &[EdgeRef] {
        &self.incoming
    }

    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

fn insert_edge(
    list: &mut Vec<EdgeRef>,
    index: &mut FxHashSet<NodeKey>,
    cls: &str,
    label: &str,
) -> bool {
    if !index.insert(NodeKey::new(cls, label)) {
        return false;
    }
    list.push(EdgeRef::new(cls, label));
    true
}
