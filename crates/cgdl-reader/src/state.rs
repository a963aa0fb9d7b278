use cgdl_core::{NodeKey, normalize_key_part};
use serde::Serialize;

/// Reader cursor: the open class and the selected node.
///
/// A blank `current_class` means no class is open. Single writer; one
/// instance per reading session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ReaderState {
    pub current_class: String,
    current_node_key: Option<NodeKey>,
}

impl ReaderState {
    #[must_use]
    pub fn new(default_class: impl Into<String>) -> Self {
        Self {
            current_class: default_class.into(),
            current_node_key: None,
        }
    }

    /// Opens (or reopens) a class and deselects the node.
    pub fn open_class(&mut self, class_name: impl Into<String>) {
        self.current_class = class_name.into();
        self.current_node_key = None;
    }

    pub fn close_class(&mut self) {
        self.current_class.clear();
        self.current_node_key = None;
    }

    pub fn select_node(&mut self, key: NodeKey) {
        self.current_node_key = Some(key);
    }

    /// Returns the key that was selected, if any.
    pub fn close_node(&mut self) -> Option<NodeKey> {
        self.current_node_key.take()
    }

    #[must_use]
    pub fn current_node_key(&self) -> Option<&NodeKey> {
        self.current_node_key.as_ref()
    }

    /// A whitespace-only class normalizes to the empty key part and does
    /// not count as open.
    #[must_use]
    pub fn has_open_class(&self) -> bool {
        !normalize_key_part(&self.current_class).is_empty()
    }

    #[must_use]
    pub fn has_open_node(&self) -> bool {
        self.current_node_key.is_some()
    }
}
