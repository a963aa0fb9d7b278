use indexmap::IndexMap;
use serde::Serialize;

use crate::{CgNode, NodeKey};

/// All nodes of one reading session, keyed by [`NodeKey`].
///
/// Iteration follows first-creation order. Nodes are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct CgGraph {
    nodes: IndexMap<NodeKey, CgNode>,
}

impl CgGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn make_node_key(&self, class_name: &str, label: &str) -> NodeKey {
        NodeKey::new(class_name, label)
    }

    /// The only way nodes come into existence.
    ///
    /// An existing node gets its display strings refreshed and is returned
    /// as-is; otherwise a fresh node is allocated.
    pub fn get_or_create_node(&mut self, class_name: &str, label: &str) -> &mut CgNode {
        let key = NodeKey::new(class_name, label);
        self.nodes
            .entry(key)
            .and_modify(|node| node.refresh_display(class_name, label))
            .or_insert_with_key(|key| CgNode::new(key.clone(), class_name, label))
    }

    /// Creates the node only when absent; an existing node is left untouched.
    ///
    /// Returns `true` when a node was created.
    pub fn ensure_node(&mut self, class_name: &str, label: &str) -> bool {
        let key = NodeKey::new(class_name, label);
        if self.nodes.contains_key(&key) {
            return false;
        }
        let node = CgNode::new(key.clone(), class_name, label);
        self.nodes.insert(key, node);
        true
    }

    /// Returns the node under `key` when it resolves, otherwise falls back to
    /// [`Self::get_or_create_node`] for `(class_name, label)`.
    pub fn resolve_or_create(
        &mut self,
        key: Option<&str>,
        class_name: &str,
        label: &str,
    ) -> &mut CgNode {
        if let Some(index) = key.and_then(|key| self.nodes.get_index_of(key)) {
            return &mut self.nodes[index];
        }
        self.get_or_create_node(class_name, label)
    }

    #[must_use]
    pub fn get_node_by_key(&self, key: &str) -> Option<&CgNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: &str) -> Option<&mut CgNode> {
        self.nodes.get_mut(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Node keys in creation order.
    pub fn order(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.keys()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CgNode> {
        self.nodes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of de-duplicated outgoing edges across all nodes.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.outgoing().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::CgGraph;
    use crate::normalize_key_part;
    use proptest::prelude::*;

    #[test]
    fn merge_returns_existing_node_and_refreshes_display() {
        let mut graph = CgGraph::new();
        graph.get_or_create_node("people", "Paris").set_property("country", "France");

        let node = graph.get_or_create_node("  PEOPLE ", "paris");
        assert_eq!(node.key().as_str(), "people::paris");
        assert_eq!(node.class_name_display, "PEOPLE");
        assert_eq!(node.label_display, "paris");
        assert_eq!(node.property("country"), Some("France"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn order_follows_first_creation() {
        let mut graph = CgGraph::new();
        graph.get_or_create_node("chess", "Game-1");
        graph.get_or_create_node("player", "Kasparov");
        graph.get_or_create_node("CHESS", "game-1");
        let order: Vec<&str> = graph.order().map(|key| key.as_str()).collect();
        assert_eq!(order, ["chess::game-1", "player::kasparov"]);
    }

    #[test]
    fn ensure_node_does_not_refresh_existing_display() {
        let mut graph = CgGraph::new();
        graph.get_or_create_node("Player", "Kasparov");
        assert!(!graph.ensure_node("PLAYER", "KASPAROV"));
        let node = graph
            .get_node_by_key("player::kasparov")
            .expect("node should exist");
        assert_eq!(node.label_display, "Kasparov");
        assert!(graph.ensure_node("Player", "Karpov"));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn resolve_or_create_prefers_existing_key() {
        let mut graph = CgGraph::new();
        graph.get_or_create_node("people", "Paris");

        let node = graph.resolve_or_create(Some("people::paris"), "people", "");
        assert_eq!(node.key().as_str(), "people::paris");
        assert_eq!(graph.len(), 1);

        let fallback = graph.resolve_or_create(Some("people::lyon"), "people", "");
        assert_eq!(fallback.key().as_str(), "people::");
        let fallback = graph.resolve_or_create(None, "people", "");
        assert_eq!(fallback.key().as_str(), "people::");
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn lookup_by_key_and_edge_count() {
        let mut graph = CgGraph::new();
        assert!(graph.is_empty());
        let node = graph.get_or_create_node("chess", "Game-1");
        node.add_outgoing("Player", "Kasparov");
        node.add_outgoing("Player", "Karpov");
        assert!(graph.contains("chess::game-1"));
        assert!(!graph.contains("chess::game-2"));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.make_node_key("Chess", "GAME-1").as_str(),
            "chess::game-1"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_same_node_iff_normalized_parts_match(
            c1 in "[a-cA-C ]{0,6}",
            l1 in "[a-cA-C \t]{0,6}",
            c2 in "[a-cA-C ]{0,6}",
            l2 in "[a-cA-C \t]{0,6}",
        ) {
            let mut graph = CgGraph::new();
            let first = graph.get_or_create_node(&c1, &l1).key().clone();
            let second = graph.get_or_create_node(&c2, &l2).key().clone();
            let expect_same = normalize_key_part(&c1) == normalize_key_part(&c2)
                && normalize_key_part(&l1) == normalize_key_part(&l2);
            prop_assert_eq!(first == second, expect_same);
            prop_assert_eq!(graph.len(), if expect_same { 1 } else { 2 });
        }

        #[test]
        fn prop_property_count_never_exceeds_distinct_keys(
            writes in proptest::collection::vec(("[a-d]", "[a-z]{0,4}"), 0..32)
        ) {
            let mut graph = CgGraph::new();
            let node = graph.get_or_create_node("c", "n");
            let mut distinct = std::collections::BTreeMap::new();
            for (key, value) in &writes {
                node.set_property(key.clone(), value.clone());
                distinct.insert(key.clone(), value.clone());
            }
            prop_assert_eq!(node.properties.len(), distinct.len());
            for (key, value) in &distinct {
                prop_assert_eq!(node.property(key), Some(value.as_str()));
            }
        }
    }
}
