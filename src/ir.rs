use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub type Properties = BTreeMap<String, String>;

pub const NUMBER_KEY: &str = "number";
pub const CHAPTER_KEY: &str = "chapter";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: String,
    pub properties: Properties,
    pub proves: Vec<String>,
    pub proven_by: Vec<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, properties: Properties) -> Self {
        Self {
            id: id.into(),
            properties,
            proves: Vec::new(),
            proven_by: Vec::new(),
        }
    }

    /// Shorthand for a node carrying only a numbering string.
    pub fn numbered(id: impl Into<String>, number: &str) -> Self {
        let mut properties = Properties::new();
        properties.insert(NUMBER_KEY.to_string(), number.to_string());
        Self::new(id, properties)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn number(&self) -> Option<&str> {
        self.property(NUMBER_KEY)
    }

    pub fn chapter(&self) -> Option<&str> {
        self.property(CHAPTER_KEY)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Appends `other` to this node's `proves` list. The reverse list on
    /// `other` is left alone.
    pub fn add_proof(&mut self, other: &Node) {
        self.proves.push(other.id.clone());
    }

    /// Appends `other` to this node's `proven_by` list.
    pub fn add_proof_for(&mut self, other: &Node) {
        self.proven_by.push(other.id.clone());
    }

    pub fn matches(&self, filter: &[(&str, &str)]) -> bool {
        filter
            .iter()
            .all(|(key, value)| self.property(key) == Some(*value))
    }
}

/// Insertion-ordered node collection with an id index.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    by_id: HashMap<String, usize>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut store = Self::new();
        for node in nodes {
            store.insert(node)?;
        }
        Ok(store)
    }

    pub fn insert(&mut self, node: Node) -> Result<()> {
        if self.by_id.contains_key(node.id()) {
            return Err(Error::DuplicateId(node.id));
        }
        self.by_id.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    pub fn get_node_by_id_mut(&mut self, id: &str) -> Option<&mut Node> {
        let idx = self.index_of(id)?;
        self.nodes.get_mut(idx)
    }

    /// Every node whose properties contain all `filter` pairs, in store order.
    pub fn get_nodes_by_properties(&self, filter: &[(&str, &str)]) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.matches(filter)).collect()
    }

    /// Records `prover` proves `proven` on both sides.
    pub fn record_proof(&mut self, prover: &str, proven: &str) -> Result<()> {
        let prover_idx = self
            .index_of(prover)
            .ok_or_else(|| Error::UnknownNode(prover.to_string()))?;
        let proven_idx = self
            .index_of(proven)
            .ok_or_else(|| Error::UnknownNode(proven.to_string()))?;
        self.nodes[prover_idx].proves.push(proven.to_string());
        self.nodes[proven_idx].proven_by.push(prover.to_string());
        Ok(())
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chaptered(id: &str, number: &str, chapter: &str, part: &str) -> Node {
        let mut node = Node::numbered(id, number);
        node.properties
            .insert(CHAPTER_KEY.to_string(), chapter.to_string());
        node.properties.insert("part".to_string(), part.to_string());
        node
    }

    #[test]
    fn add_proof_is_one_sided() {
        let mut a = Node::numbered("A", "42");
        let b = Node::numbered("B", "43");
        a.add_proof(&b);
        assert_eq!(a.proves, vec!["B".to_string()]);
        assert!(a.proven_by.is_empty());
        assert!(b.proves.is_empty());
        assert!(b.proven_by.is_empty());
    }

    #[test]
    fn add_proof_for_mirrors_add_proof() {
        let mut a = Node::numbered("A", "42");
        let b = Node::numbered("B", "43");
        a.add_proof_for(&b);
        a.add_proof_for(&b);
        assert_eq!(a.proven_by, vec!["B".to_string(), "B".to_string()]);
        assert!(a.proves.is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let store =
            NodeStore::from_nodes([Node::numbered("1", "1.1"), Node::numbered("2", "1.2")])
                .unwrap();
        assert_eq!(store.get_node_by_id("2").unwrap().number(), Some("1.2"));
        assert!(store.get_node_by_id("Z").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = NodeStore::from_nodes([Node::numbered("1", "1.1"), Node::numbered("1", "1.2")])
            .unwrap_err();
        assert_eq!(err, Error::DuplicateId("1".to_string()));
    }

    #[test]
    fn property_filter_matches_all_pairs_in_store_order() {
        let store = NodeStore::from_nodes([
            chaptered("a", "1.1", "1", "1"),
            chaptered("b", "1.2", "1", "2"),
            chaptered("c", "2.1", "2", "1"),
            chaptered("d", "1.3", "1", "1"),
        ])
        .unwrap();
        let ids: Vec<&str> = store
            .get_nodes_by_properties(&[("chapter", "1"), ("part", "1")])
            .iter()
            .map(|node| node.id())
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert!(store.get_nodes_by_properties(&[("chapter", "999")]).is_empty());
        assert_eq!(store.get_nodes_by_properties(&[]).len(), 4);
    }

    #[test]
    fn record_proof_updates_both_sides() {
        let mut store =
            NodeStore::from_nodes([Node::numbered("A", "1.1"), Node::numbered("B", "1.2")])
                .unwrap();
        store.record_proof("A", "B").unwrap();
        assert_eq!(store.get_node_by_id("A").unwrap().proves, vec!["B"]);
        assert_eq!(store.get_node_by_id("B").unwrap().proven_by, vec!["A"]);
        assert_eq!(
            store.record_proof("A", "Z").unwrap_err(),
            Error::UnknownNode("Z".to_string())
        );
    }
}
