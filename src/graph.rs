//! Structural queries over a numbered node set.
//!
//! Parent, child and sibling relations are never stored on nodes; they are
//! derived from numbering strings and precomputed into indexes when the
//! [`Graph`] is built. The graph is read-only afterwards.

use crate::error::{Error, Result};
use crate::ir::{CHAPTER_KEY, Node, NodeStore};
use crate::numbering::Numbering;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdjacencyEntry {
    pub horizontal: Vec<String>,
    pub vertical: Vec<String>,
}

pub type AdjacencyList = BTreeMap<String, AdjacencyEntry>;

#[derive(Debug, Clone)]
pub struct Graph {
    store: NodeStore,
    numberings: Vec<Numbering>,
    by_number: HashMap<String, usize>,
    children: HashMap<String, Vec<usize>>,
    by_chapter: HashMap<String, Vec<usize>>,
    chapters: Vec<String>,
}

impl Graph {
    pub fn new(mut store: NodeStore) -> Result<Self> {
        let mut numberings = Vec::with_capacity(store.len());
        for node in store.nodes_mut() {
            let raw = node.number().ok_or_else(|| Error::MissingNumber {
                id: node.id().to_string(),
            })?;
            let numbering = Numbering::parse(raw)?;
            if node.chapter().is_none() {
                node.properties
                    .insert(CHAPTER_KEY.to_string(), numbering.chapter().to_string());
            }
            numberings.push(numbering);
        }

        let mut by_number = HashMap::new();
        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_chapter: HashMap<String, Vec<usize>> = HashMap::new();
        let mut chapters: Vec<String> = Vec::new();
        for (idx, (node, numbering)) in store.nodes().iter().zip(&numberings).enumerate() {
            by_number.entry(numbering.to_string()).or_insert(idx);
            if let Some(parent) = numbering.parent() {
                children.entry(parent.to_string()).or_default().push(idx);
            }
            let chapter = node.chapter().unwrap_or(numbering.chapter());
            if !chapters.iter().any(|seen| seen == chapter) {
                chapters.push(chapter.to_string());
            }
            by_chapter.entry(chapter.to_string()).or_default().push(idx);
        }

        tracing::debug!(
            nodes = store.len(),
            chapters = chapters.len(),
            "built proof graph"
        );

        Ok(Self {
            store,
            numberings,
            by_number,
            children,
            by_chapter,
            chapters,
        })
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        Self::new(NodeStore::from_nodes(nodes)?)
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn nodes(&self) -> &[Node] {
        self.store.nodes()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<&Node> {
        self.store.get_node_by_id(id)
    }

    pub fn get_nodes_by_properties(&self, filter: &[(&str, &str)]) -> Vec<&Node> {
        self.store.get_nodes_by_properties(filter)
    }

    /// Parsed numbering of the node at store index `idx`.
    pub(crate) fn numbering_at(&self, idx: usize) -> &Numbering {
        &self.numberings[idx]
    }

    /// Store indices of the nodes whose `chapter` property is `chapter`, in
    /// store order.
    pub(crate) fn chapter_members(&self, chapter: &str) -> &[usize] {
        self.by_chapter.get(chapter).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_node_by_number(&self, number: &str) -> Option<&Node> {
        self.by_number
            .get(number)
            .map(|&idx| &self.store.nodes()[idx])
    }

    pub fn has_number(&self, number: &str) -> bool {
        self.by_number.contains_key(number)
    }

    /// Ids of nodes numbered `number` plus one digit, in store order.
    pub fn get_children_ids_by_number(&self, number: &str) -> Vec<&str> {
        self.children
            .get(number)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&idx| self.store.nodes()[idx].id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Id of the node holding the structural parent number, if one was
    /// materialized. Numbering is sparse, so a valid parent number with no
    /// backing node yields `None`.
    pub fn get_parent_id_by_number(&self, number: &str) -> Result<Option<&str>> {
        let Some(parent) = Numbering::parse(number)?.parent() else {
            return Ok(None);
        };
        Ok(self.get_node_by_number(&parent.to_string()).map(Node::id))
    }

    /// Distinct chapter keys in first-seen order.
    pub fn get_chapter_numbers(&self) -> Vec<&str> {
        self.chapters.iter().map(String::as_str).collect()
    }

    /// Lowest numbering string per chapter.
    ///
    /// Decimal parts compare as literal digit strings, so `"5.1"` sorts
    /// before `"5.11"` and `"5.2"`. A bare chapter number only counts when
    /// its chapter has nothing deeper.
    pub fn generate_lowest_numbers(&self) -> BTreeMap<String, String> {
        let mut lowest: BTreeMap<String, &Numbering> = BTreeMap::new();
        for numbering in &self.numberings {
            let slot = lowest
                .entry(numbering.chapter().to_string())
                .or_insert(numbering);
            if lowest_rank(numbering) < lowest_rank(*slot) {
                *slot = numbering;
            }
        }
        lowest
            .into_iter()
            .map(|(chapter, numbering)| (chapter, numbering.to_string()))
            .collect()
    }

    /// Sibling and branch neighbours for every number at depth >= 1.
    ///
    /// `horizontal` holds existing numbers that differ only in the last digit.
    /// `vertical` holds existing numbers reached by stepping the second-to-last
    /// digit upward with every other digit fixed (`2.01` -> `2.11`, `2.21`, ...).
    pub fn create_adjacency_list(&self) -> AdjacencyList {
        let mut list = AdjacencyList::new();
        for numbering in &self.numberings {
            let level = numbering.level();
            if level == 0 {
                continue;
            }
            let key = numbering.to_string();
            if list.contains_key(&key) {
                continue;
            }
            let digits = numbering.digits().as_bytes();

            let last = level - 1;
            let horizontal = (b'0'..=b'9')
                .filter(|&digit| digit != digits[last])
                .filter_map(|digit| numbering.with_digit(last, digit))
                .map(|sibling| sibling.to_string())
                .filter(|sibling| self.has_number(sibling))
                .collect();

            let vertical = if level >= 2 {
                let branch = level - 2;
                (digits[branch] + 1..=b'9')
                    .filter_map(|digit| numbering.with_digit(branch, digit))
                    .map(|next| next.to_string())
                    .filter(|next| self.has_number(next))
                    .collect()
            } else {
                Vec::new()
            };

            list.insert(key, AdjacencyEntry {
                horizontal,
                vertical,
            });
        }
        list
    }
}

fn lowest_rank(numbering: &Numbering) -> (bool, &str) {
    (numbering.level() == 0, numbering.digits())
}
