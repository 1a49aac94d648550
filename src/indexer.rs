// Dense per-type indices for entity identifiers.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::EntityTables;
use crate::error::{GraphError, Result};
use crate::schema::{NodeType, PerNode};

/// Bidirectional id <-> index mapping for one node type.
///
/// Serialized as the index-ordered id list; the reverse table is rebuilt on
/// load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IdMap {
    ids: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl IdMap {
    /// Assign indices in iteration order. Repeated ids keep their first index.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = IdMap::default();
        for id in ids {
            map.insert(id.as_ref());
        }
        map
    }

    fn insert(&mut self, id: &str) -> usize {
        if let Some(&index) = self.lookup.get(id) {
            return index;
        }
        let index = self.ids.len();
        self.ids.push(id.to_string());
        self.lookup.insert(id.to_string(), index);
        index
    }

    pub fn get(&self, id: &str) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn id(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<String>> for IdMap {
    fn from(ids: Vec<String>) -> Self {
        IdMap::from_ids(ids)
    }
}

impl From<IdMap> for Vec<String> {
    fn from(map: IdMap) -> Self {
        map.ids
    }
}

/// Identifier mappings for all node types of one construction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierIndex {
    maps: PerNode<IdMap>,
}

impl IdentifierIndex {
    /// Index every entity in table order.
    pub fn build(tables: &EntityTables) -> Self {
        Self::from_maps(PerNode {
            account: IdMap::from_ids(tables.ids(NodeType::Account)),
            merchant: IdMap::from_ids(tables.ids(NodeType::Merchant)),
            device: IdMap::from_ids(tables.ids(NodeType::Device)),
        })
    }

    pub fn from_maps(maps: PerNode<IdMap>) -> Self {
        Self { maps }
    }

    pub fn index_of(&self, node_type: NodeType, id: &str) -> Result<usize> {
        self.maps
            .get(node_type)
            .get(id)
            .ok_or_else(|| GraphError::UnknownIdentifier {
                node_type,
                id: id.to_string(),
            })
    }

    pub fn id_of(&self, node_type: NodeType, index: usize) -> Option<&str> {
        self.maps.get(node_type).id(index)
    }

    pub fn map(&self, node_type: NodeType) -> &IdMap {
        self.maps.get(node_type)
    }

    pub fn len(&self, node_type: NodeType) -> usize {
        self.maps.get(node_type).len()
    }

    pub fn counts(&self) -> PerNode<usize> {
        self.maps.map(|_, m| m.len())
    }
}
