//! Label binding storage.
//!
//! Label names are interned once per matcher into compact `u8` indices; a
//! match attempt then records bindings as `(index, node)` pairs in a small
//! stack-allocated vector.

use std::collections::HashMap;

use smallvec::SmallVec;
use snafu::ensure;

use crate::error::TooManyLabelsSnafu;
use crate::graph::NodeId;
use crate::Result;

/// Single binding entry: (label index, bound node).
pub type BindingEntry = (u8, NodeId);

/// Stack-allocated binding storage for typical patterns (up to 4 labels).
/// Falls back to heap allocation for patterns with more labels.
pub type BindingStore = SmallVec<[BindingEntry; 4]>;

/// Label name interning table.
#[derive(Debug, Clone, Default)]
pub struct VarIntern {
    /// Label names in index order
    names: Vec<String>,
    /// Reverse lookup: name -> index
    indices: HashMap<String, u8>,
}

impl VarIntern {
    /// Largest number of distinct labels one pattern may use.
    pub const MAX_LABELS: usize = u8::MAX as usize;

    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the index for a label name.
    pub fn get_or_insert(&mut self, name: &str) -> Result<u8> {
        if let Some(&idx) = self.indices.get(name) {
            return Ok(idx);
        }
        ensure!(
            self.names.len() < Self::MAX_LABELS,
            TooManyLabelsSnafu { count: self.names.len() + 1, max: Self::MAX_LABELS }
        );
        let idx = self.names.len() as u8;
        self.names.push(name.to_string());
        self.indices.insert(name.to_string(), idx);
        Ok(idx)
    }

    pub fn get_index(&self, name: &str) -> Option<u8> {
        self.indices.get(name).copied()
    }

    pub fn get_name(&self, idx: u8) -> Option<&str> {
        self.names.get(idx as usize).map(String::as_str)
    }

    /// Convert a binding store into a name-keyed map.
    pub fn to_hashmap(&self, store: &BindingStore) -> HashMap<String, NodeId> {
        store
            .iter()
            .filter_map(|(idx, node)| self.names.get(*idx as usize).map(|name| (name.clone(), *node)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Extension methods for BindingStore.
pub trait BindingStoreExt {
    fn get_by_index(&self, idx: u8) -> Option<NodeId>;

    /// Insert or update the binding at index.
    /// Named `set_binding` to avoid conflict with `SmallVec::insert`.
    fn set_binding(&mut self, idx: u8, node: NodeId);

    fn contains_index(&self, idx: u8) -> bool;
}

impl BindingStoreExt for BindingStore {
    fn get_by_index(&self, idx: u8) -> Option<NodeId> {
        self.iter().find(|(i, _)| *i == idx).map(|(_, node)| *node)
    }

    fn set_binding(&mut self, idx: u8, node: NodeId) {
        for (i, existing) in self.iter_mut() {
            if *i == idx {
                *existing = node;
                return;
            }
        }
        self.push((idx, node));
    }

    fn contains_index(&self, idx: u8) -> bool {
        self.iter().any(|(i, _)| *i == idx)
    }
}
