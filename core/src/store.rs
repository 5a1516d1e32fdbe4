use std::collections::BTreeMap;

use crate::document::DocumentStatus;
use crate::error::{LookupError, Result};
use crate::DocId;

#[derive(Debug, Clone, Default)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
    pub word_frequencies: BTreeMap<String, f64>,
}

/// Per-document metadata, plus the order in which ids were added.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: BTreeMap<DocId, DocumentData>,
    ids: Vec<DocId>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Caller checks the id is unused.
    pub(crate) fn insert(&mut self, doc_id: DocId, data: DocumentData) {
        self.documents.insert(doc_id, data);
        self.ids.push(doc_id);
    }

    pub(crate) fn remove(&mut self, doc_id: DocId) -> Option<DocumentData> {
        let data = self.documents.remove(&doc_id)?;
        self.ids.retain(|&id| id != doc_id);
        Some(data)
    }

    pub fn get(&self, doc_id: DocId) -> Option<&DocumentData> {
        self.documents.get(&doc_id)
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.documents.contains_key(&doc_id)
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Id of the `index`-th document in insertion order.
    pub fn id_at(&self, index: usize) -> Result<DocId> {
        self.ids
            .get(index)
            .copied()
            .ok_or_else(|| LookupError::IndexOutOfRange { index, len: self.ids.len() }.into())
    }

    pub fn ids(&self) -> std::slice::Iter<'_, DocId> {
        self.ids.iter()
    }
}
