use std::collections::BTreeMap;

use crate::document::{compute_average_rating, Document, DocumentStatus};
use crate::error::{LookupError, Result, ValidationError};
use crate::index::{compute_word_frequencies, InvertedIndex};
use crate::query::{parse_query, Query};
use crate::store::{DocumentData, DocumentStore};
use crate::tokenizer::{split_into_words_no_stop, StopWords};
use crate::DocId;

/// At most this many documents are returned by a search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ordered by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// In-memory TF-IDF search over a set of documents.
///
/// Documents are added with [`SearchServer::add_document`] and searched with
/// plus/minus word queries: `"fluffy cat -collar"` ranks documents containing
/// `fluffy` or `cat` and drops every document containing `collar`.
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    pub fn new() -> Self { Self::default() }

    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    /// Build a server whose stop words are the whitespace-separated words of `text`.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::with_stop_words(StopWords::from_text(text)?))
    }

    /// Add more stop words. Documents already indexed are not re-tokenized.
    pub fn set_stop_words(&mut self, text: &str) -> Result<()> {
        self.stop_words.extend_from_text(text)
    }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    pub fn add_document(
        &mut self,
        doc_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if doc_id < 0 {
            return Err(ValidationError::NegativeId(doc_id).into());
        }
        if self.documents.contains(doc_id) {
            return Err(ValidationError::DuplicateId(doc_id).into());
        }
        let words = split_into_words_no_stop(text, &self.stop_words)?;
        let word_frequencies = compute_word_frequencies(&words);

        self.index.insert(doc_id, &word_frequencies);
        tracing::debug!(doc_id, terms = word_frequencies.len(), "document added");
        self.documents.insert(
            doc_id,
            DocumentData { rating: compute_average_rating(ratings), status, word_frequencies },
        );
        Ok(())
    }

    /// Remove a document and every posting it owns. Unknown ids are ignored.
    pub fn remove_document(&mut self, doc_id: DocId) {
        if let Some(data) = self.documents.remove(doc_id) {
            self.index.remove(doc_id, data.word_frequencies.keys());
        }
    }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Id of the `index`-th added document still present.
    pub fn document_id(&self, index: usize) -> Result<DocId> {
        self.documents.id_at(index)
    }

    /// Document ids in insertion order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, DocId>> {
        self.documents.ids().copied()
    }

    pub fn word_frequencies(&self, doc_id: DocId) -> Option<&BTreeMap<String, f64>> {
        self.documents.get(doc_id).map(|d| &d.word_frequencies)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut matched: Vec<Document> = self
            .find_all_documents(&query)
            .into_iter()
            .filter(|doc| {
                self.documents
                    .get(doc.id)
                    .is_some_and(|data| predicate(doc.id, data.status, data.rating))
            })
            .collect();
        sort_by_relevance(&mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, |_, doc_status, _| doc_status == status)
    }

    /// Search among [`DocumentStatus::Actual`] documents.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Plus words of the query found in the document, or nothing if a minus word is found.
    pub fn match_document(
        &self,
        raw_query: &str,
        doc_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let data = self
            .documents
            .get(doc_id)
            .ok_or(LookupError::UnknownDocumentId(doc_id))?;

        if query.minus_words.iter().any(|word| self.index.contains(word, doc_id)) {
            return Ok((Vec::new(), data.status));
        }
        let words = query
            .plus_words
            .iter()
            .filter(|word| self.index.contains(word, doc_id))
            .cloned()
            .collect();
        Ok((words, data.status))
    }

    fn find_all_documents(&self, query: &Query) -> Vec<Document> {
        let num_docs = self.document_count();
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();

        for word in &query.plus_words {
            let (Some(postings), Some(idf)) = (
                self.index.postings(word),
                self.index.inverse_document_frequency(word, num_docs),
            ) else {
                continue;
            };
            for (&doc_id, &tf) in postings {
                *relevance.entry(doc_id).or_insert(0.0) += tf * idf;
            }
        }

        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for doc_id in postings.keys() {
                    relevance.remove(doc_id);
                }
            }
        }

        relevance
            .into_iter()
            .filter_map(|(doc_id, relevance)| {
                let rating = self.documents.get(doc_id)?.rating;
                Some(Document::new(doc_id, relevance, rating))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Relevance descending. Neighbours whose relevances differ by less than
/// [`RELEVANCE_EPSILON`] are swapped until the higher rating comes first.
/// A document never moves above one that is more than the epsilon more relevant.
pub(crate) fn sort_by_relevance(documents: &mut [Document]) {
    documents.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    // each swap removes one rating inversion, so this terminates
    let mut swapped = true;
    while swapped {
        swapped = false;
        for i in 1..documents.len() {
            let (left, right) = (&documents[i - 1], &documents[i]);
            if (left.relevance - right.relevance).abs() < RELEVANCE_EPSILON && right.rating > left.rating {
                documents.swap(i - 1, i);
                swapped = true;
            }
        }
    }
}
