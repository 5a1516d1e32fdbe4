use std::collections::BTreeMap;

use crate::DocId;

/// Term frequencies of one term, keyed by document.
pub type Postings = BTreeMap<DocId, f64>;

/// term -> (document -> term frequency). A term never maps to an empty posting list.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Merge a document's term frequencies into the index.
    pub fn insert(&mut self, doc_id: DocId, word_frequencies: &BTreeMap<String, f64>) {
        for (word, tf) in word_frequencies {
            self.postings.entry(word.clone()).or_default().insert(doc_id, *tf);
        }
    }

    /// Remove a document from the posting lists of `words`, dropping terms left empty.
    pub fn remove<'a, I>(&mut self, doc_id: DocId, words: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for word in words {
            if let Some(postings) = self.postings.get_mut(word) {
                postings.remove(&doc_id);
                if postings.is_empty() {
                    self.postings.remove(word);
                }
            }
        }
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.postings.get(word)
    }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings.get(word).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, word: &str, doc_id: DocId) -> bool {
        self.postings.get(word).is_some_and(|p| p.contains_key(&doc_id))
    }

    /// ln(num_docs / df). Only defined for indexed terms, `None` otherwise.
    pub fn inverse_document_frequency(&self, word: &str, num_docs: usize) -> Option<f64> {
        let df = self.document_frequency(word);
        if df == 0 {
            return None;
        }
        Some((num_docs as f64 / df as f64).ln())
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}

/// TF per distinct word: occurrences / total word count. Empty input gives an empty map.
pub fn compute_word_frequencies(words: &[&str]) -> BTreeMap<String, f64> {
    let mut frequencies: BTreeMap<String, f64> = BTreeMap::new();
    if words.is_empty() {
        return frequencies;
    }
    let inverse_word_count = 1.0 / words.len() as f64;
    for word in words {
        *frequencies.entry((*word).to_string()).or_insert(0.0) += inverse_word_count;
    }
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_frequencies_sum_to_one() {
        let tf = compute_word_frequencies(&["cat", "cat", "city", "dog", "a", "b", "c"]);
        let sum: f64 = tf.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((tf["cat"] - 2.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn empty_document_has_no_frequencies() {
        assert!(compute_word_frequencies(&[]).is_empty());
    }

    #[test]
    fn removing_last_posting_drops_the_term() {
        let mut index = InvertedIndex::new();
        index.insert(1, &compute_word_frequencies(&["cat", "dog"]));
        index.insert(2, &compute_word_frequencies(&["cat"]));
        let words: Vec<String> = vec!["cat".into(), "dog".into()];
        index.remove(1, &words);
        assert_eq!(index.document_frequency("cat"), 1);
        assert!(index.postings("dog").is_none());
        assert_eq!(index.num_terms(), 1);
        index.remove(2, &words);
        assert!(index.is_empty());
    }

    #[test]
    fn idf_is_undefined_for_unknown_terms() {
        let mut index = InvertedIndex::new();
        index.insert(0, &compute_word_frequencies(&["cat"]));
        index.insert(1, &compute_word_frequencies(&["dog"]));
        assert_eq!(index.inverse_document_frequency("rat", 2), None);
        let idf = index.inverse_document_frequency("cat", 2).unwrap();
        assert!((idf - 2f64.ln()).abs() < 1e-12);
    }
}
