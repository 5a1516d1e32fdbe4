use std::collections::{BTreeSet, HashSet};

use crate::server::SearchServer;
use crate::DocId;

/// Remove every document whose set of distinct words matches an earlier document's.
///
/// Word counts are ignored, so `"funny funny pet"` duplicates `"funny pet"`.
/// Documents are scanned in insertion order and the first of each group is kept.
/// Returns the removed ids in scan order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let mut duplicates = Vec::new();
    {
        let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
        for doc_id in server.iter() {
            let words: BTreeSet<&str> = server
                .word_frequencies(doc_id)
                .map(|freqs| freqs.keys().map(String::as_str).collect())
                .unwrap_or_default();
            if !seen.insert(words) {
                duplicates.push(doc_id);
            }
        }
    }

    for &doc_id in &duplicates {
        tracing::info!(document_id = doc_id, "found duplicate document");
        server.remove_document(doc_id);
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    #[test]
    fn empty_documents_duplicate_each_other() {
        let mut server = SearchServer::from_stop_words_text("and").unwrap();
        server.add_document(1, "and", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(2, "", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(remove_duplicates(&mut server), vec![2]);
        assert_eq!(server.document_count(), 1);
    }

    #[test]
    fn no_documents_no_removals() {
        let mut server = SearchServer::new();
        assert!(remove_duplicates(&mut server).is_empty());
    }
}
