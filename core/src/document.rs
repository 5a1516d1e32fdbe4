use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DocId;

/// Lifecycle status of a stored document. The server only uses it as a filter key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Actual => "actual",
            Self::Irrelevant => "irrelevant",
            Self::Banned => "banned",
            Self::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// A ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Self { id, relevance, rating }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {:.6}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Truncating integer average; an empty list averages to 0.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(compute_average_rating(&[1, 2, 3]), 2);
        assert_eq!(compute_average_rating(&[-1, -2, -3]), -2);
        assert_eq!(compute_average_rating(&[1, 2]), 1);
        assert_eq!(compute_average_rating(&[-1, -2]), -1);
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn document_display() {
        let doc = Document::new(1, 0.5, 7);
        assert_eq!(doc.to_string(), "{ document_id = 1, relevance = 0.500000, rating = 7 }");
    }

    #[test]
    fn status_round_trips_through_lowercase_names() {
        let status: DocumentStatus = serde_json::from_str("\"banned\"").unwrap();
        assert_eq!(status, DocumentStatus::Banned);
        assert_eq!(serde_json::to_string(&DocumentStatus::Actual).unwrap(), "\"actual\"");
    }
}
