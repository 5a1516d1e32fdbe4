//! In-memory TF-IDF search over short text documents.
//!
//! Documents are whitespace-tokenized, stop words are dropped, and every
//! remaining word is indexed with its term frequency. Queries are sets of
//! plus words (ranked by TF-IDF) and minus words (excluding documents).

pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod query;
pub mod request_queue;
pub mod server;
pub mod store;
pub mod tokenizer;

pub type DocId = i32;

pub use dedup::remove_duplicates;
pub use document::{Document, DocumentStatus};
pub use error::{LookupError, Result, SearchError, ValidationError};
pub use paginator::{paginate, Page, Paginator};
pub use request_queue::RequestQueue;
pub use server::{SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use tokenizer::StopWords;
