use std::collections::VecDeque;

use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::server::SearchServer;
use crate::DocId;

/// Default window, in requests: one per minute over a day.
pub const MINUTES_IN_DAY: u64 = 1440;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    created_at: u64,
    is_empty: bool,
}

/// Runs searches against a server and tracks how many of the recent ones found nothing.
///
/// Every request advances a logical clock by one tick. A request stays in the
/// window while fewer than `window` ticks have passed since it was made.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    window: u64,
    time: u64,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_window(server, MINUTES_IN_DAY)
    }

    pub fn with_window(server: &'a SearchServer, window: u64) -> Self {
        Self {
            server,
            requests: VecDeque::new(),
            window: window.max(1),
            time: 0,
            no_result_requests: 0,
        }
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        self.time += 1;
        self.evict_expired();
        let results = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(results.is_empty());
        Ok(results)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.add_find_request_by(raw_query, |_, doc_status, _| doc_status == status)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Requests in the current window that returned no documents.
    pub fn no_result_requests(&self) -> usize { self.no_result_requests }

    /// Requests in the current window.
    pub fn len(&self) -> usize { self.requests.len() }

    pub fn is_empty(&self) -> bool { self.requests.is_empty() }

    fn evict_expired(&mut self) {
        while let Some(front) = self.requests.front() {
            if self.time - front.created_at < self.window {
                break;
            }
            if front.is_empty {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }
    }

    fn record(&mut self, is_empty: bool) {
        if is_empty {
            self.no_result_requests += 1;
        }
        self.requests.push_back(QueryResult { created_at: self.time, is_empty });
    }
}
