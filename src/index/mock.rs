use std::collections::HashMap;
use std::sync::RwLock;

use super::client::SearchIndex;
use super::error::IndexError;
use super::model::{Fuzziness, RawHit};

/// Failure injected into every subsequent mock query.
#[derive(Debug, Clone, Copy)]
pub enum MockFailure {
    /// Simulate a query timeout.
    Timeout,
    /// Simulate an unreachable endpoint.
    Unavailable,
}

#[derive(Default)]
/// In-memory [`SearchIndex`] with canned responses and call counters.
///
/// Responses are keyed by field (term queries) or by field and fuzziness
/// (match queries); the counters let tests assert tier short-circuiting.
pub struct MockSearchIndex {
    inner: RwLock<MockInner>,
}

#[derive(Default)]
struct MockInner {
    term_hits: HashMap<String, Vec<RawHit>>,
    match_hits: HashMap<(String, bool), Vec<RawHit>>,
    term_calls: HashMap<String, u64>,
    match_calls: HashMap<(String, bool), u64>,
    last_limit: Option<u64>,
    failure: Option<MockFailure>,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers hits for term queries on `field`.
    pub fn put_term_hits(&self, field: &str, hits: Vec<RawHit>) {
        self.inner
            .write()
            .expect("mock lock poisoned")
            .term_hits
            .insert(field.to_string(), hits);
    }

    /// Registers hits for match queries on `field`.
    pub fn put_match_hits(&self, field: &str, fuzzy: bool, hits: Vec<RawHit>) {
        self.inner
            .write()
            .expect("mock lock poisoned")
            .match_hits
            .insert((field.to_string(), fuzzy), hits);
    }

    /// Makes every subsequent query fail with `failure`.
    pub fn fail_with(&self, failure: MockFailure) {
        self.inner.write().expect("mock lock poisoned").failure = Some(failure);
    }

    /// Number of term queries issued against `field`.
    pub fn term_calls(&self, field: &str) -> u64 {
        self.inner
            .read()
            .expect("mock lock poisoned")
            .term_calls
            .get(field)
            .copied()
            .unwrap_or(0)
    }

    /// Number of match queries issued against `field` with the given fuzziness.
    pub fn match_calls(&self, field: &str, fuzzy: bool) -> u64 {
        self.inner
            .read()
            .expect("mock lock poisoned")
            .match_calls
            .get(&(field.to_string(), fuzzy))
            .copied()
            .unwrap_or(0)
    }

    /// Total queries of either kind.
    pub fn total_calls(&self) -> u64 {
        let inner = self.inner.read().expect("mock lock poisoned");
        inner.term_calls.values().sum::<u64>() + inner.match_calls.values().sum::<u64>()
    }

    /// The `size` passed with the most recent query.
    pub fn last_limit(&self) -> Option<u64> {
        self.inner.read().expect("mock lock poisoned").last_limit
    }

    fn failure_error(failure: MockFailure, index: &str) -> IndexError {
        match failure {
            MockFailure::Timeout => IndexError::Timeout {
                index: index.to_string(),
                timeout_ms: 0,
            },
            MockFailure::Unavailable => IndexError::Unavailable {
                url: "mock://index".to_string(),
                message: "injected failure".to_string(),
            },
        }
    }
}

impl SearchIndex for MockSearchIndex {
    async fn term_query(
        &self,
        index: &str,
        field: &str,
        _value: &str,
        limit: u64,
    ) -> Result<Vec<RawHit>, IndexError> {
        let mut inner = self.inner.write().expect("mock lock poisoned");
        *inner.term_calls.entry(field.to_string()).or_insert(0) += 1;
        inner.last_limit = Some(limit);

        if let Some(failure) = inner.failure {
            return Err(Self::failure_error(failure, index));
        }

        Ok(inner.term_hits.get(field).cloned().unwrap_or_default())
    }

    async fn match_query(
        &self,
        index: &str,
        field: &str,
        _value: &str,
        fuzziness: Fuzziness,
        limit: u64,
    ) -> Result<Vec<RawHit>, IndexError> {
        let fuzzy = matches!(fuzziness, Fuzziness::Auto);

        let mut inner = self.inner.write().expect("mock lock poisoned");
        *inner
            .match_calls
            .entry((field.to_string(), fuzzy))
            .or_insert(0) += 1;
        inner.last_limit = Some(limit);

        if let Some(failure) = inner.failure {
            return Err(Self::failure_error(failure, index));
        }

        Ok(inner
            .match_hits
            .get(&(field.to_string(), fuzzy))
            .cloned()
            .unwrap_or_default())
    }
}
