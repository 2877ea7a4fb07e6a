use std::collections::HashSet;

use engage_core::AuthorId;

/// Authors already considered for a relationship action during one run.
///
/// Records that an author was *considered*, not that the follow succeeded,
/// so a failed follow is not retried later in the same run. Owned by a single
/// run and never shared; not synchronized for concurrent access.
#[derive(Debug, Default)]
pub struct AuthorLedger {
    seen: HashSet<AuthorId>,
}

impl AuthorLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn seen(&self, author: &AuthorId) -> bool {
        self.seen.contains(author)
    }

    pub fn mark_seen(&mut self, author: AuthorId) {
        self.seen.insert(author);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
