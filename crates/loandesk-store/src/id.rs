use loandesk_shared::constants::ID_COUNTER_WIDTH;
use loandesk_shared::RecordId;
use uuid::Uuid;

use crate::config::IdStrategy;

/// Hands out ids that never collide with ids already in the collection.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    namespace: String,
    strategy: IdStrategy,
    next: u64,
}

impl IdGenerator {
    pub fn new(namespace: impl Into<String>, strategy: IdStrategy) -> Self {
        Self {
            namespace: namespace.into(),
            strategy,
            next: 1,
        }
    }

    /// Move the counter past a seeded id so generated ids stay increasing.
    pub fn observe(&mut self, id: &RecordId) {
        if id.namespace() != self.namespace {
            return;
        }
        let suffix = &id.as_str()[self.namespace.len()..];
        if let Some(n) = suffix
            .strip_prefix(loandesk_shared::constants::ID_SEPARATOR)
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.next = self.next.max(n.saturating_add(1));
        }
    }

    /// Produce an id for which `taken` returns false.
    pub fn next_id(&mut self, taken: impl Fn(&RecordId) -> bool) -> RecordId {
        loop {
            let candidate = match self.strategy {
                IdStrategy::Sequential => {
                    let n = self.next;
                    self.next = self.next.saturating_add(1);
                    RecordId::compose(&self.namespace, format!("{n:0width$}", width = ID_COUNTER_WIDTH))
                }
                IdStrategy::Uuid => RecordId::compose(&self.namespace, Uuid::new_v4()),
            };
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}
