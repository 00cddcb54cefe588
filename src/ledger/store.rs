use std::collections::HashMap;

use crate::types::ids::TransactionId;
use crate::types::transaction::Transaction;

/// Append-only transaction log. Records are kept in insertion order and
/// indexed by id; nothing is ever updated or removed for the lifetime of
/// the process.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<Transaction>,
    index: HashMap<TransactionId, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds a record. Ids are engine-assigned, so a collision here would be
    /// a bug in id generation rather than a caller error.
    pub fn append(&mut self, tx: Transaction) {
        let previous = self.index.insert(tx.id, self.entries.len());
        debug_assert!(previous.is_none(), "transaction id reused: {}", tx.id);
        self.entries.push(tx);
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.index.get(&id).map(|&position| &self.entries[position])
    }

    /// Every record, oldest first. Input to all query operations.
    pub fn all(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
