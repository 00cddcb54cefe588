use rust_decimal::Decimal;
use std::sync::Arc;

use crate::currency::CurrencyValidator;
use crate::error::{Error, Result};
use crate::ledger::balance;
use crate::ledger::history::HistoryQuery;
use crate::ledger::store::Ledger;
use crate::ledger::validator::{PostingRequest, PostingValidator};
use crate::observability::metrics::{
    BALANCE_QUERIES, HISTORY_QUERIES, POSTINGS_REJECTED, TRANSACTIONS_CREATED,
};
use crate::types::ids::TransactionId;
use crate::types::transaction::Transaction;

/// Owns the transaction log and the posting validator, and implements the
/// four-operation contract the transport layer calls into.
pub struct LedgerService {
    pub ledger: Ledger,
    validator: PostingValidator,
}

impl LedgerService {
    pub fn new(currencies: Arc<dyn CurrencyValidator>) -> Self {
        LedgerService {
            ledger: Ledger::new(),
            validator: PostingValidator::new(currencies),
        }
    }

    /// Validates and records a posting. On failure the store is untouched
    /// and the error carries the complete violation list.
    pub fn create_transaction(&mut self, req: PostingRequest) -> Result<Transaction> {
        let tx = match self.validator.validate(&req) {
            Ok(tx) => tx,
            Err(err) => {
                POSTINGS_REJECTED.inc();
                return Err(err);
            }
        };

        self.ledger.append(tx.clone());
        TRANSACTIONS_CREATED.inc();
        tracing::info!(id = %tx.id, kind = %tx.kind, "transaction recorded");
        Ok(tx)
    }

    pub fn get_transaction(&self, id: TransactionId) -> Result<Transaction> {
        self.ledger
            .get(id)
            .cloned()
            .ok_or_else(|| Error::TransactionNotFound(id.to_string()))
    }

    /// Filtered history in store order. Any invalid parameter aborts the
    /// query before the log is scanned.
    pub fn list_transactions(&self, query: HistoryQuery) -> Result<Vec<Transaction>> {
        let filter = query.into_filter()?;
        HISTORY_QUERIES.inc();
        Ok(self
            .ledger
            .all()
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect())
    }

    /// Always succeeds; an account nothing matches yields zero.
    pub fn account_balance(&self, account_id: &str) -> Decimal {
        BALANCE_QUERIES.inc();
        balance::for_account(&self.ledger, account_id)
    }
}
