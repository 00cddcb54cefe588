use lazy_static::lazy_static;
use prometheus::{Counter, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Posting metrics
    pub static ref TRANSACTIONS_CREATED: Counter = Counter::new(
        "transactions_created_total",
        "Total number of transactions recorded in the ledger"
    ).unwrap();

    pub static ref POSTINGS_REJECTED: Counter = Counter::new(
        "postings_rejected_total",
        "Total number of postings rejected by validation"
    ).unwrap();

    // Query metrics
    pub static ref HISTORY_QUERIES: Counter = Counter::new(
        "history_queries_total",
        "Total number of transaction history queries served"
    ).unwrap();

    pub static ref BALANCE_QUERIES: Counter = Counter::new(
        "balance_queries_total",
        "Total number of account balance derivations served"
    ).unwrap();
}

pub fn register_metrics() {
    REGISTRY.register(Box::new(TRANSACTIONS_CREATED.clone())).unwrap();
    REGISTRY.register(Box::new(POSTINGS_REJECTED.clone())).unwrap();
    REGISTRY.register(Box::new(HISTORY_QUERIES.clone())).unwrap();
    REGISTRY.register(Box::new(BALANCE_QUERIES.clone())).unwrap();
}
