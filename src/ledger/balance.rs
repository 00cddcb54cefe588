use rust_decimal::Decimal;

use crate::ledger::store::Ledger;
use crate::types::transaction::TransactionType;

/// Derives the signed balance of one account by replaying every completed
/// transaction that touches it, in store order.
///
/// Accepts any string: there is no format or existence check, and an account
/// nothing matches simply yields zero. A transfer whose `fromAccount` equals
/// its `toAccount` is adjusted on both sides, netting to zero.
pub fn for_account(ledger: &Ledger, account_id: &str) -> Decimal {
    let mut balance = Decimal::ZERO;
    for tx in ledger.all() {
        if !tx.status.is_completed() {
            continue;
        }
        match tx.kind {
            TransactionType::Deposit => {
                if tx.to_account.as_str() == account_id {
                    balance += tx.amount;
                }
            }
            TransactionType::Withdrawal => {
                if tx.from_account.as_str() == account_id {
                    balance -= tx.amount;
                }
            }
            TransactionType::Transfer => {
                if tx.from_account.as_str() == account_id {
                    balance -= tx.amount;
                }
                if tx.to_account.as_str() == account_id {
                    balance += tx.amount;
                }
            }
        }
    }
    balance
}
