use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

use crate::currency::CurrencyValidator;
use crate::error::{Result, Violations};
use crate::types::account::AccountId;
use crate::types::transaction::{Transaction, TransactionType};

pub(crate) const ACCOUNT_FORMAT_MESSAGE: &str =
    "Account must follow format ACC-XXXXX (alphanumeric)";
pub(crate) const TYPE_MESSAGE: &str = "Type must be one of deposit | withdrawal | transfer";

/// An incoming posting, exactly as supplied by the caller. Every field is
/// optional so that missing values surface as violations rather than
/// deserialization failures.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingRequest {
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Validates postings into stored records. All rules run and violations
/// accumulate; a posting either passes every check or fails with the
/// complete list.
pub struct PostingValidator {
    currencies: Arc<dyn CurrencyValidator>,
}

impl PostingValidator {
    pub fn new(currencies: Arc<dyn CurrencyValidator>) -> Self {
        PostingValidator { currencies }
    }

    pub fn validate(&self, req: &PostingRequest) -> Result<Transaction> {
        let mut violations = Violations::new();

        let amount = check_amount(&mut violations, req.amount);
        let from = check_account(&mut violations, "fromAccount", req.from_account.as_deref());
        let to = check_account(&mut violations, "toAccount", req.to_account.as_deref());
        let currency = self.check_currency(&mut violations, req.currency.as_deref());
        let kind = check_kind(&mut violations, req.kind.as_deref());

        match (amount, from, to, currency, kind) {
            (Some(amount), Some(from), Some(to), Some(currency), Some(kind))
                if violations.is_empty() =>
            {
                Ok(Transaction::create(from, to, amount, currency, kind))
            }
            _ => Err(violations.into_error()),
        }
    }

    fn check_currency(&self, violations: &mut Violations, currency: Option<&str>) -> Option<String> {
        match currency {
            Some(code) if !code.trim().is_empty() && self.currencies.is_known(code) => {
                // Stored as supplied; only validation is case-insensitive.
                Some(code.to_string())
            }
            _ => {
                violations.add("currency", "Invalid currency code");
                None
            }
        }
    }
}

fn check_amount(violations: &mut Violations, amount: Option<Decimal>) -> Option<Decimal> {
    match amount {
        Some(value) if value > Decimal::ZERO => {
            // Scale is only checked once positivity holds, so the two
            // amount messages are mutually exclusive.
            if value.scale() > 2 {
                violations.add("amount", "Amount must have at most 2 decimal places");
            }
            Some(value)
        }
        _ => {
            violations.add("amount", "Amount must be a positive number");
            None
        }
    }
}

fn check_account(
    violations: &mut Violations,
    field: &str,
    account: Option<&str>,
) -> Option<AccountId> {
    match account.and_then(AccountId::parse) {
        Some(id) => Some(id),
        None => {
            violations.add(field, ACCOUNT_FORMAT_MESSAGE);
            None
        }
    }
}

fn check_kind(violations: &mut Violations, kind: Option<&str>) -> Option<TransactionType> {
    match kind.and_then(TransactionType::parse) {
        Some(kind) => Some(kind),
        None => {
            violations.add("type", TYPE_MESSAGE);
            None
        }
    }
}
