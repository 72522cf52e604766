//! Parsed transaction model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amount and merchant label pulled out of one notification.
///
/// Built fresh by every successful parse and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// Extracted amount, always greater than zero on a successful parse.
    pub amount: Decimal,
    /// Counterparty or purpose of the transaction.
    pub merchant: String,
}

impl ParsedTransaction {
    pub fn new(amount: Decimal, merchant: impl Into<String>) -> Self {
        Self {
            amount,
            merchant: merchant.into(),
        }
    }

    /// Amount rendered with two fractional digits.
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.amount)
    }
}
