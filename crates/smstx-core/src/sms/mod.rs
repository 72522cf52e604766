//! Transaction extraction from bank notification text.

mod parser;
pub mod rules;

pub use parser::{Explanation, ParseOutcome, SmsParser};
pub use rules::MerchantSource;

use crate::error::ParseError;
use crate::models::transaction::ParsedTransaction;

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Trait for notification parsers.
pub trait TransactionParser {
    /// Parse one notification into a transaction.
    fn parse(&self, text: &str) -> Result<ParsedTransaction>;
}
