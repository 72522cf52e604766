//! Orchestrating parser combining the amount and merchant extractors.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::ParseError;
use crate::models::config::ParserConfig;
use crate::models::transaction::ParsedTransaction;

use super::rules::{AmountExtractor, FieldExtractor, MerchantExtractor, MerchantSource, RuleTrace};
use super::{Result, TransactionParser};

/// Parsed transaction plus the rules that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// Extracted transaction.
    pub transaction: ParsedTransaction,
    /// Amount rule that fired.
    pub amount_rule: &'static str,
    /// Origin of the merchant label.
    pub merchant_source: MerchantSource,
}

/// Every rule's verdict on one message, with the final outcome.
#[derive(Debug, Clone)]
pub struct Explanation {
    pub amount_rules: Vec<RuleTrace<Decimal>>,
    pub merchant_rules: Vec<RuleTrace<String>>,
    pub outcome: Result<ParseOutcome>,
}

/// Stateless bank notification parser.
///
/// Pure function of its input: safe to share across threads and to call
/// repeatedly with identical results.
pub struct SmsParser {
    amounts: AmountExtractor,
    merchants: MerchantExtractor,
    placeholder: String,
}

impl SmsParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom merchant shaping.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            amounts: AmountExtractor::new(),
            placeholder: config.placeholder_merchant.clone(),
            merchants: MerchantExtractor::with_config(config),
        }
    }

    /// Parse and report which rules fired.
    pub fn parse_detailed(&self, text: &str) -> Result<ParseOutcome> {
        let text = text.trim();
        if text.is_empty() {
            debug!("rejecting empty message");
            return Err(ParseError::EmptyInput);
        }

        let amount = self
            .amounts
            .extract(text)
            .filter(|hit| hit.value > Decimal::ZERO)
            .ok_or(ParseError::NoAmountFound)?;

        let (mut merchant, mut merchant_source) = self.merchants.resolve(text);
        if merchant.trim().is_empty() {
            merchant = self.placeholder.clone();
            merchant_source = MerchantSource::Placeholder;
        }

        info!(
            "parsed amount {} ({}) merchant {:?} ({:?})",
            amount.value, amount.rule, merchant, merchant_source
        );

        Ok(ParseOutcome {
            transaction: ParsedTransaction::new(amount.value, merchant),
            amount_rule: amount.rule,
            merchant_source,
        })
    }

    /// Parse each non-blank line. Line numbers start at 1.
    pub fn parse_batch<'a, I>(&self, lines: I) -> Vec<(usize, Result<ParsedTransaction>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| (idx + 1, self.parse(line)))
            .collect()
    }

    /// Run every amount and merchant rule against the message.
    pub fn explain(&self, text: &str) -> Explanation {
        let trimmed = text.trim();
        Explanation {
            amount_rules: self.amounts.trace(trimmed),
            merchant_rules: self.merchants.trace(trimmed),
            outcome: self.parse_detailed(text),
        }
    }
}

impl Default for SmsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionParser for SmsParser {
    fn parse(&self, text: &str) -> Result<ParsedTransaction> {
        self.parse_detailed(text).map(|outcome| outcome.transaction)
    }
}
