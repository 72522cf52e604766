//! Core library for bank SMS transaction parsing.
//!
//! This crate provides:
//! - Amount extraction from free-form notification text
//! - Merchant/description extraction with a token fallback
//! - An orchestrating parser returning a transaction or a named failure
//! - JSON configuration for the parser and its front ends

pub mod error;
pub mod models;
pub mod sms;

pub use error::{ParseError, Result, SmstxError};
pub use models::config::{OutputConfig, OutputFormat, ParserConfig, SmstxConfig};
pub use models::transaction::ParsedTransaction;
pub use sms::rules::{
    extract_amount, extract_merchant, AmountExtractor, ExtractionMatch, FieldExtractor,
    MerchantExtractor, PatternRule, Rule, RuleChain, RuleTrace,
};
pub use sms::{Explanation, MerchantSource, ParseOutcome, SmsParser, TransactionParser};
