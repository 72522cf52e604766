//! Regex patterns for bank notification extraction.
//!
//! Amount patterns capture the digit string in group 1; merchant patterns
//! capture the label in group 1.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount patterns, highest priority first.
    // Currency markers: Rs, Rs., INR, USD, $, €, £, ₹
    pub static ref AMOUNT_ACTION_THEN_CURRENCY: Regex = Regex::new(
        r"(?is)\b(?:spent|charged|purchase|paid|transaction|debited|withdrawn|debit|dr)\b.*?(?:\brs\.?|\binr|\busd|[$€£₹])\s*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    pub static ref AMOUNT_CURRENCY_THEN_ACTION: Regex = Regex::new(
        r"(?is)(?:\brs\.?|\binr|\busd|[$€£₹])\s*(\d[\d,]*(?:\.\d+)?).*?\b(?:spent|charged|purchase|paid|transaction|debited|withdrawn|debit|dr)\b"
    ).unwrap();

    pub static ref AMOUNT_KEYWORD_THEN_CURRENCY: Regex = Regex::new(
        r"(?is)\b(?:amount|amt|txn|value)\b\D*?(?:\brs\.?|\binr|\busd|[$€£₹])\s*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    pub static ref AMOUNT_BARE_CURRENCY: Regex = Regex::new(
        r"(?i)(?:\brs\.?|\binr|\busd|[$€£₹])\s*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    pub static ref AMOUNT_ACTION_BARE_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:debited|withdrawn|spent)\s+(?:(?:by|of|for)\s+)?(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    // Merchant patterns, highest priority first.
    // Name must start with an uppercase letter; keywords are case-insensitive.
    // Label captures never start with or cross their own terminator.
    pub static ref MERCHANT_AFTER_PREPOSITION: Regex = Regex::new(
        r"(?:\b(?i:at|merchant|to|on)\s+|@\s*)([A-Z][A-Za-z0-9&'*\- ]*?)(?:\s+(?i:on|dated|dt|for|card|a/c)\b|\s*[.,]|\s*(?:\b(?i:rs|inr|usd)(?:\b|\d)|[$€£₹]))"
    ).unwrap();

    pub static ref MERCHANT_LABELED: Regex = Regex::new(
        r"(?i)\b(?:merchant|store|shop|vendor):\s*([^.,\s][^.,\n]*?)(?:[.,]|\s+on\b|\s+card\b)"
    ).unwrap();

    pub static ref MERCHANT_AFTER_PURCHASE: Regex = Regex::new(
        r"(?i)\b(?:purchase|payment|txn)\s+(?:at|on|to)\s+([^.\s][^.\n]*?)(?:\s+on\b|\s+dated\b|\.)"
    ).unwrap();
}

/// Lowercased prefixes that disqualify a token from the merchant fallback.
pub const FALLBACK_STOPWORDS: &[&str] = &[
    "rs", "inr", "usd", "$", "€", "£", "₹", "debited", "credited", "card", "account", "a/c",
    "xxxx",
];
