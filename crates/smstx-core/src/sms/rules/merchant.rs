//! Merchant extraction for bank notifications.

use tracing::debug;

use crate::models::config::ParserConfig;

use super::patterns::{
    FALLBACK_STOPWORDS, MERCHANT_AFTER_PREPOSITION, MERCHANT_AFTER_PURCHASE, MERCHANT_LABELED,
};
use super::{ExtractionMatch, FieldExtractor, PatternRule, RuleChain, RuleTrace};

/// Where the final merchant label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerchantSource {
    /// A contextual rule matched.
    Rule(&'static str),
    /// Token fallback over the whole message.
    Fallback,
    /// Nothing usable; the placeholder was substituted.
    Placeholder,
}

/// Merchant field extractor.
///
/// Contextual rules are tried first; a rule-matched label longer than the
/// limit is cut and gets an ellipsis. Without a rule match, the first few
/// meaningful tokens are joined and hard-cut with no ellipsis.
pub struct MerchantExtractor {
    chain: RuleChain<String>,
    config: ParserConfig,
}

impl MerchantExtractor {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        let chain = RuleChain::new("merchant")
            .with_rule(PatternRule::new(
                "preposition-name",
                &MERCHANT_AFTER_PREPOSITION,
                non_blank,
            ))
            .with_rule(PatternRule::new("labeled", &MERCHANT_LABELED, non_blank))
            .with_rule(PatternRule::new(
                "purchase-target",
                &MERCHANT_AFTER_PURCHASE,
                non_blank,
            ));

        Self { chain, config }
    }

    /// Attempt every rule, for diagnostics. Values are shaped as `extract` would.
    pub fn trace(&self, text: &str) -> Vec<RuleTrace<String>> {
        self.chain
            .trace(text)
            .into_iter()
            .map(|t| RuleTrace {
                rule: t.rule,
                hit: t.hit.map(|m| self.shape_match(m)),
            })
            .collect()
    }

    /// Final merchant label and where it came from. Never empty.
    pub fn resolve(&self, text: &str) -> (String, MerchantSource) {
        if let Some(hit) = self.extract(text) {
            return (hit.value, MerchantSource::Rule(hit.rule));
        }

        match self.fallback(text) {
            Some(label) => {
                debug!("merchant fallback produced {:?}", label);
                (label, MerchantSource::Fallback)
            }
            None => {
                debug!("merchant fallback empty, using placeholder");
                (self.placeholder(), MerchantSource::Placeholder)
            }
        }
    }

    /// Join the first surviving tokens of the message.
    ///
    /// Returns `None` when the joined text is too short to be a label.
    fn fallback(&self, text: &str) -> Option<String> {
        let joined = text
            .split_whitespace()
            .filter(|token| token.chars().count() >= self.config.fallback_min_token_chars)
            .filter(|token| !is_stopword(token))
            .take(self.config.fallback_token_limit)
            .collect::<Vec<_>>()
            .join(" ");

        if joined.chars().count() <= 2 {
            return None;
        }

        Some(truncate_chars(&joined, self.config.merchant_max_chars).to_string())
    }

    fn placeholder(&self) -> String {
        truncate_chars(&self.config.placeholder_merchant, self.config.merchant_max_chars)
            .to_string()
    }

    fn shape_match(&self, mut hit: ExtractionMatch<String>) -> ExtractionMatch<String> {
        hit.value = self.shape_label(&hit.value);
        hit
    }

    fn shape_label(&self, raw: &str) -> String {
        let label = raw.trim();
        if label.chars().count() > self.config.merchant_max_chars {
            format!(
                "{}{}",
                truncate_chars(label, self.config.merchant_max_chars),
                self.config.ellipsis
            )
        } else {
            label.to_string()
        }
    }
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MerchantExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.chain.first_match(text).map(|m| self.shape_match(m))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.trace(text).into_iter().filter_map(|t| t.hit).collect()
    }
}

/// Extract a merchant label from notification text using default settings.
pub fn extract_merchant(text: &str) -> String {
    MerchantExtractor::new().resolve(text).0
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_stopword(token: &str) -> bool {
    let lower = token.to_lowercase();
    FALLBACK_STOPWORDS.iter().any(|stop| lower.starts_with(stop))
}

/// Longest prefix of `s` holding at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preposition_rule() {
        let (merchant, source) =
            MerchantExtractor::new().resolve("Rs.1,250 spent at Amazon on Card ending 1234");
        assert_eq!(merchant, "Amazon");
        assert_eq!(source, MerchantSource::Rule("preposition-name"));
    }

    #[test]
    fn test_labeled_rule() {
        let (merchant, source) =
            MerchantExtractor::new().resolve("INR 2,000.00 debited. Merchant: Big Bazaar, Pune");
        assert_eq!(merchant, "Big Bazaar");
        assert_eq!(source, MerchantSource::Rule("labeled"));
    }

    #[test]
    fn test_purchase_rule_accepts_lowercase_names() {
        let (merchant, source) =
            MerchantExtractor::new().resolve("purchase at amazon on 12/01 for Rs 300");
        assert_eq!(merchant, "amazon");
        assert_eq!(source, MerchantSource::Rule("purchase-target"));
    }

    #[test]
    fn test_blank_label_falls_through() {
        let (merchant, source) = MerchantExtractor::new().resolve("Merchant: , Rs.5");
        assert_eq!(merchant, "Merchant:");
        assert_eq!(source, MerchantSource::Fallback);

        let (merchant, source) =
            MerchantExtractor::new().resolve("Store: . payment to zomato on 12 Mar");
        assert_eq!(merchant, "zomato");
        assert_eq!(source, MerchantSource::Rule("purchase-target"));
    }

    #[test]
    fn test_blank_purchase_target_falls_through() {
        let (merchant, source) =
            MerchantExtractor::new().resolve("Rs.20 purchase at . then nothing");
        assert_eq!(merchant, "purchase then nothing");
        assert_eq!(source, MerchantSource::Fallback);
    }

    #[test]
    fn test_rule_match_truncates_with_ellipsis() {
        let name = "A".repeat(45);
        let text = format!("Rs.500 spent at {name}.");

        let merchant = extract_merchant(&text);
        assert_eq!(merchant, format!("{}...", "A".repeat(40)));
    }

    #[test]
    fn test_fallback_truncates_without_ellipsis() {
        let tokens = format!("{} {} {}", "a".repeat(20), "b".repeat(12), "c".repeat(11));
        assert_eq!(tokens.chars().count(), 45);

        let (merchant, source) =
            MerchantExtractor::new().resolve(&format!("Rs.500 debited {tokens}"));
        assert_eq!(source, MerchantSource::Fallback);
        assert_eq!(merchant, tokens[..40].to_string());
    }

    #[test]
    fn test_fallback_skips_short_tokens_and_stopwords() {
        let (merchant, source) = MerchantExtractor::new().resolve("$45.00 was charged");
        assert_eq!(merchant, "was charged");
        assert_eq!(source, MerchantSource::Fallback);

        let merchant =
            extract_merchant("INR 99 debited from account XXXX1234 via UPI ref 5512 ok");
        assert_eq!(merchant, "from via UPI");
    }

    #[test]
    fn test_fallback_stopwords_match_prefix_case_insensitively() {
        let merchant = extract_merchant("RS.40 Cardless ACCOUNTS xxxx99 Debited Tea Stall Snacks");
        assert_eq!(merchant, "Tea Stall Snacks");
    }

    #[test]
    fn test_placeholder_when_nothing_survives() {
        let (merchant, source) = MerchantExtractor::new().resolve("Rs.40 by me");
        assert_eq!(merchant, "Transaction from SMS");
        assert_eq!(source, MerchantSource::Placeholder);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let name = "É".repeat(41);
        let (merchant, _) = MerchantExtractor::new().resolve(&format!("Rs.5 debited {name}"));
        assert_eq!(merchant.chars().count(), 40);
    }

    #[test]
    fn test_custom_config() {
        let config = ParserConfig {
            merchant_max_chars: 5,
            ellipsis: "~".to_string(),
            ..ParserConfig::default()
        };
        let extractor = MerchantExtractor::with_config(config);
        assert_eq!(extractor.resolve("spent at Starbucks, Rs.5").0, "Starb~");
    }
}
