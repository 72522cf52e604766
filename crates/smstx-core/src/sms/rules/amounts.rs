//! Amount extraction for bank notifications.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{
    AMOUNT_ACTION_BARE_NUMBER, AMOUNT_ACTION_THEN_CURRENCY, AMOUNT_BARE_CURRENCY,
    AMOUNT_CURRENCY_THEN_ACTION, AMOUNT_KEYWORD_THEN_CURRENCY,
};
use super::{ExtractionMatch, FieldExtractor, PatternRule, RuleChain, RuleTrace};

/// Amount field extractor.
///
/// Rules, in priority order:
/// 1. action keyword, then currency marker and number
/// 2. currency marker and number, then action keyword
/// 3. amount keyword (amount/amt/txn/value), then currency marker and number
/// 4. currency marker and number alone
/// 5. debited/withdrawn/spent, optional by/of/for, then a bare number
pub struct AmountExtractor {
    chain: RuleChain<Decimal>,
}

impl AmountExtractor {
    pub fn new() -> Self {
        let chain = RuleChain::new("amount")
            .with_rule(PatternRule::new(
                "action-then-currency",
                &AMOUNT_ACTION_THEN_CURRENCY,
                parse_amount,
            ))
            .with_rule(PatternRule::new(
                "currency-then-action",
                &AMOUNT_CURRENCY_THEN_ACTION,
                parse_amount,
            ))
            .with_rule(PatternRule::new(
                "keyword-then-currency",
                &AMOUNT_KEYWORD_THEN_CURRENCY,
                parse_amount,
            ))
            .with_rule(PatternRule::new(
                "bare-currency",
                &AMOUNT_BARE_CURRENCY,
                parse_amount,
            ))
            .with_rule(PatternRule::new(
                "action-bare-number",
                &AMOUNT_ACTION_BARE_NUMBER,
                parse_amount,
            ));

        Self { chain }
    }

    /// Attempt every rule, for diagnostics.
    pub fn trace(&self, text: &str) -> Vec<RuleTrace<Decimal>> {
        self.chain.trace(text)
    }

    /// First matching amount, or zero when no rule matches.
    pub fn amount_or_zero(&self, text: &str) -> Decimal {
        self.extract(text).map(|m| m.value).unwrap_or(Decimal::ZERO)
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.chain.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.chain
            .trace(text)
            .into_iter()
            .filter_map(|t| t.hit)
            .collect()
    }
}

/// Extract the transaction amount from notification text.
///
/// Returns zero when nothing matches; callers treat `<= 0` as "not found".
pub fn extract_amount(text: &str) -> Decimal {
    AmountExtractor::new().amount_or_zero(text)
}

/// Parse a captured amount such as "1,250.50", dropping thousands separators.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50"), Some(dec("1250.50")));
        assert_eq!(parse_amount("12,34,567.89"), Some(dec("1234567.89")));
        assert_eq!(parse_amount("45.00"), Some(dec("45")));
        assert_eq!(parse_amount("7.125"), Some(dec("7.125")));
        assert_eq!(parse_amount(","), None);
    }

    #[test]
    fn test_out_of_range_amount_is_a_miss() {
        let text = "Rs 99999999999999999999999999999999999 spent";
        assert_eq!(parse_amount("99999999999999999999999999999999999"), None);
        assert!(AmountExtractor::new().extract_all(text).is_empty());
        assert_eq!(extract_amount(text), Decimal::ZERO);
    }

    #[test]
    fn test_action_then_currency() {
        let extractor = AmountExtractor::new();
        let hit = extractor
            .extract("Your a/c XX1234 debited for INR 2,500.00 on 01-Jan")
            .unwrap();
        assert_eq!(hit.rule, "action-then-currency");
        assert_eq!(hit.value, dec("2500.00"));
    }

    #[test]
    fn test_currency_then_action() {
        let hit = AmountExtractor::new().extract("Rs.500 spent at Store").unwrap();
        assert_eq!(hit.rule, "currency-then-action");
        assert_eq!(hit.value, dec("500"));
    }

    #[test]
    fn test_keyword_anchored_rule_beats_bare_currency() {
        let text = "Avl bal Rs.10,000.00. Card spent Rs.750 at Cafe";
        let hit = AmountExtractor::new().extract(text).unwrap();
        assert_eq!(hit.rule, "action-then-currency");
        assert_eq!(hit.value, dec("750"));
    }

    #[test]
    fn test_action_then_currency_spans_sentences() {
        // The gap after the keyword is unbounded, so a trailing balance wins.
        let hit = AmountExtractor::new()
            .extract("Rs.500 spent at Amazon. Avl bal Rs.10,000")
            .unwrap();
        assert_eq!(hit.rule, "action-then-currency");
        assert_eq!(hit.value, dec("10000"));
    }

    #[test]
    fn test_amount_keyword() {
        let hit = AmountExtractor::new()
            .extract("Txn of USD 19.99 approved at Netflix")
            .unwrap();
        assert_eq!(hit.rule, "keyword-then-currency");
        assert_eq!(hit.value, dec("19.99"));
    }

    #[test]
    fn test_bare_currency() {
        let hit = AmountExtractor::new().extract("Bill of €12.40 for April").unwrap();
        assert_eq!(hit.rule, "bare-currency");
        assert_eq!(hit.value, dec("12.40"));
    }

    #[test]
    fn test_action_with_bare_number() {
        let extractor = AmountExtractor::new();
        assert_eq!(
            extractor.extract("Account debited by 1,200.00 today").unwrap().rule,
            "action-bare-number"
        );
        assert_eq!(extractor.amount_or_zero("withdrawn 300 at ATM"), dec("300"));
        assert_eq!(extractor.amount_or_zero("You spent of 42.5"), dec("42.5"));
    }

    #[test]
    fn test_no_match_returns_zero() {
        assert_eq!(extract_amount("no numbers here"), Decimal::ZERO);
        assert_eq!(extract_amount("call 1800 123 456"), Decimal::ZERO);
    }

    #[test]
    fn test_extract_all_keeps_priority_order() {
        let hits = AmountExtractor::new().extract_all("Rs.500 spent at Store");
        let rules: Vec<_> = hits.iter().map(|h| h.rule).collect();
        assert_eq!(rules, vec!["currency-then-action", "bare-currency"]);
    }
}
