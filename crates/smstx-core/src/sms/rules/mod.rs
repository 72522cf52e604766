//! Rule-based field extractors for bank notification text.

pub mod amounts;
pub mod merchant;
pub mod patterns;

use regex::Regex;
use tracing::{debug, trace};

pub use amounts::{extract_amount, parse_amount, AmountExtractor};
pub use merchant::{extract_merchant, MerchantExtractor, MerchantSource};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text using the highest-priority rule that matches.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Every rule hit, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A single matching strategy in a priority cascade.
pub trait Rule: Send + Sync {
    /// The captured value type.
    type Output;

    /// Stable identifier used in logs and explanations.
    fn name(&self) -> &'static str;

    /// Try the rule against `text`.
    fn attempt(&self, text: &str) -> Option<ExtractionMatch<Self::Output>>;
}

/// Extracted value with the rule and text that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// Position of the captured text in the source.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Regex rule whose first capture group is converted into the output value.
///
/// A capture that fails conversion counts as a miss.
pub struct PatternRule<T> {
    name: &'static str,
    pattern: &'static Regex,
    convert: fn(&str) -> Option<T>,
}

impl<T> PatternRule<T> {
    pub fn new(name: &'static str, pattern: &'static Regex, convert: fn(&str) -> Option<T>) -> Self {
        Self {
            name,
            pattern,
            convert,
        }
    }
}

impl<T> Rule for PatternRule<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        self.name
    }

    fn attempt(&self, text: &str) -> Option<ExtractionMatch<T>> {
        let caps = self.pattern.captures(text)?;
        let capture = caps.get(1)?;
        let Some(value) = (self.convert)(capture.as_str()) else {
            trace!("rule '{}' rejected capture {:?}", self.name, capture.as_str());
            return None;
        };

        Some(
            ExtractionMatch::new(value, self.name, &caps[0])
                .with_position(capture.start(), capture.end()),
        )
    }
}

/// Outcome of one rule during a full trace.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTrace<T> {
    pub rule: &'static str,
    pub hit: Option<ExtractionMatch<T>>,
}

/// Ordered rules evaluated top-down; the first hit wins.
pub struct RuleChain<T> {
    label: &'static str,
    rules: Vec<Box<dyn Rule<Output = T>>>,
}

impl<T> RuleChain<T> {
    /// Create an empty chain. `label` names the field in log output.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            rules: Vec::new(),
        }
    }

    /// Append a rule at the lowest priority so far.
    pub fn with_rule(mut self, rule: impl Rule<Output = T> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Return the first rule hit. Later rules are not attempted.
    pub fn first_match(&self, text: &str) -> Option<ExtractionMatch<T>> {
        for rule in &self.rules {
            match rule.attempt(text) {
                Some(hit) => {
                    debug!("{} rule '{}' matched {:?}", self.label, rule.name(), hit.source);
                    return Some(hit);
                }
                None => trace!("{} rule '{}' missed", self.label, rule.name()),
            }
        }
        None
    }

    /// Attempt every rule regardless of earlier hits.
    pub fn trace(&self, text: &str) -> Vec<RuleTrace<T>> {
        self.rules
            .iter()
            .map(|rule| RuleTrace {
                rule: rule.name(),
                hit: rule.attempt(text),
            })
            .collect()
    }
}
