//! Total amount extraction for receipts.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use super::patterns::{
    AMOUNT, TOTAL_A_PAGAR, TOTAL_A_PAGAR_UPPER, TOTAL_EURO, TOTAL_PLAIN, TOTAL_WORD, VALOR_TOTAL,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::amount::MonetaryAmount;

/// A labeled-total rule: a label phrase followed by an amount.
#[derive(Debug)]
pub struct TotalRule {
    /// Label the rule looks for.
    pub label: &'static str,
    /// Pattern with an `amount` capture group.
    pub matcher: &'static Regex,
}

impl TotalRule {
    /// Parse the amount of the first match in `text`.
    ///
    /// Only the first match is considered; if its amount does not parse
    /// the rule does not apply.
    pub fn apply(&self, text: &str) -> Option<MonetaryAmount> {
        let caps = self.matcher.captures(text)?;
        let raw = caps.name("amount")?.as_str();
        match MonetaryAmount::from_european(raw) {
            Ok(amount) => Some(amount),
            Err(e) => {
                debug!(label = self.label, "Labeled total rejected: {}", e);
                None
            }
        }
    }
}

lazy_static! {
    /// Labeled-total rules in priority order. The first rule that applies
    /// anywhere in the text decides the total.
    pub static ref TOTAL_RULES: [TotalRule; 6] = [
        TotalRule { label: "Total a pagar", matcher: &TOTAL_A_PAGAR },
        TotalRule { label: "TOTAL €", matcher: &TOTAL_EURO },
        TotalRule { label: "TOTAL", matcher: &TOTAL_PLAIN },
        // Shadowed by the rules above under case folding.
        TotalRule { label: "TOTAL A PAGAR", matcher: &TOTAL_A_PAGAR_UPPER },
        TotalRule { label: "Valor total", matcher: &VALOR_TOTAL },
        TotalRule { label: "Total", matcher: &TOTAL_WORD },
    ];
}

/// Which heuristic produced a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TotalSource {
    /// A labeled-total rule matched.
    Labeled { label: &'static str },
    /// No label matched; the last amount in the text was taken.
    TrailingAmount,
}

/// Amount field extractor: every amount-shaped substring, in text order.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<MonetaryAmount>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT
            .find_iter(text)
            .filter_map(|m| {
                MonetaryAmount::from_european(m.as_str()).ok().map(|amount| {
                    ExtractionMatch::new(amount, m.as_str()).with_position(m.start(), m.end())
                })
            })
            .collect()
    }
}

/// Resolve the receipt total.
///
/// Labeled rules are tried in [`TOTAL_RULES`] order. If none applies, the
/// last amount-shaped substring in the text is used. The fallback is not
/// checked against any labeled figure.
pub fn resolve_total(text: &str) -> Option<(MonetaryAmount, TotalSource)> {
    for rule in TOTAL_RULES.iter() {
        if let Some(amount) = rule.apply(text) {
            debug!(label = rule.label, %amount, "Total resolved from label");
            return Some((amount, TotalSource::Labeled { label: rule.label }));
        }
        trace!(label = rule.label, "Labeled total rule did not apply");
    }

    // Walk back from the last candidate until one parses.
    let trailing = AMOUNT
        .find_iter(text)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .find_map(|m| MonetaryAmount::from_european(m.as_str()).ok());

    match trailing {
        Some(amount) => {
            debug!(%amount, "Total resolved from trailing amount");
            Some((amount, TotalSource::TrailingAmount))
        }
        None => {
            debug!("No amount found in text");
            None
        }
    }
}
