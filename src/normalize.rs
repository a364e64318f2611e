//! Field normalization for scraped prices and product names.
//!
//! Both functions are pure and never fail loudly: a price that cannot be read
//! is `None`, and a model name that matches no rule is returned title-cased.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Compiles a regex from a pattern that is known valid at build time.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regex. Only call with literals.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Everything that is not an ASCII digit or a decimal point.
static NON_NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"[^0-9.]"));

/// A model-name rule: pattern on the lower-cased input and its canonical name.
struct ModelRule {
    pattern: Regex,
    canonical: &'static str,
}

/// Ordered most specific first. "iphone 15" also matches "iphone 15 pro max",
/// so every variant must come before its base model.
const MODEL_RULE_TABLE: &[(&str, &str)] = &[
    (r"iphone\s*16\s*pro\s*max", "iPhone 16 Pro Max"),
    (r"iphone\s*16\s*pro", "iPhone 16 Pro"),
    (r"iphone\s*16\s*plus", "iPhone 16 Plus"),
    (r"iphone\s*16", "iPhone 16"),
    (r"iphone\s*15\s*pro\s*max", "iPhone 15 Pro Max"),
    (r"iphone\s*15\s*pro", "iPhone 15 Pro"),
    (r"iphone\s*15\s*plus", "iPhone 15 Plus"),
    (r"iphone\s*15", "iPhone 15"),
    (r"iphone\s*14\s*pro\s*max", "iPhone 14 Pro Max"),
    (r"iphone\s*14\s*pro", "iPhone 14 Pro"),
    (r"iphone\s*14\s*plus", "iPhone 14 Plus"),
    (r"iphone\s*14", "iPhone 14"),
    (r"iphone\s*13\s*pro\s*max", "iPhone 13 Pro Max"),
    (r"iphone\s*13\s*pro", "iPhone 13 Pro"),
    (r"iphone\s*13\s*mini", "iPhone 13 mini"),
    (r"iphone\s*13", "iPhone 13"),
    (r"iphone\s*12\s*pro\s*max", "iPhone 12 Pro Max"),
    (r"iphone\s*12\s*pro", "iPhone 12 Pro"),
    (r"iphone\s*12\s*mini", "iPhone 12 mini"),
    (r"iphone\s*12", "iPhone 12"),
    (r"iphone\s*11\s*pro\s*max", "iPhone 11 Pro Max"),
    (r"iphone\s*11\s*pro", "iPhone 11 Pro"),
    (r"iphone\s*11", "iPhone 11"),
];

static MODEL_RULES: LazyLock<Vec<ModelRule>> = LazyLock::new(|| {
    MODEL_RULE_TABLE
        .iter()
        .map(|(pattern, canonical)| ModelRule {
            pattern: compile_static_regex(pattern),
            canonical,
        })
        .collect()
});

/// Parses a displayed price such as `"¥1,234.56"` into `1234.56`.
///
/// Currency symbols, thousands separators and any other non-numeric
/// characters are stripped before parsing. Returns `None` when nothing
/// parseable is left (no digits, or several decimal points).
#[must_use]
pub fn normalize_price(text: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC_RE.replace_all(text, "");
    match cleaned.parse::<f64>() {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(input = %text, cleaned = %cleaned, error = %e, "price not parseable");
            None
        }
    }
}

/// Maps a raw product name to its canonical display name.
///
/// Falls back to the title-cased input when no rule matches.
#[must_use]
pub fn normalize_model(text: &str) -> String {
    let lowered = text.trim().to_lowercase();

    MODEL_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&lowered))
        .map_or_else(|| title_case(&lowered), |rule| rule.canonical.to_string())
}

/// Upper-cases the first letter of every run of letters.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}
