//! Extraction strategies for HTML product pages.
//!
//! Retailers lay out product pages differently, so extraction is an ordered
//! list of strategies. Each one names a CSS selector for the model element and
//! one for the price element; the first strategy whose fields both survive
//! normalization wins.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use super::{FieldPair, accept_fields};

/// One way of locating the model and price on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStrategy {
    /// Short label used in logs.
    pub name: &'static str,
    /// CSS selector for the element holding the model name.
    pub model_selector: &'static str,
    /// CSS selector for the element holding the price.
    pub price_selector: &'static str,
}

/// Strategies in the order they are tried.
pub const STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy {
        name: "heading",
        model_selector: "h1",
        price_selector: "span.price",
    },
    ExtractionStrategy {
        name: "product-block",
        model_selector: "div.product-title",
        price_selector: "div.product-price",
    },
    ExtractionStrategy {
        name: "metadata",
        model_selector: "meta[property='og:title']",
        price_selector: "meta[itemprop='price']",
    },
];

impl ExtractionStrategy {
    /// Returns the raw (model, price) strings this strategy finds, if both
    /// elements exist and are non-empty.
    #[must_use]
    pub fn extract(&self, document: &Html) -> Option<FieldPair> {
        let model = first_value(document, self.model_selector)?;
        let price = first_value(document, self.price_selector)?;
        Some(FieldPair { model, price })
    }
}

/// Runs every strategy against `html` and returns the first normalized
/// (model, price).
#[must_use]
pub fn extract_price(html: &str) -> Option<(String, f64)> {
    let document = Html::parse_document(html);

    for strategy in STRATEGIES {
        let Some(pair) = strategy.extract(&document) else {
            trace!(strategy = strategy.name, "strategy found no elements");
            continue;
        };

        if let Some(accepted) = accept_fields(&pair) {
            debug!(strategy = strategy.name, model = %accepted.0, price = accepted.1, "strategy matched");
            return Some(accepted);
        }

        debug!(
            strategy = strategy.name,
            raw_model = %pair.model,
            raw_price = %pair.price,
            "strategy fields failed normalization"
        );
    }

    None
}

/// Value of the first element matching `selector`.
///
/// A `content` attribute (as on `<meta>` tags) is preferred over display text.
fn first_value(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let value = element_value(element);
    (!value.is_empty()).then_some(value)
}

fn element_value(element: ElementRef<'_>) -> String {
    if let Some(content) = element.value().attr("content") {
        return content.trim().to_string();
    }

    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
