//! Field lookup for JSON price feeds.

use serde_json::Value;

use super::{FieldPair, accept_fields};

/// Keys tried for the model name, in order.
pub const MODEL_KEYS: &[&str] = &["model", "title"];

/// Keys tried for the price, in order.
pub const PRICE_KEYS: &[&str] = &["price", "value"];

/// Reads (model, price) from a JSON object and normalizes both.
#[must_use]
pub fn extract_price(value: &Value) -> Option<(String, f64)> {
    let pair = FieldPair {
        model: first_field(value, MODEL_KEYS)?,
        price: first_field(value, PRICE_KEYS)?,
    };
    accept_fields(&pair)
}

/// First key whose value is a non-empty string or a number.
fn first_field(value: &Value, keys: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(field_text)
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_keys() {
        let value = json!({"model": "iphone 14", "price": "999"});
        assert_eq!(extract_price(&value), Some(("iPhone 14".to_string(), 999.0)));
    }

    #[test]
    fn test_fallback_keys() {
        let value = json!({"title": "Apple iPhone 13 mini", "value": 599.5});
        assert_eq!(
            extract_price(&value),
            Some(("iPhone 13 mini".to_string(), 599.5))
        );
    }

    #[test]
    fn test_empty_primary_falls_back() {
        let value = json!({"model": "", "title": "iphone 12", "price": null, "value": "¥89,800"});
        assert_eq!(extract_price(&value), Some(("iPhone 12".to_string(), 89_800.0)));
    }

    #[test]
    fn test_missing_price_is_none() {
        let value = json!({"model": "iphone 14"});
        assert_eq!(extract_price(&value), None);
    }

    #[test]
    fn test_missing_model_is_none() {
        let value = json!({"price": 999});
        assert_eq!(extract_price(&value), None);
    }

    #[test]
    fn test_unparseable_price_is_none() {
        let value = json!({"model": "iphone 14", "price": "TBD"});
        assert_eq!(extract_price(&value), None);
    }

    #[test]
    fn test_non_object_is_none() {
        assert_eq!(extract_price(&json!([{"model": "iphone 14", "price": 1}])), None);
        assert_eq!(extract_price(&json!("iphone 14")), None);
    }

    #[test]
    fn test_unknown_model_title_cased() {
        let value = json!({"model": "galaxy s24", "price": 799});
        assert_eq!(extract_price(&value), Some(("Galaxy S24".to_string(), 799.0)));
    }
}
