//! # Catalog Ingestion
//!
//! Normalizes the raw product feed into [`CatalogItem`]s.
//!
//! The upstream catalog is hand-maintained JSON and cannot be trusted to
//! carry clean numbers: prices arrive as numbers, numeric strings, or not
//! at all. The rule is **coerce-or-zero, applied once here**: a missing or
//! malformed price/tax/code becomes 0 with a `warn!`, and the rest of the
//! system never sees a raw value. A damaged catalog row degrades one
//! line's total; it never blocks a sale.
//!
//! ```text
//!   {"sellingPrice": "85.50"}  → 8550 paise
//!   {"sellingPrice": null}     → 0 paise   (warn)
//!   {"taxRate": 18}            → 1800 bps
//!   {"taxRate": "n/a"}         → 0 bps     (warn)
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::ValidationError;
use crate::types::CatalogItem;

/// A product row exactly as the feed delivers it.
///
/// Field names follow the feed (`_id`, `productName`, ...); the numeric
/// fields stay as raw JSON values until [`normalize`](Self::normalize)
/// coerces them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(rename = "productName", alias = "name")]
    pub name: String,

    #[serde(rename = "productCode", alias = "code", default)]
    pub code: Value,

    #[serde(rename = "sellingPrice", default)]
    pub selling_price: Value,

    #[serde(rename = "taxRate", default)]
    pub tax_rate: Value,
}

impl RawCatalogItem {
    /// Coerces the raw fields and returns a clean snapshot.
    pub fn normalize(&self) -> CatalogItem {
        let price_rupees = coerce_non_negative(&self.selling_price, "sellingPrice", &self.id);
        let tax_pct = coerce_tax_percent(&self.tax_rate, &self.id);
        let code = coerce_non_negative(&self.code, "productCode", &self.id) as i64;

        CatalogItem {
            id: self.id.clone(),
            name: self.name.clone(),
            code,
            unit_price_paise: (price_rupees * 100.0).round() as i64,
            tax_rate_bps: (tax_pct * 100.0).round() as u32,
        }
    }
}

/// Parses a whole catalog feed.
///
/// Accepts either a bare JSON array or an envelope `{"data": [...]}`,
/// which is how the upstream API wraps paginated responses.
pub fn parse_feed(json: &str) -> Result<Vec<CatalogItem>, ValidationError> {
    let value: Value = serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
        field: "catalog".to_string(),
        reason: e.to_string(),
    })?;

    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let raw: RawCatalogItem =
            serde_json::from_value(row).map_err(|e| ValidationError::InvalidFormat {
                field: "catalog item".to_string(),
                reason: e.to_string(),
            })?;
        items.push(raw.normalize());
    }
    Ok(items)
}

/// JSON number or numeric string → f64, anything else → None.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_non_negative(value: &Value, field: &str, item_id: &str) -> f64 {
    match as_number(value) {
        Some(n) if n >= 0.0 => n,
        Some(n) => {
            warn!(item_id, field, value = n, "negative catalog value coerced to 0");
            0.0
        }
        None => {
            if !value.is_null() {
                warn!(item_id, field, ?value, "non-numeric catalog value coerced to 0");
            } else {
                warn!(item_id, field, "missing catalog value coerced to 0");
            }
            0.0
        }
    }
}

fn coerce_tax_percent(value: &Value, item_id: &str) -> f64 {
    let pct = coerce_non_negative(value, "taxRate", item_id);
    if pct > 100.0 {
        warn!(item_id, value = pct, "tax rate above 100% coerced to 0");
        return 0.0;
    }
    pct
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(selling_price: Value, tax_rate: Value) -> RawCatalogItem {
        serde_json::from_value(json!({
            "_id": "p-1",
            "productName": "Basmati Rice 5kg",
            "productCode": 12,
            "sellingPrice": selling_price,
            "taxRate": tax_rate,
        }))
        .unwrap()
    }

    #[test]
    fn test_clean_row() {
        let item = raw(json!(85.5), json!(5)).normalize();
        assert_eq!(item.unit_price_paise, 8550);
        assert_eq!(item.tax_rate_bps, 500);
        assert_eq!(item.code, 12);
    }

    #[test]
    fn test_numeric_string_coerced() {
        let item = raw(json!("120.00"), json!("18")).normalize();
        assert_eq!(item.unit_price_paise, 12000);
        assert_eq!(item.tax_rate_bps, 1800);
    }

    #[test]
    fn test_missing_values_become_zero() {
        let item = raw(Value::Null, Value::Null).normalize();
        assert_eq!(item.unit_price_paise, 0);
        assert_eq!(item.tax_rate_bps, 0);
    }

    #[test]
    fn test_garbage_values_become_zero() {
        let item = raw(json!("free"), json!({"pct": 18})).normalize();
        assert_eq!(item.unit_price_paise, 0);
        assert_eq!(item.tax_rate_bps, 0);
    }

    #[test]
    fn test_negative_price_becomes_zero() {
        let item = raw(json!(-10), json!(5)).normalize();
        assert_eq!(item.unit_price_paise, 0);
    }

    #[test]
    fn test_tax_above_hundred_becomes_zero() {
        let item = raw(json!(100), json!(250)).normalize();
        assert_eq!(item.tax_rate_bps, 0);
    }

    #[test]
    fn test_parse_bare_array() {
        let feed = r#"[{"_id":"a","productName":"Salt","sellingPrice":20,"taxRate":0}]"#;
        let items = parse_feed(feed).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price_paise, 2000);
    }

    #[test]
    fn test_parse_data_envelope() {
        let feed = r#"{"data":[{"_id":"a","productName":"Salt","sellingPrice":20,"taxRate":0}]}"#;
        assert_eq!(parse_feed(feed).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(parse_feed("not json").is_err());
    }
}
