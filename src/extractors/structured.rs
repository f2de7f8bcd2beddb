//! JSON-LD business listings
//!
//! Some listing pages ship schema.org `LocalBusiness` objects (plain, in
//! arrays, or under `@graph`) instead of either HTML template.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::{dom, links, ExtractContext, ListingStrategy};
use crate::error::BlockError;
use crate::lead::{unknown_address, Lead};
use crate::phone;

const SCRIPT: &str = r#"script[type="application/ld+json"]"#;

const BUSINESS_TYPES: &[&str] = &[
    "LocalBusiness",
    "Restaurant",
    "FoodEstablishment",
    "Hotel",
    "LodgingBusiness",
    "MedicalBusiness",
    "MedicalClinic",
    "Physician",
    "Hospital",
    "Plumber",
    "Electrician",
    "HomeAndConstructionBusiness",
    "Store",
];

/// Fallback strategy reading schema.org business objects.
pub struct StructuredData;

impl ListingStrategy for StructuredData {
    fn name(&self) -> &'static str {
        "structured-data"
    }

    fn extract(&self, document: &Html, ctx: &ExtractContext<'_>) -> Vec<Lead> {
        let selector: Selector = match dom::selector(SCRIPT) {
            Some(s) => s,
            None => return Vec::new(),
        };

        let mut objects = Vec::new();
        for element in document.select(&selector) {
            let content = element.inner_html();
            let trimmed = content.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(json) => collect_businesses(json, &mut objects),
                Err(e) => debug!(error = %e, "Skipping unparseable JSON-LD block"),
            }
        }

        objects
            .iter()
            .filter_map(|obj| match to_lead(obj, ctx) {
                Ok(lead) => Some(lead),
                Err(e) => {
                    debug!(error = %e, "Skipping JSON-LD business");
                    None
                }
            })
            .collect()
    }
}

fn collect_businesses(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_businesses(item, out);
            }
        }
        Value::Object(mut obj) => {
            if let Some(graph) = obj.remove("@graph") {
                collect_businesses(graph, out);
            }
            if let Some(Value::Array(items)) = obj.remove("itemListElement") {
                for item in items {
                    // ListItem wraps the business in "item"
                    match item {
                        Value::Object(mut list_item) if list_item.contains_key("item") => {
                            if let Some(inner) = list_item.remove("item") {
                                collect_businesses(inner, out);
                            }
                        }
                        other => collect_businesses(other, out),
                    }
                }
            }
            let value = Value::Object(obj);
            if is_business(&value) {
                out.push(value);
            }
        }
        _ => {}
    }
}

fn is_business(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => BUSINESS_TYPES.contains(&t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| BUSINESS_TYPES.contains(&t)),
        _ => false,
    }
}

fn to_lead(obj: &Value, ctx: &ExtractContext<'_>) -> Result<Lead, BlockError> {
    let name = text_field(obj, "name").ok_or(BlockError::MissingName)?;

    let phone = text_field(obj, "telephone")
        .map(|raw| phone::canonical_from_last_ten(&raw).unwrap_or(raw))
        .unwrap_or_default();

    let address = obj
        .get("address")
        .and_then(address_text)
        .unwrap_or_else(|| unknown_address(ctx.location));

    let mut lead = Lead::new(name, phone, address).with_category(ctx.category);

    if let Some(rating) = obj
        .get("aggregateRating")
        .and_then(|r| r.get("ratingValue"))
        .and_then(scalar_text)
    {
        lead = lead.with_rating(rating);
    }

    if let Some(url) = text_field(obj, "url") {
        let target = links::redirect_target(&url).unwrap_or(url);
        if target.starts_with("http://") || target.starts_with("https://") {
            lead = lead.with_website(target);
        }
    }

    Ok(lead)
}

fn address_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Object(_) => {
            let parts: Vec<String> = ["streetAddress", "addressLocality", "addressRegion"]
                .iter()
                .filter_map(|key| text_field(value, key))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

fn text_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
