//! Product records and the catalog they come in
//!
//! Product data is external and loosely typed. Every field is optional and
//! deserialised leniently: a value of the wrong JSON type reads as absent, so
//! a bad record simply fails to match a filter stage instead of failing the
//! whole load.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// One product of the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub old_price_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings", skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings", skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl Product {
    /// Build a product from one catalog entry. Non-object entries yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }

    /// Name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("Unnamed product")
    }

    /// Current price text, formatted from the numeric price when missing
    pub fn price_label(&self) -> String {
        match (&self.price_text, self.price) {
            (Some(text), _) => text.clone(),
            (None, Some(price)) => format!("{price:.2}"),
            (None, None) => String::from("-"),
        }
    }

    /// Original price text, shown only when an original price exists
    pub fn old_price_label(&self) -> Option<String> {
        self.old_price?;
        Some(
            self.old_price_text
                .clone()
                .unwrap_or_else(|| format!("{:.2}", self.old_price.unwrap_or_default())),
        )
    }
}

/// Product collection as handed to the filter
#[derive(Debug, Clone, PartialEq)]
pub enum Catalog {
    /// A sequence of product records, in catalog order
    Records(Vec<Product>),
    /// The collection was not a sequence; holds the JSON kind that was found
    Malformed(String),
}

impl Default for Catalog {
    fn default() -> Self {
        Self::Records(Vec::new())
    }
}

impl Catalog {
    /// Build a catalog from parsed JSON.
    ///
    /// Arrays become `Records`; entries that are not objects are dropped.
    /// Anything else becomes `Malformed`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(entries) => {
                let total = entries.len();
                let records: Vec<Product> = entries.iter().filter_map(Product::from_value).collect();
                if records.len() != total {
                    debug!(
                        dropped = total - records.len(),
                        "Dropped catalog entries that are not product records"
                    );
                }
                Self::Records(records)
            }
            other => Self::Malformed(json_kind(&other).to_string()),
        }
    }

    /// Parse a catalog from JSON text
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// Products of a well-formed catalog
    pub fn records(&self) -> Option<&[Product]> {
        match self {
            Self::Records(records) => Some(records),
            Self::Malformed(_) => None,
        }
    }

    /// Number of product records (0 for a malformed catalog)
    pub fn len(&self) -> usize {
        self.records().map_or(0, <[Product]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(records: Vec<Product>) -> Self {
        Self::Records(records)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }))
}
