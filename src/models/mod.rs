use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt::Display, ops::Deref};

use crate::error::{AppError, AppResult};

mod product;
mod user_preferences;

pub use product::{Product, ProductStatus, ScoredProduct};
pub use user_preferences::UserPreference;

/// Identifier of a listing, numeric for catalog rows or textual for imports
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Numeric(i64),
    Text(String),
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Numeric(id) => write!(f, "{}", id),
            ProductId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Numeric(id)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        ProductId::Numeric(i64::from(id))
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

/// The set of products scored by one call
///
/// Catalog pagination is expected to be resolved already; a single page
/// object (`{"content": [...]}`) is unwrapped as a convenience.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    products: Vec<Product>,
}

impl Corpus {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parses a corpus from a JSON array or a paginated page object
    pub fn from_json(value: Value) -> AppResult<Self> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut page) => match page.remove("content") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(AppError::InvalidInput(
                        "products must be an array or a page object with a `content` array"
                            .to_string(),
                    ))
                }
            },
            other => {
                return Err(AppError::InvalidInput(format!(
                    "products must be an array, got {}",
                    json_kind(&other)
                )))
            }
        };

        let products = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    return Err(AppError::InvalidInput(format!(
                        "product at index {} must be an object, got {}",
                        index,
                        json_kind(&item)
                    )));
                }
                serde_json::from_value(item).map_err(|e| {
                    AppError::InvalidInput(format!("product at index {}: {}", index, e))
                })
            })
            .collect::<AppResult<Vec<Product>>>()?;

        Ok(Self::new(products))
    }
}

impl Deref for Corpus {
    type Target = [Product];

    fn deref(&self) -> &Self::Target {
        &self.products
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
