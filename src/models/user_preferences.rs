use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{AppError, AppResult};

use super::Product;

/// Optional shopper filter applied before scoring
///
/// Every field left as `None` places no constraint on that dimension.
/// A present but empty brand or category set matches nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeSet<String>>,
    /// Inclusive lower price bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl UserPreference {
    /// Creates a preference with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = Some(brands.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Rejects bounds that can never describe a price range
    pub fn validate(&self) -> AppResult<()> {
        for (name, bound) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(AppError::InvalidInput(format!(
                        "{} must be a finite number",
                        name
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(AppError::InvalidInput(format!(
                    "minPrice ({}) must not exceed maxPrice ({})",
                    min, max
                )));
            }
        }

        Ok(())
    }

    /// Checks a product against every constrained dimension
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(brands) = &self.brands {
            match &product.brand {
                Some(brand) if brands.contains(brand) => {}
                _ => return false,
            }
        }

        if let Some(categories) = &self.categories {
            match &product.category {
                Some(category) if categories.contains(category) => {}
                _ => return false,
            }
        }

        let price = product.price_or_zero();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        true
    }
}
