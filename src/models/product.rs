use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::ProductId;

/// Lifecycle status of a marketplace listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductStatus {
    Active,
    Sold,
    Inactive,
    Deleted,
    /// Any status the catalog reports that we don't model explicitly
    Other(String),
}

impl ProductStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Sold => "SOLD",
            ProductStatus::Inactive => "INACTIVE",
            ProductStatus::Deleted => "DELETED",
            ProductStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for ProductStatus {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => ProductStatus::Active,
            "SOLD" => ProductStatus::Sold,
            "INACTIVE" => ProductStatus::Inactive,
            "DELETED" => ProductStatus::Deleted,
            _ => ProductStatus::Other(raw.to_string()),
        }
    }
}

impl Serialize for ProductStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProductStatus::from(raw.as_str()))
    }
}

/// One marketplace listing as reported by the product catalog
///
/// Deserialization is lenient: unknown fields are ignored, missing or `null`
/// counters default to zero and `isBoosted` defaults to false. Structural
/// problems (empty title, missing price, boost without level) are kept as-is
/// and reported by the validation pass instead of being rejected here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Listing price; catalogs may send decimals as strings
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Category name, or the `name` of a nested category object
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorite_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_boosted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_level: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
}

impl Product {
    /// Creates an active, unboosted listing with no engagement
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: Some(price),
            brand: None,
            category: None,
            condition: None,
            favorite_count: 0,
            view_count: 0,
            is_boosted: false,
            boost_level: None,
            created_at: None,
            status: Some(ProductStatus::Active),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_engagement(mut self, favorite_count: i64, view_count: i64) -> Self {
        self.favorite_count = favorite_count;
        self.view_count = view_count;
        self
    }

    /// Marks the listing as boosted at the given level
    pub fn boosted(mut self, level: i64) -> Self {
        self.is_boosted = true;
        self.boost_level = Some(level);
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Price used by scoring and filtering; a missing price counts as zero
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Boost level that participates in scoring
    ///
    /// Zero for unboosted listings; a boosted listing without a level (or with
    /// a negative one) scores as level zero.
    pub fn effective_boost_level(&self) -> i64 {
        if self.is_boosted {
            self.boost_level.unwrap_or(0).max(0)
        } else {
            0
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(ProductStatus::Active)
    }
}

/// A product augmented with the score computed for one ranking call
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: Product,
    pub recommendation_score: f64,
    /// 1.0 when the listing is not boosted
    pub boost_multiplier: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    };
    Ok(price)
}

fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    };
    Ok(label)
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    // Catalog timestamps are usually zone-less local date-times
    Ok(NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc()))
}
