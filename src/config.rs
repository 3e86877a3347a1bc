use serde::Deserialize;

use crate::services::weights::{AlgorithmVariant, ScoringConfig};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Weight preset the overrides below are applied to
    #[serde(default)]
    pub algorithm: AlgorithmVariant,

    /// Comma-separated popular brands, replacing the preset's list
    pub popular_brands: Option<Vec<String>>,

    /// Comma-separated ascending price bucket bounds
    pub price_buckets: Option<Vec<f64>>,

    /// Result size used when a request doesn't give one
    pub default_limit: Option<usize>,

    pub favorite_weight: Option<f64>,
    pub view_weight: Option<f64>,
    pub engagement_weight: Option<f64>,
    pub price_weight: Option<f64>,
    pub brand_weight: Option<f64>,
    pub boost_factor: Option<f64>,
    pub brand_bonus: Option<f64>,
    pub boost_bonus: Option<f64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the validated scoring configuration: preset first, then overrides
    pub fn scoring_config(&self) -> anyhow::Result<ScoringConfig> {
        let mut config = ScoringConfig::for_variant(self.algorithm);

        if let Some(brands) = &self.popular_brands {
            config = config.with_popular_brands(
                brands
                    .iter()
                    .map(|b| b.trim())
                    .filter(|b| !b.is_empty())
                    .map(str::to_string),
            );
        }
        if let Some(bounds) = &self.price_buckets {
            config = config.with_price_buckets(bounds.clone());
        }
        if let Some(limit) = self.default_limit {
            config = config.with_default_limit(limit);
        }

        let weights = &mut config.weights;
        let overrides = [
            (&mut weights.favorite, self.favorite_weight),
            (&mut weights.view, self.view_weight),
            (&mut weights.engagement, self.engagement_weight),
            (&mut weights.price, self.price_weight),
            (&mut weights.brand, self.brand_weight),
            (&mut weights.boost_factor, self.boost_factor),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(bonus) = self.brand_bonus {
            config.brand_bonus = bonus;
        }
        if let Some(bonus) = self.boost_bonus {
            config.boost_bonus = bonus;
        }

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid scoring configuration: {}", e))?;

        Ok(config)
    }
}
