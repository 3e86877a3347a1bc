pub mod features;
pub mod metrics;
pub mod ranking;
pub mod scorer;
pub mod validation;
pub mod weights;

pub use metrics::{compute_metrics, CorpusMetrics};
pub use ranking::{rank, recommend, RecommendOptions, Recommendations};
pub use scorer::{Scorer, ScoringContext};
pub use validation::{validate, ValidationReport};
pub use weights::{AlgorithmVariant, ScoringConfig, ScoringWeights};
