use serde::Serialize;

use crate::models::{Product, ProductId};

/// Kind of data-quality problem found on a listing
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Title is empty or whitespace
    MissingTitle,
    /// Price is missing or negative
    InvalidPrice,
    /// Listing is boosted but has no level of at least 1
    BoostWithoutLevel,
    /// Favorite or view count is below zero
    NegativeCount,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub product_id: ProductId,
    pub kind: IssueKind,
}

/// Observational report of data-quality problems in a corpus
///
/// Producing this report never removes products from ranking.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.invalid == 0
    }
}

/// Lists the structural problems of a single product
pub fn product_issues(product: &Product) -> Vec<IssueKind> {
    let mut issues = Vec::new();

    if product.title.trim().is_empty() {
        issues.push(IssueKind::MissingTitle);
    }

    if product.price.map_or(true, |price| price < 0.0) {
        issues.push(IssueKind::InvalidPrice);
    }

    if product.is_boosted && product.boost_level.map_or(true, |level| level < 1) {
        issues.push(IssueKind::BoostWithoutLevel);
    }

    if product.favorite_count < 0 || product.view_count < 0 {
        issues.push(IssueKind::NegativeCount);
    }

    issues
}

/// Counts invalid records without excluding them from anything
pub fn validate(products: &[Product]) -> ValidationReport {
    let mut report = ValidationReport {
        total: products.len(),
        ..Default::default()
    };

    for product in products {
        let kinds = product_issues(product);
        if kinds.is_empty() {
            report.valid += 1;
            continue;
        }

        report.invalid += 1;
        report
            .issues
            .extend(kinds.into_iter().map(|kind| ValidationIssue {
                product_id: product.id.clone(),
                kind,
            }));
    }

    if report.invalid > 0 {
        tracing::debug!(
            total = report.total,
            invalid = report.invalid,
            issues = report.issues.len(),
            "Corpus has data-quality issues"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_corpus() {
        let products = vec![
            Product::new(1, "Sony WH-1000XM4", 299.99).boosted(2),
            Product::new(2, "Zara Blazer Femme", 79.99),
        ];
        let report = validate(&products);
        assert!(report.is_clean());
        assert_eq!(report.valid, 2);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_blank_title() {
        let product = Product::new(1, "   ", 10.0);
        assert_eq!(product_issues(&product), vec![IssueKind::MissingTitle]);
    }

    #[test]
    fn test_missing_or_negative_price() {
        let mut unpriced = Product::new(1, "x", 0.0);
        unpriced.price = None;
        assert_eq!(product_issues(&unpriced), vec![IssueKind::InvalidPrice]);

        let negative = Product::new(2, "y", -5.0);
        assert_eq!(product_issues(&negative), vec![IssueKind::InvalidPrice]);

        // A free listing is structurally fine
        assert!(product_issues(&Product::new(3, "z", 0.0)).is_empty());
    }

    #[test]
    fn test_boost_without_level() {
        let zero = Product::new(1, "x", 10.0).boosted(0);
        assert_eq!(product_issues(&zero), vec![IssueKind::BoostWithoutLevel]);

        let mut absent = Product::new(2, "y", 10.0).boosted(1);
        absent.boost_level = None;
        assert_eq!(product_issues(&absent), vec![IssueKind::BoostWithoutLevel]);
    }

    #[test]
    fn test_negative_counts() {
        let both = Product::new(1, "x", 10.0).with_engagement(-5, -100);
        assert_eq!(product_issues(&both), vec![IssueKind::NegativeCount]);

        let views_only = Product::new(2, "y", 10.0).with_engagement(3, -1);
        assert_eq!(product_issues(&views_only), vec![IssueKind::NegativeCount]);

        let report = validate(&[both, views_only, Product::new(3, "z", 10.0)]);
        assert_eq!(report.invalid, 2);
        assert_eq!(report.valid, 1);
        assert!(report.issues.iter().all(|i| i.kind == IssueKind::NegativeCount));
    }

    #[test]
    fn test_report_counts_products_not_issues() {
        let mut broken = Product::new(1, "", -1.0).boosted(0);
        broken.boost_level = Some(0);
        let products = vec![broken, Product::new(2, "ok", 5.0)];

        let report = validate(&products);
        assert_eq!(report.total, 2);
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 1);
        assert_eq!(report.issues.len(), 3);
        assert!(report.issues.iter().all(|i| i.product_id == ProductId::Numeric(1)));
    }

    #[test]
    fn test_issue_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&IssueKind::BoostWithoutLevel).unwrap(),
            "\"boost_without_level\""
        );
        assert_eq!(
            serde_json::to_string(&IssueKind::NegativeCount).unwrap(),
            "\"negative_count\""
        );
    }
}
