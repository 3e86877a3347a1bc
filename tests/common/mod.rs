#![allow(dead_code)]

use listing_ranker::models::{Product, ProductId, ScoredProduct};
use serde_json::{json, Value};

/// The eight catalog listings used across the ranking scenarios
pub fn catalog_json() -> Value {
    json!([
        { "id": 1, "title": "iPhone 13 Pro Max - Excellent état", "brand": "Apple",
          "category": "electronics", "condition": "excellent", "price": 899.99, "city": "Paris",
          "favoriteCount": 15, "viewCount": 120, "isBoosted": true, "boostLevel": 2, "status": "ACTIVE" },
        { "id": 2, "title": "Nike Air Max 270 - Taille 42", "brand": "Nike",
          "category": "fashion", "condition": "good", "price": 89.99, "city": "Lyon",
          "favoriteCount": 8, "viewCount": 45, "isBoosted": false, "boostLevel": 0, "status": "ACTIVE" },
        { "id": 3, "title": "MacBook Pro M1 13 pouces", "brand": "Apple",
          "category": "electronics", "condition": "excellent", "price": 1299.99, "city": "Paris",
          "favoriteCount": 25, "viewCount": 200, "isBoosted": true, "boostLevel": 3, "status": "ACTIVE" },
        { "id": 4, "title": "Adidas Ultraboost 21", "brand": "Adidas",
          "category": "fashion", "condition": "new", "price": 149.99, "city": "Marseille",
          "favoriteCount": 12, "viewCount": 78, "isBoosted": true, "boostLevel": 1, "status": "ACTIVE" },
        { "id": 5, "title": "Samsung Galaxy S21", "brand": "Samsung",
          "category": "electronics", "condition": "good", "price": 599.99, "city": "Toulouse",
          "favoriteCount": 6, "viewCount": 35, "isBoosted": false, "boostLevel": 0, "status": "SOLD" },
        { "id": 6, "title": "Levi's 501 Jeans", "brand": "Levi's",
          "category": "fashion", "condition": "good", "price": 49.99, "city": "Bordeaux",
          "favoriteCount": 4, "viewCount": 22, "isBoosted": false, "boostLevel": 0, "status": "ACTIVE" },
        { "id": 7, "title": "Sony WH-1000XM4", "brand": "Sony",
          "category": "electronics", "condition": "excellent", "price": 299.99, "city": "Paris",
          "favoriteCount": 18, "viewCount": 95, "isBoosted": true, "boostLevel": 2, "status": "ACTIVE" },
        { "id": 8, "title": "Zara Blazer Femme", "brand": "Zara",
          "category": "fashion", "condition": "new", "price": 79.99, "city": "Lyon",
          "favoriteCount": 3, "viewCount": 18, "isBoosted": false, "boostLevel": 0, "status": "ACTIVE" }
    ])
}

pub fn catalog() -> Vec<Product> {
    serde_json::from_value(catalog_json()).expect("fixture products deserialize")
}

pub fn ids(ranked: &[ScoredProduct]) -> Vec<i64> {
    ranked
        .iter()
        .map(|s| match &s.product.id {
            ProductId::Numeric(id) => *id,
            ProductId::Text(id) => panic!("unexpected text id {}", id),
        })
        .collect()
}
