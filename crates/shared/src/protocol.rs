use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /products/` and `PUT /products/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    /// Sent as an exact JSON number, unlike `Product::price`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
