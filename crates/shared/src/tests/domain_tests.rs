use std::str::FromStr;

use rust_decimal::Decimal;

use super::*;

#[test]
fn decodes_listing_entry_with_null_description_and_text_price() {
    let raw = r#"{"id":1,"name":"Pen","description":null,"price":"1.50"}"#;
    let product: Product = serde_json::from_str(raw).expect("decode product");

    assert_eq!(product.id, ProductId(1));
    assert_eq!(product.name, "Pen");
    assert_eq!(product.description, None);
    assert_eq!(product.description_or_empty(), "");
    assert_eq!(product.price, Decimal::from_str("1.50").expect("decimal"));
    assert_eq!(product.price.to_string(), "1.50");
}

#[test]
fn decodes_entry_without_description_field() {
    let raw = r#"{"id":4,"name":"Ink","price":"12.00"}"#;
    let product: Product = serde_json::from_str(raw).expect("decode product");
    assert_eq!(product.description, None);
}

#[test]
fn keeps_price_as_text_when_encoding_product() {
    let product = Product {
        id: ProductId(2),
        name: "Notebook".to_string(),
        description: Some("A5, dotted".to_string()),
        price: Decimal::from_str("19.99").expect("decimal"),
    };

    let value = serde_json::to_value(&product).expect("encode");
    assert_eq!(value["id"], 2);
    assert_eq!(value["price"], "19.99");
}
