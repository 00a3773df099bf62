//! Price conversions between wire decimals, form text and display strings.

use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_money::{Findable, Money};

pub use rusty_money::iso::Currency;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Coerces free-form price text into a decimal. Empty or unparsable input
/// becomes zero.
pub fn parse_price(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(is_numeric_char) {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

// `Decimal::from_str` also takes `_` separators, which are not numeric text.
fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
}

/// Text placed into the edit form: trailing zeros are dropped, `1.50` → `1.5`.
pub fn price_to_form_text(price: Decimal) -> String {
    price.normalize().to_string()
}

pub fn find_currency(code: &str) -> Option<&'static Currency> {
    Currency::find(&code.trim().to_ascii_uppercase())
}

/// Renders a price with the currency's own symbol, separators and precision.
pub fn format_price(price: Decimal, currency: &Currency) -> String {
    Money::from_decimal(price, currency).to_string()
}

#[cfg(test)]
#[path = "tests/pricing_tests.rs"]
mod tests;
