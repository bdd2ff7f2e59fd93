//! The capability every node of a bundle tree shares, and its leaf.

use crate::domain::error::{DomainResult, ValidationError};
use crate::domain::money::Money;

/// Anything that can be put on a shelf: it has a name and a price.
///
/// Products and boxes implement this identically, so client code can price
/// a single product or a crate of nested boxes through the same call.
pub trait Sellable {
    fn name(&self) -> String;

    /// Total value of this node. Must be side-effect free and repeatable.
    fn price(&self) -> Money;
}

/// Terminal node: a single product with a fixed, non-negative price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: String,
    price: Money,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Money) -> DomainResult<Self> {
        let name = name.into();
        if price.is_negative() {
            return Err(ValidationError::NegativePrice { name, price }.into());
        }
        Ok(Self { name, price })
    }

    /// Build a product from decimal text such as `"99.99"`.
    pub fn parse(name: impl Into<String>, price: &str) -> DomainResult<Self> {
        let price: Money = price.parse()?;
        Self::new(name, price)
    }
}

impl Sellable for Product {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn price(&self) -> Money {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_valid_price_when_creating_product_then_returns_stored_values() {
        let product = Product::parse("Gaming Mouse", "49.50").unwrap();
        assert_eq!(product.name(), "Gaming Mouse");
        assert_eq!(product.price(), Money::from_cents(4950));
        // repeated queries are stable
        assert_eq!(product.price(), product.price());
    }

    #[test]
    fn given_zero_price_when_creating_product_then_accepts() {
        let product = Product::new("Sticker", Money::ZERO).unwrap();
        assert_eq!(product.price(), Money::ZERO);
    }

    #[test]
    fn given_negative_price_when_creating_product_then_validation_error() {
        let result = Product::new("Refund", Money::from_cents(-1));
        assert_eq!(
            result,
            Err(DomainError::Validation(ValidationError::NegativePrice {
                name: "Refund".to_string(),
                price: Money::from_cents(-1),
            }))
        );
    }

    #[test]
    fn given_unparsable_price_when_parsing_product_then_validation_error() {
        let result = Product::parse("Keyboard", "ninety");
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::InvalidAmount(_)))
        ));
    }
}
