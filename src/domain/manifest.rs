//! Declarative description of a bundle hierarchy.
//!
//! ```toml
//! [[product]]
//! name = "Mechanical Keyboard"
//! price = "99.99"
//!
//! [[bundle]]
//! name = "The Pro-Gamer Bundle"
//! items = ["Mechanical Keyboard"]
//! ```

use serde::Deserialize;

use crate::domain::error::ValidationError;
use crate::domain::money::Money;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "product")]
    pub products: Vec<ProductSpec>,
    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductSpec {
    pub name: String,
    pub price: PriceSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleSpec {
    pub name: String,
    /// Names of products or other bundles, in order.
    #[serde(default)]
    pub items: Vec<String>,
}

/// A price as written in the manifest: `"99.99"`, `120` or `49.5`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceSpec {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl PriceSpec {
    pub fn to_money(&self) -> Result<Money, ValidationError> {
        match self {
            PriceSpec::Text(text) => text.parse(),
            PriceSpec::Integer(units) => units
                .checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| ValidationError::InvalidAmount(units.to_string())),
            PriceSpec::Float(value) => Money::from_float(*value),
        }
    }
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
