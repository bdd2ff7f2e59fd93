//! Domain layer: the sellable hierarchy and its invariants
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod error;
pub mod item;
pub mod manifest;
pub mod money;
pub mod product_box;
pub mod sellable;
pub mod traversal;

pub use catalog::Catalog;
pub use error::{DomainError, DomainResult, ValidationError};
pub use item::Item;
pub use manifest::{BundleSpec, Manifest, PriceSpec, ProductSpec};
pub use money::Money;
pub use product_box::ProductBox;
pub use sellable::{Product, Sellable};
pub use traversal::{PostOrderIter, PreOrderIter, TreeRender};
