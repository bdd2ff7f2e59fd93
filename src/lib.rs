//! parcel: product bundles as composable trees.
//!
//! Products and boxes share the [`Sellable`](domain::Sellable) contract. A box
//! holds shared references to products and other boxes, and its price is the
//! sum of its children, computed fresh on every call.
//!
//! ```
//! use parcel::domain::{Item, Money, ProductBox, Sellable};
//!
//! let mouse = Item::product("Gaming Mouse", "49.50".parse().unwrap()).unwrap();
//! let bundle = ProductBox::new("Bundle");
//! bundle.add(&mouse).unwrap();
//! assert_eq!(bundle.price(), Money::from_cents(4950));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
