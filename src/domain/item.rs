//! Shared handle to any node of a bundle tree.

use std::rc::Rc;

use crate::domain::error::DomainResult;
use crate::domain::money::Money;
use crate::domain::product_box::ProductBox;
use crate::domain::sellable::{Product, Sellable};

/// A product or a box, held by shared reference.
///
/// Boxes store their children as `Item`s. Two items are the same child only
/// if they point at the same node ([`Item::ptr_eq`]); equal names and prices
/// do not make two products interchangeable.
#[derive(Debug, Clone)]
pub enum Item {
    Product(Rc<Product>),
    Box(ProductBox),
}

impl Item {
    pub fn product(name: impl Into<String>, price: Money) -> DomainResult<Self> {
        Ok(Product::new(name, price)?.into())
    }

    pub fn ptr_eq(&self, other: &Item) -> bool {
        match (self, other) {
            (Item::Product(a), Item::Product(b)) => Rc::ptr_eq(a, b),
            (Item::Box(a), Item::Box(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn as_box(&self) -> Option<&ProductBox> {
        match self {
            Item::Box(inner) => Some(inner),
            Item::Product(_) => None,
        }
    }

    /// Address of the node behind this handle, shared by all its clones.
    pub(crate) fn node_ptr(&self) -> *const () {
        match self {
            Item::Product(product) => Rc::as_ptr(product).cast(),
            Item::Box(inner) => inner.node_ptr(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Item::Product(_))
    }

    pub fn try_price(&self) -> DomainResult<Money> {
        match self {
            Item::Product(product) => Ok(product.price()),
            Item::Box(inner) => inner.try_price(),
        }
    }
}

impl Sellable for Item {
    fn name(&self) -> String {
        match self {
            Item::Product(product) => product.name(),
            Item::Box(inner) => inner.name(),
        }
    }

    fn price(&self) -> Money {
        match self {
            Item::Product(product) => product.price(),
            Item::Box(inner) => inner.price(),
        }
    }
}

impl From<Product> for Item {
    fn from(product: Product) -> Self {
        Item::Product(Rc::new(product))
    }
}

impl From<Rc<Product>> for Item {
    fn from(product: Rc<Product>) -> Self {
        Item::Product(product)
    }
}

impl From<ProductBox> for Item {
    fn from(inner: ProductBox) -> Self {
        Item::Box(inner)
    }
}

impl From<&ProductBox> for Item {
    fn from(inner: &ProductBox) -> Self {
        Item::Box(inner.clone())
    }
}

impl From<&Item> for Item {
    fn from(item: &Item) -> Self {
        item.clone()
    }
}
