//! Named items built from a manifest.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::Item;
use crate::domain::manifest::Manifest;
use crate::domain::product_box::ProductBox;
use crate::domain::sellable::{Product, Sellable};

/// Items addressable by name, in declaration order.
///
/// Products and bundles share one namespace.
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every product and bundle, then wire bundle contents in order.
    ///
    /// An item listed in several bundles is shared, not copied.
    #[instrument(level = "debug", skip_all)]
    pub fn from_manifest(manifest: &Manifest) -> DomainResult<Self> {
        let mut catalog = Self::new();

        for spec in &manifest.products {
            let price = spec.price.to_money()?;
            catalog.insert(Product::new(&spec.name, price)?.into())?;
        }
        for spec in &manifest.bundles {
            catalog.insert(ProductBox::new(&spec.name).into())?;
        }

        for spec in &manifest.bundles {
            let bundle = catalog
                .get_box(&spec.name)
                .ok_or_else(|| DomainError::NotFound(spec.name.clone()))?;
            for name in &spec.items {
                let child = catalog.get(name).ok_or_else(|| DomainError::UnknownItem {
                    bundle: spec.name.clone(),
                    item: name.clone(),
                })?;
                bundle.add(child)?;
            }
        }

        debug!(
            items = catalog.items.len(),
            roots = catalog.roots().len(),
            "catalog built"
        );
        Ok(catalog)
    }

    pub fn insert(&mut self, item: Item) -> DomainResult<()> {
        let name = item.name();
        if self.index.contains_key(&name) {
            return Err(DomainError::DuplicateName(name));
        }
        self.index.insert(name, self.items.len());
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Item> {
        self.index.get(name).map(|&i| self.items[i].clone())
    }

    pub fn get_box(&self, name: &str) -> Option<ProductBox> {
        self.get(name).and_then(|item| item.as_box().cloned())
    }

    /// Look up an item, failing with [`DomainError::NotFound`].
    pub fn require(&self, name: &str) -> DomainResult<Item> {
        self.get(name)
            .ok_or_else(|| DomainError::NotFound(name.to_string()))
    }

    /// Items not currently inside any box of the catalog, in insertion order.
    pub fn roots(&self) -> Vec<Item> {
        let contained: HashSet<*const ()> = self
            .items
            .iter()
            .filter_map(Item::as_box)
            .flat_map(ProductBox::children)
            .map(|child| child.node_ptr())
            .collect();
        self.items
            .iter()
            .filter(|item| !contained.contains(&item.node_ptr()))
            .cloned()
            .collect()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
