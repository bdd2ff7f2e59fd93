//! Client-side views over any sellable: one code path for products and boxes.

use itertools::Itertools;

use crate::domain::{Catalog, DomainResult, Item, ProductBox, Sellable};

/// One-line summary of any node, product or box alike.
pub fn describe(component: &dyn Sellable, currency_symbol: &str) -> String {
    format!(
        "Component: '{}' | Total Price: {}",
        component.name(),
        component.price().with_symbol(currency_symbol)
    )
}

/// `name: price` for each item, one per line.
pub fn price_list(items: &[Item], currency_symbol: &str) -> DomainResult<String> {
    let lines: Vec<String> = items
        .iter()
        .map(|item| -> DomainResult<String> {
            let price = item.try_price()?;
            Ok(format!("{}: {}", item.name(), price.with_symbol(currency_symbol)))
        })
        .collect::<DomainResult<_>>()?;
    Ok(lines.join("\n"))
}

/// Path of box names from `root` down to each product, e.g. `Crate <- Bundle <- Mouse`.
pub fn leaf_paths(root: &Item) -> Vec<String> {
    let mut path: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for (depth, item) in root.iter() {
        path.truncate(depth);
        path.push(item.name());
        if item.is_leaf() {
            out.push(path.iter().join(" <- "));
        }
    }
    out
}

const KEYBOARD: &str = "Mechanical Keyboard";
const MOUSE: &str = "Gaming Mouse";
const HEADSET: &str = "7.1 Surround Headset";
const MOUSEPAD: &str = "XXL Mousepad";
pub const GAMER_BUNDLE: &str = "The Pro-Gamer Bundle";
pub const SHIPPING_CRATE: &str = "Main Shipping Crate";

/// The reference scenario: three peripherals in a bundle, the bundle and a
/// mousepad in a shipping crate.
pub fn demo_catalog() -> DomainResult<Catalog> {
    let keyboard = Item::product(KEYBOARD, "99.99".parse()?)?;
    let mouse = Item::product(MOUSE, "49.50".parse()?)?;
    let headset = Item::product(HEADSET, "120.00".parse()?)?;
    let mousepad = Item::product(MOUSEPAD, "25.00".parse()?)?;

    let bundle = ProductBox::new(GAMER_BUNDLE);
    bundle.add(&keyboard)?;
    bundle.add(&mouse)?;
    bundle.add(&headset)?;

    let shipping = ProductBox::new(SHIPPING_CRATE);
    shipping.add(&mousepad)?;
    shipping.add(&bundle)?;

    let mut catalog = Catalog::new();
    for item in [keyboard, mouse, headset, mousepad, bundle.into(), shipping.into()] {
        catalog.insert(item)?;
    }
    Ok(catalog)
}
