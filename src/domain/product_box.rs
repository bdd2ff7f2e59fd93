//! Composite node: a named box of products and other boxes.

use std::cell::RefCell;
use std::collections::HashSet;
use std::convert::Infallible;
use std::rc::Rc;

use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::Item;
use crate::domain::money::Money;
use crate::domain::sellable::Sellable;

#[derive(Debug)]
struct BoxNode {
    name: String,
    children: Vec<Item>,
}

impl Drop for BoxNode {
    // Nested boxes are released through a worklist; a deep chain must not
    // recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Item::Box(inner) = child {
                // only the last handle hands its children over
                if let Ok(cell) = Rc::try_unwrap(inner.0) {
                    let mut node = cell.into_inner();
                    pending.append(&mut node.children);
                }
            }
        }
    }
}

/// A box being summed: its remaining children and the total so far.
struct PriceFrame {
    name: String,
    children: std::vec::IntoIter<Item>,
    total: Money,
}

impl PriceFrame {
    fn open(bundle: &ProductBox) -> Self {
        let node = bundle.0.borrow();
        debug!(bundle = %node.name, children = node.children.len(), "calculating price");
        Self {
            name: node.name.clone(),
            children: node.children.clone().into_iter(),
            total: Money::ZERO,
        }
    }
}

/// Shared handle to a box.
///
/// Cloning the handle does not copy the box: every clone sees the same
/// children, and a box lives until its last handle is dropped. The same box
/// may therefore sit in several parents at once.
#[derive(Debug, Clone)]
pub struct ProductBox(Rc<RefCell<BoxNode>>);

impl ProductBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(BoxNode {
            name: name.into(),
            children: Vec::new(),
        })))
    }

    /// Append `child` after the existing children.
    ///
    /// Duplicates are allowed. Fails with [`DomainError::Cycle`] if `child` is
    /// this box or already contains it, leaving the children untouched.
    #[instrument(level = "debug", skip_all, fields(parent = %self.name()))]
    pub fn add(&self, child: impl Into<Item>) -> DomainResult<()> {
        let child = child.into();
        if let Item::Box(inner) = &child {
            if inner.ptr_eq(self) || inner.reaches(self) {
                warn!(child = %inner.name(), "rejecting add: would create a cycle");
                return Err(DomainError::Cycle {
                    parent: self.name(),
                    child: inner.name(),
                });
            }
        }
        debug!(child = %child.name(), "adding");
        self.0.borrow_mut().children.push(child);
        Ok(())
    }

    /// Remove every occurrence of `child` (by identity). Returns how many were removed.
    #[instrument(level = "debug", skip_all, fields(parent = %self.name()))]
    pub fn remove(&self, child: &Item) -> usize {
        let mut node = self.0.borrow_mut();
        let before = node.children.len();
        node.children.retain(|c| !c.ptr_eq(child));
        let removed = before - node.children.len();
        debug!(removed, "removed");
        removed
    }

    /// Snapshot of the direct children in insertion order.
    pub fn children(&self) -> Vec<Item> {
        self.0.borrow().children.clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().children.is_empty()
    }

    /// True if `child` is a direct child of this box.
    pub fn contains(&self, child: &Item) -> bool {
        self.0.borrow().children.iter().any(|c| c.ptr_eq(child))
    }

    pub(crate) fn node_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    pub fn ptr_eq(&self, other: &ProductBox) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// True if `target` is nested somewhere below this box.
    pub fn reaches(&self, target: &ProductBox) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![self.clone()];

        while let Some(current) = stack.pop() {
            // shared boxes are walked once
            if !visited.insert(Rc::as_ptr(&current.0)) {
                continue;
            }
            for child in current.0.borrow().children.iter() {
                if let Item::Box(inner) = child {
                    if inner.ptr_eq(target) {
                        return true;
                    }
                    stack.push(inner.clone());
                }
            }
        }
        false
    }

    /// Like [`Sellable::price`], but reports overflow instead of saturating.
    pub fn try_price(&self) -> DomainResult<Money> {
        self.fold_price(|bundle, total, price| {
            total
                .checked_add(price)
                .ok_or_else(|| DomainError::Overflow {
                    bundle: bundle.to_string(),
                })
        })
    }

    /// Post-order sum over an explicit stack of open boxes.
    ///
    /// `add(bundle, total, price)` folds a child's price into the total of
    /// the box named `bundle`. A box's subtotal is folded into its parent once
    /// all of its children are done.
    fn fold_price<E>(
        &self,
        add: impl Fn(&str, Money, Money) -> Result<Money, E>,
    ) -> Result<Money, E> {
        let mut stack = vec![PriceFrame::open(self)];
        let mut total = Money::ZERO;

        while let Some(frame) = stack.last_mut() {
            match frame.children.next() {
                Some(Item::Product(product)) => {
                    frame.total = add(&frame.name, frame.total, product.price())?;
                }
                Some(Item::Box(inner)) => stack.push(PriceFrame::open(&inner)),
                None => {
                    let subtotal = frame.total;
                    stack.pop();
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.total = add(&parent.name, parent.total, subtotal)?;
                        }
                        None => total = subtotal,
                    }
                }
            }
        }
        Ok(total)
    }
}

impl Sellable for ProductBox {
    fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Depth-first, post-order sum over the children. Never cached.
    fn price(&self) -> Money {
        self.fold_price(|_, total, price| Ok::<_, Infallible>(total.saturating_add(price)))
            .unwrap_or_else(|never| match never {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sellable::Product;

    fn product(name: &str, cents: i64) -> Item {
        Product::new(name, Money::from_cents(cents)).unwrap().into()
    }

    #[test]
    fn given_empty_box_when_pricing_then_zero() {
        let empty = ProductBox::new("Empty");
        assert_eq!(empty.price(), Money::ZERO);
        assert!(empty.is_empty());
    }

    #[test]
    fn given_children_when_listing_then_keeps_insertion_order() {
        let bundle = ProductBox::new("Bundle");
        let a = product("a", 1);
        let b = product("b", 2);
        bundle.add(b.clone()).unwrap();
        bundle.add(a.clone()).unwrap();

        let names: Vec<String> = bundle.children().iter().map(Sellable::name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn given_duplicate_child_when_removing_then_removes_all_occurrences() {
        let bundle = ProductBox::new("Bundle");
        let cable = product("Cable", 500);
        bundle.add(cable.clone()).unwrap();
        bundle.add(product("Plug", 300)).unwrap();
        bundle.add(cable.clone()).unwrap();
        assert_eq!(bundle.price(), Money::from_cents(1300));

        assert_eq!(bundle.remove(&cable), 2);
        assert_eq!(bundle.price(), Money::from_cents(300));
        assert!(!bundle.contains(&cable));
    }

    #[test]
    fn given_equal_but_distinct_product_when_removing_then_noop() {
        let bundle = ProductBox::new("Bundle");
        bundle.add(product("Cable", 500)).unwrap();

        let lookalike = product("Cable", 500);
        assert_eq!(bundle.remove(&lookalike), 0);
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn given_self_when_adding_then_cycle_error() {
        let a = ProductBox::new("A");
        let result = a.add(a.clone());
        assert_eq!(
            result,
            Err(DomainError::Cycle {
                parent: "A".to_string(),
                child: "A".to_string(),
            })
        );
        assert!(a.is_empty());
    }

    #[test]
    fn given_box_shared_by_two_parents_when_walking_then_reaches_once() {
        let shared = ProductBox::new("Shared");
        let left = ProductBox::new("Left");
        let right = ProductBox::new("Right");
        let top = ProductBox::new("Top");
        left.add(&shared).unwrap();
        right.add(&shared).unwrap();
        top.add(&left).unwrap();
        top.add(&right).unwrap();

        assert!(top.reaches(&shared));
        assert!(!shared.reaches(&top));
        assert!(shared.add(&top).is_err());
    }

    fn chain(depth: usize) -> ProductBox {
        let root = ProductBox::new("level 0");
        let mut current = root.clone();
        for level in 1..depth {
            let next = ProductBox::new(format!("level {level}"));
            current.add(&next).unwrap();
            current = next;
        }
        current.add(product("Bolt", 1)).unwrap();
        root
    }

    #[test]
    fn given_deeply_nested_chain_when_pricing_then_sums_without_recursion() {
        let root = chain(100_000);

        assert_eq!(root.price(), Money::from_cents(1));
        assert_eq!(root.try_price(), Ok(Money::from_cents(1)));
        drop(root);
    }

    #[test]
    fn given_nested_boxes_when_pricing_then_subtotals_roll_up() {
        let inner = ProductBox::new("Inner");
        inner.add(product("a", 250)).unwrap();
        inner.add(product("b", 250)).unwrap();
        let outer = ProductBox::new("Outer");
        outer.add(product("c", 100)).unwrap();
        outer.add(&inner).unwrap();
        outer.add(ProductBox::new("Empty")).unwrap();
        outer.add(&inner).unwrap();

        assert_eq!(inner.price(), Money::from_cents(500));
        assert_eq!(outer.price(), Money::from_cents(1100));
        assert_eq!(outer.try_price(), Ok(Money::from_cents(1100)));
    }

    #[test]
    fn given_overflow_in_nested_box_when_try_pricing_then_names_that_box() {
        let inner = ProductBox::new("Inner");
        inner.add(product("a", i64::MAX)).unwrap();
        inner.add(product("b", 1)).unwrap();
        let outer = ProductBox::new("Outer");
        outer.add(&inner).unwrap();

        assert_eq!(
            outer.try_price(),
            Err(DomainError::Overflow {
                bundle: "Inner".to_string()
            })
        );
        assert_eq!(outer.price(), Money::MAX);
    }

    #[test]
    fn given_box_still_held_elsewhere_when_parent_dropped_then_children_survive() {
        let shared = ProductBox::new("Shared");
        shared.add(product("a", 100)).unwrap();
        let parent = ProductBox::new("Parent");
        parent.add(&shared).unwrap();

        drop(parent);

        assert_eq!(shared.len(), 1);
        assert_eq!(shared.price(), Money::from_cents(100));
    }

    #[test]
    fn given_overflowing_children_when_try_pricing_then_overflow_error() {
        let bundle = ProductBox::new("Huge");
        bundle.add(product("a", i64::MAX)).unwrap();
        bundle.add(product("b", 1)).unwrap();

        assert_eq!(
            bundle.try_price(),
            Err(DomainError::Overflow {
                bundle: "Huge".to_string()
            })
        );
        assert_eq!(bundle.price(), Money::MAX);
    }
}
