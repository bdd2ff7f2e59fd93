//! Walking and rendering bundle trees.
//!
//! Walks keep an explicit stack instead of recursing, so very deep boxes
//! do not grow the call stack.

use std::rc::Rc;

use termtree::Tree;
use tracing::instrument;

use crate::domain::item::Item;
use crate::domain::product_box::ProductBox;
use crate::domain::sellable::{Product, Sellable};

/// Pre-order walk yielding `(depth, item)`, the start item at depth 0.
pub struct PreOrderIter {
    stack: Vec<(usize, Item)>,
}

impl Iterator for PreOrderIter {
    type Item = (usize, Item);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, current) = self.stack.pop()?;
        if let Item::Box(inner) = &current {
            // Push children in reverse order for left-to-right traversal
            for child in inner.children().into_iter().rev() {
                self.stack.push((depth + 1, child));
            }
        }
        Some((depth, current))
    }
}

/// Post-order walk: every child is yielded before its box.
pub struct PostOrderIter {
    stack: Vec<(usize, Item, bool)>,
}

impl Iterator for PostOrderIter {
    type Item = (usize, Item);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, current, visited)) = self.stack.pop() {
            if visited || current.is_leaf() {
                return Some((depth, current));
            }
            let children = current
                .as_box()
                .map(ProductBox::children)
                .unwrap_or_default();
            self.stack.push((depth, current, true));
            for child in children.into_iter().rev() {
                self.stack.push((depth + 1, child, false));
            }
        }
        None
    }
}

impl Item {
    pub fn iter(&self) -> PreOrderIter {
        PreOrderIter {
            stack: vec![(0, self.clone())],
        }
    }

    pub fn iter_postorder(&self) -> PostOrderIter {
        PostOrderIter {
            stack: vec![(0, self.clone(), false)],
        }
    }

    /// Number of levels: 1 for a product or an empty box.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(1)
    }

    /// All products below this item, in pre-order.
    ///
    /// A product reachable along several paths is listed once per path.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_products(&self) -> Vec<Rc<Product>> {
        self.iter()
            .filter_map(|(_, item)| match item {
                Item::Product(product) => Some(product),
                Item::Box(_) => None,
            })
            .collect()
    }
}

/// Boxes nested deeper than this are rendered collapsed, without children.
pub const MAX_RENDER_DEPTH: usize = 64;

pub trait TreeRender {
    /// Render as a `termtree`, labelling nodes `name (price)`.
    fn to_tree(&self, currency_symbol: &str) -> Tree<String>;
}

fn label(item: &Item, currency_symbol: &str) -> String {
    format!("{} ({})", item.name(), item.price().with_symbol(currency_symbol))
}

/// A box whose subtree is being rendered.
struct RenderFrame {
    label: String,
    children: std::vec::IntoIter<Item>,
    leaves: Vec<Tree<String>>,
}

impl RenderFrame {
    fn open(bundle: &ProductBox, currency_symbol: &str) -> Self {
        Self {
            label: label(&Item::from(bundle), currency_symbol),
            children: bundle.children().into_iter(),
            leaves: Vec::new(),
        }
    }
}

impl TreeRender for Item {
    fn to_tree(&self, currency_symbol: &str) -> Tree<String> {
        let Item::Box(root) = self else {
            return Tree::new(label(self, currency_symbol));
        };
        let mut stack = vec![RenderFrame::open(root, currency_symbol)];

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                return Tree::new(label(self, currency_symbol));
            };
            match frame.children.next() {
                Some(Item::Box(inner)) if depth < MAX_RENDER_DEPTH => {
                    stack.push(RenderFrame::open(&inner, currency_symbol));
                }
                Some(child @ Item::Box(_)) => {
                    let collapsed = format!("{} ...", label(&child, currency_symbol));
                    frame.leaves.push(Tree::new(collapsed));
                }
                Some(child) => frame.leaves.push(Tree::new(label(&child, currency_symbol))),
                None => {
                    let Some(done) = stack.pop() else { continue };
                    let tree = Tree::new(done.label).with_leaves(done.leaves);
                    match stack.last_mut() {
                        Some(parent) => parent.leaves.push(tree),
                        None => return tree,
                    }
                }
            }
        }
    }
}
