//! Tree traversal helpers.
//!
//! These mirror the handful of path shapes the field rules use:
//!
//! | helper                         | path shape     |
//! |--------------------------------|----------------|
//! | [`Element::descendants`]       | `.//*`         |
//! | [`Element::iter`]              | self + `.//*`  |
//! | [`Element::find`]              | `.//Name`      |
//! | [`Element::child`]             | `Name`         |
//! | [`Element::path`]              | `.//A/B`       |
//!
//! All of them yield elements in document order.

use super::Element;

/// Pre-order walk over an element's descendants, excluding the element itself.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Element>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(element) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl Element {
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// This element followed by all of its descendants.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        std::iter::once(self).chain(self.descendants())
    }

    /// Every descendant called `name`.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.descendants().filter(move |e| e.name == name)
    }

    /// First descendant called `name`.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.descendants().find(|e| e.name == name)
    }

    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.name == name)
    }

    /// Every `child`-named child of every `parent`-named descendant.
    ///
    /// Results are grouped by parent, parents taken in document order.
    pub fn path<'a>(&'a self, parent: &'a str, child: &'a str) -> impl Iterator<Item = &'a Element> {
        self.find_all(parent)
            .flat_map(move |p| p.children.iter().filter(move |e| e.name == child))
    }
}
