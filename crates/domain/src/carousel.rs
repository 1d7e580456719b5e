//! Featured-items carousel state
//!
//! A fixed-length ordered list with one active index. Navigation wraps in
//! both directions and only the first few items behind the active one are
//! considered visible, so layering work stays constant regardless of length.

use std::collections::BTreeSet;

/// Longest list a carousel keeps; extra input items are dropped.
pub const MAX_FEATURED_ITEMS: usize = 5;

/// Number of stacked positions (offsets `0..VISIBLE_DEPTH`) that are visible.
pub const VISIBLE_DEPTH: usize = 3;

/// An item within the visible stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleItem<'a, T> {
    /// Cyclic distance from the active item (0 = active, front of the stack)
    pub offset: usize,
    /// Position of the item in the carousel
    pub index: usize,
    pub item: &'a T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel<T> {
    items: Vec<T>,
    active: usize,
}

impl<T> Carousel<T> {
    /// Builds a carousel from the first [`MAX_FEATURED_ITEMS`] items.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().take(MAX_FEATURED_ITEMS).collect(),
            active: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// `None` when the carousel has no items.
    pub fn active_index(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.active)
        }
    }

    pub fn active_item(&self) -> Option<&T> {
        self.items.get(self.active)
    }

    pub fn is_first_active(&self) -> bool {
        self.active_index() == Some(0)
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        let len = self.items.len();
        if len <= 1 {
            return;
        }
        self.active = wrap_index(self.active as isize + delta, len);
    }

    /// Cyclic forward distance from the active item to `index`.
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        let len = self.items.len();
        if index >= len {
            return None;
        }
        Some(wrap_index(index as isize - self.active as isize, len))
    }

    /// Offsets currently on screen: `{0, 1, 2}` capped by the length.
    pub fn visible_offsets(&self) -> BTreeSet<usize> {
        (0..self.items.len().min(VISIBLE_DEPTH)).collect()
    }

    /// Items within the visible depth, ordered back to front (largest offset
    /// first) so the active item is layered last.
    pub fn visible_items(&self) -> Vec<VisibleItem<'_, T>> {
        let mut visible: Vec<VisibleItem<'_, T>> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let offset = self.offset_of(index)?;
                (offset < VISIBLE_DEPTH).then_some(VisibleItem {
                    offset,
                    index,
                    item,
                })
            })
            .collect();
        visible.sort_by(|a, b| b.offset.cmp(&a.offset));
        visible
    }
}

impl<T> Default for Carousel<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            active: 0,
        }
    }
}

impl<T> FromIterator<T> for Carousel<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// `x mod n` in `[0, n)` for any sign of `x`. `n` must be non-zero.
fn wrap_index(x: isize, n: usize) -> usize {
    let n = n as isize;
    (((x % n) + n) % n) as usize
}
