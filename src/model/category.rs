use std::collections::BTreeMap;

use super::item::Item;

/// Number of entries in the category colour palette.
pub const PALETTE_LEN: usize = 7;

/// Per-category visibility toggles. Keys stay sorted, which gives every
/// category a stable palette slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    visible: BTreeMap<String, bool>,
}

impl CategoryFilter {
    /// Register every category present in `items`, all visible.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut filter = Self::default();
        for item in items {
            filter.visible.entry(item.category.clone()).or_insert(true);
        }
        filter
    }

    /// Unknown categories are treated as visible.
    pub fn is_visible(&self, category: &str) -> bool {
        self.visible.get(category).copied().unwrap_or(true)
    }

    #[cfg(test)]
    pub fn set(&mut self, category: impl Into<String>, visible: bool) {
        self.visible.insert(category.into(), visible);
    }

    #[cfg(test)]
    pub fn toggle(&mut self, category: &str) {
        if let Some(v) = self.visible.get_mut(category) {
            *v = !*v;
        }
    }

    pub fn show_all(&mut self) {
        self.visible.values_mut().for_each(|v| *v = true);
    }

    /// Palette slot for a category: its sorted position modulo the palette.
    pub fn color_index(&self, category: &str) -> Option<usize> {
        self.visible
            .keys()
            .position(|k| k == category)
            .map(|i| i % PALETTE_LEN)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.visible.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut bool)> {
        self.visible.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }
}
