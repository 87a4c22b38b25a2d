//! View model of the rendered result list and its filter bar.

use crate::model::{CardCategory, CategoryFilter, categorize};

/// One `.card-item` of the rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Category derived from the item's `.card-text` markup
    pub category: CardCategory,
    /// Whether the item is currently displayed
    pub visible: bool,
}

impl CardItem {
    /// Build an item from its description markup. Items start visible.
    pub fn from_text(text: &str) -> Self {
        Self {
            category: categorize(text),
            visible: true,
        }
    }
}

/// Display state of the result list after a filter or layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardList {
    pub items: Vec<CardItem>,
    /// Index of the active filter button, if one was pressed
    pub active_button: Option<usize>,
    /// Whether the aggregate summary is shown
    pub summary_visible: bool,
    /// Whether the list container has the single-column class
    pub single_column: bool,
}

impl CardList {
    /// Build from the `.card-text` markup of every item, in document order.
    pub fn from_texts<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let items: Vec<CardItem> = texts
            .into_iter()
            .map(|t| CardItem::from_text(t.as_ref()))
            .collect();
        let mut list = Self {
            items,
            active_button: None,
            summary_visible: true,
            single_column: false,
        };
        list.adjust_layout();
        list
    }

    /// Build from items whose visibility is already known (read back from the page).
    pub fn from_items(items: Vec<CardItem>) -> Self {
        let mut list = Self {
            items,
            active_button: None,
            summary_visible: true,
            single_column: false,
        };
        list.adjust_layout();
        list
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|item| item.visible).count()
    }

    /// Apply a filter selection made with the button at `button_index`.
    pub fn filter_by_category(&mut self, button_index: Option<usize>, filter: CategoryFilter) {
        self.active_button = button_index;
        for item in &mut self.items {
            item.visible = filter.admits(item.category);
        }
        self.summary_visible = filter.is_all();
        self.adjust_layout();
        log::debug!(
            "🔎 Filter {:?}: {}/{} cards visible",
            filter,
            self.visible_count(),
            self.items.len()
        );
    }

    /// Single column iff exactly one item is visible.
    pub fn adjust_layout(&mut self) {
        self.single_column = self.visible_count() == 1;
    }
}
