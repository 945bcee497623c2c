//! Incremental reveal over a result set
//!
//! The cursor tracks how many items the view has asked for; it belongs to a
//! single result set identity and is reset (never carried over) when the
//! underlying set changes.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedCursor {
    revealed: usize,
}

impl FeedCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the visible prefix by one page. Revealing past the end of the
    /// underlying set is a no-op at read time; the cursor just clamps.
    pub fn reveal(&mut self, page_size: usize) {
        self.revealed = self.revealed.saturating_add(page_size);
    }

    /// Snap back to a single page. Called whenever the underlying result set
    /// identity changes (new query, new explore set).
    pub fn reset(&mut self, page_size: usize) {
        self.revealed = page_size;
    }

    /// The currently visible prefix
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.revealed.min(items.len())]
    }

    /// Whether another reveal would show more items
    pub fn has_more<T>(&self, items: &[T]) -> bool {
        items.len() > self.revealed
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_extends_then_clamps() {
        let items: Vec<u32> = (0..30).collect();
        let mut cursor = FeedCursor::new();

        cursor.reveal(12);
        cursor.reveal(12);
        assert_eq!(cursor.visible(&items).len(), 24);

        cursor.reveal(12);
        assert_eq!(cursor.visible(&items).len(), 30);
    }

    #[test]
    fn test_has_more() {
        let items: Vec<u32> = (0..30).collect();
        let mut cursor = FeedCursor::new();

        cursor.reveal(12);
        assert!(cursor.has_more(&items));

        cursor.reveal(12);
        cursor.reveal(12);
        assert!(!cursor.has_more(&items));
    }

    #[test]
    fn test_reset_returns_to_one_page() {
        let mut cursor = FeedCursor::new();
        cursor.reveal(12);
        cursor.reveal(12);

        cursor.reset(12);
        assert_eq!(cursor.revealed(), 12);
    }

    #[test]
    fn test_empty_set_is_safe() {
        let items: Vec<u32> = Vec::new();
        let mut cursor = FeedCursor::new();
        cursor.reveal(12);

        assert!(cursor.visible(&items).is_empty());
        assert!(!cursor.has_more(&items));
    }
}
