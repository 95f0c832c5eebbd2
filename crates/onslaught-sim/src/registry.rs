//! Entity registry: dense, order-stable list of active handles with a
//! persistent round-robin cursor.
//!
//! Removal keeps relative order and corrects the cursor, so the entry that
//! logically follows a removed one is neither skipped nor visited twice.

use onslaught_core::types::EnemyHandle;

#[derive(Debug, Default, Clone)]
pub struct Registry {
    entries: Vec<EnemyHandle>,
    /// Indexed by handle; true while the handle is registered.
    member: Vec<bool>,
    cursor: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the next entry the round-robin window will visit.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn contains(&self, handle: EnemyHandle) -> bool {
        self.member.get(handle.index()).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = EnemyHandle> + '_ {
        self.entries.iter().copied()
    }

    /// Append a handle. Returns false if it was already registered.
    pub fn register(&mut self, handle: EnemyHandle) -> bool {
        if self.contains(handle) {
            return false;
        }
        if handle.index() >= self.member.len() {
            self.member.resize(handle.index() + 1, false);
        }
        self.member[handle.index()] = true;
        self.entries.push(handle);
        true
    }

    /// Remove a handle, preserving order and correcting the cursor.
    pub fn unregister(&mut self, handle: EnemyHandle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        self.member[handle.index()] = false;
        let Some(index) = self.entries.iter().position(|&h| h == handle) else {
            return false;
        };
        self.entries.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.entries.len() {
            self.cursor = 0;
        }
        true
    }

    /// Remove every entry and rewind the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.member.iter_mut().for_each(|m| *m = false);
        self.cursor = 0;
    }

    /// Fill `out` with the next `min(budget, len)` entries, wrapping, and
    /// advance the cursor past them. Returns the number taken.
    pub fn next_window(&mut self, budget: usize, out: &mut Vec<EnemyHandle>) -> usize {
        out.clear();
        let len = self.entries.len();
        if len == 0 {
            self.cursor = 0;
            return 0;
        }
        if self.cursor >= len {
            self.cursor %= len;
        }
        let count = budget.min(len);
        for k in 0..count {
            out.push(self.entries[(self.cursor + k) % len]);
        }
        self.cursor = (self.cursor + count) % len;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(n: usize) -> Vec<EnemyHandle> {
        (0..n).map(EnemyHandle::from_index).collect()
    }

    fn filled(n: usize) -> Registry {
        let mut registry = Registry::new();
        for h in handles(n) {
            registry.register(h);
        }
        registry
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = Registry::new();
        let h = EnemyHandle::from_index(2);
        assert!(registry.register(h));
        assert!(!registry.register(h));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(h));
    }

    #[test]
    fn test_window_wraps_and_advances() {
        let mut registry = filled(5);
        let mut out = Vec::new();
        assert_eq!(registry.next_window(3, &mut out), 3);
        assert_eq!(out, handles(3));
        assert_eq!(registry.next_window(3, &mut out), 3);
        let idx: Vec<usize> = out.iter().map(|h| h.index()).collect();
        assert_eq!(idx, vec![3, 4, 0]);
        assert_eq!(registry.cursor(), 1);
    }

    #[test]
    fn test_window_never_exceeds_len() {
        let mut registry = filled(2);
        let mut out = Vec::new();
        assert_eq!(registry.next_window(10, &mut out), 2);
        assert_eq!(out.len(), 2, "no entry visited twice in one window");
    }

    #[test]
    fn test_remove_before_cursor_shifts_cursor() {
        let mut registry = filled(6);
        let mut out = Vec::new();
        registry.next_window(3, &mut out); // visited 0,1,2; cursor at 3
        registry.unregister(EnemyHandle::from_index(1));
        registry.next_window(1, &mut out);
        assert_eq!(out[0].index(), 3, "entry after the window must not be skipped");
    }

    #[test]
    fn test_remove_at_cursor_keeps_follower() {
        let mut registry = filled(6);
        let mut out = Vec::new();
        registry.next_window(3, &mut out); // cursor at 3
        registry.unregister(EnemyHandle::from_index(3));
        registry.next_window(1, &mut out);
        assert_eq!(out[0].index(), 4);
    }

    #[test]
    fn test_remove_last_wraps_cursor() {
        let mut registry = filled(4);
        let mut out = Vec::new();
        registry.next_window(3, &mut out); // cursor at 3
        registry.unregister(EnemyHandle::from_index(3));
        assert_eq!(registry.cursor(), 0);
        registry.next_window(1, &mut out);
        assert_eq!(out[0].index(), 0);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let mut registry = filled(2);
        assert!(!registry.unregister(EnemyHandle::from_index(7)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_window() {
        let mut registry = Registry::new();
        let mut out = vec![EnemyHandle::from_index(0)];
        assert_eq!(registry.next_window(4, &mut out), 0);
        assert!(out.is_empty());
    }
}
