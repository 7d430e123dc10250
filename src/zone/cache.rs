//! Identity-keyed weak cache.
//!
//! Records are keyed by the address of an `Rc` allocation rather than by
//! value, and the cache only holds a `Weak` to each key so it never keeps a
//! key alive. Entries whose key has been dropped are pruned on insert.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

struct Entry<K, V> {
    key: Weak<K>,
    value: Rc<RefCell<V>>,
}

/// Maps `Rc<K>` instances, by identity, to shared records of type `V`.
pub struct IdentityCache<K, V> {
    entries: HashMap<usize, Entry<K, V>>,
}

impl<K, V> Default for IdentityCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IdentityCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn address(key: &Rc<K>) -> usize {
        Rc::as_ptr(key) as *const () as usize
    }

    /// Returns the record for this exact key instance, if one exists.
    pub fn get(&self, key: &Rc<K>) -> Option<Rc<RefCell<V>>> {
        self.entries
            .get(&Self::address(key))
            .filter(|entry| Weak::ptr_eq(&entry.key, &Rc::downgrade(key)))
            .map(|entry| entry.value.clone())
    }

    /// Returns the record for `key`, creating it with `init` on first sight.
    ///
    /// A stored `Weak` keeps its key's allocation reserved, so an address
    /// cannot be reused by a new key until the stale entry is pruned.
    pub fn get_or_insert_with(&mut self, key: &Rc<K>, init: impl FnOnce() -> V) -> Rc<RefCell<V>> {
        if let Some(value) = self.get(key) {
            return value;
        }

        self.prune();
        let value = Rc::new(RefCell::new(init()));
        self.entries.insert(
            Self::address(key),
            Entry {
                key: Rc::downgrade(key),
                value: value.clone(),
            },
        );
        value
    }

    /// Drops entries whose key no longer exists.
    pub fn prune(&mut self) {
        self.entries.retain(|_, entry| entry.key.strong_count() > 0);
    }

    /// Number of entries whose key is still alive.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.key.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Key(u32);

    #[test]
    fn test_same_instance_returns_same_record() {
        let mut cache: IdentityCache<Key, Vec<u32>> = IdentityCache::new();
        let key = Rc::new(Key::default());

        let first = cache.get_or_insert_with(&key, Vec::new);
        first.borrow_mut().push(7);
        let second = cache.get_or_insert_with(&key, || vec![99]);

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(*second.borrow(), vec![7]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_instances_get_independent_records() {
        let mut cache: IdentityCache<Key, u32> = IdentityCache::new();
        let a = Rc::new(Key::default());
        let b = Rc::new(Key::default());

        let ra = cache.get_or_insert_with(&a, || 1);
        let rb = cache.get_or_insert_with(&b, || 2);

        assert!(!Rc::ptr_eq(&ra, &rb));
        assert_eq!(*ra.borrow(), 1);
        assert_eq!(*rb.borrow(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clones_of_one_rc_share_a_record() {
        let mut cache: IdentityCache<Key, u32> = IdentityCache::new();
        let a = Rc::new(Key::default());
        let alias = a.clone();

        let ra = cache.get_or_insert_with(&a, || 1);
        let ralias = cache.get_or_insert_with(&alias, || 2);
        assert!(Rc::ptr_eq(&ra, &ralias));
    }

    #[test]
    fn test_dropped_keys_are_pruned() {
        let mut cache: IdentityCache<Key, u32> = IdentityCache::new();
        let a = Rc::new(Key::default());
        cache.get_or_insert_with(&a, || 1);
        drop(a);

        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());

        let b = Rc::new(Key::default());
        cache.get_or_insert_with(&b, || 2);
        assert_eq!(cache.entries.len(), 1);
    }
}
