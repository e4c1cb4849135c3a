//! Page-local copies of server lists, keyed by the server's identifiers.

/// A record carrying the server-assigned identifier.
pub trait Identified {
    fn id(&self) -> i64;
}

/// An ordered list of server entities.
///
/// Entries are only ever the values the server returned, so after a
/// successful mutation the cache mirrors what the server stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Cache<T> {
    items: Vec<T>,
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> Cache<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Replace the entry with the same id, or append it if it is new.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Drop the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cache, Identified};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: &'static str,
    }

    impl Identified for Item {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn item(id: i64, name: &'static str) -> Item {
        Item { id, name }
    }

    #[test]
    fn upsert_replaces_entry_with_same_id_in_place() {
        let mut cache = Cache::new(vec![item(1, "a"), item(2, "b"), item(3, "c")]);

        cache.upsert(item(2, "server b"));

        let names: Vec<_> = cache.iter().map(|i| i.name).collect();
        assert_eq!(names, ["a", "server b", "c"]);
    }

    #[test]
    fn upsert_appends_new_entry() {
        let mut cache = Cache::new(vec![item(1, "a")]);

        cache.upsert(item(9, "new"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(9), Some(&item(9, "new")));
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut cache = Cache::new(vec![item(1, "a"), item(2, "b")]);
        let before = cache.clone();

        assert!(!cache.remove(42));
        assert_eq!(cache, before);

        assert!(cache.remove(1));
        assert!(!cache.remove(1));
        assert_eq!(cache.len(), 1);
    }
}
