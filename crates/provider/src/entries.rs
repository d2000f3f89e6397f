/// Insertion-ordered key/value storage with unique keys.
///
/// Re-inserting an existing key replaces the value but keeps the key's
/// original position, so iteration order is the order keys were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entries<T> {
    items: Vec<(String, T)>,
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Entries<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the value previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        let key = key.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.items[index].1, value)),
            None => {
                self.items.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.position(key).map(|index| &self.items[index].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.position(key).map(move |index| &mut self.items[index].1)
    }

    /// Returns the value for `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with(
        &mut self,
        key: impl Into<String>,
        default: impl FnOnce() -> T,
    ) -> &mut T {
        let key = key.into();
        let index = match self.position(&key) {
            Some(index) => index,
            None => {
                self.items.push((key, default()));
                self.items.len() - 1
            }
        };
        &mut self.items[index].1
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|(existing, _)| existing == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut entries = Entries::new();
        entries.insert("zeta", 1);
        entries.insert("alpha", 2);
        entries.insert("mid", 3);

        let keys: Vec<&str> = entries.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut entries = Entries::new();
        entries.insert("a", 1);
        entries.insert("b", 2);

        assert_eq!(entries.insert("a", 10), Some(1));
        assert_eq!(entries.len(), 2);

        let pairs: Vec<(&str, &i32)> = entries.iter().collect();
        assert_eq!(pairs, vec![("a", &10), ("b", &2)]);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut entries: Entries<Vec<u8>> = Entries::new();
        entries.get_or_insert_with("bytes", Vec::new).push(1);
        entries.get_or_insert_with("bytes", Vec::new).push(2);

        assert_eq!(entries.get("bytes"), Some(&vec![1, 2]));
        assert!(entries.contains_key("bytes"));
        assert!(!entries.contains_key("other"));
    }
}
