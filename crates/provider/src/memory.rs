//! Leaf provider scopes.

use crate::entries::Entries;
use crate::image::Image;

/// A single scope of template data.
///
/// Values are grouped by category: strings, booleans, images and repeating
/// groups of child scopes. Each category keeps its keys unique and in
/// insertion order. The same key may appear in more than one category; it is
/// up to the consumer to decide which one wins.
#[derive(Debug, Default)]
pub struct MemoryDataProvider {
    strings: Entries<String>,
    booleans: Entries<bool>,
    images: Entries<Image>,
    groups: Entries<Vec<MemoryDataProvider>>,
}

impl MemoryDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string value, replacing any previous string under `key`.
    pub fn add_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.strings.insert(key, value.into());
        self
    }

    /// Sets a boolean value, replacing any previous boolean under `key`.
    pub fn add_boolean(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.booleans.insert(key, value);
        self
    }

    /// Sets an image payload, replacing any previous image under `key`.
    pub fn add_image(&mut self, key: impl Into<String>, image: impl Into<Image>) -> &mut Self {
        self.images.insert(key, image.into());
        self
    }

    /// Appends a child scope to the repeating group under `key`.
    pub fn add_child(&mut self, key: impl Into<String>, child: MemoryDataProvider) -> &mut Self {
        self.groups.get_or_insert_with(key, Vec::new).push(child);
        self
    }

    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_string(key, value);
        self
    }

    pub fn with_boolean(mut self, key: impl Into<String>, value: bool) -> Self {
        self.add_boolean(key, value);
        self
    }

    pub fn with_image(mut self, key: impl Into<String>, image: impl Into<Image>) -> Self {
        self.add_image(key, image);
        self
    }

    pub fn with_child(mut self, key: impl Into<String>, child: MemoryDataProvider) -> Self {
        self.add_child(key, child);
        self
    }

    /// Appends every child to the group under `key`, in iteration order.
    pub fn with_children(
        mut self,
        key: impl Into<String>,
        children: impl IntoIterator<Item = MemoryDataProvider>,
    ) -> Self {
        let group = self.groups.get_or_insert_with(key, Vec::new);
        group.extend(children);
        self
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.booleans.get(key).copied()
    }

    pub fn image(&self, key: &str) -> Option<&Image> {
        self.images.get(key)
    }

    /// Child scopes under `key`; empty if the group does not exist.
    pub fn children(&self, key: &str) -> &[MemoryDataProvider] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn child_count(&self, key: &str) -> usize {
        self.children(key).len()
    }

    pub fn child(&self, key: &str, index: usize) -> Option<&MemoryDataProvider> {
        self.children(key).get(index)
    }

    pub fn string_keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys()
    }

    pub fn boolean_keys(&self) -> impl Iterator<Item = &str> {
        self.booleans.keys()
    }

    pub fn image_keys(&self) -> impl Iterator<Item = &str> {
        self.images.keys()
    }

    pub fn group_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys()
    }

    /// String values in insertion order.
    pub fn strings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.strings.iter().map(|(key, value)| (key, value.as_str()))
    }

    /// Boolean values in insertion order.
    pub fn booleans(&self) -> impl Iterator<Item = (&str, bool)> {
        self.booleans.iter().map(|(key, value)| (key, *value))
    }

    /// Image payloads in insertion order.
    pub fn images(&self) -> impl Iterator<Item = (&str, &Image)> {
        self.images.iter()
    }

    /// Repeating groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[MemoryDataProvider])> {
        self.groups.iter().map(|(key, children)| (key, children.as_slice()))
    }

    /// True if the scope holds no values and no groups.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
            && self.booleans.is_empty()
            && self.images.is_empty()
            && self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accessors() {
        let provider = MemoryDataProvider::new()
            .with_string("date", "1776-07-04")
            .with_boolean("flag", true)
            .with_image("picture", vec![1u8, 2, 3]);

        assert_eq!(provider.string("date"), Some("1776-07-04"));
        assert_eq!(provider.boolean("flag"), Some(true));
        assert!(provider.image("picture").is_some());
        assert_eq!(provider.string("missing"), None);
        assert_eq!(provider.boolean("date"), None);
        assert!(!provider.is_empty());
    }

    #[test]
    fn test_same_key_in_several_categories() {
        let provider = MemoryDataProvider::new()
            .with_string("name", "scalar")
            .with_child("name", MemoryDataProvider::new());

        assert_eq!(provider.string("name"), Some("scalar"));
        assert_eq!(provider.child_count("name"), 1);
    }

    #[test]
    fn test_children_keep_order() {
        let provider = MemoryDataProvider::new()
            .with_child("items", MemoryDataProvider::new().with_string("name", "a"))
            .with_child("other", MemoryDataProvider::new())
            .with_child("items", MemoryDataProvider::new().with_string("name", "b"));

        let names: Vec<&str> = provider
            .children("items")
            .iter()
            .filter_map(|child| child.string("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        let keys: Vec<&str> = provider.group_keys().collect();
        assert_eq!(keys, vec!["items", "other"]);
        assert_eq!(provider.child("items", 1).and_then(|c| c.string("name")), Some("b"));
        assert!(provider.child("items", 2).is_none());
    }

    #[test]
    fn test_with_children_appends() {
        let provider = MemoryDataProvider::new()
            .with_child("row", MemoryDataProvider::new().with_string("n", "1"))
            .with_children(
                "row",
                (2..=3).map(|n| MemoryDataProvider::new().with_string("n", n.to_string())),
            );

        assert_eq!(provider.child_count("row"), 3);
        assert_eq!(provider.child("row", 2).and_then(|c| c.string("n")), Some("3"));
    }

    #[test]
    fn test_missing_group_is_empty() {
        let provider = MemoryDataProvider::new();
        assert!(provider.children("nothing").is_empty());
        assert_eq!(provider.child_count("nothing"), 0);
        assert!(provider.is_empty());
    }

    #[test]
    fn test_add_string_replaces() {
        let mut provider = MemoryDataProvider::new();
        provider.add_string("k", "first").add_string("k", "second");

        let pairs: Vec<(&str, &str)> = provider.strings().collect();
        assert_eq!(pairs, vec![("k", "second")]);
    }
}
