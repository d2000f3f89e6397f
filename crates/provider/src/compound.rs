use std::fmt;

use crate::DataProvider;

/// An ordered list of providers that share their owner's scope.
///
/// A compound provider has no keys of its own. Consumers treat its providers
/// as if they were placed directly where the compound sits.
#[derive(Default)]
pub struct CompoundDataProvider {
    providers: Vec<Box<dyn DataProvider>>,
}

impl CompoundDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, provider: impl DataProvider + 'static) -> &mut Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn push_boxed(&mut self, provider: Box<dyn DataProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    pub fn with(mut self, provider: impl DataProvider + 'static) -> Self {
        self.push(provider);
        self
    }

    /// The contained providers, in order.
    pub fn providers(&self) -> &[Box<dyn DataProvider>] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl FromIterator<Box<dyn DataProvider>> for CompoundDataProvider {
    fn from_iter<I: IntoIterator<Item = Box<dyn DataProvider>>>(iter: I) -> Self {
        Self {
            providers: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for CompoundDataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|provider| provider.type_name()))
            .finish()
    }
}
