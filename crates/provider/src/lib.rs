//! # docdata data providers
//!
//! In-memory trees of named values that feed a document template engine.
//!
//! A tree is built from two kinds of node:
//!
//! - [`MemoryDataProvider`]: a leaf scope holding string, boolean and image
//!   values by key, plus repeating groups of child leaf scopes.
//! - [`CompoundDataProvider`]: an ordered list of other providers with no keys
//!   of its own. Consumers flatten it into the scope that owns it.
//!
//! Consumers walk a tree through the [`DataProvider`] trait, which exposes
//! typed accessors for both node kinds:
//!
//! ```
//! use docdata_provider::{CompoundDataProvider, DataProvider, MemoryDataProvider};
//!
//! let header = MemoryDataProvider::new().with_string("date", "1776-07-04");
//! let body = MemoryDataProvider::new()
//!     .with_boolean("signed", true)
//!     .with_child("signer", MemoryDataProvider::new().with_string("name", "John Hancock"));
//!
//! let root = CompoundDataProvider::new().with(header).with(body);
//! assert!(root.as_compound().is_some());
//! assert_eq!(root.providers().len(), 2);
//! ```

mod compound;
mod entries;
mod image;
mod memory;

pub use compound::CompoundDataProvider;
pub use entries::Entries;
pub use image::Image;
pub use memory::MemoryDataProvider;

/// A node of a data provider tree.
///
/// Implementors identify themselves through [`as_memory`](Self::as_memory) or
/// [`as_compound`](Self::as_compound). A type answering `None` to both is not
/// understood by consumers and is reported by [`type_name`](Self::type_name).
pub trait DataProvider: Send + Sync {
    /// Returns this node as a leaf scope, if it is one.
    fn as_memory(&self) -> Option<&MemoryDataProvider> {
        None
    }

    /// Returns this node as a compound container, if it is one.
    fn as_compound(&self) -> Option<&CompoundDataProvider> {
        None
    }

    /// Name of the concrete provider type, used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl DataProvider for MemoryDataProvider {
    fn as_memory(&self) -> Option<&MemoryDataProvider> {
        Some(self)
    }
}

impl DataProvider for CompoundDataProvider {
    fn as_compound(&self) -> Option<&CompoundDataProvider> {
        Some(self)
    }
}

impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    fn as_memory(&self) -> Option<&MemoryDataProvider> {
        (**self).as_memory()
    }

    fn as_compound(&self) -> Option<&CompoundDataProvider> {
        (**self).as_compound()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}
