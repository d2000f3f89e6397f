//! XML publishing for provider trees.
//!
//! Every tree is written below a single `data` root element. Each value
//! becomes a child element named after its key, carrying the value as text:
//!
//! | Provider value | XML |
//! |----------------|-----|
//! | string `"date" = "1776-07-04"` | `<date>1776-07-04</date>` |
//! | boolean `"flag" = true` | `<flag>true</flag>` |
//! | image `"logo"` (bytes `GIF8`) | `<logo>R0lGOA==</logo>` |
//! | group `"items"` with two children | `<items>..</items><items>..</items>` |
//!
//! No attributes are written. Image text is plain base64, so images and
//! strings look the same in the output.
//!
//! ## Key conflicts
//!
//! Within one scope, categories are written in a fixed order: strings,
//! booleans, images, groups. A key already written as a scalar is skipped
//! when it shows up again as a group.
//!
//! ## Compound providers
//!
//! A [`CompoundDataProvider`](docdata_provider::CompoundDataProvider) writes
//! no element. Its providers are written into the parent it sits in, one
//! after the other.
//!
//! ## Examples
//!
//! ```
//! use docdata_provider::MemoryDataProvider;
//! use docdata_publish::xml::{to_xml_string_with_options, PublishOptions};
//!
//! let provider = MemoryDataProvider::new()
//!     .with_string("date", "1776-07-04")
//!     .with_child("items", MemoryDataProvider::new().with_string("name", "a"));
//!
//! let options = PublishOptions::default().xml_declaration(false);
//! let xml = to_xml_string_with_options(&provider, &options)?;
//! assert_eq!(
//!     xml,
//!     "<data>\n    <date>1776-07-04</date>\n    \
//!      <items>\n        <name>a</name>\n    </items>\n</data>"
//! );
//! # Ok::<(), docdata_publish::PublishError>(())
//! ```

pub mod ser;
mod utils;

pub use ser::{
    PublishOptions, XmlPublisher, publish, publish_with_options, to_xml_string,
    to_xml_string_with_options, to_xml_vec,
};
pub use utils::{ROOT_ELEMENT, is_valid_element_name};
