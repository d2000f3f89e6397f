//! # docdata publishing
//!
//! Turns data provider trees into XML documents, and builds trees from JSON
//! descriptions.
//!
//! ## Features
//!
//! - **XML**: streams a tree through quick-xml into any [`std::io::Write`]
//!   sink as indented UTF-8, base64-encoding image payloads.
//! - **JSON**: loads a provider tree from a JSON document so trees can be
//!   described without Rust code.
//!
//! ## Examples
//!
//! ```
//! use docdata_provider::{CompoundDataProvider, MemoryDataProvider};
//! use docdata_publish::to_xml_string;
//!
//! let tree = CompoundDataProvider::new()
//!     .with(MemoryDataProvider::new().with_string("title", "Declaration"))
//!     .with(MemoryDataProvider::new().with_boolean("signed", true));
//!
//! let xml = to_xml_string(&tree)?;
//! assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
//! assert!(xml.contains("<title>Declaration</title>"));
//! assert!(xml.contains("<signed>true</signed>"));
//! # Ok::<(), docdata_publish::PublishError>(())
//! ```

pub mod error;
pub mod json;
pub mod xml;

pub use error::{PublishError, Result};

pub use json::{from_json_file, from_json_str, from_json_value};
pub use xml::{
    PublishOptions, publish, publish_with_options, to_xml_string, to_xml_string_with_options,
    to_xml_vec,
};
