//! XML publishing of provider trees.
//!
//! The publisher walks a tree depth first and streams quick-xml events
//! straight to the sink. All state lives in the [`XmlPublisher`] created for
//! one call, so independent trees can be published concurrently.

use std::collections::HashSet;
use std::io::{self, Write};

use docdata_provider::{DataProvider, MemoryDataProvider};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::{debug, trace};

use crate::error::{PublishError, Result};
use crate::xml::utils;

/// Options controlling the published document.
///
/// # Examples
///
/// ```
/// use docdata_publish::xml::PublishOptions;
///
/// let options = PublishOptions::default().indent(2).xml_declaration(false);
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    /// Spaces per nesting level. `0` writes the whole document on one line.
    /// Defaults to 4.
    pub indent: usize,
    /// Whether to start with `<?xml version="1.0" encoding="UTF-8"?>`.
    /// Defaults to `true`.
    pub xml_declaration: bool,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            xml_declaration: true,
        }
    }
}

impl PublishOptions {
    #[must_use]
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }
}

/// Publish a provider tree to a writer with default options, flushing it.
///
/// # Examples
///
/// ```
/// use docdata_provider::MemoryDataProvider;
/// use docdata_publish::xml::publish;
///
/// let provider = MemoryDataProvider::new().with_string("date", "1776-07-04");
/// let mut out = Vec::new();
/// publish(&provider, &mut out)?;
/// assert!(String::from_utf8_lossy(&out).contains("<date>1776-07-04</date>"));
/// # Ok::<(), docdata_publish::PublishError>(())
/// ```
pub fn publish<W: Write>(provider: &dyn DataProvider, writer: W) -> Result<()> {
    publish_with_options(provider, writer, &PublishOptions::default())
}

/// Publish a provider tree to a writer, flushing it.
pub fn publish_with_options<W: Write>(
    provider: &dyn DataProvider,
    writer: W,
    options: &PublishOptions,
) -> Result<()> {
    XmlPublisher::new(writer, options.clone()).publish(provider)?;
    Ok(())
}

/// Publish a provider tree to an XML string.
pub fn to_xml_string(provider: &dyn DataProvider) -> Result<String> {
    to_xml_string_with_options(provider, &PublishOptions::default())
}

/// Publish a provider tree to an XML string using the given options.
pub fn to_xml_string_with_options(
    provider: &dyn DataProvider,
    options: &PublishOptions,
) -> Result<String> {
    let buffer = XmlPublisher::new(Vec::new(), options.clone()).publish(provider)?;
    String::from_utf8(buffer)
        .map_err(|e| PublishError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Publish a provider tree to an XML byte vector.
pub fn to_xml_vec(provider: &dyn DataProvider) -> Result<Vec<u8>> {
    XmlPublisher::new(Vec::new(), PublishOptions::default()).publish(provider)
}

/// Streams one provider tree into a quick-xml writer.
pub struct XmlPublisher<W: Write> {
    writer: Writer<W>,
    options: PublishOptions,
    elements_written: usize,
}

impl<W: Write> XmlPublisher<W> {
    /// Creates a publisher writing to `writer`.
    pub fn new(writer: W, options: PublishOptions) -> Self {
        let writer = if options.indent > 0 {
            Writer::new_with_indent(writer, b' ', options.indent)
        } else {
            Writer::new(writer)
        };
        Self {
            writer,
            options,
            elements_written: 0,
        }
    }

    /// Writes the whole document, flushes the sink and hands it back.
    pub fn publish(mut self, provider: &dyn DataProvider) -> Result<W> {
        debug!(
            provider = provider.type_name(),
            indent = self.options.indent,
            declaration = self.options.xml_declaration,
            "Publishing provider tree"
        );

        if self.options.xml_declaration {
            self.writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        if has_content(provider) {
            self.writer
                .write_event(Event::Start(BytesStart::new(utils::ROOT_ELEMENT)))?;
            self.process_provider(provider)?;
            self.writer
                .write_event(Event::End(BytesEnd::new(utils::ROOT_ELEMENT)))?;
        } else {
            self.writer
                .write_event(Event::Empty(BytesStart::new(utils::ROOT_ELEMENT)))?;
        }

        let elements_written = self.elements_written;
        let mut inner = self.writer.into_inner();
        inner.flush()?;

        debug!(elements = elements_written, "Published provider tree");
        Ok(inner)
    }

    /// Writes a provider into the currently open element.
    ///
    /// Compound providers add no element of their own; their providers are
    /// written in order into the same parent.
    fn process_provider(&mut self, provider: &dyn DataProvider) -> Result<()> {
        if let Some(memory) = provider.as_memory() {
            return self.write_memory_provider(memory);
        }

        if let Some(compound) = provider.as_compound() {
            for child in compound.providers() {
                self.process_provider(child.as_ref())?;
            }
            return Ok(());
        }

        Err(PublishError::UnsupportedProviderType {
            type_name: provider.type_name().to_string(),
        })
    }

    /// Writes the values of one scope: strings, then booleans, then images,
    /// then groups. A key written as a scalar is not written again as a group.
    fn write_memory_provider(&mut self, provider: &MemoryDataProvider) -> Result<()> {
        let mut consumed: HashSet<&str> = HashSet::new();

        for (key, value) in provider.strings() {
            consumed.insert(key);
            self.write_text_element(key, value)?;
        }

        for (key, value) in provider.booleans() {
            consumed.insert(key);
            self.write_text_element(key, utils::bool_to_string(value))?;
        }

        for (key, image) in provider.images() {
            consumed.insert(key);
            let encoded = image
                .open()
                .and_then(utils::encode_base64)
                .map_err(|source| PublishError::ImageRead {
                    key: key.to_string(),
                    source,
                })?;
            trace!(key, encoded_len = encoded.len(), "Encoded image");
            self.write_text_element(key, &encoded)?;
        }

        for (key, children) in provider.groups() {
            if consumed.contains(key) {
                trace!(key, children = children.len(), "Group shadowed by scalar value");
                continue;
            }
            for child in children {
                self.write_group_element(key, child)?;
            }
        }

        Ok(())
    }

    fn write_text_element(&mut self, key: &str, text: &str) -> Result<()> {
        let element = self.start_element(key)?;

        if let Some(character) = utils::find_invalid_char(text) {
            return Err(PublishError::InvalidCharacter {
                key: key.to_string(),
                character,
            });
        }

        if text.is_empty() {
            self.writer.write_event(Event::Empty(element))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(element))?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(utils::escape_text(text))))?;
        self.writer.write_event(Event::End(BytesEnd::new(key)))?;
        Ok(())
    }

    fn write_group_element(&mut self, key: &str, child: &MemoryDataProvider) -> Result<()> {
        let element = self.start_element(key)?;

        if !memory_has_content(child) {
            self.writer.write_event(Event::Empty(element))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(element))?;
        self.write_memory_provider(child)?;
        self.writer.write_event(Event::End(BytesEnd::new(key)))?;
        Ok(())
    }

    fn start_element<'k>(&mut self, key: &'k str) -> Result<BytesStart<'k>> {
        if !utils::is_valid_element_name(key) {
            return Err(PublishError::InvalidElementName {
                key: key.to_string(),
            });
        }
        self.elements_written += 1;
        Ok(BytesStart::new(key))
    }
}

/// True if publishing `provider` writes at least one element.
///
/// Unknown provider types count as content so that the walk reaches them and
/// reports them.
fn has_content(provider: &dyn DataProvider) -> bool {
    if let Some(memory) = provider.as_memory() {
        return memory_has_content(memory);
    }
    if let Some(compound) = provider.as_compound() {
        return compound.providers().iter().any(|child| has_content(child.as_ref()));
    }
    true
}

fn memory_has_content(provider: &MemoryDataProvider) -> bool {
    provider.strings().next().is_some()
        || provider.booleans().next().is_some()
        || provider.images().next().is_some()
        || provider.groups().any(|(_, children)| !children.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = PublishOptions::default();
        assert_eq!(options.indent, 4);
        assert!(options.xml_declaration);
    }

    #[test]
    fn test_memory_has_content() {
        assert!(!memory_has_content(&MemoryDataProvider::new()));
        assert!(memory_has_content(&MemoryDataProvider::new().with_boolean("b", false)));
        assert!(memory_has_content(
            &MemoryDataProvider::new().with_child("g", MemoryDataProvider::new())
        ));
    }

    #[test]
    fn test_empty_compound_has_no_content() {
        let compound = docdata_provider::CompoundDataProvider::new()
            .with(MemoryDataProvider::new())
            .with(docdata_provider::CompoundDataProvider::new());
        assert!(!has_content(&compound));
    }

    #[test]
    fn test_unindented_output() -> Result<()> {
        let provider = MemoryDataProvider::new()
            .with_string("a", "1")
            .with_child("g", MemoryDataProvider::new().with_boolean("b", true));
        let options = PublishOptions::default().indent(0).xml_declaration(false);

        let xml = to_xml_string_with_options(&provider, &options)?;
        assert_eq!(xml, "<data><a>1</a><g><b>true</b></g></data>");
        Ok(())
    }

    #[test]
    fn test_empty_tree_writes_empty_root() -> Result<()> {
        let options = PublishOptions::default().xml_declaration(false);
        let xml = to_xml_string_with_options(&MemoryDataProvider::new(), &options)?;
        assert_eq!(xml, "<data/>");
        Ok(())
    }
}
