//! XML reader building a [`RawElement`] tree with quick-xml.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::{DecodeError, Result};
use crate::raw::RawElement;

/// Deepest element nesting accepted; the decoders and validators walk the
/// tree recursively.
pub const MAX_DEPTH: usize = 512;

/// Read and parse an XML file.
pub fn parse_file(path: &Path) -> Result<RawElement> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let xml = String::from_utf8(bytes)
        .map_err(|error| DecodeError::malformed(format!("input is not UTF-8: {error}")))?;
    parse_str(&xml)
}

/// Parse an XML document held in memory.
///
/// Fails on ill-formed markup, on an empty document, on unclosed elements,
/// on more than one root element and on nesting deeper than [`MAX_DEPTH`].
pub fn parse_str(xml: &str) -> Result<RawElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<RawElement> = Vec::new();
    let mut root: Option<RawElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(DecodeError::malformed(format!(
                        "element nesting deeper than {MAX_DEPTH}"
                    )));
                }
                stack.push(element_from(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DecodeError::malformed("closing tag without an open element"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let raw = std::str::from_utf8(&text)
                    .map_err(|error| DecodeError::malformed(error.to_string()))?;
                append_text(&mut stack, &unescape(raw).map_err(quick_xml::Error::from)?);
            }
            Event::GeneralRef(reference) => {
                append_text(&mut stack, &resolve_reference(&reference)?);
            }
            Event::CData(data) => {
                let raw = std::str::from_utf8(&data)
                    .map_err(|error| DecodeError::malformed(error.to_string()))?;
                append_text(&mut stack, raw);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DecodeError::malformed(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| DecodeError::malformed("document has no root element"))
}

fn element_from(start: &BytesStart<'_>) -> Result<RawElement> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut element = RawElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = unescape(&raw).map_err(quick_xml::Error::from)?;
        element.attributes.insert(key, value.into_owned());
    }
    Ok(element)
}

/// Character references and the five predefined entities; anything else
/// would need a DTD.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(character) = reference.resolve_char_ref()? {
        return Ok(character.to_string());
    }
    let name = reference.decode().map_err(quick_xml::Error::from)?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| DecodeError::malformed(format!("unknown entity &{name};")))
}

fn attach(
    stack: &mut [RawElement],
    root: &mut Option<RawElement>,
    element: RawElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(DecodeError::malformed(format!(
            "second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(stack: &mut [RawElement], text: &str) {
    let Some(current) = stack.last_mut() else {
        return;
    };
    if text.is_empty() {
        return;
    }
    match &mut current.text {
        Some(existing) => existing.push_str(text),
        None => current.text = Some(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree_with_attributes() {
        let root = parse_str(
            r#"<?xml version="1.0"?>
            <ClinicalDocument xmlns="urn:hl7-org:v3" xmlns:sdtc="urn:hl7-org:sdtc">
              <templateId root="2.16.840.1.113883.10.20.27.1.1" extension="2017-06-01"/>
              <sdtc:title>Report &amp; more</sdtc:title>
              <component><section/></component>
            </ClinicalDocument>"#,
        )
        .expect("parse");
        assert_eq!(root.name, "ClinicalDocument");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[1].name, "title");
        assert_eq!(
            root.descend_attribute(&["templateId"], "extension"),
            Some("2017-06-01")
        );
        assert!(root.descend(&["component", "section"]).is_some());
        assert_eq!(root.attribute("xmlns"), Some("urn:hl7-org:v3"));
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        assert!(parse_str("<a><b></a>").is_err());
    }

    #[test]
    fn unclosed_document_is_malformed() {
        let error = parse_str("<a><b/>").unwrap_err();
        assert!(error.to_string().contains("unexpected end of document"));
    }

    #[test]
    fn empty_and_multi_root_documents_are_rejected() {
        assert!(parse_str("").is_err());
        assert!(parse_str("just some text").is_err());
        assert!(parse_str("<a/><b/>").is_err());
    }

    fn nested(depth: usize) -> String {
        format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth))
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        let mut element = &parse_str(&nested(MAX_DEPTH)).expect("parse");
        let mut depth = 1;
        while let Some(child) = element.children.first() {
            element = child;
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
    }

    #[test]
    fn nesting_past_the_limit_is_malformed() {
        let error = parse_str(&nested(MAX_DEPTH + 1)).unwrap_err();
        assert!(error.to_string().contains("element nesting deeper than 512"));

        let error = parse_str(&nested(100_000)).unwrap_err();
        assert!(error.to_string().contains("element nesting deeper than"));
    }
}
