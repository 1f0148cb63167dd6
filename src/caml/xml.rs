//! Minimal element tree for emission and lookup helpers for parsed documents.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::foundation::error::{CamlError, CamlResult};

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct XmlElement {
    pub(crate) name: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<XmlElement>,
}

impl XmlElement {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub(crate) fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub(crate) fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Push `child` only when it has children of its own.
    pub(crate) fn push_non_empty(&mut self, child: XmlElement) {
        if !child.children.is_empty() {
            self.children.push(child);
        }
    }
}

/// Serialize `root` with an XML declaration and `indent`-space indentation.
pub(crate) fn write_document(
    root: &XmlElement,
    indent: usize,
    banner: Option<&str>,
) -> CamlResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| CamlError::xml(format!("write declaration: {e}")))?;
    if let Some(banner) = banner {
        let text = format!(" {} ", banner.replace("--", "-"));
        writer
            .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
            .map_err(|e| CamlError::xml(format!("write banner: {e}")))?;
    }
    write_element(&mut writer, root)?;

    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|e| CamlError::xml(format!("output is not UTF-8: {e}")))?;
    out.push('\n');
    Ok(out)
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &XmlElement) -> CamlResult<()> {
    let mut start = BytesStart::new(el.name.as_str());
    for (k, v) in &el.attrs {
        start.push_attribute((k.as_str(), v.as_str()));
    }
    let result = if el.children.is_empty() {
        writer.write_event(Event::Empty(start))
    } else {
        writer.write_event(Event::Start(start))
    };
    result.map_err(|e| CamlError::xml(format!("write <{}>: {e}", el.name)))?;

    if el.children.is_empty() {
        return Ok(());
    }
    for child in &el.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(el.name.as_str())))
        .map_err(|e| CamlError::xml(format!("write </{}>: {e}", el.name)))
}

pub(crate) type Node<'a, 'input> = roxmltree::Node<'a, 'input>;

/// First element child with the given local name.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

pub(crate) fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |c| c.is_element() && c.tag_name().name() == name)
}

pub(crate) fn element_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(|c| c.is_element())
}

#[cfg(test)]
#[path = "../../tests/unit/caml/xml.rs"]
mod tests;
