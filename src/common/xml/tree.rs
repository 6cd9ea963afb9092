//! Lightweight namespace-aware element tree.
//!
//! Parts are small enough to hold in memory, and the extractors need to
//! compare the encounter order of different element kinds (a heading
//! paragraph versus the next table), so each element records its preorder
//! position. Only elements, attributes and character data are kept.
use super::escape::{resolve_reference, unescape_xml};
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// The `xml:` prefix is bound implicitly.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A parsed XML part.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: XmlElement,
}

/// One element with resolved namespace, attributes and ordered children.
#[derive(Debug, Clone)]
pub struct XmlElement {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
    position: usize,
}

/// A namespace-resolved attribute.
#[derive(Debug, Clone)]
pub struct XmlAttribute {
    namespace: Option<String>,
    local_name: String,
    value: String,
}

/// Child content of an element.
#[derive(Debug, Clone)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// Namespace declarations introduced by one element.
type Scope = Vec<(String, String)>;

impl XmlDocument {
    /// Parse one XML part.
    ///
    /// `part` only labels errors. Any syntax error, unbalanced tag or
    /// non-UTF-8 content yields [`Error::MalformedXml`].
    pub fn parse(part: &str, bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        // Leading and trailing spaces in w:t are significant
        reader.config_mut().trim_text(false);

        let mut buf = Vec::with_capacity(1024);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut scopes: Vec<Scope> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut position = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let element = open_element(part, e, &mut scopes, position)?;
                    position += 1;
                    stack.push(element);
                },
                Ok(Event::Empty(ref e)) => {
                    let element = open_element(part, e, &mut scopes, position)?;
                    position += 1;
                    scopes.pop();
                    attach(part, &mut stack, &mut root, element)?;
                },
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::malformed(part, "unexpected closing tag"))?;
                    scopes.pop();
                    attach(part, &mut stack, &mut root, element)?;
                },
                Ok(Event::Text(ref e)) => {
                    let raw = std::str::from_utf8(e.as_ref())
                        .map_err(|err| Error::malformed(part, err))?;
                    push_text(&mut stack, &unescape_xml(raw));
                },
                Ok(Event::CData(ref e)) => {
                    let raw = std::str::from_utf8(e.as_ref())
                        .map_err(|err| Error::malformed(part, err))?;
                    push_text(&mut stack, raw);
                },
                Ok(Event::GeneralRef(ref e)) => {
                    let name = std::str::from_utf8(e.as_ref())
                        .map_err(|err| Error::malformed(part, err))?;
                    match resolve_reference(name) {
                        Some(ch) => push_text(&mut stack, ch.encode_utf8(&mut [0u8; 4])),
                        None => push_text(&mut stack, &format!("&{};", name)),
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::malformed(part, e)),
                _ => {},
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(Error::malformed(
                part,
                format!("unclosed element <{}>", open.local_name),
            ));
        }

        root.map(|root| XmlDocument { root })
            .ok_or_else(|| Error::malformed(part, "no root element"))
    }

    /// The document element.
    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

fn open_element(
    part: &str,
    start: &BytesStart<'_>,
    scopes: &mut Vec<Scope>,
    position: usize,
) -> Result<XmlElement> {
    let mut declarations: Scope = Vec::new();
    let mut raw_attributes: Vec<(String, String)> = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::malformed(part, e))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| Error::malformed(part, e))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::malformed(part, e))?
            .into_owned();

        if key == "xmlns" {
            declarations.push((String::new(), value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declarations.push((prefix.to_string(), value));
        } else {
            raw_attributes.push((key, value));
        }
    }
    scopes.push(declarations);

    let qname = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| Error::malformed(part, e))?
        .to_string();
    let (prefix, local_name) = split_qname(&qname);
    let namespace = resolve_prefix(scopes, prefix.unwrap_or(""));

    let attributes = raw_attributes
        .into_iter()
        .map(|(key, value)| {
            let (prefix, local) = split_qname(&key);
            // Unprefixed attributes are in no namespace
            let namespace = prefix.and_then(|p| resolve_prefix(scopes, p));
            XmlAttribute {
                namespace,
                local_name: local.to_string(),
                value,
            }
        })
        .collect();

    Ok(XmlElement {
        namespace,
        local_name: local_name.to_string(),
        attributes,
        children: Vec::new(),
        position,
    })
}

fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

fn resolve_prefix(scopes: &[Scope], prefix: &str) -> Option<String> {
    if prefix == "xml" {
        return Some(XML_NAMESPACE.to_string());
    }
    scopes
        .iter()
        .rev()
        .flat_map(|scope| scope.iter())
        .find(|(declared, _)| declared == prefix)
        .map(|(_, uri)| uri.clone())
        .filter(|uri| !uri.is_empty())
}

fn attach(
    part: &str,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        },
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        },
        None => Err(Error::malformed(part, "multiple root elements")),
    }
}

fn push_text(stack: &mut [XmlElement], text: &str) {
    // Whitespace around the root element is not content
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(XmlNode::Text(previous)) = parent.children.last_mut() {
        previous.push_str(text);
    } else {
        parent.children.push(XmlNode::Text(text.to_string()));
    }
}

impl XmlElement {
    /// Local name without prefix.
    #[inline]
    pub fn name(&self) -> &str {
        &self.local_name
    }

    /// Resolved namespace URI, if the element is in a namespace.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Preorder index of this element within its document.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check the namespace URI and local name.
    #[inline]
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == Some(namespace)
    }

    /// Look up an attribute by namespace URI (`None` for unprefixed) and local name.
    pub fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == local_name && a.namespace.as_deref() == namespace)
            .map(|a| a.value.as_str())
    }

    /// Look up an attribute by local name in any namespace.
    pub fn attribute_local(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Ordered child nodes.
    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given namespace and local name.
    pub fn child(&self, namespace: &str, local_name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.is(namespace, local_name))
    }

    /// All descendant elements in preorder, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&XmlElement> = self.child_elements().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// Character data of direct text children.
    pub fn direct_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Character data of the whole subtree, concatenated without separators.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for node in &element.children {
        match node {
            XmlNode::Text(t) => out.push_str(t),
            XmlNode::Element(e) => collect_text(e, out),
        }
    }
}

/// Preorder iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(next.child_elements());
        self.stack[start..].reverse();
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    #[test]
    fn test_parse_resolves_namespaces() {
        let xml = br#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
                <w:body><w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr></w:p></w:body>
            </w:document>"#;

        let doc = XmlDocument::parse("word/document.xml", xml).unwrap();
        assert!(doc.root().is(W, "document"));

        let style = doc
            .root()
            .descendants()
            .find(|e| e.is(W, "pStyle"))
            .unwrap();
        assert_eq!(style.attribute(Some(W), "val"), Some("Heading1"));
        assert_eq!(style.attribute(None, "val"), None);
        assert_eq!(style.attribute_local("val"), Some("Heading1"));
    }

    #[test]
    fn test_text_keeps_spaces_and_entities() {
        let xml = br#"<r xmlns="urn:x"><t xml:space="preserve"> R&amp;D &#x2013; plan </t></r>"#;
        let doc = XmlDocument::parse("part.xml", xml).unwrap();
        let t = doc.root().child("urn:x", "t").unwrap();
        assert_eq!(t.text(), " R&D \u{2013} plan ");
        assert_eq!(
            t.attribute(Some(XML_NAMESPACE), "space"),
            Some("preserve")
        );
    }

    #[test]
    fn test_positions_follow_document_order() {
        let xml = br#"<a><b><c/></b><d/></a>"#;
        let doc = XmlDocument::parse("part.xml", xml).unwrap();
        let names: Vec<(&str, usize)> = doc
            .root()
            .descendants()
            .map(|e| (e.name(), e.position()))
            .collect();
        assert_eq!(names, vec![("b", 1), ("c", 2), ("d", 3)]);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let err = XmlDocument::parse("word/document.xml", b"<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::MalformedXml { ref part, .. } if part == "word/document.xml"));

        assert!(XmlDocument::parse("x.xml", b"<a><b>").is_err());
        assert!(XmlDocument::parse("x.xml", b"").is_err());
    }
}
