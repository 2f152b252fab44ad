//! Owned, mutable XML element tree.
//!
//! `roxmltree` gives a fast read-only DOM; patching needs to remove and
//! append elements in place, so the parsed document is copied into this
//! small owned representation once and mutated from there.

use roxmltree::{Document, Node as RoNode, NodeType};

use crate::error::Result;

/// A child node of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An XML element with its attributes and children in document order.
///
/// Names are stored as written in the source, including any namespace
/// prefix (`gz:plugin`). Matching is purely by this string.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter, mostly for tests.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child appender, mostly for tests.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Concatenated direct text content, if any.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .children
            .iter()
            .filter_map(|child| match child {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Replace all direct text content with `text`.
    ///
    /// The new text node goes where the first text node was, or first
    /// if there was none.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let position = self
            .children
            .iter()
            .position(|child| matches!(child, Node::Text(_)))
            .unwrap_or(0);
        self.children.retain(|child| !matches!(child, Node::Text(_)));
        let position = position.min(self.children.len());
        self.children.insert(position, Node::Text(text.into()));
    }

    /// Iterate over element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate mutably over element children.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|child| match child {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Append a new empty child element and return it.
    pub fn append_child(&mut self, name: &str) -> &mut Element {
        self.children.push(Node::Element(Element::new(name)));
        match self.children.last_mut() {
            Some(Node::Element(e)) => e,
            _ => unreachable!("an element was just pushed"),
        }
    }

    /// Remove every direct child element named `name`, returning how many were removed.
    pub fn remove_children(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|child| !matches!(child, Node::Element(e) if e.name == name));
        before - self.children.len()
    }
}

/// A parsed document: the root element plus any comments around it.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub prolog: Vec<String>,
    pub root: Element,
    pub epilog: Vec<String>,
}

impl XmlDocument {
    /// Parse XML text into an owned tree.
    ///
    /// Whitespace-only text is discarded so the writer can re-indent
    /// canonically. Processing instructions and DTDs are not retained.
    ///
    /// # Examples
    /// ```
    /// use sdf_friction::xml::XmlDocument;
    ///
    /// let doc = XmlDocument::parse(r#"<sdf version="1.9"><model name="m"/></sdf>"#).unwrap();
    /// assert_eq!(doc.root.name, "sdf");
    /// assert_eq!(doc.root.attribute("version"), Some("1.9"));
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let root_node = doc.root_element();

        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut seen_root = false;
        for node in doc.root().children() {
            if node == root_node {
                seen_root = true;
            } else if node.is_comment() {
                let comment = node.text().unwrap_or_default().to_string();
                if seen_root {
                    epilog.push(comment);
                } else {
                    prolog.push(comment);
                }
            }
        }

        Ok(Self {
            prolog,
            root: convert_element(root_node),
            epilog,
        })
    }
}

fn convert_element(node: RoNode<'_, '_>) -> Element {
    let tag = node.tag_name();
    let mut element = Element::new(qualified_name(node, tag.namespace(), tag.name()));

    // Only declarations new to this element; inherited ones come from ancestors.
    let inherited = node.parent_element();
    for ns in node.namespaces() {
        let declared_above = inherited.is_some_and(|parent| {
            parent
                .namespaces()
                .any(|p| p.name() == ns.name() && p.uri() == ns.uri())
        });
        if declared_above || ns.name() == Some("xml") {
            continue;
        }
        let key = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        element.attributes.push((key, ns.uri().to_string()));
    }

    for attr in node.attributes() {
        let name = qualified_name(node, attr.namespace(), attr.name());
        element.attributes.push((name, attr.value().to_string()));
    }

    for child in node.children() {
        match child.node_type() {
            NodeType::Element => element.children.push(Node::Element(convert_element(child))),
            NodeType::Text => {
                if let Some(text) = child.text() {
                    if !text.trim().is_empty() {
                        element.children.push(Node::Text(text.to_string()));
                    }
                }
            }
            NodeType::Comment => {
                let comment = child.text().unwrap_or_default();
                element.children.push(Node::Comment(comment.to_string()));
            }
            NodeType::PI | NodeType::Root => {}
        }
    }

    element
}

/// Rebuild `prefix:local` from a resolved namespace URI.
fn qualified_name(node: RoNode<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    let prefix = namespace.and_then(|uri| {
        if uri == roxmltree::NS_XML_URI {
            Some("xml")
        } else {
            node.lookup_prefix(uri)
        }
    });
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}
