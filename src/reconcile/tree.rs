//! Generic attributed-tree normalization
//!
//! Tree-shaped provider documents are parsed into a [`RawTreeNode`] and
//! normalized into a [`NormalizedNode`] before any provider-specific path
//! walking happens. Absent text and attributes are expressed as `None`,
//! never as placeholder values.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::AvgWeatherError;
use crate::Result;

/// One element of a parsed tree document, exactly as the parser saw it
#[derive(Debug, Clone, PartialEq)]
pub struct RawTreeNode {
    pub tag: String,
    pub text: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<RawTreeNode>,
}

/// Normalized form of a tree node, with absence expressed as `None`
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedNode {
    pub tag: String,
    pub text: Option<String>,
    pub attributes: Option<IndexMap<String, String>>,
    pub children: Vec<NormalizedNode>,
}

impl RawTreeNode {
    fn with_tag(tag: String) -> Self {
        Self {
            tag,
            text: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Parse an XML document into a raw tree rooted at its document element.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<RawTreeNode> = Vec::new();
        let mut root: Option<RawTreeNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    stack.push(node_from_start(&start)?);
                }
                Ok(Event::Empty(start)) => {
                    let node = node_from_start(&start)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(text)) => {
                    let value = text
                        .xml_content()
                        .map_err(|e| AvgWeatherError::parse(format!("bad text content: {e}")))?;
                    append_text(&mut stack, value.trim());
                }
                Ok(Event::CData(cdata)) => {
                    let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    append_text(&mut stack, value.trim());
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| AvgWeatherError::parse("unbalanced closing tag"))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(AvgWeatherError::parse(format!("malformed XML: {e}")));
                }
            }
        }

        if !stack.is_empty() {
            return Err(AvgWeatherError::parse("document ended inside an element"));
        }
        root.ok_or_else(|| AvgWeatherError::parse("document has no root element"))
    }
}

fn node_from_start(start: &BytesStart<'_>) -> Result<RawTreeNode> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = RawTreeNode::with_tag(tag);
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|e| AvgWeatherError::parse(format!("bad attribute: {e}")))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| AvgWeatherError::parse(format!("bad attribute value: {e}")))?
            .into_owned();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn append_text(stack: &mut [RawTreeNode], value: &str) {
    if value.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        match &mut parent.text {
            Some(existing) => existing.push_str(value),
            None => parent.text = Some(value.to_string()),
        }
    }
}

fn attach(
    stack: &mut Vec<RawTreeNode>,
    root: &mut Option<RawTreeNode>,
    node: RawTreeNode,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    } else {
        return Err(AvgWeatherError::parse("multiple root elements"));
    }
    Ok(())
}

/// Normalize a raw tree into the canonical node shape.
///
/// Pure recursive transform, one call per node; a childless node with no
/// text and no attributes yields an entry whose children sequence is empty
/// and whose text and attributes are absent.
#[must_use]
pub fn normalize(node: RawTreeNode) -> NormalizedNode {
    let attributes = if node.attributes.is_empty() {
        None
    } else {
        Some(node.attributes)
    };
    let text = node.text.filter(|t| !t.is_empty());
    NormalizedNode {
        tag: node.tag,
        text,
        attributes,
        children: node.children.into_iter().map(normalize).collect(),
    }
}

impl NormalizedNode {
    /// First child with the given tag
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&NormalizedNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// First descendant along a path of tags, one tag per level
    #[must_use]
    pub fn descend(&self, path: &[&str]) -> Option<&NormalizedNode> {
        path.iter().try_fold(self, |node, tag| node.find(tag))
    }

    /// Attribute value, when attributes are present and the name is set
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|a| a.get(name))
            .map(String::as_str)
    }

    /// All children with the given tag, in document order
    pub fn children_named<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a NormalizedNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}
