//! In-memory element tree — the host surface a slider mounts into.
//!
//! Elements live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Removing an element from its parent only detaches it; the
//! arena slot stays valid so stale ids never alias a different element.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

use thiserror::Error;

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Elements serialized without a closing tag.
const VOID_TAGS: [&str; 4] = ["input", "br", "hr", "img"];

/// A single element: tag, identity, classes, attributes, inline style, text.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more whitespace-separated class tokens.
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed element tree with a single `body` root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` was allocated by this document.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    /// Allocate a detached element. Any parent/children set on `element` are discarded.
    pub fn create(&mut self, mut element: Element) -> NodeId {
        element.parent = None;
        element.children.clear();
        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        id
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(Element::parent);
        }
        false
    }

    /// Detach `node` from its parent, if it has one.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(Element::parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(n) = self.get_mut(node) {
            n.parent = None;
        }
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns false (and changes nothing) when either id is unknown or the
    /// move would make `child` its own ancestor.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.is_inclusive_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        true
    }

    /// Detach every current child of `parent`, then append `children` in order.
    pub fn replace_children(&mut self, parent: NodeId, children: &[NodeId]) {
        let Some(old) = self.get(parent).map(|p| p.children.clone()) else {
            return;
        };
        for child in old {
            self.detach(child);
        }
        for &child in children {
            self.append_child(parent, child);
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            if !el.has_class(class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attribute(name))
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.style.insert(property.to_string(), value.into());
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.style(property))
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.text = text.into();
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(Element::text)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(Element::children).unwrap_or(&[])
    }

    /// Descendants of `scope` in document (pre-)order, excluding `scope` itself.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// First element in the whole document matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector: Selector = selector.parse()?;
        if selector.matches(self, self.root) {
            return Ok(Some(self.root));
        }
        let found = self.select_within(self.root, &selector).next();
        Ok(found)
    }

    /// First descendant of `scope` matching `selector`.
    pub fn query_selector_within(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        let selector: Selector = selector.parse()?;
        let found = self.select_within(scope, &selector).next();
        Ok(found)
    }

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let selector: Selector = selector.parse()?;
        let found = self.select_within(scope, &selector).collect();
        Ok(found)
    }

    fn select_within<'a>(
        &'a self,
        scope: NodeId,
        selector: &'a Selector,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(scope)
            .into_iter()
            .filter(move |&id| selector.matches(self, id))
    }

    /// Serialize `node` and its subtree as HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, 0, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(el) = self.get(node) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", el.tag);
        if let Some(id) = &el.id {
            let _ = write!(out, " id=\"{}\"", escape(id));
        }
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&el.classes.join(" ")));
        }
        for (name, value) in &el.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
        if !el.style.is_empty() {
            let style = el
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        out.push('>');
        if VOID_TAGS.contains(&el.tag.as_str()) {
            out.push('\n');
            return;
        }
        if el.children.is_empty() {
            let _ = writeln!(out, "{}</{}>", escape(&el.text), el.tag);
            return;
        }
        out.push('\n');
        if !el.text.is_empty() {
            let _ = writeln!(out, "{indent}  {}", escape(&el.text));
        }
        for &child in &el.children {
            self.write_html(child, depth + 1, out);
        }
        let _ = writeln!(out, "{indent}</{}>", el.tag);
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ─── Selectors ───────────────────────────────────────────────────────

/// Errors from parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character '{ch}' in selector \"{selector}\"")]
    UnexpectedChar { ch: char, selector: String },
    #[error("missing name after '{prefix}' in selector \"{selector}\"")]
    MissingName { prefix: char, selector: String },
}

/// One compound selector, e.g. `div.rs-track#main`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c))
    }
}

/// Compound selectors joined by descendant combinators (whitespace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(token: &str, selector: &str) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let mut chars = token.chars().peekable();

    if chars.peek() == Some(&'*') {
        chars.next();
    } else {
        let tag: String = std::iter::from_fn(|| chars.next_if(|&c| is_name_char(c))).collect();
        if !tag.is_empty() {
            compound.tag = Some(tag);
        }
    }

    while let Some(prefix) = chars.next() {
        if prefix != '#' && prefix != '.' {
            return Err(SelectorError::UnexpectedChar {
                ch: prefix,
                selector: selector.to_string(),
            });
        }
        let name: String = std::iter::from_fn(|| chars.next_if(|&c| is_name_char(c))).collect();
        if name.is_empty() {
            return Err(SelectorError::MissingName {
                prefix,
                selector: selector.to_string(),
            });
        }
        if prefix == '#' {
            compound.id = Some(name);
        } else {
            compound.classes.push(name);
        }
    }
    Ok(compound)
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_whitespace()
            .map(|token| parse_compound(token, s))
            .collect::<Result<Vec<_>, _>>()?;
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { parts })
    }
}

impl Selector {
    /// Right-to-left match: the last compound against `node`, the rest against ancestors.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        let Some(el) = doc.get(node) else {
            return false;
        };
        if !last.matches(el) {
            return false;
        }
        let mut ancestor = el.parent;
        for compound in rest.iter().rev() {
            loop {
                let Some(id) = ancestor else {
                    return false;
                };
                let Some(a) = doc.get(id) else {
                    return false;
                };
                ancestor = a.parent;
                if compound.matches(a) {
                    break;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let main = doc.create(Element::new("main").with_class("host"));
        let slot = doc.create(Element::new("section").with_id("range").with_class("slot wide"));
        let span = doc.create(Element::new("span").with_class("label").with_text("Price"));
        doc.append_child(doc.root(), main);
        doc.append_child(main, slot);
        doc.append_child(slot, span);
        (doc, main, slot, span)
    }

    #[test]
    fn selector_by_id_class_and_tag() {
        let (doc, main, slot, span) = sample();
        assert_eq!(doc.query_selector("#range").unwrap(), Some(slot));
        assert_eq!(doc.query_selector(".host").unwrap(), Some(main));
        assert_eq!(doc.query_selector("span").unwrap(), Some(span));
        assert_eq!(doc.query_selector("section.slot.wide#range").unwrap(), Some(slot));
        assert_eq!(doc.query_selector("body").unwrap(), Some(doc.root()));
        assert_eq!(doc.query_selector("#missing").unwrap(), None);
    }

    #[test]
    fn descendant_combinator() {
        let (doc, _, slot, span) = sample();
        assert_eq!(doc.query_selector("main .label").unwrap(), Some(span));
        assert_eq!(doc.query_selector("body #range span").unwrap(), Some(span));
        assert_eq!(doc.query_selector(".label main").unwrap(), None);
        assert_eq!(doc.query_selector_within(slot, "span").unwrap(), Some(span));
        assert_eq!(doc.query_selector_within(span, "span").unwrap(), None);
    }

    #[test]
    fn query_all_in_document_order() {
        let (mut doc, main, slot, span) = sample();
        let second = doc.create(Element::new("span").with_class("label"));
        doc.append_child(main, second);
        assert_eq!(doc.query_selector_all(doc.root(), ".label").unwrap(), vec![span, second]);
        assert_eq!(doc.query_selector_all(slot, ".label").unwrap(), vec![span]);
        assert!(doc.query_selector_all(span, "span").unwrap().is_empty());
        assert!(doc.query_selector_all(main, "").is_err());
    }

    #[test]
    fn invalid_selectors() {
        let doc = Document::new();
        assert_eq!(doc.query_selector("   "), Err(SelectorError::Empty));
        assert!(matches!(
            doc.query_selector("div > span"),
            Err(SelectorError::UnexpectedChar { ch: '>', .. })
        ));
        assert!(matches!(
            doc.query_selector("#"),
            Err(SelectorError::MissingName { prefix: '#', .. })
        ));
    }

    #[test]
    fn replace_children_detaches_previous_content() {
        let (mut doc, _, slot, span) = sample();
        let fresh = doc.create(Element::new("div"));
        doc.replace_children(slot, &[fresh]);
        assert_eq!(doc.children(slot), &[fresh]);
        assert_eq!(doc.get(span).unwrap().parent(), None);
        assert_eq!(doc.query_selector(".label").unwrap(), None);
    }

    #[test]
    fn append_rejects_cycles() {
        let (mut doc, main, slot, _) = sample();
        assert!(!doc.append_child(slot, main));
        assert!(!doc.append_child(main, main));
        assert_eq!(doc.get(slot).unwrap().parent(), Some(main));
    }

    #[test]
    fn class_and_style_mutation() {
        let (mut doc, _, slot, _) = sample();
        doc.add_class(slot, "active");
        doc.add_class(slot, "active");
        assert_eq!(doc.get(slot).unwrap().classes().len(), 3);
        doc.remove_class(slot, "active");
        assert!(!doc.has_class(slot, "active"));
        doc.set_style(slot, "left", "25%");
        assert_eq!(doc.style(slot, "left"), Some("25%"));
    }

    #[test]
    fn html_serialization() {
        let mut doc = Document::new();
        let div = doc.create(Element::new("div").with_class("a b").with_text("x < y"));
        let input = doc.create(Element::new("input").with_attribute("type", "range"));
        doc.append_child(doc.root(), div);
        doc.append_child(doc.root(), input);
        doc.set_style(div, "width", "50%");
        let html = doc.to_html(doc.root());
        assert_eq!(
            html,
            "<body>\n  <div class=\"a b\" style=\"width: 50%\">x &lt; y</div>\n  <input type=\"range\">\n</body>\n"
        );
    }
}
