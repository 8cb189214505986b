//! Render tree shared by every primitive
//!
//! Primitives build an owned tree of [`Element`]s instead of writing markup
//! directly, so callers (and tests) can inspect the output structurally and
//! serialize it once at the end. Serialization escapes text and attribute
//! values; attribute order is insertion order.

use std::fmt::Write as _;

/// A child of an [`Element`]
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_markup(out),
            Node::Text(text) => escape_into(out, text),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// A markup element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value with the same name
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set an attribute only when `value` is present
    pub fn attr_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set a numeric attribute using compact number formatting
    pub fn num(self, name: impl Into<String>, value: f64) -> Self {
        self.attr(name, fmt_num(value))
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parse a numeric attribute written with [`Element::num`]
    pub fn num_attr(&self, name: &str) -> Option<f64> {
        self.get_attr(name).and_then(|v| v.parse().ok())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Depth-first, pre-order iterator over descendant elements (excluding self)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub fn find_by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.has_class(class))
    }

    pub fn find_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.tag == tag)
    }

    /// Serialize to markup
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"", name);
            escape_into(out, value);
            out.push('"');
        }
        if self.children.is_empty() && is_void(&self.tag) {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Iterator returned by [`Element::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Node::Element(element) = node {
                self.stack.extend(element.children.iter().rev());
                return Some(element);
            }
        }
        None
    }
}

// SVG shapes self-close; HTML containers always get an end tag.
fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "line" | "path" | "rect" | "circle" | "polygon" | "polyline" | "ellipse" | "use" | "br"
    )
}

/// Escape text for use in element content or a double-quoted attribute
pub fn escape_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

/// Format a coordinate: integers without a fraction, otherwise at most two decimals
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{:.2}", rounded);
        s.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let el = Element::new("div")
            .attr("class", "box")
            .child(Element::new("span").text("a < b"));
        assert_eq!(
            el.to_markup(),
            "<div class=\"box\"><span>a &lt; b</span></div>"
        );
    }

    #[test]
    fn test_svg_shapes_self_close() {
        let line = Element::new("line").num("x1", 0.0).num("x2", 12.5);
        assert_eq!(line.to_markup(), "<line x1=\"0\" x2=\"12.5\"/>");
        assert_eq!(Element::new("div").to_markup(), "<div></div>");
    }

    #[test]
    fn test_attr_replaces_existing() {
        let el = Element::new("g").attr("class", "a").attr("class", "b");
        assert_eq!(el.get_attr("class"), Some("b"));
        assert_eq!(el.to_markup(), "<g class=\"b\"></g>");
    }

    #[test]
    fn test_escape_attribute_quotes() {
        let el = Element::new("text").attr("aria-label", "say \"hi\" & 'bye'");
        assert!(el
            .to_markup()
            .contains("say &quot;hi&quot; &amp; &#39;bye&#39;"));
    }

    #[test]
    fn test_descendants_preorder() {
        let el = Element::new("root")
            .child(Element::new("a").child(Element::new("b")))
            .child(Element::new("c"));
        let tags: Vec<_> = el.descendants().map(|e| e.tag().to_string()).collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_find_by_class_and_text() {
        let el = Element::new("g")
            .child(Element::new("text").attr("class", "label big").text("req"))
            .child(Element::new("text").attr("class", "other").text("x"));
        let found: Vec<_> = el.find_by_class("label").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text_content(), "req");
        assert_eq!(el.text_content(), "reqx");
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(50.0), "50");
        assert_eq!(fmt_num(-3.0), "-3");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(1.005), "1");
        assert_eq!(fmt_num(2.346), "2.35");
        assert_eq!(fmt_num(f64::NAN), "0");
    }
}
