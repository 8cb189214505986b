//! Variant-colored entity boxes
//!
//! A `FlowNode` is one box in a flow diagram: a database, a connector, a
//! Kafka cluster. Each variant maps to exactly one style bundle. A node with
//! a click handler behaves like a button (focusable, `Enter`/`Space`
//! activate it); a node without one is decoration and stays out of the tab
//! order unless the caller overrides `tab_index`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::core::{Component, Element, Key, Node};

/// Semantic category of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeVariant {
    /// Source database (PostgreSQL)
    #[default]
    Database,
    /// Capture process (Debezium connector)
    Connector,
    /// Broker cluster (Kafka)
    Cluster,
    /// Downstream consumer writing somewhere else
    Sink,
    /// Application producing or consuming events
    App,
    /// Final destination store (warehouse, search index)
    Target,
}

/// Colors for one node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub fill: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

impl NodeVariant {
    pub const ALL: [NodeVariant; 6] = [
        NodeVariant::Database,
        NodeVariant::Connector,
        NodeVariant::Cluster,
        NodeVariant::Sink,
        NodeVariant::App,
        NodeVariant::Target,
    ];

    pub fn style(&self) -> NodeStyle {
        match self {
            NodeVariant::Database => NodeStyle {
                fill: "#dbeafe",
                border: "#3b82f6",
                text: "#1e3a8a",
            },
            NodeVariant::Connector => NodeStyle {
                fill: "#ede9fe",
                border: "#8b5cf6",
                text: "#4c1d95",
            },
            NodeVariant::Cluster => NodeStyle {
                fill: "#ffedd5",
                border: "#f97316",
                text: "#7c2d12",
            },
            NodeVariant::Sink => NodeStyle {
                fill: "#dcfce7",
                border: "#22c55e",
                text: "#14532d",
            },
            NodeVariant::App => NodeStyle {
                fill: "#f1f5f9",
                border: "#64748b",
                text: "#0f172a",
            },
            NodeVariant::Target => NodeStyle {
                fill: "#d1fae5",
                border: "#10b981",
                text: "#064e3b",
            },
        }
    }
}

impl fmt::Display for NodeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeVariant::Database => write!(f, "database"),
            NodeVariant::Connector => write!(f, "connector"),
            NodeVariant::Cluster => write!(f, "cluster"),
            NodeVariant::Sink => write!(f, "sink"),
            NodeVariant::App => write!(f, "app"),
            NodeVariant::Target => write!(f, "target"),
        }
    }
}

/// Size class of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl NodeSize {
    /// (vertical padding, horizontal padding, font size) in pixels
    pub fn metrics(&self) -> (u32, u32, u32) {
        match self {
            NodeSize::Sm => (4, 8, 12),
            NodeSize::Md => (8, 16, 14),
            NodeSize::Lg => (12, 24, 16),
        }
    }
}

impl fmt::Display for NodeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeSize::Sm => write!(f, "sm"),
            NodeSize::Md => write!(f, "md"),
            NodeSize::Lg => write!(f, "lg"),
        }
    }
}

/// Callback invoked when an interactive node is activated
pub type ClickHandler = Rc<dyn Fn()>;

/// A styled box for one diagram entity
#[derive(Clone, Default)]
pub struct FlowNode {
    pub variant: NodeVariant,
    pub size: NodeSize,
    pub children: Vec<Node>,
    pub aria_label: Option<String>,
    pub tab_index: Option<i32>,
    on_click: Option<ClickHandler>,
}

impl fmt::Debug for FlowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowNode")
            .field("variant", &self.variant)
            .field("size", &self.size)
            .field("children", &self.children)
            .field("aria_label", &self.aria_label)
            .field("tab_index", &self.tab_index)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

impl FlowNode {
    pub fn new(variant: NodeVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn size(mut self, size: NodeSize) -> Self {
        self.size = size;
        self
    }

    /// Append plain-text label content
    pub fn label(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.on_click.is_some()
    }

    /// Tab index the node exposes, if any
    pub fn effective_tab_index(&self) -> Option<i32> {
        match (self.tab_index, self.is_interactive()) {
            (Some(index), _) => Some(index),
            (None, true) => Some(0),
            (None, false) => None,
        }
    }

    /// Pointer activation; returns whether a handler ran
    pub fn click(&self) -> bool {
        match &self.on_click {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Keyboard activation; `Enter` and `Space` behave like a click
    pub fn handle_key(&self, key: Key) -> bool {
        key.is_activation() && self.click()
    }
}

impl Component for FlowNode {
    fn render(&self) -> Element {
        let style = self.variant.style();
        let (pad_y, pad_x, font) = self.size.metrics();
        let css = format!(
            "background:{};border:2px solid {};color:{};padding:{}px {}px;font-size:{}px;border-radius:8px;text-align:center",
            style.fill, style.border, style.text, pad_y, pad_x, font
        );

        let mut el = Element::new("div")
            .attr(
                "class",
                format!(
                    "flow-node flow-node--{} flow-node--{}",
                    self.variant, self.size
                ),
            )
            .attr("data-variant", self.variant)
            .attr("style", css);

        if self.is_interactive() {
            el = el.attr("role", "button").attr("data-interactive", "true");
        }
        el = el
            .attr_opt("tabindex", self.effective_tab_index())
            .attr_opt("aria-label", self.aria_label.as_deref());

        el.children(self.children.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_every_variant_has_distinct_style() {
        let fills: std::collections::HashSet<_> =
            NodeVariant::ALL.iter().map(|v| v.style().fill).collect();
        assert_eq!(fills.len(), NodeVariant::ALL.len());
    }

    #[test]
    fn test_decorative_node_not_focusable() {
        let el = FlowNode::new(NodeVariant::Database).label("PostgreSQL").render();
        assert_eq!(el.get_attr("tabindex"), None);
        assert_eq!(el.get_attr("role"), None);
        assert_eq!(el.text_content(), "PostgreSQL");
        assert!(el.has_class("flow-node--database"));
        assert!(el.has_class("flow-node--md"));
    }

    #[test]
    fn test_tab_index_override_on_decorative_node() {
        let el = FlowNode::new(NodeVariant::Sink).tab_index(-1).render();
        assert_eq!(el.get_attr("tabindex"), Some("-1"));
        assert_eq!(el.get_attr("role"), None);
    }

    #[test]
    fn test_interactive_node_is_button() {
        let node = FlowNode::new(NodeVariant::Connector)
            .label("Debezium")
            .on_click(|| {});
        let el = node.render();
        assert_eq!(el.get_attr("role"), Some("button"));
        assert_eq!(el.get_attr("tabindex"), Some("0"));
    }

    #[test]
    fn test_keyboard_activation() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let node =
            FlowNode::new(NodeVariant::Cluster).on_click(move || counter.set(counter.get() + 1));

        assert!(node.handle_key(Key::Enter));
        assert!(node.handle_key(Key::Space));
        assert!(!node.handle_key(Key::Escape));
        assert!(!node.handle_key(Key::Character('k')));
        assert!(node.click());
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn test_decorative_node_ignores_keys() {
        let node = FlowNode::new(NodeVariant::App);
        assert!(!node.handle_key(Key::Enter));
        assert!(!node.click());
    }

    #[test]
    fn test_size_metrics_grow() {
        let (_, _, sm) = NodeSize::Sm.metrics();
        let (_, _, md) = NodeSize::Md.metrics();
        let (_, _, lg) = NodeSize::Lg.metrics();
        assert!(sm < md && md < lg);
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let err = serde_json::from_str::<NodeVariant>("\"mainframe\"");
        assert!(err.is_err());
        let ok: NodeVariant = serde_json::from_str("\"connector\"").unwrap();
        assert_eq!(ok, NodeVariant::Connector);
    }
}
