//! Flex groups that order nodes and arrows
//!
//! Diagram definitions put a node, an arrow, and another node side by side;
//! a `Flow` is that row (or column).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Component, Element, Node};

/// Main axis of a flow group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowAxis {
    #[default]
    Row,
    Column,
}

impl fmt::Display for FlowAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowAxis::Row => write!(f, "row"),
            FlowAxis::Column => write!(f, "column"),
        }
    }
}

/// Default gap between flow children in pixels
pub const DEFAULT_GAP: u32 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub axis: FlowAxis,
    pub gap: u32,
    pub children: Vec<Node>,
}

impl Default for Flow {
    fn default() -> Self {
        Self {
            axis: FlowAxis::Row,
            gap: DEFAULT_GAP,
            children: Vec::new(),
        }
    }
}

impl Flow {
    pub fn row() -> Self {
        Self::default()
    }

    pub fn column() -> Self {
        Self {
            axis: FlowAxis::Column,
            ..Self::default()
        }
    }

    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl Component for Flow {
    fn render(&self) -> Element {
        Element::new("div")
            .attr("class", format!("flow flow--{}", self.axis))
            .attr(
                "style",
                format!(
                    "display:flex;flex-direction:{};align-items:center;justify-content:center;gap:{}px",
                    self.axis, self.gap
                ),
            )
            .children(self.children.iter().cloned())
    }
}
