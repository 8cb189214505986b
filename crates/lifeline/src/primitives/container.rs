//! Titled grouping boxes
//!
//! Containers frame a cluster of nodes and arrows ("Source side", "Kafka
//! Connect worker"). They nest without any depth limit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Component, Element, Node};

/// Color theme of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerColor {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Emerald,
    Rose,
    Slate,
}

/// Border, background and title colors of one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerStyle {
    pub border: &'static str,
    pub background: &'static str,
    pub title: &'static str,
}

impl ContainerColor {
    pub const ALL: [ContainerColor; 7] = [
        ContainerColor::Blue,
        ContainerColor::Purple,
        ContainerColor::Green,
        ContainerColor::Orange,
        ContainerColor::Emerald,
        ContainerColor::Rose,
        ContainerColor::Slate,
    ];

    pub fn style(&self) -> ContainerStyle {
        match self {
            ContainerColor::Blue => ContainerStyle {
                border: "#93c5fd",
                background: "#eff6ff",
                title: "#1d4ed8",
            },
            ContainerColor::Purple => ContainerStyle {
                border: "#c4b5fd",
                background: "#f5f3ff",
                title: "#6d28d9",
            },
            ContainerColor::Green => ContainerStyle {
                border: "#86efac",
                background: "#f0fdf4",
                title: "#15803d",
            },
            ContainerColor::Orange => ContainerStyle {
                border: "#fdba74",
                background: "#fff7ed",
                title: "#c2410c",
            },
            ContainerColor::Emerald => ContainerStyle {
                border: "#6ee7b7",
                background: "#ecfdf5",
                title: "#047857",
            },
            ContainerColor::Rose => ContainerStyle {
                border: "#fda4af",
                background: "#fff1f2",
                title: "#be123c",
            },
            ContainerColor::Slate => ContainerStyle {
                border: "#cbd5e1",
                background: "#f8fafc",
                title: "#334155",
            },
        }
    }
}

impl fmt::Display for ContainerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerColor::Blue => write!(f, "blue"),
            ContainerColor::Purple => write!(f, "purple"),
            ContainerColor::Green => write!(f, "green"),
            ContainerColor::Orange => write!(f, "orange"),
            ContainerColor::Emerald => write!(f, "emerald"),
            ContainerColor::Rose => write!(f, "rose"),
            ContainerColor::Slate => write!(f, "slate"),
        }
    }
}

/// A titled, bordered region grouping other primitives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagramContainer {
    pub title: String,
    pub color: ContainerColor,
    pub recommended: bool,
    pub description: Option<String>,
    pub children: Vec<Node>,
}

impl DiagramContainer {
    pub fn new(title: impl Into<String>, color: ContainerColor) -> Self {
        Self {
            title: title.into(),
            color,
            ..Self::default()
        }
    }

    pub fn recommended(mut self, recommended: bool) -> Self {
        self.recommended = recommended;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
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
}

impl Component for DiagramContainer {
    fn render(&self) -> Element {
        let style = self.color.style();
        let border_width = if self.recommended { 3 } else { 2 };
        let mut classes = format!("diagram-container diagram-container--{}", self.color);
        if self.recommended {
            classes.push_str(" diagram-container--recommended");
        }

        let mut header = Element::new("div")
            .attr("class", "diagram-container__header")
            .child(
                Element::new("span")
                    .attr("class", "diagram-container__title")
                    .attr("style", format!("color:{};font-weight:600", style.title))
                    .text(self.title.clone()),
            );
        if self.recommended {
            header = header.child(
                Element::new("span")
                    .attr("class", "diagram-container__badge")
                    .text("Recommended"),
            );
        }

        let mut el = Element::new("section")
            .attr("class", classes)
            .attr("data-color", self.color)
            .attr("aria-label", self.title.clone())
            .attr(
                "style",
                format!(
                    "border:{}px solid {};background:{};border-radius:12px;padding:16px",
                    border_width, style.border, style.background
                ),
            )
            .child(header);

        if let Some(description) = &self.description {
            el = el.child(
                Element::new("p")
                    .attr("class", "diagram-container__description")
                    .text(description.clone()),
            );
        }

        el.child(
            Element::new("div")
                .attr("class", "diagram-container__body")
                .children(self.children.iter().cloned()),
        )
    }
}
