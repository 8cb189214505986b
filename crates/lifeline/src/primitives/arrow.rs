//! Directional connectors placed between nodes in a flex flow
//!
//! An arrow has no coordinates of its own; it is a fixed-size glyph that sits
//! between its neighbours. The glyph is drawn as inline SVG so the head and
//! the dash pattern render the same everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{fmt_num, Component, Element, Point};

/// Length of the glyph along its direction of travel
pub const ARROW_LENGTH: f64 = 40.0;
/// Thickness of the glyph across its direction of travel
pub const ARROW_THICKNESS: f64 = 12.0;
/// Length of the arrowhead from tip to base
pub const HEAD_LENGTH: f64 = 8.0;

const STROKE: &str = "#64748b";

/// Which way the arrow points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl ArrowDirection {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ArrowDirection::Left | ArrowDirection::Right)
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrowDirection::Up => write!(f, "up"),
            ArrowDirection::Down => write!(f, "down"),
            ArrowDirection::Left => write!(f, "left"),
            ArrowDirection::Right => write!(f, "right"),
        }
    }
}

/// Geometry of an arrow inside its own glyph box
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowGlyph {
    pub width: f64,
    pub height: f64,
    /// Tail end of the shaft
    pub start: Point,
    /// Where the shaft meets the head
    pub end: Point,
    /// Head triangle: tip first, then the two base corners
    pub head: [Point; 3],
}

/// A directional connector with an optional caption
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrow {
    pub direction: ArrowDirection,
    pub label: Option<String>,
    pub dashed: bool,
}

impl Arrow {
    pub fn new(direction: ArrowDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    pub fn glyph(&self) -> ArrowGlyph {
        let (width, height) = if self.direction.is_horizontal() {
            (ARROW_LENGTH, ARROW_THICKNESS)
        } else {
            (ARROW_THICKNESS, ARROW_LENGTH)
        };
        let mid_x = width / 2.0;
        let mid_y = height / 2.0;
        let half = ARROW_THICKNESS / 2.0;

        let (start, tip) = match self.direction {
            ArrowDirection::Right => (Point::new(0.0, mid_y), Point::new(width, mid_y)),
            ArrowDirection::Left => (Point::new(width, mid_y), Point::new(0.0, mid_y)),
            ArrowDirection::Down => (Point::new(mid_x, 0.0), Point::new(mid_x, height)),
            ArrowDirection::Up => (Point::new(mid_x, height), Point::new(mid_x, 0.0)),
        };

        let (end, base_a, base_b) = match self.direction {
            ArrowDirection::Right => {
                let bx = tip.x - HEAD_LENGTH;
                (
                    Point::new(bx, mid_y),
                    Point::new(bx, mid_y - half),
                    Point::new(bx, mid_y + half),
                )
            }
            ArrowDirection::Left => {
                let bx = tip.x + HEAD_LENGTH;
                (
                    Point::new(bx, mid_y),
                    Point::new(bx, mid_y - half),
                    Point::new(bx, mid_y + half),
                )
            }
            ArrowDirection::Down => {
                let by = tip.y - HEAD_LENGTH;
                (
                    Point::new(mid_x, by),
                    Point::new(mid_x - half, by),
                    Point::new(mid_x + half, by),
                )
            }
            ArrowDirection::Up => {
                let by = tip.y + HEAD_LENGTH;
                (
                    Point::new(mid_x, by),
                    Point::new(mid_x - half, by),
                    Point::new(mid_x + half, by),
                )
            }
        };

        ArrowGlyph {
            width,
            height,
            start,
            end,
            head: [tip, base_a, base_b],
        }
    }

    fn render_svg(&self) -> Element {
        let glyph = self.glyph();
        let points = glyph
            .head
            .iter()
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");

        let mut shaft = Element::new("line")
            .num("x1", glyph.start.x)
            .num("y1", glyph.start.y)
            .num("x2", glyph.end.x)
            .num("y2", glyph.end.y)
            .attr("stroke", STROKE)
            .attr("stroke-width", 2);
        if self.dashed {
            shaft = shaft.attr("stroke-dasharray", "4 3");
        }

        Element::new("svg")
            .attr("class", "arrow__glyph")
            .num("width", glyph.width)
            .num("height", glyph.height)
            .attr(
                "viewBox",
                format!("0 0 {} {}", fmt_num(glyph.width), fmt_num(glyph.height)),
            )
            .attr("aria-hidden", "true")
            .child(shaft)
            .child(Element::new("polygon").attr("points", points).attr("fill", STROKE))
    }
}

impl Component for Arrow {
    fn render(&self) -> Element {
        let flex = if self.direction.is_horizontal() {
            "row"
        } else {
            "column"
        };
        let mut classes = format!("arrow arrow--{}", self.direction);
        if self.dashed {
            classes.push_str(" arrow--dashed");
        }

        let mut el = Element::new("div")
            .attr("class", classes)
            .attr("data-direction", self.direction)
            .attr(
                "style",
                format!("display:flex;flex-direction:{};align-items:center;gap:4px", flex),
            )
            .attr("role", "presentation")
            .child(self.render_svg());

        if let Some(label) = &self.label {
            el = el.child(Element::new("span").attr("class", "arrow__label").text(label.clone()));
        }
        el
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_arrow_points_right() {
        let glyph = Arrow::new(ArrowDirection::Right).glyph();
        assert!(glyph.width > glyph.height);
        let tip = glyph.head[0];
        assert_eq!(tip.x, glyph.width);
        assert!(glyph.start.x < glyph.end.x);
        assert!(glyph.end.x < tip.x);
    }

    #[test]
    fn test_left_arrow_points_left() {
        let glyph = Arrow::new(ArrowDirection::Left).glyph();
        assert_eq!(glyph.head[0].x, 0.0);
        assert!(glyph.start.x > glyph.end.x);
    }

    #[test]
    fn test_vertical_arrows() {
        let down = Arrow::new(ArrowDirection::Down).glyph();
        assert!(down.height > down.width);
        assert_eq!(down.head[0].y, down.height);

        let up = Arrow::new(ArrowDirection::Up).glyph();
        assert_eq!(up.head[0].y, 0.0);
        assert!(up.start.y > up.end.y);
    }

    #[test]
    fn test_dashed_and_label_render() {
        let el = Arrow::new(ArrowDirection::Right)
            .label("CDC events")
            .dashed(true)
            .render();
        assert!(el.has_class("arrow--dashed"));
        let line = el.find_by_tag("line").next().unwrap();
        assert_eq!(line.get_attr("stroke-dasharray"), Some("4 3"));
        let label = el.find_by_class("arrow__label").next().unwrap();
        assert_eq!(label.text_content(), "CDC events");
    }

    #[test]
    fn test_solid_arrow_without_label() {
        let el = Arrow::new(ArrowDirection::Down).render();
        assert!(!el.has_class("arrow--dashed"));
        assert_eq!(el.find_by_class("arrow__label").count(), 0);
        let line = el.find_by_tag("line").next().unwrap();
        assert_eq!(line.get_attr("stroke-dasharray"), None);
        assert!(el.get_attr("style").unwrap().contains("flex-direction:column"));
    }
}
