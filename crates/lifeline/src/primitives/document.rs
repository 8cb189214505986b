//! JSON diagram descriptions
//!
//! A description is either a bare sequence diagram (`{actors, messages}`)
//! or a primitive tree whose objects are tagged by `"type"`. Unknown fields
//! and unknown enum values are rejected while parsing.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

use super::sequence::{Actor, ActorKind, Message, MessageVariant, SequenceConfig, SequenceDiagram};
use super::{
    Arrow, ArrowDirection, ContainerColor, DiagramContainer, Flow, FlowAxis, FlowNode, NodeSize,
    NodeVariant, Tooltip,
};
use crate::core::{Component, DiagramError, Element, Node, Side};

/// A sequence diagram as written in a description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceSpec {
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(rename = "messageSpacing", default, skip_serializing_if = "Option::is_none")]
    pub message_spacing: Option<f64>,
    /// Message (or actor) whose tooltip panel is drawn open
    #[serde(rename = "openMessage", default, skip_serializing_if = "Option::is_none")]
    pub open_message: Option<String>,
}

impl SequenceSpec {
    /// Validate into a diagram; `message_spacing` here overrides `base`
    pub fn to_diagram(&self, base: SequenceConfig) -> Result<SequenceDiagram> {
        let config = match self.message_spacing {
            Some(spacing) => base.with_message_spacing(spacing),
            None => base,
        };
        let mut diagram =
            SequenceDiagram::with_config(self.actors.clone(), self.messages.clone(), config)?;
        if let Some(id) = &self.open_message {
            let database = diagram.database();
            if database.get_message(id).is_none() && database.get_actor(id).is_none() {
                return Err(DiagramError::invalid_config(format!(
                    "openMessage '{}' does not name a message or actor",
                    id
                ))
                .into());
            }
        }
        diagram.set_open_message(self.open_message.as_deref());
        Ok(diagram)
    }
}

/// One node of a primitive tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum Primitive {
    Node {
        #[serde(default)]
        variant: NodeVariant,
        #[serde(default)]
        size: NodeSize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Primitive>,
        #[serde(rename = "ariaLabel", default, skip_serializing_if = "Option::is_none")]
        aria_label: Option<String>,
        #[serde(rename = "tabIndex", default, skip_serializing_if = "Option::is_none")]
        tab_index: Option<i32>,
        /// Behaves like a button (focusable, activatable)
        #[serde(default)]
        interactive: bool,
    },
    Arrow {
        #[serde(default)]
        direction: ArrowDirection,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        dashed: bool,
    },
    Container {
        title: String,
        #[serde(default)]
        color: ContainerColor,
        #[serde(default)]
        recommended: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default)]
        children: Vec<Primitive>,
    },
    Tooltip {
        id: String,
        trigger: Box<Primitive>,
        content: String,
        #[serde(default)]
        side: Side,
        #[serde(rename = "sideOffset", default, skip_serializing_if = "Option::is_none")]
        side_offset: Option<f64>,
        #[serde(rename = "delayDuration", default, skip_serializing_if = "Option::is_none")]
        delay_duration: Option<u64>,
        /// Controlled open flag
        #[serde(default, skip_serializing_if = "Option::is_none")]
        open: Option<bool>,
    },
    Flow {
        #[serde(default)]
        axis: FlowAxis,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gap: Option<u32>,
        #[serde(default)]
        children: Vec<Primitive>,
    },
    Text {
        text: String,
    },
    Sequence(SequenceSpec),
}

impl Primitive {
    /// Kind name as written in the `"type"` field
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Node { .. } => "node",
            Primitive::Arrow { .. } => "arrow",
            Primitive::Container { .. } => "container",
            Primitive::Tooltip { .. } => "tooltip",
            Primitive::Flow { .. } => "flow",
            Primitive::Text { .. } => "text",
            Primitive::Sequence(_) => "sequence",
        }
    }

    fn children(&self) -> &[Primitive] {
        match self {
            Primitive::Node { children, .. }
            | Primitive::Container { children, .. }
            | Primitive::Flow { children, .. } => children,
            Primitive::Tooltip { trigger, .. } => std::slice::from_ref(trigger.as_ref()),
            _ => &[],
        }
    }

    /// Build the render tree for this primitive and its children
    pub fn to_node(&self, config: &SequenceConfig) -> Result<Node> {
        let children = |items: &[Primitive]| -> Result<Vec<Node>> {
            items.iter().map(|p| p.to_node(config)).collect()
        };

        let element: Element = match self {
            Primitive::Text { text } => return Ok(Node::text(text.clone())),
            Primitive::Node {
                variant,
                size,
                label,
                children: items,
                aria_label,
                tab_index,
                interactive,
            } => {
                let mut node = FlowNode::new(*variant).size(*size);
                if let Some(label) = label {
                    node = node.label(label.clone());
                }
                for child in children(items)? {
                    node = node.child(child);
                }
                if let Some(aria_label) = aria_label {
                    node = node.aria_label(aria_label.clone());
                }
                if let Some(index) = tab_index {
                    node = node.tab_index(*index);
                }
                if *interactive {
                    let variant = *variant;
                    node = node.on_click(move || trace!(%variant, "Node activated"));
                }
                node.render()
            }
            Primitive::Arrow {
                direction,
                label,
                dashed,
            } => {
                let mut arrow = Arrow::new(*direction).dashed(*dashed);
                if let Some(label) = label {
                    arrow = arrow.label(label.clone());
                }
                arrow.render()
            }
            Primitive::Container {
                title,
                color,
                recommended,
                description,
                children: items,
            } => {
                let mut container = DiagramContainer::new(title.clone(), *color)
                    .recommended(*recommended)
                    .children(children(items)?);
                if let Some(description) = description {
                    container = container.description(description.clone());
                }
                container.render()
            }
            Primitive::Tooltip {
                id,
                trigger,
                content,
                side,
                side_offset,
                delay_duration,
                open,
            } => {
                let mut tooltip = Tooltip::new(id.clone(), trigger.to_node(config)?)
                    .content(content.clone())
                    .side(*side)
                    .open(*open);
                if let Some(offset) = side_offset {
                    tooltip = tooltip.side_offset(*offset);
                }
                if let Some(delay) = delay_duration {
                    tooltip = tooltip.delay_duration(*delay);
                }
                tooltip.render()
            }
            Primitive::Flow {
                axis,
                gap,
                children: items,
            } => {
                let mut flow = match axis {
                    FlowAxis::Row => Flow::row(),
                    FlowAxis::Column => Flow::column(),
                };
                if let Some(gap) = gap {
                    flow = flow.gap(*gap);
                }
                for child in children(items)? {
                    flow = flow.child(child);
                }
                flow.render()
            }
            Primitive::Sequence(spec) => spec.to_diagram(*config)?.render()?,
        };
        Ok(Node::Element(element))
    }
}

/// A parsed diagram description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Sequence(SequenceSpec),
    Primitive(Primitive),
}

impl Description {
    /// Parse JSON, keeping line and column information in errors
    pub fn from_json(input: &str) -> Result<Self, DiagramError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let tagged = value.get("type").is_some();
        trace!(tagged, "Parsing description");
        if tagged {
            Ok(Description::Primitive(serde_json::from_str(input)?))
        } else {
            Ok(Description::Sequence(serde_json::from_str(input)?))
        }
    }

    /// Kind of the root
    pub fn kind(&self) -> &'static str {
        match self {
            Description::Sequence(_) => "sequence",
            Description::Primitive(primitive) => primitive.kind(),
        }
    }

    /// Check every configuration rule without rendering
    ///
    /// Sequence diagrams are validated in full; tooltip ids must be unique
    /// across the description because they name DOM ids.
    pub fn validate(&self, config: &SequenceConfig) -> Result<()> {
        match self {
            Description::Sequence(spec) => spec.to_diagram(*config).map(|_| ()),
            Description::Primitive(root) => {
                let mut tooltip_ids = HashSet::new();
                validate_tree(root, config, &mut tooltip_ids)
            }
        }
    }

    /// Render to a markup tree
    pub fn render(&self, config: &SequenceConfig) -> Result<Element> {
        self.validate(config)?;
        let node = match self {
            Description::Sequence(spec) => return spec.to_diagram(*config)?.render(),
            Description::Primitive(root) => root.to_node(config)?,
        };
        match node {
            Node::Element(element) => Ok(element),
            Node::Text(text) => Ok(Element::new("span").text(text)),
        }
    }

    /// Count of primitives in the description (sequence diagrams count once)
    pub fn primitive_count(&self) -> usize {
        fn count(p: &Primitive) -> usize {
            1 + p.children().iter().map(count).sum::<usize>()
        }
        match self {
            Description::Sequence(_) => 1,
            Description::Primitive(root) => count(root),
        }
    }
}

fn validate_tree(
    primitive: &Primitive,
    config: &SequenceConfig,
    tooltip_ids: &mut HashSet<String>,
) -> Result<()> {
    match primitive {
        Primitive::Sequence(spec) => {
            spec.to_diagram(*config)?;
        }
        Primitive::Tooltip { id, .. } => {
            if !tooltip_ids.insert(id.clone()) {
                return Err(
                    DiagramError::invalid_config(format!("Duplicate tooltip id '{}'", id)).into(),
                );
            }
        }
        _ => {}
    }
    for child in primitive.children() {
        validate_tree(child, config, tooltip_ids)?;
    }
    Ok(())
}

/// Names accepted in descriptions, for listings and editor tooling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub kinds: Vec<&'static str>,
    pub node_variants: Vec<String>,
    pub node_sizes: Vec<String>,
    pub arrow_directions: Vec<String>,
    pub container_colors: Vec<String>,
    pub flow_axes: Vec<String>,
    pub sides: Vec<String>,
    pub actor_kinds: Vec<String>,
    pub message_variants: Vec<String>,
}

fn names<T: ToString>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            kinds: vec!["node", "arrow", "container", "tooltip", "flow", "text", "sequence"],
            node_variants: names(&NodeVariant::ALL),
            node_sizes: names(&[NodeSize::Sm, NodeSize::Md, NodeSize::Lg]),
            arrow_directions: names(&[
                ArrowDirection::Up,
                ArrowDirection::Down,
                ArrowDirection::Left,
                ArrowDirection::Right,
            ]),
            container_colors: names(&ContainerColor::ALL),
            flow_axes: names(&[FlowAxis::Row, FlowAxis::Column]),
            sides: names(&[Side::Top, Side::Bottom, Side::Left, Side::Right]),
            actor_kinds: names(&ActorKind::ALL),
            message_variants: names(&MessageVariant::ALL),
        }
    }

    /// `(group, values)` pairs in display order
    pub fn groups(&self) -> Vec<(&'static str, Vec<String>)> {
        vec![
            ("kinds", self.kinds.iter().map(|k| k.to_string()).collect()),
            ("node variants", self.node_variants.clone()),
            ("node sizes", self.node_sizes.clone()),
            ("arrow directions", self.arrow_directions.clone()),
            ("container colors", self.container_colors.clone()),
            ("flow axes", self.flow_axes.clone()),
            ("sides", self.sides.clone()),
            ("actor kinds", self.actor_kinds.clone()),
            ("message variants", self.message_variants.clone()),
        ]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
