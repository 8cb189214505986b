//! Lifeline - declarative diagram primitives and sequence diagram layout
//!
//! A library for rendering the building blocks of explanatory diagrams
//! (variant-colored nodes, arrows, titled containers, accessible tooltips)
//! to HTML, and for laying out and rendering sequence diagrams to SVG.
//!
//! # Quick Start
//!
//! ```rust
//! use lifeline::render;
//!
//! let json = r#"{
//!     "actors": [{"id": "pg", "label": "PostgreSQL", "kind": "database"},
//!                {"id": "dbz", "label": "Debezium"}],
//!     "messages": [{"id": "m1", "from": "dbz", "to": "pg", "label": "read WAL"}]
//! }"#;
//! let svg = render(json).unwrap();
//! assert!(svg.contains("read WAL"));
//! ```
//!
//! # Advanced Usage
//!
//! Build components directly:
//!
//! ```rust
//! use lifeline::prelude::*;
//!
//! let html = DiagramContainer::new("Source side", ContainerColor::Emerald)
//!     .child(
//!         Flow::row()
//!             .child(FlowNode::new(NodeVariant::Database).label("PostgreSQL").render())
//!             .child(Arrow::new(ArrowDirection::Right).label("WAL").render())
//!             .child(FlowNode::new(NodeVariant::Connector).label("Debezium").render())
//!             .render(),
//!     )
//!     .to_markup();
//! assert!(html.contains("Debezium"));
//! ```

pub mod core;
pub mod primitives;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Component, Database, DiagramError, Element, Key, LayoutAlgorithm, Node, Rect, Renderer,
        Side, Size,
    };
    pub use crate::primitives::sequence::{
        Actor, ActorKind, Message, MessageVariant, SequenceConfig, SequenceDatabase,
        SequenceDiagram, SequenceLayoutAlgorithm, SequenceRenderer,
    };
    pub use crate::primitives::tooltip::{TooltipEvent, TooltipState};
    pub use crate::primitives::{
        Arrow, ArrowDirection, ContainerColor, Description, DiagramContainer, Flow, FlowNode,
        NodeSize, NodeVariant, Orchestrator, Tooltip, TooltipGroup,
    };
}

/// Render a JSON diagram description to markup
///
/// Sequence descriptions produce standalone SVG; primitive trees produce
/// an HTML fragment.
///
/// # Example
/// ```rust
/// use lifeline::render;
///
/// let html = render(r#"{"type": "arrow", "direction": "right", "label": "CDC"}"#).unwrap();
/// assert!(html.contains("CDC"));
/// ```
pub fn render(json: &str) -> anyhow::Result<String> {
    use crate::primitives::Orchestrator;

    Orchestrator::new().process(json)
}

/// Lay out and render a sequence diagram to SVG markup
///
/// # Example
/// ```rust
/// use lifeline::render_sequence;
/// use lifeline::primitives::sequence::{Actor, Message, SequenceConfig};
///
/// let svg = render_sequence(
///     vec![Actor::new("a", "A")],
///     vec![Message::new("m1", "a", "a", "tick")],
///     SequenceConfig::default(),
/// )
/// .unwrap();
/// assert!(svg.contains("self-loop"));
/// ```
pub fn render_sequence(
    actors: Vec<primitives::sequence::Actor>,
    messages: Vec<primitives::sequence::Message>,
    config: primitives::sequence::SequenceConfig,
) -> anyhow::Result<String> {
    use crate::primitives::SequenceDiagram;

    SequenceDiagram::with_config(actors, messages, config)?.to_svg()
}

/// Parse a JSON description without rendering
///
/// Only syntax and enum values are checked here; call
/// [`Description::validate`](primitives::Description::validate) for
/// reference and id checks.
///
/// # Example
/// ```rust
/// use lifeline::parse;
///
/// let description = parse(r#"{"type": "text", "text": "hello"}"#).unwrap();
/// assert_eq!(description.kind(), "text");
/// ```
pub fn parse(json: &str) -> anyhow::Result<primitives::Description> {
    Ok(primitives::Description::from_json(json)?)
}
