//! Diagram primitives
//!
//! Stateless building blocks ([`FlowNode`], [`Arrow`], [`DiagramContainer`],
//! [`Flow`]), the stateful [`Tooltip`], and the [`sequence`] diagram engine.
//! [`document`] parses JSON descriptions into these; the [`Orchestrator`]
//! runs the whole pipeline.

mod arrow;
mod container;
pub mod document;
mod flow;
mod flow_node;
mod orchestrator;
pub mod sequence;
pub mod tooltip;

pub use arrow::{Arrow, ArrowDirection, ArrowGlyph, ARROW_LENGTH, ARROW_THICKNESS, HEAD_LENGTH};
pub use container::{ContainerColor, ContainerStyle, DiagramContainer};
pub use document::{Catalog, Description, Primitive, SequenceSpec};
pub use flow::{Flow, FlowAxis, DEFAULT_GAP};
pub use flow_node::{ClickHandler, FlowNode, NodeSize, NodeStyle, NodeVariant};
pub use orchestrator::Orchestrator;
pub use sequence::SequenceDiagram;
pub use tooltip::{Tooltip, TooltipConfig, TooltipGroup};
