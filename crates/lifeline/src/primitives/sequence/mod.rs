//! Sequence diagrams
//!
//! Actors become columns with lifelines, messages become rows. Construction
//! validates the description (non-empty actors, unique ids, every message
//! endpoint declared), so a `SequenceDiagram` that exists can always be laid
//! out.
//!
//! ```
//! use lifeline::primitives::sequence::{Actor, Message, MessageVariant, SequenceDiagram};
//!
//! let diagram = SequenceDiagram::new(
//!     vec![Actor::new("app", "App"), Actor::new("pg", "PostgreSQL")],
//!     vec![
//!         Message::new("m1", "app", "pg", "INSERT"),
//!         Message::new("m2", "pg", "app", "OK").with_variant(MessageVariant::Return),
//!     ],
//! )
//! .unwrap();
//! let svg = diagram.to_svg().unwrap();
//! assert!(svg.contains("INSERT"));
//! ```

mod database;
mod layout;
mod renderer;

pub use database::{
    Actor, ActorKind, ActorStyle, ArrowHead, Message, MessageStyle, MessageVariant,
    SequenceDatabase,
};
pub use layout::{
    LabelAnchor, MessageGeometry, PositionedActor, PositionedMessage, SequenceConfig,
    SequenceLayout, SequenceLayoutAlgorithm,
};
pub use renderer::SequenceRenderer;

use anyhow::Result;

use crate::core::Element;
use crate::primitives::tooltip::TooltipConfig;

/// A validated sequence diagram ready to lay out and render
#[derive(Debug, Clone)]
pub struct SequenceDiagram {
    database: SequenceDatabase,
    config: SequenceConfig,
    tooltip: TooltipConfig,
    open_message: Option<String>,
}

impl SequenceDiagram {
    /// Validate `actors` and `messages` with the default configuration
    pub fn new(actors: Vec<Actor>, messages: Vec<Message>) -> Result<Self> {
        Self::with_config(actors, messages, SequenceConfig::default())
    }

    /// Validate `actors`, `messages` and `config`
    pub fn with_config(
        actors: Vec<Actor>,
        messages: Vec<Message>,
        config: SequenceConfig,
    ) -> Result<Self> {
        config.validate()?;
        let database = SequenceDatabase::from_parts(actors, messages)?;
        Ok(Self {
            database,
            config,
            tooltip: TooltipConfig::default(),
            open_message: None,
        })
    }

    pub fn tooltip_config(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Show the tooltip panel of one message, or of an actor
    pub fn set_open_message(&mut self, id: Option<&str>) {
        self.open_message = id.map(str::to_string);
    }

    pub fn database(&self) -> &SequenceDatabase {
        &self.database
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Compute a fresh layout
    pub fn layout(&self) -> Result<SequenceLayout> {
        SequenceLayoutAlgorithm::with_config(self.config).layout(&self.database)
    }

    pub fn render(&self) -> Result<Element> {
        SequenceRenderer::with_config(self.config)
            .with_tooltip_config(self.tooltip)
            .with_open_message(self.open_message.clone())
            .render(&self.database)
    }

    pub fn to_svg(&self) -> Result<String> {
        Ok(self.render()?.to_markup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Database, DiagramError, LayoutAlgorithm, Renderer};

    #[test]
    fn test_dangling_reference_fails_at_construction() {
        let err = SequenceDiagram::new(
            vec![Actor::new("a", "A")],
            vec![Message::new("m1", "a", "ghost", "hello")],
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::UnknownActor { .. })
        ));
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        let err = SequenceDiagram::with_config(
            vec![Actor::new("a", "A")],
            Vec::new(),
            SequenceConfig::default().with_column_width(0.0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("column width"));
    }

    fn render_with<D, L, R>(database: &D, layout: &L, renderer: &R) -> (L::Output, Element)
    where
        D: Database,
        L: LayoutAlgorithm<D>,
        R: Renderer<D>,
    {
        (
            layout.layout(database).unwrap(),
            renderer.render(database).unwrap(),
        )
    }

    #[test]
    fn test_pipeline_through_traits() {
        let diagram = SequenceDiagram::new(
            vec![Actor::new("a", "A"), Actor::new("b", "B")],
            vec![Message::new("m1", "a", "b", "req")],
        )
        .unwrap();
        let algorithm = SequenceLayoutAlgorithm::new();
        let renderer = SequenceRenderer::new();
        assert_eq!(algorithm.name(), "sequence");
        assert_eq!(renderer.format(), "svg");

        let (layout, svg) = render_with(diagram.database(), &algorithm, &renderer);
        assert_eq!(layout.messages.len(), 1);
        assert_eq!(svg.find_by_class("message-arrow").count(), 1);
        assert_eq!(diagram.database().edge_count(), 1);
    }

    #[test]
    fn test_open_message_round_trip() {
        let mut diagram = SequenceDiagram::new(
            vec![Actor::new("a", "A"), Actor::new("b", "B")],
            vec![Message::new("m1", "a", "b", "req").with_tooltip("details")],
        )
        .unwrap();
        diagram.set_open_message(Some("m1"));
        assert!(diagram.to_svg().unwrap().contains("tooltip-panel"));
        diagram.set_open_message(None);
        assert!(!diagram.to_svg().unwrap().contains("tooltip-panel"));
    }
}
