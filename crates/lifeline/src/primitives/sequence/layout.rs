//! Sequence diagram layout algorithm
//!
//! Columns follow actor order, rows follow message order. Column `i` is
//! centered at `i * column_width + column_width / 2`; row `i` sits at
//! `i * message_spacing` below the header. Nothing is reordered, wrapped or
//! reflowed.

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, span, trace, Level};

use super::database::{ActorKind, Message, MessageVariant, SequenceDatabase};
use crate::core::{measure_text, DiagramError, LayoutAlgorithm, Point, Rect};
use crate::primitives::ArrowDirection;

/// Gap between a message line and its label baseline
pub const LABEL_GAP: f64 = 6.0;
/// Top margin above the actor header boxes
pub const HEADER_MARGIN: f64 = 8.0;

/// Sizing knobs for sequence layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceConfig {
    /// Vertical distance between consecutive message rows
    pub message_spacing: f64,
    /// Horizontal space given to each actor
    pub column_width: f64,
    /// Space above the first message row
    pub header_height: f64,
    /// Horizontal excursion of a self-message loop
    pub self_loop_width: f64,
    pub actor_box_height: f64,
    pub font_size: f64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            message_spacing: 50.0,
            column_width: 160.0,
            header_height: 60.0,
            self_loop_width: 32.0,
            actor_box_height: 36.0,
            font_size: 13.0,
        }
    }
}

impl SequenceConfig {
    pub fn with_message_spacing(mut self, spacing: f64) -> Self {
        self.message_spacing = spacing;
        self
    }

    pub fn with_column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }

    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    pub fn with_self_loop_width(mut self, width: f64) -> Self {
        self.self_loop_width = width;
        self
    }

    /// Reject values that cannot produce a drawable diagram
    pub fn validate(&self) -> Result<(), DiagramError> {
        if !self.message_spacing.is_finite() || self.message_spacing < 0.0 {
            return Err(DiagramError::invalid_config(format!(
                "message spacing must be a non-negative number, got {}",
                self.message_spacing
            )));
        }
        let positive = [
            ("column width", self.column_width),
            ("header height", self.header_height),
            ("self-loop width", self.self_loop_width),
            ("actor box height", self.actor_box_height),
            ("font size", self.font_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(DiagramError::invalid_config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.header_height < HEADER_MARGIN + self.actor_box_height {
            return Err(DiagramError::invalid_config(format!(
                "header height must leave room for actor boxes, need at least {}, got {}",
                HEADER_MARGIN + self.actor_box_height,
                self.header_height
            )));
        }
        Ok(())
    }

    /// Height of a self-message loop for this spacing
    pub fn self_loop_height(&self) -> f64 {
        (self.message_spacing * 0.4).clamp(8.0, 20.0)
    }
}

/// Positioned actor column
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedActor {
    pub id: String,
    pub label: String,
    pub kind: ActorKind,
    pub tooltip: Option<String>,
    pub column: usize,
    /// Lifeline x position (column center)
    pub x: f64,
    /// Header box
    pub header: Rect,
}

/// Shape of a positioned message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageGeometry {
    /// Horizontal arrow between two different lifelines
    Arrow {
        from_x: f64,
        to_x: f64,
        direction: ArrowDirection,
    },
    /// Loop leaving a lifeline to the right and returning to it. `height` is
    /// negative when the loop rises above the line on the last row.
    SelfLoop { x: f64, width: f64, height: f64 },
}

/// Horizontal alignment of a message label around `label_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    Start,
    Middle,
    End,
}

impl fmt::Display for LabelAnchor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self {
            LabelAnchor::Start => "start",
            LabelAnchor::Middle => "middle",
            LabelAnchor::End => "end",
        };
        write!(f, "{}", value)
    }
}

impl MessageGeometry {
    pub fn is_self_loop(&self) -> bool {
        matches!(self, MessageGeometry::SelfLoop { .. })
    }

    /// Horizontal extent of the drawn line
    pub fn span(&self) -> f64 {
        match self {
            MessageGeometry::Arrow { from_x, to_x, .. } => (to_x - from_x).abs(),
            MessageGeometry::SelfLoop { width, .. } => *width,
        }
    }
}

/// Positioned message row
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedMessage {
    pub id: String,
    pub label: String,
    pub variant: MessageVariant,
    pub tooltip: Option<String>,
    /// Row index (position in the message list)
    pub index: usize,
    /// Row offset from the top of the message area: `index * message_spacing`
    pub y: f64,
    /// Absolute y of the message line in the diagram
    pub line_y: f64,
    pub geometry: MessageGeometry,
    /// Label anchor point (absolute)
    pub label_at: Point,
    pub label_anchor: LabelAnchor,
    /// Region that receives pointer and focus events, inside the diagram bounds
    pub hit_rect: Rect,
}

/// Layout result containing all positioned elements
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceLayout {
    pub actors: Vec<PositionedActor>,
    pub messages: Vec<PositionedMessage>,
    pub width: f64,
    pub height: f64,
    /// Top of the message area
    pub header_height: f64,
    pub font_size: f64,
}

impl SequenceLayout {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn message(&self, id: &str) -> Option<&PositionedMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn actor(&self, id: &str) -> Option<&PositionedActor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Lifeline start, just below the header boxes
    pub fn lifeline_top(&self) -> f64 {
        self.actors
            .first()
            .map(|a| a.header.bottom())
            .unwrap_or(self.header_height)
    }
}

/// Sequence diagram layout algorithm
#[derive(Debug, Clone, Default)]
pub struct SequenceLayoutAlgorithm {
    config: SequenceConfig,
}

impl SequenceLayoutAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SequenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    fn column_x(&self, column: usize) -> f64 {
        column as f64 * self.config.column_width + self.config.column_width / 2.0
    }

    fn place_message(
        &self,
        index: usize,
        message: &Message,
        columns: &HashMap<&str, usize>,
        bounds: Rect,
    ) -> Result<PositionedMessage> {
        let config = &self.config;
        let column_of = |actor: &str| {
            columns
                .get(actor)
                .copied()
                .ok_or_else(|| DiagramError::unknown_actor(&message.id, actor))
        };
        let from = column_of(message.from.as_str())?;
        let to = column_of(message.to.as_str())?;

        let y = index as f64 * config.message_spacing;
        let line_y = config.header_height + y;
        let label_width = measure_text(&message.label, config.font_size);
        let label_height = config.font_size + LABEL_GAP;

        let (geometry, label_at, label_anchor, hit) = if from == to {
            let x = self.column_x(from);
            let width = config.self_loop_width;
            let drop = config.self_loop_height();
            let height = if line_y + drop > bounds.bottom() {
                -drop
            } else {
                drop
            };
            let label_y = line_y + height / 2.0;
            let top = line_y.min(line_y + height) - LABEL_GAP;
            let hit_height = drop + 2.0 * LABEL_GAP;
            // Labels that would run past the last column sit left of the lifeline
            let (label_at, label_anchor, hit) =
                if x + width + LABEL_GAP + label_width > bounds.right() {
                    let left = x - LABEL_GAP - label_width;
                    (
                        Point::new(x - LABEL_GAP, label_y),
                        LabelAnchor::End,
                        Rect::new(left, top, x + width - left, hit_height),
                    )
                } else {
                    (
                        Point::new(x + width + LABEL_GAP, label_y),
                        LabelAnchor::Start,
                        Rect::new(x, top, width + LABEL_GAP + label_width, hit_height),
                    )
                };
            (
                MessageGeometry::SelfLoop { x, width, height },
                label_at,
                label_anchor,
                hit,
            )
        } else {
            let from_x = self.column_x(from);
            let to_x = self.column_x(to);
            let direction = if from < to {
                ArrowDirection::Right
            } else {
                ArrowDirection::Left
            };
            let left = from_x.min(to_x);
            let span = (to_x - from_x).abs();
            let label_at = Point::new(left + span / 2.0, line_y - LABEL_GAP);
            let hit = Rect::new(left, line_y - label_height, span, label_height + LABEL_GAP);
            (
                MessageGeometry::Arrow {
                    from_x,
                    to_x,
                    direction,
                },
                label_at,
                LabelAnchor::Middle,
                hit,
            )
        };
        let hit_rect = hit.intersection(&bounds);

        trace!(id = %message.id, index, y, self_loop = geometry.is_self_loop(), "Placed message");

        Ok(PositionedMessage {
            id: message.id.clone(),
            label: message.label.clone(),
            variant: message.variant,
            tooltip: message.tooltip.clone(),
            index,
            y,
            line_y,
            geometry,
            label_at,
            label_anchor,
            hit_rect,
        })
    }

    /// Layout the diagram
    pub fn layout(&self, database: &SequenceDatabase) -> Result<SequenceLayout> {
        let layout_span = span!(
            Level::DEBUG,
            "sequence_layout",
            actors = database.actor_count(),
            messages = database.message_count()
        );
        let _enter = layout_span.enter();

        self.config.validate()?;
        database.validate()?;
        let config = &self.config;

        // Built once per pass so each message resolves its actors in O(1)
        let columns: HashMap<&str, usize> = database
            .actors()
            .iter()
            .enumerate()
            .map(|(i, actor)| (actor.id.as_str(), i))
            .collect();

        let box_width = config.column_width * 0.8;
        let actors: Vec<PositionedActor> = database
            .actors()
            .iter()
            .enumerate()
            .map(|(column, actor)| {
                let x = self.column_x(column);
                PositionedActor {
                    id: actor.id.clone(),
                    label: actor.label.clone(),
                    kind: actor.kind,
                    tooltip: actor.tooltip.clone(),
                    column,
                    x,
                    header: Rect::new(
                        x - box_width / 2.0,
                        HEADER_MARGIN,
                        box_width,
                        config.actor_box_height,
                    ),
                }
            })
            .collect();

        let width = actors.len() as f64 * config.column_width;
        let height =
            database.message_count() as f64 * config.message_spacing + config.header_height;
        let bounds = Rect::new(0.0, 0.0, width, height);

        let messages = database
            .messages()
            .iter()
            .enumerate()
            .map(|(index, message)| self.place_message(index, message, &columns, bounds))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            actors = actors.len(),
            messages = messages.len(),
            width,
            height,
            "Sequence layout computed"
        );

        Ok(SequenceLayout {
            actors,
            messages,
            width,
            height,
            header_height: config.header_height,
            font_size: config.font_size,
        })
    }
}

impl LayoutAlgorithm<SequenceDatabase> for SequenceLayoutAlgorithm {
    type Output = SequenceLayout;

    fn layout(&self, database: &SequenceDatabase) -> Result<Self::Output> {
        SequenceLayoutAlgorithm::layout(self, database)
    }

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
