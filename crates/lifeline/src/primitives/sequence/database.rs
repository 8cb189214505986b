//! Sequence diagram database implementation
//!
//! Stores actors and messages in declaration order. Every insertion is
//! validated: actor ids and message ids are unique, and a message may only
//! reference actors that were added before it.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::core::{Database, DiagramError};

/// Visual category of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    #[default]
    Service,
    Database,
    Queue,
    External,
}

/// Header box colors for one actor kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorStyle {
    pub fill: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

impl ActorKind {
    pub const ALL: [ActorKind; 4] = [
        ActorKind::Service,
        ActorKind::Database,
        ActorKind::Queue,
        ActorKind::External,
    ];

    pub fn style(&self) -> ActorStyle {
        match self {
            ActorKind::Service => ActorStyle {
                fill: "#ede9fe",
                border: "#8b5cf6",
                text: "#4c1d95",
            },
            ActorKind::Database => ActorStyle {
                fill: "#dbeafe",
                border: "#3b82f6",
                text: "#1e3a8a",
            },
            ActorKind::Queue => ActorStyle {
                fill: "#ffedd5",
                border: "#f97316",
                text: "#7c2d12",
            },
            ActorKind::External => ActorStyle {
                fill: "#f1f5f9",
                border: "#64748b",
                text: "#1e293b",
            },
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActorKind::Service => "service",
            ActorKind::Database => "database",
            ActorKind::Queue => "queue",
            ActorKind::External => "external",
        };
        write!(f, "{}", name)
    }
}

/// A participant column in the sequence diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Actor {
    /// Unique identifier used by messages
    pub id: String,
    /// Display label in the header box
    pub label: String,
    #[serde(default)]
    pub kind: ActorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ActorKind::default(),
            tooltip: None,
        }
    }

    pub fn with_kind(mut self, kind: ActorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Arrow head shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHead {
    /// Solid triangle
    Filled,
    /// Two strokes, no fill
    Open,
}

/// Line and head style implied by a message variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageStyle {
    pub dashed: bool,
    pub head: ArrowHead,
    pub color: &'static str,
}

/// Kind of interaction a message represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageVariant {
    /// Request that waits for an answer
    #[default]
    Sync,
    /// Fire-and-forget
    Async,
    /// Reply to an earlier request
    Return,
}

impl MessageVariant {
    pub const ALL: [MessageVariant; 3] = [
        MessageVariant::Sync,
        MessageVariant::Async,
        MessageVariant::Return,
    ];

    pub fn style(&self) -> MessageStyle {
        match self {
            MessageVariant::Sync => MessageStyle {
                dashed: false,
                head: ArrowHead::Filled,
                color: "#334155",
            },
            MessageVariant::Async => MessageStyle {
                dashed: false,
                head: ArrowHead::Open,
                color: "#7c3aed",
            },
            MessageVariant::Return => MessageStyle {
                dashed: true,
                head: ArrowHead::Open,
                color: "#64748b",
            },
        }
    }

    /// Id of the SVG marker drawing this variant's head
    pub fn marker_id(&self) -> String {
        format!("lifeline-head-{}", self)
    }
}

impl fmt::Display for MessageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageVariant::Sync => "sync",
            MessageVariant::Async => "async",
            MessageVariant::Return => "return",
        };
        write!(f, "{}", name)
    }
}

/// A labeled interaction between two actors (or one actor and itself)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    /// Unique identifier, used as the render key
    pub id: String,
    pub from: String,
    pub to: String,
    pub label: String,
    #[serde(default)]
    pub variant: MessageVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            label: label.into(),
            variant: MessageVariant::default(),
            tooltip: None,
        }
    }

    pub fn with_variant(mut self, variant: MessageVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn is_self_message(&self) -> bool {
        self.from == self.to
    }
}

/// Sequence diagram database
#[derive(Debug, Default, Clone)]
pub struct SequenceDatabase {
    actors: Vec<Actor>,
    messages: Vec<Message>,
    actor_ids: HashSet<String>,
    message_ids: HashSet<String>,
}

impl SequenceDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validated database from declared actors and messages
    ///
    /// Fails on an empty actor list, duplicate ids, or a message that
    /// references an undeclared actor.
    pub fn from_parts(actors: Vec<Actor>, messages: Vec<Message>) -> Result<Self> {
        if actors.is_empty() {
            return Err(DiagramError::EmptyActors.into());
        }
        let mut db = Self::new();
        for actor in actors {
            db.add_actor(actor)?;
        }
        for message in messages {
            db.add_message(message)?;
        }
        Ok(db)
    }

    /// Add an actor; its column is its position in insertion order
    pub fn add_actor(&mut self, actor: Actor) -> Result<()> {
        if !self.actor_ids.insert(actor.id.clone()) {
            return Err(DiagramError::DuplicateActor { id: actor.id }.into());
        }
        self.actors.push(actor);
        Ok(())
    }

    /// Add a message; both endpoints must already be declared
    pub fn add_message(&mut self, message: Message) -> Result<()> {
        for endpoint in [&message.from, &message.to] {
            if !self.actor_ids.contains(endpoint) {
                return Err(DiagramError::unknown_actor(&message.id, endpoint).into());
            }
        }
        if !self.message_ids.insert(message.id.clone()) {
            return Err(DiagramError::DuplicateMessage { id: message.id }.into());
        }
        self.messages.push(message);
        Ok(())
    }

    /// Check whole-diagram invariants that single insertions cannot
    pub fn validate(&self) -> Result<()> {
        if self.actors.is_empty() {
            return Err(DiagramError::EmptyActors.into());
        }
        Ok(())
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get_actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn clear_all(&mut self) {
        self.actors.clear();
        self.messages.clear();
        self.actor_ids.clear();
        self.message_ids.clear();
    }
}

/// Maps Actor to Node and Message to Edge
impl Database for SequenceDatabase {
    type Node = Actor;
    type Edge = Message;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_actor(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_message(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.actors.iter().find(|a| a.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.actors.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.messages.iter()
    }

    fn clear(&mut self) {
        self.clear_all()
    }

    fn node_count(&self) -> usize {
        self.actor_count()
    }

    fn edge_count(&self) -> usize {
        self.message_count()
    }
}
