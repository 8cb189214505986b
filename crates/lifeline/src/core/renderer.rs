//! Rendering traits
//!
//! Stateless primitives implement [`Component`]: props in, render tree out.
//! Diagram renderers that need a database and a layout pass implement
//! [`Renderer`].

use anyhow::Result;

use super::{Database, Element};

/// A stateless primitive that renders itself from its props
pub trait Component {
    /// Build the render tree for this component
    fn render(&self) -> Element;

    /// Render and serialize to markup
    fn to_markup(&self) -> String {
        self.render().to_markup()
    }
}

/// Core trait for diagram renderers
pub trait Renderer<D: Database> {
    /// Render the diagram database into a render tree
    fn render(&self, database: &D) -> Result<Element>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the markup format produced
    fn format(&self) -> &'static str;
}
