//! Core abstractions shared by every primitive
//!
//! Render tree, geometry, text measurement, error types, logging, and the
//! database / layout / renderer traits the sequence pipeline is built on.

mod database;
mod element;
mod error;
mod geometry;
mod layout;
pub mod logging;
mod renderer;
mod text;
mod types;

pub use database::*;
pub use element::*;
pub use error::*;
pub use geometry::*;
pub use layout::*;
pub use logging::*;
pub use renderer::*;
pub use text::*;
pub use types::*;
