//! Pipeline orchestrator
//!
//! Runs a JSON description through every stage:
//! parse → validate → layout/render → markup

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use super::document::{Description, Primitive};
use super::sequence::SequenceConfig;
use crate::core::Element;

/// Orchestrator that coordinates the description pipeline
///
/// Holds the base sequence configuration. A message spacing set here
/// overrides the `messageSpacing` written in descriptions.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    config: SequenceConfig,
    message_spacing: Option<f64>,
}

impl Orchestrator {
    /// Create an orchestrator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SequenceConfig) -> Self {
        Self {
            config,
            message_spacing: None,
        }
    }

    /// Force a message spacing on every sequence diagram
    pub fn with_message_spacing(mut self, spacing: Option<f64>) -> Self {
        self.message_spacing = spacing;
        self
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Parse a JSON description
    pub fn parse(&self, input: &str) -> Result<Description> {
        let parse_span = span!(Level::DEBUG, "pipeline_parse", input_len = input.len());
        let _enter = parse_span.enter();

        let mut description = Description::from_json(input).map_err(|err| {
            warn!(error = %err, "Description did not parse");
            err
        })?;
        if let Some(spacing) = self.message_spacing {
            override_spacing(&mut description, spacing);
        }
        debug!(
            kind = description.kind(),
            primitives = description.primitive_count(),
            "Parsing completed"
        );
        Ok(description)
    }

    /// Check a parsed description without rendering it
    pub fn validate(&self, description: &Description) -> Result<()> {
        let validate_span = span!(Level::DEBUG, "pipeline_validate", kind = description.kind());
        let _enter = validate_span.enter();

        description.validate(&self.config).map_err(|err| {
            warn!(error = %err, "Description is invalid");
            err
        })?;
        debug!("Validation completed");
        Ok(())
    }

    /// Render a parsed description to a markup tree
    pub fn render(&self, description: &Description) -> Result<Element> {
        let render_span = span!(Level::DEBUG, "pipeline_render", kind = description.kind());
        let _enter = render_span.enter();

        let element = description.render(&self.config)?;
        debug!(root = element.tag(), "Rendering completed");
        Ok(element)
    }

    /// Process JSON input through the complete pipeline
    pub fn process(&self, input: &str) -> Result<String> {
        let process_span = span!(Level::INFO, "process_description", input_len = input.len());
        let _enter = process_span.enter();

        info!("Starting description pipeline");
        let description = self.parse(input)?;
        self.validate(&description)?;
        let markup = self.render(&description)?.to_markup();
        info!(output_len = markup.len(), "Pipeline completed successfully");
        Ok(markup)
    }
}

fn override_spacing(description: &mut Description, spacing: f64) {
    fn walk(primitive: &mut Primitive, spacing: f64) {
        match primitive {
            Primitive::Sequence(spec) => spec.message_spacing = Some(spacing),
            Primitive::Node { children, .. }
            | Primitive::Container { children, .. }
            | Primitive::Flow { children, .. } => {
                for child in children {
                    walk(child, spacing);
                }
            }
            Primitive::Tooltip { trigger, .. } => walk(trigger, spacing),
            Primitive::Arrow { .. } | Primitive::Text { .. } => {}
        }
    }
    match description {
        Description::Sequence(spec) => spec.message_spacing = Some(spacing),
        Description::Primitive(root) => walk(root, spacing),
    }
}
