//! Output rendering for CLI commands.
//!
//! Every command result implements [`Renderable`], exposing both a
//! structured view and a one-line human summary. A [`Renderer`] is chosen
//! by output mode from the process-wide [`RendererRegistry`] and turns any
//! renderable into console output, so commands never format output
//! themselves.

use crate::error::{Error, OutputError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::OnceLock;

/// Mode name of the human-readable renderer.
pub const HUMAN_OUTPUT: &str = "human";

/// Mode name of the structured (JSON) renderer.
pub const JSON_OUTPUT: &str = "json";

/// A command result that can be displayed in every output mode.
pub trait Renderable {
    /// Structured view of the result, normally the gateway response.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    fn structured(&self) -> serde_json::Result<Value>;

    /// Short human-readable summary of what the command did.
    fn summary(&self) -> String;
}

/// Writes a [`Renderable`] in one output mode.
pub trait Renderer: Send + Sync {
    /// Renders `result` to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Render`] if serialization or writing fails.
    fn render(&self, result: &dyn Renderable, out: &mut dyn Write) -> Result<(), OutputError>;
}

/// Writes the summary as a single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanRenderer;

impl Renderer for HumanRenderer {
    fn render(&self, result: &dyn Renderable, out: &mut dyn Write) -> Result<(), OutputError> {
        let summary = result.summary();
        let line = summary.trim_end().replace('\r', "").replace('\n', "\\n");
        writeln!(out, "{line}")?;
        Ok(())
    }
}

/// Writes the structured payload as a pretty-printed JSON document.
///
/// Object keys are sorted so the same payload always renders to the same
/// bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, result: &dyn Renderable, out: &mut dyn Write) -> Result<(), OutputError> {
        let value = canonicalize(result.structured()?);
        let document = serde_json::to_string_pretty(&value)?;
        writeln!(out, "{document}")?;
        Ok(())
    }
}

/// Rebuilds every object with its keys in sorted order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            Value::Object(sorted.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Maps output-mode names to renderers.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: BTreeMap<String, Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the `human` and `json` renderers.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::DuplicateOutputMode`] if a default mode
    /// collides with an existing registration.
    pub fn with_defaults() -> Result<Self, OutputError> {
        let mut registry = Self::new();
        registry.register_defaults()?;
        Ok(registry)
    }

    /// Registers the `human` and `json` renderers.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::DuplicateOutputMode`] if either mode is taken.
    pub fn register_defaults(&mut self) -> Result<(), OutputError> {
        self.register(HUMAN_OUTPUT, Box::new(HumanRenderer))?;
        self.register(JSON_OUTPUT, Box::new(JsonRenderer))?;
        Ok(())
    }

    /// Registers a renderer under `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::DuplicateOutputMode`] if `mode` is already registered.
    pub fn register(
        &mut self,
        mode: impl Into<String>,
        renderer: Box<dyn Renderer>,
    ) -> Result<(), OutputError> {
        let mode = mode.into();
        if self.renderers.contains_key(&mode) {
            return Err(OutputError::DuplicateOutputMode { mode });
        }
        self.renderers.insert(mode, renderer);
        Ok(())
    }

    /// Looks up the renderer for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::UnknownOutputMode`] if nothing is registered
    /// under `mode`.
    pub fn resolve(&self, mode: &str) -> Result<&dyn Renderer, OutputError> {
        self.renderers
            .get(mode)
            .map(|renderer| &**renderer)
            .ok_or_else(|| OutputError::UnknownOutputMode {
                mode: mode.to_string(),
                known: self.modes().collect::<Vec<_>>().join(", "),
            })
    }

    /// Registered mode names in sorted order.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }
}

/// Process-wide registry, built on first use and read-only afterwards.
///
/// # Errors
///
/// Returns [`Error::Config`] if the default renderers could not be
/// registered. The failure is cached like a successful build.
pub fn renderers() -> crate::Result<&'static RendererRegistry> {
    static REGISTRY: OnceLock<Result<RendererRegistry, OutputError>> = OnceLock::new();
    REGISTRY
        .get_or_init(RendererRegistry::with_defaults)
        .as_ref()
        .map_err(|e| Error::Config {
            message: format!("failed to initialize output renderers: {e}"),
        })
}
