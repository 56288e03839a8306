//! View results
//!
//! A handler that wants output rendered returns a `ModelAndView`: a view
//! identifier naming a template file plus a string-keyed data mapping. The
//! dispatcher consumes it and hands it by reference to the renderer.

pub mod resolver;

pub use resolver::{TemplateRegistry, TemplateResolver};

use serde_json::{Map, Value};

/// A (view identifier, data mapping) pair produced per request.
#[derive(Debug, Clone, Default)]
pub struct ModelAndView {
    view: String,
    model: Map<String, Value>,
}

impl ModelAndView {
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            model: Map::new(),
        }
    }

    /// Builder-style model insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.model.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.model.insert(key.into(), value.into());
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn model(&self) -> &Map<String, Value> {
        &self.model
    }
}
