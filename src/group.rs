//! Model groups submitted together to the fitting engine.

use crate::model::Model;

/// A named, ordered collection of models
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    name: String,
    models: Vec<Model>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a model; models keep their insertion order
    pub fn add_model(&mut self, model: impl Into<Model>) {
        self.models.push(model.into());
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Append `model` to `group`
pub fn add_model(group: &mut Group, model: impl Into<Model>) {
    group.add_model(model);
}
