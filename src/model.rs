//! Source models and their arguments.
//!
//! A model describes the light profile of one source as a fixed set of named
//! parameters. Models store parameter identifiers only; every argument given
//! as a plain value is registered as a constant parameter first.

use crate::error::{ConfigError, Result};
use crate::models::{PointSourceModel, SersicModel};
use crate::parameters::{InitValue, ParameterId, ParameterRegistry};

/// A model attribute: a value to wrap, or an already registered parameter
#[derive(Debug, Clone)]
pub enum ModelArg {
    Value(InitValue),
    Parameter(ParameterId),
}

impl ModelArg {
    /// Resolve the argument to a registered parameter.
    ///
    /// Values are registered as constant parameters; identifiers must already
    /// be registered.
    pub fn into_parameter(self, registry: &mut ParameterRegistry) -> Result<ParameterId> {
        match self {
            ModelArg::Value(value) => registry.add_constant(value),
            ModelArg::Parameter(id) if registry.contains(id) => Ok(id),
            ModelArg::Parameter(id) => Err(ConfigError::MissingReference(id)),
        }
    }
}

impl From<f64> for ModelArg {
    fn from(value: f64) -> Self {
        ModelArg::Value(InitValue::Literal(value))
    }
}

impl From<InitValue> for ModelArg {
    fn from(value: InitValue) -> Self {
        ModelArg::Value(value)
    }
}

impl From<ParameterId> for ModelArg {
    fn from(id: ParameterId) -> Self {
        ModelArg::Parameter(id)
    }
}

/// Any source model
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    PointSource(PointSourceModel),
    Sersic(SersicModel),
}

impl Model {
    /// Label used when rendering, e.g. `Sersic` or `Exponential`
    pub fn label(&self) -> &'static str {
        match self {
            Model::PointSource(_) => "PointSource",
            Model::Sersic(m) => m.profile().label(),
        }
    }

    /// Attribute names and parameter identifiers, in rendering order
    pub fn parameter_ids(&self) -> Vec<(&'static str, ParameterId)> {
        match self {
            Model::PointSource(m) => m.parameter_ids().to_vec(),
            Model::Sersic(m) => m.parameter_ids().to_vec(),
        }
    }

    /// Render the model as `Label[name=..., ...]`.
    ///
    /// With `show_params` each attribute shows the full parameter description,
    /// otherwise only its identifier.
    pub fn render(&self, registry: &ParameterRegistry, show_params: bool) -> Result<String> {
        let attributes = self
            .parameter_ids()
            .into_iter()
            .map(|(name, id)| {
                if show_params {
                    Ok(format!("{}={}", name, registry.require(id)?))
                } else {
                    Ok(format!("{}={}", name, id))
                }
            })
            .collect::<Result<Vec<String>>>()?;
        Ok(format!("{}[{}]", self.label(), attributes.join(", ")))
    }
}

impl From<PointSourceModel> for Model {
    fn from(model: PointSourceModel) -> Self {
        Model::PointSource(model)
    }
}

impl From<SersicModel> for Model {
    fn from(model: SersicModel) -> Self {
        Model::Sersic(model)
    }
}
