//! Point source model.

use crate::error::Result;
use crate::model::ModelArg;
use crate::parameters::{ParameterId, ParameterRegistry};
use tracing::debug;

/// An unresolved source: sky position and total flux
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSourceModel {
    pub alpha: ParameterId,
    pub delta: ParameterId,
    pub flux: ParameterId,
}

impl PointSourceModel {
    /// Create a point source model
    ///
    /// # Arguments
    ///
    /// * `registry` - Registry receiving constant parameters for plain values
    /// * `alpha`, `delta` - Sky coordinates
    /// * `flux` - Total flux
    ///
    /// # Examples
    ///
    /// ```
    /// use sourcefit_config::models::PointSourceModel;
    /// use sourcefit_config::parameters::{get_pos_parameters, ParameterRegistry};
    /// use sourcefit_config::Model;
    ///
    /// let mut registry = ParameterRegistry::new();
    /// let (alpha, delta) = get_pos_parameters(&mut registry).unwrap();
    /// let model = PointSourceModel::new(&mut registry, alpha, delta, 1000.0).unwrap();
    ///
    /// assert_eq!(
    ///     Model::from(model).render(&registry, false).unwrap(),
    ///     "PointSource[alpha=1, delta=2, flux=3]"
    /// );
    /// ```
    pub fn new(
        registry: &mut ParameterRegistry,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
    ) -> Result<Self> {
        let model = Self::register(registry, alpha, delta, flux)?;
        debug!(
            "created PointSource model [alpha={}, delta={}, flux={}]",
            model.alpha, model.delta, model.flux
        );
        Ok(model)
    }

    /// Resolve `alpha`, `delta`, `flux` in that order, without logging.
    /// Shared with the Sérsic family, which logs its own creation.
    pub(crate) fn register(
        registry: &mut ParameterRegistry,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
    ) -> Result<Self> {
        Ok(Self {
            alpha: alpha.into().into_parameter(registry)?,
            delta: delta.into().into_parameter(registry)?,
            flux: flux.into().into_parameter(registry)?,
        })
    }

    pub fn parameter_ids(&self) -> [(&'static str, ParameterId); 3] {
        [
            ("alpha", self.alpha),
            ("delta", self.delta),
            ("flux", self.flux),
        ]
    }
}
