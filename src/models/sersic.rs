//! Sérsic profile models.
//!
//! The exponential and de Vaucouleurs disks are not separate types: they are
//! [`SersicModel`]s built with the index `n` fixed to a literal, tagged with the
//! [`SersicProfile`] that produced them.

use crate::error::Result;
use crate::model::ModelArg;
use crate::models::PointSourceModel;
use crate::parameters::{ParameterId, ParameterRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

const EXPONENTIAL_INDEX: f64 = 1.0;
const DE_VAUCOULEURS_INDEX: f64 = 4.0;

/// Which Sérsic family member a model was built as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SersicProfile {
    /// Free or caller-chosen index
    General,
    /// Index fixed to 1
    Exponential,
    /// Index fixed to 4
    DeVaucouleurs,
}

impl SersicProfile {
    /// The index this profile fixes, if any
    pub fn fixed_index(self) -> Option<f64> {
        match self {
            SersicProfile::General => None,
            SersicProfile::Exponential => Some(EXPONENTIAL_INDEX),
            SersicProfile::DeVaucouleurs => Some(DE_VAUCOULEURS_INDEX),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SersicProfile::General => "Sersic",
            SersicProfile::Exponential => "Exponential",
            SersicProfile::DeVaucouleurs => "DeVaucouleurs",
        }
    }
}

/// Sérsic light profile: point source attributes plus amplitude `i0`,
/// index `n` and scale `k`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SersicModel {
    pub alpha: ParameterId,
    pub delta: ParameterId,
    pub flux: ParameterId,
    pub i0: ParameterId,
    pub n: ParameterId,
    pub k: ParameterId,
    profile: SersicProfile,
}

impl SersicModel {
    /// Create a Sérsic model with every attribute supplied
    pub fn new(
        registry: &mut ParameterRegistry,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
        i0: impl Into<ModelArg>,
        n: impl Into<ModelArg>,
        k: impl Into<ModelArg>,
    ) -> Result<Self> {
        let base = PointSourceModel::register(registry, alpha, delta, flux)?;
        Self::extend(registry, base, i0, n.into(), k, SersicProfile::General)
    }

    /// Exponential disk: a Sérsic model with `n` fixed to 1
    pub fn exponential(
        registry: &mut ParameterRegistry,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
        i0: impl Into<ModelArg>,
        k: impl Into<ModelArg>,
    ) -> Result<Self> {
        Self::with_fixed_index(
            registry,
            alpha,
            delta,
            flux,
            i0,
            k,
            SersicProfile::Exponential,
            EXPONENTIAL_INDEX,
        )
    }

    /// De Vaucouleurs profile: a Sérsic model with `n` fixed to 4
    ///
    /// # Examples
    ///
    /// ```
    /// use sourcefit_config::models::{SersicModel, SersicProfile};
    /// use sourcefit_config::parameters::ParameterRegistry;
    ///
    /// let mut registry = ParameterRegistry::new();
    /// let model = SersicModel::de_vaucouleurs(&mut registry, 1.0, 2.0, 3.0, 5.0, 2.0).unwrap();
    ///
    /// let n = registry.constant(model.n).unwrap();
    /// assert_eq!(n.init_value().literal(), Some(4.0));
    /// assert_eq!(model.profile(), SersicProfile::DeVaucouleurs);
    /// ```
    pub fn de_vaucouleurs(
        registry: &mut ParameterRegistry,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
        i0: impl Into<ModelArg>,
        k: impl Into<ModelArg>,
    ) -> Result<Self> {
        Self::with_fixed_index(
            registry,
            alpha,
            delta,
            flux,
            i0,
            k,
            SersicProfile::DeVaucouleurs,
            DE_VAUCOULEURS_INDEX,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn with_fixed_index(
        registry: &mut ParameterRegistry,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
        i0: impl Into<ModelArg>,
        k: impl Into<ModelArg>,
        profile: SersicProfile,
        index: f64,
    ) -> Result<Self> {
        let base = PointSourceModel::register(registry, alpha, delta, flux)?;
        Self::extend(registry, base, i0, ModelArg::from(index), k, profile)
    }

    /// Register `i0`, `n`, `k` (in that order) on top of a point source
    fn extend(
        registry: &mut ParameterRegistry,
        base: PointSourceModel,
        i0: impl Into<ModelArg>,
        n: ModelArg,
        k: impl Into<ModelArg>,
        profile: SersicProfile,
    ) -> Result<Self> {
        let model = Self {
            alpha: base.alpha,
            delta: base.delta,
            flux: base.flux,
            i0: i0.into().into_parameter(registry)?,
            n: n.into_parameter(registry)?,
            k: k.into().into_parameter(registry)?,
            profile,
        };
        debug!(
            "created {} model [alpha={}, delta={}, flux={}, i0={}, n={}, k={}]",
            profile.label(),
            model.alpha,
            model.delta,
            model.flux,
            model.i0,
            model.n,
            model.k
        );
        Ok(model)
    }

    pub fn profile(&self) -> SersicProfile {
        self.profile
    }

    /// The point source part of this model
    pub fn point_source(&self) -> PointSourceModel {
        PointSourceModel {
            alpha: self.alpha,
            delta: self.delta,
            flux: self.flux,
        }
    }

    pub fn parameter_ids(&self) -> [(&'static str, ParameterId); 6] {
        [
            ("alpha", self.alpha),
            ("delta", self.delta),
            ("flux", self.flux),
            ("i0", self.i0),
            ("n", self.n),
            ("k", self.k),
        ]
    }
}
