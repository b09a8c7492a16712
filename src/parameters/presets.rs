//! Ready-made free parameters for the usual source attributes

use crate::error::Result;
use crate::parameters::parameter::ParameterId;
use crate::parameters::range::{Range, RangeType};
use crate::parameters::registry::ParameterRegistry;
use crate::parameters::value::{InitValue, ObjectInfo};
use serde::{Deserialize, Serialize};

/// Which flux measurement seeds a flux parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluxParameterType {
    /// Isophotal flux
    #[default]
    Iso,
}

impl FluxParameterType {
    /// Accessor reading this flux from the owning source
    pub fn accessor(self) -> fn(&dyn ObjectInfo) -> f64 {
        match self {
            FluxParameterType::Iso => |o: &dyn ObjectInfo| o.iso_flux(),
        }
    }
}

/// Free sky-coordinate parameters `(alpha, delta)`.
///
/// Both start at the source centroid and may move linearly by up to the
/// source radius in either direction.
pub fn get_pos_parameters(registry: &mut ParameterRegistry) -> Result<(ParameterId, ParameterId)> {
    let alpha = registry.add_free(
        InitValue::computed(|o| o.alpha_coord()),
        Some(within_radius()),
    )?;
    let delta = registry.add_free(
        InitValue::computed(|o| o.delta_coord()),
        Some(within_radius()),
    )?;
    Ok((alpha, delta))
}

fn within_radius() -> Range {
    Range::computed(
        |v, o| (v - o.radius_world(), v + o.radius_world()),
        RangeType::Linear,
    )
}

/// Free flux parameter seeded from the source's measured flux, explored
/// exponentially over six decades around it.
pub fn get_flux_parameter(
    registry: &mut ParameterRegistry,
    kind: FluxParameterType,
) -> Result<ParameterId> {
    let accessor = kind.accessor();
    registry.add_free(
        InitValue::computed(move |o| accessor(o)),
        Some(Range::computed(
            |v, _| (v * 1e-3, v * 1e3),
            RangeType::Exponential,
        )),
    )
}
