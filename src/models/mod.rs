//! Built-in source models.
//!
//! - [`PointSourceModel`]: position and flux
//! - [`SersicModel`]: adds the Sérsic profile amplitude, index and scale; the
//!   exponential and de Vaucouleurs disks are Sérsic models with the index
//!   fixed to 1 and 4 (see [`SersicProfile`])

mod point_source;
mod sersic;

pub use point_source::PointSourceModel;
pub use sersic::{SersicModel, SersicProfile};
