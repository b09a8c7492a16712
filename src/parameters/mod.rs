//! # Parameter System
//!
//! Parameters are the identifier-bearing quantities a model fitting setup is
//! made of. The fitting engine reads them back through the registries, keyed
//! by the column identifier each parameter received at construction.
//!
//! ## Core Components
//!
//! - [`ConstantParameter`], [`FreeParameter`], [`DependentParameter`]: the three
//!   parameter kinds
//! - [`InitValue`] and [`Range`]: literal-or-computed initial values and limits
//! - [`ParameterRegistry`]: the constant / free / dependent registries plus the
//!   identifier allocator
//! - [`Expression`]: text formulas for dependent parameters
//! - [`get_pos_parameters`] and [`get_flux_parameter`]: common free parameters
//!
//! ## Example Usage
//!
//! ```rust
//! use sourcefit_config::parameters::{
//!     get_flux_parameter, DependentFn, FluxParameterType, ObjectInfoRecord, ParameterRegistry,
//! };
//!
//! let mut registry = ParameterRegistry::new();
//! let flux = get_flux_parameter(&mut registry, FluxParameterType::Iso).unwrap();
//! let zero_point = registry.add_constant(25.0).unwrap();
//!
//! // AB magnitude derived from the fitted flux
//! let mag = registry
//!     .add_dependent(
//!         DependentFn::expression("p1 - 2.5 * log10(p0)").unwrap(),
//!         &[flux, zero_point],
//!     )
//!     .unwrap();
//!
//! let source = ObjectInfoRecord { iso_flux: 100.0, ..Default::default() };
//! assert_eq!(registry.initial_value(flux, &source).unwrap(), 100.0);
//! assert_eq!(registry.dependent(mag).unwrap().apply(&[100.0, 25.0]).unwrap(), 20.0);
//! ```

pub mod expression;
pub mod parameter;
pub mod presets;
pub mod range;
pub mod registry;
pub mod value;


// Re-export key types
pub use expression::{EvaluationContext, Expression, ExpressionError};
pub use parameter::{
    ConstantParameter, DependentFn, DependentParameter, FreeParameter, ParameterId, ParameterKind,
    ParameterRef,
};
pub use presets::{get_flux_parameter, get_pos_parameters, FluxParameterType};
pub use range::{Limits, Range, RangeError, RangeType};
pub use registry::{BoundParameter, ColumnAllocator, ParameterRegistry, SequentialAllocator};
pub use value::{InitValue, ObjectInfo, ObjectInfoRecord};
