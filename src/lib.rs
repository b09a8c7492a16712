//! # sourcefit-config
//!
//! `sourcefit-config` builds declarative model fitting setups for an
//! astronomical source-extraction engine.
//!
//! The library provides:
//! - Constant, free and dependent parameters, each registered under a unique
//!   column identifier
//! - Parameter ranges with linear or exponential traversal
//! - Point source and Sérsic-family source models (exponential and
//!   de Vaucouleurs disks included)
//! - Model groups and named output columns published to the engine
//!
//! No fitting happens here: the engine reads the registries and groups from a
//! [`ConfigContext`] (or its [`ConfigSnapshot`]) and does the numerical work.
//!
//! ## Basic Usage
//!
//! ```
//! use sourcefit_config::{ConfigContext, FluxParameterType, Group, Range};
//!
//! let mut ctx = ConfigContext::new();
//! let (alpha, delta) = ctx.pos_parameters().unwrap();
//! let flux = ctx.flux_parameter(FluxParameterType::Iso).unwrap();
//! let n = ctx.free_parameter(2.0, Some(Range::linear(0.5, 8.0).unwrap())).unwrap();
//! let galaxy = ctx.sersic(alpha, delta, flux, 1.0, n, 0.3).unwrap();
//!
//! let mut group = Group::new("galaxies");
//! group.add_model(galaxy);
//! ctx.set_model_fitting_groups([group]);
//!
//! let snapshot = ctx.snapshot();
//! assert_eq!(snapshot.free.len(), 4);
//! assert_eq!(snapshot.constant.len(), 2);
//! ```

// Public modules
pub mod config;
pub mod context;
pub mod error;
pub mod group;
pub mod model;
pub mod models;
pub mod output;
pub mod parameters;
pub mod snapshot;

// Re-exports for convenience
pub use config::ModelFittingConfig;
pub use context::ConfigContext;
pub use error::{ConfigError, Result};
pub use group::{add_model, Group};
pub use model::{Model, ModelArg};
pub use models::{PointSourceModel, SersicModel, SersicProfile};
pub use output::{OutputColumn, OutputColumns};
pub use parameters::{
    DependentFn, FluxParameterType, InitValue, ObjectInfo, ObjectInfoRecord, ParameterId,
    ParameterKind, ParameterRegistry, Range, RangeType,
};
pub use snapshot::ConfigSnapshot;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
