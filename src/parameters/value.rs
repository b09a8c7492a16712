//! Initial values and the owning source object
//!
//! A parameter's initial value is either a literal number or a function of the
//! detected source that owns the parameter, evaluated by the engine when the
//! configuration is bound to a source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The detected source a parameter is bound to.
///
/// The fitting engine provides an implementation per source; computed initial
/// values and computed range limits receive it as their `owner` argument.
pub trait ObjectInfo {
    /// Right ascension of the source centroid (world coordinates)
    fn alpha_coord(&self) -> f64;

    /// Declination of the source centroid (world coordinates)
    fn delta_coord(&self) -> f64;

    /// Isophotal flux of the source
    fn iso_flux(&self) -> f64;

    /// Radius of the source in world coordinates
    fn radius_world(&self) -> f64;
}

/// Plain-data [`ObjectInfo`] implementation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectInfoRecord {
    pub alpha: f64,
    pub delta: f64,
    pub iso_flux: f64,
    pub radius_world: f64,
}

impl ObjectInfo for ObjectInfoRecord {
    fn alpha_coord(&self) -> f64 {
        self.alpha
    }

    fn delta_coord(&self) -> f64 {
        self.delta
    }

    fn iso_flux(&self) -> f64 {
        self.iso_flux
    }

    fn radius_world(&self) -> f64 {
        self.radius_world
    }
}

/// Function computing a value from the owning source
pub type ValueFn = Arc<dyn Fn(&dyn ObjectInfo) -> f64 + Send + Sync>;

/// Initial value of a constant or free parameter
#[derive(Clone)]
pub enum InitValue {
    /// A fixed number
    Literal(f64),

    /// Computed from the owning source at bind time
    Computed(ValueFn),
}

impl InitValue {
    /// Create a computed initial value
    ///
    /// # Examples
    ///
    /// ```
    /// use sourcefit_config::parameters::{InitValue, ObjectInfoRecord};
    ///
    /// let value = InitValue::computed(|o| o.iso_flux() * 2.0);
    /// let source = ObjectInfoRecord { iso_flux: 3.0, ..Default::default() };
    /// assert_eq!(value.resolve(&source), 6.0);
    /// ```
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&dyn ObjectInfo) -> f64 + Send + Sync + 'static,
    {
        InitValue::Computed(Arc::new(f))
    }

    /// The literal number, if this value is not computed
    pub fn literal(&self) -> Option<f64> {
        match self {
            InitValue::Literal(v) => Some(*v),
            InitValue::Computed(_) => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, InitValue::Computed(_))
    }

    /// Uniform accessor: always a function of the owner.
    ///
    /// Literal values are wrapped in a function returning the literal.
    pub fn value_fn(&self) -> ValueFn {
        match self {
            InitValue::Literal(v) => {
                let v = *v;
                Arc::new(move |_: &dyn ObjectInfo| v)
            }
            InitValue::Computed(f) => Arc::clone(f),
        }
    }

    /// Evaluate the value for a given owner
    pub fn resolve(&self, owner: &dyn ObjectInfo) -> f64 {
        match self {
            InitValue::Literal(v) => *v,
            InitValue::Computed(f) => f(owner),
        }
    }
}

impl From<f64> for InitValue {
    fn from(value: f64) -> Self {
        InitValue::Literal(value)
    }
}

impl fmt::Debug for InitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitValue::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            InitValue::Computed(_) => f.write_str("Computed(<func>)"),
        }
    }
}

impl fmt::Display for InitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitValue::Literal(v) => write!(f, "{:?}", v),
            InitValue::Computed(_) => f.write_str("func"),
        }
    }
}
