//! Parameter ranges
//!
//! A [`Range`] tells the optimizer which interval a free parameter may explore
//! and whether to traverse it linearly or exponentially. Limits are either a
//! literal pair or a function of the parameter's current value and the owning
//! source.

use crate::parameters::value::ObjectInfo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when building a range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("Invalid range limits: low ({low}) must not exceed high ({high})")]
    InvalidLimits { low: f64, high: f64 },

    #[error("Range limits must be finite numbers, got [{low}, {high}]")]
    NonFiniteLimits { low: f64, high: f64 },
}

/// How the optimizer traverses a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeType {
    Linear,
    Exponential,
}

impl RangeType {
    /// Short tag used in debug listings
    pub fn tag(&self) -> &'static str {
        match self {
            RangeType::Linear => "LIN",
            RangeType::Exponential => "EXP",
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Function computing `(low, high)` from the current value and the owner
pub type LimitsFn = Arc<dyn Fn(f64, &dyn ObjectInfo) -> (f64, f64) + Send + Sync>;

/// Range limits
#[derive(Clone)]
pub enum Limits {
    Literal { low: f64, high: f64 },
    Computed(LimitsFn),
}

impl fmt::Debug for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limits::Literal { low, high } => f
                .debug_struct("Literal")
                .field("low", low)
                .field("high", high)
                .finish(),
            Limits::Computed(_) => f.write_str("Computed(<func>)"),
        }
    }
}

/// Bounds and traversal transform for a free parameter
#[derive(Debug, Clone)]
pub struct Range {
    limits: Limits,
    range_type: RangeType,
}

impl Range {
    /// Create a range with literal limits
    ///
    /// # Examples
    ///
    /// ```
    /// use sourcefit_config::parameters::{Range, RangeType};
    ///
    /// let range = Range::new(0.0, 10.0, RangeType::Linear).unwrap();
    /// assert_eq!(range.to_string(), "[0.0,10.0,LIN]");
    ///
    /// assert!(Range::new(10.0, 0.0, RangeType::Linear).is_err());
    /// ```
    pub fn new(low: f64, high: f64, range_type: RangeType) -> Result<Self, RangeError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(RangeError::NonFiniteLimits { low, high });
        }
        if low > high {
            return Err(RangeError::InvalidLimits { low, high });
        }

        Ok(Self {
            limits: Limits::Literal { low, high },
            range_type,
        })
    }

    pub fn linear(low: f64, high: f64) -> Result<Self, RangeError> {
        Self::new(low, high, RangeType::Linear)
    }

    pub fn exponential(low: f64, high: f64) -> Result<Self, RangeError> {
        Self::new(low, high, RangeType::Exponential)
    }

    /// Create a range whose limits depend on the current value and the owner
    pub fn computed<F>(f: F, range_type: RangeType) -> Self
    where
        F: Fn(f64, &dyn ObjectInfo) -> (f64, f64) + Send + Sync + 'static,
    {
        Self {
            limits: Limits::Computed(Arc::new(f)),
            range_type,
        }
    }

    /// Uniform accessor: always a function of `(value, owner)`.
    ///
    /// Literal limits are wrapped in a function returning them unchanged.
    pub fn limits_fn(&self) -> LimitsFn {
        match &self.limits {
            Limits::Literal { low, high } => {
                let (low, high) = (*low, *high);
                Arc::new(move |_: f64, _: &dyn ObjectInfo| (low, high))
            }
            Limits::Computed(f) => Arc::clone(f),
        }
    }

    /// Evaluate the limits for a current value and owner
    pub fn limits(&self, value: f64, owner: &dyn ObjectInfo) -> (f64, f64) {
        match &self.limits {
            Limits::Literal { low, high } => (*low, *high),
            Limits::Computed(f) => f(value, owner),
        }
    }

    /// The literal limits, if they are not computed
    pub fn literal_limits(&self) -> Option<(f64, f64)> {
        match self.limits {
            Limits::Literal { low, high } => Some((low, high)),
            Limits::Computed(_) => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.limits, Limits::Computed(_))
    }

    pub fn range_type(&self) -> RangeType {
        self.range_type
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.limits {
            Limits::Literal { low, high } => write!(f, "[{:?},{:?},{}]", low, high, self.range_type),
            Limits::Computed(_) => write!(f, "[func,{}]", self.range_type),
        }
    }
}
