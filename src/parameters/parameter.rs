//! Parameter definitions
//!
//! Three kinds of parameter take part in a model fitting setup:
//!
//! - [`ConstantParameter`]: fixed during the fit, with a literal or computed
//!   initial value
//! - [`FreeParameter`]: optimized by the engine, starting from its initial
//!   value and optionally limited to a [`Range`]
//! - [`DependentParameter`]: derived after the fit from other parameters,
//!   which it refers to by identifier only
//!
//! Every parameter carries the [`ParameterId`] the engine allocated for its
//! output column.

use crate::parameters::expression::{ArgumentValues, Expression, ExpressionError};
use crate::parameters::range::Range;
use crate::parameters::value::{InitValue, ValueFn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of an engine column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterId(u64);

impl ParameterId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which registry a parameter lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Constant,
    Free,
    Dependent,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterKind::Constant => "constant",
            ParameterKind::Free => "free",
            ParameterKind::Dependent => "dependent",
        };
        f.write_str(name)
    }
}

/// A parameter held fixed during the fit
#[derive(Debug, Clone)]
pub struct ConstantParameter {
    id: ParameterId,
    init_value: InitValue,
}

impl ConstantParameter {
    pub(crate) fn new(id: ParameterId, init_value: InitValue) -> Self {
        Self { id, init_value }
    }

    pub fn id(&self) -> ParameterId {
        self.id
    }

    pub fn init_value(&self) -> &InitValue {
        &self.init_value
    }

    /// The initial value as a function of the owning source
    pub fn get_init_value(&self) -> ValueFn {
        self.init_value.value_fn()
    }
}

impl fmt::Display for ConstantParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ID:{}, value:{})", self.id, self.init_value)
    }
}

/// A parameter the engine optimizes
#[derive(Debug, Clone)]
pub struct FreeParameter {
    id: ParameterId,
    init_value: InitValue,
    range: Option<Range>,
}

impl FreeParameter {
    pub(crate) fn new(id: ParameterId, init_value: InitValue, range: Option<Range>) -> Self {
        Self {
            id,
            init_value,
            range,
        }
    }

    pub fn id(&self) -> ParameterId {
        self.id
    }

    pub fn init_value(&self) -> &InitValue {
        &self.init_value
    }

    /// The initial value as a function of the owning source
    pub fn get_init_value(&self) -> ValueFn {
        self.init_value.value_fn()
    }

    pub fn get_range(&self) -> Option<&Range> {
        self.range.as_ref()
    }
}

impl fmt::Display for FreeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ID:{}, init:{}", self.id, self.init_value)?;
        if let Some(range) = &self.range {
            write!(f, ", range:{}", range)?;
        }
        f.write_str(")")
    }
}

/// Closure computing a dependent value from its argument values
pub type DependentClosure = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// How a dependent parameter derives its value
#[derive(Clone)]
pub enum DependentFn {
    Computed(DependentClosure),
    Expression { source: String, expr: Expression },
}

impl DependentFn {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        DependentFn::Computed(Arc::new(f))
    }

    /// Parse a formula over the positional arguments `p0`, `p1`, ...
    pub fn expression(source: &str) -> Result<Self, ExpressionError> {
        let expr = Expression::parse(source)?;
        Ok(DependentFn::Expression {
            source: source.trim().to_string(),
            expr,
        })
    }

    /// Formula text, if this function is an expression
    pub fn source(&self) -> Option<&str> {
        match self {
            DependentFn::Computed(_) => None,
            DependentFn::Expression { source, .. } => Some(source),
        }
    }

    pub(crate) fn check_arity(&self, arity: usize) -> Result<(), ExpressionError> {
        match self {
            DependentFn::Computed(_) => Ok(()),
            DependentFn::Expression { expr, .. } => expr.check_arguments(arity),
        }
    }

    fn call(&self, values: &[f64]) -> Result<f64, ExpressionError> {
        match self {
            DependentFn::Computed(f) => Ok(f(values)),
            DependentFn::Expression { expr, .. } => expr.evaluate(&ArgumentValues(values)),
        }
    }
}

impl fmt::Debug for DependentFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependentFn::Computed(_) => f.write_str("Computed(<func>)"),
            DependentFn::Expression { source, .. } => {
                f.debug_tuple("Expression").field(source).finish()
            }
        }
    }
}

impl fmt::Display for DependentFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependentFn::Computed(_) => f.write_str("func"),
            DependentFn::Expression { source, .. } => f.write_str(source),
        }
    }
}

/// A parameter derived from other parameters after the fit
///
/// Only the identifiers of the arguments are stored; the engine resolves them
/// against the registries.
#[derive(Debug, Clone)]
pub struct DependentParameter {
    id: ParameterId,
    function: DependentFn,
    params: Vec<ParameterId>,
}

impl DependentParameter {
    pub(crate) fn new(id: ParameterId, function: DependentFn, params: Vec<ParameterId>) -> Self {
        Self {
            id,
            function,
            params,
        }
    }

    pub fn id(&self) -> ParameterId {
        self.id
    }

    pub fn function(&self) -> &DependentFn {
        &self.function
    }

    /// Argument identifiers, in call order
    pub fn params(&self) -> &[ParameterId] {
        &self.params
    }

    /// Apply the function to argument values given in [`params`](Self::params) order.
    ///
    /// Intended for the engine side once fitted values are known.
    pub fn apply(&self, values: &[f64]) -> crate::Result<f64> {
        if values.len() != self.params.len() {
            return Err(crate::ConfigError::ArityMismatch {
                id: self.id,
                expected: self.params.len(),
                got: values.len(),
            });
        }
        Ok(self.function.call(values)?)
    }
}

impl fmt::Display for DependentParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "(ID:{}, func:{}, params:[{}])", self.id, self.function, params)
    }
}

/// Borrowed view of a registered parameter of any kind
#[derive(Debug, Clone, Copy)]
pub enum ParameterRef<'a> {
    Constant(&'a ConstantParameter),
    Free(&'a FreeParameter),
    Dependent(&'a DependentParameter),
}

impl ParameterRef<'_> {
    pub fn id(&self) -> ParameterId {
        match self {
            ParameterRef::Constant(p) => p.id(),
            ParameterRef::Free(p) => p.id(),
            ParameterRef::Dependent(p) => p.id(),
        }
    }

    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterRef::Constant(_) => ParameterKind::Constant,
            ParameterRef::Free(_) => ParameterKind::Free,
            ParameterRef::Dependent(_) => ParameterKind::Dependent,
        }
    }

    /// Initial value, for constant and free parameters
    pub fn init_value(&self) -> Option<&InitValue> {
        match self {
            ParameterRef::Constant(p) => Some(p.init_value()),
            ParameterRef::Free(p) => Some(p.init_value()),
            ParameterRef::Dependent(_) => None,
        }
    }
}

impl fmt::Display for ParameterRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterRef::Constant(p) => fmt::Display::fmt(p, f),
            ParameterRef::Free(p) => fmt::Display::fmt(p, f),
            ParameterRef::Dependent(p) => fmt::Display::fmt(p, f),
        }
    }
}
