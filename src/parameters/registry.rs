//! Parameter registry
//!
//! The [`ParameterRegistry`] owns every parameter of a configuration pass, split
//! into three identifier-keyed maps (constant, free, dependent). Each parameter
//! is stored in exactly one of them. Parameters are never removed or modified
//! once registered.

use crate::error::{ConfigError, Result};
use crate::parameters::parameter::{
    ConstantParameter, DependentFn, DependentParameter, FreeParameter, ParameterId, ParameterKind,
    ParameterRef,
};
use crate::parameters::range::{Range, RangeType};
use crate::parameters::value::{InitValue, ObjectInfo};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use tracing::debug;

/// Source of column identifiers.
///
/// The fitting engine owns identifier allocation; [`SequentialAllocator`] is
/// used when no engine allocator is supplied. `None` means no identifier is
/// left to hand out.
pub trait ColumnAllocator {
    fn next_id(&mut self) -> Option<ParameterId>;
}

/// Hands out 1, 2, 3, ... up to `u64::MAX`
#[derive(Debug, Clone)]
pub struct SequentialAllocator {
    next: Option<u64>,
}

impl SequentialAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: Some(first) }
    }
}

impl Default for SequentialAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnAllocator for SequentialAllocator {
    fn next_id(&mut self) -> Option<ParameterId> {
        let current = self.next?;
        self.next = current.checked_add(1);
        Some(ParameterId::new(current))
    }
}

/// A constant or free parameter resolved against one source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundParameter {
    pub id: ParameterId,
    pub kind: ParameterKind,
    pub value: f64,
    pub limits: Option<(f64, f64)>,
    pub range_type: Option<RangeType>,
}

/// The three parameter registries of a configuration pass
pub struct ParameterRegistry {
    allocator: Box<dyn ColumnAllocator>,
    constant: BTreeMap<ParameterId, ConstantParameter>,
    free: BTreeMap<ParameterId, FreeParameter>,
    dependent: BTreeMap<ParameterId, DependentParameter>,
}

impl ParameterRegistry {
    /// Create an empty registry using a [`SequentialAllocator`]
    ///
    /// # Examples
    ///
    /// ```
    /// use sourcefit_config::parameters::{ParameterRegistry, Range};
    ///
    /// let mut registry = ParameterRegistry::new();
    /// let fixed = registry.add_constant(1.5).unwrap();
    /// let free = registry
    ///     .add_free(3.0, Some(Range::linear(0.0, 10.0).unwrap()))
    ///     .unwrap();
    ///
    /// assert_ne!(fixed, free);
    /// assert_eq!(registry.len(), 2);
    /// assert_eq!(registry.get(free).unwrap().to_string(), "(ID:2, init:3.0, range:[0.0,10.0,LIN])");
    /// ```
    pub fn new() -> Self {
        Self::with_allocator(SequentialAllocator::new())
    }

    /// Create an empty registry drawing identifiers from the engine's allocator
    pub fn with_allocator<A>(allocator: A) -> Self
    where
        A: ColumnAllocator + 'static,
    {
        Self {
            allocator: Box::new(allocator),
            constant: BTreeMap::new(),
            free: BTreeMap::new(),
            dependent: BTreeMap::new(),
        }
    }

    fn allocate(&mut self) -> Result<ParameterId> {
        let id = self.allocator.next_id().ok_or(ConfigError::IdsExhausted)?;
        if self.contains(id) {
            return Err(ConfigError::DuplicateId(id));
        }
        Ok(id)
    }

    /// Register a constant parameter
    pub fn add_constant(&mut self, init_value: impl Into<InitValue>) -> Result<ParameterId> {
        let init_value = finite(init_value.into())?;
        let id = self.allocate()?;
        let param = ConstantParameter::new(id, init_value);
        debug!("registered constant parameter {}", param);
        self.constant.insert(id, param);
        Ok(id)
    }

    /// Register a free parameter with an optional range
    pub fn add_free(
        &mut self,
        init_value: impl Into<InitValue>,
        range: Option<Range>,
    ) -> Result<ParameterId> {
        let init_value = finite(init_value.into())?;
        let id = self.allocate()?;
        let param = FreeParameter::new(id, init_value, range);
        debug!("registered free parameter {}", param);
        self.free.insert(id, param);
        Ok(id)
    }

    /// Register a dependent parameter.
    ///
    /// Every argument must already be registered, and an expression may only
    /// refer to `p0 .. p{n-1}` where `n` is the number of arguments.
    pub fn add_dependent(
        &mut self,
        function: DependentFn,
        params: &[ParameterId],
    ) -> Result<ParameterId> {
        if let Some(missing) = params.iter().find(|id| !self.contains(**id)) {
            return Err(ConfigError::MissingReference(*missing));
        }
        function.check_arity(params.len())?;

        let id = self.allocate()?;
        let param = DependentParameter::new(id, function, params.to_vec());
        debug!("registered dependent parameter {}", param);
        self.dependent.insert(id, param);
        Ok(id)
    }

    pub fn contains(&self, id: ParameterId) -> bool {
        self.kind_of(id).is_some()
    }

    /// Which registry holds `id`
    pub fn kind_of(&self, id: ParameterId) -> Option<ParameterKind> {
        self.get(id).map(|p| p.kind())
    }

    pub fn get(&self, id: ParameterId) -> Option<ParameterRef<'_>> {
        if let Some(p) = self.constant.get(&id) {
            return Some(ParameterRef::Constant(p));
        }
        if let Some(p) = self.free.get(&id) {
            return Some(ParameterRef::Free(p));
        }
        self.dependent.get(&id).map(ParameterRef::Dependent)
    }

    /// Like [`get`](Self::get), but a missing identifier is an error
    pub fn require(&self, id: ParameterId) -> Result<ParameterRef<'_>> {
        self.get(id).ok_or(ConfigError::MissingReference(id))
    }

    pub fn constant(&self, id: ParameterId) -> Option<&ConstantParameter> {
        self.constant.get(&id)
    }

    pub fn free(&self, id: ParameterId) -> Option<&FreeParameter> {
        self.free.get(&id)
    }

    pub fn dependent(&self, id: ParameterId) -> Option<&DependentParameter> {
        self.dependent.get(&id)
    }

    pub fn constants(&self) -> impl Iterator<Item = &ConstantParameter> {
        self.constant.values()
    }

    pub fn frees(&self) -> impl Iterator<Item = &FreeParameter> {
        self.free.values()
    }

    pub fn dependents(&self) -> impl Iterator<Item = &DependentParameter> {
        self.dependent.values()
    }

    /// Total number of registered parameters
    pub fn len(&self) -> usize {
        self.constant.len() + self.free.len() + self.dependent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Initial value of a constant or free parameter for the given source
    pub fn initial_value(&self, id: ParameterId, owner: &dyn ObjectInfo) -> Result<f64> {
        match self.require(id)?.init_value() {
            Some(value) => Ok(value.resolve(owner)),
            None => Err(ConfigError::NotBindable { id }),
        }
    }

    /// Resolve a constant or free parameter against one source: initial value
    /// and, for ranged free parameters, the limits around that value.
    pub fn bind(&self, id: ParameterId, owner: &dyn ObjectInfo) -> Result<BoundParameter> {
        let param = self.require(id)?;
        let value = self.initial_value(id, owner)?;
        let range = match param {
            ParameterRef::Free(p) => p.get_range(),
            _ => None,
        };

        Ok(BoundParameter {
            id,
            kind: param.kind(),
            value,
            limits: range.map(|r| r.limits(value, owner)),
            range_type: range.map(|r| r.range_type()),
        })
    }

    /// Evaluate a dependent parameter from fitted values keyed by identifier
    pub fn evaluate_dependent(
        &self,
        id: ParameterId,
        values: &BTreeMap<ParameterId, f64>,
    ) -> Result<f64> {
        let param = self
            .dependent
            .get(&id)
            .ok_or(ConfigError::MissingReference(id))?;
        let args = param
            .params()
            .iter()
            .map(|arg| values.get(arg).copied().ok_or(ConfigError::MissingReference(*arg)))
            .collect::<Result<Vec<f64>>>()?;
        param.apply(&args)
    }

    /// Write the registry listing, grouped by kind
    pub fn write_parameters<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Constant parameters:")?;
        for (id, p) in &self.constant {
            writeln!(out, "  {}: {}", id, p)?;
        }
        writeln!(out, "Free parameters:")?;
        for (id, p) in &self.free {
            writeln!(out, "  {}: {}", id, p)?;
        }
        writeln!(out, "Dependent parameters:")?;
        for (id, p) in &self.dependent {
            writeln!(out, "  {}: {}", id, p)?;
        }
        Ok(())
    }
}

/// Literal initial values must be finite numbers
fn finite(init_value: InitValue) -> Result<InitValue> {
    match init_value.literal() {
        Some(value) if !value.is_finite() => Err(ConfigError::NonFiniteValue(value)),
        _ => Ok(init_value),
    }
}

impl Default for ParameterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParameterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterRegistry")
            .field("constant", &self.constant)
            .field("free", &self.free)
            .field("dependent", &self.dependent)
            .finish_non_exhaustive()
    }
}
