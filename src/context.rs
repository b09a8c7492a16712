//! The configuration context.
//!
//! A [`ConfigContext`] holds all state of one configuration pass: the parameter
//! registries, the output columns, the published model fitting groups and the
//! fitting options. Build one per pass and hand it to the engine when done.

use crate::config::ModelFittingConfig;
use crate::error::Result;
use crate::group::Group;
use crate::models::{PointSourceModel, SersicModel};
use crate::model::ModelArg;
use crate::output::OutputColumns;
use crate::parameters::{
    get_flux_parameter, get_pos_parameters, ColumnAllocator, DependentFn, FluxParameterType,
    InitValue, ParameterId, ParameterRegistry, Range,
};
use crate::snapshot::ConfigSnapshot;
use std::io;
use tracing::{debug, warn};

/// State of one configuration pass
///
/// # Examples
///
/// ```
/// use sourcefit_config::{ConfigContext, FluxParameterType, Group};
///
/// let mut ctx = ConfigContext::new();
/// let (alpha, delta) = ctx.pos_parameters().unwrap();
/// let flux = ctx.flux_parameter(FluxParameterType::Iso).unwrap();
/// let i0 = ctx.free_parameter(1.0, None).unwrap();
/// let disk = ctx.exponential(alpha, delta, flux, i0, 0.5).unwrap();
///
/// let mut group = Group::new("all");
/// group.add_model(disk);
/// ctx.set_model_fitting_groups([group]);
///
/// assert_eq!(ctx.model_fitting_groups().len(), 1);
/// assert_eq!(
///     ctx.model_fitting_groups()[0].models()[0]
///         .render(ctx.parameters(), false)
///         .unwrap(),
///     "Exponential[alpha=1, delta=2, flux=3, i0=4, n=5, k=6]"
/// );
/// ```
#[derive(Debug, Default)]
pub struct ConfigContext {
    parameters: ParameterRegistry,
    output_columns: OutputColumns,
    model_fitting_groups: Vec<Group>,
    config: ModelFittingConfig,
}

impl ConfigContext {
    /// Empty context with sequential identifiers and default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty context drawing identifiers from the engine's allocator
    pub fn with_allocator<A>(allocator: A) -> Self
    where
        A: ColumnAllocator + 'static,
    {
        Self {
            parameters: ParameterRegistry::with_allocator(allocator),
            ..Self::default()
        }
    }

    /// Use the given fitting options, after validating them
    pub fn with_config(mut self, config: ModelFittingConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &ModelFittingConfig {
        &self.config
    }

    pub fn parameters(&self) -> &ParameterRegistry {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterRegistry {
        &mut self.parameters
    }

    pub fn constant_parameter(&mut self, init_value: impl Into<InitValue>) -> Result<ParameterId> {
        self.parameters.add_constant(init_value)
    }

    pub fn free_parameter(
        &mut self,
        init_value: impl Into<InitValue>,
        range: Option<Range>,
    ) -> Result<ParameterId> {
        self.parameters.add_free(init_value, range)
    }

    pub fn dependent_parameter(
        &mut self,
        function: DependentFn,
        params: &[ParameterId],
    ) -> Result<ParameterId> {
        self.parameters.add_dependent(function, params)
    }

    /// See [`get_pos_parameters`]
    pub fn pos_parameters(&mut self) -> Result<(ParameterId, ParameterId)> {
        get_pos_parameters(&mut self.parameters)
    }

    /// See [`get_flux_parameter`]
    pub fn flux_parameter(&mut self, kind: FluxParameterType) -> Result<ParameterId> {
        get_flux_parameter(&mut self.parameters, kind)
    }

    pub fn point_source(
        &mut self,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
    ) -> Result<PointSourceModel> {
        PointSourceModel::new(&mut self.parameters, alpha, delta, flux)
    }

    pub fn sersic(
        &mut self,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
        i0: impl Into<ModelArg>,
        n: impl Into<ModelArg>,
        k: impl Into<ModelArg>,
    ) -> Result<SersicModel> {
        SersicModel::new(&mut self.parameters, alpha, delta, flux, i0, n, k)
    }

    pub fn exponential(
        &mut self,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
        i0: impl Into<ModelArg>,
        k: impl Into<ModelArg>,
    ) -> Result<SersicModel> {
        SersicModel::exponential(&mut self.parameters, alpha, delta, flux, i0, k)
    }

    pub fn de_vaucouleurs(
        &mut self,
        alpha: impl Into<ModelArg>,
        delta: impl Into<ModelArg>,
        flux: impl Into<ModelArg>,
        i0: impl Into<ModelArg>,
        k: impl Into<ModelArg>,
    ) -> Result<SersicModel> {
        SersicModel::de_vaucouleurs(&mut self.parameters, alpha, delta, flux, i0, k)
    }

    /// Publish the groups the engine will fit, replacing any earlier list
    pub fn set_model_fitting_groups<I>(&mut self, groups: I)
    where
        I: IntoIterator<Item = Group>,
    {
        let groups: Vec<Group> = groups.into_iter().collect();
        if !self.model_fitting_groups.is_empty() {
            warn!(
                "replacing {} published model fitting groups with {}",
                self.model_fitting_groups.len(),
                groups.len()
            );
        }
        debug!(
            "published {} model fitting groups ({} models)",
            groups.len(),
            groups.iter().map(Group::len).sum::<usize>()
        );
        self.model_fitting_groups = groups;
    }

    pub fn model_fitting_groups(&self) -> &[Group] {
        &self.model_fitting_groups
    }

    /// Expose a parameter as a named catalog column
    pub fn add_output_column(&mut self, name: impl Into<String>, source: ParameterId) -> Result<()> {
        self.output_columns.add(&self.parameters, name, source)
    }

    pub fn output_columns(&self) -> &OutputColumns {
        &self.output_columns
    }

    pub fn write_parameters<W: io::Write>(&self, out: &mut W) -> Result<()> {
        Ok(self.parameters.write_parameters(out)?)
    }

    /// Print the parameter registries to stdout
    pub fn print_parameters(&self) -> Result<()> {
        self.write_parameters(&mut io::stdout().lock())
    }

    pub fn write_output_columns<W: io::Write>(&self, out: &mut W) -> Result<()> {
        self.output_columns.write(&self.parameters, out)
    }

    /// Print the output columns to stdout
    pub fn print_output_columns(&self) -> Result<()> {
        self.write_output_columns(&mut io::stdout().lock())
    }

    /// Serializable description of everything registered so far
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::capture(
            &self.config,
            &self.parameters,
            &self.model_fitting_groups,
            &self.output_columns,
        )
    }
}
