//! Bulge plus disk setup for a single galaxy
//!
//! Builds a configuration pass, prints the registries and output columns, and
//! dumps the snapshot the engine would read.
//!
//! Run with `RUST_LOG=debug` to see every registration.

use sourcefit_config::{
    ConfigContext, DependentFn, FluxParameterType, Group, ModelFittingConfig, Range, Result,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut ctx =
        ConfigContext::new().with_config(ModelFittingConfig::new().with_max_iterations(500))?;

    let (alpha, delta) = ctx.pos_parameters()?;
    let bulge_flux = ctx.flux_parameter(FluxParameterType::Iso)?;
    let disk_flux = ctx.flux_parameter(FluxParameterType::Iso)?;
    let bulge_scale = ctx.free_parameter(1.0, Some(Range::exponential(0.01, 100.0)?))?;
    let disk_scale = ctx.free_parameter(0.5, Some(Range::exponential(0.01, 100.0)?))?;

    let bulge = ctx.de_vaucouleurs(alpha, delta, bulge_flux, 1.0, bulge_scale)?;
    let disk = ctx.exponential(alpha, delta, disk_flux, 1.0, disk_scale)?;

    let total = ctx.dependent_parameter(
        DependentFn::expression("p0 + p1")?,
        &[bulge_flux, disk_flux],
    )?;
    let mag = ctx.dependent_parameter(
        DependentFn::computed(|v| -2.5 * v[0].log10()),
        &[total],
    )?;

    ctx.add_output_column("flux_total", total)?;
    ctx.add_output_column("mag_total", mag)?;
    ctx.add_output_column("bulge_scale", bulge_scale)?;

    let mut group = Group::new("galaxy");
    group.add_model(bulge);
    group.add_model(disk);
    ctx.set_model_fitting_groups([group]);

    for group in ctx.model_fitting_groups() {
        for model in group.models() {
            info!("{}: {}", group.name(), model.render(ctx.parameters(), false)?);
        }
    }

    ctx.print_parameters()?;
    ctx.print_output_columns()?;
    println!("{}", ctx.snapshot().to_json()?);
    Ok(())
}
