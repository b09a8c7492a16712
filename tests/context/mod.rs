//! End-to-end configuration passes through `ConfigContext`

use crate::test_helpers::{galaxy, init_logging};
use sourcefit_config::parameters::{ParameterKind, SequentialAllocator};
use sourcefit_config::snapshot::ValueEntry;
use sourcefit_config::{
    ConfigContext, ConfigError, ConfigSnapshot, DependentFn, FluxParameterType, Group,
    ModelFittingConfig, Range,
};

/// Bulge plus disk decomposition with a derived bulge-to-total ratio
fn bulge_disk(ctx: &mut ConfigContext) -> Vec<Group> {
    let (alpha, delta) = ctx.pos_parameters().unwrap();
    let bulge_flux = ctx.flux_parameter(FluxParameterType::Iso).unwrap();
    let disk_flux = ctx.flux_parameter(FluxParameterType::Iso).unwrap();
    let scale = ctx
        .free_parameter(1.0, Some(Range::exponential(0.01, 100.0).unwrap()))
        .unwrap();

    let bulge = ctx
        .de_vaucouleurs(alpha, delta, bulge_flux, 1.0, scale)
        .unwrap();
    let disk = ctx.exponential(alpha, delta, disk_flux, 1.0, scale).unwrap();

    let ratio = ctx
        .dependent_parameter(
            DependentFn::expression("p0 / (p0 + p1)").unwrap(),
            &[bulge_flux, disk_flux],
        )
        .unwrap();
    ctx.add_output_column("bulge_to_total", ratio).unwrap();
    ctx.add_output_column("disk_flux", disk_flux).unwrap();

    let mut group = Group::new("galaxy");
    group.add_model(bulge);
    group.add_model(disk);
    vec![group]
}

#[test]
fn test_full_pass() {
    init_logging();
    let mut ctx = ConfigContext::new();
    let groups = bulge_disk(&mut ctx);
    ctx.set_model_fitting_groups(groups);

    let registry = ctx.parameters();
    assert_eq!(registry.frees().count(), 5);
    // i0 and n for each model
    assert_eq!(registry.constants().count(), 4);
    assert_eq!(registry.dependents().count(), 1);

    let ratio = ctx.output_columns().get("bulge_to_total").unwrap().source;
    assert_eq!(registry.kind_of(ratio), Some(ParameterKind::Dependent));
    assert_eq!(
        registry.dependent(ratio).unwrap().apply(&[1.0, 3.0]).unwrap(),
        0.25
    );

    let owner = galaxy();
    let disk_flux = ctx.output_columns().get("disk_flux").unwrap().source;
    assert_eq!(registry.bind(disk_flux, &owner).unwrap().value, 842.5);
}

#[test]
fn test_listing_output() {
    let mut ctx = ConfigContext::new();
    let flux = ctx.free_parameter(5.0, Some(Range::linear(1.0, 2.0).unwrap())).unwrap();
    ctx.constant_parameter(3.0).unwrap();
    ctx.add_output_column("flux", flux).unwrap();

    let mut out = Vec::new();
    ctx.write_parameters(&mut out).unwrap();
    ctx.write_output_columns(&mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Constant parameters:\n  2: (ID:2, value:3.0)\n\
         Free parameters:\n  1: (ID:1, init:5.0, range:[1.0,2.0,LIN])\n\
         Dependent parameters:\n\
         Output columns:\n  flux: (ID:1, init:5.0, range:[1.0,2.0,LIN])\n"
    );
}

#[test]
fn test_groups_replaced_not_merged() {
    init_logging();
    let mut ctx = ConfigContext::new();
    let groups = bulge_disk(&mut ctx);
    ctx.set_model_fitting_groups(groups);
    assert_eq!(ctx.model_fitting_groups()[0].len(), 2);

    ctx.set_model_fitting_groups(Vec::new());
    assert!(ctx.model_fitting_groups().is_empty());
}

#[test]
fn test_output_column_errors() {
    let mut ctx = ConfigContext::new();
    let flux = ctx.flux_parameter(FluxParameterType::default()).unwrap();
    ctx.add_output_column("flux", flux).unwrap();

    assert!(matches!(
        ctx.add_output_column("flux", flux),
        Err(ConfigError::DuplicateOutputColumn(_))
    ));
    assert_eq!(ctx.output_columns().len(), 1);
}

#[test]
fn test_engine_allocator_and_config() {
    let mut ctx = ConfigContext::with_allocator(SequentialAllocator::starting_at(500))
        .with_config(ModelFittingConfig::new().with_max_iterations(200))
        .unwrap();
    let id = ctx.constant_parameter(1.0).unwrap();

    assert_eq!(id.get(), 500);
    assert_eq!(ctx.config().max_iterations, 200);
}

#[test]
fn test_snapshot_file_round_trip() {
    let mut ctx = ConfigContext::new();
    let groups = bulge_disk(&mut ctx);
    ctx.set_model_fitting_groups(groups);
    let snapshot = ctx.snapshot();

    assert_eq!(snapshot.groups[0].models[0].model, "DeVaucouleurs");
    assert_eq!(snapshot.groups[0].models[1].parameters[4].0, "n");
    assert_eq!(snapshot.dependent[0].formula.as_deref(), Some("p0 / (p0 + p1)"));
    assert_eq!(snapshot.free[0].init, ValueEntry::Computed);
    assert_eq!(snapshot.output_columns.len(), 2);

    let path = std::env::temp_dir().join(format!(
        "sourcefit_config_snapshot_{}.json",
        std::process::id()
    ));
    snapshot.save_json(&path).unwrap();
    let loaded = ConfigSnapshot::load_json(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, snapshot);
}

#[test]
fn test_non_finite_literals_never_reach_snapshot() {
    let mut ctx = ConfigContext::new();
    assert!(matches!(
        ctx.constant_parameter(f64::NAN),
        Err(ConfigError::NonFiniteValue(_))
    ));
    assert!(matches!(
        ctx.point_source(f64::INFINITY, 0.0, 1.0),
        Err(ConfigError::NonFiniteValue(_))
    ));
    ctx.constant_parameter(2.5).unwrap();

    let json = ctx.snapshot().to_json().unwrap();
    let back = ConfigSnapshot::from_json(&json).unwrap();
    assert_eq!(back.constant.len(), 1);
    assert_eq!(back.constant[0].init, ValueEntry::Literal(2.5));
}
