//! Tests for source models and groups

use crate::test_helpers::galaxy;
use sourcefit_config::parameters::{ParameterKind, ParameterRegistry, Range};
use sourcefit_config::{
    add_model, ConfigError, Group, InitValue, Model, ParameterId, PointSourceModel, SersicModel,
    SersicProfile,
};

#[test]
fn test_sersic_wraps_plain_values_in_order() {
    let mut registry = ParameterRegistry::new();
    let model = SersicModel::new(&mut registry, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0).unwrap();

    // Every plain value became a constant, allocated in argument order
    assert_eq!(registry.constants().count(), 6);
    assert_eq!(
        Model::from(model).render(&registry, false).unwrap(),
        "Sersic[alpha=1, delta=2, flux=3, i0=4, n=5, k=6]"
    );
}

#[test]
fn test_fixed_index_profiles() {
    let owner = galaxy();
    for (profile, index) in [
        (SersicProfile::Exponential, 1.0),
        (SersicProfile::DeVaucouleurs, 4.0),
    ] {
        let mut registry = ParameterRegistry::new();
        let model = match profile {
            SersicProfile::Exponential => {
                SersicModel::exponential(&mut registry, 0.0, 0.0, 10.0, 1.0, 0.5).unwrap()
            }
            _ => SersicModel::de_vaucouleurs(&mut registry, 0.0, 0.0, 10.0, 1.0, 0.5).unwrap(),
        };

        assert_eq!(model.profile(), profile);
        assert_eq!(profile.fixed_index(), Some(index));
        assert_eq!(registry.kind_of(model.n), Some(ParameterKind::Constant));
        assert_eq!(registry.initial_value(model.n, &owner).unwrap(), index);

        let rendered = Model::from(model).render(&registry, true).unwrap();
        assert!(rendered.starts_with(profile.label()));
        assert!(rendered.contains(&format!("n=(ID:{}, value:{:?})", model.n, index)));
    }
}

#[test]
fn test_models_share_parameters() {
    let mut registry = ParameterRegistry::new();
    let alpha = registry.add_free(InitValue::computed(|o| o.alpha_coord()), None).unwrap();
    let delta = registry.add_free(InitValue::computed(|o| o.delta_coord()), None).unwrap();
    let flux = registry
        .add_free(100.0, Some(Range::exponential(1.0, 1e4).unwrap()))
        .unwrap();

    let point = PointSourceModel::new(&mut registry, alpha, delta, flux).unwrap();
    let disk = SersicModel::exponential(&mut registry, alpha, delta, flux, 2.0, 0.1).unwrap();

    assert_eq!(point, disk.point_source());
    // Only i0, n and k are new
    assert_eq!(registry.len(), 6);
}

#[test]
fn test_unknown_parameter_rejected() {
    let mut registry = ParameterRegistry::new();
    let err = PointSourceModel::new(&mut registry, ParameterId::new(42), 0.0, 1.0).unwrap_err();
    assert!(matches!(err, ConfigError::MissingReference(id) if id == ParameterId::new(42)));
}

#[test]
fn test_group_keeps_insertion_order() {
    let mut registry = ParameterRegistry::new();
    let star = PointSourceModel::new(&mut registry, 1.0, 2.0, 3.0).unwrap();
    let bulge = SersicModel::de_vaucouleurs(&mut registry, 1.0, 2.0, 3.0, 4.0, 5.0).unwrap();
    let disk = SersicModel::exponential(&mut registry, 1.0, 2.0, 3.0, 4.0, 5.0).unwrap();

    let mut group = Group::new("blend");
    assert!(group.is_empty());
    add_model(&mut group, star);
    add_model(&mut group, bulge);
    group.add_model(disk);

    let labels: Vec<&str> = group.models().iter().map(Model::label).collect();
    assert_eq!(labels, vec!["PointSource", "DeVaucouleurs", "Exponential"]);
    assert_eq!(group.len(), 3);
}
