//! Integration tests for the position and flux presets

use crate::test_helpers::galaxy;
use approx::assert_relative_eq;
use sourcefit_config::parameters::{
    get_flux_parameter, get_pos_parameters, FluxParameterType, ParameterKind, ParameterRegistry,
    RangeType,
};

#[test]
fn test_flux_parameter_default_kind() {
    let mut registry = ParameterRegistry::new();
    let flux = get_flux_parameter(&mut registry, FluxParameterType::default()).unwrap();

    assert_eq!(registry.kind_of(flux), Some(ParameterKind::Free));
    let range = registry.free(flux).unwrap().get_range().unwrap();
    assert_eq!(range.range_type(), RangeType::Exponential);

    let owner = galaxy();
    for v in [1.0, 842.5, 1e7] {
        let (low, high) = range.limits(v, &owner);
        assert_relative_eq!(low, v * 1e-3);
        assert_relative_eq!(high, v * 1e3);
    }

    let bound = registry.bind(flux, &owner).unwrap();
    assert_eq!(bound.value, 842.5);
    assert_relative_eq!(bound.limits.unwrap().0, 0.8425);
    assert_relative_eq!(bound.limits.unwrap().1, 842500.0);
}

#[test]
fn test_position_parameters_follow_radius() {
    let mut registry = ParameterRegistry::new();
    let (alpha, delta) = get_pos_parameters(&mut registry).unwrap();
    assert_ne!(alpha, delta);

    let owner = galaxy();
    for (id, centre) in [(alpha, owner.alpha), (delta, owner.delta)] {
        let bound = registry.bind(id, &owner).unwrap();
        assert_eq!(bound.value, centre);
        assert_eq!(bound.range_type, Some(RangeType::Linear));
        let (low, high) = bound.limits.unwrap();
        assert_relative_eq!(high - low, 2.0 * owner.radius_world, epsilon = 1e-9);
        assert_relative_eq!((high + low) / 2.0, centre, epsilon = 1e-9);
    }
}
