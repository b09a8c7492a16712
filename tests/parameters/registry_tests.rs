//! Integration tests for parameter registration
//!
//! These tests check identifier allocation and the one-registry-per-parameter
//! invariant through the public API.

use crate::test_helpers::{galaxy, init_logging};
use sourcefit_config::parameters::{
    ColumnAllocator, DependentFn, InitValue, ParameterId, ParameterKind, ParameterRegistry, Range,
    RangeType,
};
use sourcefit_config::ConfigError;
use std::collections::BTreeMap;

/// Engine-style allocator handing out sparse identifiers
struct EngineColumns {
    next: u64,
}

impl ColumnAllocator for EngineColumns {
    fn next_id(&mut self) -> Option<ParameterId> {
        self.next = self.next.checked_add(10)?;
        Some(ParameterId::new(self.next))
    }
}

#[test]
fn test_engine_allocator_ids_are_used() {
    init_logging();
    let mut registry = ParameterRegistry::with_allocator(EngineColumns { next: 100 });
    let a = registry.add_constant(1.0).unwrap();
    let b = registry.add_free(2.0, None).unwrap();

    assert_eq!(a, ParameterId::new(110));
    assert_eq!(b, ParameterId::new(120));
    assert_eq!(
        registry.get(b).unwrap().to_string(),
        "(ID:120, init:2.0)"
    );
}

#[test]
fn test_kinds_are_disjoint() {
    let mut registry = ParameterRegistry::new();
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(registry.add_constant(i as f64).unwrap());
        ids.push(
            registry
                .add_free(i as f64, Some(Range::linear(-1.0, 10.0).unwrap()))
                .unwrap(),
        );
    }
    let dep = registry
        .add_dependent(DependentFn::computed(|v| v.iter().sum()), &ids)
        .unwrap();
    ids.push(dep);

    let mut seen = std::collections::HashSet::new();
    for id in &ids {
        assert!(seen.insert(*id), "identifier {} allocated twice", id);
    }

    assert_eq!(registry.constants().count(), 5);
    assert_eq!(registry.frees().count(), 5);
    assert_eq!(registry.dependents().count(), 1);
    assert_eq!(registry.len(), 11);
    assert_eq!(registry.kind_of(dep), Some(ParameterKind::Dependent));
    assert_eq!(registry.dependent(dep).unwrap().params(), &ids[..10]);
}

#[test]
fn test_missing_reference_is_reported_at_build_time() {
    let mut registry = ParameterRegistry::new();
    let err = registry
        .add_dependent(
            DependentFn::computed(|v| v[0]),
            &[ParameterId::new(404)],
        )
        .unwrap_err();

    assert!(matches!(err, ConfigError::MissingReference(id) if id.get() == 404));
    assert!(err.to_string().contains("404"));
    assert!(registry.is_empty());
}

#[test]
fn test_bind_literal_and_computed() {
    let mut registry = ParameterRegistry::new();
    let fixed = registry.add_constant(7.0).unwrap();
    let seeded = registry
        .add_free(
            InitValue::computed(|o| o.iso_flux() / 2.0),
            Some(Range::new(0.0, 1e6, RangeType::Exponential).unwrap()),
        )
        .unwrap();

    let owner = galaxy();
    assert_eq!(registry.initial_value(fixed, &owner).unwrap(), 7.0);

    let bound = registry.bind(seeded, &owner).unwrap();
    assert_eq!(bound.kind, ParameterKind::Free);
    assert_eq!(bound.value, 421.25);
    assert_eq!(bound.limits, Some((0.0, 1e6)));
    assert_eq!(bound.range_type, Some(RangeType::Exponential));

    assert!(matches!(
        registry.bind(ParameterId::new(999), &owner),
        Err(ConfigError::MissingReference(_))
    ));
}

#[test]
fn test_evaluate_dependent_by_identifier() {
    let mut registry = ParameterRegistry::new();
    let major = registry.add_free(4.0, None).unwrap();
    let minor = registry.add_free(2.0, None).unwrap();
    let axis_ratio = registry
        .add_dependent(DependentFn::computed(|v| v[1] / v[0]), &[major, minor])
        .unwrap();

    let fitted: BTreeMap<ParameterId, f64> = [(major, 5.0), (minor, 4.0)].into_iter().collect();
    assert_eq!(registry.evaluate_dependent(axis_ratio, &fitted).unwrap(), 0.8);

    // Only dependent parameters can be evaluated
    assert!(matches!(
        registry.evaluate_dependent(major, &fitted),
        Err(ConfigError::MissingReference(_))
    ));
}

#[test]
fn test_listing_lists_every_kind() {
    let mut registry = ParameterRegistry::new();
    let a = registry.add_constant(InitValue::computed(|o| o.radius_world())).unwrap();
    let b = registry
        .add_free(
            1.0,
            Some(Range::computed(|v, _| (v / 2.0, v * 2.0), RangeType::Exponential)),
        )
        .unwrap();
    registry
        .add_dependent(DependentFn::expression("p0 + p1").unwrap(), &[a, b])
        .unwrap();

    let mut out = Vec::new();
    registry.write_parameters(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Constant parameters:",
            "  1: (ID:1, value:func)",
            "Free parameters:",
            "  2: (ID:2, init:1.0, range:[func,EXP])",
            "Dependent parameters:",
            "  3: (ID:3, func:p0 + p1, params:[1,2])",
        ]
    );
}
