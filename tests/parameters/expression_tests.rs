//! Integration tests for dependent parameter formulas

use sourcefit_config::parameters::expression::{ArgumentValues, Expression, ExpressionError};
use sourcefit_config::parameters::{DependentFn, ParameterRegistry};
use sourcefit_config::ConfigError;

#[test]
fn test_magnitude_formula() {
    let expr = Expression::parse("zp - 2.5 * log10(flux)").unwrap();
    let mut vars = std::collections::HashMap::new();
    vars.insert("zp".to_string(), 30.0);
    vars.insert("flux".to_string(), 1000.0);
    assert!((expr.evaluate(&vars).unwrap() - 22.5).abs() < 1e-12);
}

#[test]
fn test_positional_arguments() {
    let expr = Expression::parse("(p0 - p1) / (p0 + p1)").unwrap();
    assert_eq!(expr.evaluate(&ArgumentValues(&[3.0, 1.0])).unwrap(), 0.5);
    assert_eq!(
        expr.evaluate(&ArgumentValues(&[3.0])),
        Err(ExpressionError::UndefinedVariable {
            name: "p1".to_string()
        })
    );
}

#[test]
fn test_formula_checked_against_argument_count() {
    let mut registry = ParameterRegistry::new();
    let a = registry.add_free(1.0, None).unwrap();
    let b = registry.add_free(2.0, None).unwrap();

    let unknown = registry.add_dependent(DependentFn::expression("scale + p0").unwrap(), &[a]);
    assert!(matches!(
        unknown,
        Err(ConfigError::Expression(ExpressionError::UndefinedVariable { .. }))
    ));

    let id = registry
        .add_dependent(DependentFn::expression("sqrt(p0^2 + p1^2)").unwrap(), &[a, b])
        .unwrap();
    let param = registry.dependent(id).unwrap();
    assert_eq!(param.function().source(), Some("sqrt(p0^2 + p1^2)"));
    assert_eq!(param.apply(&[3.0, 4.0]).unwrap(), 5.0);
}

#[test]
fn test_bad_formula_rejected() {
    assert!(matches!(
        DependentFn::expression("p0 +* p1"),
        Err(ExpressionError::ParseError { .. })
    ));
}
