//! Integration tests for the parameter system

// Tests for parameter construction and registries
mod registry_tests;

// Tests for dependent parameter formulas
mod expression_tests;

// Tests for the position and flux presets
mod presets_tests;
