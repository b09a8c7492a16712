//! Named output columns backed by registered parameters.

use crate::error::{ConfigError, Result};
use crate::parameters::{ParameterId, ParameterRegistry};
use serde::{Deserialize, Serialize};
use std::io;
use tracing::debug;

/// Catalog column written by the engine from a parameter's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputColumn {
    pub name: String,
    pub source: ParameterId,
}

/// Output columns in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputColumns {
    columns: Vec<OutputColumn>,
}

impl OutputColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a column. The source must be registered and the name unused.
    pub fn add(
        &mut self,
        registry: &ParameterRegistry,
        name: impl Into<String>,
        source: ParameterId,
    ) -> Result<()> {
        let name = name.into();
        registry.require(source)?;
        if self.get(&name).is_some() {
            return Err(ConfigError::DuplicateOutputColumn(name));
        }
        debug!("added output column '{}' from parameter {}", name, source);
        self.columns.push(OutputColumn { name, source });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&OutputColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputColumn> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Write the column listing with each source parameter's description
    pub fn write<W: io::Write>(&self, registry: &ParameterRegistry, out: &mut W) -> Result<()> {
        writeln!(out, "Output columns:")?;
        for column in &self.columns {
            writeln!(out, "  {}: {}", column.name, registry.require(column.source)?)?;
        }
        Ok(())
    }
}
