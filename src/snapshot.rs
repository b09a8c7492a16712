//! Serializable view of a finished configuration.
//!
//! Closures cannot be serialized, so computed values and limits are recorded
//! as `computed`; formulas keep their source text. The snapshot is meant for
//! inspection and for engines that consume a static description.

use crate::config::ModelFittingConfig;
use crate::error::Result;
use crate::group::Group;
use crate::model::Model;
use crate::output::{OutputColumn, OutputColumns};
use crate::parameters::{InitValue, ParameterId, ParameterRegistry, Range, RangeType};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueEntry {
    Literal(f64),
    Computed,
}

impl From<&InitValue> for ValueEntry {
    fn from(value: &InitValue) -> Self {
        match value.literal() {
            Some(v) => ValueEntry::Literal(v),
            None => ValueEntry::Computed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitsEntry {
    Literal { low: f64, high: f64 },
    Computed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeEntry {
    pub limits: LimitsEntry,
    pub range_type: RangeType,
}

impl From<&Range> for RangeEntry {
    fn from(range: &Range) -> Self {
        let limits = match range.literal_limits() {
            Some((low, high)) => LimitsEntry::Literal { low, high },
            None => LimitsEntry::Computed,
        };
        Self {
            limits,
            range_type: range.range_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantEntry {
    pub id: ParameterId,
    pub init: ValueEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeEntry {
    pub id: ParameterId,
    pub init: ValueEntry,
    pub range: Option<RangeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependentEntry {
    pub id: ParameterId,
    /// Formula source, `None` for closures
    pub formula: Option<String>,
    pub params: Vec<ParameterId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub model: String,
    pub parameters: Vec<(String, ParameterId)>,
}

impl From<&Model> for ModelEntry {
    fn from(model: &Model) -> Self {
        Self {
            model: model.label().to_string(),
            parameters: model
                .parameter_ids()
                .into_iter()
                .map(|(name, id)| (name.to_string(), id))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    pub models: Vec<ModelEntry>,
}

/// Everything the engine reads from a configuration pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub config: ModelFittingConfig,
    pub constant: Vec<ConstantEntry>,
    pub free: Vec<FreeEntry>,
    pub dependent: Vec<DependentEntry>,
    pub groups: Vec<GroupEntry>,
    pub output_columns: Vec<OutputColumn>,
}

impl ConfigSnapshot {
    pub fn capture(
        config: &ModelFittingConfig,
        registry: &ParameterRegistry,
        groups: &[Group],
        output_columns: &OutputColumns,
    ) -> Self {
        Self {
            config: *config,
            constant: registry
                .constants()
                .map(|p| ConstantEntry {
                    id: p.id(),
                    init: p.init_value().into(),
                })
                .collect(),
            free: registry
                .frees()
                .map(|p| FreeEntry {
                    id: p.id(),
                    init: p.init_value().into(),
                    range: p.get_range().map(RangeEntry::from),
                })
                .collect(),
            dependent: registry
                .dependents()
                .map(|p| DependentEntry {
                    id: p.id(),
                    formula: p.function().source().map(str::to_string),
                    params: p.params().to_vec(),
                })
                .collect(),
            groups: groups
                .iter()
                .map(|g| GroupEntry {
                    name: g.name().to_string(),
                    models: g.models().iter().map(ModelEntry::from).collect(),
                })
                .collect(),
            output_columns: output_columns.iter().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
