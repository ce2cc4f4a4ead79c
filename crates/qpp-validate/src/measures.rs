//! Measure configuration data.
//!
//! Loaded once from `measures-data.json` in the standards directory and
//! shared read-only by every validation task.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "QPP_STANDARDS_DIR";

/// File name of the measure configuration data.
pub const MEASURES_FILE: &str = "measures-data.json";

#[derive(Debug, Error)]
pub enum MeasureConfigError {
    #[error("failed to read measure configurations from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid measure configuration data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("measure {uuid} is configured more than once")]
    DuplicateMeasure { uuid: String },
}

/// One population grouping of an eCQM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPopulation {
    #[serde(default)]
    pub strata: Vec<String>,
    #[serde(default)]
    pub initial_population_uuid: Option<String>,
    #[serde(default)]
    pub denominator_uuid: Option<String>,
    #[serde(default)]
    pub numerator_uuid: Option<String>,
    #[serde(default)]
    pub denominator_exclusions_uuid: Option<String>,
    #[serde(default)]
    pub denominator_exceptions_uuid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureConfig {
    pub e_measure_uuid: String,
    #[serde(default)]
    pub electronic_measure_id: Option<String>,
    #[serde(default)]
    pub measure_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sub_population: Vec<SubPopulation>,
}

/// Measure configurations keyed by eMeasure UUID.
#[derive(Debug, Clone, Default)]
pub struct MeasureConfigs {
    by_uuid: BTreeMap<String, MeasureConfig>,
}

impl MeasureConfigs {
    pub fn new(configs: Vec<MeasureConfig>) -> Result<Self, MeasureConfigError> {
        let mut by_uuid = BTreeMap::new();
        for config in configs {
            let uuid = config.e_measure_uuid.trim().to_string();
            if by_uuid.contains_key(&uuid) {
                return Err(MeasureConfigError::DuplicateMeasure { uuid });
            }
            by_uuid.insert(uuid, config);
        }
        Ok(Self { by_uuid })
    }

    pub fn from_json_str(json: &str) -> Result<Self, MeasureConfigError> {
        let configs: Vec<MeasureConfig> = serde_json::from_str(json)?;
        Self::new(configs)
    }

    pub fn from_path(path: &Path) -> Result<Self, MeasureConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| MeasureConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let configs = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            measures = configs.len(),
            "loaded measure configurations"
        );
        Ok(configs)
    }

    pub fn get(&self, uuid: &str) -> Option<&MeasureConfig> {
        self.by_uuid.get(uuid.trim())
    }

    pub fn len(&self) -> usize {
        self.by_uuid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uuid.is_empty()
    }

    /// Configurations in UUID order.
    pub fn iter(&self) -> impl Iterator<Item = &MeasureConfig> {
        self.by_uuid.values()
    }
}

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `QPP_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Load `measures-data.json` from [`standards_root`].
pub fn load_default_measure_configs() -> Result<MeasureConfigs, MeasureConfigError> {
    MeasureConfigs::from_path(&standards_root().join(MEASURES_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_records() {
        let configs = MeasureConfigs::from_json_str(
            r#"[{
                "eMeasureUuid": "uuid-1",
                "electronicMeasureId": "CMS165v5",
                "measureId": "236",
                "subPopulation": [{"denominatorExclusionsUuid": "denex-1"}]
            }]"#,
        )
        .unwrap();
        let config = configs.get("uuid-1").unwrap();
        assert_eq!(config.electronic_measure_id.as_deref(), Some("CMS165v5"));
        assert_eq!(
            config.sub_population[0].denominator_exclusions_uuid.as_deref(),
            Some("denex-1")
        );
        assert!(config.sub_population[0].denominator_exceptions_uuid.is_none());
    }

    #[test]
    fn duplicate_uuids_are_rejected() {
        let error = MeasureConfigs::from_json_str(
            r#"[{"eMeasureUuid": "a"}, {"eMeasureUuid": " a "}]"#,
        )
        .unwrap_err();
        assert!(matches!(error, MeasureConfigError::DuplicateMeasure { uuid } if uuid == "a"));
    }

    #[test]
    fn bundled_measure_data_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../standards")
            .join(MEASURES_FILE);
        let configs = MeasureConfigs::from_path(&path).unwrap();
        assert!(configs.len() >= 3);
        assert!(configs.get("40280381-51f0-825b-0152-22b98cff181a").is_some());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = MeasureConfigs::from_path(&dir.path().join(MEASURES_FILE)).unwrap_err();
        assert!(matches!(error, MeasureConfigError::Io { .. }));
    }
}
