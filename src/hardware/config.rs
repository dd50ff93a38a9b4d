//! Versioned hardware requirements configuration.
//!
//! The requirements table ships compiled-in defaults and can be replaced
//! wholesale through `HW_VALIDATOR_REQUIREMENTS` (a JSON array of versioned
//! entries). A set-but-invalid value is a startup error, not a silent
//! fallback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::hardware::Details;
use crate::versions;

/// Environment variable holding the JSON requirements table.
pub const REQUIREMENTS_ENV: &str = "HW_VALIDATOR_REQUIREMENTS";
/// Environment variable holding the comma-separated edge worker products.
pub const EDGE_WORKERS_PRODUCT_NAMES_ENV: &str = "EDGE_WORKERS_PRODUCT_NAMES";

/// Table key matching any version without its own entry.
pub const DEFAULT_VERSION_KEY: &str = "default";

const DEFAULT_EDGE_WORKER_PRODUCT_NAMES: &[&str] = &["Jetson AGX Orin"];

/// Per-role requirements for one OpenShift version.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VersionedHostRequirements {
    pub version: String,
    #[serde(default)]
    pub master: Option<Details>,
    #[serde(default)]
    pub arbiter: Option<Details>,
    #[serde(default)]
    pub worker: Option<Details>,
    #[serde(default)]
    pub sno: Option<Details>,
    #[serde(default, rename = "edge-worker")]
    pub edge_worker: Option<Details>,
}

/// Hardware validator configuration.
#[derive(Clone, Debug)]
pub struct ValidatorCfg {
    /// Requirements tables keyed by "major.minor", plus the "default" entry.
    pub versioned_requirements: BTreeMap<String, VersionedHostRequirements>,
    /// Product names (trimmed, compared case-insensitively) that mark a
    /// worker as an edge device.
    pub edge_worker_product_names: Vec<String>,
}

fn default_details(cpu_cores: i64, ram_mib: i64, disk_size_gb: i64) -> Details {
    Details {
        cpu_cores,
        ram_mib,
        disk_size_gb,
        installation_disk_speed_threshold_ms: 10,
        network_latency_threshold_ms: None,
        packet_loss_percentage: None,
        tpm_enabled_in_bios: false,
    }
}

impl Default for ValidatorCfg {
    fn default() -> Self {
        let default_entry = VersionedHostRequirements {
            version: DEFAULT_VERSION_KEY.to_string(),
            master: Some(default_details(4, 16384, 100)),
            arbiter: Some(default_details(2, 8192, 100)),
            worker: Some(default_details(2, 8192, 100)),
            sno: Some(default_details(8, 16384, 100)),
            edge_worker: Some(default_details(2, 8192, 15)),
        };
        let mut versioned_requirements = BTreeMap::new();
        versioned_requirements.insert(DEFAULT_VERSION_KEY.to_string(), default_entry);
        Self {
            versioned_requirements,
            edge_worker_product_names: DEFAULT_EDGE_WORKER_PRODUCT_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ValidatorCfg {
    /// Build the configuration from the environment, keeping compiled-in
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(raw) = std::env::var(REQUIREMENTS_ENV) {
            cfg.versioned_requirements = Self::parse_requirements(&raw)?;
        }
        if let Ok(raw) = std::env::var(EDGE_WORKERS_PRODUCT_NAMES_ENV) {
            cfg.edge_worker_product_names = raw
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
        }
        debug!(
            versions = ?cfg.versioned_requirements.keys().collect::<Vec<_>>(),
            "loaded hardware requirements table"
        );
        Ok(cfg)
    }

    fn parse_requirements(raw: &str) -> Result<BTreeMap<String, VersionedHostRequirements>> {
        let entries: Vec<VersionedHostRequirements> = serde_json::from_str(raw).map_err(|e| {
            Error::InvalidInput(format!("cannot parse {}: {}", REQUIREMENTS_ENV, e))
        })?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.version.clone(), entry))
            .collect())
    }

    /// Requirements entry for a version, by its "major.minor" key, falling
    /// back to the "default" entry.
    pub fn requirements_for_version(
        &self,
        openshift_version: &str,
    ) -> Result<&VersionedHostRequirements> {
        if let Some(key) = versions::major_minor(openshift_version) {
            if let Some(entry) = self.versioned_requirements.get(&key) {
                return Ok(entry);
            }
        }
        self.versioned_requirements
            .get(DEFAULT_VERSION_KEY)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "no hardware requirements defined for version {}",
                    openshift_version
                ))
            })
    }

    /// Whether a product name matches the configured edge worker products.
    pub fn is_edge_worker_product(&self, product_name: &str) -> bool {
        let needle = product_name.trim().to_lowercase();
        self.edge_worker_product_names
            .iter()
            .any(|name| name.trim().to_lowercase() == needle)
    }
}
