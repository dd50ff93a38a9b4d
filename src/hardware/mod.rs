//! Hardware requirements and disk eligibility.

pub mod config;
pub mod operators;
pub mod validator;

use serde::{Deserialize, Serialize};

pub use config::{
    ValidatorCfg, VersionedHostRequirements, EDGE_WORKERS_PRODUCT_NAMES_ENV, REQUIREMENTS_ENV,
};
pub use operators::{NoOperators, OperatorRequirementsApi};
pub use validator::HardwareValidator;

/// Hardware requirements for one host.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Details {
    #[serde(default)]
    pub cpu_cores: i64,
    #[serde(default)]
    pub ram_mib: i64,
    #[serde(default)]
    pub disk_size_gb: i64,
    #[serde(default)]
    pub installation_disk_speed_threshold_ms: i64,
    #[serde(default)]
    pub network_latency_threshold_ms: Option<f64>,
    #[serde(default)]
    pub packet_loss_percentage: Option<f64>,
    #[serde(default)]
    pub tpm_enabled_in_bios: bool,
}

/// Requirements contributed by one operator for a specific host.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OperatorHostRequirements {
    pub operator_name: String,
    pub requirements: Details,
}

/// Preflight requirements contributed by one operator.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OperatorHardwareRequirements {
    pub operator_name: String,
    pub master: Details,
    pub worker: Details,
}

/// Resolved requirements for a host in a cluster: the OpenShift baseline,
/// the per-operator deltas, and their combination.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterHostRequirements {
    pub ocp: Details,
    pub operators: Vec<OperatorHostRequirements>,
    pub total: Details,
}

/// Role baselines reported before any host exists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreflightHardwareRequirements {
    pub master: Details,
    pub arbiter: Option<Details>,
    pub worker: Details,
    pub operators: Vec<OperatorHardwareRequirements>,
}
