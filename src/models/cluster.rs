//! Cluster, infra-env and update-parameter snapshots.

use serde::{Deserialize, Serialize};

/// External platform name that selects Oracle Cloud Infrastructure handling.
pub const EXTERNAL_PLATFORM_NAME_OCI: &str = "oci";

/// Platform the cluster is installed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Baremetal,
    Nutanix,
    Vsphere,
    None,
    External,
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlatformType::Baremetal => "baremetal",
            PlatformType::Nutanix => "nutanix",
            PlatformType::Vsphere => "vsphere",
            PlatformType::None => "none",
            PlatformType::External => "external",
        };
        f.write_str(name)
    }
}

/// Settings for the external platform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformExternal {
    #[serde(default)]
    pub platform_name: Option<String>,
}

/// Platform selection, possibly with external-provider details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    #[serde(default)]
    pub r#type: Option<PlatformType>,
    #[serde(default)]
    pub external: Option<PlatformExternal>,
}

/// Cluster kind. AddHostsCluster marks a day-2 cluster where hosts are
/// added to an already installed cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ClusterKind {
    #[default]
    Cluster,
    AddHostsCluster,
}

/// Role assigned to a discovered host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostRole {
    AutoAssign,
    Master,
    Arbiter,
    Worker,
    Bootstrap,
}

/// Discovery image flavor served to hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ImageType {
    #[serde(rename = "full-iso")]
    FullIso,
    #[serde(rename = "minimal-iso")]
    MinimalIso,
}

/// How an operator is delivered to the cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorType {
    #[default]
    Builtin,
    Olm,
}

/// An operator the installation monitors until it reports available.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonitoredOperator {
    pub name: String,
    #[serde(default)]
    pub operator_type: OperatorType,
    /// Per-operator readiness timeout, in seconds.
    #[serde(default)]
    pub timeout_seconds: i64,
}

/// Disk encryption settings.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DiskEncryption {
    #[serde(default)]
    pub enable_on: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl DiskEncryption {
    pub const ENABLE_ON_ALL: &'static str = "all";
    pub const ENABLE_ON_MASTERS: &'static str = "masters";
    pub const ENABLE_ON_WORKERS: &'static str = "workers";
    pub const ENABLE_ON_NONE: &'static str = "none";
    pub const MODE_TPMV2: &'static str = "tpmv2";
    pub const MODE_TANG: &'static str = "tang";
}

/// API/ingress load balancer configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LoadBalancer {
    #[serde(default)]
    pub r#type: Option<String>,
}

impl LoadBalancer {
    pub const TYPE_USER_MANAGED: &'static str = "user-managed";
    pub const TYPE_CLUSTER_MANAGED: &'static str = "cluster-managed";
}

/// A discovered host. The inventory is the agent's raw JSON report.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Host {
    #[serde(default)]
    pub role: Option<HostRole>,
    #[serde(default)]
    pub inventory: String,
}

/// Cluster snapshot consumed by the validators.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Cluster {
    #[serde(default)]
    pub kind: ClusterKind,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub openshift_version: String,
    #[serde(default)]
    pub cpu_architecture: String,
    #[serde(default)]
    pub control_plane_count: i64,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub user_managed_networking: Option<bool>,
    #[serde(default)]
    pub load_balancer: Option<LoadBalancer>,
    #[serde(default)]
    pub network_type: Option<String>,
    #[serde(default)]
    pub vip_dhcp_allocation: Option<bool>,
    /// Machine network CIDRs.
    #[serde(default)]
    pub machine_networks: Vec<String>,
    /// API VIP addresses.
    #[serde(default)]
    pub api_vips: Vec<String>,
    #[serde(default)]
    pub monitored_operators: Vec<MonitoredOperator>,
    #[serde(default)]
    pub disk_encryption: Option<DiskEncryption>,
    #[serde(default)]
    pub hosts: Vec<Host>,
}

/// Infra-env snapshot. Hosts discovered through an infra-env may belong to
/// a cluster, or to none (late binding).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InfraEnv {
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub cpu_architecture: String,
    #[serde(default)]
    pub openshift_version: Option<String>,
    #[serde(default)]
    pub r#type: Option<ImageType>,
}

/// Requested OLM operator in an update.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OperatorCreateParams {
    pub name: String,
}

/// Fields a cluster update may change. Unset fields keep the current value.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClusterUpdateParams {
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub user_managed_networking: Option<bool>,
    #[serde(default)]
    pub network_type: Option<String>,
    #[serde(default)]
    pub vip_dhcp_allocation: Option<bool>,
    #[serde(default)]
    pub machine_networks: Option<Vec<String>>,
    #[serde(default)]
    pub api_vips: Option<Vec<String>>,
    #[serde(default)]
    pub olm_operators: Option<Vec<OperatorCreateParams>>,
    #[serde(default)]
    pub load_balancer: Option<LoadBalancer>,
    #[serde(default)]
    pub control_plane_count: Option<i64>,
}

/// Fields an infra-env update may change.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InfraEnvUpdateParams {
    #[serde(default)]
    pub image_type: Option<ImageType>,
}

/// Pending update overlaid on the current state when computing feature
/// activation. Exactly one kind of update can be in flight.
#[derive(Clone, Debug, Default)]
pub enum UpdateParams {
    #[default]
    None,
    Cluster(ClusterUpdateParams),
    InfraEnv(InfraEnvUpdateParams),
}

impl UpdateParams {
    pub fn cluster(&self) -> Option<&ClusterUpdateParams> {
        match self {
            UpdateParams::Cluster(params) => Some(params),
            _ => None,
        }
    }

    pub fn infra_env(&self) -> Option<&InfraEnvUpdateParams> {
        match self {
            UpdateParams::InfraEnv(params) => Some(params),
            _ => None,
        }
    }
}
