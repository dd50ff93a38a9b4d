//! AgentClusterInstall Custom Resource Definition.
//!
//! Represents the installation parameters and progress of an agent-based
//! OpenShift cluster installation. The admission webhooks guard this
//! resource: most of the spec freezes once installation starts.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition type tracking overall installation completion.
pub const CONDITION_COMPLETED: &str = "Completed";

/// Completed-condition reasons that mean installation has started.
pub const REASON_INSTALLATION_FAILED: &str = "InstallationFailed";
pub const REASON_INSTALLED: &str = "InstallationCompleted";
pub const REASON_INSTALLATION_IN_PROGRESS: &str = "InstallationInProgress";
pub const REASON_ALREADY_INSTALLING: &str = "AlreadyInstalling";

/// AgentClusterInstall drives an agent-based cluster installation.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "extensions.hive.openshift.io",
    version = "v1beta1",
    kind = "AgentClusterInstall",
    plural = "agentclusterinstalls",
    shortname = "aci",
    status = "AgentClusterInstallStatus",
    namespaced,
    printcolumn = r#"{"name":"ControlPlane", "type":"integer", "jsonPath":".spec.provisionRequirements.controlPlaneAgents"}"#,
    printcolumn = r#"{"name":"Workers", "type":"integer", "jsonPath":".spec.provisionRequirements.workerAgents"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AgentClusterInstallSpec {
    /// Reference to the ClusterImageSet providing the release image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_set_ref: Option<ImageSetRef>,

    /// Identity and credentials of the installed cluster, filled in while
    /// installation progresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_metadata: Option<ClusterMetadata>,

    /// Additional ignition endpoint hosts fetch their config from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignition_endpoint: Option<IgnitionEndpoint>,

    /// Agent counts required before installation may start.
    #[serde(default)]
    pub provision_requirements: ProvisionRequirements,

    /// Cluster networking configuration.
    #[serde(default)]
    pub networking: Networking,

    /// Platform the cluster installs on ("BareMetal", "None", "VSphere",
    /// "Nutanix", "External").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_type: Option<String>,

    /// SSH public key installed on the hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,

    /// Virtual IP for the API endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_vip: Option<String>,

    /// Virtual IP for cluster ingress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_vip: Option<String>,

    /// When true, installation does not start even once requirements are
    /// met.
    #[serde(default)]
    pub hold_installation: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageSetRef {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretRef {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMetadata {
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub infra_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_kubeconfig_secret_ref: Option<SecretRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password_secret_ref: Option<SecretRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IgnitionEndpoint {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificate_reference: Option<SecretRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequirements {
    #[serde(default)]
    pub control_plane_agents: i32,
    #[serde(default)]
    pub worker_agents: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    /// When true, the user provides load balancing and DNS instead of the
    /// cluster's integrated networking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_managed_networking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<String>,
    #[serde(default)]
    pub machine_network: Vec<MachineNetworkEntry>,
    #[serde(default)]
    pub cluster_network: Vec<ClusterNetworkEntry>,
    #[serde(default)]
    pub service_network: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineNetworkEntry {
    pub cidr: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkEntry {
    pub cidr: String,
    #[serde(default)]
    pub host_prefix: i32,
}

/// Status condition in the hive ClusterInstall shape.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCondition {
    pub r#type: String,
    pub status: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentClusterInstallStatus {
    #[serde(default)]
    pub conditions: Vec<StatusCondition>,
}

impl AgentClusterInstall {
    fn completed_condition_reason(&self) -> Option<&str> {
        self.status
            .as_ref()?
            .conditions
            .iter()
            .find(|condition| condition.r#type == CONDITION_COMPLETED)
            .map(|condition| condition.reason.as_str())
    }

    /// Installation has started (and possibly finished): most of the spec
    /// is frozen from this point.
    pub fn install_already_started(&self) -> bool {
        matches!(
            self.completed_condition_reason(),
            Some(
                REASON_INSTALLATION_FAILED
                    | REASON_INSTALLED
                    | REASON_INSTALLATION_IN_PROGRESS
                    | REASON_ALREADY_INSTALLING
            )
        )
    }

    /// Installation has finished, successfully or not.
    pub fn install_completed(&self) -> bool {
        matches!(
            self.completed_condition_reason(),
            Some(REASON_INSTALLATION_FAILED | REASON_INSTALLED)
        )
    }

    /// Single-node topology: one control plane agent and no workers.
    pub fn is_single_node(&self) -> bool {
        self.spec.provision_requirements.control_plane_agents == 1
            && self.spec.provision_requirements.worker_agents == 0
    }
}
