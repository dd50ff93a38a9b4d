//! Custom Resource Definitions.

pub mod agent_cluster_install;

pub use agent_cluster_install::{
    AgentClusterInstall, AgentClusterInstallSpec, AgentClusterInstallStatus, ClusterMetadata,
    IgnitionEndpoint, ImageSetRef, Networking, ProvisionRequirements, SecretRef,
    StatusCondition,
};
