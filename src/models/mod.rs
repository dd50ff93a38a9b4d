//! Read-only input snapshots.
//!
//! These mirror the installation service's REST payloads: the cluster and
//! infra-env documents the validators inspect, and the host inventory
//! reported by the discovery agent.

pub mod cluster;
pub mod inventory;

pub use cluster::{
    Cluster, ClusterKind, ClusterUpdateParams, DiskEncryption, Host, HostRole, ImageType,
    InfraEnv, InfraEnvUpdateParams, LoadBalancer, MonitoredOperator, OperatorCreateParams,
    OperatorType, Platform, PlatformExternal, PlatformType, UpdateParams,
    EXTERNAL_PLATFORM_NAME_OCI,
};
pub use inventory::{
    Cpu, Disk, DriveType, InstallationEligibility, Interface, Inventory, Iscsi, Route,
    SystemVendor,
};
