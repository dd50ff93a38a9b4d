//! Support-level vocabulary and the feature trait.

use serde::{Deserialize, Serialize};

use crate::models::{
    Cluster, ClusterUpdateParams, InfraEnv, InfraEnvUpdateParams, PlatformType,
};

/// How well a feature or architecture is supported at a given version.
/// Ordered from least to most supported so gates can compare levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportLevel {
    Unsupported,
    Unavailable,
    DevPreview,
    TechPreview,
    Supported,
}

impl SupportLevel {
    /// Available means the feature can actually be used, at any maturity.
    pub fn is_available(self) -> bool {
        !matches!(self, SupportLevel::Unsupported | SupportLevel::Unavailable)
    }
}

/// Identifier for each entry in the feature catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureId {
    // Platforms
    Baremetal,
    NonePlatform,
    Nutanix,
    Vsphere,
    External,
    Oci,
    // Networking
    UserManagedNetworking,
    ClusterManagedNetworking,
    DualStack,
    DualStackVips,
    VipAutoAlloc,
    SdnNetworkType,
    OvnNetworkType,
    UserManagedLoadBalancer,
    // Topology
    Sno,
    Tna,
    NonStandardHaControlPlane,
    // Boot image
    MinimalIso,
    // OLM operators
    Lvm,
    Cnv,
    Lso,
    Mce,
    Odf,
}

/// Identifier for each entry in the architecture catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchitectureId {
    X8664,
    Arm64,
    S390x,
    Ppc64le,
    MultiArchReleaseImage,
}

/// Query context for support-level lookups.
#[derive(Clone, Debug, Default)]
pub struct SupportLevelFilters {
    pub openshift_version: String,
    pub cpu_architecture: Option<String>,
    pub platform_type: Option<PlatformType>,
    pub external_platform_name: Option<String>,
}

/// Result of an activation check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveLevel {
    /// The feature is in use given the state plus pending update.
    Active,
    /// The feature is known not to be in use.
    NotActive,
    /// Activation cannot be determined from the given inputs.
    NotRelevant,
}

/// One entry in the feature catalog.
///
/// `support_level` answers "how supported is this feature under these
/// filters"; returning None omits the feature from support lists entirely
/// (platform features do this when the query already filters by platform).
pub trait SupportLevelFeature: Send + Sync {
    fn id(&self) -> FeatureId;

    /// Human-readable name used in incompatibility messages.
    fn name(&self) -> &'static str;

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel>;

    /// Features this one cannot be combined with at the given version.
    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        Vec::new()
    }

    /// Architectures this feature cannot run on. The version is optional
    /// because infra-env-only flows may not know it yet.
    fn incompatible_architectures(&self, _openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        Vec::new()
    }

    /// Whether the feature is in use for the given state merged with the
    /// pending update.
    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel;

    /// Feature-specific validation beyond the compatibility matrix.
    /// None means the feature has no self-validation.
    fn self_validate(
        &self,
        _cluster: &Cluster,
        _cluster_update: Option<&ClusterUpdateParams>,
    ) -> Option<crate::error::Result<()>> {
        None
    }
}
