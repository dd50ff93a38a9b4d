//! Topology features.

use crate::featuresupport::features::effective_control_plane_count;
use crate::featuresupport::support_level::{
    ActiveLevel, ArchitectureId, FeatureId, SupportLevel, SupportLevelFeature,
    SupportLevelFilters,
};
use crate::models::{
    Cluster, ClusterUpdateParams, HostRole, InfraEnv, InfraEnvUpdateParams, PlatformType,
};
use crate::versions;

pub struct SnoFeature;

impl SupportLevelFeature for SnoFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Sno
    }

    fn name(&self) -> &'static str {
        "Single Node OpenShift"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        let version = &filters.openshift_version;
        if matches!(
            filters.cpu_architecture.as_deref(),
            Some("ppc64le") | Some("s390x")
        ) {
            if versions::at_least(version, "4.13") {
                return Some(SupportLevel::Supported);
            }
            if versions::at_least(version, "4.12") {
                return Some(SupportLevel::DevPreview);
            }
            return Some(SupportLevel::Unavailable);
        }
        Some(SupportLevel::Supported)
    }

    fn incompatible_architectures(&self, openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        match openshift_version {
            Some(version) if versions::at_least(version, "4.12") => Vec::new(),
            _ => vec![ArchitectureId::Ppc64le, ArchitectureId::S390x],
        }
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        let Some(cluster) = cluster else {
            return ActiveLevel::NotRelevant;
        };
        if effective_control_plane_count(cluster, cluster_update) == 1 {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}

pub struct TnaFeature;

impl SupportLevelFeature for TnaFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Tna
    }

    fn name(&self) -> &'static str {
        "Two-Node OpenShift with Arbiter"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if let Some(platform) = filters.platform_type {
            if platform != PlatformType::Baremetal {
                return Some(SupportLevel::Unavailable);
            }
        }
        let version = &filters.openshift_version;
        if versions::less_than(version, "4.19") {
            Some(SupportLevel::Unavailable)
        } else if versions::less_than(version, "4.20") {
            Some(SupportLevel::TechPreview)
        } else {
            Some(SupportLevel::Supported)
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![
            FeatureId::NonePlatform,
            FeatureId::External,
            FeatureId::Nutanix,
            FeatureId::Vsphere,
        ]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        _cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        let Some(cluster) = cluster else {
            return ActiveLevel::NotRelevant;
        };
        let has_arbiter = cluster
            .hosts
            .iter()
            .any(|host| host.role == Some(HostRole::Arbiter));
        if has_arbiter {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}

pub struct NonStandardHaControlPlaneFeature;

impl SupportLevelFeature for NonStandardHaControlPlaneFeature {
    fn id(&self) -> FeatureId {
        FeatureId::NonStandardHaControlPlane
    }

    fn name(&self) -> &'static str {
        "Non-standard HA Control Plane"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if matches!(
            filters.platform_type,
            Some(PlatformType::Nutanix) | Some(PlatformType::Vsphere) | Some(PlatformType::External)
        ) {
            return Some(SupportLevel::Unavailable);
        }
        if versions::at_least(&filters.openshift_version, "4.18") {
            Some(SupportLevel::Supported)
        } else {
            Some(SupportLevel::Unavailable)
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![FeatureId::External, FeatureId::Nutanix, FeatureId::Vsphere]
    }

    fn incompatible_architectures(&self, _openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        vec![
            ArchitectureId::Arm64,
            ArchitectureId::S390x,
            ArchitectureId::Ppc64le,
            ArchitectureId::MultiArchReleaseImage,
        ]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        let Some(cluster) = cluster else {
            return ActiveLevel::NotRelevant;
        };
        let count = effective_control_plane_count(cluster, cluster_update);
        if count == 4 || count == 5 {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}
