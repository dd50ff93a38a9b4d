//! Platform features.
//!
//! Platform entries answer None under a platform-filtered query so support
//! lists scoped to one platform do not enumerate the other platforms.

use crate::featuresupport::features::{
    effective_external_platform_name, effective_platform_type,
};
use crate::featuresupport::support_level::{
    ActiveLevel, ArchitectureId, FeatureId, SupportLevel, SupportLevelFeature,
    SupportLevelFilters,
};
use crate::models::{
    Cluster, ClusterUpdateParams, InfraEnv, InfraEnvUpdateParams, PlatformType,
    EXTERNAL_PLATFORM_NAME_OCI,
};
use crate::versions;

fn platform_active(
    cluster: Option<&Cluster>,
    update: Option<&ClusterUpdateParams>,
    platform: PlatformType,
) -> ActiveLevel {
    let Some(cluster) = cluster else {
        return ActiveLevel::NotRelevant;
    };
    if effective_platform_type(cluster, update) == Some(platform) {
        ActiveLevel::Active
    } else {
        ActiveLevel::NotActive
    }
}

pub struct BaremetalFeature;

impl SupportLevelFeature for BaremetalFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Baremetal
    }

    fn name(&self) -> &'static str {
        "Baremetal Platform Integration"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if filters.platform_type.is_some() {
            return None;
        }
        Some(SupportLevel::Supported)
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        platform_active(cluster, cluster_update, PlatformType::Baremetal)
    }
}

pub struct NonePlatformFeature;

impl SupportLevelFeature for NonePlatformFeature {
    fn id(&self) -> FeatureId {
        FeatureId::NonePlatform
    }

    fn name(&self) -> &'static str {
        "None Platform Integration"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if filters.platform_type.is_some() {
            return None;
        }
        Some(SupportLevel::Supported)
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![FeatureId::UserManagedLoadBalancer, FeatureId::Tna]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        platform_active(cluster, cluster_update, PlatformType::None)
    }
}

pub struct NutanixFeature;

impl SupportLevelFeature for NutanixFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Nutanix
    }

    fn name(&self) -> &'static str {
        "Nutanix Platform Integration"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if filters.platform_type.is_some() {
            return None;
        }
        let version = &filters.openshift_version;
        if versions::less_than(version, "4.11") {
            Some(SupportLevel::Unavailable)
        } else if versions::less_than(version, "4.12") {
            Some(SupportLevel::TechPreview)
        } else {
            Some(SupportLevel::Supported)
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![
            FeatureId::Lvm,
            FeatureId::Cnv,
            FeatureId::Mce,
            FeatureId::Odf,
            FeatureId::UserManagedLoadBalancer,
            FeatureId::Tna,
            FeatureId::NonStandardHaControlPlane,
        ]
    }

    fn incompatible_architectures(&self, _openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        vec![
            ArchitectureId::Arm64,
            ArchitectureId::S390x,
            ArchitectureId::Ppc64le,
        ]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        platform_active(cluster, cluster_update, PlatformType::Nutanix)
    }
}

pub struct VsphereFeature;

impl SupportLevelFeature for VsphereFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Vsphere
    }

    fn name(&self) -> &'static str {
        "vSphere Platform Integration"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if filters.platform_type.is_some() {
            return None;
        }
        Some(SupportLevel::Supported)
    }

    fn incompatible_features(&self, openshift_version: &str) -> Vec<FeatureId> {
        let mut incompatible = vec![
            FeatureId::Lvm,
            FeatureId::Cnv,
            FeatureId::Odf,
            FeatureId::Tna,
            FeatureId::NonStandardHaControlPlane,
        ];
        if versions::less_than(openshift_version, "4.13") {
            incompatible.push(FeatureId::DualStack);
        }
        incompatible
    }

    fn incompatible_architectures(&self, _openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        vec![
            ArchitectureId::Arm64,
            ArchitectureId::S390x,
            ArchitectureId::Ppc64le,
        ]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        platform_active(cluster, cluster_update, PlatformType::Vsphere)
    }
}

pub struct ExternalFeature;

impl SupportLevelFeature for ExternalFeature {
    fn id(&self) -> FeatureId {
        FeatureId::External
    }

    fn name(&self) -> &'static str {
        "External Platform Integration"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if filters.platform_type.is_some() {
            return None;
        }
        if versions::less_than(&filters.openshift_version, "4.14") {
            Some(SupportLevel::Unavailable)
        } else {
            Some(SupportLevel::Supported)
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![
            FeatureId::UserManagedLoadBalancer,
            FeatureId::Tna,
            FeatureId::NonStandardHaControlPlane,
        ]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        platform_active(cluster, cluster_update, PlatformType::External)
    }
}

pub struct OciFeature;

impl SupportLevelFeature for OciFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Oci
    }

    fn name(&self) -> &'static str {
        "Oracle Cloud Infrastructure"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if filters.platform_type.is_some() {
            return None;
        }
        if versions::less_than(&filters.openshift_version, "4.14") {
            Some(SupportLevel::Unavailable)
        } else {
            Some(SupportLevel::Supported)
        }
    }

    fn incompatible_architectures(&self, _openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        vec![ArchitectureId::S390x, ArchitectureId::Ppc64le]
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
        let is_oci = effective_platform_type(cluster, cluster_update)
            == Some(PlatformType::External)
            && effective_external_platform_name(cluster, cluster_update).as_deref()
                == Some(EXTERNAL_PLATFORM_NAME_OCI);
        if is_oci {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}
