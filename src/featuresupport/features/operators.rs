//! OLM operator features.

use crate::featuresupport::features::is_operator_activated;
use crate::featuresupport::support_level::{
    ActiveLevel, ArchitectureId, FeatureId, SupportLevel, SupportLevelFeature,
    SupportLevelFilters,
};
use crate::models::{Cluster, ClusterUpdateParams, InfraEnv, InfraEnvUpdateParams};
use crate::versions;

fn operator_active(
    name: &str,
    cluster: Option<&Cluster>,
    update: Option<&ClusterUpdateParams>,
) -> ActiveLevel {
    let Some(cluster) = cluster else {
        return ActiveLevel::NotRelevant;
    };
    if is_operator_activated(name, cluster, update) {
        ActiveLevel::Active
    } else {
        ActiveLevel::NotActive
    }
}

pub struct LvmFeature;

impl SupportLevelFeature for LvmFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Lvm
    }

    fn name(&self) -> &'static str {
        "Logical Volume Management"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        let version = &filters.openshift_version;
        if versions::less_than(version, "4.11") {
            Some(SupportLevel::Unavailable)
        } else if versions::less_than(version, "4.12") {
            Some(SupportLevel::DevPreview)
        } else {
            Some(SupportLevel::Supported)
        }
    }

    fn incompatible_features(&self, openshift_version: &str) -> Vec<FeatureId> {
        let mut incompatible = vec![FeatureId::Nutanix, FeatureId::Vsphere, FeatureId::Odf];
        if versions::less_than(openshift_version, "4.15") {
            incompatible.push(FeatureId::VipAutoAlloc);
            incompatible.push(FeatureId::ClusterManagedNetworking);
        }
        incompatible
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
        operator_active("lvm", cluster, cluster_update)
    }
}

pub struct CnvFeature;

impl SupportLevelFeature for CnvFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Cnv
    }

    fn name(&self) -> &'static str {
        "OpenShift Virtualization"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        match filters.cpu_architecture.as_deref() {
            Some("s390x") | Some("ppc64le") => Some(SupportLevel::Unavailable),
            Some("arm64") | Some("aarch64")
                if versions::less_than(&filters.openshift_version, "4.14") =>
            {
                Some(SupportLevel::Unavailable)
            }
            _ => Some(SupportLevel::Supported),
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![FeatureId::Nutanix, FeatureId::Vsphere]
    }

    fn incompatible_architectures(&self, openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        let mut incompatible = vec![ArchitectureId::S390x, ArchitectureId::Ppc64le];
        let arm_supported =
            matches!(openshift_version, Some(version) if versions::at_least(version, "4.14"));
        if !arm_supported {
            incompatible.push(ArchitectureId::Arm64);
        }
        incompatible
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        operator_active("cnv", cluster, cluster_update)
    }
}

pub struct LsoFeature;

impl SupportLevelFeature for LsoFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Lso
    }

    fn name(&self) -> &'static str {
        "Local Storage Operator"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        match filters.cpu_architecture.as_deref() {
            Some("arm64") | Some("aarch64") => Some(SupportLevel::Unavailable),
            _ => Some(SupportLevel::Supported),
        }
    }

    fn incompatible_architectures(&self, _openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        vec![ArchitectureId::Arm64]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        operator_active("lso", cluster, cluster_update)
    }
}

pub struct MceFeature;

impl SupportLevelFeature for MceFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Mce
    }

    fn name(&self) -> &'static str {
        "multicluster engine"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if versions::less_than(&filters.openshift_version, "4.10") {
            Some(SupportLevel::Unavailable)
        } else {
            Some(SupportLevel::Supported)
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![FeatureId::Nutanix]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        operator_active("mce", cluster, cluster_update)
    }
}

pub struct OdfFeature;

impl SupportLevelFeature for OdfFeature {
    fn id(&self) -> FeatureId {
        FeatureId::Odf
    }

    fn name(&self) -> &'static str {
        "OpenShift Data Foundation"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        match filters.cpu_architecture.as_deref() {
            Some("arm64") | Some("aarch64") => Some(SupportLevel::Unavailable),
            _ => Some(SupportLevel::Supported),
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![FeatureId::Nutanix, FeatureId::Vsphere, FeatureId::Lvm]
    }

    fn incompatible_architectures(&self, _openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        vec![ArchitectureId::Arm64]
    }

    fn active_level(
        &self,
        cluster: Option<&Cluster>,
        _infra_env: Option<&InfraEnv>,
        cluster_update: Option<&ClusterUpdateParams>,
        _infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        operator_active("odf", cluster, cluster_update)
    }
}
