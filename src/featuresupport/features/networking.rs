//! Networking features.

use crate::error::{Error, Result};
use crate::featuresupport::features::{
    effective_api_vips, effective_load_balancer_type, effective_machine_networks,
    effective_network_type, effective_user_managed_networking, effective_vip_dhcp_allocation,
    is_ipv4_cidr, is_ipv6_cidr,
};
use crate::featuresupport::support_level::{
    ActiveLevel, ArchitectureId, FeatureId, SupportLevel, SupportLevelFeature,
    SupportLevelFilters,
};
use crate::models::{
    Cluster, ClusterUpdateParams, InfraEnv, InfraEnvUpdateParams, LoadBalancer, PlatformType,
};
use crate::versions;

const NETWORK_TYPE_SDN: &str = "OpenShiftSDN";
const NETWORK_TYPE_OVN: &str = "OVNKubernetes";

pub struct UserManagedNetworkingFeature;

impl SupportLevelFeature for UserManagedNetworkingFeature {
    fn id(&self) -> FeatureId {
        FeatureId::UserManagedNetworking
    }

    fn name(&self) -> &'static str {
        "User Managed Networking"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if matches!(
            filters.platform_type,
            Some(PlatformType::Nutanix) | Some(PlatformType::Vsphere)
        ) {
            return Some(SupportLevel::Unavailable);
        }
        Some(SupportLevel::Supported)
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![FeatureId::UserManagedLoadBalancer]
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
        if effective_user_managed_networking(cluster, cluster_update) == Some(true) {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}

pub struct ClusterManagedNetworkingFeature;

impl SupportLevelFeature for ClusterManagedNetworkingFeature {
    fn id(&self) -> FeatureId {
        FeatureId::ClusterManagedNetworking
    }

    fn name(&self) -> &'static str {
        "Cluster Managed Networking"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if matches!(
            filters.platform_type,
            Some(PlatformType::None) | Some(PlatformType::External)
        ) {
            return Some(SupportLevel::Unavailable);
        }
        Some(SupportLevel::Supported)
    }

    fn incompatible_features(&self, openshift_version: &str) -> Vec<FeatureId> {
        if versions::less_than(openshift_version, "4.15") {
            vec![FeatureId::Lvm]
        } else {
            Vec::new()
        }
    }

    fn incompatible_architectures(&self, openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        match openshift_version {
            Some(version) if versions::less_than(version, "4.13") => {
                vec![ArchitectureId::Ppc64le, ArchitectureId::S390x]
            }
            _ => Vec::new(),
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
        if effective_user_managed_networking(cluster, cluster_update) != Some(true) {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}

pub struct DualStackFeature;

impl SupportLevelFeature for DualStackFeature {
    fn id(&self) -> FeatureId {
        FeatureId::DualStack
    }

    fn name(&self) -> &'static str {
        "Dual-Stack"
    }

    fn support_level(&self, _filters: &SupportLevelFilters) -> Option<SupportLevel> {
        Some(SupportLevel::Supported)
    }

    fn incompatible_features(&self, openshift_version: &str) -> Vec<FeatureId> {
        let mut incompatible = vec![FeatureId::UserManagedLoadBalancer];
        if versions::less_than(openshift_version, "4.13") {
            incompatible.push(FeatureId::Vsphere);
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
        let Some(cluster) = cluster else {
            return ActiveLevel::NotRelevant;
        };
        let networks = effective_machine_networks(cluster, cluster_update);
        let has_v4 = networks.iter().any(|n| is_ipv4_cidr(n));
        let has_v6 = networks.iter().any(|n| is_ipv6_cidr(n));
        if has_v4 && has_v6 {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}

pub struct DualStackVipsFeature;

impl SupportLevelFeature for DualStackVipsFeature {
    fn id(&self) -> FeatureId {
        FeatureId::DualStackVips
    }

    fn name(&self) -> &'static str {
        "Dual-Stack VIPs"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if versions::less_than(&filters.openshift_version, "4.12") {
            Some(SupportLevel::Unavailable)
        } else {
            Some(SupportLevel::Supported)
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![FeatureId::UserManagedLoadBalancer]
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
        if effective_api_vips(cluster, cluster_update).len() > 1 {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}

pub struct VipAutoAllocFeature;

impl SupportLevelFeature for VipAutoAllocFeature {
    fn id(&self) -> FeatureId {
        FeatureId::VipAutoAlloc
    }

    fn name(&self) -> &'static str {
        "VIP Automatic Allocation"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if versions::at_least(&filters.openshift_version, "4.15") {
            Some(SupportLevel::Unavailable)
        } else {
            Some(SupportLevel::DevPreview)
        }
    }

    fn incompatible_features(&self, openshift_version: &str) -> Vec<FeatureId> {
        let mut incompatible = vec![FeatureId::UserManagedLoadBalancer];
        if versions::less_than(openshift_version, "4.15") {
            incompatible.push(FeatureId::Lvm);
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
        let Some(cluster) = cluster else {
            return ActiveLevel::NotRelevant;
        };
        if effective_vip_dhcp_allocation(cluster, cluster_update) == Some(true) {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}

pub struct SdnNetworkTypeFeature;

impl SupportLevelFeature for SdnNetworkTypeFeature {
    fn id(&self) -> FeatureId {
        FeatureId::SdnNetworkType
    }

    fn name(&self) -> &'static str {
        "OpenShift SDN"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if versions::at_least(&filters.openshift_version, "4.15") {
            Some(SupportLevel::Unavailable)
        } else {
            Some(SupportLevel::Supported)
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
        if effective_network_type(cluster, cluster_update).as_deref() == Some(NETWORK_TYPE_SDN) {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }

    // SDN was removed in 4.15, so an active SDN selection must also check
    // the cluster's own version, not just the filter's.
    fn self_validate(
        &self,
        cluster: &Cluster,
        _cluster_update: Option<&ClusterUpdateParams>,
    ) -> Option<Result<()>> {
        if versions::at_least(&cluster.openshift_version, "4.15") {
            Some(Err(Error::Validation(format!(
                "Openshift version {} is not supported for OpenShiftSDN NetworkType",
                cluster.openshift_version
            ))))
        } else {
            Some(Ok(()))
        }
    }
}

pub struct OvnNetworkTypeFeature;

impl SupportLevelFeature for OvnNetworkTypeFeature {
    fn id(&self) -> FeatureId {
        FeatureId::OvnNetworkType
    }

    fn name(&self) -> &'static str {
        "OVN-Kubernetes"
    }

    fn support_level(&self, _filters: &SupportLevelFilters) -> Option<SupportLevel> {
        Some(SupportLevel::Supported)
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
        if effective_network_type(cluster, cluster_update).as_deref() == Some(NETWORK_TYPE_OVN) {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}

pub struct UserManagedLoadBalancerFeature;

impl SupportLevelFeature for UserManagedLoadBalancerFeature {
    fn id(&self) -> FeatureId {
        FeatureId::UserManagedLoadBalancer
    }

    fn name(&self) -> &'static str {
        "User Managed Load Balancer"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if versions::at_least(&filters.openshift_version, "4.16") {
            Some(SupportLevel::Supported)
        } else {
            Some(SupportLevel::Unavailable)
        }
    }

    fn incompatible_features(&self, _openshift_version: &str) -> Vec<FeatureId> {
        vec![
            FeatureId::External,
            FeatureId::Nutanix,
            FeatureId::NonePlatform,
            FeatureId::UserManagedNetworking,
            FeatureId::DualStack,
            FeatureId::DualStackVips,
            FeatureId::VipAutoAlloc,
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
        if effective_load_balancer_type(cluster, cluster_update).as_deref()
            == Some(LoadBalancer::TYPE_USER_MANAGED)
        {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}
