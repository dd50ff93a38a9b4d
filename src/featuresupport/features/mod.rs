//! Feature catalog entries.
//!
//! Each submodule holds the entries for one slice of the catalog. The
//! helpers below merge the current state with a pending update so every
//! activation check sees the value that would hold after the update.

pub mod image;
pub mod networking;
pub mod operators;
pub mod platforms;
pub mod topology;

use crate::models::{
    Cluster, ClusterUpdateParams, ImageType, InfraEnv, InfraEnvUpdateParams, PlatformType,
};

pub(crate) fn effective_platform_type(
    cluster: &Cluster,
    update: Option<&ClusterUpdateParams>,
) -> Option<PlatformType> {
    update
        .and_then(|u| u.platform.as_ref())
        .and_then(|p| p.r#type)
        .or(cluster.platform.r#type)
}

pub(crate) fn effective_external_platform_name(
    cluster: &Cluster,
    update: Option<&ClusterUpdateParams>,
) -> Option<String> {
    let from_update = update
        .and_then(|u| u.platform.as_ref())
        .and_then(|p| p.external.as_ref())
        .and_then(|e| e.platform_name.clone());
    from_update.or_else(|| {
        cluster
            .platform
            .external
            .as_ref()
            .and_then(|e| e.platform_name.clone())
    })
}

pub(crate) fn effective_user_managed_networking(
    cluster: &Cluster,
    update: Option<&ClusterUpdateParams>,
) -> Option<bool> {
    update
        .and_then(|u| u.user_managed_networking)
        .or(cluster.user_managed_networking)
}

pub(crate) fn effective_network_type(
    cluster: &Cluster,
    update: Option<&ClusterUpdateParams>,
) -> Option<String> {
    update
        .and_then(|u| u.network_type.clone())
        .or_else(|| cluster.network_type.clone())
}

pub(crate) fn effective_vip_dhcp_allocation(
    cluster: &Cluster,
    update: Option<&ClusterUpdateParams>,
) -> Option<bool> {
    update
        .and_then(|u| u.vip_dhcp_allocation)
        .or(cluster.vip_dhcp_allocation)
}

pub(crate) fn effective_machine_networks<'a>(
    cluster: &'a Cluster,
    update: Option<&'a ClusterUpdateParams>,
) -> &'a [String] {
    match update.and_then(|u| u.machine_networks.as_deref()) {
        Some(networks) => networks,
        None => &cluster.machine_networks,
    }
}

pub(crate) fn effective_api_vips<'a>(
    cluster: &'a Cluster,
    update: Option<&'a ClusterUpdateParams>,
) -> &'a [String] {
    match update.and_then(|u| u.api_vips.as_deref()) {
        Some(vips) => vips,
        None => &cluster.api_vips,
    }
}

pub(crate) fn effective_load_balancer_type(
    cluster: &Cluster,
    update: Option<&ClusterUpdateParams>,
) -> Option<String> {
    let from_update = update
        .and_then(|u| u.load_balancer.as_ref())
        .and_then(|lb| lb.r#type.clone());
    from_update.or_else(|| {
        cluster
            .load_balancer
            .as_ref()
            .and_then(|lb| lb.r#type.clone())
    })
}

pub(crate) fn effective_control_plane_count(
    cluster: &Cluster,
    update: Option<&ClusterUpdateParams>,
) -> i64 {
    update
        .and_then(|u| u.control_plane_count)
        .unwrap_or(cluster.control_plane_count)
}

/// Whether an OLM operator is requested, after the update overlay.
/// An update with an operator list replaces the cluster's list entirely.
pub(crate) fn is_operator_activated(
    name: &str,
    cluster: &Cluster,
    update: Option<&ClusterUpdateParams>,
) -> bool {
    match update.and_then(|u| u.olm_operators.as_ref()) {
        Some(operators) => operators.iter().any(|op| op.name == name),
        None => cluster
            .monitored_operators
            .iter()
            .any(|op| op.name == name),
    }
}

pub(crate) fn effective_image_type(
    infra_env: &InfraEnv,
    update: Option<&InfraEnvUpdateParams>,
) -> Option<ImageType> {
    update.and_then(|u| u.image_type).or(infra_env.r#type)
}

pub(crate) fn is_ipv4_cidr(cidr: &str) -> bool {
    !cidr.contains(':') && cidr.contains('.')
}

pub(crate) fn is_ipv6_cidr(cidr: &str) -> bool {
    cidr.contains(':')
}
