//! Feature and architecture support matrix.
//!
//! The catalog is a static registry of feature entries keyed by
//! [`FeatureId`]. The evaluator functions below answer support-level
//! queries and validate that a cluster's activated features are mutually
//! compatible and compatible with its CPU architecture.

pub mod architectures;
pub mod features;
pub mod support_level;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{
    Cluster, ClusterKind, InfraEnv, Platform, PlatformType, UpdateParams,
    EXTERNAL_PLATFORM_NAME_OCI,
};

pub use architectures::{get_cpu_architecture_support_list, is_architecture_supported};
pub use support_level::{
    ActiveLevel, ArchitectureId, FeatureId, SupportLevel, SupportLevelFeature,
    SupportLevelFilters,
};

static FEATURES: LazyLock<BTreeMap<FeatureId, Box<dyn SupportLevelFeature>>> =
    LazyLock::new(|| {
        let entries: Vec<Box<dyn SupportLevelFeature>> = vec![
            Box::new(features::platforms::BaremetalFeature),
            Box::new(features::platforms::NonePlatformFeature),
            Box::new(features::platforms::NutanixFeature),
            Box::new(features::platforms::VsphereFeature),
            Box::new(features::platforms::ExternalFeature),
            Box::new(features::platforms::OciFeature),
            Box::new(features::networking::UserManagedNetworkingFeature),
            Box::new(features::networking::ClusterManagedNetworkingFeature),
            Box::new(features::networking::DualStackFeature),
            Box::new(features::networking::DualStackVipsFeature),
            Box::new(features::networking::VipAutoAllocFeature),
            Box::new(features::networking::SdnNetworkTypeFeature),
            Box::new(features::networking::OvnNetworkTypeFeature),
            Box::new(features::networking::UserManagedLoadBalancerFeature),
            Box::new(features::topology::SnoFeature),
            Box::new(features::topology::TnaFeature),
            Box::new(features::topology::NonStandardHaControlPlaneFeature),
            Box::new(features::image::MinimalIsoFeature),
            Box::new(features::operators::LvmFeature),
            Box::new(features::operators::CnvFeature),
            Box::new(features::operators::LsoFeature),
            Box::new(features::operators::MceFeature),
            Box::new(features::operators::OdfFeature),
        ];
        entries.into_iter().map(|f| (f.id(), f)).collect()
    });

/// The full registry.
pub fn catalog() -> &'static BTreeMap<FeatureId, Box<dyn SupportLevelFeature>> {
    &FEATURES
}

/// Catalog entry for one feature.
pub fn feature(id: FeatureId) -> Option<&'static dyn SupportLevelFeature> {
    let catalog: &'static BTreeMap<_, _> = &FEATURES;
    catalog.get(&id).map(|f| f.as_ref())
}

/// Support level of one feature under the given filters. None when the
/// feature is omitted from lists under these filters.
pub fn get_support_level(id: FeatureId, filters: &SupportLevelFilters) -> Option<SupportLevel> {
    feature(id).and_then(|f| f.support_level(filters))
}

/// Whether a feature can be used at all on this version/architecture.
pub fn is_feature_available(
    id: FeatureId,
    openshift_version: &str,
    cpu_architecture: Option<&str>,
) -> bool {
    let filters = SupportLevelFilters {
        openshift_version: openshift_version.to_string(),
        cpu_architecture: cpu_architecture.map(str::to_string),
        platform_type: None,
        external_platform_name: None,
    };
    get_support_level(id, &filters).is_some_and(SupportLevel::is_available)
}

/// Features that are in use given the state plus the pending update.
pub fn get_activated_features(
    cluster: Option<&Cluster>,
    infra_env: Option<&InfraEnv>,
    update: &UpdateParams,
) -> Vec<&'static dyn SupportLevelFeature> {
    let catalog: &'static BTreeMap<_, _> = &FEATURES;
    catalog
        .values()
        .filter(|f| {
            f.active_level(cluster, infra_env, update.cluster(), update.infra_env())
                == ActiveLevel::Active
        })
        .map(|f| f.as_ref())
        .collect()
}

fn is_day2_cluster(cluster: &Cluster) -> bool {
    cluster.kind == ClusterKind::AddHostsCluster
}

/// Run each activated feature's self-validation.
pub fn validate_active_features(
    cluster: Option<&Cluster>,
    infra_env: Option<&InfraEnv>,
    update: &UpdateParams,
) -> Result<()> {
    let Some(cluster) = cluster else {
        return Ok(());
    };
    if is_day2_cluster(cluster) {
        info!(
            "skipping feature support validation: cluster {} is of kind AddHostsCluster",
            cluster.id.as_deref().unwrap_or_default()
        );
        return Ok(());
    }
    for active in get_activated_features(Some(cluster), infra_env, update) {
        match active.self_validate(cluster, update.cluster()) {
            Some(Err(e)) => return Err(e),
            Some(Ok(())) => {}
            None => debug!(feature = active.name(), "feature has no self-validation"),
        }
    }
    Ok(())
}

/// Check every activated feature against the CPU architecture and against
/// the other activated features.
pub fn validate_incompatible_features(
    cluster: &Cluster,
    cpu_architecture: &str,
    infra_env: Option<&InfraEnv>,
    update: &UpdateParams,
) -> Result<()> {
    if is_day2_cluster(cluster) {
        info!(
            "skipping feature support validation: cluster {} is of kind AddHostsCluster",
            cluster.id.as_deref().unwrap_or_default()
        );
        return Ok(());
    }

    let version = cluster.openshift_version.as_str();
    let activated = get_activated_features(Some(cluster), infra_env, update);

    if !cpu_architecture.is_empty() && !version.is_empty() {
        if !is_architecture_supported(cpu_architecture, version)? {
            return Err(Error::Validation(format!(
                "cannot use {} architecture because it's not compatible on version {} of OpenShift",
                cpu_architecture, version
            )));
        }
        let arch = ArchitectureId::from_api_name(cpu_architecture).ok_or_else(|| {
            Error::InvalidInput(format!("invalid cpu architecture: {}", cpu_architecture))
        })?;
        for active in &activated {
            if active.incompatible_architectures(Some(version)).contains(&arch) {
                return Err(Error::Validation(format!(
                    "cannot use {} because it's not compatible with the {} architecture on version {} of OpenShift",
                    active.name(),
                    cpu_architecture,
                    version
                )));
            }
        }
    } else {
        warn!(
            cluster = cluster.id.as_deref().unwrap_or_default(),
            "skipping architecture compatibility check, architecture or version not set"
        );
    }

    let activated_ids: Vec<FeatureId> = activated.iter().map(|f| f.id()).collect();
    for active in &activated {
        for incompatible_id in active.incompatible_features(version) {
            if activated_ids.contains(&incompatible_id) {
                let other_name = feature(incompatible_id).map(|f| f.name()).unwrap_or("unknown");
                return Err(Error::Validation(format!(
                    "cannot use {} because it's not compatible with {}",
                    active.name(),
                    other_name
                )));
            }
        }
    }
    Ok(())
}

/// Whether a feature can run on the named architecture at a version.
pub fn is_feature_compatible_with_architecture(
    id: FeatureId,
    openshift_version: &str,
    cpu_architecture: &str,
) -> Result<bool> {
    let arch = ArchitectureId::from_api_name(cpu_architecture).ok_or_else(|| {
        Error::InvalidInput(format!("invalid cpu architecture: {}", cpu_architecture))
    })?;
    let Some(entry) = feature(id) else {
        return Ok(false);
    };
    Ok(!entry
        .incompatible_architectures(Some(openshift_version))
        .contains(&arch))
}

/// Whether the selected platform is available on this version/architecture.
pub fn is_platform_supported(
    platform: &Platform,
    openshift_version: &str,
    cpu_architecture: Option<&str>,
) -> Result<bool> {
    let Some(platform_type) = platform.r#type else {
        return Err(Error::InvalidInput("invalid platform type: none set".to_string()));
    };
    let external_name = platform
        .external
        .as_ref()
        .and_then(|e| e.platform_name.as_deref());
    let id = match platform_type {
        PlatformType::Baremetal => FeatureId::Baremetal,
        PlatformType::None => FeatureId::NonePlatform,
        PlatformType::Nutanix => FeatureId::Nutanix,
        PlatformType::Vsphere => FeatureId::Vsphere,
        PlatformType::External => {
            if external_name == Some(EXTERNAL_PLATFORM_NAME_OCI) {
                FeatureId::Oci
            } else {
                FeatureId::External
            }
        }
    };
    Ok(is_feature_available(id, openshift_version, cpu_architecture))
}

/// Support level per feature under the given filters. Features whose entry
/// answers None are omitted. When the filtered architecture is itself not
/// available at the version, every feature reports Unavailable.
pub fn get_feature_support_list(
    filters: &SupportLevelFilters,
) -> Vec<(FeatureId, SupportLevel)> {
    let arch_unavailable = filters
        .cpu_architecture
        .as_deref()
        .is_some_and(|arch| {
            !is_architecture_supported(arch, &filters.openshift_version).unwrap_or(false)
        });
    let catalog: &'static BTreeMap<_, _> = &FEATURES;
    catalog
        .values()
        .filter_map(|f| {
            let level = f.support_level(filters)?;
            if arch_unavailable {
                Some((f.id(), SupportLevel::Unavailable))
            } else {
                Some((f.id(), level))
            }
        })
        .collect()
}
