//! Tests for the feature support matrix and the compatibility evaluator.

use agent_install_operator::featuresupport::{
    FeatureId, SupportLevel, SupportLevelFilters, get_cpu_architecture_support_list,
    get_feature_support_list, is_architecture_supported, is_feature_available,
    is_feature_compatible_with_architecture, validate_active_features,
    validate_incompatible_features,
};
use agent_install_operator::models::{
    Cluster, ClusterKind, ClusterUpdateParams, ImageType, InfraEnv, LoadBalancer,
    MonitoredOperator, OperatorType, Platform, PlatformType, UpdateParams,
};

fn cluster(version: &str, arch: &str) -> Cluster {
    Cluster {
        openshift_version: version.to_string(),
        cpu_architecture: arch.to_string(),
        control_plane_count: 3,
        ..Default::default()
    }
}

fn olm_operator(name: &str) -> MonitoredOperator {
    MonitoredOperator {
        name: name.to_string(),
        operator_type: OperatorType::Olm,
        timeout_seconds: 0,
    }
}

#[test]
fn test_architecture_support_list_covers_all_architectures() {
    let list = get_cpu_architecture_support_list("4.12");
    assert_eq!(list.len(), 5);
    assert!(list.iter().all(|(_, level)| *level != SupportLevel::Unsupported));
}

#[test]
fn test_architecture_version_gates() {
    assert!(is_architecture_supported("x86_64", "4.9").unwrap());
    assert!(!is_architecture_supported("arm64", "4.9").unwrap());
    assert!(is_architecture_supported("arm64", "4.10").unwrap());
    assert!(!is_architecture_supported("s390x", "4.11").unwrap());
    assert!(is_architecture_supported("s390x", "4.12").unwrap());
    assert!(!is_architecture_supported("ppc64le", "4.11").unwrap());
    assert!(is_architecture_supported("ppc64le", "4.12").unwrap());
    assert!(is_architecture_supported("aarch64", "4.10").unwrap());
    assert!(is_architecture_supported("vax", "4.12").is_err());
}

#[test]
fn test_unsupported_architecture_message() {
    let cluster = cluster("4.9", "arm64");
    let err = validate_incompatible_features(&cluster, "arm64", None, &UpdateParams::None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot use arm64 architecture because it's not compatible on version 4.9 of OpenShift"
    );
}

#[test]
fn test_feature_incompatible_with_architecture_message() {
    let mut cluster = cluster("4.13", "s390x");
    cluster.monitored_operators = vec![olm_operator("lvm")];
    let err = validate_incompatible_features(&cluster, "s390x", None, &UpdateParams::None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot use Logical Volume Management because it's not compatible with the s390x architecture on version 4.13 of OpenShift"
    );
}

#[test]
fn test_sno_on_ppc64le_version_gates() {
    let mut sno = cluster("4.12", "ppc64le");
    sno.control_plane_count = 1;
    sno.user_managed_networking = Some(true);
    assert!(validate_incompatible_features(&sno, "ppc64le", None, &UpdateParams::None).is_ok());

    sno.openshift_version = "4.11".to_string();
    let err = validate_incompatible_features(&sno, "ppc64le", None, &UpdateParams::None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot use ppc64le architecture because it's not compatible on version 4.11 of OpenShift"
    );
}

#[test]
fn test_pairwise_incompatibility_message() {
    let mut cluster = cluster("4.16", "x86_64");
    cluster.user_managed_networking = Some(true);
    cluster.load_balancer = Some(LoadBalancer {
        r#type: Some(LoadBalancer::TYPE_USER_MANAGED.to_string()),
    });
    let err = validate_incompatible_features(&cluster, "x86_64", None, &UpdateParams::None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot use User Managed Networking because it's not compatible with User Managed Load Balancer"
    );
}

#[test]
fn test_nutanix_platform_conflicts_with_lvm() {
    let mut cluster = cluster("4.13", "x86_64");
    cluster.platform = Platform {
        r#type: Some(PlatformType::Nutanix),
        external: None,
    };
    cluster.monitored_operators = vec![olm_operator("lvm")];
    let err = validate_incompatible_features(&cluster, "x86_64", None, &UpdateParams::None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot use Nutanix Platform Integration because it's not compatible with Logical Volume Management"
    );
}

#[test]
fn test_day2_cluster_skips_validation() {
    let mut cluster = cluster("4.13", "x86_64");
    cluster.kind = ClusterKind::AddHostsCluster;
    cluster.platform = Platform {
        r#type: Some(PlatformType::Nutanix),
        external: None,
    };
    cluster.monitored_operators = vec![olm_operator("lvm")];
    assert!(validate_incompatible_features(&cluster, "x86_64", None, &UpdateParams::None).is_ok());
}

#[test]
fn test_update_overlay_introduces_conflict() {
    let mut cluster = cluster("4.15", "x86_64");
    cluster.platform = Platform {
        r#type: Some(PlatformType::Baremetal),
        external: None,
    };
    cluster.monitored_operators = vec![olm_operator("lvm")];
    assert!(validate_incompatible_features(&cluster, "x86_64", None, &UpdateParams::None).is_ok());

    let update = UpdateParams::Cluster(ClusterUpdateParams {
        platform: Some(Platform {
            r#type: Some(PlatformType::Nutanix),
            external: None,
        }),
        ..Default::default()
    });
    assert!(validate_incompatible_features(&cluster, "x86_64", None, &update).is_err());
}

#[test]
fn test_minimal_iso_unavailable_on_s390x() {
    let mut cluster = cluster("4.13", "s390x");
    cluster.user_managed_networking = Some(true);
    let infra_env = InfraEnv {
        cpu_architecture: "s390x".to_string(),
        r#type: Some(ImageType::MinimalIso),
        ..Default::default()
    };
    let err =
        validate_incompatible_features(&cluster, "s390x", Some(&infra_env), &UpdateParams::None)
            .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot use Minimal ISO because it's not compatible with the s390x architecture on version 4.13 of OpenShift"
    );
}

#[test]
fn test_sdn_network_type_self_validation() {
    let mut sdn = cluster("4.15", "x86_64");
    sdn.network_type = Some("OpenShiftSDN".to_string());
    let err = validate_active_features(Some(&sdn), None, &UpdateParams::None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Openshift version 4.15 is not supported for OpenShiftSDN NetworkType"
    );

    sdn.openshift_version = "4.10".to_string();
    assert!(validate_active_features(Some(&sdn), None, &UpdateParams::None).is_ok());
}

#[test]
fn test_self_validation_skips_day2_and_missing_cluster() {
    assert!(validate_active_features(None, None, &UpdateParams::None).is_ok());

    let mut sdn = cluster("4.15", "x86_64");
    sdn.network_type = Some("OpenShiftSDN".to_string());
    sdn.kind = ClusterKind::AddHostsCluster;
    assert!(validate_active_features(Some(&sdn), None, &UpdateParams::None).is_ok());
}

#[test]
fn test_feature_availability_gates() {
    assert!(!is_feature_available(FeatureId::Tna, "4.18", None));
    assert!(is_feature_available(FeatureId::Tna, "4.19", None));
    assert!(is_feature_available(FeatureId::VipAutoAlloc, "4.14", None));
    assert!(!is_feature_available(FeatureId::VipAutoAlloc, "4.15", None));
    assert!(!is_feature_available(FeatureId::Lvm, "4.10", None));
    // DevPreview still counts as available
    assert!(is_feature_available(FeatureId::Lvm, "4.11", None));
    assert!(!is_feature_available(FeatureId::UserManagedLoadBalancer, "4.15", None));
    assert!(is_feature_available(FeatureId::UserManagedLoadBalancer, "4.16", None));
}

#[test]
fn test_feature_architecture_compatibility() {
    assert!(!is_feature_compatible_with_architecture(FeatureId::Cnv, "4.13", "arm64").unwrap());
    assert!(is_feature_compatible_with_architecture(FeatureId::Cnv, "4.14", "arm64").unwrap());
    assert!(!is_feature_compatible_with_architecture(FeatureId::Odf, "4.14", "arm64").unwrap());
    assert!(is_feature_compatible_with_architecture(FeatureId::Odf, "4.14", "x86_64").unwrap());
    assert!(is_feature_compatible_with_architecture(FeatureId::Odf, "4.14", "junk").is_err());
}

#[test]
fn test_feature_support_list_default_filters() {
    let filters = SupportLevelFilters {
        openshift_version: "4.14".to_string(),
        ..Default::default()
    };
    let list = get_feature_support_list(&filters);
    assert!(list.contains(&(FeatureId::Sno, SupportLevel::Supported)));
    assert!(list.contains(&(FeatureId::SdnNetworkType, SupportLevel::Supported)));
    assert!(list.contains(&(FeatureId::Tna, SupportLevel::Unavailable)));
}
