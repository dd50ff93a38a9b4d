//! Tests for the AgentClusterInstall admission policies and the admission
//! review contract.

use agent_install_operator::crd::{
    AgentClusterInstall, AgentClusterInstallSpec, AgentClusterInstallStatus, ImageSetRef,
    ProvisionRequirements, StatusCondition, agent_cluster_install,
};
use agent_install_operator::webhooks::policies::{defaulting, validate_all};
use agent_install_operator::webhooks::{
    AdmissionRequest, AdmissionReview, ValidationContext, default_networking_patch,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

fn install(control_plane: i32, workers: i32) -> AgentClusterInstall {
    AgentClusterInstall {
        metadata: ObjectMeta {
            name: Some("test-install".to_string()),
            namespace: Some("default".to_string()),
            ..Default::default()
        },
        spec: AgentClusterInstallSpec {
            image_set_ref: Some(ImageSetRef {
                name: "openshift-v4.16".to_string(),
            }),
            provision_requirements: ProvisionRequirements {
                control_plane_agents: control_plane,
                worker_agents: workers,
            },
            ..Default::default()
        },
        status: None,
    }
}

fn with_completed_reason(mut resource: AgentClusterInstall, reason: &str) -> AgentClusterInstall {
    resource.status = Some(AgentClusterInstallStatus {
        conditions: vec![StatusCondition {
            r#type: agent_cluster_install::CONDITION_COMPLETED.to_string(),
            status: "False".to_string(),
            reason: reason.to_string(),
            message: String::new(),
        }],
    });
    resource
}

fn validate_update(
    old: &AgentClusterInstall,
    new: &AgentClusterInstall,
) -> agent_install_operator::webhooks::ValidationResult {
    let ctx = ValidationContext {
        resource: new,
        old_resource: Some(old),
        dry_run: false,
        namespace: Some("default"),
    };
    validate_all(&ctx)
}

#[test]
fn test_admission_review_contract() {
    let review_json = serde_json::json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
            "kind": {
                "group": "extensions.hive.openshift.io",
                "version": "v1beta1",
                "kind": "AgentClusterInstall"
            },
            "resource": {
                "group": "extensions.hive.openshift.io",
                "version": "v1beta1",
                "resource": "agentclusterinstalls"
            },
            "name": "test-install",
            "namespace": "default",
            "operation": "CREATE",
            "userInfo": {},
            "object": {
                "apiVersion": "extensions.hive.openshift.io/v1beta1",
                "kind": "AgentClusterInstall",
                "metadata": {"name": "test-install", "namespace": "default"},
                "spec": {
                    "provisionRequirements": {
                        "controlPlaneAgents": 3,
                        "workerAgents": 2
                    }
                }
            },
            "dryRun": false
        }
    });

    let review: AdmissionReview<AgentClusterInstall> =
        serde_json::from_value(review_json).unwrap();
    let request: AdmissionRequest<AgentClusterInstall> = review.try_into().unwrap();
    let resource = request.object.unwrap();
    assert_eq!(resource.spec.provision_requirements.control_plane_agents, 3);

    let ctx = ValidationContext {
        resource: &resource,
        old_resource: None,
        dry_run: request.dry_run,
        namespace: request.namespace.as_deref(),
    };
    assert!(validate_all(&ctx).allowed);
}

#[test]
fn test_defaulting_applies_to_sno_and_platform() {
    assert_eq!(
        defaulting::default_user_managed_networking(&install(1, 0)),
        Some(true)
    );

    let mut none_platform = install(3, 2);
    none_platform.spec.platform_type = Some(defaulting::PLATFORM_NONE.to_string());
    assert_eq!(
        defaulting::default_user_managed_networking(&none_platform),
        Some(true)
    );

    assert_eq!(
        defaulting::default_user_managed_networking(&install(3, 2)),
        Some(false)
    );
}

#[test]
fn test_mutating_patch_writes_false_for_multinode_create() {
    let review_json = serde_json::json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
            "kind": {
                "group": "extensions.hive.openshift.io",
                "version": "v1beta1",
                "kind": "AgentClusterInstall"
            },
            "resource": {
                "group": "extensions.hive.openshift.io",
                "version": "v1beta1",
                "resource": "agentclusterinstalls"
            },
            "name": "test-install",
            "namespace": "default",
            "operation": "CREATE",
            "userInfo": {},
            "object": {
                "apiVersion": "extensions.hive.openshift.io/v1beta1",
                "kind": "AgentClusterInstall",
                "metadata": {"name": "test-install", "namespace": "default"},
                "spec": {
                    "provisionRequirements": {
                        "controlPlaneAgents": 3,
                        "workerAgents": 2
                    }
                }
            },
            "dryRun": false
        }
    });

    let review: AdmissionReview<AgentClusterInstall> =
        serde_json::from_value(review_json).unwrap();
    let request: AdmissionRequest<AgentClusterInstall> = review.try_into().unwrap();
    let resource = request.object.as_ref().unwrap();

    let value = defaulting::default_user_managed_networking(resource).unwrap();
    assert!(!value);

    let patch = default_networking_patch(resource, value).unwrap();
    let mut object = serde_json::to_value(resource).unwrap();
    json_patch::patch(&mut object, &patch).unwrap();
    assert_eq!(
        object["spec"]["networking"]["userManagedNetworking"],
        serde_json::Value::Bool(false)
    );
}

#[test]
fn test_defaulting_skipped_after_install_started() {
    let started = with_completed_reason(
        install(1, 0),
        agent_cluster_install::REASON_INSTALLATION_IN_PROGRESS,
    );
    assert_eq!(defaulting::default_user_managed_networking(&started), None);
}

#[test]
fn test_sno_with_cluster_managed_networking_denied() {
    let mut resource = install(1, 0);
    resource.spec.networking.user_managed_networking = Some(false);
    let ctx = ValidationContext {
        resource: &resource,
        old_resource: None,
        dry_run: false,
        namespace: Some("default"),
    };
    let result = validate_all(&ctx);
    assert!(!result.allowed);
    assert_eq!(result.reason.unwrap(), "InvalidNetworking");
    assert_eq!(
        result.message.unwrap(),
        "UserManagedNetworking must be set to true with SNO"
    );
}

#[test]
fn test_image_set_ref_immutable_through_validate_all() {
    let old = install(3, 2);
    let mut new = install(3, 2);
    new.spec.image_set_ref = Some(ImageSetRef {
        name: "openshift-v4.17".to_string(),
    });
    let result = validate_update(&old, &new);
    assert!(!result.allowed);
    assert_eq!(result.reason.unwrap(), "ImmutableField");
}

#[test]
fn test_spec_frozen_after_install_started_through_validate_all() {
    let old = with_completed_reason(
        install(3, 2),
        agent_cluster_install::REASON_ALREADY_INSTALLING,
    );
    let mut new = with_completed_reason(
        install(3, 2),
        agent_cluster_install::REASON_ALREADY_INSTALLING,
    );
    new.spec.api_vip = Some("192.0.2.10".to_string());
    let result = validate_update(&old, &new);
    assert!(!result.allowed);
    let message = result.message.unwrap();
    assert!(message.contains("immutable after install started"));
    assert!(message.contains("\tAPIVIP: (null => \"192.0.2.10\")"));
}

#[test]
fn test_worker_scale_up_allowed_after_completion() {
    let old = with_completed_reason(install(3, 2), agent_cluster_install::REASON_INSTALLED);
    let mut new = with_completed_reason(install(3, 2), agent_cluster_install::REASON_INSTALLED);
    new.spec.provision_requirements.worker_agents = 5;
    assert!(validate_update(&old, &new).allowed);
}
