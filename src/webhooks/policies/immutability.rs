//! Immutability validation policy.
//!
//! `imageSetRef` never changes. Once installation starts the rest of the
//! spec freezes too, except for the fields the installation itself fills
//! in.

use crate::crd::AgentClusterInstallSpec;
use crate::webhooks::policies::{ValidationContext, ValidationResult};

/// Spec fields that stay mutable after installation starts.
const MUTABLE_AFTER_START: [&str; 2] = ["ClusterMetadata", "IgnitionEndpoint"];
/// Additionally mutable once installation completed (day-2 scaling).
const MUTABLE_AFTER_COMPLETION: &str = "ProvisionRequirements";

/// Validate immutability rules on UPDATE.
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let Some(old) = ctx.old_resource else {
        return ValidationResult::allowed();
    };
    let new = ctx.resource;

    if old.spec.image_set_ref != new.spec.image_set_ref {
        return ValidationResult::denied(
            "ImmutableField",
            "Attempted to change AgentClusterInstall.ImageSetRef which is immutable",
        );
    }

    // Install state comes off the incoming object's status
    if new.install_already_started() {
        let mut mutable_fields: Vec<&str> = MUTABLE_AFTER_START.to_vec();
        if new.install_completed() {
            mutable_fields.push(MUTABLE_AFTER_COMPLETION);
        }
        let changes = spec_changes(&old.spec, &new.spec, &mutable_fields);
        if !changes.is_empty() {
            let message = format!(
                "Attempted to change AgentClusterInstall.Spec which is immutable after install started, except for {} fields. Unsupported change: \n{}",
                mutable_fields.join(","),
                changes.join("\n")
            );
            return ValidationResult::denied("ImmutableField", &message);
        }
    }

    ValidationResult::allowed()
}

/// Field-by-field diff of the spec, skipping the mutable fields. Each
/// change renders as "\tfield: (old => new)".
fn spec_changes(
    old: &AgentClusterInstallSpec,
    new: &AgentClusterInstallSpec,
    mutable_fields: &[&str],
) -> Vec<String> {
    let mut changes = Vec::new();
    record(&mut changes, mutable_fields, "ImageSetRef", &old.image_set_ref, &new.image_set_ref);
    record(&mut changes, mutable_fields, "ClusterMetadata", &old.cluster_metadata, &new.cluster_metadata);
    record(&mut changes, mutable_fields, "IgnitionEndpoint", &old.ignition_endpoint, &new.ignition_endpoint);
    record(&mut changes, mutable_fields, "ProvisionRequirements", &old.provision_requirements, &new.provision_requirements);
    record(&mut changes, mutable_fields, "Networking", &old.networking, &new.networking);
    record(&mut changes, mutable_fields, "PlatformType", &old.platform_type, &new.platform_type);
    record(&mut changes, mutable_fields, "SSHPublicKey", &old.ssh_public_key, &new.ssh_public_key);
    record(&mut changes, mutable_fields, "APIVIP", &old.api_vip, &new.api_vip);
    record(&mut changes, mutable_fields, "IngressVIP", &old.ingress_vip, &new.ingress_vip);
    record(&mut changes, mutable_fields, "HoldInstallation", &old.hold_installation, &new.hold_installation);
    changes
}

fn record<T: PartialEq + serde::Serialize>(
    changes: &mut Vec<String>,
    mutable_fields: &[&str],
    name: &str,
    old: &T,
    new: &T,
) {
    if mutable_fields.contains(&name) || old == new {
        return;
    }
    let render = |value: &T| {
        serde_json::to_string(value).unwrap_or_else(|_| "<unserializable>".to_string())
    };
    changes.push(format!("\t{}: ({} => {})", name, render(old), render(new)));
}
