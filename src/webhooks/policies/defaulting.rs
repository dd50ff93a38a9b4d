//! UserManagedNetworking defaulting and topology rules.

use crate::crd::AgentClusterInstall;
use crate::webhooks::policies::{ValidationContext, ValidationResult};

pub const PLATFORM_NONE: &str = "None";
pub const PLATFORM_EXTERNAL: &str = "External";

/// Value to write back into `spec.networking.userManagedNetworking` when
/// the field is unset, or None when the spec must be left alone.
///
/// Single-node installs and the none/external platforms cannot use
/// cluster-managed networking, so the field defaults to true for them and
/// to false for everything else. Once installation has started (or the
/// resource is being deleted), or the field is already set, no default is
/// written.
pub fn default_user_managed_networking(resource: &AgentClusterInstall) -> Option<bool> {
    if resource.install_already_started() || resource.metadata.deletion_timestamp.is_some() {
        return None;
    }
    if resource.spec.networking.user_managed_networking.is_some() {
        return None;
    }
    let platform = resource.spec.platform_type.as_deref();
    let platform_requires_umn = matches!(platform, Some(PLATFORM_NONE) | Some(PLATFORM_EXTERNAL));
    let single_node = resource.is_single_node()
        && matches!(platform, None | Some("") | Some(PLATFORM_NONE));
    Some(platform_requires_umn || single_node)
}

/// Reject configurations the installer cannot act on.
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let resource = ctx.resource;
    if resource.is_single_node()
        && resource.spec.networking.user_managed_networking == Some(false)
    {
        return ValidationResult::denied(
            "InvalidNetworking",
            "UserManagedNetworking must be set to true with SNO",
        );
    }
    ValidationResult::allowed()
}
